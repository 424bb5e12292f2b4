//! Common, shared types.

pub mod config;
pub mod layers;
pub mod math;
pub mod rng;
pub mod state;
pub mod tags;
pub mod tunables;

#[cfg(test)]
pub mod test_utils;
