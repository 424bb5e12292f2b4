//! Seeded game randomness.
//!
//! Every random draw in the simulation (spawn cadence, spinner drift, burst
//! pauses, off-screen positions) goes through this resource so that a fixed
//! seed replays the same session.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[derive(Resource, Debug, Clone, Deref, DerefMut)]
pub struct GameRng(pub ChaCha8Rng);

impl GameRng {
    pub fn from_seed(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }
}

impl Default for GameRng {
    fn default() -> Self {
        Self::from_seed(0)
    }
}
