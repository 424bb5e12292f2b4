//! Feature plugins.

use bevy::prelude::*;

pub mod audio;
pub mod core;
pub mod director;
pub mod effects;
pub mod enemies;
pub mod physics;
pub mod pickups;
pub mod player;
pub mod pooling;
pub mod projectiles;
pub mod session;

// Render-only
pub mod camera;
pub mod lighting;

/// Register gameplay plugins that work in headless tests.
///
/// `core` goes first: it turns `GameConfig` into the resources and system
/// sets everything else builds on.
pub fn register_gameplay(app: &mut App) {
    core::plugin(app);
    physics::plugin(app);
    audio::plugin(app);
    pooling::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    projectiles::plugin(app);
    pickups::plugin(app);
    effects::plugin(app);
    director::plugin(app);
    session::plugin(app);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    lighting::plugin(app);
    camera::plugin(app);
}

/// Register all plugins (full app).
pub fn register_all(app: &mut App) {
    register_gameplay(app);
    register_render(app);
}
