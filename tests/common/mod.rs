//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `MinimalPlugins` provides core ECS runtime.
//! - we then call `spaccanavi::game::configure_headless` to install gameplay plugins.

use std::time::Duration;

use bevy::asset::AssetPlugin;
use bevy::prelude::*;
use bevy::scene::ScenePlugin;
use bevy::state::app::StatesPlugin;
use bevy::time::TimeUpdateStrategy;

use spaccanavi::plugins::pooling::{PoolRegistry, Pooled};

pub fn app_headless() -> App {
    let mut app = App::new();

    // Add AssetPlugin + ScenePlugin so SceneSpawner exists.
    app.add_plugins((
        MinimalPlugins,
        StatesPlugin,
        AssetPlugin::default(),
        ScenePlugin,
    ));

    spaccanavi::game::configure_headless(&mut app);
    // `App::run` normally does this; plugins (e.g. Avian) register
    // resources in `finish`.
    app.finish();
    app.cleanup();
    app
}

/// A headless app where every `update()` advances virtual time by one
/// fixed step, so frames and fixed ticks line up.
pub fn app_stepping() -> App {
    let mut app = app_headless();
    let step = app.world().resource::<Time<Fixed>>().timestep();
    app.insert_resource(TimeUpdateStrategy::ManualDuration(step));
    // Startup + the initial OnEnter(InGame).
    app.update();
    app
}

pub fn run_for(app: &mut App, secs: f32) {
    let step = app.world().resource::<Time<Fixed>>().timestep();
    let frames = (Duration::from_secs_f32(secs).as_secs_f64() / step.as_secs_f64()).ceil() as u32;
    for _ in 0..frames {
        app.update();
    }
}

/// Entities of the pool under `tag` that are in play.
pub fn active_in(app: &mut App, tag: &str) -> Vec<Entity> {
    let world = app.world_mut();
    let slots = world
        .resource::<PoolRegistry>()
        .pool(tag)
        .expect("pool registered")
        .slots()
        .to_vec();
    slots
        .into_iter()
        .filter(|&e| world.get::<Pooled>(e).is_some_and(Pooled::is_active))
        .collect()
}
