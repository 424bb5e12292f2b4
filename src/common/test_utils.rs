//! Test helpers.
//!
//! `World::run_system_once` (via the `RunSystemOnce` trait) runs a system without
//! building a schedule. Systems that use `Commands` only enqueue structural
//! changes, so we `flush()` before assertions.

use std::time::Duration;

use bevy::ecs::message::Messages;
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

use crate::common::rng::GameRng;
use crate::plugins::audio::AudioCues;
use crate::plugins::director::wave::WaveDirector;
use crate::plugins::physics::contacts::Contact;
use crate::plugins::player::messages::{PlayerHit, WaveLevelUp};
use crate::plugins::pooling::messages::SpawnRequest;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A `Time<Fixed>` whose last delta is `dt`.
pub fn fixed_time_with_delta(dt: f32) -> Time<Fixed> {
    let mut t = Time::<Fixed>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}

/// A world with every gameplay message buffer and the shared resources the
/// fixed-step systems expect.
pub fn gameplay_world(dt: f32) -> World {
    let mut world = World::new();
    world.init_resource::<Messages<SpawnRequest>>();
    world.init_resource::<Messages<Contact>>();
    world.init_resource::<Messages<PlayerHit>>();
    world.init_resource::<Messages<WaveLevelUp>>();
    world.insert_resource(fixed_time_with_delta(dt));
    world.insert_resource(Time::<Virtual>::default());
    world.insert_resource(GameRng::from_seed(7));
    world.insert_resource(WaveDirector::default());
    world.insert_resource(AudioCues::from_keys(["BGM", "Death", "Hurt", "Shoot"]));
    world
}

/// Drain every `SpawnRequest` currently buffered.
pub fn spawn_requests(world: &mut World) -> Vec<SpawnRequest> {
    world
        .resource_mut::<Messages<SpawnRequest>>()
        .drain()
        .collect()
}

/// Drain every `PlayerHit` currently buffered.
pub fn player_hits(world: &mut World) -> Vec<PlayerHit> {
    world.resource_mut::<Messages<PlayerHit>>().drain().collect()
}
