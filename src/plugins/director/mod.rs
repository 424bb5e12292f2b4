//! Wave director: experience, level-ups and timed enemy/pickup spawns.
//!
//! The director never spawns directly. It checks the registry for an
//! inactive member not already requested this step, then writes a
//! `SpawnRequest` placed just off screen.
//! Wave enemies are admitted only while fewer than `max_concurrent` of them
//! are in play; replacements for culled enemies skip that check.

pub mod wave;

use bevy::ecs::message::MessageWriter;
use bevy::platform::collections::HashMap;
use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;

use crate::common::rng::GameRng;
use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::core::TickSet;
use crate::plugins::player::components::Player;
use crate::plugins::pooling::{PoolError, PoolRegistry, Pooled, SpawnRequest};

pub use wave::{WaveDirector, WaveState};

pub fn plugin(app: &mut App) {
    app.init_resource::<WaveDirector>()
        .add_systems(OnEnter(GameState::InGame), reset_director)
        .add_systems(
            FixedUpdate,
            tick_director
                .in_set(TickSet::Director)
                .run_if(in_state(GameState::InGame)),
        );
}

fn reset_director(mut director: ResMut<WaveDirector>) {
    *director = WaveDirector::default();
}

/// Wave enemies in play, counted over every unlocked enemy pool.
pub fn active_enemies(
    director: &WaveDirector,
    registry: &PoolRegistry,
    is_active: impl Fn(Entity) -> bool,
) -> usize {
    director
        .unlocked()
        .iter()
        .filter_map(|tag| registry.active_count(tag, &is_active).ok())
        .sum()
}

/// Free-slot check that remembers what this step already asked for.
/// Requests are only fulfilled by the allocator later in the step, so the
/// registry alone would admit several requests onto one free slot.
struct Admission<'a, F> {
    registry: &'a PoolRegistry,
    is_active: F,
    claimed: HashMap<&'static str, usize>,
}

impl<'a, F: Fn(Entity) -> bool> Admission<'a, F> {
    fn new(registry: &'a PoolRegistry, is_active: F) -> Self {
        Self {
            registry,
            is_active,
            claimed: HashMap::default(),
        }
    }

    /// Reserve one inactive slot of `tag` if any is left.
    fn claim(&mut self, tag: &'static str) -> Result<bool, PoolError> {
        let capacity = self.registry.capacity(tag)?;
        let active = self.registry.active_count(tag, &self.is_active)?;
        let taken = self.claimed.entry(tag).or_default();
        if capacity.saturating_sub(active) <= *taken {
            return Ok(false);
        }
        *taken += 1;
        Ok(true)
    }

    /// Wave enemies in play plus the ones requested this step.
    fn enemies(&self, director: &WaveDirector) -> usize {
        let pending: usize = director
            .unlocked()
            .iter()
            .filter_map(|tag| self.claimed.get(tag))
            .sum();
        active_enemies(director, self.registry, &self.is_active) + pending
    }
}

pub fn tick_director(
    time: Res<Time<Fixed>>,
    tunables: Res<Tunables>,
    registry: Res<PoolRegistry>,
    mut director: ResMut<WaveDirector>,
    mut rng: ResMut<GameRng>,
    q_player: Query<&Transform, With<Player>>,
    q_pooled: Query<&Pooled>,
    mut spawns: MessageWriter<SpawnRequest>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };
    let center = player.translation.truncate();
    let half_extents = tunables.view_half_extents();
    let mut admission = Admission::new(&*registry, |e: Entity| {
        q_pooled.get(e).is_ok_and(Pooled::is_active)
    });
    let rng = &mut rng.0;

    let mut request = |tag: &'static str, admitted: Result<bool, PoolError>, rng: &mut ChaCha8Rng| {
        match admitted {
            Ok(true) => {
                let position = wave::offscreen_point(center, half_extents, rng);
                spawns.write(SpawnRequest::at(tag, position, 0.0));
            }
            Ok(false) => {}
            Err(err) => error!("wave director: {err}"),
        }
    };

    for _ in 0..director.take_top_ups() {
        let tag = director.pick_enemy(rng);
        request(tag, admission.claim(tag), rng);
    }

    let cadence = director.step(time.delta_secs(), rng);

    if cadence.enemy && admission.enemies(&director) < director.wave().max_concurrent as usize {
        let tag = director.pick_enemy(rng);
        request(tag, admission.claim(tag), rng);
    }

    if cadence.item {
        let tag = WaveDirector::pick_item(rng);
        request(tag, admission.claim(tag), rng);
    }
}

#[cfg(test)]
mod tests;
