//! Ability pickups: drift toward a nearby player, get collected on contact.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::math::move_towards;
use crate::common::state::GameState;
use crate::plugins::core::{ContactSet, TickSet};
use crate::plugins::physics::contacts::{Contact, ContactPhase};
use crate::plugins::player::ability::{AbilityKind, AbilityWindow};
use crate::plugins::player::components::Player;
use crate::plugins::pooling::pool::despawn;
use crate::plugins::pooling::{Pooled, PooledEntity, SpawnContext};

#[derive(Component, Debug, Clone)]
pub struct Pickup {
    pub kind: AbilityKind,
    /// Length of the ability window once activated.
    pub duration: f32,
    direction: Vec2,
}

impl Pickup {
    pub const FOLLOW_RANGE: f32 = 3.0;
    pub const FOLLOW_SPEED: f32 = 5.0;
    pub const CULL_DISTANCE: f32 = 30.0;

    pub fn new(kind: AbilityKind, duration: f32) -> Self {
        Self {
            kind,
            duration,
            direction: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn direction(&self) -> Vec2 {
        self.direction
    }

    /// One step. False when the pickup strayed too far and should leave play.
    pub fn tick(&mut self, tf: &mut Transform, player: Vec2, dt: f32) -> bool {
        let position = tf.translation.truncate();
        let distance = position.distance(player);
        if distance > Self::CULL_DISTANCE {
            return false;
        }

        let target = if distance <= Self::FOLLOW_RANGE {
            (player - position).normalize_or_zero()
        } else {
            Vec2::ZERO
        };
        self.direction = move_towards(self.direction, target, dt);
        tf.translation += (Self::FOLLOW_SPEED * dt * self.direction).extend(0.0);
        true
    }
}

impl PooledEntity for Pickup {
    fn on_spawn(&mut self, _ctx: &mut SpawnContext) {
        self.direction = Vec2::ZERO;
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        tick_pickups
            .in_set(TickSet::Actors)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(
        FixedPostUpdate,
        collect_pickups
            .in_set(ContactSet::Resolve)
            .run_if(in_state(GameState::InGame)),
    );
}

pub fn tick_pickups(
    time: Res<Time<Fixed>>,
    q_player: Query<&Transform, (With<Player>, Without<Pickup>)>,
    mut q: Query<(&mut Pickup, &mut Pooled, &mut Transform)>,
) {
    let Ok(player) = q_player.single() else {
        return;
    };
    let player = player.translation.truncate();
    let dt = time.delta_secs();

    for (mut pickup, mut pooled, mut tf) in &mut q {
        if pooled.active && !pickup.tick(&mut tf, player, dt) {
            despawn(&mut *pickup, &mut pooled);
        }
    }
}

/// Touching a pickup replaces whatever the player holds.
pub fn collect_pickups(
    mut contacts: MessageReader<Contact>,
    mut q_pickups: Query<(&mut Pickup, &mut Pooled)>,
    mut q_player: Query<&mut AbilityWindow, With<Player>>,
) {
    for c in contacts.read() {
        if c.phase != ContactPhase::Enter {
            continue;
        }
        let Some((pickup_e, player_e, _)) = c.split(|e| q_pickups.contains(e)) else {
            continue;
        };
        let Ok(mut window) = q_player.get_mut(player_e) else {
            continue;
        };
        let Ok((mut pickup, mut pooled)) = q_pickups.get_mut(pickup_e) else {
            continue;
        };
        if !pooled.active {
            continue;
        }

        debug!("picked up {:?}", pickup.kind);
        window.pick_up(pickup.kind, pickup.duration);
        despawn(&mut *pickup, &mut pooled);
    }
}
