//! Projectiles: pooled player and enemy bullets.
//!
//! Bullets are spawned through `SpawnRequest` like every other pooled actor.
//! They move along their facing each fixed step, park themselves when their
//! lifetime runs out and resolve `Enter` contacts after the physics step.
//!
//! ```text
//! FixedUpdate / TickSet::Actors
//!   tick_player_bullets, tick_enemy_bullets
//!
//! FixedPostUpdate / ContactSet::Resolve
//!   resolve_player_bullet_hits   damage enemies, award experience on defeat
//!   resolve_enemy_bullet_hits    damage the player, shove other enemies
//! ```

pub mod components;
pub mod systems;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::core::{ContactSet, TickSet};

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (systems::tick_player_bullets, systems::tick_enemy_bullets)
            .in_set(TickSet::Actors)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        (
            systems::resolve_player_bullet_hits,
            systems::resolve_enemy_bullet_hits,
        )
            .in_set(ContactSet::Resolve)
            .run_if(in_state(GameState::InGame)),
    );
}

#[cfg(test)]
mod tests;
