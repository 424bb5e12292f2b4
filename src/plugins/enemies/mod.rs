//! Enemies: seven pooled kinds sharing one `Enemy` component.
//!
//! ```text
//! FixedUpdate / TickSet::Actors
//!   tick_enemies        cull, move, fire (SpawnRequest / PlayerHit), expire
//!   retire_empty_groups chaser formations leave play with their last member
//!
//! FixedPostUpdate / ContactSet::Resolve
//!   resolve_enemy_contacts  Stay contacts: player damage, chaser rams, shoves
//!
//! Update
//!   show_beam_charge    sniper tint while the beam charges
//! ```
//!
//! Defeats go through `DefeatHooks` so every path plays the same cue, spawns
//! the same effect and awards experience at most once.

pub mod catalog;
pub mod components;
pub mod defeat;
pub mod fire;
pub mod systems;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::core::{ContactSet, TickSet};

pub use components::{ChaserGroup, Enemy, EnemyKind};
pub use defeat::DefeatHooks;

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        (systems::tick_enemies, systems::retire_empty_groups)
            .chain()
            .in_set(TickSet::Actors)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        (systems::resolve_enemy_contacts, systems::retire_empty_groups)
            .chain()
            .in_set(ContactSet::Resolve)
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        Update,
        systems::show_beam_charge.run_if(in_state(GameState::InGame)),
    );
}
