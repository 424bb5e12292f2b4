//! Player plugin.
//!
//! Pipeline:
//! - Update: sample keyboard + mouse, write the `PlayerInput` resource
//! - FixedUpdate (`TickSet::Player`): steer/dash, aim, shoot, run the ability window
//! - FixedUpdate (`TickSet::Actors`): laser sweep while the Laser window is open
//! - FixedPostUpdate (`ContactSet::Apply`): damage and level-ups produced by contacts
//!
//! The player is not pooled. It is spawned on entering `InGame` and removed
//! with `DespawnOnExit`.

pub mod ability;
pub mod components;
pub mod messages;
pub mod systems;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::core::{ContactSet, TickSet};

pub use ability::{AbilityKind, AbilityWindow};
pub use components::{CameraShake, ItemBox, Player, PlayerInput, PlayerState};
pub use messages::{PlayerHit, WaveLevelUp};

pub fn plugin(app: &mut App) {
    app.init_resource::<PlayerInput>()
        .init_resource::<CameraShake>()
        .init_resource::<ItemBox>()
        .add_message::<PlayerHit>()
        .add_message::<WaveLevelUp>()
        .add_systems(OnEnter(GameState::InGame), systems::spawn_player);

    app.add_systems(
        Update,
        (systems::gather_input, systems::update_item_box).run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedUpdate,
        (
            systems::tick_player.in_set(TickSet::Player),
            systems::sweep_laser.in_set(TickSet::Actors),
        )
            .run_if(in_state(GameState::InGame)),
    );

    app.add_systems(
        FixedPostUpdate,
        (systems::apply_level_ups, systems::apply_player_hits)
            .chain()
            .in_set(ContactSet::Apply)
            .run_if(in_state(GameState::InGame)),
    );
}
