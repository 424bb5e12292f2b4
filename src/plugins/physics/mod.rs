//! Physics: Avian setup plus the bridge from collision messages to gameplay
//! `Contact` messages.

pub mod contacts;

use avian2d::prelude::*;
use bevy::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::core::ContactSet;

pub fn plugin(app: &mut App) {
    let unit = app.world().resource::<Tunables>().physics_length_unit;
    app.add_plugins(PhysicsPlugins::default().with_length_unit(unit));
    app.insert_resource(Gravity(Vec2::ZERO));

    app.add_message::<contacts::Contact>().add_systems(
        FixedPostUpdate,
        contacts::bridge_contacts
            .in_set(ContactSet::Bridge)
            .run_if(in_state(GameState::InGame)),
    );
}
