//! Lighting plugin (Firefly) (render-only).
//!
//! One warm point light rides on the player; enemies carry `Occluder2d`
//! (see the pooling prefabs) and cast shadows from it.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy_firefly::prelude::*;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::{Player, PlayerState};

/// Light reach in pixels; converted to world units at spawn.
const LIGHT_RANGE_PX: f32 = 450.0;

#[derive(Component)]
pub struct PlayerLight;

pub fn plugin(app: &mut App) {
    if !app.is_plugin_added::<FireflyPlugin>() {
        app.add_plugins(FireflyPlugin);
    }

    app.add_systems(OnEnter(GameState::InGame), setup)
        .add_systems(Update, follow_player_light.run_if(in_state(GameState::InGame)));
}

fn setup(mut commands: Commands, tunables: Res<Tunables>) {
    commands.spawn((
        Name::new("PlayerLight"),
        PlayerLight,
        PointLight2d {
            color: Color::srgb(1.0, 0.9, 0.75),
            radius: LIGHT_RANGE_PX / tunables.pixels_per_unit,
            ..default()
        },
        Transform::from_xyz(0.0, 0.0, 10.0),
        DespawnOnExit(GameState::InGame),
    ));
}

fn follow_player_light(
    q_player: Query<(&Transform, &PlayerState), (With<Player>, Without<PlayerLight>)>,
    mut q_light: Query<(&mut Transform, &mut Visibility), (With<PlayerLight>, Without<Player>)>,
) {
    let Ok((tf_player, state)) = q_player.single() else {
        return;
    };
    let Ok((mut tf_light, mut visibility)) = q_light.single_mut() else {
        return;
    };

    tf_light.translation.x = tf_player.translation.x;
    tf_light.translation.y = tf_player.translation.y;
    let wanted = if state.alive { Visibility::Inherited } else { Visibility::Hidden };
    visibility.set_if_neq(wanted);
}
