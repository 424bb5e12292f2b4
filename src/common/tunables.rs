//! Tunable gameplay constants.

use bevy::prelude::*;
use serde::Deserialize;

#[derive(Resource, Debug, Clone, Deserialize)]
pub struct Tunables {
    pub physics_length_unit: f32,
    pub pixels_per_unit: f32,
    /// Half of the visible area in world units, used to place spawns off screen.
    pub view_half_extents: [f32; 2],
    pub player_max_move_speed: f32,
    pub player_shoot_cooldown: f32,
    pub player_initial_max_health: i32,
}

impl Tunables {
    #[inline]
    pub fn view_half_extents(&self) -> Vec2 {
        Vec2::from_array(self.view_half_extents)
    }
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            physics_length_unit: 1.0,
            pixels_per_unit: 48.0,
            view_half_extents: [13.5, 7.5],
            player_max_move_speed: 3.0,
            player_shoot_cooldown: 0.07,
            player_initial_max_health: 450,
        }
    }
}
