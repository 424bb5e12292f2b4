//! Camera plugin (render-only).
//!
//! The camera chases the player, leans toward the cursor and adds whatever
//! shake gameplay asked for through `CameraShake`.
//!
//! The key subtlety: **B0001**.
//! A system cannot have `Query<&Transform>` and `Query<&mut Transform>` at the same time
//! unless Bevy can prove those queries are disjoint. We encode disjointness
//! using `Without<...>` filters.
//!
//! ```text
//! Startup:    spawn MainCamera (world units, fitted to `view_half_extents`)
//! PostUpdate: follow_player = smoothed player position + aim lean + shake
//! ```

use bevy::camera::ScalingMode;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_firefly::prelude::*;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::common::state::GameState;
use crate::common::tunables::Tunables;
use crate::plugins::player::{CameraShake, Player};

/// How far the camera leans toward the cursor, as a fraction of the viewport.
pub const AIM_LEAN_LIMIT: f32 = 0.25;

#[derive(Component)]
pub struct MainCamera {
    pub responsiveness: f32,
    /// Smoothed follow target, before lean and shake.
    anchor: Vec2,
}

/// Presentation-only randomness, kept away from the gameplay rng.
#[derive(Component)]
struct ShakeRng(ChaCha8Rng);

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, spawn_camera).add_systems(
        PostUpdate,
        follow_player
            .before(TransformSystems::Propagate)
            .run_if(in_state(GameState::InGame)),
    );
}

fn spawn_camera(mut commands: Commands, tunables: Res<Tunables>) {
    let half = tunables.view_half_extents();
    commands.spawn((
        Name::new("MainCamera"),
        Camera2d,
        MainCamera {
            responsiveness: 5.0,
            anchor: Vec2::ZERO,
        },
        ShakeRng(ChaCha8Rng::seed_from_u64(0)),
        Projection::from(OrthographicProjection {
            scaling_mode: ScalingMode::AutoMin {
                min_width: half.x * 2.0,
                min_height: half.y * 2.0,
            },
            ..OrthographicProjection::default_2d()
        }),
        FireflyConfig::default(),
        Transform::from_xyz(0.0, 0.0, 999.0),
    ));
}

/// Cursor offset from the viewport center in `[-limit, limit]`, y up.
pub fn aim_lean(cursor: Vec2, viewport: Vec2, limit: f32) -> Vec2 {
    if viewport.x <= 0.0 || viewport.y <= 0.0 {
        return Vec2::ZERO;
    }
    let fraction = cursor / viewport - Vec2::splat(0.5);
    Vec2::new(fraction.x, -fraction.y).clamp(Vec2::splat(-limit), Vec2::splat(limit))
}

fn follow_player(
    time: Res<Time>,
    shake: Res<CameraShake>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    // Disjointness proof: Player entities are not MainCamera entities.
    q_player: Query<&Transform, (With<Player>, Without<MainCamera>)>,
    // Disjointness proof: MainCamera entities are not Player entities.
    mut q_cam: Query<(&mut Transform, &mut MainCamera, &mut ShakeRng), Without<Player>>,
) {
    let Ok(tf_player) = q_player.single() else {
        return;
    };
    let Ok((mut tf_cam, mut cam, mut rng)) = q_cam.single_mut() else {
        return;
    };

    let dt = time.delta_secs();
    let alpha = 1.0 - (-cam.responsiveness * dt).exp();
    let target = tf_player.translation.truncate();
    cam.anchor = cam.anchor + (target - cam.anchor) * alpha;

    let lean = q_window
        .single()
        .ok()
        .and_then(|w| w.cursor_position().map(|c| aim_lean(c, w.size(), AIM_LEAN_LIMIT)))
        .unwrap_or(Vec2::ZERO);

    let amount = shake.amount();
    let jitter = if amount > 0.0 {
        Vec2::new(rng.0.gen_range(-1.0..=1.0), rng.0.gen_range(-1.0..=1.0)) * amount
    } else {
        Vec2::ZERO
    };

    let position = cam.anchor + lean + jitter;
    tf_cam.translation.x = position.x;
    tf_cam.translation.y = position.y;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lean_is_zero_at_the_center() {
        assert_eq!(aim_lean(Vec2::new(640.0, 360.0), Vec2::new(1280.0, 720.0), 0.25), Vec2::ZERO);
    }

    #[test]
    fn lean_is_clamped_and_points_up_for_top_of_screen() {
        let lean = aim_lean(Vec2::new(1280.0, 0.0), Vec2::new(1280.0, 720.0), 0.25);
        assert_eq!(lean, Vec2::new(0.25, 0.25));
    }

    #[test]
    fn degenerate_viewports_do_not_lean() {
        assert_eq!(aim_lean(Vec2::new(10.0, 10.0), Vec2::ZERO, 0.25), Vec2::ZERO);
    }
}
