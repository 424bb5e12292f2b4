use avian2d::prelude::*;
use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::window::PrimaryWindow;

use crate::common::layers::ActorCategory;
use crate::common::math::{heading, in_beam, look_angle, z_angle};
use crate::common::state::GameState;
use crate::common::tags::{self, cues};
use crate::common::tunables::Tunables;
use crate::plugins::audio::AudioCues;
use crate::plugins::camera::MainCamera;
use crate::plugins::director::wave::player_max_health;
use crate::plugins::enemies::catalog::{BEAM_HALF_WIDTH, BEAM_LENGTH};
use crate::plugins::enemies::{DefeatHooks, Enemy};
use crate::plugins::pooling::{Pooled, SpawnRequest};

use super::ability::{AbilityEffects, AbilityKind, AbilityWindow};
use super::components::{CameraShake, ItemBox, Player, PlayerDamage, PlayerInput, PlayerState};
use super::messages::{PlayerHit, WaveLevelUp};

pub const PLAYER_RADIUS: f32 = 0.25;
/// Multigun volley, degrees relative to the facing.
pub const MULTIGUN_SPREAD: [f32; 5] = [-21.0, -7.0, 0.0, 7.0, 21.0];
pub const HIT_SHAKE_DURATION: f32 = 0.5;
pub const HIT_SHAKE_PER_DAMAGE: f32 = 1.0 / 500.0;

pub fn spawn_player(
    mut commands: Commands,
    tunables: Res<Tunables>,
    mut input: ResMut<PlayerInput>,
    mut shake: ResMut<CameraShake>,
    mut item_box: ResMut<ItemBox>,
) {
    *input = PlayerInput::default();
    shake.stop();
    *item_box = ItemBox::default();

    let category = ActorCategory::Player;
    commands.spawn((
        Name::new("Player"),
        Player,
        PlayerState::new(
            tunables.player_initial_max_health,
            tunables.player_max_move_speed,
            tunables.player_shoot_cooldown,
        ),
        AbilityWindow::default(),
        category,
        Sprite::from_color(Color::srgb(0.2, 0.75, 0.9), Vec2::splat(PLAYER_RADIUS * 2.0)),
        Transform::from_xyz(0.0, 0.0, 1.0),
        Visibility::Visible,
        RigidBody::Kinematic,
        Collider::circle(PLAYER_RADIUS),
        category.active_layers(),
        CollisionEventsEnabled,
        DespawnOnExit(GameState::InGame),
    ));
}

/// Sample keyboard and mouse. Missing input resources (headless runs) leave
/// the previous sample untouched.
pub fn gather_input(
    keys: Option<Res<ButtonInput<KeyCode>>>,
    mouse: Option<Res<ButtonInput<MouseButton>>>,
    time: Res<Time<Virtual>>,
    q_window: Query<&Window, With<PrimaryWindow>>,
    q_camera: Query<(&Camera, &GlobalTransform), With<MainCamera>>,
    mut input: ResMut<PlayerInput>,
) {
    if time.is_paused() {
        return;
    }

    if let Some(keys) = keys {
        let pressed = |a: KeyCode, b: KeyCode| keys.pressed(a) || keys.pressed(b);
        let mut axis = Vec2::ZERO;
        if pressed(KeyCode::KeyW, KeyCode::ArrowUp) {
            axis.y += 1.0;
        }
        if pressed(KeyCode::KeyS, KeyCode::ArrowDown) {
            axis.y -= 1.0;
        }
        if pressed(KeyCode::KeyA, KeyCode::ArrowLeft) {
            axis.x -= 1.0;
        }
        if pressed(KeyCode::KeyD, KeyCode::ArrowRight) {
            axis.x += 1.0;
        }
        input.move_axis = axis;
    }

    if let Some(mouse) = mouse {
        input.fire = mouse.pressed(MouseButton::Left);
        if mouse.just_pressed(MouseButton::Right) {
            input.activate = true;
        }
    }

    let (Ok(window), Ok((camera, cam_tf))) = (q_window.single(), q_camera.single()) else {
        return;
    };
    input.aim = window
        .cursor_position()
        .and_then(|cursor| camera.viewport_to_world_2d(cam_tf, cursor).ok());
}

/// One fixed step of the player: aim, move, shoot, then the ability window.
#[allow(clippy::too_many_arguments)]
pub fn tick_player(
    time: Res<Time<Fixed>>,
    mut virtual_time: ResMut<Time<Virtual>>,
    mut input: ResMut<PlayerInput>,
    mut shake: ResMut<CameraShake>,
    mut audio: ResMut<AudioCues>,
    mut spawns: MessageWriter<SpawnRequest>,
    mut q: Query<(&mut PlayerState, &mut AbilityWindow, &mut Transform), With<Player>>,
) {
    let Ok((mut state, mut window, mut tf)) = q.single_mut() else {
        return;
    };
    if !state.alive {
        return;
    }
    let dt = time.delta_secs();
    let position = tf.translation.truncate();

    if let Some(aim) = input.aim {
        tf.rotation = Quat::from_rotation_z(look_angle(position, aim));
    }

    let displacement = if window.is_active(AbilityKind::Bullet) {
        let toward = input
            .aim
            .map_or(Vec2::ZERO, |aim| (aim - position).normalize_or_zero());
        state.dash(toward, dt)
    } else {
        state.steer(input.move_axis, dt, window.is_active(AbilityKind::SlowMotion))
    };
    tf.translation += displacement.extend(0.0);

    if state.try_fire(dt, input.fire, window.blocks_shooting()) {
        fire(
            &mut spawns,
            tf.translation.truncate(),
            z_angle(tf.rotation),
            window.is_active(AbilityKind::Multigun),
        );
        audio.play_or_warn(cues::SHOOT);
    }

    let mut time_scale = virtual_time.relative_speed();
    {
        let mut fx = AbilityEffects {
            player: &mut *state,
            time_scale: &mut time_scale,
            shake: &mut *shake,
        };
        if input.take_activate()
            && let Some(kind) = window.activate(&mut fx)
        {
            info!("activated {kind:?}");
        }
        if let Some(kind) = window.tick(dt, &mut fx) {
            debug!("{kind:?} window closed");
        }
    }
    if time_scale != virtual_time.relative_speed() {
        virtual_time.set_relative_speed(time_scale);
    }

    shake.tick(dt, time_scale);
    state.settle(dt);
}

fn fire(spawns: &mut MessageWriter<SpawnRequest>, position: Vec2, angle: f32, multigun: bool) {
    if !multigun {
        spawns.write(SpawnRequest::at(tags::PLAYER_BULLET, position, angle));
        return;
    }
    for offset in MULTIGUN_SPREAD {
        spawns.write(SpawnRequest::at(
            tags::PLAYER_BULLET,
            position,
            angle + offset.to_radians(),
        ));
    }
}

/// While the Laser window is open, everything in the beam goes down.
pub fn sweep_laser(
    q_player: Query<(&Transform, &AbilityWindow), (With<Player>, Without<Enemy>)>,
    mut q_enemies: Query<(&mut Enemy, &mut Pooled, &Transform)>,
    mut hooks: DefeatHooks,
) {
    let Ok((player_tf, window)) = q_player.single() else {
        return;
    };
    if !window.is_active(AbilityKind::Laser) {
        return;
    }
    let origin = player_tf.translation.truncate();
    let dir = heading(player_tf.rotation);

    for (mut enemy, mut pooled, tf) in &mut q_enemies {
        let position = tf.translation.truncate();
        if !pooled.active || !in_beam(origin, dir, BEAM_LENGTH, BEAM_HALF_WIDTH, position) {
            continue;
        }
        if enemy.defeat(&mut pooled) {
            let (tint, experience) = (enemy.core.tint, enemy.core.experience);
            hooks.defeated(position, tint, Some(experience));
        }
    }
}

/// Apply every `PlayerHit` produced this step.
pub fn apply_player_hits(
    mut hits: MessageReader<PlayerHit>,
    mut q: Query<
        (&mut PlayerState, &Transform, &mut Visibility, &mut CollisionLayers),
        With<Player>,
    >,
    mut shake: ResMut<CameraShake>,
    mut audio: ResMut<AudioCues>,
    mut spawns: MessageWriter<SpawnRequest>,
    next_state: Option<ResMut<NextState<GameState>>>,
) {
    let Ok((mut state, tf, mut visibility, mut layers)) = q.single_mut() else {
        hits.clear();
        return;
    };
    let position = tf.translation.truncate();
    let mut killed = false;

    for hit in hits.read() {
        if hit.stagger {
            state.reset_move_speed();
        }
        match state.take_damage(hit.damage, hit.impulse) {
            PlayerDamage::Ignored | PlayerDamage::Blocked => {}
            PlayerDamage::Hurt => {
                shake.start(HIT_SHAKE_DURATION, hit.damage as f32 * HIT_SHAKE_PER_DAMAGE);
                audio.play_or_warn(cues::HURT);
                spawns.write(SpawnRequest::at(tags::PLAYER_HIT_EFFECT, position, 0.0));
            }
            PlayerDamage::Killed => {
                shake.start(HIT_SHAKE_DURATION, hit.damage as f32 * HIT_SHAKE_PER_DAMAGE);
                killed = true;
            }
        }
    }

    if !killed {
        return;
    }
    info!("player destroyed");
    audio.play_or_warn(cues::DEATH);
    spawns.write(SpawnRequest::at(tags::DEATH_EFFECT, position, 0.0).with_tint(Color::WHITE));
    *visibility = Visibility::Hidden;
    *layers = ActorCategory::Player.inactive_layers();
    if let Some(mut next) = next_state {
        next.set(GameState::GameOver);
    }
}

/// Every wave level raises the player's max health and heals to full.
pub fn apply_level_ups(
    tunables: Res<Tunables>,
    mut level_ups: MessageReader<WaveLevelUp>,
    mut q: Query<&mut PlayerState, With<Player>>,
) {
    let Some(level) = level_ups.read().map(|l| l.level).max() else {
        return;
    };
    let Ok(mut state) = q.single_mut() else {
        return;
    };
    if !state.alive {
        return;
    }
    state.upgrade_max_health(player_max_health(tunables.player_initial_max_health, level));
    state.refill();
}

pub fn update_item_box(
    q: Query<&AbilityWindow, (With<Player>, Changed<AbilityWindow>)>,
    mut item_box: ResMut<ItemBox>,
) {
    let Ok(window) = q.single() else {
        return;
    };
    let next = ItemBox {
        held: window.held(),
        active: window.active(),
        fill: window.fill(),
    };
    if *item_box != next {
        *item_box = next;
    }
}
