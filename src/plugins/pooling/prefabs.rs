//! Archetype bundles for every `PrefabKind`.
//!
//! Everything is asset-free: plain sprites and circle colliders. Entities
//! are built parked (hidden, empty collision filters, `Pooled::active == false`).
//!
//! Bodies are dynamic sensors: gameplay code writes `Transform` directly and
//! physics only reports overlaps.

use avian2d::prelude::*;
use bevy::prelude::*;
use bevy_firefly::prelude::Occluder2d;

use crate::common::config::{PickupDurations, PoolEntry, PrefabKind};
use crate::common::layers::ActorCategory;
use crate::plugins::effects::Effect;
use crate::plugins::enemies::components::{ChaserGroup, Enemy};
use crate::plugins::enemies::catalog;
use crate::plugins::pickups::Pickup;
use crate::plugins::player::ability::AbilityKind;
use crate::plugins::projectiles::components::{EnemyBullet, PlayerBullet};

use super::components::Pooled;

/// Sprite size, collider radius and draw depth.
#[derive(Clone, Copy, Debug)]
struct Look {
    color: Color,
    size: f32,
    radius: f32,
    z: f32,
}

impl Look {
    fn new(color: Color, size: f32, z: f32) -> Self {
        Self {
            color,
            size,
            radius: size * 0.5,
            z,
        }
    }
}

const Z_ENEMY: f32 = 1.0;
const Z_PICKUP: f32 = 1.5;
const Z_BULLET: f32 = 2.0;
const Z_EFFECT: f32 = 3.0;

pub fn spawn_prefab(
    commands: &mut Commands,
    entry: &PoolEntry,
    index: usize,
    durations: &PickupDurations,
) -> Entity {
    let tag = entry.tag.as_str();
    match entry.prefab {
        PrefabKind::Turret => spawn_enemy(commands, tag, index, catalog::turret(), 0.6),
        PrefabKind::Spinner => spawn_enemy(commands, tag, index, catalog::spinner(), 0.6),
        PrefabKind::TripleSpinner => {
            spawn_enemy(commands, tag, index, catalog::triple_spinner(), 0.7)
        }
        PrefabKind::Star => spawn_enemy(commands, tag, index, catalog::star(), 0.8),
        PrefabKind::ChaserLarge => spawn_enemy(commands, tag, index, catalog::chaser_large(), 0.6),
        PrefabKind::ChaserGroupSmall => spawn_chaser_group(commands, tag, index),
        PrefabKind::Sniper => spawn_enemy(commands, tag, index, catalog::sniper(), 0.6),

        PrefabKind::PlayerBullet => spawn_bullet(
            commands,
            tag,
            index,
            ActorCategory::PlayerBullet,
            Look::new(Color::srgb(0.55, 0.95, 1.0), 0.16, Z_BULLET),
            PlayerBullet::default(),
        ),
        PrefabKind::EnemyBulletLime => enemy_bullet(commands, tag, index, EnemyBullet::lime(), 0.18),
        PrefabKind::EnemyBulletRed => enemy_bullet(commands, tag, index, EnemyBullet::red(), 0.16),
        PrefabKind::EnemyBulletOrange => {
            enemy_bullet(commands, tag, index, EnemyBullet::orange(), 0.2)
        }
        PrefabKind::EnemyBulletPurple => {
            enemy_bullet(commands, tag, index, EnemyBullet::purple(), 0.14)
        }
        PrefabKind::EnemyBulletPlasma => {
            enemy_bullet(commands, tag, index, EnemyBullet::plasma(), 0.32)
        }

        PrefabKind::PickupMedkit => spawn_pickup(commands, tag, index, AbilityKind::Medkit, durations),
        PrefabKind::PickupMultigun => {
            spawn_pickup(commands, tag, index, AbilityKind::Multigun, durations)
        }
        PrefabKind::PickupShield => spawn_pickup(commands, tag, index, AbilityKind::Shield, durations),
        PrefabKind::PickupSlowMotion => {
            spawn_pickup(commands, tag, index, AbilityKind::SlowMotion, durations)
        }
        PrefabKind::PickupBullet => spawn_pickup(commands, tag, index, AbilityKind::Bullet, durations),
        PrefabKind::PickupLaser => spawn_pickup(commands, tag, index, AbilityKind::Laser, durations),

        PrefabKind::DeathEffect => spawn_effect(commands, tag, index, Effect::death(), 0.6),
        PrefabKind::PlayerHitEffect => spawn_effect(commands, tag, index, Effect::player_hit(), 0.5),
    }
}

fn actor_bundle(tag: &str, index: usize, category: ActorCategory, look: Look) -> impl Bundle {
    (
        Name::new(format!("{tag} #{index}")),
        Pooled::new(tag),
        category,
        Sprite::from_color(look.color, Vec2::splat(look.size)),
        Transform::from_xyz(0.0, 0.0, look.z),
        Visibility::Hidden,
        RigidBody::Dynamic,
        GravityScale(0.0),
        LockedAxes::ROTATION_LOCKED,
        SleepingDisabled,
        Collider::circle(look.radius),
        Sensor,
        category.inactive_layers(),
        CollisionEventsEnabled,
    )
}

fn spawn_enemy(commands: &mut Commands, tag: &str, index: usize, enemy: Enemy, size: f32) -> Entity {
    let look = Look::new(enemy.core.tint, size, Z_ENEMY);
    commands
        .spawn((
            actor_bundle(tag, index, ActorCategory::Enemy, look),
            CollidingEntities::default(),
            Occluder2d::circle(look.radius),
            enemy,
        ))
        .id()
}

/// A bookkeeping group entity plus its members. Only the group occupies a
/// pool slot; members share the group's tag.
fn spawn_chaser_group(commands: &mut Commands, tag: &str, index: usize) -> Entity {
    let group = commands
        .spawn((
            Name::new(format!("{tag} #{index}")),
            Pooled::new(tag),
            Transform::default(),
        ))
        .id();

    let members = catalog::CHASER_GROUP_OFFSETS
        .iter()
        .enumerate()
        .map(|(i, &offset)| {
            let member = spawn_enemy(
                commands,
                tag,
                index * catalog::CHASER_GROUP_OFFSETS.len() + i,
                catalog::chaser_small(group),
                0.3,
            );
            (member, offset)
        })
        .collect();

    commands.entity(group).insert(ChaserGroup { members });
    group
}

fn spawn_bullet(
    commands: &mut Commands,
    tag: &str,
    index: usize,
    category: ActorCategory,
    look: Look,
    kind: impl Component,
) -> Entity {
    commands
        .spawn((actor_bundle(tag, index, category, look), kind))
        .id()
}

fn enemy_bullet(commands: &mut Commands, tag: &str, index: usize, bullet: EnemyBullet, size: f32) -> Entity {
    let look = Look::new(bullet.color, size, Z_BULLET);
    spawn_bullet(commands, tag, index, ActorCategory::EnemyBullet, look, bullet)
}

fn spawn_pickup(
    commands: &mut Commands,
    tag: &str,
    index: usize,
    kind: AbilityKind,
    durations: &PickupDurations,
) -> Entity {
    let look = Look::new(kind.color(), 0.4, Z_PICKUP);
    commands
        .spawn((
            actor_bundle(tag, index, ActorCategory::Pickup, look),
            Pickup::new(kind, durations.for_kind(kind)),
        ))
        .id()
}

/// Effects never collide: no body, no collider.
fn spawn_effect(commands: &mut Commands, tag: &str, index: usize, effect: Effect, size: f32) -> Entity {
    let category = ActorCategory::Effect;
    commands
        .spawn((
            Name::new(format!("{tag} #{index}")),
            Pooled::new(tag),
            category,
            Sprite::from_color(Color::WHITE, Vec2::splat(size)),
            Transform::from_xyz(0.0, 0.0, Z_EFFECT),
            Visibility::Hidden,
            category.inactive_layers(),
            effect,
        ))
        .id()
}
