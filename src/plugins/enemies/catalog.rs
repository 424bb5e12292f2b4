//! Per-kind stats and fire patterns.

use std::f32::consts::PI;

use bevy::prelude::*;

use crate::common::tags;

use super::components::{
    Chaser, EnemyBehavior, EnemyCore, EnemyKind, Enemy, Gunner, Muzzle, Sniper, Spinner, Volley,
};
use super::fire::{BeamSequence, FirePattern, FireSequence, Pause};

pub const LIFETIME: f32 = 30.0;
pub const MUZZLE: f32 = 0.4;

/// Member offsets of a small chaser formation, relative to the group.
pub const CHASER_GROUP_OFFSETS: [Vec2; 5] = [
    Vec2::new(0.0, 0.0),
    Vec2::new(0.5, 0.5),
    Vec2::new(0.5, -0.5),
    Vec2::new(-0.5, 0.5),
    Vec2::new(-0.5, -0.5),
];

pub fn tint(kind: EnemyKind) -> Color {
    match kind {
        EnemyKind::Turret => Color::srgb(0.024, 0.839, 0.627),
        EnemyKind::Spinner => Color::srgb(0.937, 0.278, 0.435),
        EnemyKind::TripleSpinner => Color::srgb(0.973, 0.408, 0.243),
        EnemyKind::Star => Color::srgb(0.871, 0.243, 0.922),
        EnemyKind::ChaserSmall | EnemyKind::ChaserLarge => Color::srgb(1.0, 0.820, 0.4),
        EnemyKind::Sniper => Color::srgb(0.196, 0.741, 0.941),
    }
}

fn base(kind: EnemyKind, max_health: i32, contact_damage: i32, experience: u32) -> EnemyCore {
    EnemyCore::new(kind, max_health, contact_damage, experience, tint(kind))
}

fn ring(count: usize) -> Vec<Muzzle> {
    (0..count)
        .map(|i| {
            let angle = i as f32 * 2.0 * PI / count as f32;
            Muzzle::new(Vec2::from_angle(angle) * MUZZLE, angle)
        })
        .collect()
}

fn repeat(interval: f32) -> FireSequence {
    FireSequence::new(FirePattern::Repeat { interval })
}

fn forward() -> Vec<Muzzle> {
    vec![Muzzle::new(Vec2::new(MUZZLE, 0.0), 0.0)]
}

pub fn turret() -> Enemy {
    Enemy::new(
        base(EnemyKind::Turret, 30, 10, 10).with_lifetime(LIFETIME),
        EnemyBehavior::Turret(Gunner {
            fire: repeat(0.1),
            muzzles: forward(),
            volley: Volley::All,
            bullet: tags::ENEMY_BULLET_LIME,
        }),
    )
}

fn spinning(kind: EnemyKind, gun: Gunner, stalk_speed: f32, max_health: i32, experience: u32) -> Enemy {
    Enemy::new(
        base(kind, max_health, 10, experience).with_lifetime(LIFETIME),
        EnemyBehavior::Spinner(Spinner {
            gun,
            spin_speed: 100.0,
            spin_dir: 1.0,
            drift: Vec2::ZERO,
            stalk_speed,
        }),
    )
}

pub fn spinner() -> Enemy {
    let gun = Gunner {
        fire: repeat(0.1),
        muzzles: ring(2),
        volley: Volley::All,
        bullet: tags::ENEMY_BULLET_RED,
    };
    spinning(EnemyKind::Spinner, gun, 0.0, 40, 10)
}

pub fn triple_spinner() -> Enemy {
    let gun = Gunner {
        fire: repeat(0.1),
        muzzles: ring(3),
        volley: Volley::Cycle,
        bullet: tags::ENEMY_BULLET_ORANGE,
    };
    spinning(EnemyKind::TripleSpinner, gun, 0.0, 60, 20)
}

pub fn star() -> Enemy {
    let gun = Gunner {
        fire: FireSequence::new(FirePattern::Burst {
            pause: Pause::Fixed(0.25),
            shots: 3,
            interval: 0.1,
        }),
        muzzles: ring(4),
        volley: Volley::All,
        bullet: tags::ENEMY_BULLET_PURPLE,
    };
    spinning(EnemyKind::Star, gun, 2.0, 80, 30)
}

fn chaser(core: EnemyCore, gun: Option<Gunner>, group: Option<Entity>) -> Enemy {
    Enemy::new(
        core,
        EnemyBehavior::Chaser(Chaser {
            gun,
            speed: 10.0,
            chasing_dir: Vec2::ZERO,
            group,
        }),
    )
}

pub fn chaser_small(group: Entity) -> Enemy {
    let core = base(EnemyKind::ChaserSmall, 10, 20, 5).with_cull_distance(25.0);
    chaser(core, None, Some(group))
}

pub fn chaser_large() -> Enemy {
    let gun = Gunner {
        fire: FireSequence::new(FirePattern::Burst {
            pause: Pause::Between(3.0, 5.0),
            shots: 3,
            interval: 0.25,
        }),
        muzzles: forward(),
        volley: Volley::All,
        bullet: tags::ENEMY_BULLET_PLASMA,
    };
    let core = base(EnemyKind::ChaserLarge, 60, 40, 25).with_cull_distance(25.0);
    chaser(core, Some(gun), None)
}

pub fn sniper() -> Enemy {
    Enemy::new(
        base(EnemyKind::Sniper, 50, 10, 40),
        EnemyBehavior::Sniper(Sniper {
            beam: BeamSequence::new(5.0, 2.0),
            beam_damage: 450,
            turn_rate: 300.0,
        }),
    )
}

/// Beam geometry shared by the sniper and the player's laser.
pub const BEAM_LENGTH: f32 = 40.0;
pub const BEAM_HALF_WIDTH: f32 = 0.3;
