use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::plugins::enemies::components::{DamageOutcome, Enemy};
use crate::plugins::enemies::defeat::DefeatHooks;
use crate::plugins::physics::contacts::{Contact, ContactPhase};
use crate::plugins::player::components::Player;
use crate::plugins::player::messages::PlayerHit;
use crate::plugins::pooling::Pooled;
use crate::plugins::pooling::pool::despawn;

use super::components::{EnemyBullet, PlayerBullet};

/// Enemy bullets shove enemies by `damage / ENEMY_PUSH_DIVISOR`.
pub const ENEMY_PUSH_DIVISOR: f32 = 30.0;

pub fn tick_enemy_bullets(
    time: Res<Time<Fixed>>,
    mut q: Query<(&mut EnemyBullet, &mut Pooled, &mut Transform)>,
) {
    let dt = time.delta_secs();
    for (mut bullet, mut pooled, mut tf) in &mut q {
        if pooled.active && bullet.tick(&mut tf, dt) {
            despawn(&mut *bullet, &mut pooled);
        }
    }
}

pub fn tick_player_bullets(
    time: Res<Time<Fixed>>,
    virtual_time: Res<Time<Virtual>>,
    mut q: Query<(&mut PlayerBullet, &mut Pooled, &mut Transform)>,
) {
    let dt = time.delta_secs();
    let scale = virtual_time.relative_speed();
    for (mut bullet, mut pooled, mut tf) in &mut q {
        if pooled.active && bullet.tick(&mut tf, dt, scale) {
            despawn(&mut *bullet, &mut pooled);
        }
    }
}

pub fn resolve_player_bullet_hits(
    mut contacts: MessageReader<Contact>,
    mut q_bullets: Query<(&mut PlayerBullet, &mut Pooled), Without<Enemy>>,
    mut q_enemies: Query<(&mut Enemy, &mut Pooled, &Transform), Without<PlayerBullet>>,
    mut hooks: DefeatHooks,
) {
    for c in contacts.read() {
        if c.phase != ContactPhase::Enter {
            continue;
        }
        let Some((bullet_e, enemy_e, _)) = c.split(|e| q_bullets.contains(e)) else {
            continue;
        };
        let Ok((mut bullet, mut bullet_pooled)) = q_bullets.get_mut(bullet_e) else {
            continue;
        };
        // A bullet hits one enemy, even when it overlaps several this step.
        if !bullet_pooled.active {
            continue;
        }
        let Ok((mut enemy, mut enemy_pooled, tf)) = q_enemies.get_mut(enemy_e) else {
            continue;
        };
        if !enemy_pooled.active {
            continue;
        }

        let damage = bullet.damage;
        despawn(&mut *bullet, &mut bullet_pooled);

        if let DamageOutcome::Defeated { experience, tint } =
            enemy.take_damage(&mut enemy_pooled, damage, Vec2::ZERO)
        {
            hooks.defeated(tf.translation.truncate(), tint, Some(experience));
        }
    }
}

pub fn resolve_enemy_bullet_hits(
    mut contacts: MessageReader<Contact>,
    mut q_bullets: Query<(&mut EnemyBullet, &mut Pooled), Without<Enemy>>,
    q_player: Query<(), With<Player>>,
    mut q_enemies: Query<(&mut Enemy, &Pooled), Without<EnemyBullet>>,
    mut hits: MessageWriter<PlayerHit>,
) {
    for c in contacts.read() {
        if c.phase != ContactPhase::Enter {
            continue;
        }
        let Some((bullet_e, other, normal)) = c.split(|e| q_bullets.contains(e)) else {
            continue;
        };
        let Ok((mut bullet, mut pooled)) = q_bullets.get_mut(bullet_e) else {
            continue;
        };
        if !pooled.active {
            continue;
        }

        // `normal` points from `other` toward the bullet.
        if q_player.contains(other) {
            let impulse = if bullet.applies_force { -normal } else { Vec2::ZERO };
            hits.write(PlayerHit {
                damage: bullet.damage,
                impulse,
                stagger: false,
            });
            despawn(&mut *bullet, &mut pooled);
            continue;
        }

        if bullet.is_shooter(other) {
            continue;
        }
        if let Ok((mut enemy, enemy_pooled)) = q_enemies.get_mut(other)
            && enemy_pooled.active
        {
            enemy.apply_force(-normal * bullet.damage as f32 / ENEMY_PUSH_DIVISOR);
            despawn(&mut *bullet, &mut pooled);
        }
    }
}
