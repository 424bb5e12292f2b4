use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use crate::common::math::in_beam;
use crate::common::rng::GameRng;
use crate::plugins::physics::contacts::{Contact, ContactPhase};
use crate::plugins::player::ability::{AbilityKind, AbilityWindow};
use crate::plugins::player::components::Player;
use crate::plugins::player::messages::PlayerHit;
use crate::plugins::pooling::pool::despawn;
use crate::plugins::pooling::{Pooled, SpawnRequest};

use super::catalog::{BEAM_HALF_WIDTH, BEAM_LENGTH};
use super::components::{ChaserGroup, Enemy, EnemyFire, TickOutcome};
use super::defeat::DefeatHooks;

/// Chaser contact pushes other enemies by `contact_damage / PUSH_DIVISOR`.
pub const PUSH_DIVISOR: f32 = 10.0;

pub fn tick_enemies(
    time: Res<Time<Fixed>>,
    mut rng: ResMut<GameRng>,
    q_player: Query<&Transform, (With<Player>, Without<Enemy>)>,
    mut q: Query<(Entity, &mut Enemy, &mut Pooled, &mut Transform)>,
    mut hits: MessageWriter<PlayerHit>,
    mut hooks: DefeatHooks,
    mut fire: Local<Vec<EnemyFire>>,
) {
    let Ok(player_tf) = q_player.single() else {
        return;
    };
    let player = player_tf.translation.truncate();
    let dt = time.delta_secs();

    for (e, mut enemy, mut pooled, mut tf) in &mut q {
        if !pooled.active {
            continue;
        }

        fire.clear();
        let outcome = enemy.tick(&mut tf, player, dt, &mut rng.0, &mut fire);

        for shot in fire.drain(..) {
            match shot {
                EnemyFire::Bullet { tag, position, angle } => {
                    hooks
                        .spawns
                        .write(SpawnRequest::at(tag, position, angle).with_shooter(e));
                }
                EnemyFire::Beam { origin, direction, damage } => {
                    if in_beam(origin, direction, BEAM_LENGTH, BEAM_HALF_WIDTH, player) {
                        hits.write(PlayerHit {
                            damage,
                            impulse: Vec2::ZERO,
                            stagger: false,
                        });
                    }
                }
            }
        }

        match outcome {
            TickOutcome::Alive => {}
            TickOutcome::Culled => {
                despawn(&mut *enemy, &mut pooled);
                if enemy.tops_up_wave_when_culled() {
                    hooks.director.request_top_up();
                }
            }
            TickOutcome::Expired => {
                if enemy.defeat(&mut pooled) {
                    hooks.defeated(tf.translation.truncate(), enemy.core.tint, None);
                }
            }
        }
    }
}

/// A formation leaves play once none of its members is left.
pub fn retire_empty_groups(
    mut q_groups: Query<(Entity, &ChaserGroup, &mut Pooled), Without<Enemy>>,
    q_members: Query<&Pooled, With<Enemy>>,
) {
    for (e, group, mut pooled) in &mut q_groups {
        if !pooled.active {
            continue;
        }
        let any_left = group
            .members
            .iter()
            .any(|(member, _)| q_members.get(*member).is_ok_and(|p| p.active));
        if !any_left {
            debug!("chaser group {e} emptied");
            pooled.active = false;
        }
    }
}

/// Sustained enemy contact: damage the player, let chasers ram and shove.
pub fn resolve_enemy_contacts(
    mut contacts: MessageReader<Contact>,
    q_player: Query<&AbilityWindow, With<Player>>,
    mut q_enemies: Query<(&mut Enemy, &mut Pooled, &Transform)>,
    mut hits: MessageWriter<PlayerHit>,
    mut hooks: DefeatHooks,
) {
    for c in contacts.read() {
        if c.phase != ContactPhase::Stay {
            continue;
        }

        if let Ok(window) = q_player.get(c.other) {
            let Ok((mut enemy, mut pooled, tf)) = q_enemies.get_mut(c.entity) else {
                continue;
            };
            if !pooled.active {
                continue;
            }
            let position = tf.translation.truncate();

            // Flying as a bullet: enemies in the way go down and pay out.
            if window.is_active(AbilityKind::Bullet) {
                if enemy.defeat(&mut pooled) {
                    let exp = enemy.core.experience;
                    hooks.defeated(position, enemy.core.tint, Some(exp));
                }
                continue;
            }

            hits.write(PlayerHit {
                damage: enemy.core.contact_damage,
                impulse: -c.normal,
                stagger: true,
            });
            if enemy.is_chaser() && enemy.defeat(&mut pooled) {
                hooks.defeated(position, enemy.core.tint, None);
            }
            continue;
        }

        let push = match q_enemies.get(c.entity) {
            Ok((enemy, pooled, _)) if pooled.active && enemy.is_chaser() => {
                enemy.core.contact_damage as f32 / PUSH_DIVISOR
            }
            _ => continue,
        };
        if let Ok((mut other, other_pooled, _)) = q_enemies.get_mut(c.other)
            && other_pooled.active
        {
            other.apply_force(-c.normal * push);
        }
    }
}

/// Snipers glow red while charging.
pub fn show_beam_charge(mut q: Query<(&Enemy, &Pooled, &mut Sprite)>) {
    for (enemy, pooled, mut sprite) in &mut q {
        if !pooled.active {
            continue;
        }
        let charge = enemy.beam_charge();
        if charge <= 0.0 && sprite.color == enemy.core.tint {
            continue;
        }
        sprite.color = enemy.core.tint.mix(&Color::srgb(1.0, 0.15, 0.1), charge);
    }
}
