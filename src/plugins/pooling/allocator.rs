//! Spawn consumer: hand out pooled entities for buffered requests.
//!
//! # Fail-fast invariants
//! - Every registry handle was built by `prefabs::spawn_prefab` and carries
//!   `Pooled` + `Transform`.
//! - Chaser group members are built alongside their group.
//!
//! Violations are bugs: we `expect()` and crash loudly. An unknown tag is
//! different. It is logged and the request is dropped.

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use avian2d::prelude::CollisionLayers;

use crate::common::config::GameConfig;
use crate::common::layers::ActorCategory;
use crate::common::rng::GameRng;
use crate::plugins::effects::Effect;
use crate::plugins::enemies::components::{ChaserGroup, Enemy};
use crate::plugins::pickups::Pickup;
use crate::plugins::projectiles::components::{EnemyBullet, PlayerBullet};

use super::components::Pooled;
use super::messages::{Placement, SpawnRequest};
use super::pool::{PooledEntity, SpawnContext};
use super::prefabs;
use super::registry::PoolRegistry;

type PooledActor<'a> = (
    &'a mut Pooled,
    &'a mut Transform,
    Option<&'a mut Enemy>,
    Option<&'a mut EnemyBullet>,
    Option<&'a mut PlayerBullet>,
    Option<&'a mut Pickup>,
    Option<&'a mut Effect>,
    Option<&'a ChaserGroup>,
);

/// Build every configured pool. Runs once; configuration errors abort startup.
pub fn init_pools(
    mut commands: Commands,
    config: Res<GameConfig>,
    mut registry: ResMut<PoolRegistry>,
) -> Result {
    let durations = config.pickup_durations.clone();
    registry.register(&config.pools, |entry, index| {
        prefabs::spawn_prefab(&mut commands, entry, index, &durations)
    })?;

    info!(
        "built {} object pools ({} entities)",
        registry.len(),
        config.pools.iter().map(|p| p.capacity as usize).sum::<usize>()
    );
    Ok(())
}

pub fn allocate_from_pools(
    mut reader: MessageReader<SpawnRequest>,
    mut registry: ResMut<PoolRegistry>,
    mut rng: ResMut<GameRng>,
    mut commands: Commands,
    mut q: Query<PooledActor>,
) {
    for req in reader.read() {
        let e = match registry.spawn(req.tag) {
            Ok(e) => e,
            Err(err) => {
                error!("dropping spawn request: {err}");
                continue;
            }
        };

        let mut ctx = SpawnContext {
            rng: &mut rng.0,
            shooter: req.shooter,
            tint: req.tint,
        };

        let group = {
            let (mut pooled, mut tf, enemy, enemy_bullet, player_bullet, pickup, effect, group) = q
                .get_mut(e)
                .expect("PoolRegistry handed out an entity missing pooled components");

            if pooled.active {
                debug!("pool \"{}\" is full, recycling {e}", req.tag);
            }
            pooled.active = true;
            apply_placement(&mut commands, e, &mut tf, req.placement);

            if let Some(mut enemy) = enemy {
                enemy.on_spawn(&mut ctx);
            }
            if let Some(mut bullet) = enemy_bullet {
                bullet.on_spawn(&mut ctx);
            }
            if let Some(mut bullet) = player_bullet {
                bullet.on_spawn(&mut ctx);
            }
            if let Some(mut pickup) = pickup {
                pickup.on_spawn(&mut ctx);
            }
            if let Some(mut effect) = effect {
                effect.on_spawn(&mut ctx);
            }

            group.map(|g| (tf.translation.truncate(), g.members.clone()))
        };

        // A group slot brings its whole formation back.
        let Some((origin, members)) = group else {
            continue;
        };
        for (member, offset) in members {
            let (mut pooled, mut tf, enemy, ..) = q
                .get_mut(member)
                .expect("ChaserGroup member is missing pooled components");
            pooled.active = true;
            tf.translation = (origin + offset).extend(tf.translation.z);
            tf.rotation = Quat::IDENTITY;
            if let Some(mut enemy) = enemy {
                enemy.on_spawn(&mut ctx);
            }
        }
    }
}

fn apply_placement(commands: &mut Commands, e: Entity, tf: &mut Transform, placement: Placement) {
    match placement {
        Placement::Keep => {}
        Placement::At { position, rotation } => {
            // A slot last spawned `Under` a parent would otherwise stay relative to it.
            commands.entity(e).remove::<ChildOf>();
            tf.translation = position.extend(tf.translation.z);
            tf.rotation = Quat::from_rotation_z(rotation);
        }
        Placement::Under { parent, position } => {
            tf.translation = position.extend(tf.translation.z);
            tf.rotation = Quat::IDENTITY;
            commands.entity(e).insert(ChildOf(parent));
        }
    }
}

/// Derive visibility and collision filters from `Pooled::active`.
pub fn sync_pooled_presentation(
    mut q: Query<
        (&Pooled, &ActorCategory, &mut Visibility, &mut CollisionLayers),
        Changed<Pooled>,
    >,
) {
    for (pooled, category, mut vis, mut layers) in &mut q {
        if pooled.active {
            *vis = Visibility::Visible;
            *layers = category.active_layers();
        } else {
            *vis = Visibility::Hidden;
            *layers = category.inactive_layers();
        }
    }
}

/// Park every pooled entity. Runs when a new run starts.
pub fn park_all(
    mut q: Query<(
        &mut Pooled,
        Option<&mut Enemy>,
        Option<&mut EnemyBullet>,
        Option<&mut PlayerBullet>,
        Option<&mut Pickup>,
        Option<&mut Effect>,
    )>,
) {
    for (mut pooled, enemy, enemy_bullet, player_bullet, pickup, effect) in &mut q {
        if let Some(mut a) = enemy {
            a.on_despawn();
        }
        if let Some(mut a) = enemy_bullet {
            a.on_despawn();
        }
        if let Some(mut a) = player_bullet {
            a.on_despawn();
        }
        if let Some(mut a) = pickup {
            a.on_despawn();
        }
        if let Some(mut a) = effect {
            a.on_despawn();
        }
        pooled.active = false;
    }
}
