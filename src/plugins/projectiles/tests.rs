use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::tags;
use crate::common::test_utils::{gameplay_world, player_hits, run_system_once, spawn_requests};
use crate::plugins::director::wave::WaveDirector;
use crate::plugins::enemies::catalog;
use crate::plugins::enemies::components::Enemy;
use crate::plugins::physics::contacts::{Contact, ContactPhase};
use crate::plugins::player::components::Player;
use crate::plugins::pooling::{Pooled, PooledEntity, SpawnContext};

use super::components::{BULLET_LIFETIME, EnemyBullet, PlayerBullet};
use super::systems;

fn spawn_ctx<T: PooledEntity>(actor: &mut T, shooter: Option<Entity>) {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    actor.on_spawn(&mut SpawnContext {
        rng: &mut rng,
        shooter,
        tint: None,
    });
}

fn active(tag: &str) -> Pooled {
    Pooled {
        tag: tag.to_string(),
        active: true,
    }
}

fn enter(world: &mut World, entity: Entity, other: Entity, normal: Vec2) {
    world.write_message(Contact::new(entity, other, normal, ContactPhase::Enter));
}

fn live_enemy(world: &mut World, mut enemy: Enemy, tag: &str, at: Vec2) -> Entity {
    spawn_ctx(&mut enemy, None);
    world
        .spawn((active(tag), Transform::from_translation(at.extend(0.0)), enemy))
        .id()
}

fn live_player_bullet(world: &mut World) -> Entity {
    let mut bullet = PlayerBullet::default();
    spawn_ctx(&mut bullet, None);
    world
        .spawn((active(tags::PLAYER_BULLET), Transform::default(), bullet))
        .id()
}

fn live_enemy_bullet(world: &mut World, mut bullet: EnemyBullet, shooter: Option<Entity>) -> Entity {
    spawn_ctx(&mut bullet, shooter);
    world
        .spawn((active(tags::ENEMY_BULLET_LIME), Transform::default(), bullet))
        .id()
}

#[test]
fn player_bullets_fly_along_their_facing() {
    let mut bullet = PlayerBullet::default();
    spawn_ctx(&mut bullet, None);
    let mut tf = Transform::from_rotation(Quat::from_rotation_z(std::f32::consts::FRAC_PI_2));

    bullet.tick(&mut tf, 0.5, 1.0);

    assert!((tf.translation.truncate() - Vec2::new(0.0, 4.0)).length() < 1e-4);
}

#[test]
fn player_bullets_double_speed_in_slow_motion_only() {
    let mut bullet = PlayerBullet::default();
    spawn_ctx(&mut bullet, None);

    let mut slow = Transform::default();
    bullet.tick(&mut slow, 0.5, 0.5);
    assert_eq!(slow.translation.x, 8.0);

    let mut other = Transform::default();
    bullet.tick(&mut other, 0.5, 0.25);
    assert_eq!(other.translation.x, 4.0, "only exactly half speed doubles");
}

#[test]
fn bullet_lifetime_expires() {
    let mut bullet = PlayerBullet::default();
    spawn_ctx(&mut bullet, None);
    let mut tf = Transform::default();

    let steps = (BULLET_LIFETIME / 0.5) as usize;
    for _ in 0..steps - 1 {
        assert!(!bullet.tick(&mut tf, 0.5, 1.0));
    }
    assert!(bullet.tick(&mut tf, 0.5, 1.0));
}

#[test]
fn parked_bullets_never_expire() {
    let mut bullet = EnemyBullet::lime();
    let mut tf = Transform::default();
    for _ in 0..20 {
        assert!(!bullet.tick(&mut tf, 0.5));
    }
}

#[test]
fn plasma_slows_down_to_its_target_speed() {
    let mut bullet = EnemyBullet::plasma();
    spawn_ctx(&mut bullet, None);
    let mut tf = Transform::default();

    for _ in 0..8 {
        bullet.tick(&mut tf, 0.5);
    }

    assert_eq!(bullet.current_speed(), 3.0);

    spawn_ctx(&mut bullet, None);
    assert_eq!(bullet.current_speed(), 8.0, "respawn restores the launch speed");
}

#[test]
fn tick_system_parks_expired_bullets() {
    let mut world = gameplay_world(0.5);
    let bullet = live_player_bullet(&mut world);

    for _ in 0..6 {
        run_system_once(&mut world, systems::tick_player_bullets);
    }

    assert!(!world.get::<Pooled>(bullet).unwrap().active);
}

#[test]
fn player_bullet_damages_then_defeats_for_experience() {
    let mut world = gameplay_world(0.125);
    // chaser_small has 10 health, bullets deal 5.
    let enemy = live_enemy(
        &mut world,
        catalog::chaser_small(Entity::PLACEHOLDER),
        tags::CHASER_GROUP_SMALL,
        Vec2::new(2.0, 1.0),
    );

    let first = live_player_bullet(&mut world);
    enter(&mut world, enemy, first, Vec2::X);
    run_system_once(&mut world, systems::resolve_player_bullet_hits);

    assert!(!world.get::<Pooled>(first).unwrap().active);
    assert_eq!(world.get::<Enemy>(enemy).unwrap().core.health, 5);
    assert!(spawn_requests(&mut world).is_empty());

    let second = live_player_bullet(&mut world);
    enter(&mut world, second, enemy, -Vec2::X);
    run_system_once(&mut world, systems::resolve_player_bullet_hits);

    assert!(!world.get::<Pooled>(enemy).unwrap().active);
    assert_eq!(world.resource::<WaveDirector>().wave().experience, 5);
    let requests = spawn_requests(&mut world);
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].tag, tags::DEATH_EFFECT);
    assert!(requests[0].tint.is_some());
}

#[test]
fn a_bullet_hits_only_one_enemy() {
    let mut world = gameplay_world(0.125);
    let a = live_enemy(&mut world, catalog::turret(), tags::TURRET, Vec2::ZERO);
    let b = live_enemy(&mut world, catalog::turret(), tags::TURRET, Vec2::X);
    let bullet = live_player_bullet(&mut world);
    enter(&mut world, bullet, a, Vec2::X);
    enter(&mut world, bullet, b, -Vec2::X);

    run_system_once(&mut world, systems::resolve_player_bullet_hits);

    let health = |world: &World, e| world.get::<Enemy>(e).unwrap().core.health;
    assert_eq!(health(&world, a), 25);
    assert_eq!(health(&world, b), 30);
}

#[test]
fn repeated_defeat_awards_experience_once() {
    let mut world = gameplay_world(0.125);
    let enemy = live_enemy(
        &mut world,
        catalog::chaser_small(Entity::PLACEHOLDER),
        tags::CHASER_GROUP_SMALL,
        Vec2::ZERO,
    );
    world.get_mut::<Enemy>(enemy).unwrap().core.health = 5;
    for _ in 0..3 {
        let bullet = live_player_bullet(&mut world);
        enter(&mut world, bullet, enemy, Vec2::X);
    }

    run_system_once(&mut world, systems::resolve_player_bullet_hits);

    assert_eq!(world.resource::<WaveDirector>().wave().experience, 5);
    assert_eq!(spawn_requests(&mut world).len(), 1);
}

#[test]
fn enemy_bullets_hurt_the_player() {
    let mut world = gameplay_world(0.125);
    let player = world.spawn((Player, Transform::default())).id();
    let lime = live_enemy_bullet(&mut world, EnemyBullet::lime(), None);
    let plasma = live_enemy_bullet(&mut world, EnemyBullet::plasma(), None);
    // normals point from the player toward each bullet.
    enter(&mut world, lime, player, Vec2::Y);
    enter(&mut world, player, plasma, Vec2::X);

    run_system_once(&mut world, systems::resolve_enemy_bullet_hits);

    let hits = player_hits(&mut world);
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].damage, 5);
    assert_eq!(hits[0].impulse, Vec2::ZERO);
    assert_eq!(hits[1].damage, 40);
    // From the bullet toward the player.
    assert_eq!(hits[1].impulse, Vec2::X);
    assert!(!world.get::<Pooled>(lime).unwrap().active);
    assert!(!world.get::<Pooled>(plasma).unwrap().active);
}

#[test]
fn enemy_bullets_pass_through_their_shooter_and_shove_others() {
    let mut world = gameplay_world(0.125);
    let shooter = live_enemy(&mut world, catalog::turret(), tags::TURRET, Vec2::ZERO);
    let other = live_enemy(&mut world, catalog::turret(), tags::TURRET, Vec2::X);
    let bullet = live_enemy_bullet(&mut world, EnemyBullet::plasma(), Some(shooter));

    enter(&mut world, bullet, shooter, Vec2::X);
    run_system_once(&mut world, systems::resolve_enemy_bullet_hits);
    assert!(world.get::<Pooled>(bullet).unwrap().active);
    assert_eq!(world.get::<Enemy>(shooter).unwrap().core.force, Vec2::ZERO);

    // normal from `other` toward the bullet.
    enter(&mut world, bullet, other, -Vec2::X);
    run_system_once(&mut world, systems::resolve_enemy_bullet_hits);

    assert!(!world.get::<Pooled>(bullet).unwrap().active);
    let force = world.get::<Enemy>(other).unwrap().core.force;
    assert!((force - Vec2::new(40.0 / 30.0, 0.0)).length() < 1e-6);
    assert_eq!(world.get::<Enemy>(other).unwrap().core.health, 30, "no damage");
}
