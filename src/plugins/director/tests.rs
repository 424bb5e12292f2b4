use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use crate::common::config::{PoolEntry, PrefabKind};
use crate::common::tags;
use crate::common::test_utils::{gameplay_world, run_system_once, spawn_requests};
use crate::common::tunables::Tunables;
use crate::plugins::player::ability::AbilityKind;
use crate::plugins::player::components::Player;
use crate::plugins::pooling::{Placement, PoolRegistry, Pooled};

use super::wave::{self, WaveDirector, WaveState};
use super::{active_enemies, tick_director};

#[test]
fn level_up_wraps_experience_and_scales_the_wave() {
    let mut state = WaveState::default();
    assert_eq!(state.add_experience(99), None);
    assert_eq!(state.add_experience(2), Some(2));

    assert_eq!(state.experience, 0, "overflow is discarded");
    assert_eq!(state.experience_to_next, 125);
    assert_eq!(state.max_concurrent, 8);

    assert_eq!(state.add_experience(125), Some(3));
    assert_eq!(state.experience_to_next, 156);
    assert_eq!(state.max_concurrent, 12);
}

#[test]
fn level_is_capped() {
    let mut state = WaveState {
        level: wave::MAX_LEVEL,
        ..default()
    };
    assert_eq!(state.add_experience(1000), Some(wave::MAX_LEVEL));
    assert_eq!(state.level, wave::MAX_LEVEL);
}

#[test]
fn player_health_grows_with_the_wave() {
    assert_eq!(wave::player_max_health(450, 1), 450);
    assert_eq!(wave::player_max_health(450, 2), 470);
    assert_eq!(wave::player_max_health(450, 20), 830);
}

#[test]
fn spawn_interval_shrinks_to_one_second() {
    assert_eq!(wave::enemy_interval_bounds(1), (5.0, 10.0));
    assert_eq!(wave::enemy_interval_bounds(4), (1.25, 2.5));
    assert_eq!(wave::enemy_interval_bounds(10), (1.0, 1.0));
    assert_eq!(wave::enemy_interval_bounds(20), (1.0, 1.0));
}

#[test]
fn enemies_unlock_with_levels() {
    let mut director = WaveDirector::default();
    assert_eq!(director.unlocked(), &[tags::SPINNER, tags::TURRET]);

    director.on_enemy_defeated(100);
    assert!(director.unlocked().contains(&tags::TRIPLE_SPINNER));
    assert!(director.unlocked().contains(&tags::CHASER_GROUP_SMALL));

    director.on_enemy_defeated(125);
    assert!(!director.unlocked().contains(&tags::STAR));
    director.on_enemy_defeated(156);
    director.on_enemy_defeated(195);
    assert_eq!(director.wave().level, 5);
    for tag in [tags::CHASER_LARGE, tags::STAR, tags::SNIPER] {
        assert!(director.unlocked().contains(&tag), "{tag} locked");
    }
    assert_eq!(director.unlocked().len(), 7);
}

#[test]
fn cadence_respects_the_first_interval() {
    let mut director = WaveDirector::default();
    let mut rng = ChaCha8Rng::seed_from_u64(5);

    // Level 1 waits at least 5 s for enemies and 3 s for items.
    for _ in 0..11 {
        let cadence = director.step(0.25, &mut rng);
        assert!(!cadence.enemy && !cadence.item);
    }

    let mut enemies = 0;
    let mut items = 0;
    // Up to the 10 s mark.
    for _ in 0..29 {
        let cadence = director.step(0.25, &mut rng);
        enemies += cadence.enemy as u32;
        items += cadence.item as u32;
    }
    assert_eq!(enemies, 1, "next enemy interval is at least 5 s");
    assert!(items >= 1);
}

#[test]
fn offscreen_points_land_in_the_margin() {
    let mut rng = ChaCha8Rng::seed_from_u64(9);
    let center = Vec2::new(3.0, -2.0);
    let half = Vec2::new(10.0, 5.0);
    for _ in 0..500 {
        let p = (wave::offscreen_point(center, half, &mut rng) - center) / half;
        assert!(p.x.abs() <= 1.2 + 1e-5 && p.y.abs() <= 1.2 + 1e-5);
        assert!(p.x.abs() >= 1.1 - 1e-5 || p.y.abs() >= 1.1 - 1e-5, "{p} is on screen");
    }
}

#[test]
fn items_cover_every_ability() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let drawn: Vec<&str> = (0..200).map(|_| WaveDirector::pick_item(&mut rng)).collect();
    for kind in AbilityKind::ALL {
        assert!(drawn.contains(&kind.tag()), "{} never dropped", kind.tag());
    }
}

// --- tick_director -----------------------------------------------------------

/// Registers pools whose first `active` members are in play.
fn director_world(pools: &[(&str, u32, u32)]) -> World {
    let mut world = gameplay_world(0.5);
    world.insert_resource(Tunables::default());
    world.spawn((Player, Transform::default()));

    let mut pool_entries = Vec::new();
    for (tag, capacity, _) in pools {
        pool_entries.push(PoolEntry {
            tag: tag.to_string(),
            prefab: PrefabKind::Turret,
            capacity: *capacity,
        });
    }
    for kind in AbilityKind::ALL {
        pool_entries.push(PoolEntry {
            tag: kind.tag().to_string(),
            prefab: PrefabKind::PickupShield,
            capacity: 1,
        });
    }

    let mut registry = PoolRegistry::default();
    registry
        .register(&pool_entries, |entry, index| {
            let active = pools
                .iter()
                .find(|(tag, _, _)| *tag == entry.tag)
                .is_some_and(|(_, _, active)| (index as u32) < *active);
            world
                .spawn(Pooled {
                    tag: entry.tag.clone(),
                    active,
                })
                .id()
        })
        .unwrap();
    world.insert_resource(registry);
    world
}

fn is_enemy(tag: &str) -> bool {
    [tags::SPINNER, tags::TURRET].contains(&tag)
}

#[test]
fn spawns_wave_enemies_off_screen() {
    let mut world = director_world(&[(tags::SPINNER, 2, 0), (tags::TURRET, 2, 0)]);

    let mut requests = Vec::new();
    for _ in 0..21 {
        run_system_once(&mut world, tick_director);
        requests.extend(spawn_requests(&mut world));
    }

    let enemies: Vec<_> = requests.iter().filter(|r| is_enemy(r.tag)).collect();
    assert!(!enemies.is_empty());
    let half = Tunables::default().view_half_extents();
    for r in enemies {
        let Placement::At { position, .. } = r.placement else {
            panic!("wave enemies are placed in the world");
        };
        let p = position / half;
        assert!(p.x.abs() >= 1.1 - 1e-5 || p.y.abs() >= 1.1 - 1e-5);
    }
}

#[test]
fn full_waves_admit_no_new_enemies() {
    let mut world = director_world(&[(tags::SPINNER, 5, 0), (tags::TURRET, 5, 5)]);

    for _ in 0..21 {
        run_system_once(&mut world, tick_director);
        assert!(
            !spawn_requests(&mut world).iter().any(|r| is_enemy(r.tag)),
            "five turrets already fill the wave"
        );
    }
}

#[test]
fn top_ups_bypass_admission() {
    let mut world = director_world(&[(tags::SPINNER, 1, 0), (tags::TURRET, 6, 5)]);
    world.resource_mut::<WaveDirector>().request_top_up();

    run_system_once(&mut world, tick_director);

    let requests = spawn_requests(&mut world);
    assert_eq!(requests.len(), 1);
    assert!(is_enemy(requests[0].tag));
    assert_eq!(world.resource::<WaveDirector>().pending_top_ups(), 0);
}

#[test]
fn counts_only_unlocked_pools() {
    let world = director_world(&[
        (tags::SPINNER, 2, 1),
        (tags::TURRET, 2, 2),
        (tags::SNIPER, 2, 2),
    ]);
    let registry = world.resource::<PoolRegistry>();
    let director = world.resource::<WaveDirector>();

    let count = active_enemies(director, registry, |e| {
        world.get::<Pooled>(e).is_some_and(Pooled::is_active)
    });

    assert_eq!(count, 3);
}

#[test]
fn one_free_slot_admits_one_request_per_step() {
    let mut world = director_world(&[(tags::SPINNER, 2, 1), (tags::TURRET, 3, 2)]);
    for _ in 0..4 {
        world.resource_mut::<WaveDirector>().request_top_up();
    }

    run_system_once(&mut world, tick_director);

    let requests = spawn_requests(&mut world);
    let count = |tag: &str| requests.iter().filter(|r| r.tag == tag).count();
    assert!(count(tags::SPINNER) <= 1, "spinner pool has one free slot");
    assert!(count(tags::TURRET) <= 1, "turret pool has one free slot");
    assert!(!requests.is_empty());
}
