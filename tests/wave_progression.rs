mod common;

use bevy::prelude::*;
use spaccanavi::common::state::GameState;
use spaccanavi::common::tags;
use spaccanavi::plugins::director::wave::player_max_health;
use spaccanavi::plugins::director::WaveDirector;
use spaccanavi::plugins::player::{Player, PlayerHit, PlayerState, WaveLevelUp};
use spaccanavi::plugins::pooling::{Pooled, SpawnRequest};

fn player_state(app: &mut App) -> Option<PlayerState> {
    let world = app.world_mut();
    let mut q = world.query_filtered::<&PlayerState, With<Player>>();
    q.iter(world).next().cloned()
}

#[test]
fn the_director_brings_in_enemies() {
    let mut app = common::app_stepping();

    // Level 1 spawns its first enemy within ten seconds.
    common::run_for(&mut app, 10.5);

    let spawned = common::active_in(&mut app, tags::SPINNER).len()
        + common::active_in(&mut app, tags::TURRET).len();
    assert!(spawned >= 1);
    let max = app.world().resource::<WaveDirector>().wave().max_concurrent as usize;
    assert!(spawned <= max);
}

#[test]
fn level_ups_heal_the_player() {
    let mut app = common::app_stepping();
    app.world_mut().write_message(PlayerHit {
        damage: 100,
        impulse: Vec2::ZERO,
        stagger: false,
    });
    app.update();
    let hurt = player_state(&mut app).unwrap();
    assert_eq!(hurt.health, hurt.max_health - 100);

    app.world_mut().write_message(WaveLevelUp { level: 2 });
    app.update();

    let healed = player_state(&mut app).unwrap();
    assert_eq!(healed.max_health, player_max_health(450, 2));
    assert_eq!(healed.health, healed.max_health);
}

#[test]
fn dying_ends_the_run_and_retrying_starts_fresh() {
    let mut app = common::app_stepping();
    app.world_mut()
        .write_message(SpawnRequest::at(tags::TURRET, Vec2::new(4.0, 0.0), 0.0));
    app.world_mut().write_message(PlayerHit {
        damage: 10_000,
        impulse: Vec2::ZERO,
        stagger: false,
    });
    for _ in 0..3 {
        app.update();
    }
    assert_eq!(
        *app.world().resource::<State<GameState>>().get(),
        GameState::GameOver
    );
    assert!(player_state(&mut app).is_none(), "the player leaves with the run");

    app.world_mut()
        .resource_mut::<NextState<GameState>>()
        .set(GameState::InGame);
    for _ in 0..2 {
        app.update();
    }

    let state = player_state(&mut app).expect("a new player");
    assert!(state.alive);
    assert_eq!(state.health, state.max_health);
    assert!(common::active_in(&mut app, tags::TURRET).is_empty());
    let world = app.world_mut();
    let mut pooled = world.query::<&Pooled>();
    assert!(pooled.iter(world).all(|p| !p.active));
    assert_eq!(world.resource::<WaveDirector>().wave().level, 1);
}
