mod common;

use bevy::prelude::*;
use spaccanavi::common::tags;
use spaccanavi::plugins::pooling::{PoolRegistry, Pooled, SpawnRequest};

#[test]
fn spawn_requests_activate_pooled_entities_in_place() {
    let mut app = common::app_stepping();

    app.world_mut()
        .write_message(SpawnRequest::at(tags::TURRET, Vec2::new(3.0, -2.0), 0.0));
    app.update();

    let active = common::active_in(&mut app, tags::TURRET);
    assert_eq!(active.len(), 1);

    let world = app.world();
    let e = active[0];
    let tf = world.get::<Transform>(e).unwrap();
    assert_eq!(tf.translation.truncate(), Vec2::new(3.0, -2.0));
    assert_eq!(world.get::<Visibility>(e), Some(&Visibility::Visible));
    assert_eq!(world.resource::<PoolRegistry>().pool(tags::TURRET).unwrap().cursor(), 1);
}

#[test]
fn full_pools_recycle_the_oldest_slot() {
    let mut app = common::app_stepping();
    let capacity = app
        .world()
        .resource::<PoolRegistry>()
        .capacity(tags::TURRET)
        .unwrap();

    for i in 0..=capacity {
        app.world_mut().write_message(SpawnRequest::at(
            tags::TURRET,
            Vec2::new(i as f32, 5.0),
            0.0,
        ));
    }
    app.update();

    assert_eq!(common::active_in(&mut app, tags::TURRET).len(), capacity);

    let world = app.world();
    let first = world.resource::<PoolRegistry>().pool(tags::TURRET).unwrap().slots()[0];
    let tf = world.get::<Transform>(first).unwrap();
    assert_eq!(tf.translation.x, capacity as f32, "slot 0 went to the last request");
    assert!(world.get::<Pooled>(first).unwrap().active);
}

#[test]
fn enemy_bullets_leave_play_when_their_lifetime_ends() {
    let mut app = common::app_stepping();

    app.world_mut().write_message(SpawnRequest::at(
        tags::ENEMY_BULLET_RED,
        Vec2::new(0.0, 8.0),
        std::f32::consts::FRAC_PI_2,
    ));
    app.update();
    assert_eq!(common::active_in(&mut app, tags::ENEMY_BULLET_RED).len(), 1);

    common::run_for(&mut app, 3.5);
    assert!(common::active_in(&mut app, tags::ENEMY_BULLET_RED).is_empty());
}
