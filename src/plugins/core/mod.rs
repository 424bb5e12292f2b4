//! Core plugin: configuration-derived resources and the shared schedule layout.
//!
//! ```text
//! FixedUpdate:      Player -> Actors -> Director -> Allocate
//! FixedPostUpdate:  (physics) -> Bridge -> Resolve -> Apply -> Allocate
//! ```

use avian2d::collision::narrow_phase::CollisionEventSystems;
use bevy::prelude::*;

use crate::common::config::GameConfig;
use crate::common::rng::GameRng;
use crate::common::tunables::Tunables;

/// Fixed-step simulation phases.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TickSet {
    Player,
    Actors,
    Director,
    Allocate,
}

/// Contact handling after the physics step.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContactSet {
    /// Collision messages -> `Contact` messages.
    Bridge,
    /// Per-pair gameplay rules.
    Resolve,
    /// Player hits and level-ups produced by `Resolve`.
    Apply,
    Allocate,
}

pub fn plugin(app: &mut App) {
    if !app.world().contains_resource::<GameConfig>() {
        app.insert_resource(GameConfig::default());
    }
    let config = app.world().resource::<GameConfig>();
    let tunables = config.tunables.clone();
    let rng = GameRng::from_seed(config.seed);
    info!("seeding game rng with {}", config.seed);

    app.insert_resource(tunables)
        .insert_resource(rng)
        .insert_resource(ClearColor(Color::srgb(0.05, 0.05, 0.07)));

    app.configure_sets(
        FixedUpdate,
        (TickSet::Player, TickSet::Actors, TickSet::Director, TickSet::Allocate).chain(),
    );
    app.configure_sets(
        FixedPostUpdate,
        (
            ContactSet::Bridge,
            ContactSet::Resolve,
            ContactSet::Apply,
            ContactSet::Allocate,
        )
            .chain(),
    );
    app.configure_sets(FixedPostUpdate, ContactSet::Bridge.after(CollisionEventSystems));
}
