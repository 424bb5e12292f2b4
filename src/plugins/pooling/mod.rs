//! Object pooling: every transient actor is pre-instantiated at startup and
//! recycled round-robin.
//!
//! # Data flow
//! ```text
//!  Startup
//!    init_pools: GameConfig.pools -> PoolRegistry (one ObjectPool per tag)
//!
//!  FixedUpdate / FixedPostUpdate
//!    producers (player, enemies, director, defeat hooks)
//!        -> SpawnRequest messages
//!    allocate_from_pools (single writer of pool cursors)
//!        - registry.spawn(tag): next slot, active or not
//!        - Pooled.active = true, placement, PooledEntity::on_spawn
//!    sync_pooled_presentation
//!        - Visibility + CollisionLayers derived from Pooled.active
//! ```
//!
//! Entities leave play by flipping `Pooled::active` back to false (see
//! `pool::despawn`). Nothing is ever despawned from the world.

pub mod allocator;
pub mod components;
pub mod messages;
pub mod pool;
pub mod prefabs;
pub mod registry;

use bevy::prelude::*;

use crate::common::state::GameState;
use crate::plugins::core::{ContactSet, TickSet};

pub use components::Pooled;
pub use messages::{Placement, SpawnRequest};
pub use pool::{ObjectPool, PooledEntity, SpawnContext};
pub use registry::{PoolError, PoolRegistry};

pub fn plugin(app: &mut App) {
    app.init_resource::<PoolRegistry>()
        .add_message::<SpawnRequest>()
        .add_systems(Startup, allocator::init_pools)
        .add_systems(OnEnter(GameState::InGame), allocator::park_all);

    app.add_systems(
        FixedUpdate,
        (allocator::allocate_from_pools, allocator::sync_pooled_presentation)
            .chain()
            .in_set(TickSet::Allocate)
            .run_if(in_state(GameState::InGame)),
    );

    // Contact resolution spawns effects and parks actors after FixedUpdate.
    app.add_systems(
        FixedPostUpdate,
        (allocator::allocate_from_pools, allocator::sync_pooled_presentation)
            .chain()
            .in_set(ContactSet::Allocate)
            .run_if(in_state(GameState::InGame)),
    );
}
