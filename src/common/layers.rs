//! Collision layers and actor categories.
//!
//! Inactive pooled entities keep their membership but get empty filters, so
//! they never produce collision messages while parked in the pool.

use avian2d::prelude::*;
use bevy::prelude::*;

#[derive(PhysicsLayer, Default, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Layer {
    #[default]
    Default,
    Player,
    Enemy,
    PlayerBullet,
    EnemyBullet,
    Pickup,
    Effect,
}

/// What a collision participant is, from the gameplay point of view.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActorCategory {
    Player,
    Enemy,
    Pickup,
    PlayerBullet,
    EnemyBullet,
    Effect,
}

impl ActorCategory {
    #[inline]
    pub fn layer(self) -> Layer {
        match self {
            Self::Player => Layer::Player,
            Self::Enemy => Layer::Enemy,
            Self::Pickup => Layer::Pickup,
            Self::PlayerBullet => Layer::PlayerBullet,
            Self::EnemyBullet => Layer::EnemyBullet,
            Self::Effect => Layer::Effect,
        }
    }

    /// Layers while the actor is in play.
    pub fn active_layers(self) -> CollisionLayers {
        match self {
            Self::Player => CollisionLayers::new(
                Layer::Player,
                [Layer::Enemy, Layer::EnemyBullet, Layer::Pickup],
            ),
            Self::Enemy => CollisionLayers::new(
                Layer::Enemy,
                [Layer::Player, Layer::Enemy, Layer::PlayerBullet, Layer::EnemyBullet],
            ),
            Self::Pickup => CollisionLayers::new(Layer::Pickup, [Layer::Player]),
            Self::PlayerBullet => CollisionLayers::new(Layer::PlayerBullet, [Layer::Enemy]),
            Self::EnemyBullet => {
                CollisionLayers::new(Layer::EnemyBullet, [Layer::Player, Layer::Enemy])
            }
            Self::Effect => self.inactive_layers(),
        }
    }

    /// "Disabled" without structural changes: empty filters collide with nothing.
    #[inline]
    pub fn inactive_layers(self) -> CollisionLayers {
        CollisionLayers::new(self.layer(), [] as [Layer; 0])
    }
}
