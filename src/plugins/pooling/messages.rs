//! Buffered spawn requests.
//!
//! Producers (firing enemies, the player, the wave director, defeat hooks)
//! never touch the registry. They write intent; the allocator is the single
//! writer of pool cursors.

use bevy::prelude::*;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Placement {
    /// Leave the transform and any parent as the entity was parked.
    Keep,
    /// World position and Z rotation (radians).
    At { position: Vec2, rotation: f32 },
    /// Attach under `parent` at a local position.
    Under { parent: Entity, position: Vec2 },
}

#[derive(Message, Clone, Copy, Debug)]
pub struct SpawnRequest {
    pub tag: &'static str,
    pub placement: Placement,
    pub shooter: Option<Entity>,
    pub tint: Option<Color>,
}

impl SpawnRequest {
    pub fn new(tag: &'static str, placement: Placement) -> Self {
        Self {
            tag,
            placement,
            shooter: None,
            tint: None,
        }
    }

    #[inline]
    pub fn at(tag: &'static str, position: Vec2, rotation: f32) -> Self {
        Self::new(tag, Placement::At { position, rotation })
    }

    #[inline]
    pub fn with_shooter(mut self, shooter: Entity) -> Self {
        self.shooter = Some(shooter);
        self
    }

    #[inline]
    pub fn with_tint(mut self, tint: Color) -> Self {
        self.tint = Some(tint);
        self
    }
}
