use bevy::prelude::*;

/// Damage addressed to the player.
#[derive(Message, Clone, Copy, Debug, PartialEq)]
pub struct PlayerHit {
    pub damage: i32,
    /// Knockback direction (unit or zero).
    pub impulse: Vec2,
    /// Contact hits also cancel the player's current move speed.
    pub stagger: bool,
}

/// The wave director reached a new level.
#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct WaveLevelUp {
    pub level: u32,
}
