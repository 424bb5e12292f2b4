//! Declarative game configuration, loaded once at startup.
//!
//! The shipped defaults live in `assets/config/game.toml` and are embedded in
//! the binary. A different file can be selected with `SPACCANAVI_CONFIG`.

use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::common::tunables::Tunables;
use crate::plugins::player::ability::AbilityKind;

pub const DEFAULT_CONFIG: &str = include_str!("../../assets/config/game.toml");
pub const CONFIG_ENV_VAR: &str = "SPACCANAVI_CONFIG";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("config declares no pools")]
    NoPools,
    #[error("pickup duration for {0:?} is negative")]
    NegativeDuration(AbilityKind),
}

/// Which archetype a pool pre-instantiates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrefabKind {
    Turret,
    Spinner,
    TripleSpinner,
    Star,
    ChaserLarge,
    ChaserGroupSmall,
    Sniper,
    PlayerBullet,
    EnemyBulletLime,
    EnemyBulletRed,
    EnemyBulletOrange,
    EnemyBulletPurple,
    EnemyBulletPlasma,
    PickupMedkit,
    PickupMultigun,
    PickupShield,
    PickupSlowMotion,
    PickupBullet,
    PickupLaser,
    DeathEffect,
    PlayerHitEffect,
}

/// One pool declaration: `capacity` entities built from `prefab`, keyed by `tag`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PoolEntry {
    pub tag: String,
    pub prefab: PrefabKind,
    pub capacity: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PickupDurations {
    pub medkit: f32,
    pub multigun: f32,
    pub shield: f32,
    pub slow_motion: f32,
    pub bullet: f32,
    pub laser: f32,
}

impl PickupDurations {
    pub fn for_kind(&self, kind: AbilityKind) -> f32 {
        match kind {
            AbilityKind::Medkit => self.medkit,
            AbilityKind::Multigun => self.multigun,
            AbilityKind::Shield => self.shield,
            AbilityKind::SlowMotion => self.slow_motion,
            AbilityKind::Bullet => self.bullet,
            AbilityKind::Laser => self.laser,
        }
    }
}

#[derive(Resource, Debug, Clone, Deserialize)]
pub struct GameConfig {
    pub seed: u64,
    pub audio_cues: Vec<String>,
    pub tunables: Tunables,
    pub pickup_durations: PickupDurations,
    pub pools: Vec<PoolEntry>,
}

impl GameConfig {
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Load from `SPACCANAVI_CONFIG` if set, otherwise the embedded defaults.
    pub fn from_env() -> Result<Self, ConfigError> {
        match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => Self::from_path(path),
            None => Self::from_toml_str(DEFAULT_CONFIG),
        }
    }

    /// Structural checks only. Duplicate tags and zero capacities are the
    /// pool registry's to reject.
    fn validate(&self) -> Result<(), ConfigError> {
        if self.pools.is_empty() {
            return Err(ConfigError::NoPools);
        }
        for kind in AbilityKind::ALL {
            if self.pickup_durations.for_kind(kind) < 0.0 {
                return Err(ConfigError::NegativeDuration(kind));
            }
        }
        Ok(())
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::from_toml_str(DEFAULT_CONFIG).expect("embedded game.toml must be valid")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::tags;

    #[test]
    fn embedded_config_parses_and_declares_every_tag() {
        let config = GameConfig::default();
        let declared: Vec<&str> = config.pools.iter().map(|p| p.tag.as_str()).collect();

        for tag in [
            tags::SPINNER,
            tags::TURRET,
            tags::TRIPLE_SPINNER,
            tags::CHASER_GROUP_SMALL,
            tags::CHASER_LARGE,
            tags::STAR,
            tags::SNIPER,
            tags::PLAYER_BULLET,
            tags::ENEMY_BULLET_LIME,
            tags::ENEMY_BULLET_RED,
            tags::ENEMY_BULLET_ORANGE,
            tags::ENEMY_BULLET_PURPLE,
            tags::ENEMY_BULLET_PLASMA,
            tags::DEATH_EFFECT,
            tags::PLAYER_HIT_EFFECT,
        ] {
            assert!(declared.contains(&tag), "missing pool {tag}");
        }
        for kind in AbilityKind::ALL {
            assert!(declared.contains(&kind.tag()), "missing pickup pool {}", kind.tag());
        }
        assert_eq!(config.tunables.player_shoot_cooldown, 0.07);
    }

    #[test]
    fn rejects_config_without_pools() {
        let text = r#"
            seed = 1
            audio_cues = []
            pools = []

            [tunables]
            physics_length_unit = 1.0
            pixels_per_unit = 48.0
            view_half_extents = [10.0, 5.0]
            player_max_move_speed = 3.0
            player_shoot_cooldown = 0.07
            player_initial_max_health = 450

            [pickup_durations]
            medkit = 0.0
            multigun = 1.0
            shield = 1.0
            slow_motion = 1.0
            bullet = 1.0
            laser = 1.0
        "#;
        assert!(matches!(GameConfig::from_toml_str(text), Err(ConfigError::NoPools)));
    }

    #[test]
    fn rejects_unknown_prefab() {
        let text = DEFAULT_CONFIG.replace("prefab = \"turret\"", "prefab = \"mothership\"");
        assert!(matches!(GameConfig::from_toml_str(&text), Err(ConfigError::Parse(_))));
    }
}
