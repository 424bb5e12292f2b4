//! Pool tags used by spawn requests.
//!
//! Tags are the keys of the pool registry and must match `tag` entries in
//! `assets/config/game.toml`. Pickup tags come from `AbilityKind::tag`.

pub const SPINNER: &str = "Spinner";
pub const TURRET: &str = "Turret";
pub const TRIPLE_SPINNER: &str = "Triple Spinner";
pub const CHASER_GROUP_SMALL: &str = "Chaser Group (Small)";
pub const CHASER_LARGE: &str = "Chaser (Large)";
pub const STAR: &str = "Star";
pub const SNIPER: &str = "Sniper";

pub const PLAYER_BULLET: &str = "Player Bullet";
pub const ENEMY_BULLET_LIME: &str = "Enemy Bullet Lime";
pub const ENEMY_BULLET_RED: &str = "Enemy Bullet Red";
pub const ENEMY_BULLET_ORANGE: &str = "Enemy Bullet Orange";
pub const ENEMY_BULLET_PURPLE: &str = "Enemy Bullet Purple";
pub const ENEMY_BULLET_PLASMA: &str = "Enemy Bullet Plasma";

pub const DEATH_EFFECT: &str = "Death Effect";
pub const PLAYER_HIT_EFFECT: &str = "Player Get Hit Effect";

/// Audio cue keys.
pub mod cues {
    pub const BGM: &str = "BGM";
    pub const DEATH: &str = "Death";
    pub const HURT: &str = "Hurt";
    pub const SHOOT: &str = "Shoot";
}
