//! Wave progression and spawn cadence.

use bevy::prelude::*;
use rand::Rng;

use crate::common::math::Countdown;
use crate::common::tags;
use crate::plugins::player::ability::AbilityKind;

pub const MAX_LEVEL: u32 = 20;
pub const HEALTH_PER_LEVEL: i32 = 20;
pub const ITEM_INTERVAL: (f32, f32) = (3.0, 7.0);

pub const INITIAL_ENEMIES: [&str; 2] = [tags::SPINNER, tags::TURRET];

/// Enemy tags that join the spawn table on reaching a level.
pub const UNLOCKS: [(u32, &[&str]); 3] = [
    (2, &[tags::TRIPLE_SPINNER, tags::CHASER_GROUP_SMALL]),
    (4, &[tags::CHASER_LARGE, tags::STAR]),
    (5, &[tags::SNIPER]),
];

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WaveState {
    pub level: u32,
    pub experience: u32,
    pub experience_to_next: u32,
    pub max_concurrent: u32,
}

impl Default for WaveState {
    fn default() -> Self {
        Self {
            level: 1,
            experience: 0,
            experience_to_next: 100,
            max_concurrent: 5,
        }
    }
}

impl WaveState {
    /// Add experience. Returns the new level when the bar fills.
    ///
    /// Overflow is discarded: the bar restarts from zero.
    pub fn add_experience(&mut self, experience: u32) -> Option<u32> {
        self.experience += experience;
        if self.experience < self.experience_to_next {
            return None;
        }

        self.experience = 0;
        self.level = (self.level + 1).min(MAX_LEVEL);
        self.experience_to_next = (self.experience_to_next as f32 * 1.25) as u32;
        self.max_concurrent = (self.max_concurrent as f32 * 1.5).ceil() as u32;
        Some(self.level)
    }
}

#[inline]
pub fn player_max_health(base: i32, level: u32) -> i32 {
    base + (level.saturating_sub(1) as i32) * HEALTH_PER_LEVEL
}

/// Enemy spawn interval bounds for a level: `[max(1, 5/L), max(1, 10/L)]`.
pub fn enemy_interval_bounds(level: u32) -> (f32, f32) {
    let level = level.max(1) as f32;
    ((5.0 / level).max(1.0), (10.0 / level).max(1.0))
}

/// What came due during one director step.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Cadence {
    pub enemy: bool,
    pub item: bool,
}

#[derive(Resource, Debug, Clone)]
pub struct WaveDirector {
    wave: WaveState,
    unlocked: Vec<&'static str>,
    enemy_timer: Option<Countdown>,
    item_timer: Option<Countdown>,
    top_ups: u32,
}

impl Default for WaveDirector {
    fn default() -> Self {
        Self {
            wave: WaveState::default(),
            unlocked: INITIAL_ENEMIES.to_vec(),
            enemy_timer: None,
            item_timer: None,
            top_ups: 0,
        }
    }
}

impl WaveDirector {
    #[inline]
    pub fn wave(&self) -> &WaveState {
        &self.wave
    }

    #[inline]
    pub fn unlocked(&self) -> &[&'static str] {
        &self.unlocked
    }

    /// Award experience; on level-up, unlock that level's enemies.
    pub fn on_enemy_defeated(&mut self, experience: u32) -> Option<u32> {
        let level = self.wave.add_experience(experience)?;
        for (_, tags) in UNLOCKS.iter().filter(|(at, _)| *at == level) {
            for tag in tags.iter() {
                if !self.unlocked.contains(tag) {
                    self.unlocked.push(tag);
                }
            }
        }
        Some(level)
    }

    /// A wave enemy wandered off; replace it on the next step.
    #[inline]
    pub fn request_top_up(&mut self) {
        self.top_ups += 1;
    }

    #[inline]
    pub fn pending_top_ups(&self) -> u32 {
        self.top_ups
    }

    #[inline]
    pub fn take_top_ups(&mut self) -> u32 {
        std::mem::take(&mut self.top_ups)
    }

    /// Advance both cadences. A fresh interval is drawn whenever one runs out.
    pub fn step(&mut self, dt: f32, rng: &mut impl Rng) -> Cadence {
        let (min, max) = enemy_interval_bounds(self.wave.level);
        let enemy = self
            .enemy_timer
            .get_or_insert_with(|| Countdown::new(rng.gen_range(min..=max)))
            .tick_down(dt);
        if enemy {
            self.enemy_timer = None;
        }

        let (min, max) = ITEM_INTERVAL;
        let item = self
            .item_timer
            .get_or_insert_with(|| Countdown::new(rng.gen_range(min..max)))
            .tick_down(dt);
        if item {
            self.item_timer = None;
        }

        Cadence { enemy, item }
    }

    pub fn pick_enemy(&self, rng: &mut impl Rng) -> &'static str {
        self.unlocked[rng.gen_range(0..self.unlocked.len())]
    }

    pub fn pick_item(rng: &mut impl Rng) -> &'static str {
        AbilityKind::ALL[rng.gen_range(0..AbilityKind::ALL.len())].tag()
    }
}

/// A point just outside the visible area around `center`.
///
/// Normalized coordinates are drawn in `[-1.2, 1.2]`; when `x` lands inside
/// the view, `y` is pushed into the top or bottom margin.
pub fn offscreen_point(center: Vec2, half_extents: Vec2, rng: &mut impl Rng) -> Vec2 {
    let x: f32 = rng.gen_range(-1.2..=1.2);
    let y: f32 = if (-1.1..=1.1).contains(&x) {
        if rng.gen_bool(0.5) {
            rng.gen_range(1.1..=1.2)
        } else {
            rng.gen_range(-1.2..=-1.1)
        }
    } else {
        rng.gen_range(-1.2..=1.2)
    };
    center + Vec2::new(x, y) * half_extents
}
