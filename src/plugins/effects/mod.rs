//! Short-lived pooled visual effects (death bursts, player hit flashes).
//!
//! An effect parks itself when its lifetime runs out; `Update` derives the
//! sprite's fade and growth from the time left.

use bevy::prelude::*;

use crate::common::math::Countdown;
use crate::common::state::GameState;
use crate::plugins::core::TickSet;
use crate::plugins::pooling::pool::despawn;
use crate::plugins::pooling::{Pooled, PooledEntity, SpawnContext};

#[derive(Component, Debug, Clone)]
pub struct Effect {
    pub lifetime: f32,
    pub base_tint: Color,
    /// Scale reached at the end of the lifetime.
    pub growth: f32,
    tint: Color,
    life_left: Option<Countdown>,
}

impl Effect {
    fn new(lifetime: f32, base_tint: Color, growth: f32) -> Self {
        Self {
            lifetime,
            base_tint,
            growth,
            tint: base_tint,
            life_left: None,
        }
    }

    pub fn death() -> Self {
        Self::new(0.5, Color::WHITE, 2.5)
    }

    pub fn player_hit() -> Self {
        Self::new(0.25, Color::srgb(1.0, 0.3, 0.3), 1.5)
    }

    #[inline]
    pub fn tint(&self) -> Color {
        self.tint
    }

    /// 1 right after spawning, 0 when done.
    pub fn fraction_left(&self) -> f32 {
        match self.life_left {
            Some(life) if self.lifetime > 0.0 => (life.remaining() / self.lifetime).clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// True once the effect has played out.
    pub fn tick(&mut self, dt: f32) -> bool {
        self.life_left.as_mut().is_some_and(|life| life.tick_down(dt))
    }
}

impl PooledEntity for Effect {
    fn on_spawn(&mut self, ctx: &mut SpawnContext) {
        self.tint = ctx.tint.unwrap_or(self.base_tint);
        self.life_left = Some(Countdown::new(self.lifetime));
    }

    fn on_despawn(&mut self) {
        self.life_left = None;
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(
        FixedUpdate,
        tick_effects
            .in_set(TickSet::Actors)
            .run_if(in_state(GameState::InGame)),
    )
    .add_systems(Update, fade_effects.run_if(in_state(GameState::InGame)));
}

pub fn tick_effects(time: Res<Time<Fixed>>, mut q: Query<(&mut Effect, &mut Pooled)>) {
    let dt = time.delta_secs();
    for (mut effect, mut pooled) in &mut q {
        if pooled.active && effect.tick(dt) {
            despawn(&mut *effect, &mut pooled);
        }
    }
}

fn fade_effects(mut q: Query<(&Effect, &Pooled, &mut Sprite, &mut Transform)>) {
    for (effect, pooled, mut sprite, mut tf) in &mut q {
        if !pooled.active {
            continue;
        }
        let left = effect.fraction_left();
        sprite.color = effect.tint().with_alpha(left);
        tf.scale = Vec3::splat(1.0 + (effect.growth - 1.0) * (1.0 - left));
    }
}
