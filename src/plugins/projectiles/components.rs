use bevy::prelude::*;

use crate::common::math::{Countdown, heading, move_towards_f32};
use crate::plugins::pooling::{PooledEntity, SpawnContext};

pub const BULLET_LIFETIME: f32 = 3.0;

#[derive(Component, Debug, Clone)]
pub struct EnemyBullet {
    pub speed: f32,
    /// Eases toward this speed at `acceleration` units/s² when set.
    pub target_speed: Option<f32>,
    pub acceleration: f32,
    pub damage: i32,
    pub lifetime: f32,
    /// Knock the player back on hit.
    pub applies_force: bool,
    pub color: Color,
    /// The enemy that fired this bullet. It is never hit by it.
    pub shooter: Option<Entity>,
    current_speed: f32,
    life_left: Option<Countdown>,
}

impl EnemyBullet {
    fn new(speed: f32, damage: i32, color: Color) -> Self {
        Self {
            speed,
            target_speed: None,
            acceleration: 1.0,
            damage,
            lifetime: BULLET_LIFETIME,
            applies_force: false,
            color,
            shooter: None,
            current_speed: speed,
            life_left: None,
        }
    }

    fn easing_to(mut self, target: f32, acceleration: f32) -> Self {
        self.target_speed = Some(target);
        self.acceleration = acceleration;
        self
    }

    pub fn lime() -> Self {
        Self::new(6.0, 5, Color::srgb(0.55, 1.0, 0.3))
    }

    pub fn red() -> Self {
        Self::new(4.0, 5, Color::srgb(1.0, 0.3, 0.35))
    }

    pub fn orange() -> Self {
        Self::new(2.0, 10, Color::srgb(1.0, 0.55, 0.2)).easing_to(6.0, 4.0)
    }

    pub fn purple() -> Self {
        Self::new(5.0, 10, Color::srgb(0.8, 0.35, 1.0))
    }

    /// Heavy shot that starts fast, slows down and shoves the player.
    pub fn plasma() -> Self {
        let mut bullet = Self::new(8.0, 40, Color::srgb(0.4, 0.85, 1.0)).easing_to(3.0, 3.0);
        bullet.applies_force = true;
        bullet
    }

    #[inline]
    pub fn current_speed(&self) -> f32 {
        self.current_speed
    }

    #[inline]
    pub fn is_shooter(&self, e: Entity) -> bool {
        self.shooter == Some(e)
    }

    /// Move along the facing. True once the lifetime runs out.
    pub fn tick(&mut self, tf: &mut Transform, dt: f32) -> bool {
        tf.translation += (self.current_speed * dt * heading(tf.rotation)).extend(0.0);
        if let Some(target) = self.target_speed {
            self.current_speed = move_towards_f32(self.current_speed, target, self.acceleration * dt);
        }
        self.life_left.as_mut().is_some_and(|life| life.tick_down(dt))
    }
}

impl PooledEntity for EnemyBullet {
    fn on_spawn(&mut self, ctx: &mut SpawnContext) {
        self.shooter = ctx.shooter;
        self.current_speed = self.speed;
        self.life_left = Some(Countdown::new(self.lifetime));
    }

    fn on_despawn(&mut self) {
        self.life_left = None;
    }
}

#[derive(Component, Debug, Clone)]
pub struct PlayerBullet {
    pub speed: f32,
    pub damage: i32,
    pub lifetime: f32,
    life_left: Option<Countdown>,
}

impl Default for PlayerBullet {
    fn default() -> Self {
        Self {
            speed: 8.0,
            damage: 5,
            lifetime: BULLET_LIFETIME,
            life_left: None,
        }
    }
}

impl PlayerBullet {
    /// Move along the facing. Under slow motion (`time_scale == 0.5`) the
    /// bullet covers the same wall-clock distance. True once the lifetime runs out.
    pub fn tick(&mut self, tf: &mut Transform, dt: f32, time_scale: f32) -> bool {
        let speed = if time_scale == 0.5 { self.speed * 2.0 } else { self.speed };
        tf.translation += (speed * dt * heading(tf.rotation)).extend(0.0);
        self.life_left.as_mut().is_some_and(|life| life.tick_down(dt))
    }
}

impl PooledEntity for PlayerBullet {
    fn on_spawn(&mut self, _ctx: &mut SpawnContext) {
        self.life_left = Some(Countdown::new(self.lifetime));
    }

    fn on_despawn(&mut self) {
        self.life_left = None;
    }
}
