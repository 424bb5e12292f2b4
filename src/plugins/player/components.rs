use bevy::prelude::*;

use crate::common::math::{Countdown, move_towards};

use super::ability::AbilityKind;

#[derive(Component)]
pub struct Player;

/// Sampled once per frame in `Update`, consumed in `FixedUpdate`.
#[derive(Resource, Default, Debug, Clone)]
pub struct PlayerInput {
    /// Raw axes, each component in {-1, 0, 1}.
    pub move_axis: Vec2,
    /// Cursor in world space, if the cursor is over the window.
    pub aim: Option<Vec2>,
    pub fire: bool,
    /// Latched until a fixed step consumes it.
    pub activate: bool,
}

impl PlayerInput {
    #[inline]
    pub fn take_activate(&mut self) -> bool {
        std::mem::take(&mut self.activate)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PlayerDamage {
    /// The player is already dead.
    Ignored,
    /// Invincible: knockback only.
    Blocked,
    Hurt,
    Killed,
}

#[derive(Component, Debug, Clone)]
pub struct PlayerState {
    pub health: i32,
    pub max_health: i32,
    pub max_move_speed: f32,
    pub move_speed: f32,
    pub shoot_cooldown: f32,
    fire_timer: f32,
    pub input: Vec2,
    pub force: Vec2,
    /// Invincibility granted by an active ability.
    pub shielded: bool,
    /// Invincibility after taking a hit.
    hurt: Countdown,
    pub alive: bool,
}

impl PlayerState {
    pub const HURT_WINDOW: f32 = 1.0;
    pub const DIAGONAL: f32 = std::f32::consts::FRAC_1_SQRT_2;
    pub const INPUT_RESPONSE: f32 = 10.0;
    pub const INPUT_DECAY: f32 = 1.0;
    pub const FORCE_DECAY: f32 = 5.0;
    pub const DASH_SPEED: f32 = 8.0;

    pub fn new(max_health: i32, max_move_speed: f32, shoot_cooldown: f32) -> Self {
        Self {
            health: max_health,
            max_health,
            max_move_speed,
            move_speed: 0.0,
            shoot_cooldown,
            fire_timer: shoot_cooldown,
            input: Vec2::ZERO,
            force: Vec2::ZERO,
            shielded: false,
            hurt: Countdown::default(),
            alive: true,
        }
    }

    #[inline]
    pub fn is_invincible(&self) -> bool {
        self.shielded || self.hurt.is_running()
    }

    #[inline]
    pub fn is_hurt(&self) -> bool {
        self.hurt.is_running()
    }

    /// Knockback always applies; damage only when not invincible.
    pub fn take_damage(&mut self, damage: i32, direction: Vec2) -> PlayerDamage {
        if !self.alive {
            return PlayerDamage::Ignored;
        }
        self.force += direction * (damage as f32 / 30.0);
        if self.is_invincible() {
            return PlayerDamage::Blocked;
        }

        self.health -= damage;
        if self.health <= 0 {
            self.health = 0;
            self.alive = false;
            return PlayerDamage::Killed;
        }
        self.hurt = Countdown::new(Self::HURT_WINDOW);
        PlayerDamage::Hurt
    }

    #[inline]
    pub fn refill(&mut self) {
        self.health = self.max_health;
    }

    #[inline]
    pub fn upgrade_max_health(&mut self, max_health: i32) {
        self.max_health = max_health;
    }

    #[inline]
    pub fn reset_move_speed(&mut self) {
        self.move_speed = 0.0;
    }

    /// Keyboard steering. Returns this step's displacement.
    pub fn steer(&mut self, raw_axis: Vec2, dt: f32, slow_motion: bool) -> Vec2 {
        let mut raw = raw_axis;
        if raw.x != 0.0 && raw.y != 0.0 {
            raw *= Self::DIAGONAL;
        }

        self.input = move_towards(self.input, raw, Self::INPUT_RESPONSE * dt);
        self.move_speed = if self.input != Vec2::ZERO {
            self.max_move_speed
        } else {
            0.0
        };

        // Slow motion halves world time, so the player pushes twice as hard.
        let boost = if slow_motion { 2.0 } else { 1.0 };
        self.force += self.move_speed * boost * dt * self.input;
        let cap = Vec2::splat(self.max_move_speed);
        self.force = self.force.clamp(-cap, cap);

        self.force * dt
    }

    /// Bullet ability: fly straight at the cursor. Returns this step's displacement.
    pub fn dash(&mut self, toward_cursor: Vec2, dt: f32) -> Vec2 {
        let mut input = toward_cursor;
        if input.x != 0.0 && input.y != 0.0 {
            input *= Self::DIAGONAL;
        }
        self.input = input;
        Self::DASH_SPEED * dt * input
    }

    /// End-of-step decay of steering input, knockback and the hurt window.
    pub fn settle(&mut self, dt: f32) {
        if self.input != Vec2::ZERO {
            self.input = move_towards(self.input, Vec2::ZERO, Self::INPUT_DECAY * dt);
        }
        if self.force != Vec2::ZERO {
            self.force = move_towards(self.force, Vec2::ZERO, Self::FORCE_DECAY * dt);
        }
        self.hurt.tick_down(dt);
    }

    /// Advance the shot timer; true when a shot goes out this step.
    pub fn try_fire(&mut self, dt: f32, trigger: bool, blocked: bool) -> bool {
        if self.fire_timer > 0.0 {
            self.fire_timer -= dt;
        }
        if self.fire_timer <= 0.0 && trigger && !blocked {
            self.fire_timer = self.shoot_cooldown;
            return true;
        }
        false
    }
}

/// Screen shake intent. The camera applies it.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct CameraShake {
    remaining: f32,
    amount: f32,
}

impl CameraShake {
    pub fn start(&mut self, duration: f32, amount: f32) {
        self.remaining = duration;
        self.amount = amount;
    }

    pub fn stop(&mut self) {
        self.remaining = 0.0;
        self.amount = 0.0;
    }

    #[inline]
    pub fn is_shaking(&self) -> bool {
        self.remaining > 0.0
    }

    #[inline]
    pub fn amount(&self) -> f32 {
        if self.is_shaking() { self.amount } else { 0.0 }
    }

    /// Decays twice as fast under slow motion so shakes keep their wall-clock length.
    pub fn tick(&mut self, dt: f32, time_scale: f32) {
        if !self.is_shaking() {
            self.amount = 0.0;
            return;
        }
        let rate = if time_scale == 0.5 { 2.0 } else { 1.0 };
        self.remaining -= dt * rate;
    }
}

/// Held pickup and window fill, mirrored for the HUD.
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct ItemBox {
    pub held: Option<AbilityKind>,
    pub active: Option<AbilityKind>,
    pub fill: f32,
}
