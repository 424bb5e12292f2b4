//! Held pickup + timed ability window.
//!
//! The player holds at most one pickup. Activating it runs the kind's enter
//! effect; the window closes after `duration` and runs the exit effect.
//! Medkit is instantaneous: it heals and never opens a window.
//!
//! ```text
//!   pick_up(kind, d)         activate()                tick(dt) x N
//!  ───────────────► held ──────────────► active ───────────────────► closed
//!                    │ (Medkit)                       remaining <= 0
//!                    └──► heal, nothing active
//! ```

use bevy::prelude::*;

use super::components::{CameraShake, PlayerState};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AbilityKind {
    Medkit,
    Multigun,
    Shield,
    SlowMotion,
    Bullet,
    Laser,
}

impl AbilityKind {
    pub const ALL: [Self; 6] = [
        Self::Medkit,
        Self::Multigun,
        Self::Shield,
        Self::SlowMotion,
        Self::Bullet,
        Self::Laser,
    ];

    /// Pool tag of the matching pickup.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Medkit => "Medkit",
            Self::Multigun => "Multigun",
            Self::Shield => "Shield",
            Self::SlowMotion => "SlowMotion",
            Self::Bullet => "Bullet",
            Self::Laser => "Laser",
        }
    }

    pub fn color(self) -> Color {
        match self {
            Self::Medkit => Color::srgb(0.35, 0.95, 0.45),
            Self::Multigun => Color::srgb(1.0, 0.75, 0.2),
            Self::Shield => Color::srgb(0.35, 0.6, 1.0),
            Self::SlowMotion => Color::srgb(0.75, 0.45, 1.0),
            Self::Bullet => Color::srgb(1.0, 0.35, 0.3),
            Self::Laser => Color::srgb(1.0, 0.2, 0.75),
        }
    }

    /// The player cannot shoot while these are active.
    #[inline]
    pub fn blocks_shooting(self) -> bool {
        matches!(self, Self::Bullet | Self::Laser)
    }
}

/// Everything an ability's enter/exit effect may touch.
pub struct AbilityEffects<'a> {
    pub player: &'a mut PlayerState,
    /// Virtual time speed. 1.0 is normal.
    pub time_scale: &'a mut f32,
    pub shake: &'a mut CameraShake,
}

pub const SLOW_MOTION_SCALE: f32 = 0.5;
pub const LASER_SHAKE: f32 = 0.25;

fn enter(kind: AbilityKind, duration: f32, fx: &mut AbilityEffects) {
    match kind {
        AbilityKind::Medkit => fx.player.refill(),
        AbilityKind::Multigun => {}
        AbilityKind::Shield | AbilityKind::Bullet => fx.player.shielded = true,
        AbilityKind::SlowMotion => {
            *fx.time_scale = SLOW_MOTION_SCALE;
            fx.player.shoot_cooldown /= 2.0;
        }
        AbilityKind::Laser => {
            fx.player.shielded = true;
            fx.shake.start(duration, LASER_SHAKE);
        }
    }
}

fn exit(kind: AbilityKind, fx: &mut AbilityEffects) {
    match kind {
        AbilityKind::Medkit | AbilityKind::Multigun => {}
        AbilityKind::Shield | AbilityKind::Bullet => fx.player.shielded = false,
        AbilityKind::SlowMotion => {
            *fx.time_scale = 1.0;
            fx.player.shoot_cooldown *= 2.0;
        }
        AbilityKind::Laser => {
            fx.player.shielded = false;
            fx.shake.stop();
        }
    }
}

#[derive(Component, Debug, Clone, Default, PartialEq)]
pub struct AbilityWindow {
    held: Option<(AbilityKind, f32)>,
    active: Option<AbilityKind>,
    remaining: f32,
    duration: f32,
}

impl AbilityWindow {
    /// Replace whatever is held. An active window keeps running.
    pub fn pick_up(&mut self, kind: AbilityKind, duration: f32) {
        self.held = Some((kind, duration));
    }

    #[inline]
    pub fn held(&self) -> Option<AbilityKind> {
        self.held.map(|(kind, _)| kind)
    }

    #[inline]
    pub fn active(&self) -> Option<AbilityKind> {
        self.active
    }

    #[inline]
    pub fn is_active(&self, kind: AbilityKind) -> bool {
        self.active == Some(kind)
    }

    #[inline]
    pub fn remaining(&self) -> f32 {
        self.remaining
    }

    #[inline]
    pub fn duration(&self) -> f32 {
        self.duration
    }

    pub fn blocks_shooting(&self) -> bool {
        self.active.is_some_and(AbilityKind::blocks_shooting)
    }

    /// Fraction of the window left, for the item box.
    pub fn fill(&self) -> f32 {
        if self.active.is_none() || self.duration <= 0.0 {
            return 0.0;
        }
        (self.remaining / self.duration).clamp(0.0, 1.0)
    }

    /// Use the held pickup. Refused while another window is open or when
    /// nothing is held. Returns the kind that was used.
    pub fn activate(&mut self, fx: &mut AbilityEffects) -> Option<AbilityKind> {
        if self.active.is_some() {
            return None;
        }
        let (kind, duration) = self.held.take()?;

        enter(kind, duration, fx);
        if kind != AbilityKind::Medkit {
            self.active = Some(kind);
            self.duration = duration;
            self.remaining = duration;
        }
        Some(kind)
    }

    /// Advance the open window. Returns the kind whose window just closed.
    pub fn tick(&mut self, dt: f32, fx: &mut AbilityEffects) -> Option<AbilityKind> {
        let kind = self.active?;
        if self.remaining > 0.0 {
            self.remaining -= dt;
            return None;
        }

        exit(kind, fx);
        self.active = None;
        self.remaining = 0.0;
        Some(kind)
    }

    /// Close an open window immediately, running its exit effect.
    pub fn cancel(&mut self, fx: &mut AbilityEffects) -> Option<AbilityKind> {
        let kind = self.active.take()?;
        exit(kind, fx);
        self.remaining = 0.0;
        Some(kind)
    }
}
