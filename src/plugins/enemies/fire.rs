//! Fire timing as explicit timer state.
//!
//! A `FireSequence` is stepped once per fixed tick and reports when a shot
//! goes out. `restart` on spawn, `cancel` on despawn; a cancelled sequence
//! never fires.
//!
//! ```text
//! Repeat { interval }:
//!   Waiting(interval) -> fire -> Waiting(interval) -> fire -> ...
//!
//! Burst { pause, shots, interval }:
//!   Pausing(pause) -> Bursting(interval) -> fire x shots -> Pausing(pause) -> ...
//! ```

use rand::Rng;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Pause {
    Fixed(f32),
    /// Uniform in `[min, max)`, redrawn before every burst.
    Between(f32, f32),
}

impl Pause {
    fn draw(self, rng: &mut impl Rng) -> f32 {
        match self {
            Self::Fixed(secs) => secs,
            Self::Between(min, max) if max > min => rng.gen_range(min..max),
            Self::Between(min, _) => min,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum FirePattern {
    Repeat { interval: f32 },
    Burst { pause: Pause, shots: u32, interval: f32 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Idle,
    Waiting,
    Pausing,
    Bursting { fired: u32 },
}

#[derive(Clone, Debug, PartialEq)]
pub struct FireSequence {
    pattern: FirePattern,
    phase: Phase,
    remaining: f32,
    /// Shots since the last restart. Lets patterns cycle through muzzles.
    shots_fired: u32,
}

impl FireSequence {
    pub fn new(pattern: FirePattern) -> Self {
        Self {
            pattern,
            phase: Phase::Idle,
            remaining: 0.0,
            shots_fired: 0,
        }
    }

    #[inline]
    pub fn pattern(&self) -> FirePattern {
        self.pattern
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase != Phase::Idle
    }

    pub fn restart(&mut self, rng: &mut impl Rng) {
        self.shots_fired = 0;
        match self.pattern {
            FirePattern::Repeat { interval } => {
                self.phase = Phase::Waiting;
                self.remaining = interval;
            }
            FirePattern::Burst { pause, .. } => {
                self.phase = Phase::Pausing;
                self.remaining = pause.draw(rng);
            }
        }
    }

    pub fn cancel(&mut self) {
        self.phase = Phase::Idle;
        self.remaining = 0.0;
        self.shots_fired = 0;
    }

    /// Advance by `dt`. Returns the running shot index when a shot fires.
    ///
    /// At most one phase transition happens per step.
    pub fn step(&mut self, dt: f32, rng: &mut impl Rng) -> Option<u32> {
        if self.phase == Phase::Idle {
            return None;
        }

        self.remaining -= dt;
        if self.remaining > 0.0 {
            return None;
        }

        match (self.pattern, self.phase) {
            (_, Phase::Idle) => None,
            (FirePattern::Repeat { interval }, _) => {
                self.remaining = interval;
                Some(self.next_shot())
            }
            (FirePattern::Burst { interval, .. }, Phase::Pausing | Phase::Waiting) => {
                self.phase = Phase::Bursting { fired: 0 };
                self.remaining = interval;
                None
            }
            (FirePattern::Burst { pause, shots, interval }, Phase::Bursting { fired }) => {
                let fired = fired + 1;
                if fired >= shots {
                    self.phase = Phase::Pausing;
                    self.remaining = pause.draw(rng);
                } else {
                    self.phase = Phase::Bursting { fired };
                    self.remaining = interval;
                }
                Some(self.next_shot())
            }
        }
    }

    #[inline]
    fn next_shot(&mut self) -> u32 {
        let index = self.shots_fired;
        self.shots_fired = self.shots_fired.wrapping_add(1);
        index
    }
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum BeamPhase {
    Idle,
    Cooldown { remaining: f32 },
    Charging { charge: f32 },
}

/// Sniper beam: wait `interval`, charge for `1 / charge_rate` seconds, fire.
#[derive(Clone, Debug, PartialEq)]
pub struct BeamSequence {
    interval: f32,
    charge_rate: f32,
    phase: BeamPhase,
}

impl BeamSequence {
    pub fn new(interval: f32, charge_time: f32) -> Self {
        Self {
            interval,
            charge_rate: 1.0 / charge_time.max(f32::EPSILON),
            phase: BeamPhase::Idle,
        }
    }

    pub fn restart(&mut self) {
        self.phase = BeamPhase::Cooldown {
            remaining: self.interval,
        };
    }

    pub fn cancel(&mut self) {
        self.phase = BeamPhase::Idle;
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.phase != BeamPhase::Idle
    }

    /// Charge level in `[0, 1]`; zero unless charging.
    pub fn charge(&self) -> f32 {
        match self.phase {
            BeamPhase::Charging { charge } => charge.clamp(0.0, 1.0),
            _ => 0.0,
        }
    }

    /// Advance by `dt`. True on the step the beam fires.
    pub fn step(&mut self, dt: f32) -> bool {
        match self.phase {
            BeamPhase::Idle => false,
            BeamPhase::Cooldown { remaining } => {
                let remaining = remaining - dt;
                self.phase = if remaining <= 0.0 {
                    BeamPhase::Charging { charge: 0.0 }
                } else {
                    BeamPhase::Cooldown { remaining }
                };
                false
            }
            BeamPhase::Charging { charge } => {
                let charge = charge + dt * self.charge_rate;
                if charge >= 1.0 {
                    self.restart();
                    return true;
                }
                self.phase = BeamPhase::Charging { charge };
                false
            }
        }
    }
}
