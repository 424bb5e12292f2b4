//! Small numeric helpers shared by the state machines.

use bevy::prelude::*;

/// Move `current` toward `target` by at most `max_delta`, never overshooting.
///
/// This is linear: the step length does not depend on the remaining distance.
#[inline]
pub fn move_towards(current: Vec2, target: Vec2, max_delta: f32) -> Vec2 {
    let delta = target - current;
    let dist = delta.length();
    if dist == 0.0 || dist <= max_delta {
        target
    } else {
        current + delta / dist * max_delta
    }
}

#[inline]
pub fn move_towards_f32(current: f32, target: f32, max_delta: f32) -> f32 {
    if (target - current).abs() <= max_delta {
        target
    } else {
        current + (target - current).signum() * max_delta
    }
}

/// Rotate the angle `current` toward `target` (radians) by at most `max_delta`,
/// taking the short way around.
pub fn move_towards_angle(current: f32, target: f32, max_delta: f32) -> f32 {
    let diff = delta_angle(current, target);
    if diff.abs() <= max_delta {
        current + diff
    } else {
        current + diff.signum() * max_delta
    }
}

/// Shortest signed difference `target - current`, wrapped into `(-PI, PI]`.
#[inline]
pub fn delta_angle(current: f32, target: f32) -> f32 {
    let mut d = (target - current).rem_euclid(std::f32::consts::TAU);
    if d > std::f32::consts::PI {
        d -= std::f32::consts::TAU;
    }
    d
}

/// Z angle (radians) of a 2D rotation.
#[inline]
pub fn z_angle(rotation: Quat) -> f32 {
    rotation.to_euler(EulerRot::XYZ).2
}

/// Unit vector an actor faces ("right" in local space).
#[inline]
pub fn heading(rotation: Quat) -> Vec2 {
    (rotation * Vec3::X).truncate()
}

/// Angle (radians) that faces from `from` toward `to`.
#[inline]
pub fn look_angle(from: Vec2, to: Vec2) -> f32 {
    let d = to - from;
    d.y.atan2(d.x)
}

/// Whether `point` lies within `half_width` of the segment that starts at
/// `origin` and runs `length` along the unit vector `dir`.
pub fn in_beam(origin: Vec2, dir: Vec2, length: f32, half_width: f32, point: Vec2) -> bool {
    let rel = point - origin;
    let along = rel.dot(dir);
    if !(0.0..=length).contains(&along) {
        return false;
    }
    (rel - dir * along).length() <= half_width
}

/// A countdown in seconds that saturates at zero.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Countdown(f32);

impl Countdown {
    #[inline]
    pub fn new(secs: f32) -> Self {
        Self(secs.max(0.0))
    }

    #[inline]
    pub fn remaining(self) -> f32 {
        self.0
    }

    /// Tick down and report whether the countdown has run out.
    #[inline]
    pub fn tick_down(&mut self, dt: f32) -> bool {
        self.0 = (self.0 - dt).max(0.0);
        self.0 <= 0.0
    }

    #[inline]
    pub fn is_running(self) -> bool {
        self.0 > 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn move_towards_is_linear_and_never_overshoots() {
        let mut v = Vec2::new(10.0, 0.0);
        for t in 1..=25 {
            v = move_towards(v, Vec2::ZERO, 0.5);
            let expected = (10.0 - 0.5 * t as f32).max(0.0);
            assert_eq!(v.x, expected);
            assert_eq!(v.y, 0.0);
        }
        assert_eq!(v, Vec2::ZERO);
    }

    #[test]
    fn move_towards_angle_wraps_the_short_way() {
        let a = move_towards_angle(170f32.to_radians(), (-170f32).to_radians(), 5f32.to_radians());
        assert!((a - 175f32.to_radians()).abs() < 1e-5);

        let b = move_towards_angle(0.0, 0.1, 1.0);
        assert!((b - 0.1).abs() < 1e-6);
    }

    #[test]
    fn beam_covers_a_strip_in_front_of_the_origin() {
        let o = Vec2::new(1.0, 1.0);
        assert!(in_beam(o, Vec2::X, 10.0, 0.5, Vec2::new(5.0, 1.4)));
        assert!(!in_beam(o, Vec2::X, 10.0, 0.5, Vec2::new(5.0, 1.6)));
        assert!(!in_beam(o, Vec2::X, 10.0, 0.5, Vec2::new(0.0, 1.0)));
        assert!(!in_beam(o, Vec2::X, 10.0, 0.5, Vec2::new(12.0, 1.0)));
    }

    #[test]
    fn countdown_saturates_at_zero() {
        let mut c = Countdown::new(0.3);
        assert!(!c.tick_down(0.25));
        assert!(c.is_running());
        assert!(c.tick_down(0.25));
        assert_eq!(c.remaining(), 0.0);
        assert!(!c.is_running());
        assert_eq!(Countdown::new(-1.0).remaining(), 0.0);
    }
}
