//! Critically damped spring that animates the second hand between ticks.
//!
//! The spring follows the closed-form solution of the damped harmonic
//! oscillator with damping ratio 1:
//!
//! ```text
//! x(t) = target + (d0 + (v0 + w * d0) * t) * e^(-w * t)
//! ```
//!
//! where `d0` is the starting displacement from the target, `v0` the starting
//! velocity and `w = sqrt(stiffness / mass)`. Angles are tracked unwrapped so
//! that a 354° -> 0° tick travels forward 6° instead of sweeping back 354°.

use std::time::Duration;

use crate::color::wrap_degrees;

/// Default stiffness, a stiff and snappy spring.
pub const DEFAULT_STIFFNESS: f32 = 10_000.0;

/// Mass is fixed; stiffness alone controls speed.
const MASS: f32 = 1.0;

/// Once the unwrapped target drifts this far from zero both ends are shifted
/// back by whole turns to keep f32 precision.
const REBASE_THRESHOLD: f32 = 360.0 * 64.0;

/// Second-hand interpolator, re-targeted once per elapsed second.
#[derive(Debug, Clone)]
pub struct SecondHandSpring {
    omega: f32,
    /// Unwrapped angle at `started`.
    from: f32,
    /// Velocity in degrees/second at `started`.
    velocity: f32,
    /// Unwrapped target angle.
    target: f32,
    started: Duration,
    /// Last target as given (0..360); `None` until first retarget.
    last_target: Option<f32>,
}

impl Default for SecondHandSpring {
    fn default() -> Self {
        Self::new(DEFAULT_STIFFNESS)
    }
}

impl SecondHandSpring {
    pub fn new(stiffness: f32) -> Self {
        Self {
            omega: (stiffness.max(1.0) / MASS).sqrt(),
            from: 0.0,
            velocity: 0.0,
            target: 0.0,
            started: Duration::ZERO,
            last_target: None,
        }
    }

    /// Point the spring at a new angle at time `now`.
    ///
    /// The first call snaps straight to the angle. Later calls start from the
    /// spring's current position and velocity and travel the shortest way
    /// round the dial. Re-targeting to the current target does nothing.
    pub fn retarget(&mut self, angle_deg: f32, now: Duration) {
        let angle = wrap_degrees(angle_deg);
        let Some(previous) = self.last_target else {
            self.from = angle;
            self.target = angle;
            self.velocity = 0.0;
            self.started = now;
            self.last_target = Some(angle);
            return;
        };
        if previous == angle {
            return;
        }

        let (position, velocity) = self.state_at(now);
        let mut delta = (angle - previous).rem_euclid(360.0);
        if delta > 180.0 {
            delta -= 360.0;
        }

        self.from = position;
        self.velocity = velocity;
        self.target += delta;
        self.started = now;
        self.last_target = Some(angle);

        if self.target.abs() > REBASE_THRESHOLD {
            let shift = (self.target / 360.0).trunc() * 360.0;
            self.target -= shift;
            self.from -= shift;
        }
    }

    /// Display angle at `now`, in 0.0..360.0.
    pub fn angle_at(&self, now: Duration) -> f32 {
        wrap_degrees(self.unwrapped_at(now))
    }

    /// Angle at `now` without wrapping; continuous across the 360 -> 0 tick.
    pub fn unwrapped_at(&self, now: Duration) -> f32 {
        self.state_at(now).0
    }

    /// Current target in 0.0..360.0.
    pub fn target(&self) -> f32 {
        wrap_degrees(self.target)
    }

    fn state_at(&self, now: Duration) -> (f32, f32) {
        let t = now.saturating_sub(self.started).as_secs_f32();
        let w = self.omega;
        let d0 = self.from - self.target;
        let c = self.velocity + w * d0;
        let decay = (-w * t).exp();
        let position = self.target + (d0 + c * t) * decay;
        let velocity = (self.velocity - w * t * c) * decay;
        (position, velocity)
    }
}
