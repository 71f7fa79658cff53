//! Ballistic root kinematics shared by the jump and flip clips.
//!
//! Launch speed is fixed by an Earth reference height; the actual gravity
//! bends the arc, so weaker gravity gives a higher apex and a longer flight.

use crate::gravity::{self, EARTH_GRAVITY};

/// Height below which the body counts as grounded (m).
pub const LIFTOFF_HEIGHT: f32 = 0.01;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Projectile {
    /// Launch speed (m/s).
    pub v0: f32,
    /// Actual gravity (m/s²), may be zero.
    pub gravity: f32,
}

impl Projectile {
    /// Launch speed that reaches `height` under Earth gravity.
    pub fn earth_reference(height: f32, gravity: f32) -> Self {
        Self {
            v0: (2.0 * EARTH_GRAVITY * height).sqrt(),
            gravity,
        }
    }

    #[inline]
    fn divisor(&self) -> f32 {
        gravity::divisor(self.gravity)
    }

    /// `2 v0 / max(g, ε)` seconds.
    pub fn flight_time(&self) -> f32 {
        2.0 * self.v0 / self.divisor()
    }

    /// `v0² / 2 max(g, ε)` metres.
    pub fn apex(&self) -> f32 {
        self.v0 * self.v0 / (2.0 * self.divisor())
    }

    /// `max(0, v0 t - ½ g t²)`.
    #[inline]
    pub fn height(&self, t: f32) -> f32 {
        (self.v0 * t - 0.5 * self.gravity * t * t).max(0.0)
    }

    #[inline]
    pub fn height_at_progress(&self, progress: f32) -> f32 {
        self.height(progress * self.flight_time())
    }

    /// `(lift_off, touchdown)` seconds: where the arc crosses [`LIFTOFF_HEIGHT`].
    pub fn airborne_window(&self) -> (f32, f32) {
        let g = self.divisor();
        let disc = (self.v0 * self.v0 - 2.0 * self.gravity * LIFTOFF_HEIGHT).max(0.0);
        let root = disc.sqrt() / g;
        let mid = self.v0 / g;
        (mid - root, mid + root)
    }

    /// Fraction of the airborne window elapsed at `t`: 0 before lift-off,
    /// 1 at or after touchdown, linear in between.
    pub fn airborne_fraction(&self, t: f32) -> f32 {
        let (start, end) = self.airborne_window();
        if t <= start {
            0.0
        } else if t >= end {
            1.0
        } else {
            ((t - start) / (end - start)).clamp(0.0, 1.0)
        }
    }
}
