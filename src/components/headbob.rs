//! Curve-driven camera bob.
//!
//! [`CurveControlledBob`] produces a camera-local offset that sways sideways
//! and bobs vertically as the character walks. The curve is a single period
//! of `sin(πt)` over `t ∈ [0, 2)`; the horizontal and vertical channels walk
//! along it at different rates (`vertical_to_horizontal_ratio`), which gives
//! the familiar figure-eight head motion.

use std::f32::consts::PI;

use raylib::prelude::Vector3;

/// Length of one bob curve period in curve time.
pub const BOB_CURVE_PERIOD: f32 = 2.0;

/// Bob curve: 0 at t=0, 1 at 0.5, 0 at 1, -1 at 1.5, 0 at 2.
pub fn bob_curve(t: f32) -> f32 {
    (PI * t.rem_euclid(BOB_CURVE_PERIOD)).sin()
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveControlledBob {
    pub horizontal_range: f32,
    pub vertical_range: f32,
    pub vertical_to_horizontal_ratio: f32,
    /// Distance (speed × time) that advances the curve by one unit.
    pub base_interval: f32,
    /// Camera local position the offsets are applied to.
    pub origin: Vector3,
    cycle_x: f32,
    cycle_y: f32,
}

impl Default for CurveControlledBob {
    fn default() -> Self {
        Self::new(0.1, 0.1, 2.0)
    }
}

impl CurveControlledBob {
    pub fn new(horizontal_range: f32, vertical_range: f32, ratio: f32) -> Self {
        Self {
            horizontal_range,
            vertical_range,
            vertical_to_horizontal_ratio: ratio,
            base_interval: 1.0,
            origin: Vector3::zero(),
            cycle_x: 0.0,
            cycle_y: 0.0,
        }
    }

    /// Bind the bob to the camera's rest position and the stride interval.
    pub fn setup(&mut self, origin: Vector3, base_interval: f32) {
        self.origin = origin;
        self.base_interval = base_interval;
    }

    /// Current (horizontal, vertical) curve positions.
    pub fn cycle(&self) -> (f32, f32) {
        (self.cycle_x, self.cycle_y)
    }

    /// Evaluate the offset for the current cycle, then advance the cycle by
    /// `speed * dt`.
    pub fn do_head_bob(&mut self, speed: f32, dt: f32) -> Vector3 {
        let x = self.origin.x + bob_curve(self.cycle_x) * self.horizontal_range;
        let y = self.origin.y + bob_curve(self.cycle_y) * self.vertical_range;

        let advance = speed * dt / self.base_interval;
        self.cycle_x += advance;
        self.cycle_y += advance * self.vertical_to_horizontal_ratio;

        if self.cycle_x > BOB_CURVE_PERIOD {
            self.cycle_x -= BOB_CURVE_PERIOD;
        }
        if self.cycle_y > BOB_CURVE_PERIOD {
            self.cycle_y -= BOB_CURVE_PERIOD;
        }

        Vector3::new(x, y, self.origin.z)
    }
}
