//! Mouse look for a first-person camera.
//!
//! [`MouseLook`] turns raw mouse deltas into a character yaw and a camera
//! pitch. Deltas are fed with [`MouseLook::push_delta`] (the input system
//! does this every frame) and consumed by
//! [`LookProvider::look_rotation`](crate::capabilities::LookProvider).
//!
//! Cursor locking is tracked here too; the host mirrors
//! [`MouseLook::cursor_locked`] onto the window.

use bevy_ecs::prelude::Component;

use crate::capabilities::{LookProvider, LookRotation};

#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct MouseLook {
    /// Degrees of yaw per pixel of horizontal mouse motion.
    pub x_sensitivity: f32,
    /// Degrees of pitch per pixel of vertical mouse motion.
    pub y_sensitivity: f32,
    pub clamp_vertical: bool,
    pub min_pitch: f32,
    pub max_pitch: f32,
    pub smooth: bool,
    pub smooth_time: f32,
    pub lock_cursor: bool,
    cursor_locked: bool,
    pending: (f32, f32),
    target: Option<LookRotation>,
}

impl Default for MouseLook {
    fn default() -> Self {
        Self {
            x_sensitivity: 0.15,
            y_sensitivity: 0.15,
            clamp_vertical: true,
            min_pitch: -90.0,
            max_pitch: 90.0,
            smooth: false,
            smooth_time: 5.0,
            lock_cursor: true,
            cursor_locked: true,
            pending: (0.0, 0.0),
            target: None,
        }
    }
}

impl MouseLook {
    /// Accumulate a mouse delta in screen pixels (y grows downwards).
    pub fn push_delta(&mut self, dx: f32, dy: f32) {
        if !self.cursor_locked {
            return;
        }
        self.pending.0 += dx;
        self.pending.1 += dy;
    }

    pub fn pending_delta(&self) -> (f32, f32) {
        self.pending
    }

    pub fn cursor_locked(&self) -> bool {
        self.lock_cursor && self.cursor_locked
    }

    /// Escape releases the cursor, a click grabs it again.
    pub fn update_cursor_lock(&mut self, release_pressed: bool, grab_pressed: bool) {
        if !self.lock_cursor {
            self.cursor_locked = false;
            return;
        }
        if release_pressed {
            self.cursor_locked = false;
            self.pending = (0.0, 0.0);
        } else if grab_pressed {
            self.cursor_locked = true;
        }
    }

    fn clamp_pitch(&self, pitch: f32) -> f32 {
        if self.clamp_vertical {
            pitch.clamp(self.min_pitch, self.max_pitch)
        } else {
            pitch
        }
    }
}

impl LookProvider for MouseLook {
    fn look_rotation(&mut self, current: LookRotation, dt: f32) -> LookRotation {
        let (dx, dy) = std::mem::take(&mut self.pending);

        let base = self.target.unwrap_or(current);
        let target = LookRotation {
            yaw: base.yaw - dx * self.x_sensitivity,
            pitch: self.clamp_pitch(base.pitch - dy * self.y_sensitivity),
        };

        if !self.smooth {
            self.target = None;
            return target;
        }

        self.target = Some(target);
        let t = (self.smooth_time * dt).clamp(0.0, 1.0);
        LookRotation {
            yaw: current.yaw + (target.yaw - current.yaw) * t,
            pitch: current.pitch + (target.pitch - current.pitch) * t,
        }
    }
}
