//! Per-frame keyboard and mouse input resource.
//!
//! Captures the subset of input state the walker cares about and exposes it
//! to systems via the [`InputState`] resource. Defaults use WASD for primary
//! movement and arrow keys as a secondary binding for the same axes.
//!
//! [`InputState`] implements [`AxisSource`]: each axis is the sum of its
//! positive and negative keys, clamped to `[-1, 1]`.
use bevy_ecs::prelude::*;
use raylib::prelude::*;

use crate::capabilities::{AxisSource, InputAxis};

#[derive(Debug, Clone, Copy)]
/// Boolean key state with an associated keyboard binding.
pub struct BoolState {
    /// Whether the key is currently active/pressed this frame.
    pub active: bool,
    /// Whether the key was just pressed this frame.
    pub just_pressed: bool,

    /// The key bound to this action.
    pub key_binding: KeyboardKey,
}

impl Default for BoolState {
    fn default() -> Self {
        Self::bound(KeyboardKey::KEY_NULL)
    }
}

impl BoolState {
    pub fn bound(key_binding: KeyboardKey) -> Self {
        Self {
            active: false,
            just_pressed: false,
            key_binding,
        }
    }

    fn value(&self) -> f32 {
        if self.active { 1.0 } else { 0.0 }
    }
}

/// Resource capturing the per-frame input relevant to the walker.
#[derive(Resource, Debug, Clone)]
pub struct InputState {
    pub maindirection_up: BoolState,
    pub maindirection_left: BoolState,
    pub maindirection_down: BoolState,
    pub maindirection_right: BoolState,
    // Arrow keys
    pub secondarydirection_up: BoolState,
    pub secondarydirection_down: BoolState,
    pub secondarydirection_left: BoolState,
    pub secondarydirection_right: BoolState,
    /// Releases the mouse cursor.
    pub action_back: BoolState,
    pub mode_debug: BoolState,
    /// Left click grabs the cursor again.
    pub grab_cursor: bool,
    /// Mouse motion this frame, in pixels.
    pub mouse_delta: Vector2,
}

impl Default for InputState {
    fn default() -> Self {
        Self {
            maindirection_up: BoolState::bound(KeyboardKey::KEY_W),
            maindirection_left: BoolState::bound(KeyboardKey::KEY_A),
            maindirection_down: BoolState::bound(KeyboardKey::KEY_S),
            maindirection_right: BoolState::bound(KeyboardKey::KEY_D),
            secondarydirection_up: BoolState::bound(KeyboardKey::KEY_UP),
            secondarydirection_down: BoolState::bound(KeyboardKey::KEY_DOWN),
            secondarydirection_left: BoolState::bound(KeyboardKey::KEY_LEFT),
            secondarydirection_right: BoolState::bound(KeyboardKey::KEY_RIGHT),
            action_back: BoolState::bound(KeyboardKey::KEY_ESCAPE),
            mode_debug: BoolState::bound(KeyboardKey::KEY_F1),
            grab_cursor: false,
            mouse_delta: Vector2::zero(),
        }
    }
}

impl InputState {
    /// Press or release the keys behind a direction, as the scripted
    /// (headless) driver does.
    pub fn set_direction(&mut self, horizontal: f32, vertical: f32) {
        self.maindirection_right.active = horizontal > 0.0;
        self.maindirection_left.active = horizontal < 0.0;
        self.maindirection_up.active = vertical > 0.0;
        self.maindirection_down.active = vertical < 0.0;
    }
}

impl AxisSource for InputState {
    fn axis(&self, axis: InputAxis) -> f32 {
        let raw = match axis {
            InputAxis::Horizontal => {
                self.maindirection_right.value() + self.secondarydirection_right.value()
                    - self.maindirection_left.value()
                    - self.secondarydirection_left.value()
            }
            InputAxis::Vertical => {
                self.maindirection_up.value() + self.secondarydirection_up.value()
                    - self.maindirection_down.value()
                    - self.secondarydirection_down.value()
            }
        };
        raw.clamp(-1.0, 1.0)
    }
}
