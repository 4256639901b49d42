//! Input systems.
//!
//! - [`update_input_state`] reads keyboard and mouse from Raylib each frame
//!   and writes the results into [`InputState`]. `F1` triggers a
//!   [`SwitchDebugEvent`].
//! - [`apply_cursor_lock`] feeds mouse motion to [`MouseLook`] and mirrors
//!   its lock state onto the window cursor.
use bevy_ecs::prelude::*;
use log::debug;
use raylib::ffi::{KeyboardKey, MouseButton};

use crate::components::mouselook::MouseLook;
use crate::events::switchdebug::SwitchDebugEvent;
use crate::resources::input::{BoolState, InputState};

fn poll_key(rl: &raylib::RaylibHandle, state: &mut BoolState) {
    state.active = rl.is_key_down(state.key_binding);
    state.just_pressed = rl.is_key_pressed(state.key_binding);
}

/// Poll Raylib for keyboard and mouse input and update the `InputState` resource.
pub fn update_input_state(
    mut input: ResMut<InputState>,
    rl: NonSend<raylib::RaylibHandle>,
    mut commands: Commands,
) {
    let input = &mut *input;
    // WASD keys
    poll_key(&rl, &mut input.maindirection_up);
    poll_key(&rl, &mut input.maindirection_left);
    poll_key(&rl, &mut input.maindirection_down);
    poll_key(&rl, &mut input.maindirection_right);
    // Arrow keys
    poll_key(&rl, &mut input.secondarydirection_up);
    poll_key(&rl, &mut input.secondarydirection_down);
    poll_key(&rl, &mut input.secondarydirection_left);
    poll_key(&rl, &mut input.secondarydirection_right);
    // Control keys
    poll_key(&rl, &mut input.action_back);
    poll_key(&rl, &mut input.mode_debug);

    input.grab_cursor = rl.is_mouse_button_pressed(MouseButton::MOUSE_BUTTON_LEFT);
    input.mouse_delta = rl.get_mouse_delta();

    if input.mode_debug.just_pressed {
        commands.trigger(SwitchDebugEvent {});
    }
}

/// Route mouse motion into [`MouseLook`] and keep the window cursor in sync
/// with its lock state.
pub fn apply_cursor_lock(
    input: Res<InputState>,
    mut rl: NonSendMut<raylib::RaylibHandle>,
    mut looks: Query<&mut MouseLook>,
    mut applied: Local<Option<bool>>,
) {
    for mut look in looks.iter_mut() {
        look.update_cursor_lock(input.action_back.just_pressed, input.grab_cursor);
        look.push_delta(input.mouse_delta.x, input.mouse_delta.y);

        let locked = look.cursor_locked();
        if *applied != Some(locked) {
            if locked {
                rl.disable_cursor();
            } else {
                rl.enable_cursor();
            }
            debug!("cursor {}", if locked { "locked" } else { "released" });
            *applied = Some(locked);
        }
    }
}

/// Keys the walker reads, for the help line.
pub fn describe_bindings(input: &InputState) -> String {
    let name = |key: KeyboardKey| format!("{:?}", key).trim_start_matches("KEY_").to_string();
    format!(
        "move {}{}{}{} / arrows, debug {}, release cursor {}",
        name(input.maindirection_up.key_binding),
        name(input.maindirection_left.key_binding),
        name(input.maindirection_down.key_binding),
        name(input.maindirection_right.key_binding),
        name(input.mode_debug.key_binding),
        name(input.action_back.key_binding),
    )
}
