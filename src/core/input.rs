//! Input system for handling keyboard input
//!
//! Translates raw key presses into scene actions: quitting the application
//! or switching the render mode. Only press transitions trigger actions;
//! auto-repeat and releases are swallowed.

use std::collections::HashSet;
use winit::event::ElementState;
use winit::keyboard::KeyCode;
use tracing::debug;

use crate::scene::Mode;

/// High-level action produced by a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputAction {
    /// Close the window and exit
    Quit,
    /// Switch to the given render mode
    SelectMode(Mode),
}

/// Map a key to its action, if it has one
pub fn action_for_key(keycode: KeyCode) -> Option<InputAction> {
    match keycode {
        KeyCode::Escape | KeyCode::KeyQ => Some(InputAction::Quit),
        KeyCode::KeyA => Some(InputAction::SelectMode(Mode::Wireframe)),
        KeyCode::KeyB => Some(InputAction::SelectMode(Mode::Lit)),
        KeyCode::KeyC => Some(InputAction::SelectMode(Mode::Rocket)),
        _ => None,
    }
}

/// InputSystem tracks which keys are held so that a key only fires
/// once per physical press
#[derive(Debug, Default)]
pub struct InputSystem {
    pressed_keys: HashSet<KeyCode>,
}

impl InputSystem {
    /// Create a new InputSystem
    pub fn new() -> Self {
        Self::default()
    }

    /// Process keyboard input event
    /// Returns the action to perform, if any
    pub fn on_keyboard_input(
        &mut self,
        keycode: KeyCode,
        state: ElementState,
    ) -> Option<InputAction> {
        match state {
            ElementState::Pressed => {
                // insert() is false while the key is already held (auto-repeat)
                if !self.pressed_keys.insert(keycode) {
                    return None;
                }
                let action = action_for_key(keycode);
                if let Some(action) = action {
                    debug!(?keycode, ?action, "Key pressed");
                }
                action
            }
            ElementState::Released => {
                self.pressed_keys.remove(&keycode);
                None
            }
        }
    }

    /// Forget all held keys (useful when window loses focus)
    pub fn reset(&mut self) {
        self.pressed_keys.clear();
    }

    /// Check if a specific key is currently pressed
    pub fn is_key_pressed(&self, key: KeyCode) -> bool {
        self.pressed_keys.contains(&key)
    }
}
