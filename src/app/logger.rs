//! Listener that logs key activity

use tracing::info;

use crate::input::{KeyListener, KeyState};

/// Logs held keys and the active modifier combination on every change
#[derive(Debug, Default)]
pub struct KeyLogger;

impl KeyLogger {
    fn describe(keys: &KeyState) -> (String, String) {
        let snapshot = keys.snapshot();
        let held = snapshot
            .pressed_codes()
            .iter()
            .map(|code| code.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        (held, snapshot.held_modifiers().label())
    }
}

impl KeyListener for KeyLogger {
    fn on_key_pressed(&self, keys: &KeyState) {
        let (held, modifiers) = Self::describe(keys);
        info!(held = %held, modifiers = %modifiers, "Pressed");
    }

    fn on_key_released(&self, keys: &KeyState) {
        let (held, modifiers) = Self::describe(keys);
        info!(held = %held, modifiers = %modifiers, "Released");
    }

    fn on_key_typed(&self, keys: &KeyState) {
        if let Some(c) = keys.last_typed() {
            info!(character = ?c, "Typed");
        }
    }
}
