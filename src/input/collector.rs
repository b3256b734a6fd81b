//! Raw key collection from winit events

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::trace;
use winit::event::{ElementState, WindowEvent};
use winit::keyboard::{KeyCode as WK, PhysicalKey};

use super::codes::{KeyCode, KeyCodes};
use super::context::{KeyDispatcher, KeyHost};
use super::events::{KeyAction, RawKeyEvent};

const LETTERS: [WK; 26] = [
    WK::KeyA,
    WK::KeyB,
    WK::KeyC,
    WK::KeyD,
    WK::KeyE,
    WK::KeyF,
    WK::KeyG,
    WK::KeyH,
    WK::KeyI,
    WK::KeyJ,
    WK::KeyK,
    WK::KeyL,
    WK::KeyM,
    WK::KeyN,
    WK::KeyO,
    WK::KeyP,
    WK::KeyQ,
    WK::KeyR,
    WK::KeyS,
    WK::KeyT,
    WK::KeyU,
    WK::KeyV,
    WK::KeyW,
    WK::KeyX,
    WK::KeyY,
    WK::KeyZ,
];

const DIGITS: [WK; 10] = [
    WK::Digit0,
    WK::Digit1,
    WK::Digit2,
    WK::Digit3,
    WK::Digit4,
    WK::Digit5,
    WK::Digit6,
    WK::Digit7,
    WK::Digit8,
    WK::Digit9,
];

const FUNCTION_KEYS: [WK; 12] = [
    WK::F1,
    WK::F2,
    WK::F3,
    WK::F4,
    WK::F5,
    WK::F6,
    WK::F7,
    WK::F8,
    WK::F9,
    WK::F10,
    WK::F11,
    WK::F12,
];

/// Convert a winit physical key to the host code numbering
///
/// Letters and digits use their upper-case code points, named keys come from
/// `codes`. Keys with no equivalent return `None`.
pub fn key_code_from_winit(key: PhysicalKey, codes: &KeyCodes) -> Option<KeyCode> {
    let PhysicalKey::Code(key) = key else {
        return None;
    };

    if let Some(i) = LETTERS.iter().position(|&k| k == key) {
        return Some(KeyCode('A' as i32 + i as i32));
    }
    if let Some(i) = DIGITS.iter().position(|&k| k == key) {
        return Some(KeyCode('0' as i32 + i as i32));
    }
    if let Some(i) = FUNCTION_KEYS.iter().position(|&k| k == key) {
        return Some(codes.function[i]);
    }

    let code = match key {
        WK::ShiftLeft | WK::ShiftRight => codes.modifiers.shift,
        WK::ControlLeft | WK::ControlRight => codes.modifiers.ctrl,
        WK::AltLeft | WK::AltRight => codes.modifiers.alt,
        WK::SuperLeft | WK::SuperRight | WK::Meta => codes.modifiers.meta,

        WK::Escape => codes.control.escape,
        WK::Enter | WK::NumpadEnter => codes.control.enter,
        WK::Backspace => codes.control.backspace,
        WK::Tab => codes.control.tab,
        WK::Delete => codes.control.delete,

        WK::Space => codes.navigation.space,
        WK::ArrowLeft => codes.navigation.left,
        WK::ArrowUp => codes.navigation.up,
        WK::ArrowRight => codes.navigation.right,
        WK::ArrowDown => codes.navigation.down,

        _ => return None,
    };
    Some(code)
}

/// Winit side of escape suppression
///
/// The dispatcher raises the flag; the application loop takes it after
/// feeding a key event and skips its default escape handling.
#[derive(Debug, Default)]
pub struct WinitHost {
    suppressed: AtomicBool,
}

impl WinitHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether the last key event was suppressed, resetting the flag
    pub fn take_suppressed(&self) -> bool {
        self.suppressed.swap(false, Ordering::AcqRel)
    }
}

impl KeyHost for WinitHost {
    fn suppress_pending_key(&self) {
        self.suppressed.store(true, Ordering::Release);
    }
}

/// Feeds winit window events into a [`KeyDispatcher`]
pub struct KeyCollector {
    dispatcher: Arc<KeyDispatcher>,
}

impl KeyCollector {
    /// Creates a collector feeding `dispatcher`
    pub fn new(dispatcher: Arc<KeyDispatcher>) -> Self {
        Self { dispatcher }
    }

    /// The dispatcher this collector feeds
    pub fn dispatcher(&self) -> &Arc<KeyDispatcher> {
        &self.dispatcher
    }

    /// Handle a winit window event
    pub fn handle_window_event(&self, event: &WindowEvent) {
        match event {
            WindowEvent::Focused(true) => self.dispatcher.focus_gained(),
            WindowEvent::Focused(false) => self.dispatcher.focus_lost(),

            WindowEvent::KeyboardInput { event, .. } => {
                let code = key_code_from_winit(event.physical_key, &self.dispatcher.state().codes());

                match event.state {
                    ElementState::Pressed => {
                        if let Some(code) = code {
                            self.dispatcher
                                .handle_key_event(RawKeyEvent::new(KeyAction::Press, code, None));
                        } else {
                            trace!(key = ?event.physical_key, "Unmapped key press");
                        }

                        // Typed characters follow the press, as on every host
                        if let Some(text) = &event.text {
                            for c in text.chars() {
                                self.dispatcher.handle_key_event(RawKeyEvent::typed(c));
                            }
                        }
                    }
                    ElementState::Released => {
                        if let Some(code) = code {
                            self.dispatcher
                                .handle_key_event(RawKeyEvent::new(KeyAction::Release, code, None));
                        }
                    }
                }
            }

            _ => {}
        }
    }
}
