//! Raw key notifications from the host

use super::codes::KeyCode;

/// Action carried by a raw key notification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Press,
    Release,
    Type,
    /// An action this library does not know about; ignored by the dispatcher
    Other(i32),
}

impl KeyAction {
    /// Host action constant for a press
    pub const PRESS: i32 = 1;
    /// Host action constant for a release
    pub const RELEASE: i32 = 2;
    /// Host action constant for a typed character
    pub const TYPE: i32 = 3;

    /// Map a host action constant
    pub fn from_raw(action: i32) -> Self {
        match action {
            Self::PRESS => Self::Press,
            Self::RELEASE => Self::Release,
            Self::TYPE => Self::Type,
            other => Self::Other(other),
        }
    }
}

impl From<i32> for KeyAction {
    fn from(action: i32) -> Self {
        Self::from_raw(action)
    }
}

/// A single `(action, key code, character)` notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawKeyEvent {
    pub action: KeyAction,
    pub key_code: KeyCode,
    /// Character produced by the key, if any
    pub character: Option<char>,
}

impl RawKeyEvent {
    pub fn new(action: impl Into<KeyAction>, key_code: impl Into<KeyCode>, character: Option<char>) -> Self {
        Self {
            action: action.into(),
            key_code: key_code.into(),
            character,
        }
    }

    /// Key press without a character
    pub fn press(key_code: impl Into<KeyCode>) -> Self {
        Self::new(KeyAction::Press, key_code, None)
    }

    /// Key release without a character
    pub fn release(key_code: impl Into<KeyCode>) -> Self {
        Self::new(KeyAction::Release, key_code, None)
    }

    /// Typed character. Hosts send no key code with these.
    pub fn typed(character: char) -> Self {
        Self::new(KeyAction::Type, KeyCode(0), Some(character))
    }
}
