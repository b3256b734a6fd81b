//! Key codes and the host-supplied code table

use serde::{Deserialize, Serialize};

/// Opaque key code as delivered by the host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyCode(pub i32);

impl From<i32> for KeyCode {
    fn from(code: i32) -> Self {
        Self(code)
    }
}

impl std::fmt::Display for KeyCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Named control keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKey {
    Delete,
    Backspace,
    Enter,
    Return,
    Tab,
    Escape,
}

/// Space bar and arrow keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavigationKey {
    Space,
    Left,
    Up,
    Right,
    Down,
}

/// Named function keys
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FunctionKey {
    F1,
    F2,
    F3,
    F4,
    F5,
    F6,
    F7,
    F8,
    F9,
    F10,
    F11,
    F12,
}

impl FunctionKey {
    /// All function keys in order
    pub const ALL: [FunctionKey; 12] = [
        Self::F1,
        Self::F2,
        Self::F3,
        Self::F4,
        Self::F5,
        Self::F6,
        Self::F7,
        Self::F8,
        Self::F9,
        Self::F10,
        Self::F11,
        Self::F12,
    ];

    /// Zero-based position (F1 = 0)
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A single modifier key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Modifier {
    Alt,
    Ctrl,
    Shift,
    /// Windows / Command / Super
    Meta,
}

impl Modifier {
    pub const ALL: [Modifier; 4] = [Self::Alt, Self::Ctrl, Self::Shift, Self::Meta];
}

/// Anything that can be asked "is it pressed?"
///
/// Named keys are resolved through [`KeyCodes`], so the same query works
/// whatever codes the host platform uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Code(KeyCode),
    Control(ControlKey),
    Function(FunctionKey),
    Modifier(Modifier),
    Navigation(NavigationKey),
}

impl From<KeyCode> for Key {
    fn from(code: KeyCode) -> Self {
        Self::Code(code)
    }
}

impl From<i32> for Key {
    fn from(code: i32) -> Self {
        Self::Code(KeyCode(code))
    }
}

impl From<char> for Key {
    /// Letters and digits map to their upper-case code point, which is how
    /// hosts number the alphanumeric row.
    fn from(c: char) -> Self {
        Self::Code(KeyCode(c.to_ascii_uppercase() as i32))
    }
}

impl From<ControlKey> for Key {
    fn from(key: ControlKey) -> Self {
        Self::Control(key)
    }
}

impl From<FunctionKey> for Key {
    fn from(key: FunctionKey) -> Self {
        Self::Function(key)
    }
}

impl From<Modifier> for Key {
    fn from(key: Modifier) -> Self {
        Self::Modifier(key)
    }
}

impl From<NavigationKey> for Key {
    fn from(key: NavigationKey) -> Self {
        Self::Navigation(key)
    }
}

/// Modifier key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModifierCodes {
    pub alt: KeyCode,
    pub ctrl: KeyCode,
    pub shift: KeyCode,
    pub meta: KeyCode,
}

impl Default for ModifierCodes {
    fn default() -> Self {
        Self {
            alt: KeyCode(18),
            ctrl: KeyCode(17),
            shift: KeyCode(16),
            meta: KeyCode(524),
        }
    }
}

/// Control key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlCodes {
    pub delete: KeyCode,
    pub backspace: KeyCode,
    pub enter: KeyCode,
    pub r#return: KeyCode,
    pub tab: KeyCode,
    pub escape: KeyCode,
}

impl Default for ControlCodes {
    fn default() -> Self {
        Self {
            delete: KeyCode(127),
            backspace: KeyCode(8),
            enter: KeyCode(10),
            r#return: KeyCode(13),
            tab: KeyCode(9),
            escape: KeyCode(27),
        }
    }
}

/// Space and arrow key codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavigationCodes {
    pub space: KeyCode,
    pub left: KeyCode,
    pub up: KeyCode,
    pub right: KeyCode,
    pub down: KeyCode,
}

impl Default for NavigationCodes {
    fn default() -> Self {
        Self {
            space: KeyCode(32),
            left: KeyCode(37),
            up: KeyCode(38),
            right: KeyCode(39),
            down: KeyCode(40),
        }
    }
}

/// Physical codes for every named key
///
/// Defaults follow the AWT virtual-key numbering most sketch hosts use.
/// Hosts with a different numbering override them through configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyCodes {
    pub modifiers: ModifierCodes,
    pub control: ControlCodes,
    pub navigation: NavigationCodes,
    /// F1 through F12
    pub function: [KeyCode; 12],
}

impl Default for KeyCodes {
    fn default() -> Self {
        Self {
            modifiers: ModifierCodes::default(),
            control: ControlCodes::default(),
            navigation: NavigationCodes::default(),
            function: std::array::from_fn(|i| KeyCode(112 + i as i32)),
        }
    }
}

impl KeyCodes {
    /// Resolve a key to the code the host reports for it
    pub fn resolve(&self, key: Key) -> KeyCode {
        match key {
            Key::Code(code) => code,
            Key::Control(control) => self.control_code(control),
            Key::Function(function) => self.function[function.index()],
            Key::Modifier(modifier) => self.modifier_code(modifier),
            Key::Navigation(navigation) => self.navigation_code(navigation),
        }
    }

    pub fn modifier_code(&self, modifier: Modifier) -> KeyCode {
        match modifier {
            Modifier::Alt => self.modifiers.alt,
            Modifier::Ctrl => self.modifiers.ctrl,
            Modifier::Shift => self.modifiers.shift,
            Modifier::Meta => self.modifiers.meta,
        }
    }

    pub fn control_code(&self, control: ControlKey) -> KeyCode {
        match control {
            ControlKey::Delete => self.control.delete,
            ControlKey::Backspace => self.control.backspace,
            ControlKey::Enter => self.control.enter,
            ControlKey::Return => self.control.r#return,
            ControlKey::Tab => self.control.tab,
            ControlKey::Escape => self.control.escape,
        }
    }

    pub fn navigation_code(&self, navigation: NavigationKey) -> KeyCode {
        match navigation {
            NavigationKey::Space => self.navigation.space,
            NavigationKey::Left => self.navigation.left,
            NavigationKey::Up => self.navigation.up,
            NavigationKey::Right => self.navigation.right,
            NavigationKey::Down => self.navigation.down,
        }
    }

    /// Code of the escape key
    pub fn escape(&self) -> KeyCode {
        self.control.escape
    }
}
