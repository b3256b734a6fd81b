//! Keyboard state tracking and key listeners
//!
//! Keeps the set of held keys current across press, release and focus
//! notifications from the host, answers modifier-combination queries, and
//! notifies registered listeners after each change.
//!
//! # Architecture
//!
//! ```text
//! Host events (winit) → KeyCollector → KeyDispatcher
//!                                          ↓
//!                                  KeyState (mutated)
//!                                          ↓
//!                                    KeyListeners
//!                               (registration order)
//! ```
//!
//! # Usage
//!
//! ```
//! use sketch_keys::input::{FnListener, KeyDispatcher, ModifierSet, RawKeyEvent};
//!
//! let dispatcher = KeyDispatcher::headless();
//! dispatcher.add_listener(
//!     FnListener::new()
//!         .on_pressed(|keys| {
//!             if keys.is_modified_key_pressed(ModifierSet::CTRL, 'S') {
//!                 println!("save");
//!             }
//!         })
//!         .into_handle(),
//! );
//!
//! dispatcher.handle_key_event(RawKeyEvent::press(17));
//! dispatcher.handle_key_event(RawKeyEvent::press(83));
//! assert!(dispatcher.state().is_modified_key_pressed(ModifierSet::CTRL, 'S'));
//! ```

mod codes;
mod collector;
mod context;
mod events;
mod handler;
mod modifiers;
mod state;

// Re-export public API
pub use codes::{
    ControlCodes, ControlKey, FunctionKey, Key, KeyCode, KeyCodes, Modifier, ModifierCodes,
    NavigationCodes, NavigationKey,
};
pub use collector::{KeyCollector, WinitHost, key_code_from_winit};
pub use context::{KeyDispatcher, KeyHost, NullHost};
pub use events::{KeyAction, RawKeyEvent};
pub use handler::{FnListener, KeyListener, ListenerHandle};
pub use modifiers::ModifierSet;
pub use state::{KeySnapshot, KeyState};
