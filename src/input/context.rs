//! Key event dispatch and listener fan-out

use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use parking_lot::RwLock;
use tracing::{debug, error, info, trace};

use super::codes::KeyCodes;
use super::events::{KeyAction, RawKeyEvent};
use super::handler::{KeyListener, ListenerHandle, same_listener};
use super::state::KeyState;

/// The host side of the dispatcher
///
/// The host owns the event loop and delivers notifications; the dispatcher
/// only needs a way to cancel the host's default handling of the key event
/// currently being delivered.
pub trait KeyHost: Send + Sync {
    /// Suppress the default behavior (e.g. "escape quits") for the
    /// in-flight key event
    fn suppress_pending_key(&self);
}

/// Host with no default key behavior to suppress
#[derive(Debug, Clone, Copy, Default)]
pub struct NullHost;

impl KeyHost for NullHost {
    fn suppress_pending_key(&self) {}
}

/// Which listener callback is being fanned out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Notify {
    Pressed,
    Released,
    Typed,
}

impl Notify {
    fn name(self) -> &'static str {
        match self {
            Self::Pressed => "on_key_pressed",
            Self::Released => "on_key_released",
            Self::Typed => "on_key_typed",
        }
    }
}

/// Receives raw host notifications, keeps [`KeyState`] current and
/// notifies listeners
pub struct KeyDispatcher {
    /// Current key state
    state: KeyState,
    /// Registered listeners, in registration order
    listeners: RwLock<Vec<ListenerHandle>>,
    /// Host collaborator for escape suppression
    host: Arc<dyn KeyHost>,
    /// Whether escape presses are hidden from the host
    override_escape: AtomicBool,
}

impl KeyDispatcher {
    /// Creates a dispatcher bound to `host`, using default key codes
    pub fn new(host: Arc<dyn KeyHost>) -> Self {
        Self::with_codes(host, KeyCodes::default())
    }

    /// Creates a dispatcher bound to `host` with a custom code table
    pub fn with_codes(host: Arc<dyn KeyHost>, codes: KeyCodes) -> Self {
        Self {
            state: KeyState::new(codes),
            listeners: RwLock::new(Vec::new()),
            host,
            override_escape: AtomicBool::new(false),
        }
    }

    /// Creates a dispatcher that is not attached to any host
    pub fn headless() -> Self {
        Self::new(Arc::new(NullHost))
    }

    /// Read-only view of the key state
    pub fn state(&self) -> &KeyState {
        &self.state
    }

    /// Handle a press, release or typed notification
    ///
    /// Unknown actions are ignored.
    pub fn handle_key_event(&self, event: RawKeyEvent) {
        match event.action {
            KeyAction::Press => {
                let code = event.key_code;
                if self.state.mark_pressed(code) {
                    debug!(code = %code, "Key pressed");
                }

                if self.is_overriding_escape() && code == self.state.codes().escape() {
                    info!("Suppressing host escape handling");
                    self.host.suppress_pending_key();
                }

                self.notify(Notify::Pressed);
            }
            KeyAction::Release => {
                let code = event.key_code;
                if self.state.mark_released(code) {
                    debug!(code = %code, "Key released");
                }
                self.notify(Notify::Released);
            }
            KeyAction::Type => {
                // Hosts may deliver TYPE without a character; keep the last one
                if let Some(c) = event.character {
                    trace!(character = ?c, "Key typed");
                    self.state.record_typed(c);
                }
                self.notify(Notify::Typed);
            }
            KeyAction::Other(action) => {
                trace!(action, "Ignoring unknown key action");
            }
        }
    }

    /// The host window gained focus
    pub fn focus_gained(&self) {
        info!("Focus gained, resetting pressed keys as a precaution");
        self.state.clear();
    }

    /// The host window lost focus
    ///
    /// Releases that happen while unfocused are never delivered, so every
    /// held key is dropped here to avoid ghost held keys.
    pub fn focus_lost(&self) {
        info!("Focus lost, resetting pressed keys to prevent ghost held keys");
        self.state.clear();
    }

    /// Hide escape presses from the host (default off)
    pub fn set_override_escape(&self, override_escape: bool) {
        self.override_escape.store(override_escape, Ordering::Relaxed);
    }

    pub fn is_overriding_escape(&self) -> bool {
        self.override_escape.load(Ordering::Relaxed)
    }

    /// Register a listener; a handle that is already registered is ignored
    pub fn add_listener(&self, listener: ListenerHandle) {
        let mut listeners = self.listeners.write();
        if !listeners.iter().any(|l| same_listener(l, &listener)) {
            listeners.push(listener);
        }
    }

    /// Unregister a listener if present
    pub fn remove_listener(&self, listener: &ListenerHandle) {
        self.listeners.write().retain(|l| !same_listener(l, listener));
    }

    pub fn remove_all_listeners(&self) {
        self.listeners.write().clear();
    }

    /// Get number of registered listeners
    pub fn listener_count(&self) -> usize {
        self.listeners.read().len()
    }

    /// Fan a notification out to every listener
    ///
    /// Iterates over a copy of the list so listeners may register or
    /// unregister (themselves included) from inside a callback. A panicking
    /// listener is logged and skipped.
    fn notify(&self, which: Notify) {
        let listeners: Vec<ListenerHandle> = self.listeners.read().clone();

        for (index, listener) in listeners.iter().enumerate() {
            let result = panic::catch_unwind(AssertUnwindSafe(|| {
                call_listener(listener.as_ref(), which, &self.state)
            }));

            if let Err(payload) = result {
                error!(
                    listener = index,
                    callback = which.name(),
                    reason = panic_message(payload.as_ref()),
                    "Key listener panicked"
                );
            }
        }
    }
}

impl Default for KeyDispatcher {
    fn default() -> Self {
        Self::headless()
    }
}

impl std::fmt::Debug for KeyDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeyDispatcher")
            .field("state", &self.state)
            .field("listeners", &self.listener_count())
            .field("override_escape", &self.is_overriding_escape())
            .finish()
    }
}

fn call_listener(listener: &dyn KeyListener, which: Notify, state: &KeyState) {
    match which {
        Notify::Pressed => listener.on_key_pressed(state),
        Notify::Released => listener.on_key_released(state),
        Notify::Typed => listener.on_key_typed(state),
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::codes::{ControlKey, KeyCode};
    use crate::input::handler::FnListener;
    use crate::input::modifiers::ModifierSet;
    use parking_lot::Mutex;
    use std::sync::atomic::AtomicUsize;

    /// Records listener calls as `(tag, callback)` pairs
    fn recorder(tag: &'static str, log: &Arc<Mutex<Vec<(&'static str, &'static str)>>>) -> ListenerHandle {
        let (p, r, t) = (Arc::clone(log), Arc::clone(log), Arc::clone(log));
        FnListener::new()
            .on_pressed(move |_| p.lock().push((tag, "pressed")))
            .on_released(move |_| r.lock().push((tag, "released")))
            .on_typed(move |_| t.lock().push((tag, "typed")))
            .into_handle()
    }

    #[derive(Default)]
    struct CountingHost {
        suppressed: AtomicUsize,
    }

    impl KeyHost for CountingHost {
        fn suppress_pending_key(&self) {
            self.suppressed.fetch_add(1, Ordering::SeqCst);
        }
    }

    #[test]
    fn test_fan_out_order() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = KeyDispatcher::headless();
        dispatcher.add_listener(recorder("a", &log));
        dispatcher.add_listener(recorder("b", &log));

        dispatcher.handle_key_event(RawKeyEvent::press(65));

        assert_eq!(*log.lock(), vec![("a", "pressed"), ("b", "pressed")]);
    }

    #[test]
    fn test_duplicate_add_invoked_once() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = KeyDispatcher::headless();
        let x = recorder("x", &log);
        dispatcher.add_listener(Arc::clone(&x));
        dispatcher.add_listener(Arc::clone(&x));
        assert_eq!(dispatcher.listener_count(), 1);

        dispatcher.handle_key_event(RawKeyEvent::release(65));
        assert_eq!(*log.lock(), vec![("x", "released")]);
    }

    #[test]
    fn test_remove_listener_idempotent() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = KeyDispatcher::headless();
        let x = recorder("x", &log);
        let y = recorder("y", &log);
        dispatcher.add_listener(Arc::clone(&x));

        dispatcher.remove_listener(&y);
        assert_eq!(dispatcher.listener_count(), 1);
        dispatcher.remove_listener(&x);
        dispatcher.remove_listener(&x);
        assert_eq!(dispatcher.listener_count(), 0);

        dispatcher.add_listener(x);
        dispatcher.add_listener(y);
        dispatcher.remove_all_listeners();
        assert_eq!(dispatcher.listener_count(), 0);
    }

    #[test]
    fn test_typed_records_character() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = KeyDispatcher::headless();
        dispatcher.add_listener(recorder("a", &log));

        dispatcher.handle_key_event(RawKeyEvent::typed('z'));

        assert_eq!(dispatcher.state().last_typed(), Some('z'));
        assert!(!dispatcher.state().is_any_pressed());
        assert_eq!(*log.lock(), vec![("a", "typed")]);
    }

    #[test]
    fn test_unknown_action_ignored() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = KeyDispatcher::headless();
        dispatcher.add_listener(recorder("a", &log));

        dispatcher.handle_key_event(RawKeyEvent::new(KeyAction::Other(42), 65, Some('a')));

        assert!(!dispatcher.state().is_any_pressed());
        assert_eq!(dispatcher.state().last_typed(), None);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_focus_clears_without_notifying() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = KeyDispatcher::headless();
        dispatcher.handle_key_event(RawKeyEvent::press(65));
        dispatcher.handle_key_event(RawKeyEvent::press(16));
        dispatcher.add_listener(recorder("a", &log));

        dispatcher.focus_gained();
        assert!(!dispatcher.state().is_any_pressed());

        dispatcher.handle_key_event(RawKeyEvent::press(17));
        dispatcher.focus_lost();
        assert!(!dispatcher.state().is_any_pressed());
        assert_eq!(*log.lock(), vec![("a", "pressed")]);
    }

    #[test]
    fn test_escape_override() {
        let host = Arc::new(CountingHost::default());
        let dispatcher = KeyDispatcher::new(host.clone());
        let escape = KeyCode(27);

        dispatcher.handle_key_event(RawKeyEvent::press(escape));
        assert_eq!(host.suppressed.load(Ordering::SeqCst), 0);
        dispatcher.handle_key_event(RawKeyEvent::release(escape));

        dispatcher.set_override_escape(true);
        assert!(dispatcher.is_overriding_escape());
        dispatcher.handle_key_event(RawKeyEvent::press(escape));
        assert_eq!(host.suppressed.load(Ordering::SeqCst), 1);
        assert!(dispatcher.state().is_pressed(ControlKey::Escape));

        dispatcher.handle_key_event(RawKeyEvent::press(65));
        assert_eq!(host.suppressed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panicking_listener_isolated() {
        let log = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = KeyDispatcher::headless();
        dispatcher.add_listener(
            FnListener::new()
                .on_pressed(|_| panic!("listener failure"))
                .into_handle(),
        );
        dispatcher.add_listener(recorder("after", &log));

        dispatcher.handle_key_event(RawKeyEvent::press(65));

        assert!(dispatcher.state().is_pressed(65));
        assert_eq!(*log.lock(), vec![("after", "pressed")]);
    }

    #[test]
    fn test_listener_sees_updated_state() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let dispatcher = KeyDispatcher::headless();
        let sink = Arc::clone(&seen);
        dispatcher.add_listener(
            FnListener::new()
                .on_pressed(move |keys| {
                    sink.lock()
                        .push(keys.is_modified_key_pressed(ModifierSet::SHIFT, 'a'))
                })
                .into_handle(),
        );

        dispatcher.handle_key_event(RawKeyEvent::press(16));
        dispatcher.handle_key_event(RawKeyEvent::press(65));

        assert_eq!(*seen.lock(), vec![false, true]);
    }
}
