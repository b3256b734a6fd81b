//! Listener trait for key notifications

use std::sync::Arc;

use super::state::KeyState;

/// Trait for objects that want to hear about key activity
///
/// Listeners are called in registration order, after the state has been
/// updated for the event. They get a read-only view of the state.
pub trait KeyListener: Send + Sync {
    /// A key went down
    fn on_key_pressed(&self, _keys: &KeyState) {
        // Default: no-op
    }

    /// A key came up
    fn on_key_released(&self, _keys: &KeyState) {
        // Default: no-op
    }

    /// A character was typed. See [`KeyState::last_typed`].
    fn on_key_typed(&self, _keys: &KeyState) {
        // Default: no-op
    }
}

/// Shared listener handle. Registration compares handles by identity.
pub type ListenerHandle = Arc<dyn KeyListener>;

/// Identity comparison that ignores vtable pointers
pub(crate) fn same_listener(a: &ListenerHandle, b: &ListenerHandle) -> bool {
    std::ptr::addr_eq(Arc::as_ptr(a), Arc::as_ptr(b))
}

/// Adapts three closures into a [`KeyListener`]
pub struct FnListener {
    pressed: Box<dyn Fn(&KeyState) + Send + Sync>,
    released: Box<dyn Fn(&KeyState) + Send + Sync>,
    typed: Box<dyn Fn(&KeyState) + Send + Sync>,
}

impl FnListener {
    /// Listener with every callback a no-op
    pub fn new() -> Self {
        Self {
            pressed: Box::new(|_| {}),
            released: Box::new(|_| {}),
            typed: Box::new(|_| {}),
        }
    }

    pub fn on_pressed(mut self, f: impl Fn(&KeyState) + Send + Sync + 'static) -> Self {
        self.pressed = Box::new(f);
        self
    }

    pub fn on_released(mut self, f: impl Fn(&KeyState) + Send + Sync + 'static) -> Self {
        self.released = Box::new(f);
        self
    }

    pub fn on_typed(mut self, f: impl Fn(&KeyState) + Send + Sync + 'static) -> Self {
        self.typed = Box::new(f);
        self
    }

    /// Wrap into a shareable handle
    pub fn into_handle(self) -> ListenerHandle {
        Arc::new(self)
    }
}

impl Default for FnListener {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyListener for FnListener {
    fn on_key_pressed(&self, keys: &KeyState) {
        (self.pressed)(keys)
    }

    fn on_key_released(&self, keys: &KeyState) {
        (self.released)(keys)
    }

    fn on_key_typed(&self, keys: &KeyState) {
        (self.typed)(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Quiet;
    impl KeyListener for Quiet {}

    #[test]
    fn test_identity_not_structure() {
        let a: ListenerHandle = Arc::new(Quiet);
        let b: ListenerHandle = Arc::new(Quiet);
        let a2 = Arc::clone(&a);
        assert!(same_listener(&a, &a2));
        assert!(!same_listener(&a, &b));
    }
}
