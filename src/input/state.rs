//! Pressed-key state

use std::collections::HashSet;

use parking_lot::RwLock;

use super::codes::{Key, KeyCode, KeyCodes, Modifier};
use super::modifiers::ModifierSet;

/// Owned, point-in-time copy of the keyboard state
///
/// All queries live here; [`KeyState`] evaluates them against its guarded
/// copy so a composite query never sees a half-applied update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeySnapshot {
    pressed: HashSet<KeyCode>,
    last_typed: Option<char>,
    codes: KeyCodes,
}

impl KeySnapshot {
    /// Creates an empty snapshot resolving named keys through `codes`
    pub fn new(codes: KeyCodes) -> Self {
        Self {
            pressed: HashSet::new(),
            last_typed: None,
            codes,
        }
    }

    pub fn is_any_pressed(&self) -> bool {
        !self.pressed.is_empty()
    }

    pub fn is_pressed(&self, key: impl Into<Key>) -> bool {
        if !self.is_any_pressed() {
            return false;
        }
        self.pressed.contains(&self.codes.resolve(key.into()))
    }

    /// True when something is held and every key in `keys` is held
    ///
    /// An empty `keys` is vacuously satisfied as long as any key is down.
    pub fn are_all_pressed<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        self.is_any_pressed() && keys.into_iter().all(|key| self.is_pressed(key))
    }

    /// The modifiers currently held, as a truth table
    pub fn held_modifiers(&self) -> ModifierSet {
        Modifier::ALL
            .into_iter()
            .filter(|&m| self.is_pressed(m))
            .fold(ModifierSet::empty(), |set, m| set | ModifierSet::single(m))
    }

    /// True when exactly the modifiers in `combo` are held and no others
    pub fn is_modifier_exclusive(&self, combo: ModifierSet) -> bool {
        combo.matches_exactly(self.held_modifiers())
    }

    pub fn is_modified_key_pressed(&self, combo: ModifierSet, key: impl Into<Key>) -> bool {
        self.is_modifier_exclusive(combo) && self.is_pressed(key)
    }

    pub fn is_modified_keys_pressed<I>(&self, combo: ModifierSet, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        self.is_any_pressed() && self.is_modifier_exclusive(combo) && self.are_all_pressed(keys)
    }

    /// Last typed character, `None` until something is typed
    pub fn last_typed(&self) -> Option<char> {
        self.last_typed
    }

    /// Held codes in ascending order
    pub fn pressed_codes(&self) -> Vec<KeyCode> {
        let mut codes: Vec<KeyCode> = self.pressed.iter().copied().collect();
        codes.sort_unstable();
        codes
    }

    pub fn codes(&self) -> &KeyCodes {
        &self.codes
    }

    fn mark_pressed(&mut self, code: KeyCode) -> bool {
        self.pressed.insert(code)
    }

    fn mark_released(&mut self, code: KeyCode) -> bool {
        self.pressed.remove(&code)
    }

    fn clear(&mut self) -> bool {
        if self.pressed.is_empty() {
            return false;
        }
        self.pressed.clear();
        true
    }
}

/// Keyboard state shared between the event path and application code
///
/// Listeners and application code only get `&KeyState`, which exposes no
/// public mutators. Every call takes the internal lock once. The code table
/// lives inside the guarded snapshot and is never replaced.
#[derive(Debug, Default)]
pub struct KeyState {
    inner: RwLock<KeySnapshot>,
}

impl KeyState {
    /// Creates an empty state with the given code table
    pub fn new(codes: KeyCodes) -> Self {
        Self {
            inner: RwLock::new(KeySnapshot::new(codes)),
        }
    }

    /// Consistent copy of the current state
    pub fn snapshot(&self) -> KeySnapshot {
        self.inner.read().clone()
    }

    pub fn is_any_pressed(&self) -> bool {
        self.inner.read().is_any_pressed()
    }

    pub fn is_pressed(&self, key: impl Into<Key>) -> bool {
        self.inner.read().is_pressed(key)
    }

    /// See [`KeySnapshot::are_all_pressed`]
    pub fn are_all_pressed<I>(&self, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        self.inner.read().are_all_pressed(keys)
    }

    pub fn held_modifiers(&self) -> ModifierSet {
        self.inner.read().held_modifiers()
    }

    pub fn is_modifier_exclusive(&self, combo: ModifierSet) -> bool {
        self.inner.read().is_modifier_exclusive(combo)
    }

    pub fn is_modified_key_pressed(&self, combo: ModifierSet, key: impl Into<Key>) -> bool {
        self.inner.read().is_modified_key_pressed(combo, key)
    }

    pub fn is_modified_keys_pressed<I>(&self, combo: ModifierSet, keys: I) -> bool
    where
        I: IntoIterator,
        I::Item: Into<Key>,
    {
        self.inner.read().is_modified_keys_pressed(combo, keys)
    }

    pub fn last_typed(&self) -> Option<char> {
        self.inner.read().last_typed()
    }

    pub fn pressed_codes(&self) -> Vec<KeyCode> {
        self.inner.read().pressed_codes()
    }

    pub fn codes(&self) -> KeyCodes {
        *self.inner.read().codes()
    }

    /// Releases every held key. No-op when nothing is held.
    pub fn clear(&self) {
        if !self.is_any_pressed() {
            return;
        }
        self.inner.write().clear();
    }

    /// Returns true when the key was not already held
    pub(crate) fn mark_pressed(&self, code: KeyCode) -> bool {
        self.inner.write().mark_pressed(code)
    }

    /// Returns true when the key was held
    pub(crate) fn mark_released(&self, code: KeyCode) -> bool {
        self.inner.write().mark_released(code)
    }

    pub(crate) fn record_typed(&self, c: char) {
        self.inner.write().last_typed = Some(c);
    }
}
