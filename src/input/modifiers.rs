//! Modifier combinations

use bitflags::bitflags;

use super::codes::Modifier;

bitflags! {
    /// A combination of held modifiers
    ///
    /// Each value is a four-flag truth table. A combination matches only when
    /// exactly its flags are held: `CTRL` does not match while Ctrl and Shift
    /// are both down.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ModifierSet: u8 {
        const ALT = 1 << 0;
        const CTRL = 1 << 1;
        const SHIFT = 1 << 2;
        /// Windows / Command / Super
        const META = 1 << 3;
    }
}

impl ModifierSet {
    pub const NONE: Self = Self::empty();

    pub const ALT_CTRL: Self = Self::ALT.union(Self::CTRL);
    pub const ALT_SHIFT: Self = Self::ALT.union(Self::SHIFT);
    pub const ALT_META: Self = Self::ALT.union(Self::META);
    pub const CTRL_SHIFT: Self = Self::CTRL.union(Self::SHIFT);
    pub const CTRL_META: Self = Self::CTRL.union(Self::META);
    pub const SHIFT_META: Self = Self::SHIFT.union(Self::META);

    pub const ALT_CTRL_SHIFT: Self = Self::ALT_CTRL.union(Self::SHIFT);
    pub const ALT_CTRL_META: Self = Self::ALT_CTRL.union(Self::META);
    pub const ALT_SHIFT_META: Self = Self::ALT_SHIFT.union(Self::META);
    pub const CTRL_SHIFT_META: Self = Self::CTRL_SHIFT.union(Self::META);

    pub const ALT_CTRL_SHIFT_META: Self = Self::all();

    /// Set containing a single modifier
    pub fn single(modifier: Modifier) -> Self {
        match modifier {
            Modifier::Alt => Self::ALT,
            Modifier::Ctrl => Self::CTRL,
            Modifier::Shift => Self::SHIFT,
            Modifier::Meta => Self::META,
        }
    }

    /// Build a set from four held/not-held flags
    pub fn from_held(alt: bool, ctrl: bool, shift: bool, meta: bool) -> Self {
        let mut set = Self::empty();
        set.set(Self::ALT, alt);
        set.set(Self::CTRL, ctrl);
        set.set(Self::SHIFT, shift);
        set.set(Self::META, meta);
        set
    }

    /// Exclusive match against what is actually held
    pub fn matches_exactly(self, held: ModifierSet) -> bool {
        self == held
    }

    /// Human-readable name, e.g. `CTRL+SHIFT` or `NONE`
    pub fn label(self) -> String {
        if self.is_empty() {
            return "NONE".to_string();
        }
        self.iter_names()
            .map(|(name, _)| name)
            .collect::<Vec<_>>()
            .join("+")
    }
}

impl From<Modifier> for ModifierSet {
    fn from(modifier: Modifier) -> Self {
        Self::single(modifier)
    }
}
