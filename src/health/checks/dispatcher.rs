//! Key dispatcher self-test

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::health::check::{CheckResult, CheckSteps, SystemCheck};
use crate::input::{
    ControlKey, FnListener, KeyCodes, KeyDispatcher, KeyHost, ModifierSet, RawKeyEvent,
};

/// Drives a synthetic key sequence through a fresh dispatcher
pub struct DispatcherCheck {
    codes: KeyCodes,
}

impl DispatcherCheck {
    /// Self-test with the default code table
    pub fn new() -> Self {
        Self::with_codes(KeyCodes::default())
    }

    /// Self-test with the code table a host will actually use
    pub fn with_codes(codes: KeyCodes) -> Self {
        Self { codes }
    }
}

impl Default for DispatcherCheck {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Default)]
struct CountingHost(AtomicUsize);

impl KeyHost for CountingHost {
    fn suppress_pending_key(&self) {
        self.0.fetch_add(1, Ordering::Relaxed);
    }
}

impl SystemCheck for DispatcherCheck {
    fn name(&self) -> &'static str {
        "Key Dispatcher"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates key tracking, modifier matching and listener fan-out")
    }

    fn check(&self) -> CheckResult {
        let mut steps = CheckSteps::new();

        let host = Arc::new(CountingHost::default());
        let dispatcher = KeyDispatcher::with_codes(host.clone(), self.codes);
        let notified = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&notified);
        dispatcher.add_listener(
            FnListener::new()
                .on_pressed(move |_| {
                    counter.fetch_add(1, Ordering::Relaxed);
                })
                .into_handle(),
        );

        let shift = self.codes.modifiers.shift;
        let ctrl = self.codes.modifiers.ctrl;
        let a = 'A' as i32;
        let keys = dispatcher.state();

        dispatcher.handle_key_event(RawKeyEvent::press(a));
        dispatcher.handle_key_event(RawKeyEvent::press(shift));
        if !steps.record(
            keys.is_modified_key_pressed(ModifierSet::SHIFT, a),
            "Shift+A detected",
        ) {
            return steps.fail("Modifier matching failed");
        }

        // Adding Ctrl breaks the pure-Shift match
        dispatcher.handle_key_event(RawKeyEvent::press(ctrl));
        if !steps.record(
            !keys.is_modifier_exclusive(ModifierSet::SHIFT)
                && keys.is_modifier_exclusive(ModifierSet::CTRL_SHIFT),
            "Exclusive modifier matching",
        ) {
            return steps.fail("Modifier matching failed");
        }

        dispatcher.handle_key_event(RawKeyEvent::release(shift));
        dispatcher.handle_key_event(RawKeyEvent::release(ctrl));
        if !steps.record(
            keys.is_modified_key_pressed(ModifierSet::NONE, a),
            "Releases tracked",
        ) {
            return steps.fail("Release tracking failed");
        }

        dispatcher.handle_key_event(RawKeyEvent::typed('a'));
        if !steps.record(keys.last_typed() == Some('a'), "Typed character recorded") {
            return steps.fail("Typed tracking failed");
        }

        dispatcher.focus_lost();
        if !steps.record(!keys.is_any_pressed(), "Focus loss clears held keys") {
            return steps.fail("Focus reset failed");
        }

        dispatcher.set_override_escape(true);
        dispatcher.handle_key_event(RawKeyEvent::press(self.codes.escape()));
        let suppressed = host.0.load(Ordering::Relaxed);
        if !steps.record(
            suppressed == 1 && keys.is_pressed(ControlKey::Escape),
            format!("Escape override suppressed {} time(s)", suppressed),
        ) {
            return steps.fail("Escape override failed");
        }

        // A, Shift, Ctrl, Escape
        let pressed_notifications = notified.load(Ordering::Relaxed);
        if pressed_notifications == 4 {
            steps.note(format!("Listener press notifications: {}", pressed_notifications));
            steps.finish("Key sequence handled")
        } else {
            let message = format!(
                "Expected 4 press notifications, saw {}",
                pressed_notifications
            );
            steps.warned(&message);
            steps.finish(message)
        }
    }
}
