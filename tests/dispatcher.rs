//! End-to-end tests for key tracking through the dispatcher

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::thread;

use parking_lot::Mutex;
use sketch_keys::input::{
    ControlKey, FnListener, FunctionKey, Key, KeyAction, KeyDispatcher, KeyHost, KeyListener,
    KeyState, ListenerHandle, ModifierSet, RawKeyEvent,
};

const A: i32 = 65;
const SHIFT: i32 = 16;
const CTRL: i32 = 17;
const ALT: i32 = 18;
const ESCAPE: i32 = 27;

#[derive(Default)]
struct CountingHost {
    suppressed: AtomicUsize,
}

impl KeyHost for CountingHost {
    fn suppress_pending_key(&self) {
        self.suppressed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Listener that records the last typed character it was shown
#[derive(Default)]
struct TypedEcho {
    seen: Mutex<String>,
}

impl KeyListener for TypedEcho {
    fn on_key_typed(&self, keys: &KeyState) {
        if let Some(c) = keys.last_typed() {
            self.seen.lock().push(c);
        }
    }
}

#[test]
fn test_shift_a_end_to_end() {
    let dispatcher = KeyDispatcher::headless();

    dispatcher.handle_key_event(RawKeyEvent::press(A));
    dispatcher.handle_key_event(RawKeyEvent::press(SHIFT));
    assert!(dispatcher.state().is_modified_key_pressed(ModifierSet::SHIFT, A));

    dispatcher.handle_key_event(RawKeyEvent::release(SHIFT));
    assert!(!dispatcher.state().is_modified_key_pressed(ModifierSet::SHIFT, A));
    assert!(dispatcher.state().is_modified_key_pressed(ModifierSet::NONE, A));
}

#[test]
fn test_raw_action_constants() {
    let dispatcher = KeyDispatcher::headless();

    dispatcher.handle_key_event(RawKeyEvent::new(KeyAction::PRESS, A, None));
    assert!(dispatcher.state().is_pressed(A));
    dispatcher.handle_key_event(RawKeyEvent::new(KeyAction::TYPE, 0, Some('a')));
    assert_eq!(dispatcher.state().last_typed(), Some('a'));
    dispatcher.handle_key_event(RawKeyEvent::new(KeyAction::RELEASE, A, None));
    assert!(!dispatcher.state().is_pressed(A));

    // Unknown host actions change nothing
    dispatcher.handle_key_event(RawKeyEvent::new(99, A, Some('b')));
    assert!(!dispatcher.state().is_any_pressed());
    assert_eq!(dispatcher.state().last_typed(), Some('a'));
}

#[test]
fn test_focus_gained_clears_held_keys() {
    let dispatcher = KeyDispatcher::headless();
    dispatcher.handle_key_event(RawKeyEvent::press(A));
    dispatcher.handle_key_event(RawKeyEvent::press(SHIFT));

    dispatcher.focus_gained();

    assert!(!dispatcher.state().is_any_pressed());
}

#[test]
fn test_release_while_unfocused_leaves_no_ghost() {
    let dispatcher = KeyDispatcher::headless();
    dispatcher.handle_key_event(RawKeyEvent::press(CTRL));
    dispatcher.focus_lost();
    // The release of CTRL happened in another window and is never delivered
    dispatcher.focus_gained();
    dispatcher.handle_key_event(RawKeyEvent::press(A));

    assert!(dispatcher.state().is_modified_key_pressed(ModifierSet::NONE, A));
}

#[test]
fn test_escape_override_suppresses_once() {
    let host = Arc::new(CountingHost::default());
    let dispatcher = KeyDispatcher::new(host.clone());
    dispatcher.set_override_escape(true);

    dispatcher.handle_key_event(RawKeyEvent::press(ESCAPE));

    assert_eq!(host.suppressed.load(Ordering::SeqCst), 1);
    assert!(dispatcher.state().is_pressed(ESCAPE));
    assert!(dispatcher.state().is_pressed(ControlKey::Escape));
}

#[test]
fn test_combination_table() {
    let dispatcher = KeyDispatcher::headless();
    let keys = dispatcher.state();

    dispatcher.handle_key_event(RawKeyEvent::press(CTRL));
    dispatcher.handle_key_event(RawKeyEvent::press(SHIFT));
    assert!(keys.is_modifier_exclusive(ModifierSet::CTRL_SHIFT));
    assert!(!keys.is_modifier_exclusive(ModifierSet::CTRL));

    dispatcher.handle_key_event(RawKeyEvent::press(ALT));
    assert!(keys.is_modifier_exclusive(ModifierSet::ALT_CTRL_SHIFT));
    assert!(!keys.is_modifier_exclusive(ModifierSet::CTRL_SHIFT));
    assert_eq!(keys.held_modifiers(), ModifierSet::ALT_CTRL_SHIFT);

    dispatcher.handle_key_event(RawKeyEvent::press(524));
    assert!(keys.is_modifier_exclusive(ModifierSet::ALT_CTRL_SHIFT_META));
}

#[test]
fn test_function_key_shortcut() {
    let dispatcher = KeyDispatcher::headless();
    dispatcher.handle_key_event(RawKeyEvent::press(ALT));
    dispatcher.handle_key_event(RawKeyEvent::press(115));

    assert!(dispatcher.state().is_modified_key_pressed(ModifierSet::ALT, FunctionKey::F4));
    assert!(dispatcher.state().is_modified_keys_pressed(
        ModifierSet::ALT,
        [Key::Function(FunctionKey::F4)]
    ));
    assert!(!dispatcher.state().is_modified_keys_pressed(
        ModifierSet::ALT,
        [Key::Function(FunctionKey::F4), Key::from('x')]
    ));
}

#[test]
fn test_typed_characters_reach_listener() {
    let dispatcher = KeyDispatcher::headless();
    let echo = Arc::new(TypedEcho::default());
    dispatcher.add_listener(echo.clone());

    for c in "hi!".chars() {
        dispatcher.handle_key_event(RawKeyEvent::typed(c));
    }

    assert_eq!(*echo.seen.lock(), "hi!");
}

#[test]
fn test_listener_can_unregister_itself() {
    let dispatcher = Arc::new(KeyDispatcher::headless());
    let calls = Arc::new(AtomicUsize::new(0));
    let slot: Arc<Mutex<Option<ListenerHandle>>> = Arc::new(Mutex::new(None));

    let listener = {
        let dispatcher = Arc::downgrade(&dispatcher);
        let calls = Arc::clone(&calls);
        let slot = Arc::clone(&slot);
        FnListener::new()
            .on_pressed(move |_| {
                calls.fetch_add(1, Ordering::SeqCst);
                if let (Some(dispatcher), Some(me)) = (dispatcher.upgrade(), slot.lock().take()) {
                    dispatcher.remove_listener(&me);
                }
            })
            .into_handle()
    };
    *slot.lock() = Some(Arc::clone(&listener));
    dispatcher.add_listener(listener);

    dispatcher.handle_key_event(RawKeyEvent::press(A));
    dispatcher.handle_key_event(RawKeyEvent::press(SHIFT));

    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(dispatcher.listener_count(), 0);
}

#[test]
fn test_concurrent_readers_see_whole_updates() {
    let dispatcher = Arc::new(KeyDispatcher::headless());
    let done = Arc::new(AtomicBool::new(false));

    let reader = {
        let dispatcher = Arc::clone(&dispatcher);
        let done = Arc::clone(&done);
        thread::spawn(move || {
            let mut observed = 0usize;
            loop {
                // Codes go down in ascending order and are cleared all at
                // once, so any snapshot holds exactly 1..=n
                let held: Vec<i32> = dispatcher
                    .state()
                    .pressed_codes()
                    .into_iter()
                    .map(|code| code.0)
                    .collect();
                let expected: Vec<i32> = (1..=held.len() as i32).collect();
                assert_eq!(held, expected);
                observed += 1;
                if done.load(Ordering::SeqCst) {
                    break;
                }
            }
            observed
        })
    };

    for _ in 0..200 {
        for code in 1..=40 {
            dispatcher.handle_key_event(RawKeyEvent::press(code));
        }
        dispatcher.focus_lost();
    }
    done.store(true, Ordering::SeqCst);

    let observed = reader.join().unwrap();
    assert!(observed > 0);
}

#[test]
fn test_listener_changes_during_fan_out_from_other_thread() {
    let dispatcher = Arc::new(KeyDispatcher::headless());
    let pressed = Arc::new(AtomicUsize::new(0));
    let counter = Arc::clone(&pressed);
    dispatcher.add_listener(
        FnListener::new()
            .on_pressed(move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .into_handle(),
    );

    let churn = {
        let dispatcher = Arc::clone(&dispatcher);
        thread::spawn(move || {
            for _ in 0..500 {
                let extra = FnListener::new().into_handle();
                dispatcher.add_listener(Arc::clone(&extra));
                dispatcher.remove_listener(&extra);
            }
        })
    };

    for _ in 0..500 {
        dispatcher.handle_key_event(RawKeyEvent::press(A));
        dispatcher.handle_key_event(RawKeyEvent::release(A));
    }
    churn.join().unwrap();

    assert_eq!(pressed.load(Ordering::SeqCst), 500);
    assert_eq!(dispatcher.listener_count(), 1);
}
