//! Sketch Keys
//!
//! Keyboard state tracking for sketch hosts: which keys are held, exclusive
//! modifier-combination queries, the last typed character, and listener
//! notifications on every change.

/// Demo host application - windowing and key logging
pub mod app;

/// Build-time information and library version strings
pub mod build_info;

/// Layered configuration (profile files and environment)
pub mod config;

/// Health checks for configuration and the key pipeline
pub mod health;

/// Key state, modifier matching and listener dispatch
pub mod input;

pub use build_info::{library_info, print_library_info, version, version_raw};
pub use input::{KeyDispatcher, KeyListener, KeyState, ModifierSet, RawKeyEvent};
