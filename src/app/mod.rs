//! Demo host application
//!
//! A winit window whose keyboard and focus events drive a key dispatcher.

mod logger;
mod runner;
mod window;

pub use logger::KeyLogger;
pub use runner::App;
pub use window::window_attributes_from_config;
