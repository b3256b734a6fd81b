//! Built-in health checks for core systems

pub mod build_info;
pub mod config;
pub mod dispatcher;

pub use build_info::BuildInfoCheck;
pub use config::ConfigCheck;
pub use dispatcher::DispatcherCheck;
