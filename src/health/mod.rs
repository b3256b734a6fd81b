//! Health checks for validating configuration and the key pipeline
//!
//! Useful for:
//! - Validating a host's key code table before a sketch starts
//! - CI health checks
//! - Debugging why a key combination is never reported
//!
//! # Example
//!
//! ```no_run
//! use sketch_keys::health::{HealthCheckRunner, checks::*};
//!
//! let report = HealthCheckRunner::new()
//!     .add_check(ConfigCheck::new())
//!     .add_check(DispatcherCheck::new())
//!     .run();
//!
//! if report.is_healthy() {
//!     println!("All systems operational!");
//! }
//! ```

pub mod check;
pub mod checks;
pub mod reporter;
pub mod runner;

pub use check::{CheckResult, CheckStatus, CheckSteps, SystemCheck};
pub use reporter::{format_report, print_report};
pub use runner::{HealthCheckReport, HealthCheckRunner};

/// Runs all default health checks and returns a report
pub fn run_all_checks() -> HealthCheckReport {
    HealthCheckRunner::new()
        .add_check(checks::ConfigCheck::new())
        .add_check(checks::BuildInfoCheck::new())
        .add_check(checks::DispatcherCheck::new())
        .run()
}
