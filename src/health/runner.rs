//! Runner for orchestrating health checks

use std::time::Instant;

use tracing::debug;

use super::check::{CheckResult, CheckStatus, SystemCheck};

/// Results from running a health check suite
#[derive(Debug)]
pub struct HealthCheckReport {
    /// Individual check results with their system names
    pub results: Vec<(String, CheckResult)>,
    pub total: usize,
    pub passed: usize,
    pub warned: usize,
    pub failed: usize,
}

impl HealthCheckReport {
    fn from_results(results: Vec<(String, CheckResult)>) -> Self {
        let count = |status: CheckStatus| results.iter().filter(|(_, r)| r.status == status).count();
        let (passed, warned, failed) = (
            count(CheckStatus::Pass),
            count(CheckStatus::Warn),
            count(CheckStatus::Fail),
        );

        Self {
            total: results.len(),
            results,
            passed,
            warned,
            failed,
        }
    }

    /// Returns true if all checks passed (no failures)
    pub fn is_healthy(&self) -> bool {
        self.failed == 0
    }

    pub fn has_warnings(&self) -> bool {
        self.warned > 0
    }

    /// Returns the appropriate exit code for this report
    /// 0 = all pass, 1 = any fail, 2 = any warn (but no fail)
    pub fn exit_code(&self) -> i32 {
        if self.failed > 0 {
            1
        } else if self.warned > 0 {
            2
        } else {
            0
        }
    }
}

/// Orchestrates running health checks and collecting results
pub struct HealthCheckRunner {
    checks: Vec<Box<dyn SystemCheck>>,
}

impl HealthCheckRunner {
    /// Creates a new runner with no checks
    pub fn new() -> Self {
        Self { checks: Vec::new() }
    }

    /// Adds a check to the runner
    pub fn add_check<C: SystemCheck + 'static>(mut self, check: C) -> Self {
        self.checks.push(Box::new(check));
        self
    }

    /// Runs all registered checks in order and returns a report
    pub fn run(self) -> HealthCheckReport {
        let results = self
            .checks
            .into_iter()
            .map(|check| {
                let start = Instant::now();
                let result = check.check();
                let result = result.with_duration(start.elapsed());
                debug!(check = check.name(), status = ?result.status, "Health check finished");
                (check.name().to_string(), result)
            })
            .collect();

        HealthCheckReport::from_results(results)
    }
}

impl Default for HealthCheckRunner {
    fn default() -> Self {
        Self::new()
    }
}
