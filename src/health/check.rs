//! Core health check trait and types

use std::time::Duration;

/// Status of a system check, ordered from best to worst
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckStatus {
    /// Check passed successfully
    Pass,
    /// Check passed with warnings
    Warn,
    /// Check failed
    Fail,
}

impl CheckStatus {
    /// Returns true if the check passed (Pass or Warn)
    pub fn is_ok(&self) -> bool {
        !self.is_fail()
    }

    pub fn is_fail(&self) -> bool {
        matches!(self, CheckStatus::Fail)
    }

    fn marker(&self) -> &'static str {
        match self {
            CheckStatus::Pass => "✓",
            CheckStatus::Warn => "⚠",
            CheckStatus::Fail => "✗",
        }
    }

    /// Returns the status as a colored string
    pub fn as_colored_str(&self) -> String {
        use colored::Colorize;
        match self {
            CheckStatus::Pass => "PASS".green().to_string(),
            CheckStatus::Warn => "WARN".yellow().to_string(),
            CheckStatus::Fail => "FAIL".red().to_string(),
        }
    }
}

/// Result of a system check
#[derive(Debug, Clone)]
pub struct CheckResult {
    pub status: CheckStatus,
    /// Brief message describing the result
    pub message: String,
    /// Optional detailed information, one line per step
    pub details: Option<String>,
    /// How long the check took
    pub duration: Duration,
}

impl CheckResult {
    fn with_status(status: CheckStatus, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: None,
            duration: Duration::ZERO,
        }
    }

    pub fn pass(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Pass, message)
    }

    pub fn warn(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Warn, message)
    }

    pub fn fail(message: impl Into<String>) -> Self {
        Self::with_status(CheckStatus::Fail, message)
    }

    /// Adds optional details to the result
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Sets the duration for this check
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }
}

/// Step-by-step record of a self-test
///
/// Each step becomes one marked line of the result's details, and the
/// result takes the worst status any step reported. Checks that drive a
/// key sequence stop at the first failed step with [`CheckSteps::fail`],
/// keeping the lines recorded so far.
#[derive(Debug, Clone)]
pub struct CheckSteps {
    lines: Vec<String>,
    status: CheckStatus,
}

impl CheckSteps {
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            status: CheckStatus::Pass,
        }
    }

    fn push(&mut self, status: CheckStatus, step: impl AsRef<str>) {
        self.lines.push(format!("  {} {}", status.marker(), step.as_ref()));
        self.status = self.status.max(status);
    }

    pub fn passed(&mut self, step: impl AsRef<str>) {
        self.push(CheckStatus::Pass, step);
    }

    pub fn warned(&mut self, step: impl AsRef<str>) {
        self.push(CheckStatus::Warn, step);
    }

    pub fn failed(&mut self, step: impl AsRef<str>) {
        self.push(CheckStatus::Fail, step);
    }

    /// Records `step` as passed or failed and returns `ok`
    pub fn record(&mut self, ok: bool, step: impl AsRef<str>) -> bool {
        if ok {
            self.passed(step);
        } else {
            self.failed(step);
        }
        ok
    }

    /// Adds an unmarked line
    pub fn note(&mut self, line: impl AsRef<str>) {
        self.lines.push(format!("  {}", line.as_ref()));
    }

    /// Worst status recorded so far
    pub fn status(&self) -> CheckStatus {
        self.status
    }

    /// Ends the check early as failed
    pub fn fail(self, message: impl Into<String>) -> CheckResult {
        CheckResult::fail(message).with_details(self.lines.join("\n"))
    }

    /// Ends the check with the worst recorded status
    pub fn finish(self, message: impl Into<String>) -> CheckResult {
        CheckResult::with_status(self.status, message).with_details(self.lines.join("\n"))
    }
}

impl Default for CheckSteps {
    fn default() -> Self {
        Self::new()
    }
}

/// Trait for system health checks
pub trait SystemCheck {
    /// Name of the system being checked
    fn name(&self) -> &'static str;

    /// Perform the health check
    fn check(&self) -> CheckResult;

    /// Optional description of what this check validates
    fn description(&self) -> Option<&'static str> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_steps_keep_worst_status() {
        let mut steps = CheckSteps::new();
        steps.passed("Shift+A detected");
        assert_eq!(steps.status(), CheckStatus::Pass);

        steps.warned("Escape override off");
        steps.passed("Releases tracked");
        assert_eq!(steps.status(), CheckStatus::Warn);

        let result = steps.finish("Key sequence handled");
        assert_eq!(result.status, CheckStatus::Warn);
        assert_eq!(
            result.details.as_deref(),
            Some("  ✓ Shift+A detected\n  ⚠ Escape override off\n  ✓ Releases tracked")
        );
    }

    #[test]
    fn test_record_marks_failed_step() {
        let mut steps = CheckSteps::new();
        assert!(steps.record(true, "Shift+A detected"));
        assert!(!steps.record(false, "Ctrl+Shift is exclusive"));
        steps.note("Listener press notifications: 2");
        assert!(steps.status().is_fail());

        let result = steps.fail("Modifier matching failed");
        assert_eq!(result.status, CheckStatus::Fail);
        assert_eq!(result.message, "Modifier matching failed");
        assert_eq!(
            result.details.as_deref(),
            Some(
                "  ✓ Shift+A detected\n  ✗ Ctrl+Shift is exclusive\n  Listener press notifications: 2"
            )
        );
    }

    #[test]
    fn test_fail_overrides_clean_steps() {
        let mut steps = CheckSteps::new();
        steps.passed("Typed character recorded");
        assert_eq!(steps.fail("Focus reset failed").status, CheckStatus::Fail);
    }
}
