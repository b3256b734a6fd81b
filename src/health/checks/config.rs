//! Configuration system health check

use crate::config::AppConfig;
use crate::health::check::{CheckResult, CheckStatus, CheckSteps, SystemCheck};

/// Checks that configuration can be loaded for all profiles
pub struct ConfigCheck {
    profiles: Vec<&'static str>,
}

impl ConfigCheck {
    /// Creates a new config check with default profiles
    pub fn new() -> Self {
        Self {
            profiles: vec!["debug", "release"],
        }
    }

    /// Creates a config check with custom profiles
    pub fn with_profiles(profiles: Vec<&'static str>) -> Self {
        Self { profiles }
    }
}

impl Default for ConfigCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for ConfigCheck {
    fn name(&self) -> &'static str {
        "Configuration"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates configuration loading and key code tables")
    }

    fn check(&self) -> CheckResult {
        let mut steps = CheckSteps::new();
        let mut failed = 0;

        for profile in &self.profiles {
            match AppConfig::load(profile) {
                Ok(config) => steps.passed(format!(
                    "Profile '{}': escape override {}, shift = {}, escape = {}",
                    profile,
                    if config.keys.override_escape { "on" } else { "off" },
                    config.keys.codes.modifiers.shift,
                    config.keys.codes.escape()
                )),
                Err(e) => {
                    steps.failed(format!("Profile '{}': {}", profile, e));
                    failed += 1;
                }
            }
        }

        // APP_PROFILE may point at a profile that does not exist yet
        match AppConfig::load_from_env() {
            Ok(config) => steps.passed(format!(
                "Environment config: profile '{}' loaded",
                config.profile
            )),
            Err(e) => steps.warned(format!("Environment config: {}", e)),
        }

        let message = match steps.status() {
            CheckStatus::Fail => format!("{} config profile(s) failed to load", failed),
            CheckStatus::Warn => "Config loaded with warnings".to_string(),
            CheckStatus::Pass => format!("{} profiles validated", self.profiles.len()),
        };
        steps.finish(message)
    }
}
