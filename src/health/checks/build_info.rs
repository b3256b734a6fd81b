//! Build information health check

use crate::build_info;
use crate::health::check::{CheckResult, SystemCheck};

/// Checks that build and version metadata are accessible
pub struct BuildInfoCheck;

impl BuildInfoCheck {
    pub fn new() -> Self {
        Self
    }
}

impl Default for BuildInfoCheck {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemCheck for BuildInfoCheck {
    fn name(&self) -> &'static str {
        "Build Info"
    }

    fn description(&self) -> Option<&'static str> {
        Some("Validates library version and build metadata (rustc, timestamps)")
    }

    fn check(&self) -> CheckResult {
        let details = [
            format!("  Library: {}", build_info::library_info()),
            format!("  Version (raw): {}", build_info::version_raw()),
            format!("  Build time: {}", build_info::BUILD_TIMESTAMP),
            format!(
                "  Rustc: {} ({})",
                build_info::RUSTC_SEMVER,
                build_info::RUSTC_CHANNEL
            ),
            format!("  Target: {}", build_info::version_string()),
        ]
        .join("\n");

        if build_info::version_raw() == 0 {
            return CheckResult::warn("Library version is 0.0.0").with_details(details);
        }

        CheckResult::pass(format!("{} {}", build_info::NAME, build_info::version()))
            .with_details(details)
    }
}
