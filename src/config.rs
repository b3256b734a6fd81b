//! Application configuration
//!
//! Supports multiple profiles (debug, release) with different settings.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::input::{KeyCode, KeyCodes, Modifier};

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Two modifiers share a key code, which makes exclusive matching ambiguous
    #[error("key code {code} is assigned to both {first:?} and {second:?}")]
    DuplicateModifierCode {
        code: KeyCode,
        first: Modifier,
        second: Modifier,
    },
}

/// Window configuration for the demo host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: f64,
    /// Window height
    pub height: f64,
    /// Whether the window should be resizable
    pub resizable: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "Sketch Keys".to_string(),
            width: 640.0,
            height: 360.0,
            resizable: true,
        }
    }
}

/// Keyboard handling configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct KeysConfig {
    /// Hide escape presses from the host so escape does not quit
    pub override_escape: bool,
    /// Codes the host reports for named keys
    pub codes: KeyCodes,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LogConfig {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: "info".to_string(),
        }
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// The active profile (debug, release, etc.)
    pub profile: String,
    /// Window configuration
    #[serde(default)]
    pub window: WindowConfig,
    /// Keyboard configuration
    #[serde(default)]
    pub keys: KeysConfig,
    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

impl AppConfig {
    /// Loads configuration based on the specified profile
    ///
    /// Profiles are loaded from config files in the following order:
    /// 1. config/{profile}.toml (profile-specific configuration)
    /// 2. Environment variables with prefix APP_ (e.g., APP_KEYS__OVERRIDE_ESCAPE=true)
    ///
    /// Config files are searched for in:
    /// 1. Next to the executable (target/debug/config or target/release/config)
    /// 2. In the current directory (./config)
    pub fn load(profile: &str) -> Result<Self, ConfigError> {
        let config_dir = Self::find_config_dir().unwrap_or_else(|| PathBuf::from("config"));
        Self::load_from_dir(&config_dir, profile)
    }

    /// Loads a profile from an explicit config directory
    pub fn load_from_dir(dir: &Path, profile: &str) -> Result<Self, ConfigError> {
        Self::load_with_env(dir, profile, app_environment())
    }

    fn load_with_env(dir: &Path, profile: &str, env: Environment) -> Result<Self, ConfigError> {
        let profile_path = dir.join(profile);

        let config = Config::builder()
            .add_source(File::from(profile_path.as_path()).required(false))
            .add_source(env)
            .set_override("profile", profile)?
            .build()?;

        let config: Self = config.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Finds the config directory by searching in multiple locations
    fn find_config_dir() -> Option<PathBuf> {
        // Try to find config dir relative to executable
        if let Ok(exe_path) = std::env::current_exe()
            && let Some(exe_dir) = exe_path.parent()
        {
            let config_dir = exe_dir.join("config");
            if config_dir.exists() {
                return Some(config_dir);
            }
        }

        // Fall back to current directory
        let cwd_config = PathBuf::from("config");
        if cwd_config.exists() {
            return Some(cwd_config);
        }

        None
    }

    /// Loads configuration using the APP_PROFILE environment variable,
    /// defaulting to "release"
    pub fn load_from_env() -> Result<Self, ConfigError> {
        let profile = std::env::var("APP_PROFILE").unwrap_or_else(|_| "release".to_string());
        Self::load(&profile)
    }

    /// Rejects code tables where two modifiers share a code
    pub fn validate(&self) -> Result<(), ConfigError> {
        let codes = &self.keys.codes;
        for (i, &first) in Modifier::ALL.iter().enumerate() {
            for &second in &Modifier::ALL[i + 1..] {
                let code = codes.modifier_code(first);
                if code == codes.modifier_code(second) {
                    return Err(ConfigError::DuplicateModifierCode {
                        code,
                        first,
                        second,
                    });
                }
            }
        }
        Ok(())
    }

    /// Built-in settings used when no profile can be loaded
    pub fn builtin(profile: &str) -> Self {
        Self {
            profile: profile.to_string(),
            window: WindowConfig::default(),
            keys: KeysConfig::default(),
            log: LogConfig::default(),
        }
    }
}

/// Environment variables with the `APP_` prefix, `__` between nested fields
/// (e.g. `APP_WINDOW__WIDTH`)
fn app_environment() -> Environment {
    // The prefix separator defaults to the field separator, which would
    // make it `APP__`
    Environment::with_prefix("APP")
        .prefix_separator("_")
        .separator("__")
        .try_parsing(true)
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::load("release").unwrap_or_else(|_| Self::builtin("release"))
    }
}
