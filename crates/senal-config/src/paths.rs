//! Platform-specific location of the settings file.
//!
//! - Linux: `~/.config/senal/settings.toml`
//! - macOS: `~/Library/Application Support/senal/settings.toml`
//! - Windows: `%APPDATA%\senal\settings.toml`

use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::settings::Settings;

/// Application name used for directory paths.
const APP_NAME: &str = "senal";

/// File name of the settings file.
const SETTINGS_FILE: &str = "settings.toml";

/// Returns the user-specific configuration directory.
///
/// Returns a fallback path if the config directory cannot be determined.
pub fn user_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Returns the default settings file path.
pub fn default_settings_path() -> PathBuf {
    user_config_dir().join(SETTINGS_FILE)
}

/// Resolve the settings to use.
///
/// An explicit path must exist and parse. Without one, the default settings
/// file is used when present, and built-in defaults otherwise.
pub fn load_settings(explicit: Option<&Path>) -> Result<Settings, ConfigError> {
    match explicit {
        Some(path) => Settings::load(path),
        None => {
            let path = default_settings_path();
            if path.is_file() {
                Settings::load(path)
            } else {
                Ok(Settings::default())
            }
        }
    }
}
