//! Settings for senal signal generation and analysis.
//!
//! Settings live in a TOML file with a `[generator]` and an `[analysis]`
//! section. Missing keys take their defaults and every loaded file is
//! validated before use.
//!
//! # Example
//!
//! ```rust
//! use senal_config::Settings;
//!
//! let settings = Settings::from_toml("[analysis]\nbandwidth_fraction = 3\n").unwrap();
//! assert_eq!(settings.generator.sampling_rate, 320_000.0);
//!
//! let options = settings.analysis.filter_bank_options();
//! assert_eq!(options.bandwidth_fraction, 3);
//! ```

mod error;
mod settings;

/// Platform-specific location of the settings file.
pub mod paths;

pub use error::ConfigError;
pub use paths::{default_settings_path, load_settings, user_config_dir};
pub use settings::{AnalysisSettings, GeneratorSettings, Settings};
