//! Settings file format and operations.

use serde::{Deserialize, Serialize};
use std::path::Path;

use senal_analysis::{
    BandpassOptions, DEFAULT_FREQ_POINTS, DEFAULT_ORDER, FilterBankOptions, OCTAVE_RATIO_BASE_2,
    P_REF, REFERENCE_FREQUENCY,
};
use senal_core::NoiseSource;

use crate::error::ConfigError;

/// Settings for signal generation and analysis.
///
/// Every field has a default, so an empty file or a file with only some
/// keys is valid.
///
/// # TOML Format
///
/// ```toml
/// [generator]
/// sampling_rate = 320000.0
/// closed_interval = false
/// seed = 42
///
/// [analysis]
/// p_ref = 2e-5
/// bandwidth_fraction = 3
/// octave_ratio = 2.0
/// filter_order = 3
/// freq_points = 5120
/// reference_frequency = 1000.0
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Settings {
    /// Signal synthesis parameters.
    #[serde(default)]
    pub generator: GeneratorSettings,

    /// Spectral and filter-bank parameters.
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// `[generator]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GeneratorSettings {
    /// Sampling rate in Hz.
    #[serde(default = "default_sampling_rate")]
    pub sampling_rate: f64,

    /// Whether shared domains include the period endpoint.
    #[serde(default)]
    pub closed_interval: bool,

    /// Noise seed; unset draws from the operating system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// `[analysis]` section.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisSettings {
    /// Reference pressure for SPL in pascal.
    #[serde(default = "default_p_ref")]
    pub p_ref: f64,

    /// `b` in a `1/b`-octave system.
    #[serde(default = "default_bandwidth_fraction")]
    pub bandwidth_fraction: u32,

    /// Octave ratio `G`.
    #[serde(default = "default_octave_ratio")]
    pub octave_ratio: f64,

    /// Butterworth order of each band-pass.
    #[serde(default = "default_filter_order")]
    pub filter_order: usize,

    /// Frequency-response points of a single band design.
    #[serde(default = "default_freq_points")]
    pub freq_points: usize,

    /// Centre of band 0 in Hz.
    #[serde(default = "default_reference_frequency")]
    pub reference_frequency: f64,
}

fn default_sampling_rate() -> f64 {
    320_000.0
}

fn default_p_ref() -> f64 {
    P_REF
}

fn default_bandwidth_fraction() -> u32 {
    1
}

fn default_octave_ratio() -> f64 {
    OCTAVE_RATIO_BASE_2
}

fn default_filter_order() -> usize {
    DEFAULT_ORDER
}

fn default_freq_points() -> usize {
    DEFAULT_FREQ_POINTS
}

fn default_reference_frequency() -> f64 {
    REFERENCE_FREQUENCY
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            sampling_rate: default_sampling_rate(),
            closed_interval: false,
            seed: None,
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            p_ref: default_p_ref(),
            bandwidth_fraction: default_bandwidth_fraction(),
            octave_ratio: default_octave_ratio(),
            filter_order: default_filter_order(),
            freq_points: default_freq_points(),
            reference_frequency: default_reference_frequency(),
        }
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            field,
            format!("{value} must be positive and finite"),
        ))
    }
}

impl GeneratorSettings {
    /// Noise source for this configuration: seeded when `seed` is set.
    pub fn noise_source(&self) -> NoiseSource {
        match self.seed {
            Some(seed) => NoiseSource::from_seed(seed),
            None => NoiseSource::from_entropy(),
        }
    }
}

impl AnalysisSettings {
    /// Options for a single band-pass design.
    pub fn bandpass_options(&self) -> BandpassOptions {
        BandpassOptions {
            bandwidth_fraction: self.bandwidth_fraction,
            octave_ratio: self.octave_ratio,
            order: self.filter_order,
            freq_points: self.freq_points,
            reference_frequency: self.reference_frequency,
        }
    }

    /// Options for a filter bank.
    pub fn filter_bank_options(&self) -> FilterBankOptions {
        FilterBankOptions {
            p_ref: self.p_ref,
            bandwidth_fraction: self.bandwidth_fraction,
            octave_ratio: self.octave_ratio,
            order: self.filter_order,
            reference_frequency: self.reference_frequency,
        }
    }
}

impl Settings {
    /// Load settings from a TOML file and validate them.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::read_file(path, e))?;
        Self::from_toml(&content)
    }

    /// Parse settings from a TOML string and validate them.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let settings: Settings = toml::from_str(toml_str)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Save the settings to a TOML file, creating parent directories.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();

        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::create_dir(parent, e))?;
        }

        let content = self.to_toml()?;
        std::fs::write(path, content).map_err(|e| ConfigError::write_file(path, e))?;
        Ok(())
    }

    /// Convert the settings to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check every value against its valid range.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let g = &self.generator;
        let a = &self.analysis;

        positive("generator.sampling_rate", g.sampling_rate)?;
        positive("analysis.p_ref", a.p_ref)?;
        positive("analysis.reference_frequency", a.reference_frequency)?;

        if a.bandwidth_fraction == 0 {
            return Err(ConfigError::invalid(
                "analysis.bandwidth_fraction",
                "must be at least 1",
            ));
        }
        if !(a.octave_ratio.is_finite() && a.octave_ratio > 1.0) {
            return Err(ConfigError::invalid(
                "analysis.octave_ratio",
                format!("{} must be finite and greater than 1", a.octave_ratio),
            ));
        }
        if a.filter_order == 0 {
            return Err(ConfigError::invalid(
                "analysis.filter_order",
                "must be at least 1",
            ));
        }
        if a.freq_points == 0 {
            return Err(ConfigError::invalid(
                "analysis.freq_points",
                "must be at least 1",
            ));
        }
        Ok(())
    }
}
