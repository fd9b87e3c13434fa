//! Senal Core - signal synthesis and superposition
//!
//! This crate builds sampled test signals from closed-form definitions and
//! combines them. Everything is offline and finite: each operation takes
//! and returns plain `Vec<f64>` arrays.
//!
//! # Building Blocks
//!
//! ## Domains
//!
//! - [`build_sample_index_array`] - integer sample indices for discrete signals
//! - [`build_time_array_by_step`] - one period stepped at `1 / fs`
//! - [`build_time_array_by_count`] - one period with an exact sample count
//!
//! ## Waveforms
//!
//! - [`sinewave`], [`unit_impulse`], [`unit_step`]
//! - [`square_pulse`], [`triangular_pulse`]
//! - [`gaussian_noise`] driven by a seedable [`NoiseSource`]
//!
//! ## Signals
//!
//! - [`Signal`] - waveform plus spectral descriptors and a label
//! - [`sum_signals`] - superposition over the least common period
//! - [`extend_to_lowest`] - align signals to the slowest period
//!
//! ## Utilities
//!
//! - [`round_to_significant_digits`], [`closest_to_average`],
//!   [`generalized_mean`], [`pretty_frequency`]
//!
//! # Example
//!
//! ```rust
//! use senal_core::{Signal, sum_signals};
//!
//! let low = Signal::sinewave(100.0, 1.0, 0.0, 48000.0, None)?;
//! let high = Signal::sinewave(300.0, 1.0, 0.0, 48000.0, None)?;
//! let sum = sum_signals(&[low, high])?;
//!
//! assert_eq!(sum.fundamental_frequency, 100.0);
//! assert_eq!(sum.time_array.len(), 480);
//! # Ok::<(), senal_core::Error>(())
//! ```
//!
//! # Logging
//!
//! Enable the `tracing` feature to get `debug` events for domain sizes,
//! extensions and combination periods.

pub mod combine;
pub mod domain;
pub mod error;
pub mod numeric;
pub mod signal;
pub mod waveform;

pub use combine::{
    MAX_COMBINED_SAMPLES, combination_period, extend_to_lowest, frequency_gcd, lowest_frequency,
    sum_signals,
};
pub use domain::{build_sample_index_array, build_time_array_by_count, build_time_array_by_step};
pub use error::{Error, Result};
pub use numeric::{
    closest_to_average, generalized_mean, pretty_frequency, round_array,
    round_to_significant_digits,
};
pub use signal::{Signal, Spectrum, sinewave_family};
pub use waveform::{
    NoiseSource, gaussian_noise, sinewave, square_pulse, triangular_pulse, unit_impulse, unit_step,
};
