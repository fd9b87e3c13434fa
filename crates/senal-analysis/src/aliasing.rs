//! Aliasing demonstration: unit sines sampled on a coarse grid.
//!
//! Sampling `duration` seconds with `round(sampling * duration)` points
//! spaced evenly from 0 to `duration` (both included) gives an effective
//! rate of `(n - 1) / duration`. Tones that differ by a multiple of that
//! rate produce identical samples.

use senal_core::{Error, Result};

use crate::spectrum::linspace;
use std::f64::consts::PI;

/// Sampled superposition returned by [`frequencies_sum`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampledSum {
    /// Sample instants in seconds.
    pub time: Vec<f64>,
    /// Sum of `sin(2π f t)` over all requested frequencies.
    pub amplitude: Vec<f64>,
}

impl SampledSum {
    /// Number of samples.
    pub fn len(&self) -> usize {
        self.time.len()
    }

    /// Whether no samples were taken.
    pub fn is_empty(&self) -> bool {
        self.time.is_empty()
    }
}

/// Sums unit sines at `frequencies` over `linspace(0, duration, sampling * duration)`.
///
/// # Errors
///
/// - [`Error::InvalidFrequency`] for a negative or non-finite frequency or a
///   non-positive duration
/// - [`Error::InvalidRange`] when the grid rounds to zero samples
///
/// # Example
/// ```rust
/// use senal_analysis::frequencies_sum;
///
/// let sum = frequencies_sum(&[1.0, 3.0], 100, 1.0).unwrap();
/// assert_eq!(sum.len(), 100);
/// assert_eq!(sum.amplitude[0], 0.0);
/// ```
pub fn frequencies_sum(frequencies: &[f64], sampling: usize, duration: f64) -> Result<SampledSum> {
    if !(duration.is_finite() && duration > 0.0) {
        return Err(Error::invalid_frequency(
            duration,
            "duration must be positive and finite",
        ));
    }
    if let Some(&f) = frequencies.iter().find(|f| !(f.is_finite() && **f >= 0.0)) {
        return Err(Error::invalid_frequency(f, "frequency must be non-negative and finite"));
    }

    let count = (sampling as f64 * duration).round() as usize;
    if count == 0 {
        return Err(Error::InvalidRange(format!(
            "{sampling} Hz over {duration} s gives no samples"
        )));
    }

    let time = linspace(0.0, duration, count);
    let amplitude = time
        .iter()
        .map(|&t| frequencies.iter().map(|&f| (2.0 * PI * f * t).sin()).sum())
        .collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(
        tones = frequencies.len(),
        samples = count,
        duration,
        "aliasing grid"
    );

    Ok(SampledSum { time, amplitude })
}
