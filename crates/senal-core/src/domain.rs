//! Sample-domain builders.
//!
//! A domain is the x-axis of a signal: either integer sample indices for
//! discrete signals, or sample times in seconds spanning one period of a
//! periodic signal. Both are stored as `f64` so every [`Signal`](crate::Signal)
//! carries the same representation.

use crate::error::{Error, Result, ensure_positive};

/// Relative slack applied when counting samples from a floating-point span.
const COUNT_TOLERANCE: f64 = 1e-9;

/// Builds the integer sample indices `start..end` (or `start..=end` when
/// `closed`).
///
/// # Errors
///
/// [`Error::InvalidRange`] when `start >= end`.
///
/// # Example
/// ```rust
/// use senal_core::build_sample_index_array;
///
/// let idx = build_sample_index_array(-10, 10, true).unwrap();
/// assert_eq!(idx.len(), 21);
/// assert_eq!(idx[0], -10.0);
/// assert_eq!(idx[20], 10.0);
/// ```
pub fn build_sample_index_array(start: i64, end: i64, closed: bool) -> Result<Vec<f64>> {
    if start >= end {
        return Err(Error::InvalidRange(format!(
            "start ({start}) must be smaller than end ({end})"
        )));
    }

    let stop = if closed { end + 1 } else { end };
    let samples: Vec<f64> = (start..stop).map(|i| i as f64).collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(start, end, closed, len = samples.len(), "sample index domain");

    Ok(samples)
}

/// Builds the sample times of one period of `frequency` by stepping
/// `1 / sampling_rate` from zero.
///
/// The span is `1 / frequency`, plus one extra step when `closed` so the
/// period endpoint is included. The count is `ceil(span * sampling_rate)`
/// with a tiny tolerance, so a span that is an exact multiple of the step
/// does not pick up a spurious sample from rounding noise.
///
/// # Errors
///
/// [`Error::InvalidFrequency`] for non-positive or non-finite inputs and
/// [`Error::InvalidRange`] when the span holds no sample.
pub fn build_time_array_by_step(
    frequency: f64,
    sampling_rate: f64,
    closed: bool,
) -> Result<Vec<f64>> {
    ensure_positive(frequency, "frequency")?;
    ensure_positive(sampling_rate, "sampling rate")?;

    let step = 1.0 / sampling_rate;
    let span = 1.0 / frequency + if closed { step } else { 0.0 };
    let count = samples_spanning(span * sampling_rate);

    if !count.is_finite() || count < 1.0 {
        return Err(Error::InvalidRange(format!(
            "a period of {frequency} Hz holds no sample at {sampling_rate} Hz"
        )));
    }

    let count = count as usize;
    let time: Vec<f64> = (0..count).map(|i| i as f64 * step).collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(frequency, sampling_rate, closed, len = count, "time domain by step");

    Ok(time)
}

/// Whole number of samples needed to cover `exact` sample steps.
///
/// Rounds up, ignoring overshoot below [`COUNT_TOLERANCE`].
pub(crate) fn samples_spanning(exact: f64) -> f64 {
    (exact - exact.abs() * COUNT_TOLERANCE).ceil()
}

/// Builds `round(sampling_rate / frequency)` evenly spaced sample times over
/// one period of `frequency`.
///
/// With `closed` the last sample sits exactly on the period (`1 / f`);
/// without it the spacing is `1 / (f * count)` and the endpoint is left out,
/// which makes the result tile seamlessly when repeated.
///
/// # Errors
///
/// [`Error::InvalidFrequency`] for non-positive or non-finite inputs and
/// [`Error::InvalidRange`] when `sampling_rate / frequency` rounds to zero.
///
/// # Example
/// ```rust
/// use senal_core::build_time_array_by_count;
///
/// let t = build_time_array_by_count(100.0, 1000.0, false).unwrap();
/// assert_eq!(t.len(), 10);
/// assert!((t[1] - 0.001).abs() < 1e-15);
/// ```
pub fn build_time_array_by_count(
    frequency: f64,
    sampling_rate: f64,
    closed: bool,
) -> Result<Vec<f64>> {
    ensure_positive(frequency, "frequency")?;
    ensure_positive(sampling_rate, "sampling rate")?;

    let count = (sampling_rate / frequency).round();
    if !count.is_finite() || count < 1.0 {
        return Err(Error::InvalidRange(format!(
            "{sampling_rate} Hz sampling gives no sample per period of {frequency} Hz"
        )));
    }

    let count = count as usize;
    let period = 1.0 / frequency;
    let divisions = if closed { count.saturating_sub(1) } else { count };

    let time: Vec<f64> = if divisions == 0 {
        vec![0.0]
    } else {
        let step = period / divisions as f64;
        (0..count).map(|i| i as f64 * step).collect()
    };

    #[cfg(feature = "tracing")]
    tracing::debug!(frequency, sampling_rate, closed, len = count, "time domain by count");

    Ok(time)
}
