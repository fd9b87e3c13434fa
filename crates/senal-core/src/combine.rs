//! Superposition of signals over their least common period.
//!
//! Signals with commensurate fundamentals repeat together every
//! `1 / gcd(f_1, ..., f_n)` seconds. [`sum_signals`] extends every input to
//! that period by tiling its own samples and then adds them point by point.

use crate::error::{Error, Result, ensure_positive};
use crate::numeric::gcd_u64;
use crate::signal::Signal;

/// Largest number of samples a combined or extended signal may hold.
pub const MAX_COMBINED_SAMPLES: usize = 1 << 24;

/// Highest decimal scale tried when searching for an integer gcd.
const MAX_DECIMALS: i32 = 6;

/// Distance from an integer below which a scaled frequency counts as whole.
const INTEGER_TOLERANCE: f64 = 1e-6;

/// Relative tolerance when comparing the sample steps of two signals.
const STEP_TOLERANCE: f64 = 1e-9;

/// Greatest common divisor of a set of frequencies.
///
/// Frequencies are scaled by the smallest power of ten (up to `10^6`) that
/// makes all of them integers, the integer gcd is taken, and the result is
/// scaled back. At the last scale the values are rounded. A single
/// frequency is its own gcd.
///
/// # Errors
///
/// [`Error::EmptyInput`] for no frequencies, [`Error::InvalidFrequency`]
/// when any of them is not positive and finite, and
/// [`Error::IncompatibleSignals`] when one rounds to zero at the finest scale.
///
/// # Example
/// ```rust
/// use senal_core::frequency_gcd;
///
/// assert_eq!(frequency_gcd(&[200.0, 500.0]).unwrap(), 100.0);
/// assert!((frequency_gcd(&[0.5, 1.25]).unwrap() - 0.25).abs() < 1e-12);
/// ```
pub fn frequency_gcd(frequencies: &[f64]) -> Result<f64> {
    if frequencies.is_empty() {
        return Err(Error::EmptyInput("frequency_gcd"));
    }
    for &f in frequencies {
        ensure_positive(f, "frequency")?;
    }
    if let [single] = frequencies {
        return Ok(*single);
    }

    let decimals = (0..MAX_DECIMALS)
        .find(|&d| {
            let scale = 10f64.powi(d);
            frequencies.iter().all(|&f| {
                let scaled = f * scale;
                (scaled - scaled.round()).abs() < INTEGER_TOLERANCE
            })
        })
        .unwrap_or(MAX_DECIMALS);

    let scale = 10f64.powi(decimals);
    let scaled: Vec<u64> = frequencies
        .iter()
        .map(|&f| (f * scale).round() as u64)
        .collect();
    if let Some(i) = scaled.iter().position(|&n| n == 0) {
        return Err(Error::IncompatibleSignals(format!(
            "{} Hz is below the 1e-{MAX_DECIMALS} Hz resolution of the common divisor",
            frequencies[i]
        )));
    }
    let gcd = scaled.into_iter().fold(0, gcd_u64);

    Ok(gcd as f64 / scale)
}

/// Period after which all `frequencies` line up again: `1 / gcd`.
///
/// # Example
/// ```rust
/// use senal_core::combination_period;
///
/// assert!((combination_period(&[200.0, 500.0]).unwrap() - 0.01).abs() < 1e-15);
/// ```
pub fn combination_period(frequencies: &[f64]) -> Result<f64> {
    Ok(1.0 / frequency_gcd(frequencies)?)
}

/// Lowest fundamental frequency among `signals`.
pub fn lowest_frequency(signals: &[Signal]) -> Result<f64> {
    signals
        .iter()
        .map(|s| s.fundamental_frequency)
        .reduce(f64::min)
        .ok_or(Error::EmptyInput("lowest_frequency"))
}

/// Copies of `signals`, each extended to one period of the slowest.
pub fn extend_to_lowest(signals: &[Signal]) -> Result<Vec<Signal>> {
    let lowest = lowest_frequency(signals)?;
    ensure_positive(lowest, "fundamental frequency")?;
    let duration = 1.0 / lowest;
    signals.iter().map(|s| s.extended(duration)).collect()
}

/// Superposes `signals` over their combination period.
///
/// Every input is extended (on a copy) to `1 / gcd` of the fundamentals and
/// the amplitudes are added sample by sample. The result takes its domain
/// and fundamental amplitude/phase from the first input, its fundamental
/// frequency is the gcd, and its description is `"sum"`. The spectral
/// components of all inputs are concatenated and ordered by descending
/// frequency; equal frequencies keep their input order.
///
/// A single input is returned as an unchanged copy.
///
/// # Errors
///
/// - [`Error::EmptyInput`] for no signals
/// - [`Error::InvalidFrequency`] for a non-positive fundamental
/// - [`Error::IncompatibleSignals`] when the extended signals differ in
///   length or sample step, or the period needs more than
///   [`MAX_COMBINED_SAMPLES`] samples
///
/// # Example
/// ```rust
/// use senal_core::{Signal, sum_signals};
///
/// let a = Signal::sinewave(100.0, 1.0, 0.0, 48000.0, None).unwrap();
/// let b = Signal::sinewave(300.0, 0.5, 0.0, 48000.0, None).unwrap();
/// let sum = sum_signals(&[a, b]).unwrap();
///
/// assert_eq!(sum.fundamental_frequency, 100.0);
/// assert_eq!(sum.frequency_array, vec![300.0, 100.0]);
/// ```
pub fn sum_signals(signals: &[Signal]) -> Result<Signal> {
    let (first, rest) = signals
        .split_first()
        .ok_or(Error::EmptyInput("sum_signals"))?;
    for s in signals {
        ensure_positive(s.fundamental_frequency, "fundamental frequency")?;
    }
    if rest.is_empty() {
        return Ok(first.clone());
    }

    let frequencies: Vec<f64> = signals.iter().map(|s| s.fundamental_frequency).collect();
    let gcd = frequency_gcd(&frequencies)?;
    let period = 1.0 / gcd;

    #[cfg(feature = "tracing")]
    tracing::debug!(count = signals.len(), gcd, period, "summing signals");

    let extended: Vec<Signal> = signals
        .iter()
        .map(|s| s.extended(period))
        .collect::<Result<_>>()?;

    let mut out = extended[0].clone();
    let step = out.sample_step()?;
    for other in &extended[1..] {
        if other.len() != out.len() {
            return Err(Error::IncompatibleSignals(format!(
                "'{}' spans {} samples over {period} s, '{}' spans {}",
                out.description,
                out.len(),
                other.description,
                other.len()
            )));
        }
        let other_step = other.sample_step()?;
        if (other_step - step).abs() > STEP_TOLERANCE * step.abs() {
            return Err(Error::IncompatibleSignals(format!(
                "'{}' is sampled every {step} s, '{}' every {other_step} s",
                out.description, other.description
            )));
        }
        for (acc, &v) in out.amplitude_array.iter_mut().zip(&other.amplitude_array) {
            *acc += v;
        }
    }

    let mut components: Vec<(f64, f64, f64)> = signals
        .iter()
        .flat_map(|s| {
            s.frequency_array
                .iter()
                .zip(&s.magnitude_array)
                .zip(&s.phase_array)
                .map(|((&f, &m), &p)| (f, m, p))
        })
        .collect();
    components.sort_by(|a, b| b.0.total_cmp(&a.0));

    out.frequency_array = components.iter().map(|c| c.0).collect();
    out.magnitude_array = components.iter().map(|c| c.1).collect();
    out.phase_array = components.iter().map(|c| c.2).collect();
    out.fundamental_frequency = gcd;
    out.description = "sum".to_owned();

    Ok(out)
}
