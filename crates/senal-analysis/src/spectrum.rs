//! One-sided magnitude/phase spectra of real signals.

use senal_core::{Error, Result, Signal, Spectrum};

use crate::fft::{Fft, magnitude, phase_rad};

/// `count` evenly spaced values from `start` to `stop`, both included.
pub(crate) fn linspace(start: f64, stop: f64, count: usize) -> Vec<f64> {
    match count {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            values[count - 1] = stop;
            values
        }
    }
}

/// One-sided spectrum of `amplitudes`.
///
/// The DFT of all `N` samples is taken and the first `N / 2` bins are kept.
/// Magnitudes are divided by the number of kept bins, so a unit sine that
/// falls on a bin centre reads 1.0. Phases are `atan2(im, re)` in radians.
/// Bin `k` is labelled with its centre `k * sampling_rate / N`, so the axis
/// starts at 0 and stops one bin short of `sampling_rate / 2`.
///
/// # Errors
///
/// [`Error::EmptyInput`] for no samples and [`Error::InvalidFrequency`] for
/// a non-positive sampling rate.
///
/// # Example
/// ```rust
/// use senal_analysis::fft_spectrum;
///
/// let fs = 1024.0;
/// let x: Vec<f64> = (0..1024)
///     .map(|i| (2.0 * std::f64::consts::PI * 64.0 * i as f64 / fs).sin())
///     .collect();
/// let spectrum = fft_spectrum(&x, fs).unwrap();
///
/// assert_eq!(spectrum.len(), 512);
/// assert!((spectrum.magnitude[64] - 1.0).abs() < 1e-9);
/// ```
pub fn fft_spectrum(amplitudes: &[f64], sampling_rate: f64) -> Result<Spectrum> {
    if amplitudes.is_empty() {
        return Err(Error::EmptyInput("fft_spectrum"));
    }
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(Error::invalid_frequency(
            sampling_rate,
            "sampling rate must be positive and finite",
        ));
    }

    let n = amplitudes.len();
    let fft = Fft::new(n);
    let mut bins = fft.forward(amplitudes);
    bins.truncate(n / 2);

    let kept = bins.len();
    let scale = if kept == 0 { 1.0 } else { 1.0 / kept as f64 };
    let magnitude: Vec<f64> = magnitude(&bins).into_iter().map(|m| m * scale).collect();
    let phase = phase_rad(&bins);
    let resolution = sampling_rate / n as f64;
    let frequencies: Vec<f64> = (0..kept).map(|k| k as f64 * resolution).collect();

    #[cfg(feature = "tracing")]
    tracing::debug!(samples = n, bins = kept, sampling_rate, "fft spectrum");

    Ok(Spectrum {
        frequencies,
        magnitude,
        phase,
    })
}

/// Returns `signal` with its spectral arrays replaced by its FFT spectrum.
pub fn analyze(signal: Signal, sampling_rate: f64) -> Result<Signal> {
    let spectrum = fft_spectrum(&signal.amplitude_array, sampling_rate)?;
    Ok(signal.with_spectrum(spectrum))
}

/// Frequency of the strongest non-DC component, if any.
pub fn peak_frequency(spectrum: &Spectrum) -> Option<f64> {
    spectrum
        .magnitude
        .iter()
        .enumerate()
        .skip(1)
        .max_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(i, _)| spectrum.frequencies[i])
}
