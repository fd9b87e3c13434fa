//! Impulse response measurement with exponential sine sweeps

use senal_core::{Error, Result};

use crate::fft::Fft;
use crate::spectrum::linspace;
use std::f64::consts::PI;

/// Exponential sine sweep from `start_freq` to `end_freq`
///
/// The instantaneous frequency rises exponentially, so each octave takes the
/// same time. Its time-reversed, decaying copy is the inverse filter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SineSweep {
    sampling_rate: f64,
    start_freq: f64,
    end_freq: f64,
    duration: f64,
}

impl SineSweep {
    /// Create a new sweep
    ///
    /// # Errors
    ///
    /// [`Error::InvalidFrequency`] unless every value is positive and finite
    /// and `start_freq < end_freq`.
    pub fn new(sampling_rate: f64, start_freq: f64, end_freq: f64, duration: f64) -> Result<Self> {
        check_sweep(duration, start_freq, end_freq)?;
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(Error::invalid_frequency(
                sampling_rate,
                "sampling rate must be positive and finite",
            ));
        }
        Ok(Self {
            sampling_rate,
            start_freq,
            end_freq,
            duration,
        })
    }

    /// Number of samples, `floor(duration * sampling_rate)`
    pub fn num_samples(&self) -> usize {
        (self.duration * self.sampling_rate) as usize
    }

    /// Sample times `i / sampling_rate`
    pub fn time_array(&self) -> Vec<f64> {
        (0..self.num_samples())
            .map(|i| i as f64 / self.sampling_rate)
            .collect()
    }

    /// Generate the sweep
    pub fn generate(&self) -> Vec<f64> {
        let rate = (self.end_freq / self.start_freq).ln();
        self.time_array()
            .into_iter()
            .map(|t| {
                let phase = 2.0 * PI * self.start_freq * self.duration / rate
                    * ((rate * t / self.duration).exp() - 1.0);
                phase.sin()
            })
            .collect()
    }

    /// Inverse filter of this sweep
    pub fn inverse_filter(&self) -> Result<Vec<f64>> {
        inverse_filter(
            &self.time_array(),
            &self.generate(),
            self.duration,
            self.start_freq,
            self.end_freq,
        )
    }

    /// Sweep duration in seconds
    pub fn duration(&self) -> f64 {
        self.duration
    }
}

fn check_sweep(duration: f64, start_freq: f64, end_freq: f64) -> Result<()> {
    for (value, what) in [
        (duration, "duration"),
        (start_freq, "start frequency"),
        (end_freq, "end frequency"),
    ] {
        if !(value.is_finite() && value > 0.0) {
            return Err(Error::invalid_frequency(
                value,
                format!("{what} must be positive and finite"),
            ));
        }
    }
    if start_freq >= end_freq {
        return Err(Error::invalid_frequency(
            end_freq,
            format!("sweep must rise: {start_freq} Hz to {end_freq} Hz"),
        ));
    }
    Ok(())
}

/// Inverse filter of an exponential sweep.
///
/// The sweep is time-reversed and weighted by `exp(-t / L)` with
/// `L = duration / ln(end_freq / start_freq)`, which compensates the extra
/// energy the sweep spends in the low octaves.
///
/// # Errors
///
/// [`Error::IncompatibleSignals`] when `time` and `sweep` differ in length,
/// and [`Error::InvalidFrequency`] for bad sweep parameters.
pub fn inverse_filter(
    time: &[f64],
    sweep: &[f64],
    duration: f64,
    start_freq: f64,
    end_freq: f64,
) -> Result<Vec<f64>> {
    if time.len() != sweep.len() {
        return Err(Error::IncompatibleSignals(format!(
            "time has {} samples, sweep has {}",
            time.len(),
            sweep.len()
        )));
    }
    check_sweep(duration, start_freq, end_freq)?;

    let decay = duration / (end_freq / start_freq).ln();
    Ok(sweep
        .iter()
        .rev()
        .zip(time)
        .map(|(&x, &t)| x * (-t / decay).exp())
        .collect())
}

/// Impulse response recovered as `h = ifft(fft(x) * fft(y))`
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImpulseResponse {
    /// `linspace(0, N / fs, N)`
    pub time: Vec<f64>,
    /// Real part of `h`, normalized to unit peak magnitude
    pub amplitude: Vec<f64>,
}

/// Impulse response from an excitation `x` and its counterpart `y`.
///
/// With `x` the recorded sweep and `y` its inverse filter, the spectral
/// product is a circular convolution that collapses the sweep into an
/// impulse. The result is scaled so the largest `|h|` is 1; an all-zero
/// product is returned as is.
///
/// # Errors
///
/// [`Error::IncompatibleSignals`] when the inputs differ in length,
/// [`Error::EmptyInput`] when they are empty, and
/// [`Error::InvalidFrequency`] for a non-positive sampling rate.
pub fn impulse_response(x: &[f64], y: &[f64], sampling_rate: f64) -> Result<ImpulseResponse> {
    if x.len() != y.len() {
        return Err(Error::IncompatibleSignals(format!(
            "input has {} samples, output has {}",
            x.len(),
            y.len()
        )));
    }
    if x.is_empty() {
        return Err(Error::EmptyInput("impulse_response"));
    }
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(Error::invalid_frequency(
            sampling_rate,
            "sampling rate must be positive and finite",
        ));
    }

    let n = x.len();
    let fft = Fft::new(n);
    let mut product = fft.forward(x);
    let y_spectrum = fft.forward(y);
    for (a, b) in product.iter_mut().zip(&y_spectrum) {
        *a *= *b;
    }
    fft.inverse_complex(&mut product);

    let peak = product.iter().map(|c| c.norm()).fold(0.0, f64::max);
    let scale = if peak > 0.0 { 1.0 / peak } else { 1.0 };

    #[cfg(feature = "tracing")]
    tracing::debug!(samples = n, peak, "impulse response");

    Ok(ImpulseResponse {
        time: linspace(0.0, n as f64 / sampling_rate, n),
        amplitude: product.iter().map(|c| c.re * scale).collect(),
    })
}
