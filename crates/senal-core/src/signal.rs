//! The [`Signal`] aggregate and its constructors.

use crate::combine::MAX_COMBINED_SAMPLES;
use crate::domain::{build_sample_index_array, build_time_array_by_step, samples_spanning};
use crate::error::{Error, Result, ensure_positive};
use crate::numeric::{closest_to_average, pretty_frequency};
use crate::waveform::{
    NoiseSource, gaussian_noise, sinewave, square_pulse, triangular_pulse, unit_impulse, unit_step,
};

/// Frequency-domain description of a signal.
///
/// The three arrays always have the same length. Phases are in degrees for
/// synthesized components and in radians for FFT-derived spectra.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Spectrum {
    /// Component frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// Component magnitudes.
    pub magnitude: Vec<f64>,
    /// Component phases.
    pub phase: Vec<f64>,
}

impl Spectrum {
    /// Builds a spectrum from parallel arrays.
    ///
    /// # Errors
    ///
    /// [`Error::IncompatibleSignals`] when the array lengths differ.
    pub fn new(frequencies: Vec<f64>, magnitude: Vec<f64>, phase: Vec<f64>) -> Result<Self> {
        if frequencies.len() != magnitude.len() || frequencies.len() != phase.len() {
            return Err(Error::IncompatibleSignals(format!(
                "spectrum arrays differ in length ({}, {}, {})",
                frequencies.len(),
                magnitude.len(),
                phase.len()
            )));
        }
        Ok(Self {
            frequencies,
            magnitude,
            phase,
        })
    }

    /// Number of spectral components.
    pub fn len(&self) -> usize {
        self.frequencies.len()
    }

    /// Returns `true` when the spectrum holds no component.
    pub fn is_empty(&self) -> bool {
        self.frequencies.is_empty()
    }
}

/// A sampled waveform together with its spectral descriptors and metadata.
///
/// Fields are public so plotting and persistence code can read them
/// directly. The constructors guarantee that `time_array` and
/// `amplitude_array` have equal length, that the spectral arrays have equal
/// length, and that `time_array` is strictly increasing.
#[derive(Debug, Clone, PartialEq)]
pub struct Signal {
    /// Fundamental frequency in Hz (nominal 1 for discrete shapes).
    pub fundamental_frequency: f64,
    /// Amplitude of the fundamental.
    pub fundamental_amplitude: f64,
    /// Phase of the fundamental in degrees.
    pub fundamental_phase: f64,
    /// Sample times in seconds, or sample indices for discrete signals.
    pub time_array: Vec<f64>,
    /// Sample values, one per entry of `time_array`.
    pub amplitude_array: Vec<f64>,
    /// Frequencies of the spectral components.
    pub frequency_array: Vec<f64>,
    /// Magnitudes of the spectral components.
    pub magnitude_array: Vec<f64>,
    /// Phases of the spectral components.
    pub phase_array: Vec<f64>,
    /// Human-readable label.
    pub description: String,
}

impl Signal {
    /// One period of a sinewave sampled at `sampling_rate`.
    ///
    /// The domain steps `1 / sampling_rate` from zero and leaves out the
    /// period endpoint, so every sinewave built at the same rate shares one
    /// sampling grid. It holds `ceil(sampling_rate / frequency)` samples;
    /// when the period is not a whole number of steps, repeating them is
    /// only approximately continuous. The spectrum is the single component
    /// `(frequency, amplitude, phase_deg)`. Without a description the label
    /// is `sin` followed by [`pretty_frequency`].
    ///
    /// # Example
    /// ```rust
    /// use senal_core::Signal;
    ///
    /// let s = Signal::sinewave(1000.0, 1.0, 0.0, 48000.0, None).unwrap();
    /// assert_eq!(s.time_array.len(), 48);
    /// assert_eq!(s.description, "sin1kHz");
    /// assert_eq!(s.frequency_array, vec![1000.0]);
    /// ```
    pub fn sinewave(
        frequency: f64,
        amplitude: f64,
        phase_deg: f64,
        sampling_rate: f64,
        description: Option<&str>,
    ) -> Result<Self> {
        let time_array = build_time_array_by_step(frequency, sampling_rate, false)?;
        let amplitude_array = sinewave(&time_array, frequency, amplitude, phase_deg);
        let description = description
            .map_or_else(|| format!("sin{}", pretty_frequency(frequency)), str::to_owned);

        Ok(Self {
            fundamental_frequency: frequency,
            fundamental_amplitude: amplitude,
            fundamental_phase: phase_deg,
            time_array,
            amplitude_array,
            frequency_array: vec![frequency],
            magnitude_array: vec![amplitude],
            phase_array: vec![phase_deg],
            description,
        })
    }

    /// Unit impulse over the sample indices `start..=end`.
    ///
    /// `impulse_index` is a position in the domain, not a sample label:
    /// with `start = -10` the centre sample is index 10.
    pub fn impulse(
        start: i64,
        end: i64,
        impulse_index: usize,
        description: Option<&str>,
    ) -> Result<Self> {
        let samples = build_sample_index_array(start, end, true)?;
        let amplitudes = unit_impulse(&samples, impulse_index)?;
        Ok(Self::discrete(samples, amplitudes, description, "Impulse"))
    }

    /// Unit step over the sample indices `start..=end`.
    pub fn step(start: i64, end: i64, step_index: usize, description: Option<&str>) -> Result<Self> {
        let samples = build_sample_index_array(start, end, true)?;
        let amplitudes = unit_step(&samples, step_index)?;
        Ok(Self::discrete(samples, amplitudes, description, "Step"))
    }

    /// Square pulse over the sample indices `start..=end`.
    pub fn square_pulse(
        start: i64,
        end: i64,
        turn_on: usize,
        turn_off: usize,
        description: Option<&str>,
    ) -> Result<Self> {
        let samples = build_sample_index_array(start, end, true)?;
        let amplitudes = square_pulse(&samples, turn_on, turn_off)?;
        Ok(Self::discrete(samples, amplitudes, description, "Square pulse"))
    }

    /// Triangular pulse over the sample indices `start..=end`.
    pub fn triangular_pulse(
        start: i64,
        end: i64,
        half_base: usize,
        description: Option<&str>,
    ) -> Result<Self> {
        let samples = build_sample_index_array(start, end, true)?;
        let amplitudes = triangular_pulse(&samples, half_base)?;
        Ok(Self::discrete(
            samples,
            amplitudes,
            description,
            "Triangular pulse",
        ))
    }

    /// Gaussian noise over the sample indices `start..=end`.
    pub fn noise(
        start: i64,
        end: i64,
        mean: f64,
        stddev: f64,
        source: &mut NoiseSource,
        description: Option<&str>,
    ) -> Result<Self> {
        let samples = build_sample_index_array(start, end, true)?;
        let amplitudes = gaussian_noise(&samples, mean, stddev, source)?;
        Ok(Self::discrete(samples, amplitudes, description, "Noise"))
    }

    fn discrete(
        samples: Vec<f64>,
        amplitudes: Vec<f64>,
        description: Option<&str>,
        default_description: &str,
    ) -> Self {
        Self {
            fundamental_frequency: 1.0,
            fundamental_amplitude: 1.0,
            fundamental_phase: 0.0,
            time_array: samples,
            amplitude_array: amplitudes,
            frequency_array: Vec::new(),
            magnitude_array: Vec::new(),
            phase_array: Vec::new(),
            description: description.unwrap_or(default_description).to_owned(),
        }
    }

    /// Replaces the spectral arrays with `spectrum`.
    pub fn with_spectrum(mut self, spectrum: Spectrum) -> Self {
        self.frequency_array = spectrum.frequencies;
        self.magnitude_array = spectrum.magnitude;
        self.phase_array = spectrum.phase;
        self
    }

    /// The spectral arrays as a [`Spectrum`].
    pub fn spectrum(&self) -> Spectrum {
        Spectrum {
            frequencies: self.frequency_array.clone(),
            magnitude: self.magnitude_array.clone(),
            phase: self.phase_array.clone(),
        }
    }

    /// Number of samples in the waveform.
    pub fn len(&self) -> usize {
        self.time_array.len()
    }

    /// Returns `true` when the waveform holds no sample.
    pub fn is_empty(&self) -> bool {
        self.time_array.is_empty()
    }

    /// Distance between consecutive samples of the domain.
    pub fn sample_step(&self) -> Result<f64> {
        match self.time_array.as_slice() {
            [t0, t1, ..] if t1 > t0 => Ok(t1 - t0),
            [_, _, ..] => Err(Error::IncompatibleSignals(format!(
                "'{}' has a non-increasing domain",
                self.description
            ))),
            _ => Err(Error::IncompatibleSignals(format!(
                "'{}' needs at least two samples to define a sample step",
                self.description
            ))),
        }
    }

    /// Copy of this signal repeated periodically until it spans `duration`.
    ///
    /// One period is `ceil(1 / (f0 * step))` samples, matching the domain
    /// [`Signal::sinewave`] builds, and the result holds
    /// `ceil(duration / step)` samples on the same grid. A domain holding one
    /// extra sample is treated as closed and keeps a trailing endpoint after
    /// extension. Only existing samples are repeated, nothing is
    /// resynthesized. A signal that already spans `duration` is returned
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidFrequency`] for a non-positive duration or fundamental
    /// - [`Error::IncompatibleSignals`] when the domain does not hold a whole
    ///   period or the result would exceed [`MAX_COMBINED_SAMPLES`]
    pub fn extended(&self, duration: f64) -> Result<Self> {
        let mut out = self.clone();
        out.extend(duration)?;
        Ok(out)
    }

    /// In-place variant of [`Signal::extended`].
    ///
    /// On error the signal is left untouched.
    pub fn extend(&mut self, duration: f64) -> Result<()> {
        ensure_positive(duration, "duration")?;
        ensure_positive(self.fundamental_frequency, "fundamental frequency")?;

        let step = self.sample_step()?;
        let len = self.len();
        let period = 1.0 / self.fundamental_frequency;
        let per_period = samples_spanning(period / step) as usize;
        if per_period == 0 || per_period > len {
            return Err(Error::IncompatibleSignals(format!(
                "'{}' holds {len} samples, one period needs {per_period}",
                self.description
            )));
        }

        let closed = len == per_period + 1;
        let target = samples_spanning(duration / step);
        if !target.is_finite() || target > MAX_COMBINED_SAMPLES as f64 {
            return Err(Error::IncompatibleSignals(format!(
                "extending '{}' to {duration} s exceeds {MAX_COMBINED_SAMPLES} samples",
                self.description
            )));
        }
        let target = target as usize + usize::from(closed);
        if target <= len {
            return Ok(());
        }

        let t0 = self.time_array[0];
        let amplitudes: Vec<f64> = (0..target)
            .map(|i| self.amplitude_array[i % per_period])
            .collect();
        let time: Vec<f64> = (0..target).map(|i| t0 + i as f64 * step).collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            description = %self.description,
            from = len,
            to = target,
            per_period,
            closed,
            "extended signal"
        );

        self.amplitude_array = amplitudes;
        self.time_array = time;
        Ok(())
    }
}

/// Sinewaves for several frequencies sampled on one shared time domain.
///
/// The domain spans one period of the frequency closest to the average
/// (built by stepping `1 / sampling_rate`). Each member is labelled like
/// [`Signal::sinewave`]; the average member gets an `(ave)` suffix.
///
/// # Errors
///
/// [`Error::EmptyInput`] for no frequencies and [`Error::InvalidFrequency`]
/// for any non-positive one.
pub fn sinewave_family(
    frequencies: &[f64],
    sampling_rate: f64,
    closed: bool,
) -> Result<Vec<Signal>> {
    for &f in frequencies {
        ensure_positive(f, "frequency")?;
    }
    let average = closest_to_average(frequencies.iter().copied())?;
    let time_array = build_time_array_by_step(average, sampling_rate, closed)?;

    let family = frequencies
        .iter()
        .map(|&frequency| {
            let mut description = format!("sin{}", pretty_frequency(frequency));
            if frequency == average {
                description.push_str("(ave)");
            }
            Signal {
                fundamental_frequency: frequency,
                fundamental_amplitude: 1.0,
                fundamental_phase: 0.0,
                amplitude_array: sinewave(&time_array, frequency, 1.0, 0.0),
                time_array: time_array.clone(),
                frequency_array: vec![frequency],
                magnitude_array: vec![1.0],
                phase_array: vec![0.0],
                description,
            }
        })
        .collect();

    Ok(family)
}
