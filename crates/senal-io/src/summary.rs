//! JSON summaries of signals and filter-bank analyses.
//!
//! Non-finite levels (a silent band reads `-inf` dB) serialize as `null`.

use crate::Result;
use senal_analysis::FilterBankResult;
use senal_core::Signal;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

/// One spectral component of a signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Component {
    /// Frequency in Hz.
    pub frequency: f64,
    /// Magnitude.
    pub magnitude: f64,
    /// Phase.
    pub phase: f64,
}

/// Scalar description of a [`Signal`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalSummary {
    /// Signal label.
    pub description: String,
    /// Fundamental frequency in Hz.
    pub fundamental_frequency: f64,
    /// Amplitude of the fundamental.
    pub fundamental_amplitude: f64,
    /// Phase of the fundamental in degrees.
    pub fundamental_phase: f64,
    /// Number of samples.
    pub samples: usize,
    /// First and last entries of the time axis.
    pub span: Option<(f64, f64)>,
    /// Largest absolute amplitude.
    pub peak: f64,
    /// Root mean square of the amplitudes.
    pub rms: f64,
    /// Spectral components.
    pub components: Vec<Component>,
}

impl SignalSummary {
    /// Summarize a signal.
    pub fn from_signal(signal: &Signal) -> Self {
        let samples = signal.amplitude_array.len();
        let peak = signal
            .amplitude_array
            .iter()
            .fold(0.0f64, |m, v| m.max(v.abs()));
        let rms = if samples == 0 {
            0.0
        } else {
            (signal.amplitude_array.iter().map(|v| v * v).sum::<f64>() / samples as f64).sqrt()
        };
        let span = signal
            .time_array
            .first()
            .zip(signal.time_array.last())
            .map(|(&a, &b)| (a, b));
        let components = signal
            .frequency_array
            .iter()
            .zip(&signal.magnitude_array)
            .zip(&signal.phase_array)
            .map(|((&frequency, &magnitude), &phase)| Component {
                frequency,
                magnitude,
                phase,
            })
            .collect();

        Self {
            description: signal.description.clone(),
            fundamental_frequency: signal.fundamental_frequency,
            fundamental_amplitude: signal.fundamental_amplitude,
            fundamental_phase: signal.fundamental_phase,
            samples,
            span,
            peak,
            rms,
            components,
        }
    }
}

/// Level of one band in a [`BandSummary`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandLevel {
    /// Band index; 0 is the reference band.
    pub index: i32,
    /// Centre frequency in Hz.
    pub center_hz: f64,
    /// Lower edge in Hz.
    pub low_hz: f64,
    /// Upper edge in Hz.
    pub high_hz: f64,
    /// Averaged SPL in dB; `None` for a silent band.
    pub spl_db: Option<f64>,
}

/// Per-band levels of a filter-bank analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BandSummary {
    /// Sampling rate of the analyzed signal in Hz.
    pub sampling_rate: f64,
    /// Bands in ascending frequency.
    pub bands: Vec<BandLevel>,
    /// Index of the loudest band.
    pub loudest: Option<i32>,
}

impl BandSummary {
    /// Summarize a filter-bank result.
    pub fn from_result(result: &FilterBankResult, sampling_rate: f64) -> Self {
        let bands = result
            .bands
            .iter()
            .zip(&result.spl)
            .map(|(band, &level)| BandLevel {
                index: band.index,
                center_hz: band.center_frequency,
                low_hz: band.cutoff_low,
                high_hz: band.cutoff_high,
                spl_db: level.is_finite().then_some(level),
            })
            .collect();

        Self {
            sampling_rate,
            bands,
            loudest: result.loudest_band().map(|b| b.index),
        }
    }
}

/// Write any serializable value as pretty-printed JSON.
pub fn write_json<T: Serialize>(path: impl AsRef<Path>, value: &T) -> Result<()> {
    let mut file = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut file, value)?;
    writeln!(file)?;
    file.flush()?;
    Ok(())
}

/// Read a JSON file back into a value.
pub fn read_json<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let file = BufReader::new(File::open(path)?);
    Ok(serde_json::from_reader(file)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use senal_analysis::{FilterBankOptions, filter_bank};
    use tempfile::TempDir;

    #[test]
    fn test_sine_summary() {
        let sine = Signal::sinewave(1000.0, 2.0, 0.0, 48000.0, None).unwrap();
        let summary = SignalSummary::from_signal(&sine);

        assert_eq!(summary.description, "sin1kHz");
        assert_eq!(summary.samples, 48);
        assert!((summary.peak - 2.0).abs() < 1e-12);
        assert!((summary.rms - 2.0 / 2f64.sqrt()).abs() < 1e-9);
        assert_eq!(summary.components.len(), 1);
        assert_eq!(summary.span.unwrap().0, 0.0);
    }

    #[test]
    fn test_summary_json_roundtrip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.json");
        let summary = SignalSummary::from_signal(&Signal::step(0, 9, 3, None).unwrap());

        write_json(&path, &summary).unwrap();
        let loaded: SignalSummary = read_json(&path).unwrap();
        assert_eq!(loaded.description, summary.description);
        assert_eq!(loaded.samples, 10);
        assert_eq!(loaded.span, Some((0.0, 9.0)));
        assert_eq!(loaded.components, summary.components);
        assert!((loaded.rms - summary.rms).abs() < 1e-12);
    }

    #[test]
    fn test_silent_band_is_null() {
        let result = filter_bank(&[0.0; 256], 48000.0, &FilterBankOptions::default()).unwrap();
        let summary = BandSummary::from_result(&result, 48000.0);

        assert_eq!(summary.bands.len(), 10);
        assert!(summary.bands.iter().all(|b| b.spl_db.is_none()));

        let json = serde_json::to_string(&summary).unwrap();
        assert!(json.contains("\"spl_db\":null"));
    }
}
