//! WAV file reading and writing.

use crate::{Error, Result};
use hound::{SampleFormat, WavReader, WavWriter};
use senal_core::Signal;
use std::path::Path;

/// Mono WAV file specification.
///
/// 32-bit files hold IEEE floats, 16- and 24-bit files hold integer PCM.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WavSpec {
    /// Sample rate in Hz.
    pub sample_rate: u32,
    /// Bit depth per sample (16, 24 or 32).
    pub bits_per_sample: u16,
}

impl Default for WavSpec {
    fn default() -> Self {
        Self {
            sample_rate: 48000,
            bits_per_sample: 32,
        }
    }
}

impl WavSpec {
    fn to_hound(self) -> Result<hound::WavSpec> {
        let sample_format = match self.bits_per_sample {
            32 => SampleFormat::Float,
            16 | 24 => SampleFormat::Int,
            other => return Err(Error::UnsupportedBitDepth(other)),
        };
        Ok(hound::WavSpec {
            channels: 1,
            sample_rate: self.sample_rate,
            bits_per_sample: self.bits_per_sample,
            sample_format,
        })
    }
}

/// Write mono samples to a WAV file.
///
/// Integer formats clamp samples to `[-1, 1)` full scale.
///
/// # Example
/// ```ignore
/// let samples = vec![0.0; 48000]; // 1 second of silence
/// write_wav("silence.wav", &samples, WavSpec::default())?;
/// ```
pub fn write_wav<P: AsRef<Path>>(path: P, samples: &[f64], spec: WavSpec) -> Result<()> {
    let hound_spec = spec.to_hound()?;
    let mut writer = WavWriter::create(path, hound_spec)?;

    if spec.bits_per_sample == 32 {
        for &sample in samples {
            writer.write_sample(sample as f32)?;
        }
    } else {
        let max_val = f64::from(1i32 << (spec.bits_per_sample - 1));
        for &sample in samples {
            let int_sample = (sample * max_val).clamp(-max_val, max_val - 1.0) as i32;
            writer.write_sample(int_sample)?;
        }
    }

    writer.finalize()?;
    Ok(())
}

/// Read a WAV file as `f64` full-scale samples along with its [`WavSpec`].
///
/// Multi-channel files are mixed down to mono by averaging channels.
pub fn read_wav<P: AsRef<Path>>(path: P) -> Result<(Vec<f64>, WavSpec)> {
    let reader = WavReader::open(path)?;
    let hound_spec = reader.spec();
    let channels = usize::from(hound_spec.channels.max(1));

    let samples: Vec<f64> = match hound_spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .map(|s| s.map(f64::from))
            .collect::<std::result::Result<Vec<_>, _>>()?,
        SampleFormat::Int => {
            let max_val = f64::from(1i32 << (hound_spec.bits_per_sample - 1));
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|v| f64::from(v) / max_val))
                .collect::<std::result::Result<Vec<_>, _>>()?
        }
    };

    let mono = if channels > 1 {
        samples
            .chunks(channels)
            .map(|chunk| chunk.iter().sum::<f64>() / channels as f64)
            .collect()
    } else {
        samples
    };

    let spec = WavSpec {
        sample_rate: hound_spec.sample_rate,
        bits_per_sample: hound_spec.bits_per_sample,
    };
    Ok((mono, spec))
}

/// Sample rate implied by a signal's time step, rounded to whole hertz.
///
/// Discrete signals, whose domain is the sample index, map to 1 Hz.
pub fn signal_sample_rate(signal: &Signal) -> Result<u32> {
    let step = signal.sample_step()?;
    let rate = (1.0 / step).round();
    if !(1.0..=f64::from(u32::MAX)).contains(&rate) {
        return Err(senal_core::Error::invalid_frequency(
            rate,
            "sample step does not give a WAV sample rate",
        )
        .into());
    }
    Ok(rate as u32)
}

/// Write a signal's amplitudes to a mono WAV file.
///
/// Signals that peak above full scale are normalized to a peak of 1.
/// Returns the gain that was applied.
pub fn write_signal_wav<P: AsRef<Path>>(
    path: P,
    signal: &Signal,
    bits_per_sample: u16,
) -> Result<f64> {
    let spec = WavSpec {
        sample_rate: signal_sample_rate(signal)?,
        bits_per_sample,
    };

    let peak = signal
        .amplitude_array
        .iter()
        .fold(0.0f64, |m, v| m.max(v.abs()));
    let gain = if peak > 1.0 { 1.0 / peak } else { 1.0 };

    if gain < 1.0 {
        tracing::debug!(
            description = %signal.description,
            peak,
            "normalizing signal for WAV output"
        );
        let scaled: Vec<f64> = signal.amplitude_array.iter().map(|v| v * gain).collect();
        write_wav(path, &scaled, spec)?;
    } else {
        write_wav(path, &signal.amplitude_array, spec)?;
    }
    Ok(gain)
}
