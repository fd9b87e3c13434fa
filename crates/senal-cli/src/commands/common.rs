//! Shared CLI helpers used across multiple commands.

use clap::Args;
use senal_core::{Signal, pretty_frequency, round_to_significant_digits};
use senal_io::{SignalSummary, write_json, write_signal_csv, write_signal_wav};
use std::path::PathBuf;

/// A sinewave component given as `FREQ[:AMP[:PHASE_DEG]]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tone {
    pub frequency: f64,
    pub amplitude: f64,
    pub phase_deg: f64,
}

/// Parse a `FREQ[:AMP[:PHASE_DEG]]` string for clap's `value_parser`.
pub fn parse_tone(s: &str) -> Result<Tone, String> {
    let parts: Vec<&str> = s.split(':').collect();
    if parts.len() > 3 {
        return Err(format!(
            "Invalid tone: '{}' (expected FREQ[:AMP[:PHASE_DEG]])",
            s
        ));
    }
    let field = |i: usize, default: f64| -> Result<f64, String> {
        match parts.get(i) {
            Some(text) => text
                .trim()
                .parse::<f64>()
                .map_err(|e| format!("Invalid number '{}' in tone '{}': {}", text, s, e)),
            None => Ok(default),
        }
    };
    Ok(Tone {
        frequency: field(0, 0.0)?,
        amplitude: field(1, 1.0)?,
        phase_deg: field(2, 0.0)?,
    })
}

/// Optional files a generated signal is written to.
#[derive(Args, Debug, Default)]
pub struct OutputArgs {
    /// Write `time,amplitude` rows to a CSV file
    #[arg(long, value_name = "FILE")]
    pub csv: Option<PathBuf>,

    /// Write the amplitudes to a mono WAV file
    #[arg(long, value_name = "FILE")]
    pub wav: Option<PathBuf>,

    /// Write a JSON summary
    #[arg(long, value_name = "FILE")]
    pub json: Option<PathBuf>,

    /// WAV bit depth (16, 24 or 32)
    #[arg(long, default_value = "32")]
    pub bits: u16,
}

impl OutputArgs {
    /// Write `signal` to every requested file.
    pub fn write(&self, signal: &Signal) -> anyhow::Result<()> {
        if let Some(path) = &self.csv {
            write_signal_csv(path, signal)?;
            println!("  CSV:  {}", path.display());
        }
        if let Some(path) = &self.wav {
            let gain = write_signal_wav(path, signal, self.bits)?;
            if gain < 1.0 {
                tracing::info!(gain, "normalized to full scale");
            }
            println!("  WAV:  {}", path.display());
        }
        if let Some(path) = &self.json {
            write_json(path, &SignalSummary::from_signal(signal))?;
            println!("  JSON: {}", path.display());
        }
        Ok(())
    }
}

/// Print a short description of a signal.
pub fn print_signal(signal: &Signal) {
    let summary = SignalSummary::from_signal(signal);

    println!("{}", summary.description);
    println!("  Samples:     {}", summary.samples);
    if let Some((first, last)) = summary.span {
        println!("  Domain:      {} .. {}", first, last);
    }
    println!(
        "  Fundamental: {} ({} amplitude, {} deg)",
        pretty_frequency(summary.fundamental_frequency),
        round_to_significant_digits(summary.fundamental_amplitude, 4),
        round_to_significant_digits(summary.fundamental_phase, 4)
    );
    println!(
        "  Peak / RMS:  {:.4} / {:.4}",
        summary.peak, summary.rms
    );
    if !summary.components.is_empty() {
        let list: Vec<String> = summary
            .components
            .iter()
            .map(|c| pretty_frequency(c.frequency))
            .collect();
        println!("  Components:  {}", list.join(", "));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_frequency_only() {
        let tone = parse_tone("440").unwrap();
        assert_eq!(tone.frequency, 440.0);
        assert_eq!(tone.amplitude, 1.0);
        assert_eq!(tone.phase_deg, 0.0);
    }

    #[test]
    fn parse_full_tone() {
        let tone = parse_tone("100:0.5:90").unwrap();
        assert_eq!(
            tone,
            Tone {
                frequency: 100.0,
                amplitude: 0.5,
                phase_deg: 90.0
            }
        );
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(parse_tone("abc").is_err());
        assert!(parse_tone("1:2:3:4").is_err());
        assert!(parse_tone("100:").is_err());
    }
}
