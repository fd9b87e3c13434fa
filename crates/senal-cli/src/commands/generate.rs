//! Test signal generation command.

use anyhow::Context;
use clap::{Args, Subcommand};
use senal_analysis::SineSweep;
use senal_config::Settings;
use senal_core::{NoiseSource, Signal, sinewave_family};
use senal_io::{WavSpec, write_wav};
use std::path::PathBuf;

use super::common::{OutputArgs, print_signal};

#[derive(Args)]
pub struct GenerateArgs {
    #[command(subcommand)]
    command: GenerateCommand,
}

/// Sample index range shared by the discrete shapes.
#[derive(Args, Debug)]
struct IndexRange {
    /// First sample index
    #[arg(long, default_value = "-10", allow_hyphen_values = true)]
    start: i64,

    /// Last sample index (included)
    #[arg(long, default_value = "10", allow_hyphen_values = true)]
    end: i64,
}

impl IndexRange {
    /// Array position of sample index `at`.
    fn position(&self, at: i64) -> anyhow::Result<usize> {
        if at < self.start || at > self.end {
            anyhow::bail!(
                "sample {} is outside the range {}..={}",
                at,
                self.start,
                self.end
            );
        }
        Ok((at - self.start) as usize)
    }
}

#[derive(Subcommand)]
enum GenerateCommand {
    /// One period of a sinewave, optionally repeated
    Sine {
        /// Frequency in Hz
        #[arg(long)]
        freq: f64,

        /// Amplitude
        #[arg(long, default_value = "1.0")]
        amplitude: f64,

        /// Phase in degrees
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        phase: f64,

        /// Repeat periods until the signal spans this many seconds
        #[arg(long)]
        duration: Option<f64>,

        /// Sampling rate in Hz (defaults to the configured rate)
        #[arg(long)]
        sample_rate: Option<f64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Sinewaves sharing one time domain
    Family {
        /// Frequencies in Hz (comma-separated)
        #[arg(long, value_delimiter = ',', required = true)]
        freqs: Vec<f64>,

        /// Sampling rate in Hz (defaults to the configured rate)
        #[arg(long)]
        sample_rate: Option<f64>,

        /// Directory for one CSV per frequency
        #[arg(long, value_name = "DIR")]
        csv_dir: Option<PathBuf>,
    },

    /// Unit impulse
    Impulse {
        #[command(flatten)]
        range: IndexRange,

        /// Sample index of the impulse
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        at: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Unit step
    Step {
        #[command(flatten)]
        range: IndexRange,

        /// Sample index where the step rises
        #[arg(long, default_value = "0", allow_hyphen_values = true)]
        at: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Square pulse
    Square {
        #[command(flatten)]
        range: IndexRange,

        /// Sample index where the pulse turns on
        #[arg(long, allow_hyphen_values = true)]
        on: i64,

        /// Sample index where the pulse turns off (excluded)
        #[arg(long, allow_hyphen_values = true)]
        off: i64,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Triangular pulse centred in the range
    Triangle {
        #[command(flatten)]
        range: IndexRange,

        /// Half of the triangle base in samples
        #[arg(long, default_value = "5")]
        half_base: usize,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Gaussian noise
    Noise {
        #[command(flatten)]
        range: IndexRange,

        /// Mean
        #[arg(long, default_value = "0.0", allow_hyphen_values = true)]
        mean: f64,

        /// Standard deviation
        #[arg(long, default_value = "1.0")]
        stddev: f64,

        /// Seed (overrides the configured seed)
        #[arg(long)]
        seed: Option<u64>,

        #[command(flatten)]
        output: OutputArgs,
    },

    /// Exponential sine sweep written to WAV
    Sweep {
        /// Output WAV file
        #[arg(value_name = "OUTPUT")]
        output: PathBuf,

        /// Start frequency in Hz
        #[arg(long, default_value = "20.0")]
        start: f64,

        /// End frequency in Hz
        #[arg(long, default_value = "20000.0")]
        end: f64,

        /// Duration in seconds
        #[arg(long, default_value = "2.0")]
        duration: f64,

        /// Sample rate
        #[arg(long, default_value = "48000")]
        sample_rate: u32,

        /// Also write the inverse filter to this WAV file
        #[arg(long, value_name = "FILE")]
        inverse: Option<PathBuf>,
    },
}

pub fn run(args: GenerateArgs, settings: &Settings) -> anyhow::Result<()> {
    let generator = &settings.generator;

    let (signal, output) = match args.command {
        GenerateCommand::Sine {
            freq,
            amplitude,
            phase,
            duration,
            sample_rate,
            output,
        } => {
            let fs = sample_rate.unwrap_or(generator.sampling_rate);
            let mut signal = Signal::sinewave(freq, amplitude, phase, fs, None)?;
            if let Some(duration) = duration {
                signal.extend(duration)?;
            }
            (signal, output)
        }
        GenerateCommand::Family {
            freqs,
            sample_rate,
            csv_dir,
        } => {
            let fs = sample_rate.unwrap_or(generator.sampling_rate);
            let family = sinewave_family(&freqs, fs, generator.closed_interval)?;
            if let Some(dir) = &csv_dir {
                std::fs::create_dir_all(dir)
                    .with_context(|| format!("creating {}", dir.display()))?;
            }
            for signal in &family {
                print_signal(signal);
                if let Some(dir) = &csv_dir {
                    let path = dir.join(format!("{}.csv", file_stem(&signal.description)));
                    senal_io::write_signal_csv(&path, signal)?;
                    println!("  CSV:  {}", path.display());
                }
            }
            return Ok(());
        }
        GenerateCommand::Impulse { range, at, output } => {
            let index = range.position(at)?;
            (Signal::impulse(range.start, range.end, index, None)?, output)
        }
        GenerateCommand::Step { range, at, output } => {
            let index = range.position(at)?;
            (Signal::step(range.start, range.end, index, None)?, output)
        }
        GenerateCommand::Square {
            range,
            on,
            off,
            output,
        } => {
            let turn_on = range.position(on)?;
            // the turn-off index may sit one past the last sample
            if off < on {
                anyhow::bail!("pulse turns off at {} before it turns on at {}", off, on);
            }
            let turn_off = turn_on + (off - on) as usize;
            let signal = Signal::square_pulse(range.start, range.end, turn_on, turn_off, None)?;
            (signal, output)
        }
        GenerateCommand::Triangle {
            range,
            half_base,
            output,
        } => (
            Signal::triangular_pulse(range.start, range.end, half_base, None)?,
            output,
        ),
        GenerateCommand::Noise {
            range,
            mean,
            stddev,
            seed,
            output,
        } => {
            let mut source = match seed {
                Some(seed) => NoiseSource::from_seed(seed),
                None => generator.noise_source(),
            };
            let signal = Signal::noise(range.start, range.end, mean, stddev, &mut source, None)?;
            (signal, output)
        }
        GenerateCommand::Sweep {
            output,
            start,
            end,
            duration,
            sample_rate,
            inverse,
        } => {
            let sweep = SineSweep::new(f64::from(sample_rate), start, end, duration)?;
            let spec = WavSpec {
                sample_rate,
                bits_per_sample: 32,
            };
            println!(
                "Generating {:.1} Hz - {:.1} Hz sweep, {:.2}s at {} Hz",
                start, end, duration, sample_rate
            );
            write_wav(&output, &sweep.generate(), spec)?;
            println!("  WAV:  {}", output.display());

            if let Some(path) = inverse {
                let filter = sweep.inverse_filter()?;
                let peak = filter.iter().fold(0.0f64, |m, v| m.max(v.abs()));
                let scale = if peak > 1.0 { 1.0 / peak } else { 1.0 };
                let scaled: Vec<f64> = filter.iter().map(|v| v * scale).collect();
                write_wav(&path, &scaled, spec)?;
                println!("  Inverse: {}", path.display());
            }
            return Ok(());
        }
    };

    tracing::info!(
        description = %signal.description,
        samples = signal.len(),
        "generated signal"
    );
    print_signal(&signal);
    output.write(&signal)
}

/// File-system friendly version of a signal label.
fn file_stem(description: &str) -> String {
    description
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '.' { c } else { '_' })
        .collect()
}
