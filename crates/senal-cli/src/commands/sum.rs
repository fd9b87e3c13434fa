//! Superposition of sinewaves.

use clap::Args;
use senal_config::Settings;
use senal_core::{Signal, combination_period, frequency_gcd, pretty_frequency, sum_signals};

use super::common::{OutputArgs, Tone, parse_tone, print_signal};

#[derive(Args)]
pub struct SumArgs {
    /// Components as FREQ[:AMP[:PHASE_DEG]] (repeatable)
    #[arg(long = "tone", value_parser = parse_tone, required = true)]
    tones: Vec<Tone>,

    /// Repeat the combined period until the signal spans this many seconds
    #[arg(long)]
    duration: Option<f64>,

    /// Sampling rate in Hz (defaults to the configured rate)
    #[arg(long)]
    sample_rate: Option<f64>,

    #[command(flatten)]
    output: OutputArgs,
}

pub fn run(args: SumArgs, settings: &Settings) -> anyhow::Result<()> {
    let fs = args
        .sample_rate
        .unwrap_or(settings.generator.sampling_rate);

    let components = args
        .tones
        .iter()
        .map(|t| Signal::sinewave(t.frequency, t.amplitude, t.phase_deg, fs, None))
        .collect::<Result<Vec<_>, _>>()?;

    let frequencies: Vec<f64> = args.tones.iter().map(|t| t.frequency).collect();
    let gcd = frequency_gcd(&frequencies)?;
    let period = combination_period(&frequencies)?;
    println!(
        "Combining {} tones: common frequency {}, period {} s",
        components.len(),
        pretty_frequency(gcd),
        period
    );

    let mut signal = sum_signals(&components)?;
    if let Some(duration) = args.duration {
        signal.extend(duration)?;
    }

    tracing::info!(samples = signal.len(), period, "combined signal");
    print_signal(&signal);
    args.output.write(&signal)
}
