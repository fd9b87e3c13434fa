//! Spectral analysis commands.

use anyhow::Context;
use clap::Args;
use senal_analysis::{
    SineSweep, analyze, fft_spectrum, filter_bank, impulse_response, peak_frequency,
};
use senal_config::Settings;
use senal_core::{Signal, Spectrum, pretty_frequency, sum_signals};
use senal_io::{
    BandSummary, WavSpec, read_wav, write_bands_csv, write_json, write_spectrum_csv, write_wav,
};
use std::path::PathBuf;

use super::common::{Tone, parse_tone};

#[derive(Args)]
pub struct SpectrumArgs {
    /// Input WAV file
    #[arg(long, value_name = "FILE", conflicts_with = "tones")]
    input: Option<PathBuf>,

    /// Synthesize the input from FREQ[:AMP[:PHASE_DEG]] components instead
    #[arg(long = "tone", value_parser = parse_tone)]
    tones: Vec<Tone>,

    /// Repeat synthesized tones until they span this many seconds
    #[arg(long, default_value = "0.1")]
    duration: f64,

    /// Sampling rate for synthesized tones (defaults to the configured rate)
    #[arg(long)]
    sample_rate: Option<f64>,

    /// Output CSV file (optional)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Show top N peaks
    #[arg(long, default_value = "5")]
    peaks: usize,
}

#[derive(Args)]
pub struct FilterBankArgs {
    /// Input WAV file, samples in pascal
    #[arg(value_name = "INPUT")]
    input: PathBuf,

    /// Bands per octave (overrides the configured fraction)
    #[arg(long)]
    fraction: Option<u32>,

    /// Output CSV file (optional)
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,

    /// Output JSON file (optional)
    #[arg(long, value_name = "FILE")]
    json: Option<PathBuf>,
}

#[derive(Args)]
pub struct IrArgs {
    /// Recording of the sweep through the system under test
    #[arg(value_name = "RECORDING")]
    recording: PathBuf,

    /// Output impulse response WAV file
    #[arg(short, long)]
    output: PathBuf,

    /// Sweep start frequency in Hz
    #[arg(long, default_value = "20.0")]
    start: f64,

    /// Sweep end frequency in Hz
    #[arg(long, default_value = "20000.0")]
    end: f64,

    /// Sweep duration in seconds
    #[arg(long, default_value = "2.0")]
    duration: f64,
}

pub fn run_spectrum(args: SpectrumArgs, settings: &Settings) -> anyhow::Result<()> {
    let spectrum = if let Some(path) = &args.input {
        println!("Analyzing spectrum of {}...", path.display());
        let (samples, spec) = read_wav(path)?;
        let fs = f64::from(spec.sample_rate);
        println!(
            "  {} samples, {} Hz, {:.2}s",
            samples.len(),
            spec.sample_rate,
            samples.len() as f64 / fs
        );
        fft_spectrum(&samples, fs)?
    } else {
        if args.tones.is_empty() {
            anyhow::bail!("give either --input or at least one --tone");
        }
        let fs = args
            .sample_rate
            .unwrap_or(settings.generator.sampling_rate);
        let components = args
            .tones
            .iter()
            .map(|t| Signal::sinewave(t.frequency, t.amplitude, t.phase_deg, fs, None))
            .collect::<Result<Vec<_>, _>>()?;
        let signal = sum_signals(&components)?.extended(args.duration)?;

        println!("Analyzing spectrum of {}...", signal.description);
        println!("  {} samples, {} Hz", signal.len(), fs);
        analyze(signal, fs)?.spectrum()
    };

    report_spectrum(&spectrum, args.peaks);

    if let Some(path) = &args.output {
        write_spectrum_csv(path, &spectrum)?;
        println!("\nSpectrum written to {}", path.display());
    }
    Ok(())
}

fn report_spectrum(spectrum: &Spectrum, peaks: usize) {
    if spectrum.len() > 1 {
        println!(
            "  {} bins, resolution {:.3} Hz",
            spectrum.len(),
            spectrum.frequencies[1] - spectrum.frequencies[0]
        );
    }
    if let Some(peak) = peak_frequency(spectrum) {
        println!("  Peak: {}", pretty_frequency(peak));
    }

    let mut bins: Vec<usize> = (1..spectrum.len()).collect();
    bins.sort_by(|&a, &b| spectrum.magnitude[b].total_cmp(&spectrum.magnitude[a]));

    println!("\nTop {} peaks:", peaks.min(bins.len()));
    for (rank, &bin) in bins.iter().take(peaks).enumerate() {
        println!(
            "  {:2}. {:10.2} Hz  {:.6}",
            rank + 1,
            spectrum.frequencies[bin],
            spectrum.magnitude[bin]
        );
    }
}

pub fn run_filter_bank(args: FilterBankArgs, settings: &Settings) -> anyhow::Result<()> {
    let (samples, spec) = read_wav(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let fs = f64::from(spec.sample_rate);

    let mut options = settings.analysis.filter_bank_options();
    if let Some(fraction) = args.fraction {
        options.bandwidth_fraction = fraction;
    }

    tracing::info!(
        samples = samples.len(),
        sample_rate = spec.sample_rate,
        fraction = options.bandwidth_fraction,
        "running filter bank"
    );
    let result = filter_bank(&samples, fs, &options)?;

    println!("1/{}-octave bands of {}", options.bandwidth_fraction, args.input.display());
    println!("  {:>6}  {:>10}  {:>10}", "band", "centre Hz", "SPL dB");
    for (band, level) in result.bands.iter().zip(&result.spl) {
        println!(
            "  {:>6}  {:>10}  {:>10.2}",
            band.index, band.center_frequency, level
        );
    }
    if let Some(loudest) = result.loudest_band() {
        println!("Loudest band: {}", pretty_frequency(loudest.center_frequency));
    }

    if let Some(path) = &args.csv {
        write_bands_csv(path, &result)?;
        println!("  CSV:  {}", path.display());
    }
    if let Some(path) = &args.json {
        write_json(path, &BandSummary::from_result(&result, fs))?;
        println!("  JSON: {}", path.display());
    }
    Ok(())
}

pub fn run_ir(args: IrArgs) -> anyhow::Result<()> {
    let (mut recording, spec) = read_wav(&args.recording)
        .with_context(|| format!("reading {}", args.recording.display()))?;
    let fs = f64::from(spec.sample_rate);

    let sweep = SineSweep::new(fs, args.start, args.end, args.duration)?;
    let inverse = sweep.inverse_filter()?;
    if recording.len() != inverse.len() {
        tracing::info!(
            recording = recording.len(),
            sweep = inverse.len(),
            "fitting recording to sweep length"
        );
        recording.resize(inverse.len(), 0.0);
    }

    let ir = impulse_response(&recording, &inverse, fs)?;
    let peak = ir
        .amplitude
        .iter()
        .enumerate()
        .max_by(|(_, a), (_, b)| a.abs().total_cmp(&b.abs()))
        .map_or(0, |(i, _)| i);
    println!(
        "Impulse response: {} samples, peak at {:.4}s",
        ir.amplitude.len(),
        ir.time.get(peak).copied().unwrap_or(0.0)
    );

    write_wav(
        &args.output,
        &ir.amplitude,
        WavSpec {
            sample_rate: spec.sample_rate,
            bits_per_sample: 32,
        },
    )?;
    println!("  WAV:  {}", args.output.display());
    Ok(())
}
