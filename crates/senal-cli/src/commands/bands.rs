//! Octave band tables and single band-pass designs.

use clap::Args;
use senal_analysis::{
    OCTAVE_RATIO_BASE_10, band_indices, bandpass_filter, octave_band_center_frequency,
    octave_band_cutoffs,
};
use senal_config::Settings;
use senal_io::write_response_frd;
use std::path::PathBuf;

#[derive(Args)]
pub struct BandsArgs {
    /// Bands per octave (overrides the configured fraction)
    #[arg(long)]
    fraction: Option<u32>,

    /// Use the base-ten octave ratio 10^(3/10)
    #[arg(long)]
    base10: bool,
}

#[derive(Args)]
pub struct BandpassArgs {
    /// Band index; 0 is the reference band
    #[arg(long, default_value = "0", allow_hyphen_values = true)]
    band: i32,

    /// Sampling rate in Hz
    #[arg(long, default_value = "48000")]
    sample_rate: f64,

    /// Bands per octave (overrides the configured fraction)
    #[arg(long)]
    fraction: Option<u32>,

    /// Filter order (overrides the configured order)
    #[arg(long)]
    order: Option<usize>,

    /// Write the frequency response to an FRD file
    #[arg(long, value_name = "FILE")]
    frd: Option<PathBuf>,
}

pub fn run_bands(args: BandsArgs, settings: &Settings) -> anyhow::Result<()> {
    let analysis = &settings.analysis;
    let fraction = args.fraction.unwrap_or(analysis.bandwidth_fraction);
    let ratio = if args.base10 {
        OCTAVE_RATIO_BASE_10
    } else {
        analysis.octave_ratio
    };

    println!("1/{}-octave bands, G = {}", fraction, ratio);
    println!("  {:>6}  {:>10}  {:>10}  {:>10}", "band", "low Hz", "centre Hz", "high Hz");
    for x in band_indices(fraction) {
        let center =
            octave_band_center_frequency(x, fraction, ratio, analysis.reference_frequency)?;
        let (low, high) = octave_band_cutoffs(center, fraction, ratio)?;
        println!("  {:>6}  {:>10.2}  {:>10}  {:>10.2}", x, low, center, high);
    }
    Ok(())
}

pub fn run_bandpass(args: BandpassArgs, settings: &Settings) -> anyhow::Result<()> {
    let mut options = settings.analysis.bandpass_options();
    if let Some(fraction) = args.fraction {
        options.bandwidth_fraction = fraction;
    }
    if let Some(order) = args.order {
        options.order = order;
    }

    let design = bandpass_filter(args.band, args.sample_rate, &options)?;
    let band = &design.band;
    println!(
        "Band {}: {} Hz ({:.2} - {:.2} Hz), order {}",
        band.index, band.center_frequency, band.cutoff_low, band.cutoff_high, options.order
    );
    println!("Second-order sections [b0 b1 b2 a0 a1 a2]:");
    for section in band.filter.sections() {
        let row: Vec<String> = section.iter().map(|c| format!("{:+.6e}", c)).collect();
        println!("  {}", row.join(" "));
    }

    let gain = band
        .filter
        .response_at(2.0 * std::f64::consts::PI * band.center_frequency / args.sample_rate)
        .norm();
    println!("Gain at centre: {:.3} dB", 20.0 * gain.log10());

    if let Some(path) = &args.frd {
        write_response_frd(path, &design.response)?;
        println!("  FRD:  {}", path.display());
    }
    Ok(())
}
