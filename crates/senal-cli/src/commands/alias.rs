//! Aliasing demonstration.

use clap::Args;
use senal_analysis::frequencies_sum;
use senal_io::write_series_csv;
use std::path::PathBuf;

#[derive(Args)]
pub struct AliasArgs {
    /// Tone frequencies in Hz (comma-separated)
    #[arg(long, value_delimiter = ',', required = true)]
    freqs: Vec<f64>,

    /// Samples per second of the grid
    #[arg(long, default_value = "20")]
    sampling: usize,

    /// Duration in seconds
    #[arg(long, default_value = "1.0")]
    duration: f64,

    /// Write `time,amplitude` rows to a CSV file
    #[arg(long, value_name = "FILE")]
    csv: Option<PathBuf>,
}

pub fn run(args: AliasArgs) -> anyhow::Result<()> {
    let sum = frequencies_sum(&args.freqs, args.sampling, args.duration)?;
    let rate = if sum.len() > 1 {
        (sum.len() - 1) as f64 / args.duration
    } else {
        0.0
    };

    println!(
        "{} samples over {} s (effective rate {:.3} Hz, Nyquist {:.3} Hz)",
        sum.len(),
        args.duration,
        rate,
        rate / 2.0
    );
    for &f in &args.freqs {
        if f > rate / 2.0 && rate > 0.0 {
            let folded = (f - rate * (f / rate).round()).abs();
            println!("  {} Hz aliases to {:.3} Hz", f, folded);
        }
    }

    if let Some(path) = &args.csv {
        write_series_csv(path, ("time", "amplitude"), &sum.time, &sum.amplitude)?;
        println!("  CSV:  {}", path.display());
    }
    Ok(())
}
