//! Senal CLI - generate, combine and analyze test signals from the command line.

mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "senal")]
#[command(author, version, about = "Senal signal sandbox CLI", long_about = None)]
struct Cli {
    /// Settings file (defaults to the user config directory)
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a test signal
    Generate(commands::generate::GenerateArgs),

    /// Superpose sinewaves over their common period
    Sum(commands::sum::SumArgs),

    /// Compute the FFT spectrum of tones or a WAV file
    Spectrum(commands::analyze::SpectrumArgs),

    /// Split a WAV file into octave bands and report SPL per band
    FilterBank(commands::analyze::FilterBankArgs),

    /// Recover an impulse response from a sweep recording
    Ir(commands::analyze::IrArgs),

    /// List fractional-octave band centres and edges
    Bands(commands::bands::BandsArgs),

    /// Design one octave band-pass filter
    Bandpass(commands::bands::BandpassArgs),

    /// Sample a sum of tones on a coarse grid to show aliasing
    Alias(commands::alias::AliasArgs),

    /// Show or write the active settings
    Config(commands::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = senal_config::load_settings(cli.config.as_deref())?;
    tracing::debug!(?settings, "settings loaded");

    match cli.command {
        Commands::Generate(args) => commands::generate::run(args, &settings),
        Commands::Sum(args) => commands::sum::run(args, &settings),
        Commands::Spectrum(args) => commands::analyze::run_spectrum(args, &settings),
        Commands::FilterBank(args) => commands::analyze::run_filter_bank(args, &settings),
        Commands::Ir(args) => commands::analyze::run_ir(args),
        Commands::Bands(args) => commands::bands::run_bands(args, &settings),
        Commands::Bandpass(args) => commands::bands::run_bandpass(args, &settings),
        Commands::Alias(args) => commands::alias::run(args),
        Commands::Config(args) => commands::config::run(args, &settings),
    }
}
