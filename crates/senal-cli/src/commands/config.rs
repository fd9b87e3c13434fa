//! Settings inspection.

use clap::Args;
use senal_config::{Settings, default_settings_path};
use std::path::PathBuf;

#[derive(Args)]
pub struct ConfigArgs {
    /// Write the active settings to this file
    #[arg(long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Print the default settings file location
    #[arg(long)]
    path: bool,
}

pub fn run(args: ConfigArgs, settings: &Settings) -> anyhow::Result<()> {
    if args.path {
        println!("{}", default_settings_path().display());
        return Ok(());
    }

    print!("{}", settings.to_toml()?);

    if let Some(path) = &args.save {
        settings.save(path)?;
        tracing::info!(path = %path.display(), "settings saved");
    }
    Ok(())
}
