//! Plain-text tables: CSV for generic data exchange, FRD for measurement tools.

use crate::Result;
use senal_analysis::{FilterBankResult, FrequencyResponse};
use senal_core::{Signal, Spectrum};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

fn create(path: impl AsRef<Path>) -> Result<BufWriter<File>> {
    Ok(BufWriter::new(File::create(path)?))
}

/// Export two parallel columns under the given header names.
pub fn write_series_csv(
    path: impl AsRef<Path>,
    header: (&str, &str),
    x: &[f64],
    y: &[f64],
) -> Result<()> {
    let mut file = create(path)?;

    writeln!(file, "{},{}", header.0, header.1)?;
    for (a, b) in x.iter().zip(y) {
        writeln!(file, "{a:.9},{b:.9}")?;
    }

    file.flush()?;
    Ok(())
}

/// Export a waveform as `time,amplitude` rows.
///
/// For discrete signals the time column holds sample indices.
pub fn write_signal_csv(path: impl AsRef<Path>, signal: &Signal) -> Result<()> {
    write_series_csv(
        path,
        ("time", "amplitude"),
        &signal.time_array,
        &signal.amplitude_array,
    )
}

/// Export a spectrum as `frequency_hz,magnitude,phase` rows.
pub fn write_spectrum_csv(path: impl AsRef<Path>, spectrum: &Spectrum) -> Result<()> {
    let mut file = create(path)?;

    writeln!(file, "frequency_hz,magnitude,phase")?;
    for ((f, m), p) in spectrum
        .frequencies
        .iter()
        .zip(&spectrum.magnitude)
        .zip(&spectrum.phase)
    {
        writeln!(file, "{f:.6},{m:.9},{p:.6}")?;
    }

    file.flush()?;
    Ok(())
}

/// Export filter-bank levels, one band per row.
///
/// Columns: `index,center_hz,low_hz,high_hz,spl_db`. Silent bands are
/// written as `-inf`.
pub fn write_bands_csv(path: impl AsRef<Path>, result: &FilterBankResult) -> Result<()> {
    let mut file = create(path)?;

    writeln!(file, "index,center_hz,low_hz,high_hz,spl_db")?;
    for (band, level) in result.bands.iter().zip(&result.spl) {
        writeln!(
            file,
            "{},{},{:.4},{:.4},{:.4}",
            band.index, band.center_frequency, band.cutoff_low, band.cutoff_high, level
        )?;
    }

    file.flush()?;
    Ok(())
}

/// Export a frequency response to FRD format (REW compatible).
///
/// One point per line: `frequency_hz magnitude_db phase_deg`. The DC point
/// is skipped since measurement tools expect a logarithmic axis.
pub fn write_response_frd(path: impl AsRef<Path>, response: &FrequencyResponse) -> Result<()> {
    let mut file = create(path)?;

    writeln!(file, "* Frequency Response Data exported by senal-io")?;
    for ((f, mag), phase) in response
        .frequencies
        .iter()
        .zip(&response.magnitude_db)
        .zip(&response.phase)
        .filter(|((f, _), _)| **f > 0.0)
    {
        writeln!(file, "{f:.6} {mag:.6} {:.6}", phase.to_degrees())?;
    }

    file.flush()?;
    Ok(())
}
