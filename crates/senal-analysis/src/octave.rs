//! Fractional-octave band geometry (UNE-EN 61260 / IEC 61260).
//!
//! Band `x` of a `1/b`-octave system with octave ratio `G` is centred on
//! `f_r * G^(x / b)` for odd `b`, and on `f_r * G^((2x + 1) / (2b))` for even
//! `b`, so that even-fraction bands straddle the reference frequency. The
//! edges sit half a band away on a logarithmic axis.

use std::ops::Range;

use senal_core::{Error, Result, round_to_significant_digits};

/// Reference frequency of band 0.
pub const REFERENCE_FREQUENCY: f64 = 1000.0;

/// Base-two octave ratio.
pub const OCTAVE_RATIO_BASE_2: f64 = 2.0;

/// Base-ten octave ratio, `10^(3/10)`.
pub const OCTAVE_RATIO_BASE_10: f64 = 1.995_262_314_968_879_5;

/// Significant digits kept in band centre frequencies.
const CENTER_DIGITS: u32 = 5;

fn check_geometry(bandwidth_fraction: u32, octave_ratio: f64) -> Result<()> {
    if bandwidth_fraction == 0 {
        return Err(Error::invalid_shape(
            "bandwidth_fraction",
            "must be a positive integer",
        ));
    }
    if !(octave_ratio.is_finite() && octave_ratio > 1.0) {
        return Err(Error::invalid_shape(
            "octave_ratio",
            format!("{octave_ratio} must be finite and greater than 1"),
        ));
    }
    Ok(())
}

/// Centre frequency of band `x`, rounded to 5 significant digits.
///
/// # Errors
///
/// [`Error::InvalidShape`] when `bandwidth_fraction` is zero or the octave
/// ratio is not above 1, and [`Error::InvalidFrequency`] for a non-positive
/// reference frequency.
///
/// # Example
/// ```rust
/// use senal_analysis::octave_band_center_frequency;
///
/// assert_eq!(octave_band_center_frequency(0, 1, 2.0, 1000.0).unwrap(), 1000.0);
/// assert_eq!(octave_band_center_frequency(1, 1, 2.0, 1000.0).unwrap(), 2000.0);
/// assert_eq!(octave_band_center_frequency(0, 2, 2.0, 1000.0).unwrap(), 1189.2);
/// ```
pub fn octave_band_center_frequency(
    x: i32,
    bandwidth_fraction: u32,
    octave_ratio: f64,
    reference_frequency: f64,
) -> Result<f64> {
    check_geometry(bandwidth_fraction, octave_ratio)?;
    if !(reference_frequency.is_finite() && reference_frequency > 0.0) {
        return Err(Error::invalid_frequency(
            reference_frequency,
            "reference frequency must be positive and finite",
        ));
    }

    let b = f64::from(bandwidth_fraction);
    let exponent = if bandwidth_fraction % 2 == 1 {
        f64::from(x) / b
    } else {
        f64::from(x) / b + 1.0 / (2.0 * b)
    };

    Ok(round_to_significant_digits(
        reference_frequency * octave_ratio.powf(exponent),
        CENTER_DIGITS,
    ))
}

/// Lower and upper band edges around `center`: `center * G^(∓1 / 2b)`.
///
/// # Errors
///
/// Same geometry checks as [`octave_band_center_frequency`], plus
/// [`Error::InvalidFrequency`] for a non-positive centre.
pub fn octave_band_cutoffs(
    center: f64,
    bandwidth_fraction: u32,
    octave_ratio: f64,
) -> Result<(f64, f64)> {
    check_geometry(bandwidth_fraction, octave_ratio)?;
    if !(center.is_finite() && center > 0.0) {
        return Err(Error::invalid_frequency(
            center,
            "band centre must be positive and finite",
        ));
    }

    let half = octave_ratio.powf(1.0 / (2.0 * f64::from(bandwidth_fraction)));
    Ok((center / half, center * half))
}

/// Band indices of a filter bank: `-5b - b/3 .. 5b - b/3` (integer division).
///
/// For octave bands this is `-5..5`, centred from 31.25 Hz to 16 kHz.
pub fn band_indices(bandwidth_fraction: u32) -> Range<i32> {
    let b = bandwidth_fraction as i32;
    let shift = b / 3;
    (-5 * b - shift)..(5 * b - shift)
}
