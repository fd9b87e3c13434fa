//! Sound pressure level conversions.

use senal_core::{Error, Result};

/// Reference pressure in air, 20 µPa.
pub const P_REF: f64 = 2e-5;

/// Instantaneous level of each pressure sample: `10 * log10((p / p_ref)^2)`.
///
/// Silent samples map to `-inf` dB.
///
/// # Errors
///
/// [`Error::InvalidShape`] unless `p_ref` is positive and finite.
pub fn spl(pressure: &[f64], p_ref: f64) -> Result<Vec<f64>> {
    if !(p_ref.is_finite() && p_ref > 0.0) {
        return Err(Error::invalid_shape(
            "p_ref",
            format!("{p_ref} must be positive and finite"),
        ));
    }
    Ok(pressure
        .iter()
        .map(|&p| 10.0 * ((p / p_ref) * (p / p_ref)).log10())
        .collect())
}

/// Energetic average of levels: `20 * log10(mean(10^(L / 20)))`.
///
/// Averages in the pressure domain and converts back, so equal levels
/// average to themselves and `-inf` entries contribute zero pressure.
///
/// # Example
/// ```rust
/// use senal_analysis::spl_average;
///
/// let avg = spl_average(&[94.0, 94.0, 94.0]).unwrap();
/// assert!((avg - 94.0).abs() < 1e-9);
/// ```
pub fn spl_average(levels: &[f64]) -> Result<f64> {
    if levels.is_empty() {
        return Err(Error::EmptyInput("spl_average"));
    }
    let mean = levels.iter().map(|l| 10f64.powf(l / 20.0)).sum::<f64>() / levels.len() as f64;
    Ok(20.0 * mean.log10())
}
