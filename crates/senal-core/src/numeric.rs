//! Numeric helpers shared by the generators and the analysis crate.
//!
//! - [`round_to_significant_digits`] / [`round_array`] - exponent-based rounding
//! - [`closest_to_average`] - member of a set nearest to its mean
//! - [`generalized_mean`] - power mean (k = 2 is the RMS)
//! - [`pretty_frequency`] - compact Hz/kHz labels such as `"1kHz"`

use crate::error::{Error, Result};

/// Rounds `value` to `digits` significant figures.
///
/// The position of the leading digit comes from the decimal exponent
/// `floor(log10(|value|))`, so negative values, values below one and values
/// that carry into the next power of ten (`9.996 -> 10.0`) all round the same
/// way. Zero and non-finite inputs are returned unchanged.
///
/// # Example
/// ```rust
/// use senal_core::round_to_significant_digits;
///
/// assert_eq!(round_to_significant_digits(1414.2136, 5), 1414.2);
/// assert_eq!(round_to_significant_digits(-0.012345, 2), -0.012);
/// assert_eq!(round_to_significant_digits(9.996, 3), 10.0);
/// ```
pub fn round_to_significant_digits(value: f64, digits: u32) -> f64 {
    if value == 0.0 || !value.is_finite() {
        return value;
    }

    let digits = digits.max(1) as i32;
    let exponent = value.abs().log10().floor() as i32;
    let shift = digits - 1 - exponent;

    // Only ever divide or multiply by an exact power of ten, never by its
    // (inexact) reciprocal.
    if shift >= 0 {
        let scale = 10f64.powi(shift);
        (value * scale).round() / scale
    } else {
        let scale = 10f64.powi(-shift);
        (value / scale).round() * scale
    }
}

/// Applies [`round_to_significant_digits`] element-wise.
pub fn round_array(values: &[f64], digits: u32) -> Vec<f64> {
    values
        .iter()
        .map(|&v| round_to_significant_digits(v, digits))
        .collect()
}

/// Returns the element of `values` closest to their arithmetic mean.
///
/// If the mean itself is one of the values it is returned. On a tie the
/// first minimal element in iteration order wins.
///
/// # Example
/// ```rust
/// use senal_core::closest_to_average;
///
/// // mean is 26.5
/// assert_eq!(closest_to_average([1.0, 2.0, 3.0, 100.0]).unwrap(), 3.0);
/// ```
pub fn closest_to_average<I>(values: I) -> Result<f64>
where
    I: IntoIterator<Item = f64>,
{
    let values: Vec<f64> = values.into_iter().collect();
    if values.is_empty() {
        return Err(Error::EmptyInput("closest_to_average"));
    }

    let average = values.iter().sum::<f64>() / values.len() as f64;
    if values.contains(&average) {
        return Ok(average);
    }

    let mut closest = values[0];
    for &v in &values[1..] {
        if (average - v).abs() < (average - closest).abs() {
            closest = v;
        }
    }

    Ok(closest)
}

/// Generalized (power) mean `(sum(v^k) / N)^(1/k)`.
///
/// `k = 1` is the arithmetic mean and `k = 2` the RMS value.
pub fn generalized_mean(values: &[f64], k: i32) -> Result<f64> {
    if values.is_empty() {
        return Err(Error::EmptyInput("generalized_mean"));
    }
    if k == 0 {
        return Err(Error::invalid_shape("k", "the power must be non-zero"));
    }

    let sum: f64 = values.iter().map(|v| v.powi(k)).sum();
    Ok((sum / values.len() as f64).powf(1.0 / k as f64))
}

/// Compact frequency label used for default signal descriptions.
///
/// Values that stay below 1 kHz after rounding to two significant digits
/// are printed in Hz, below 10 kHz in kHz with two, above that in kHz with three. Integral
/// values print without a trailing `.0`.
///
/// # Example
/// ```rust
/// use senal_core::pretty_frequency;
///
/// assert_eq!(pretty_frequency(500.0), "500Hz");
/// assert_eq!(pretty_frequency(1000.0), "1kHz");
/// assert_eq!(pretty_frequency(1500.0), "1.5kHz");
/// assert_eq!(pretty_frequency(12345.0), "12.3kHz");
/// ```
pub fn pretty_frequency(frequency: f64) -> String {
    let hz = round_to_significant_digits(frequency, 2);
    if hz < 1000.0 {
        format!("{hz}Hz")
    } else if frequency < 10000.0 {
        format!("{}kHz", round_to_significant_digits(frequency / 1000.0, 2))
    } else {
        format!("{}kHz", round_to_significant_digits(frequency / 1000.0, 3))
    }
}

/// Greatest common divisor of two non-negative integers.
pub(crate) fn gcd_u64(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let r = a % b;
        a = b;
        b = r;
    }
    a
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_large_values_exactly() {
        assert_eq!(round_to_significant_digits(31622.7766, 5), 31623.0);
        assert_eq!(round_to_significant_digits(441.0, 2), 440.0);
        assert_eq!(round_to_significant_digits(123456.0, 3), 123000.0);
    }

    #[test]
    fn rounds_small_and_negative_values() {
        assert_eq!(round_to_significant_digits(0.0012345, 3), 0.00123);
        assert_eq!(round_to_significant_digits(-1234.5, 3), -1230.0);
        assert_eq!(round_to_significant_digits(-0.5, 1), -0.5);
    }

    #[test]
    fn rounding_carries_into_next_power_of_ten() {
        assert_eq!(round_to_significant_digits(999.96, 4), 1000.0);
        assert_eq!(round_to_significant_digits(0.09999, 2), 0.1);
    }

    #[test]
    fn rounding_passes_through_zero_and_non_finite() {
        assert_eq!(round_to_significant_digits(0.0, 3), 0.0);
        assert!(round_to_significant_digits(f64::NAN, 3).is_nan());
        assert_eq!(
            round_to_significant_digits(f64::NEG_INFINITY, 3),
            f64::NEG_INFINITY
        );
    }

    #[test]
    fn round_array_is_element_wise() {
        let rounded = round_array(&[1.23456, -98.765, 0.0], 3);
        assert_eq!(rounded, vec![1.23, -98.8, 0.0]);
    }

    #[test]
    fn closest_to_average_prefers_literal_mean() {
        assert_eq!(closest_to_average([1.0, 2.0, 3.0]).unwrap(), 2.0);
    }

    #[test]
    fn closest_to_average_tie_keeps_first() {
        // mean 2.5, both 2 and 3 are 0.5 away
        assert_eq!(closest_to_average([2.0, 3.0]).unwrap(), 2.0);
        assert_eq!(closest_to_average([3.0, 2.0]).unwrap(), 3.0);
    }

    #[test]
    fn closest_to_average_never_invents_a_value() {
        // mean is 1/3
        let closest = closest_to_average([10.0, -10.0, 1.0]).unwrap();
        assert_eq!(closest, 1.0);
    }

    #[test]
    fn closest_to_average_empty() {
        assert_eq!(
            closest_to_average(Vec::<f64>::new()),
            Err(Error::EmptyInput("closest_to_average"))
        );
    }

    #[test]
    fn generalized_mean_rms_and_arithmetic() {
        let rms = generalized_mean(&[3.0, 4.0], 2).unwrap();
        assert!((rms - 12.5f64.sqrt()).abs() < 1e-12);
        assert!((generalized_mean(&[1.0, 2.0, 6.0], 1).unwrap() - 3.0).abs() < 1e-12);
        assert!(generalized_mean(&[], 2).is_err());
        assert!(generalized_mean(&[1.0], 0).is_err());
    }

    #[test]
    fn pretty_frequency_labels() {
        assert_eq!(pretty_frequency(100.0), "100Hz");
        assert_eq!(pretty_frequency(441.0), "440Hz");
        assert_eq!(pretty_frequency(0.5), "0.5Hz");
        assert_eq!(pretty_frequency(2000.0), "2kHz");
        assert_eq!(pretty_frequency(16000.0), "16kHz");
        assert_eq!(pretty_frequency(999.6), "1kHz");
    }

    #[test]
    fn gcd_of_integers() {
        assert_eq!(gcd_u64(200, 500), 100);
        assert_eq!(gcd_u64(7, 0), 7);
        assert_eq!(gcd_u64(17, 5), 1);
    }
}
