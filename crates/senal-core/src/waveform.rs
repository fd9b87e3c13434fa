//! Closed-form waveform synthesizers.
//!
//! Every synthesizer takes a domain slice (sample times or sample indices)
//! and returns an amplitude vector of the same length. Only the sinewave
//! reads the domain values; the discrete shapes depend on its length alone.

use std::f64::consts::PI;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::{Error, Result};

/// Samples `amplitude * sin(2π f t + phase)` at each time in `time`.
///
/// `phase_deg` is in degrees.
///
/// # Example
/// ```rust
/// use senal_core::sinewave;
///
/// let y = sinewave(&[0.0, 0.25], 1.0, 2.0, 0.0);
/// assert!(y[0].abs() < 1e-12);
/// assert!((y[1] - 2.0).abs() < 1e-12);
/// ```
pub fn sinewave(time: &[f64], frequency: f64, amplitude: f64, phase_deg: f64) -> Vec<f64> {
    let omega = 2.0 * PI * frequency;
    let phase = phase_deg.to_radians();
    time.iter()
        .map(|&t| amplitude * (omega * t + phase).sin())
        .collect()
}

/// One at `impulse_index`, zero elsewhere.
///
/// # Errors
///
/// [`Error::IndexOutOfRange`] when `impulse_index >= samples.len()`.
pub fn unit_impulse(samples: &[f64], impulse_index: usize) -> Result<Vec<f64>> {
    let len = samples.len();
    if impulse_index >= len {
        return Err(Error::IndexOutOfRange {
            index: impulse_index,
            len,
        });
    }

    let mut out = vec![0.0; len];
    out[impulse_index] = 1.0;
    Ok(out)
}

/// Zero before `step_index`, one from it onward.
///
/// A step at `samples.len()` never turns on and yields all zeros.
///
/// # Errors
///
/// [`Error::IndexOutOfRange`] when `step_index > samples.len()`.
pub fn unit_step(samples: &[f64], step_index: usize) -> Result<Vec<f64>> {
    let len = samples.len();
    if step_index > len {
        return Err(Error::IndexOutOfRange {
            index: step_index,
            len,
        });
    }

    let mut out = vec![0.0; len];
    out[step_index..].fill(1.0);
    Ok(out)
}

/// Ones over `[turn_on, turn_off)`, zeros elsewhere.
///
/// # Errors
///
/// - [`Error::InvalidRange`] when `turn_on > turn_off`
/// - [`Error::DutyCycleExceeded`] when the pulse is longer than the domain
/// - [`Error::IndexOutOfRange`] when `turn_off > samples.len()`
/// - [`Error::EmptyInput`] for an empty domain
///
/// # Example
/// ```rust
/// use senal_core::square_pulse;
///
/// let y = square_pulse(&[0.0; 6], 2, 4).unwrap();
/// assert_eq!(y, vec![0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
/// ```
pub fn square_pulse(samples: &[f64], turn_on: usize, turn_off: usize) -> Result<Vec<f64>> {
    let len = samples.len();
    if len == 0 {
        return Err(Error::EmptyInput("square_pulse"));
    }
    if turn_on > turn_off {
        return Err(Error::InvalidRange(format!(
            "turn on ({turn_on}) comes after turn off ({turn_off})"
        )));
    }

    let duty_cycle = (turn_off - turn_on) as f64 * 100.0 / len as f64;
    if duty_cycle > 100.0 {
        return Err(Error::DutyCycleExceeded { duty_cycle });
    }
    if turn_off > len {
        return Err(Error::IndexOutOfRange {
            index: turn_off,
            len,
        });
    }

    let mut out = vec![0.0; len];
    out[turn_on..turn_off].fill(1.0);
    Ok(out)
}

/// Symmetric triangle of unit height centred on `(samples.len() - 1) / 2`.
///
/// For a closed index domain `start..=end` the apex is the sample at
/// position `(end - start) / 2`. The ramps span `half_base` samples on each
/// side.
///
/// # Errors
///
/// [`Error::InvalidShape`] when `half_base` is zero or wider than half the
/// domain.
pub fn triangular_pulse(samples: &[f64], half_base: usize) -> Result<Vec<f64>> {
    let len = samples.len();
    if half_base == 0 {
        return Err(Error::invalid_shape("half_base", "must be at least one sample"));
    }
    if half_base > len / 2 {
        return Err(Error::invalid_shape(
            "half_base",
            format!("{half_base} samples does not fit around the centre of a {len}-sample domain"),
        ));
    }

    let center = (len - 1) / 2;
    let mut out = vec![0.0; len];
    let width = half_base as f64;
    for offset in 0..half_base {
        let value = 1.0 - offset as f64 / width;
        out[center + offset] = value;
        out[center - offset] = value;
    }
    Ok(out)
}

/// Seedable source of normally distributed samples.
///
/// Uniform draws from [`StdRng`] are turned into pairs of independent
/// standard normals with the Box-Muller transform; the second value of
/// each pair is kept for the next call.
#[derive(Debug, Clone)]
pub struct NoiseSource {
    rng: StdRng,
    spare: Option<f64>,
}

impl NoiseSource {
    /// Deterministic source: the same seed always yields the same sequence.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            spare: None,
        }
    }

    /// Source seeded from operating-system entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
            spare: None,
        }
    }

    /// Next standard normal sample (mean 0, standard deviation 1).
    pub fn next_standard(&mut self) -> f64 {
        if let Some(z) = self.spare.take() {
            return z;
        }

        // 1 - u keeps the logarithm argument in (0, 1]
        let u1 = 1.0 - self.rng.random::<f64>();
        let u2 = self.rng.random::<f64>();
        let radius = (-2.0 * u1.ln()).sqrt();
        let angle = 2.0 * PI * u2;

        self.spare = Some(radius * angle.sin());
        radius * angle.cos()
    }
}

/// One independent `N(mean, stddev²)` draw per domain point.
///
/// # Errors
///
/// [`Error::InvalidShape`] when `stddev` is negative or either parameter is
/// not finite.
pub fn gaussian_noise(
    samples: &[f64],
    mean: f64,
    stddev: f64,
    source: &mut NoiseSource,
) -> Result<Vec<f64>> {
    if !mean.is_finite() {
        return Err(Error::invalid_shape("mean", "must be finite"));
    }
    if !stddev.is_finite() || stddev < 0.0 {
        return Err(Error::invalid_shape(
            "stddev",
            format!("{stddev} is not a finite non-negative value"),
        ));
    }

    Ok(samples
        .iter()
        .map(|_| mean + stddev * source.next_standard())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sinewave_applies_phase_in_degrees() {
        let y = sinewave(&[0.0], 50.0, 1.0, 90.0);
        assert!((y[0] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn impulse_has_single_unit_sample() {
        let y = unit_impulse(&[0.0; 21], 10).unwrap();
        assert_eq!(y.iter().sum::<f64>(), 1.0);
        assert_eq!(y[10], 1.0);
    }

    #[test]
    fn impulse_index_must_be_inside_domain() {
        assert_eq!(
            unit_impulse(&[0.0; 4], 4),
            Err(Error::IndexOutOfRange { index: 4, len: 4 })
        );
    }

    #[test]
    fn step_turns_on_at_index() {
        assert_eq!(
            unit_step(&[0.0; 5], 2).unwrap(),
            vec![0.0, 0.0, 1.0, 1.0, 1.0]
        );
        assert_eq!(unit_step(&[0.0; 3], 0).unwrap(), vec![1.0; 3]);
    }

    #[test]
    fn step_at_len_is_all_zero() {
        assert_eq!(unit_step(&[0.0; 3], 3).unwrap(), vec![0.0; 3]);
        assert!(matches!(
            unit_step(&[0.0; 3], 4),
            Err(Error::IndexOutOfRange { index: 4, len: 3 })
        ));
    }

    #[test]
    fn square_pulse_full_duty_cycle_is_allowed() {
        let y = square_pulse(&[0.0; 8], 0, 8).unwrap();
        assert_eq!(y, vec![1.0; 8]);
    }

    #[test]
    fn square_pulse_error_order() {
        assert!(matches!(
            square_pulse(&[0.0; 8], 5, 2),
            Err(Error::InvalidRange(_))
        ));
        assert!(matches!(
            square_pulse(&[0.0; 8], 0, 9),
            Err(Error::DutyCycleExceeded { .. })
        ));
        // within duty cycle but past the end
        assert_eq!(
            square_pulse(&[0.0; 8], 4, 9),
            Err(Error::IndexOutOfRange { index: 9, len: 8 })
        );
    }

    #[test]
    fn triangular_pulse_shape() {
        let y = triangular_pulse(&[0.0; 9], 4).unwrap();
        assert_eq!(y, vec![0.0, 0.25, 0.5, 0.75, 1.0, 0.75, 0.5, 0.25, 0.0]);
    }

    #[test]
    fn triangular_pulse_even_domain() {
        let y = triangular_pulse(&[0.0; 6], 3).unwrap();
        assert_eq!(y[2], 1.0);
        assert_eq!(y[5], 0.0);
        assert!((y[0] - 1.0 / 3.0).abs() < 1e-15);
        assert!((y[4] - 1.0 / 3.0).abs() < 1e-15);
    }

    #[test]
    fn triangular_apex_sits_at_half_span() {
        // 0..=9 spans 9 samples, apex at 9 / 2 = 4
        let y = triangular_pulse(&[0.0; 10], 2).unwrap();
        assert_eq!(y, vec![0.0, 0.0, 0.0, 0.5, 1.0, 0.5, 0.0, 0.0, 0.0, 0.0]);
    }

    #[test]
    fn triangular_pulse_rejects_bad_half_base() {
        assert!(matches!(
            triangular_pulse(&[0.0; 9], 0),
            Err(Error::InvalidShape { param: "half_base", .. })
        ));
        assert!(matches!(
            triangular_pulse(&[0.0; 9], 5),
            Err(Error::InvalidShape { param: "half_base", .. })
        ));
    }

    #[test]
    fn noise_is_reproducible_from_seed() {
        let domain = [0.0; 64];
        let a = gaussian_noise(&domain, 0.0, 1.0, &mut NoiseSource::from_seed(7)).unwrap();
        let b = gaussian_noise(&domain, 0.0, 1.0, &mut NoiseSource::from_seed(7)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
    }

    #[test]
    fn noise_statistics_are_plausible() {
        let domain = vec![0.0; 20_000];
        let y = gaussian_noise(&domain, 3.0, 2.0, &mut NoiseSource::from_seed(42)).unwrap();
        let mean = y.iter().sum::<f64>() / y.len() as f64;
        let var = y.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / y.len() as f64;
        assert!((mean - 3.0).abs() < 0.1, "mean {mean}");
        assert!((var.sqrt() - 2.0).abs() < 0.1, "stddev {}", var.sqrt());
    }

    #[test]
    fn noise_with_zero_stddev_is_constant() {
        let y = gaussian_noise(&[0.0; 4], 1.5, 0.0, &mut NoiseSource::from_seed(1)).unwrap();
        assert_eq!(y, vec![1.5; 4]);
    }

    #[test]
    fn noise_rejects_negative_stddev() {
        assert!(gaussian_noise(&[0.0; 4], 0.0, -1.0, &mut NoiseSource::from_seed(1)).is_err());
    }
}
