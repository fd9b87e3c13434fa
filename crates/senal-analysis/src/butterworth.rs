//! Butterworth band-pass design in second-order sections.
//!
//! The design follows the classic analog route:
//!
//! 1. Butterworth low-pass prototype poles on the left half of the unit circle
//! 2. Pre-warping of the band edges for the bilinear transform
//! 3. Low-pass to band-pass transform (each pole splits into two)
//! 4. Bilinear transform to the z-plane
//! 5. Grouping of conjugate pole pairs into biquad sections
//!
//! An order-`N` design therefore yields `N` sections, each with zeros at
//! `z = 1` and `z = -1`.

use std::f64::consts::PI;

use rustfft::num_complex::Complex;
use senal_core::{Error, Result};

/// One biquad section: `[b0, b1, b2, a0, a1, a2]`.
pub type Section = [f64; 6];

/// Sample rate the pre-warp and bilinear transform are expressed at.
///
/// Band edges are normalized to Nyquist, so a rate of 2 puts Nyquist at 1.
const DESIGN_RATE: f64 = 2.0;

/// Magnitude, phase and frequency axis of a filter response.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FrequencyResponse {
    /// Evaluation frequencies in Hz.
    pub frequencies: Vec<f64>,
    /// `20 * log10(|H|)`; `-inf` where the filter has a zero.
    pub magnitude_db: Vec<f64>,
    /// `atan2(im, re)` of `H` in radians.
    pub phase: Vec<f64>,
}

/// Cascade of biquad sections.
#[derive(Debug, Clone, PartialEq)]
pub struct SosFilter {
    sections: Vec<Section>,
}

impl SosFilter {
    /// Wraps explicit sections.
    ///
    /// # Errors
    ///
    /// [`Error::EmptyInput`] for no sections and [`Error::InvalidShape`] when
    /// a section has `a0 == 0` or a non-finite coefficient.
    pub fn new(sections: Vec<Section>) -> Result<Self> {
        if sections.is_empty() {
            return Err(Error::EmptyInput("SosFilter::new"));
        }
        for s in &sections {
            if s.iter().any(|c| !c.is_finite()) {
                return Err(Error::invalid_shape("sections", "coefficients must be finite"));
            }
            if s[3] == 0.0 {
                return Err(Error::invalid_shape("sections", "a0 must be non-zero"));
            }
        }
        Ok(Self { sections })
    }

    /// Designs an order-`order` Butterworth band-pass.
    ///
    /// `low` and `high` are band edges normalized to Nyquist (`0..1`).
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] for `order == 0` and [`Error::InvalidFrequency`]
    /// unless `0 < low < high < 1`.
    ///
    /// # Example
    /// ```rust
    /// use senal_analysis::SosFilter;
    ///
    /// let filter = SosFilter::butterworth_bandpass(3, 0.1, 0.2).unwrap();
    /// assert_eq!(filter.sections().len(), 3);
    /// ```
    pub fn butterworth_bandpass(order: usize, low: f64, high: f64) -> Result<Self> {
        if order == 0 {
            return Err(Error::invalid_shape("order", "must be at least 1"));
        }
        if !(low > 0.0 && low < high && high < 1.0) {
            return Err(Error::invalid_frequency(
                high,
                format!("band edges [{low}, {high}] must satisfy 0 < low < high < 1 (Nyquist)"),
            ));
        }

        let n = order as f64;

        // Low-pass prototype: -exp(j*pi*m / 2N), m = -N+1, -N+3, ..., N-1
        let prototype: Vec<Complex<f64>> = (0..order)
            .map(|i| {
                let m = -n + 1.0 + 2.0 * i as f64;
                -Complex::from_polar(1.0, PI * m / (2.0 * n))
            })
            .collect();

        // Pre-warped analog band edges
        let warp = |w: f64| 2.0 * DESIGN_RATE * (PI * w / DESIGN_RATE).tan();
        let (w_low, w_high) = (warp(low), warp(high));
        let bandwidth = w_high - w_low;
        let center_sq = w_low * w_high;

        // Low-pass to band-pass: every prototype pole becomes a pair
        let mut analog = Vec::with_capacity(2 * order);
        for p in &prototype {
            let scaled = *p * (bandwidth / 2.0);
            let offset = (scaled * scaled - center_sq).sqrt();
            analog.push(scaled + offset);
            analog.push(scaled - offset);
        }
        // N zeros at s = 0 and gain bw^N
        let analog_gain = bandwidth.powi(order as i32);

        // Bilinear transform
        let fs2 = Complex::new(2.0 * DESIGN_RATE, 0.0);
        let digital: Vec<Complex<f64>> = analog.iter().map(|&p| (fs2 + p) / (fs2 - p)).collect();
        let pole_product: Complex<f64> = analog.iter().map(|&p| fs2 - p).product();
        let zero_product = fs2.powi(order as i32);
        let gain = analog_gain * (zero_product / pole_product).re;

        let mut sections = pair_poles(&digital);
        if let Some(first) = sections.first_mut() {
            first[0] *= gain;
            first[1] *= gain;
            first[2] *= gain;
        }

        Ok(Self { sections })
    }

    /// The sections in processing order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Complex response `H(e^{jw})` at normalized angular frequency `w`
    /// (radians per sample).
    pub fn response_at(&self, w: f64) -> Complex<f64> {
        let z1 = Complex::from_polar(1.0, -w);
        let z2 = z1 * z1;
        self.sections
            .iter()
            .map(|s| (s[0] + z1 * s[1] + z2 * s[2]) / (s[3] + z1 * s[4] + z2 * s[5]))
            .product()
    }

    /// Response at `points` frequencies `w_k = pi * k / points` (Nyquist
    /// excluded), reported in Hz for `sampling_rate`.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidShape`] for zero points and [`Error::InvalidFrequency`]
    /// for a non-positive sampling rate.
    pub fn frequency_response(&self, points: usize, sampling_rate: f64) -> Result<FrequencyResponse> {
        if points == 0 {
            return Err(Error::invalid_shape("freq_points", "must be at least 1"));
        }
        if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
            return Err(Error::invalid_frequency(
                sampling_rate,
                "sampling rate must be positive and finite",
            ));
        }

        let mut response = FrequencyResponse {
            frequencies: Vec::with_capacity(points),
            magnitude_db: Vec::with_capacity(points),
            phase: Vec::with_capacity(points),
        };
        for k in 0..points {
            let w = PI * k as f64 / points as f64;
            let h = self.response_at(w);
            response.frequencies.push(w / (2.0 * PI) * sampling_rate);
            response.magnitude_db.push(20.0 * h.norm().log10());
            response.phase.push(h.im.atan2(h.re));
        }
        Ok(response)
    }

    /// Filters `input` through the cascade, starting from zero state.
    ///
    /// Each section runs in transposed direct form II.
    pub fn apply(&self, input: &[f64]) -> Vec<f64> {
        let mut output = input.to_vec();
        for s in &self.sections {
            let (b0, b1, b2) = (s[0] / s[3], s[1] / s[3], s[2] / s[3]);
            let (a1, a2) = (s[4] / s[3], s[5] / s[3]);
            let (mut z1, mut z2) = (0.0, 0.0);
            for x in output.iter_mut() {
                let input = *x;
                let y = b0 * input + z1;
                z1 = b1 * input - a1 * y + z2;
                z2 = b2 * input - a2 * y;
                *x = y;
            }
        }
        output
    }
}

/// Groups z-plane poles into sections with zeros at `z = 1` and `z = -1`.
///
/// Complex poles are represented by their upper-half-plane member; real
/// poles are paired in ascending order. Sections are ordered by pole radius
/// so the poles nearest the unit circle are applied last.
fn pair_poles(poles: &[Complex<f64>]) -> Vec<Section> {
    let is_real = |p: &Complex<f64>| p.im.abs() <= 1e-10 * p.norm().max(1.0);

    let mut grouped: Vec<(f64, [f64; 2])> = poles
        .iter()
        .filter(|&p| !is_real(p) && p.im > 0.0)
        .map(|p| (p.norm(), [-2.0 * p.re, p.norm_sqr()]))
        .collect();

    let mut real: Vec<f64> = poles.iter().filter(|&p| is_real(p)).map(|p| p.re).collect();
    real.sort_by(f64::total_cmp);
    for pair in real.chunks(2) {
        match *pair {
            [r1, r2] => grouped.push((r1.abs().max(r2.abs()), [-(r1 + r2), r1 * r2])),
            [r] => grouped.push((r.abs(), [-r, 0.0])),
            _ => {}
        }
    }

    grouped.sort_by(|a, b| a.0.total_cmp(&b.0));
    grouped
        .into_iter()
        .map(|(_, [a1, a2])| [1.0, 0.0, -1.0, 1.0, a1, a2])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gain_at(filter: &SosFilter, normalized: f64) -> f64 {
        filter.response_at(PI * normalized).norm()
    }

    #[test]
    fn first_order_matches_closed_form() {
        // H(z) = k (1 - z^-2) / (1 + a1 z^-1 + a2 z^-2) with k = (1 - a2) / 2
        let filter = SosFilter::butterworth_bandpass(1, 0.25, 0.5).unwrap();
        let [b0, b1, b2, a0, a1, a2] = filter.sections()[0];
        assert_eq!(a0, 1.0);
        assert_eq!(b1, 0.0);
        assert!((b0 + b2).abs() < 1e-15);
        assert!((b0 - (1.0 - a2) / 2.0).abs() < 1e-12);
        assert!(a1.is_finite());
    }

    #[test]
    fn section_count_equals_order() {
        for order in 1..=6 {
            let filter = SosFilter::butterworth_bandpass(order, 0.05, 0.1).unwrap();
            assert_eq!(filter.sections().len(), order);
        }
    }

    #[test]
    fn passband_has_unit_gain_and_edges_are_3db_down() {
        let (low, high) = (0.1, 0.2);
        let filter = SosFilter::butterworth_bandpass(3, low, high).unwrap();

        // digital centre: geometric mean of the pre-warped edges
        let warp = |w: f64| (PI * w / 2.0).tan();
        let centre = 2.0 / PI * (warp(low) * warp(high)).sqrt().atan();
        assert!((gain_at(&filter, centre) - 1.0).abs() < 1e-9);

        let half_power = std::f64::consts::FRAC_1_SQRT_2;
        assert!((gain_at(&filter, low) - half_power).abs() < 1e-9);
        assert!((gain_at(&filter, high) - half_power).abs() < 1e-9);
    }

    #[test]
    fn stopband_is_attenuated() {
        let filter = SosFilter::butterworth_bandpass(3, 0.1, 0.2).unwrap();
        assert!(gain_at(&filter, 0.01) < 1e-3);
        assert!(gain_at(&filter, 0.8) < 1e-3);
    }

    #[test]
    fn poles_are_inside_unit_circle() {
        let filter = SosFilter::butterworth_bandpass(4, 0.001, 0.002).unwrap();
        for s in filter.sections() {
            // a biquad is stable iff |a2| < 1 and |a1| < 1 + a2
            assert!(s[5].abs() < 1.0);
            assert!(s[4].abs() < 1.0 + s[5]);
        }
    }

    #[test]
    fn rejects_bad_design_parameters() {
        assert!(matches!(
            SosFilter::butterworth_bandpass(0, 0.1, 0.2),
            Err(Error::InvalidShape { param: "order", .. })
        ));
        assert!(matches!(
            SosFilter::butterworth_bandpass(3, 0.2, 0.1),
            Err(Error::InvalidFrequency { .. })
        ));
        assert!(matches!(
            SosFilter::butterworth_bandpass(3, 0.5, 1.0),
            Err(Error::InvalidFrequency { .. })
        ));
        assert!(matches!(
            SosFilter::butterworth_bandpass(3, 0.0, 0.5),
            Err(Error::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn frequency_response_axis_and_dc_zero() {
        let filter = SosFilter::butterworth_bandpass(2, 0.1, 0.3).unwrap();
        let response = filter.frequency_response(512, 48000.0).unwrap();
        assert_eq!(response.frequencies.len(), 512);
        assert_eq!(response.frequencies[0], 0.0);
        assert!((response.frequencies[256] - 12000.0).abs() < 1e-9);
        // zeros at z = 1
        assert_eq!(response.magnitude_db[0], f64::NEG_INFINITY);
        assert!(response.magnitude_db[100].is_finite());
    }

    #[test]
    fn apply_tracks_response_in_steady_state() {
        let fs = 8000.0;
        let filter = SosFilter::butterworth_bandpass(2, 0.2, 0.3).unwrap();
        let f = 1000.0;
        let input: Vec<f64> = (0..16000)
            .map(|i| (2.0 * PI * f * i as f64 / fs).sin())
            .collect();
        let output = filter.apply(&input);

        // 1000 whole periods of 8 samples each
        let tail = &output[8000..];
        let rms = (tail.iter().map(|v| v * v).sum::<f64>() / tail.len() as f64).sqrt();
        let expected = filter.response_at(2.0 * PI * f / fs).norm() / 2f64.sqrt();
        assert!((rms - expected).abs() < 1e-3, "{rms} vs {expected}");
    }

    #[test]
    fn apply_impulse_matches_single_section_recursion() {
        let filter = SosFilter::new(vec![[0.5, 0.0, -0.5, 1.0, -0.2, 0.1]]).unwrap();
        let y = filter.apply(&[1.0, 0.0, 0.0]);
        assert_eq!(y[0], 0.5);
        assert!((y[1] - 0.1).abs() < 1e-15);
        // y2 = -0.5 + 0.2 * y1 - 0.1 * y0
        assert!((y[2] - (-0.5 + 0.2 * 0.1 - 0.1 * 0.5)).abs() < 1e-15);
    }

    #[test]
    fn new_validates_sections() {
        assert!(SosFilter::new(vec![]).is_err());
        assert!(SosFilter::new(vec![[1.0, 0.0, 0.0, 0.0, 0.0, 0.0]]).is_err());
        assert!(SosFilter::new(vec![[f64::NAN, 0.0, 0.0, 1.0, 0.0, 0.0]]).is_err());
    }
}
