//! FFT wrapper around a cached `rustfft` plan

use rustfft::{FftPlanner, num_complex::Complex};
use std::sync::Arc;

/// FFT processor with cached forward and inverse plans
pub struct Fft {
    fft: Arc<dyn rustfft::Fft<f64>>,
    ifft: Arc<dyn rustfft::Fft<f64>>,
    size: usize,
}

impl Fft {
    /// Create a new FFT processor for the given size
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        Self {
            fft: planner.plan_fft_forward(size),
            ifft: planner.plan_fft_inverse(size),
            size,
        }
    }

    /// Full complex spectrum of a real input.
    ///
    /// The input is zero-padded or truncated to the FFT size. All `size`
    /// bins are returned, negative frequencies included.
    pub fn forward(&self, input: &[f64]) -> Vec<Complex<f64>> {
        let mut buffer: Vec<Complex<f64>> =
            input.iter().map(|&x| Complex::new(x, 0.0)).collect();
        buffer.resize(self.size, Complex::new(0.0, 0.0));

        self.fft.process(&mut buffer);
        buffer
    }

    /// Perform inverse FFT on complex buffer (in-place), scaled by `1 / size`
    pub fn inverse_complex(&self, buffer: &mut [Complex<f64>]) {
        self.ifft.process(buffer);

        let scale = 1.0 / self.size as f64;
        for c in buffer.iter_mut() {
            *c *= scale;
        }
    }
}

/// Magnitude of each bin
pub fn magnitude(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|c| c.norm()).collect()
}

/// Phase of each bin in radians, `atan2(im, re)`
pub fn phase_rad(spectrum: &[Complex<f64>]) -> Vec<f64> {
    spectrum.iter().map(|c| c.im.atan2(c.re)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    #[test]
    fn forward_then_inverse_restores_input() {
        let fft = Fft::new(256);
        let input: Vec<f64> = (0..256)
            .map(|i| (2.0 * PI * 10.0 * i as f64 / 256.0).sin())
            .collect();

        let mut spectrum = fft.forward(&input);
        fft.inverse_complex(&mut spectrum);

        for (a, b) in input.iter().zip(&spectrum) {
            assert!((a - b.re).abs() < 1e-12, "Mismatch: {} vs {}", a, b.re);
            assert!(b.im.abs() < 1e-12);
        }
    }

    #[test]
    fn forward_pads_short_input() {
        let fft = Fft::new(8);
        let spectrum = fft.forward(&[1.0]);
        assert_eq!(spectrum.len(), 8);
        // an impulse has a flat spectrum
        for c in &spectrum {
            assert!((c.norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn phase_of_cosine_and_sine_bins() {
        let n = 64;
        let fft = Fft::new(n);
        let cosine: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 4.0 * i as f64 / n as f64).cos())
            .collect();
        let sine: Vec<f64> = (0..n)
            .map(|i| (2.0 * PI * 4.0 * i as f64 / n as f64).sin())
            .collect();

        let cos_phase = phase_rad(&fft.forward(&cosine))[4];
        let sin_phase = phase_rad(&fft.forward(&sine))[4];
        assert!(cos_phase.abs() < 1e-9);
        assert!((sin_phase + PI / 2.0).abs() < 1e-9);
        assert!((magnitude(&fft.forward(&cosine))[4] - n as f64 / 2.0).abs() < 1e-9);
    }
}
