//! Integration tests for senal-analysis.
//!
//! Spectra, octave bands, filter banks and sweeps exercised through the
//! public API with signals built by senal-core.

use std::f64::consts::PI;

use proptest::prelude::*;
use senal_analysis::{
    FilterBankOptions, P_REF, SineSweep, analyze, fft_spectrum, filter_bank, frequencies_sum,
    impulse_response, octave_band_center_frequency, octave_band_cutoffs, peak_frequency, spl,
    spl_average,
};
use senal_core::{Signal, sum_signals};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn sine(freq: f64, fs: f64, n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| (2.0 * PI * freq * i as f64 / fs).sin())
        .collect()
}

// ===========================================================================
// Spectra
// ===========================================================================

#[test]
fn spectrum_of_a_sum_shows_both_tones() {
    let fs = 48000.0;
    let sum = sum_signals(&[
        Signal::sinewave(100.0, 1.0, 0.0, fs, None).unwrap(),
        Signal::sinewave(300.0, 0.5, 0.0, fs, None).unwrap(),
    ])
    .unwrap()
    .extended(0.1)
    .unwrap();
    assert_eq!(sum.len(), 4800);

    let analyzed = analyze(sum, fs).unwrap();
    // 10 Hz resolution
    assert!((analyzed.magnitude_array[10] - 1.0).abs() < 1e-9);
    assert!((analyzed.magnitude_array[30] - 0.5).abs() < 1e-9);
    assert!(analyzed.magnitude_array[20].abs() < 1e-9);
    assert_eq!(analyzed.frequency_array.len(), analyzed.phase_array.len());
}

proptest! {
    #[test]
    fn fft_peak_is_within_half_a_bin(k in 2usize..510, offset in -0.4f64..0.4) {
        let n = 1024;
        let fs = 1024.0;
        let freq = (k as f64 + offset) * fs / n as f64;

        let spectrum = fft_spectrum(&sine(freq, fs, n), fs).unwrap();
        let peak = peak_frequency(&spectrum).unwrap();
        prop_assert!(
            (peak - freq).abs() <= fs / (2.0 * n as f64),
            "{} Hz reported at {} Hz",
            freq,
            peak
        );
    }

    #[test]
    fn equal_levels_average_to_themselves(level in -20.0f64..140.0) {
        let avg = spl_average(&[level, level, level]).unwrap();
        prop_assert!((avg - level).abs() < 1e-9);
    }

    #[test]
    fn reference_band_is_always_1k(b in 1u32..25) {
        let centre = octave_band_center_frequency(0, b, 2.0, 1000.0).unwrap();
        if b % 2 == 1 {
            prop_assert_eq!(centre, 1000.0);
        } else {
            let (low, _) = octave_band_cutoffs(centre, b, 2.0).unwrap();
            prop_assert!((low - 1000.0).abs() < 0.5);
        }
    }
}

// ===========================================================================
// Filter banks and levels
// ===========================================================================

#[test]
fn one_pascal_tone_reads_about_94_db_in_its_band() {
    let fs = 48000.0;
    let tone = Signal::sinewave(1000.0, 1.0, 0.0, fs, None)
        .unwrap()
        .extended(0.2)
        .unwrap();

    let result = filter_bank(&tone.amplitude_array, fs, &FilterBankOptions::default()).unwrap();
    let loudest = result.loudest_band().unwrap();
    assert_eq!(loudest.center_frequency, 1000.0);

    let band = result.bands.iter().position(|b| b.index == 0).unwrap();
    // instantaneous levels of a sine average below its 94 dB peak
    assert!(result.spl[band] > 80.0 && result.spl[band] < 94.0);
    assert!(result.spl[band] > result.spl[band + 2] + 20.0);
}

#[test]
fn spl_of_reference_pressure_is_zero() {
    let levels = spl(&[P_REF, -P_REF], P_REF).unwrap();
    assert!(levels.iter().all(|l| l.abs() < 1e-12));
}

// ===========================================================================
// Sweeps and aliasing
// ===========================================================================

#[test]
fn sweep_through_identity_system_gives_a_clean_impulse() {
    let fs = 16000.0;
    let sweep = SineSweep::new(fs, 40.0, 6000.0, 0.5).unwrap();
    let recorded = sweep.generate();
    let inverse = sweep.inverse_filter().unwrap();

    let ir = impulse_response(&recorded, &inverse, fs).unwrap();
    assert_eq!(ir.time.len(), sweep.num_samples());
    let peak = ir.amplitude.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    assert!((peak - 1.0).abs() < 1e-9);
}

#[test]
fn aliased_tones_are_indistinguishable() {
    // 101 points over 1 s: effective rate 100 Hz
    let a = frequencies_sum(&[7.0], 101, 1.0).unwrap();
    let b = frequencies_sum(&[107.0], 101, 1.0).unwrap();
    assert_eq!(a.len(), 101);
    assert!(
        a.amplitude
            .iter()
            .zip(&b.amplitude)
            .all(|(x, y)| (x - y).abs() < 1e-9)
    );
}
