//! Senal Analysis - spectra, octave bands and levels for senal signals
//!
//! - [`fft`] - real-to-complex FFT wrapper
//! - [`spectrum`] - one-sided magnitude/phase spectra
//! - [`octave`] - fractional-octave band geometry
//! - [`butterworth`] - Butterworth band-pass design in second-order sections
//! - [`spl`] - sound pressure level and energetic averaging
//! - [`filterbank`] - fractional-octave filter banks
//! - [`ir`] - impulse responses from exponential sine sweeps
//! - [`aliasing`] - coarse sampling of tone sums
//!
//! # Example
//!
//! ```rust
//! use senal_analysis::{analyze, peak_frequency};
//! use senal_core::Signal;
//!
//! let fs = 48000.0;
//! let sine = Signal::sinewave(1000.0, 1.0, 0.0, fs, None)?.extended(0.01)?;
//! let analyzed = analyze(sine, fs)?;
//!
//! let peak = peak_frequency(&analyzed.spectrum()).unwrap();
//! assert!((peak - 1000.0).abs() < 100.0);
//! # Ok::<(), senal_core::Error>(())
//! ```

pub mod aliasing;
pub mod butterworth;
pub mod fft;
pub mod filterbank;
pub mod ir;
pub mod octave;
pub mod spectrum;
pub mod spl;

pub use aliasing::{SampledSum, frequencies_sum};
pub use butterworth::{FrequencyResponse, Section, SosFilter};
pub use fft::Fft;
pub use filterbank::{
    BandEntry, BandpassDesign, BandpassOptions, DEFAULT_FREQ_POINTS, DEFAULT_ORDER,
    FilterBankOptions, FilterBankResult, bandpass_filter, filter_bank,
};
pub use ir::{ImpulseResponse, SineSweep, impulse_response, inverse_filter};
pub use octave::{
    OCTAVE_RATIO_BASE_2, OCTAVE_RATIO_BASE_10, REFERENCE_FREQUENCY, band_indices,
    octave_band_center_frequency, octave_band_cutoffs,
};
pub use spectrum::{analyze, fft_spectrum, peak_frequency};
pub use spl::{P_REF, spl, spl_average};
