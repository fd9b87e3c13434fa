//! Fractional-octave band-pass filters and filter banks.
//!
//! Each band is a Butterworth band-pass between the band edges given by
//! [`octave_band_cutoffs`]. A filter bank designs every band of the
//! standard index range, runs the input through each one, and reports the
//! energetically averaged sound pressure level per band.
//!
//! # Example
//!
//! ```rust
//! use senal_analysis::filterbank::{FilterBankOptions, filter_bank};
//!
//! let fs = 48000.0;
//! let tone: Vec<f64> = (0..4800)
//!     .map(|i| (2.0 * std::f64::consts::PI * 1000.0 * i as f64 / fs).sin())
//!     .collect();
//!
//! let result = filter_bank(&tone, fs, &FilterBankOptions::default()).unwrap();
//! assert_eq!(result.bands.len(), 10);
//! assert_eq!(result.loudest_band().unwrap().center_frequency, 1000.0);
//! ```

use senal_core::{Error, Result};

use crate::butterworth::{FrequencyResponse, SosFilter};
use crate::octave::{
    OCTAVE_RATIO_BASE_2, REFERENCE_FREQUENCY, band_indices, octave_band_center_frequency,
    octave_band_cutoffs,
};
use crate::spl::{P_REF, spl, spl_average};

/// Default filter order.
pub const DEFAULT_ORDER: usize = 3;

/// Default number of frequency-response points.
pub const DEFAULT_FREQ_POINTS: usize = 5120;

/// Band geometry and design parameters for a single band-pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BandpassOptions {
    /// `b` in a `1/b`-octave system.
    pub bandwidth_fraction: u32,
    /// Octave ratio `G` (2 or `10^(3/10)`).
    pub octave_ratio: f64,
    /// Butterworth order; the design has this many sections.
    pub order: usize,
    /// Number of frequency-response points.
    pub freq_points: usize,
    /// Centre of band 0 in Hz.
    pub reference_frequency: f64,
}

impl Default for BandpassOptions {
    fn default() -> Self {
        Self {
            bandwidth_fraction: 1,
            octave_ratio: OCTAVE_RATIO_BASE_2,
            order: DEFAULT_ORDER,
            freq_points: DEFAULT_FREQ_POINTS,
            reference_frequency: REFERENCE_FREQUENCY,
        }
    }
}

/// Parameters of a filter bank.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterBankOptions {
    /// Reference pressure for SPL.
    pub p_ref: f64,
    /// `b` in a `1/b`-octave system.
    pub bandwidth_fraction: u32,
    /// Octave ratio `G`.
    pub octave_ratio: f64,
    /// Butterworth order of every band.
    pub order: usize,
    /// Centre of band 0 in Hz.
    pub reference_frequency: f64,
}

impl Default for FilterBankOptions {
    fn default() -> Self {
        Self {
            p_ref: P_REF,
            bandwidth_fraction: 1,
            octave_ratio: OCTAVE_RATIO_BASE_2,
            order: DEFAULT_ORDER,
            reference_frequency: REFERENCE_FREQUENCY,
        }
    }
}

/// One designed band.
#[derive(Debug, Clone, PartialEq)]
pub struct BandEntry {
    /// Band index `x`; 0 is the reference band.
    pub index: i32,
    /// Centre frequency in Hz.
    pub center_frequency: f64,
    /// Lower edge in Hz.
    pub cutoff_low: f64,
    /// Upper edge in Hz.
    pub cutoff_high: f64,
    /// The band-pass filter.
    pub filter: SosFilter,
}

/// A band-pass design together with its frequency response.
#[derive(Debug, Clone, PartialEq)]
pub struct BandpassDesign {
    /// Band geometry and filter.
    pub band: BandEntry,
    /// Response over `freq_points` frequencies from 0 Hz up to Nyquist.
    pub response: FrequencyResponse,
}

/// Output of [`filter_bank`].
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBankResult {
    /// Designed bands in ascending frequency.
    pub bands: Vec<BandEntry>,
    /// Averaged SPL of the input in each band, in dB.
    pub spl: Vec<f64>,
}

impl FilterBankResult {
    /// Band centre frequencies.
    pub fn centers(&self) -> Vec<f64> {
        self.bands.iter().map(|b| b.center_frequency).collect()
    }

    /// Band with the highest averaged level.
    pub fn loudest_band(&self) -> Option<&BandEntry> {
        self.spl
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(i, _)| &self.bands[i])
    }
}

fn design_band(
    x: i32,
    sampling_rate: f64,
    bandwidth_fraction: u32,
    octave_ratio: f64,
    order: usize,
    reference_frequency: f64,
) -> Result<BandEntry> {
    if !(sampling_rate.is_finite() && sampling_rate > 0.0) {
        return Err(Error::invalid_frequency(
            sampling_rate,
            "sampling rate must be positive and finite",
        ));
    }

    let center =
        octave_band_center_frequency(x, bandwidth_fraction, octave_ratio, reference_frequency)?;
    let (low, high) = octave_band_cutoffs(center, bandwidth_fraction, octave_ratio)?;

    let nyquist = sampling_rate / 2.0;
    if high >= nyquist {
        return Err(Error::invalid_frequency(
            high,
            format!("band {x} ({center} Hz) reaches Nyquist at {nyquist} Hz"),
        ));
    }

    let filter = SosFilter::butterworth_bandpass(order, low / nyquist, high / nyquist)?;

    Ok(BandEntry {
        index: x,
        center_frequency: center,
        cutoff_low: low,
        cutoff_high: high,
        filter,
    })
}

/// Designs the band-pass for band `x` and evaluates its response.
///
/// # Errors
///
/// - [`Error::InvalidShape`] for a zero order, zero response points or bad
///   band geometry
/// - [`Error::InvalidFrequency`] when the band does not fit below Nyquist
pub fn bandpass_filter(
    x: i32,
    sampling_rate: f64,
    options: &BandpassOptions,
) -> Result<BandpassDesign> {
    let band = design_band(
        x,
        sampling_rate,
        options.bandwidth_fraction,
        options.octave_ratio,
        options.order,
        options.reference_frequency,
    )?;
    let response = band
        .filter
        .frequency_response(options.freq_points, sampling_rate)?;

    Ok(BandpassDesign { band, response })
}

/// Splits `signal` into fractional-octave bands and averages the SPL of each.
///
/// All bands are designed before any filtering, so a band that does not fit
/// below Nyquist fails the whole call without partial work.
///
/// # Errors
///
/// - [`Error::EmptyInput`] for an empty signal
/// - [`Error::InvalidShape`] for a bad order, geometry or reference pressure
/// - [`Error::InvalidFrequency`] when the top band reaches Nyquist
pub fn filter_bank(
    signal: &[f64],
    sampling_rate: f64,
    options: &FilterBankOptions,
) -> Result<FilterBankResult> {
    if signal.is_empty() {
        return Err(Error::EmptyInput("filter_bank"));
    }
    if !(options.p_ref.is_finite() && options.p_ref > 0.0) {
        return Err(Error::invalid_shape(
            "p_ref",
            format!("{} must be positive and finite", options.p_ref),
        ));
    }

    let bands = band_indices(options.bandwidth_fraction)
        .map(|x| {
            design_band(
                x,
                sampling_rate,
                options.bandwidth_fraction,
                options.octave_ratio,
                options.order,
                options.reference_frequency,
            )
        })
        .collect::<Result<Vec<_>>>()?;

    #[cfg(feature = "tracing")]
    tracing::debug!(
        bands = bands.len(),
        samples = signal.len(),
        sampling_rate,
        "filter bank designed"
    );

    let spl = bands
        .iter()
        .map(|band| {
            let filtered = band.filter.apply(signal);
            spl_average(&spl(&filtered, options.p_ref)?)
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(FilterBankResult { bands, spl })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;

    fn tone(freq: f64, fs: f64, n: usize, amplitude: f64) -> Vec<f64> {
        (0..n)
            .map(|i| amplitude * (2.0 * PI * freq * i as f64 / fs).sin())
            .collect()
    }

    #[test]
    fn reference_band_design() {
        let design = bandpass_filter(0, 48000.0, &BandpassOptions::default()).unwrap();
        assert_eq!(design.band.center_frequency, 1000.0);
        assert!((design.band.cutoff_low - 707.106_781_186_547_5).abs() < 1e-9);
        assert_eq!(design.band.filter.sections().len(), 3);
        assert_eq!(design.response.frequencies.len(), DEFAULT_FREQ_POINTS);
    }

    #[test]
    fn response_peaks_inside_the_band() {
        let design = bandpass_filter(0, 48000.0, &BandpassOptions::default()).unwrap();
        let (i_max, _) = design
            .response
            .magnitude_db
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .unwrap();
        let f_peak = design.response.frequencies[i_max];
        assert!(f_peak > design.band.cutoff_low && f_peak < design.band.cutoff_high);
        assert!(design.response.magnitude_db[i_max].abs() < 0.1);
    }

    #[test]
    fn band_above_nyquist_is_rejected() {
        // band 4 reaches 22.6 kHz, above 22.05 kHz
        assert!(matches!(
            bandpass_filter(4, 44100.0, &BandpassOptions::default()),
            Err(Error::InvalidFrequency { .. })
        ));
        assert!(matches!(
            filter_bank(&[1.0; 64], 44100.0, &FilterBankOptions::default()),
            Err(Error::InvalidFrequency { .. })
        ));
    }

    #[test]
    fn zero_order_is_rejected() {
        let options = BandpassOptions {
            order: 0,
            ..BandpassOptions::default()
        };
        assert!(matches!(
            bandpass_filter(0, 48000.0, &options),
            Err(Error::InvalidShape { param: "order", .. })
        ));
    }

    #[test]
    fn filter_bank_locates_a_tone() {
        let fs = 48000.0;
        let result = filter_bank(&tone(4000.0, fs, 9600, 1.0), fs, &FilterBankOptions::default())
            .unwrap();
        assert_eq!(result.centers().len(), result.spl.len());
        assert_eq!(result.loudest_band().unwrap().center_frequency, 4000.0);
    }

    #[test]
    fn filter_bank_third_octaves() {
        let fs = 96000.0;
        let options = FilterBankOptions {
            bandwidth_fraction: 3,
            ..FilterBankOptions::default()
        };
        let result = filter_bank(&tone(1000.0, fs, 9600, 1.0), fs, &options).unwrap();
        assert_eq!(result.bands.len(), 30);
        assert_eq!(result.bands[0].index, -16);
        assert!(result.bands.windows(2).all(|w| w[0].center_frequency < w[1].center_frequency));
        assert_eq!(result.loudest_band().unwrap().index, 0);
    }

    #[test]
    fn filter_bank_rejects_empty_signal_and_bad_reference() {
        assert!(matches!(
            filter_bank(&[], 48000.0, &FilterBankOptions::default()),
            Err(Error::EmptyInput(_))
        ));
        let options = FilterBankOptions {
            p_ref: 0.0,
            ..FilterBankOptions::default()
        };
        assert!(matches!(
            filter_bank(&[1.0], 48000.0, &options),
            Err(Error::InvalidShape { param: "p_ref", .. })
        ));
    }
}
