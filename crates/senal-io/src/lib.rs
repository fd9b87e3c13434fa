//! Persistence layer for senal signals and analyses.
//!
//! This crate provides:
//!
//! - **WAV files**: [`write_wav`], [`read_wav`] and [`write_signal_wav`]
//! - **CSV tables**: waveforms, spectra and filter-bank levels
//! - **FRD files**: band-pass frequency responses in the REW text format
//! - **JSON summaries**: [`SignalSummary`] and [`BandSummary`]
//!
//! The computational crates never touch the filesystem; everything that
//! reads or writes a path lives here.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use senal_core::Signal;
//! use senal_io::{write_signal_csv, write_signal_wav, SignalSummary, write_json};
//!
//! let sine = Signal::sinewave(1000.0, 1.0, 0.0, 48000.0, None)?.extended(1.0)?;
//! write_signal_wav("sine.wav", &sine, 32)?;
//! write_signal_csv("sine.csv", &sine)?;
//! write_json("sine.json", &SignalSummary::from_signal(&sine))?;
//! ```

mod summary;
mod table;
mod wav;

pub use summary::{BandLevel, BandSummary, Component, SignalSummary, read_json, write_json};
pub use table::{
    write_bands_csv, write_response_frd, write_series_csv, write_signal_csv, write_spectrum_csv,
};
pub use wav::{WavSpec, read_wav, signal_sample_rate, write_signal_wav, write_wav};

/// Error types for persistence operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// WAV file read/write error.
    #[error("WAV file error: {0}")]
    Wav(#[from] hound::Error),

    /// Standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encoding or decoding error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The signal cannot be represented in the requested format.
    #[error("Signal error: {0}")]
    Signal(#[from] senal_core::Error),

    /// Unsupported WAV bit depth.
    #[error("Unsupported bit depth: {0} (expected 16, 24 or 32)")]
    UnsupportedBitDepth(u16),
}

/// Convenience result type for persistence operations.
pub type Result<T> = std::result::Result<T, Error>;
