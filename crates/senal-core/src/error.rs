//! Error types for signal construction and combination.

use thiserror::Error;

/// Errors raised by the synthesis, domain, and combination operations.
///
/// Every operation validates its inputs before allocating or mutating
/// anything, so an `Err` always means nothing was changed.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    /// A start/end or on/off ordering constraint was violated.
    #[error("invalid range: {0}")]
    InvalidRange(String),

    /// A requested sample index lies outside the domain.
    #[error("index {index} is out of range for a domain of {len} samples")]
    IndexOutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the domain it was checked against.
        len: usize,
    },

    /// A pulse would be on for more than the whole domain.
    #[error("duty cycle of {duty_cycle:.2}% exceeds 100%")]
    DutyCycleExceeded {
        /// Requested duty cycle in percent.
        duty_cycle: f64,
    },

    /// A geometric or statistical shape parameter is out of range.
    #[error("invalid shape parameter '{param}': {reason}")]
    InvalidShape {
        /// Name of the parameter.
        param: &'static str,
        /// Why the value was rejected.
        reason: String,
    },

    /// An aggregate received no values.
    #[error("{0} requires at least one value")]
    EmptyInput(&'static str),

    /// A frequency or rate that must be positive and finite was not.
    #[error("invalid frequency {value}: {reason}")]
    InvalidFrequency {
        /// The rejected value.
        value: f64,
        /// Why the value was rejected.
        reason: String,
    },

    /// Signals cannot be superposed sample by sample.
    #[error("incompatible signals: {0}")]
    IncompatibleSignals(String),
}

impl Error {
    /// Create an invalid shape error.
    pub fn invalid_shape(param: &'static str, reason: impl Into<String>) -> Self {
        Error::InvalidShape {
            param,
            reason: reason.into(),
        }
    }

    /// Create an invalid frequency error.
    pub fn invalid_frequency(value: f64, reason: impl Into<String>) -> Self {
        Error::InvalidFrequency {
            value,
            reason: reason.into(),
        }
    }
}

/// Convenience result type for senal operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Reject frequencies and rates that are not strictly positive and finite.
pub(crate) fn ensure_positive(value: f64, what: &str) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(Error::invalid_frequency(
            value,
            format!("{what} must be positive and finite"),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn index_out_of_range_display() {
        let err = Error::IndexOutOfRange { index: 21, len: 21 };
        assert_eq!(
            err.to_string(),
            "index 21 is out of range for a domain of 21 samples"
        );
    }

    #[test]
    fn duty_cycle_display_rounds_to_two_places() {
        let err = Error::DutyCycleExceeded { duty_cycle: 104.7619 };
        assert_eq!(err.to_string(), "duty cycle of 104.76% exceeds 100%");
    }

    #[test]
    fn invalid_shape_factory() {
        let err = Error::invalid_shape("half_base", "must be positive");
        assert!(matches!(
            err,
            Error::InvalidShape { param: "half_base", .. }
        ));
        assert!(err.to_string().contains("half_base"));
    }

    #[test]
    fn ensure_positive_rejects_zero_nan_and_inf() {
        assert!(ensure_positive(1.0, "frequency").is_ok());
        assert!(ensure_positive(0.0, "frequency").is_err());
        assert!(ensure_positive(-3.0, "frequency").is_err());
        assert!(ensure_positive(f64::NAN, "frequency").is_err());
        assert!(ensure_positive(f64::INFINITY, "frequency").is_err());
    }
}
