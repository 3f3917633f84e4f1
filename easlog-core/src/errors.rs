//! Error Types for Calibration Decoding
//!
//! Only the calibration image decode can fail inside this crate. Packet
//! decoding absorbs short frames and unknown types as "no output", and
//! compensation has no failure mode at all: out-of-range results clamp and
//! the pressure divisor guard returns the minimum pressure.
//!
//! Errors follow the same rules as the rest of the crate:
//! - **Copy** and small, so they are cheap to return and store
//! - **No heap**: integer payloads only
//!
//! ```
//! use easlog_core::{CalibrationCoefficients, CalibrationError};
//!
//! match CalibrationCoefficients::from_hex("8a6e") {
//!     Err(CalibrationError::TooShort { expected, actual }) => {
//!         assert_eq!((expected, actual), (64, 4));
//!     }
//!     other => panic!("unexpected {:?}", other),
//! }
//! ```

use thiserror_no_std::Error;

/// Result type for calibration decoding
pub type CalibrationResult<T> = Result<T, CalibrationError>;

/// Calibration image decode errors
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// Not enough input to cover the whole calibration image
    #[error("Calibration data too short: need {expected}, have {actual}")]
    TooShort {
        /// Units (bytes or hex characters) required
        expected: usize,
        /// Units actually supplied
        actual: usize,
    },

    /// A character in the hex dump is not a hex digit
    #[error("Invalid hex digit at position {position}")]
    InvalidHexDigit {
        /// Character offset into the dump
        position: usize,
    },
}

#[cfg(feature = "defmt")]
impl defmt::Format for CalibrationError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::TooShort { expected, actual } =>
                defmt::write!(fmt, "Calibration too short: need {}, have {}", expected, actual),
            Self::InvalidHexDigit { position } =>
                defmt::write!(fmt, "Invalid hex digit at {}", position),
        }
    }
}
