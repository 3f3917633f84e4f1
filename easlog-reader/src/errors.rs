//! Error types for whole-file reading
//!
//! Two levels:
//! - [`ReaderError`]: what went wrong, for the file or for one section
//! - [`SectionError`]: a `ReaderError` pinned to the header section that
//!   raised it
//!
//! Only [`ReaderError::InvalidHeaderLength`] and [`ReaderError::LogTooShort`]
//! abort a read. Everything else is collected per section and reading
//! carries on with the next one.

use easlog_core::CalibrationError;
use thiserror::Error;

/// Result type for reader operations
pub type ReaderResult<T> = Result<T, ReaderError>;

/// Reader errors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ReaderError {
    /// Header length must be a non-zero multiple of 0x400
    #[error("Invalid header length {len:#x}: must be a non-zero multiple of 0x400")]
    InvalidHeaderLength { len: usize },

    /// File ends inside the header block
    #[error("Log is {len} bytes, shorter than its {header_len}-byte header")]
    LogTooShort { len: usize, header_len: usize },

    /// Section text is not valid UTF-8
    #[error("Header section is not valid UTF-8")]
    MalformedHeader,

    /// Calibration section ends before its coefficient line
    #[error("Calibration section has no line {line}")]
    MissingCoefficientLine { line: usize },

    /// Coefficient line has neither `||` nor `": "`
    #[error("Coefficient line has no separator")]
    MissingSeparator,

    /// First line does not end in an unsigned integer id
    #[error("Sensor ID is missing or not an unsigned integer")]
    InvalidSensorId,

    /// Coefficient dump did not decode
    #[error("Calibration error: {0}")]
    Calibration(#[from] CalibrationError),
}

/// Failure of one header section
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[error("Header section {section}: {error}")]
pub struct SectionError {
    /// Index of the section, counted from zero in `-----` order
    pub section: usize,
    /// Sensor id, if it was parsed before the failure
    pub sensor_id: Option<u32>,
    /// Cause
    #[source]
    #[cfg_attr(feature = "serde", serde(serialize_with = "serialize_display"))]
    pub error: ReaderError,
}

#[cfg(feature = "serde")]
fn serialize_display<S: serde::Serializer>(
    error: &ReaderError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}
