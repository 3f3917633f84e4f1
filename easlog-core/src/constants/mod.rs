//! Constants for EAS Log Decoding
//!
//! Every numeric value used by the compensation engine and the decoders
//! lives here, with the source it was taken from.
//!
//! ## Organization
//!
//! - **Limits**: clamp ranges applied to compensated output
//! - **Layout**: block sizes, offsets and markers of the log format

/// Output clamp ranges from the BME280 reference driver.
pub mod limits;

/// Byte and text layout of the EAS log file.
pub mod layout;

// Re-export commonly used constants for convenience
pub use limits::{
    TEMPERATURE_MIN, TEMPERATURE_MAX,
    PRESSURE_MIN, PRESSURE_MAX,
    HUMIDITY_MAX, HUMIDITY_INTERMEDIATE_MAX,
};

pub use layout::{
    FRAME_LEN, HEADER_BLOCK_LEN, CALIBRATION_IMAGE_LEN, CALIBRATION_HEX_LEN,
};
