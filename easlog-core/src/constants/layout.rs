//! EAS Log File Layout
//!
//! ```text
//! offset 0x000 ┌─────────────────────────────┐
//!              │ header block (UTF-8 text)    │  device sections split by "-----"
//!        0x400 ├─────────────────────────────┤
//!              │ frame 0      (24 bytes)      │
//!              │ frame 1      (24 bytes)      │
//!              │ ...                          │
//!              │ remainder    (< 24, dropped) │
//!          EOF └─────────────────────────────┘
//! ```
//!
//! Each frame:
//!
//! ```text
//! 0       4        8                                   24
//! ├───────┼────────┼────────────────────────────────────┤
//! │ id    │ type   │ payload (layout selected by type)   │
//! │ u32LE │ u32LE  │                                    │
//! ```

// ===== BLOCKS =====

/// Default length of the text header block.
///
/// Some loggers write a longer header, but the data block always starts
/// on a multiple of this value.
pub const HEADER_BLOCK_LEN: usize = 0x400;

/// Length of one binary frame in the data block.
pub const FRAME_LEN: usize = 24;

/// Offset of the little-endian u32 type discriminant inside a frame.
pub const FRAME_TYPE_OFFSET: usize = 4;

// ===== HEADER TEXT =====

/// Literal separating device sections in the header.
pub const SECTION_DELIMITER: &str = "-----";

/// Text identifying a BME280 calibration section (found on line 1).
pub const BME280_MARKER: &str = "BME280 Temperature Humidity Pressure Sensor";

/// Run of null bytes marking header padding.
pub const PADDING_MARKER: &str = "\0\0\0";

/// Separator between a label and its value, e.g. `"Sensor ID: 2"`.
pub const LABEL_SEPARATOR: &str = ": ";

/// Separator used in front of the coefficient dump by older firmware.
pub const LEGACY_COEFFICIENT_SEPARATOR: &str = "||";

/// Line, counted from zero, holding the coefficient dump in a section.
pub const COEFFICIENT_LINE: usize = 5;

// ===== CALIBRATION IMAGE =====

/// Bytes in the calibration register image.
///
/// Registers 0x88..=0x9F (24 bytes), 0xA1 (1 byte) and 0xE1..=0xE7
/// (7 bytes), concatenated in that order.
pub const CALIBRATION_IMAGE_LEN: usize = 32;

/// Hex characters needed to spell out the calibration image.
pub const CALIBRATION_HEX_LEN: usize = CALIBRATION_IMAGE_LEN * 2;
