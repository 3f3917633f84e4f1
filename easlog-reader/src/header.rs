//! Calibration header parsing
//!
//! ## Header Text
//!
//! The header block is free-form UTF-8, one section per attached device,
//! separated by a literal `-----`:
//!
//! ```text
//! Sensor ID: 2
//! BME280 Temperature Humidity Pressure Sensor
//! ...
//! ...
//! ...
//! Calibration: 6f6e8a68320070912ed6d00b...
//! -----
//! Sensor ID: 4
//! MPU6050 Accelerometer
//! ...
//! -----
//! \0\0\0\0\0\0\0\0...
//! ```
//!
//! Only sections whose second line names the BME280 carry calibration
//! data. Older firmware writes the dump after `||` instead of `": "`.
//! Trailing padding shows up as a final section of null bytes.
//!
//! ## Failure Handling
//!
//! A section that cannot be parsed is recorded in
//! [`HeaderCalibration::failures`] and skipped. Later sections are still
//! read.

use std::collections::BTreeMap;

use easlog_core::{
    constants::layout::{
        BME280_MARKER,
        LABEL_SEPARATOR,
        LEGACY_COEFFICIENT_SEPARATOR,
        PADDING_MARKER,
        SECTION_DELIMITER,
    },
    CalibrationCoefficients,
};
use log::{debug, warn};

use crate::{
    config::ReaderConfig,
    errors::{ReaderError, SectionError},
};

/// Calibration coefficients found in a header
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct HeaderCalibration {
    /// Coefficients by sensor id
    pub sensors: BTreeMap<u32, CalibrationCoefficients>,
    /// Sections that looked like calibration records but failed to parse
    pub failures: Vec<SectionError>,
}

impl HeaderCalibration {
    /// Coefficients of one sensor
    pub fn get(&self, sensor_id: u32) -> Option<&CalibrationCoefficients> {
        self.sensors.get(&sensor_id)
    }

    /// Sensor ids in ascending order
    pub fn sensor_ids(&self) -> impl Iterator<Item = u32> + '_ {
        self.sensors.keys().copied()
    }

    /// Number of calibrated sensors
    pub fn len(&self) -> usize {
        self.sensors.len()
    }

    /// Whether no sensor was calibrated
    pub fn is_empty(&self) -> bool {
        self.sensors.is_empty()
    }
}

/// What one section turned out to be
#[derive(Debug, PartialEq)]
enum Section {
    Empty,
    Padding,
    Other,
    Calibration {
        sensor_id: u32,
        coefficients: CalibrationCoefficients,
    },
}

/// Parse the calibration sections of a header block.
///
/// Never fails as a whole. Per-section problems end up in
/// [`HeaderCalibration::failures`].
pub fn parse_header(header: &[u8], config: &ReaderConfig) -> HeaderCalibration {
    let mut calibration = HeaderCalibration::default();

    for (index, bytes) in split_sections(header).enumerate() {
        // erased flash after the padding run need not be valid UTF-8
        if is_padding(bytes) {
            debug!("Section {}: Padding, skipped", index);
            continue;
        }

        let parsed = std::str::from_utf8(bytes)
            .map_err(|_| (None, ReaderError::MalformedHeader))
            .and_then(|text| parse_section(text, config.coefficient_line));

        match parsed {
            Ok(Section::Calibration { sensor_id, coefficients }) => {
                debug!("Section {}: BME280 calibration for sensor {}", index, sensor_id);
                if calibration.sensors.insert(sensor_id, coefficients).is_some() {
                    warn!("Sensor {} calibrated twice, keeping section {}", sensor_id, index);
                }
            }
            Ok(kind) => debug!("Section {}: {:?}, skipped", index, kind),
            Err((sensor_id, error)) => {
                let failure = SectionError { section: index, sensor_id, error };
                warn!("{}", failure);
                calibration.failures.push(failure);
            }
        }
    }

    calibration
}

fn parse_section(text: &str, coefficient_line: usize) -> Result<Section, (Option<u32>, ReaderError)> {
    let lines: Vec<&str> = text.lines().filter(|line| !line.is_empty()).collect();

    let Some(first) = lines.first() else {
        return Ok(Section::Empty);
    };
    if first.contains(PADDING_MARKER) {
        return Ok(Section::Padding);
    }
    if !lines.get(1).is_some_and(|line| line.contains(BME280_MARKER)) {
        return Ok(Section::Other);
    }

    let sensor_id = first
        .split(LABEL_SEPARATOR)
        .nth(1)
        .and_then(|id| id.trim().parse::<u32>().ok())
        .ok_or((None, ReaderError::InvalidSensorId))?;
    let fail = |error: ReaderError| (Some(sensor_id), error);

    let line = lines
        .get(coefficient_line)
        .ok_or_else(|| fail(ReaderError::MissingCoefficientLine { line: coefficient_line }))?;

    let separator = if line.contains(LEGACY_COEFFICIENT_SEPARATOR) {
        LEGACY_COEFFICIENT_SEPARATOR
    } else {
        LABEL_SEPARATOR
    };
    let dump = line
        .split(separator)
        .nth(1)
        .ok_or_else(|| fail(ReaderError::MissingSeparator))?;

    let coefficients = CalibrationCoefficients::from_hex(dump.trim_start())
        .map_err(|error| fail(error.into()))?;

    Ok(Section::Calibration { sensor_id, coefficients })
}

/// Whether the first non-empty line holds the null padding run
fn is_padding(bytes: &[u8]) -> bool {
    let marker = PADDING_MARKER.as_bytes();
    bytes
        .split(|byte| *byte == b'\n')
        .find(|line| !line.is_empty() && *line != b"\r")
        .is_some_and(|line| line.windows(marker.len()).any(|window| window == marker))
}

/// Split on the section delimiter at byte level, so one bad section does
/// not spoil UTF-8 decoding of the others.
fn split_sections(header: &[u8]) -> impl Iterator<Item = &[u8]> {
    let delimiter = SECTION_DELIMITER.as_bytes();
    let mut rest = Some(header);

    std::iter::from_fn(move || {
        let current = rest?;
        match current
            .windows(delimiter.len())
            .position(|window| window == delimiter)
        {
            Some(at) => {
                rest = Some(&current[at + delimiter.len()..]);
                Some(&current[..at])
            }
            None => {
                rest = None;
                Some(current)
            }
        }
    })
}
