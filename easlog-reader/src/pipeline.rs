//! Decode-and-compensate pipeline
//!
//! ```text
//! log bytes ─► LogFile::split ─┬─► header ─► parse_header ─► HeaderCalibration
//!                              │                                   │
//!                              └─► data ─► frames ─► Packet ───────┴─► compensate ─► CompensatedSample
//! ```
//!
//! Every decoded packet is kept. BME280 samples (type 0x0a) are also
//! compensated with the coefficients of their sensor id. A sample whose
//! sensor has no calibration section is counted and left uncompensated.

use std::collections::BTreeSet;

use easlog_core::{compensate, CompensatedReading, Packet};
use log::{debug, warn};

use crate::{
    config::ReaderConfig,
    errors::ReaderResult,
    header::{parse_header, HeaderCalibration},
    log_file::LogFile,
};

/// One compensated BME280 sample
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompensatedSample {
    /// Position of the frame, counted across every `process` call since
    /// the pipeline was created or its stats were reset
    pub frame_index: usize,
    /// Sensor the sample came from
    pub sensor_id: u32,
    /// Calibrated values
    pub reading: CompensatedReading,
}

/// Counters for one pass over a data block
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PipelineStats {
    /// Whole frames seen
    pub frames_total: usize,
    /// Frames that produced a packet
    pub frames_decoded: usize,
    /// Frames of skipped or unknown types
    pub frames_skipped: usize,
    /// Bytes after the last whole frame
    pub trailing_bytes: usize,
    /// BME280 samples compensated
    pub samples_compensated: usize,
    /// BME280 samples whose sensor has no calibration
    pub samples_without_calibration: usize,
}

/// Output of [`Pipeline::process`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProcessedData {
    /// Every decoded packet with its frame index
    pub packets: Vec<(usize, Packet)>,
    /// Compensated BME280 samples
    pub samples: Vec<CompensatedSample>,
}

/// Joins decoded packets with their sensor's calibration
///
/// ```
/// use easlog_reader::{HeaderCalibration, Pipeline};
///
/// let calibration = HeaderCalibration::default();
/// let mut pipeline = Pipeline::new(&calibration);
/// let output = pipeline.process(&[0u8; 50]);
/// assert!(output.samples.is_empty());
/// assert_eq!(pipeline.stats().frames_total, 2);
/// assert_eq!(pipeline.stats().trailing_bytes, 2);
/// ```
#[derive(Debug)]
pub struct Pipeline<'a> {
    calibration: &'a HeaderCalibration,
    stats: PipelineStats,
    /// Sensor ids already warned about
    uncalibrated: BTreeSet<u32>,
}

impl<'a> Pipeline<'a> {
    /// Create a pipeline over parsed header calibration
    pub fn new(calibration: &'a HeaderCalibration) -> Self {
        Self {
            calibration,
            stats: PipelineStats::default(),
            uncalibrated: BTreeSet::new(),
        }
    }

    /// Decode and compensate a data block.
    ///
    /// Counters and frame indices carry on across calls until
    /// [`reset_stats`](Self::reset_stats), so feeding a log in chunks
    /// gives the same indices as feeding it whole.
    pub fn process(&mut self, data: &[u8]) -> ProcessedData {
        let mut output = ProcessedData::default();
        let frames = easlog_core::split_sensor_data(data);
        self.stats.trailing_bytes += frames.remainder().len();

        for frame in frames {
            let frame_index = self.stats.frames_total;
            self.stats.frames_total += 1;

            let Some(packet) = frame.decode() else {
                self.stats.frames_skipped += 1;
                continue;
            };
            self.stats.frames_decoded += 1;

            if let Some(sample) = self.compensate(frame_index, &packet) {
                output.samples.push(sample);
            }
            output.packets.push((frame_index, packet));
        }

        debug!(
            "Processed {} frames: {} decoded, {} samples",
            self.stats.frames_total, self.stats.frames_decoded, self.stats.samples_compensated
        );

        output
    }

    fn compensate(&mut self, frame_index: usize, packet: &Packet) -> Option<CompensatedSample> {
        let Packet::PresTempHumid { id, pressure, temperature, humidity } = *packet else {
            return None;
        };

        let Some(coefficients) = self.calibration.get(id) else {
            self.stats.samples_without_calibration += 1;
            if self.uncalibrated.insert(id) {
                warn!("No calibration for sensor {}, samples left uncompensated", id);
            }
            return None;
        };

        self.stats.samples_compensated += 1;
        Some(CompensatedSample {
            frame_index,
            sensor_id: id,
            reading: compensate(temperature, pressure, humidity, coefficients),
        })
    }

    /// Get statistics
    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Reset statistics
    pub fn reset_stats(&mut self) {
        self.stats = PipelineStats::default();
        self.uncalibrated.clear();
    }
}

/// Everything read from one log
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DecodedLog {
    /// Header calibration, including per-section failures
    pub calibration: HeaderCalibration,
    /// Decoded packets with their frame index
    pub packets: Vec<(usize, Packet)>,
    /// Compensated BME280 samples
    pub samples: Vec<CompensatedSample>,
    /// Counters for the data block
    pub stats: PipelineStats,
}

/// Read a whole log: split, parse the header, decode and compensate.
///
/// Fails only when the header length is invalid or the log is shorter than
/// the header.
pub fn process_log(bytes: &[u8], config: &ReaderConfig) -> ReaderResult<DecodedLog> {
    let log = LogFile::split(bytes, config)?;
    let calibration = parse_header(log.header(), config);
    debug!(
        "Header: {} calibrated sensors, {} failed sections",
        calibration.len(),
        calibration.failures.len()
    );

    let mut pipeline = Pipeline::new(&calibration);
    let ProcessedData { packets, samples } = pipeline.process(log.data());
    let stats = *pipeline.stats();

    Ok(DecodedLog { calibration, packets, samples, stats })
}
