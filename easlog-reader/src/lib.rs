//! Whole-file reader for EAS data-logger captures
//!
//! ## Overview
//!
//! An EAS log is a fixed-size text header followed by binary frames. The
//! header lists the devices attached to the logger, including the factory
//! calibration dump of every BME280. The frames hold raw readings.
//!
//! This crate does the `std` half of the job:
//! - split the file into header and data blocks ([`LogFile`])
//! - pull per-sensor coefficients out of the header text ([`parse_header`])
//! - decode frames and compensate BME280 samples ([`Pipeline`])
//!
//! The arithmetic and binary decoding live in [`easlog_core`], which is
//! re-exported.
//!
//! ## Usage
//!
//! ```no_run
//! use easlog_reader::{process_log, ReaderConfig};
//!
//! let bytes = std::fs::read("easRV12.log")?;
//! let log = process_log(&bytes, &ReaderConfig::default())?;
//!
//! for failure in &log.calibration.failures {
//!     eprintln!("{}", failure);
//! }
//! for sample in &log.samples {
//!     println!(
//!         "sensor {} frame {}: {:.2} °C {:.2} hPa {:.1} %RH",
//!         sample.sensor_id,
//!         sample.frame_index,
//!         sample.reading.celsius(),
//!         sample.reading.hectopascals(),
//!         sample.reading.percent_rh(),
//!     );
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! File access is left to the caller; everything here works on a borrowed
//! byte slice.

#![deny(unsafe_code)]

pub mod config;
pub mod errors;
pub mod header;
pub mod log_file;
pub mod pipeline;

pub use config::ReaderConfig;
pub use errors::{ReaderError, ReaderResult, SectionError};
pub use header::{parse_header, HeaderCalibration};
pub use log_file::LogFile;
pub use pipeline::{
    process_log,
    CompensatedSample,
    DecodedLog,
    Pipeline,
    PipelineStats,
    ProcessedData,
};

pub use easlog_core;
