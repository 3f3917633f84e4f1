//! Core decoding and compensation engine for EAS data-logger captures
//!
//! Turns raw BME280 ADC counts into calibrated temperature, pressure and
//! humidity, and decodes the fixed-size binary packets the logger writes.
//! Designed to run anywhere the logger's data ends up, including the
//! microcontroller itself.
//!
//! Key constraints:
//! - Bit-exact with the vendor's integer reference driver
//! - No heap allocation
//! - Borrowed, read-only input buffers
//!
//! ```
//! use easlog_core::{compensate, decode_packets, CalibrationCoefficients, Packet};
//!
//! # let coefficients = CalibrationCoefficients::from_register_image(&[0u8; 32]).unwrap();
//! # let data_block: &[u8] = &[];
//! for packet in decode_packets(data_block) {
//!     if let Packet::PresTempHumid { pressure, temperature, humidity, .. } = packet {
//!         let reading = compensate(temperature, pressure, humidity, &coefficients);
//!         // hand `reading` to whoever is plotting
//!         let _ = reading;
//!     }
//! }
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod calibration;
pub mod compensation;
pub mod constants;
pub mod errors;
pub mod fixed_point;
pub mod packet;

// Public API
pub use calibration::{
    CalibrationCoefficients,
    HumidityCoefficients,
    PressureCoefficients,
    TemperatureCoefficients,
};
pub use compensation::{
    compensate,
    compensate_humidity,
    compensate_pressure,
    compensate_temperature,
    CompensatedReading,
    FineTemperature,
};
pub use errors::{CalibrationError, CalibrationResult};
pub use fixed_point::{Reg32, Reg64};
pub use packet::{
    decode_packets,
    decode_reading,
    decode_readings,
    split_sensor_data,
    DecodedReading,
    Packet,
    PacketType,
    RawPacket,
};

/// Crate version string
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
