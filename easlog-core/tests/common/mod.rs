//! Shared fixtures for easlog-core integration tests
//!
//! Frame builders and the datasheet coefficient set.

#![allow(dead_code)]

use easlog_core::{
    constants::FRAME_LEN,
    CalibrationCoefficients,
    HumidityCoefficients,
    PressureCoefficients,
    TemperatureCoefficients,
};

/// Coefficient set from the BME280 datasheet worked example
pub fn datasheet_coefficients() -> CalibrationCoefficients {
    CalibrationCoefficients {
        temperature: TemperatureCoefficients { t1: 28_485, t2: 26_735, t3: 50 },
        pressure: PressureCoefficients {
            p1: 36_738,
            p2: -10_635,
            p3: 3_024,
            p4: 6_980,
            p5: -4,
            p6: -7,
            p7: 9_900,
            p8: -10_230,
            p9: 4_285,
        },
        humidity: HumidityCoefficients { h1: 75, h2: 365, h3: 0, h4: 312, h5: 50, h6: 30 },
    }
}

/// Frame with the given id, type code and payload starting at offset 8
pub fn frame(id: u32, code: u32, payload: &[u8]) -> [u8; FRAME_LEN] {
    let mut bytes = [0u8; FRAME_LEN];
    bytes[0..4].copy_from_slice(&id.to_le_bytes());
    bytes[4..8].copy_from_slice(&code.to_le_bytes());
    bytes[8..8 + payload.len()].copy_from_slice(payload);
    bytes
}

/// BME280 sample frame (type 0x0a)
pub fn pth_frame(id: u32, pressure: u32, temperature: u32, humidity: u16) -> [u8; FRAME_LEN] {
    let mut payload = [0u8; 10];
    payload[0..4].copy_from_slice(&pressure.to_le_bytes());
    payload[4..8].copy_from_slice(&temperature.to_le_bytes());
    payload[8..10].copy_from_slice(&humidity.to_le_bytes());
    frame(id, 0x0a, &payload)
}

/// Concatenate frames into a data block
pub fn data_block(frames: &[[u8; FRAME_LEN]]) -> Vec<u8> {
    frames.iter().flat_map(|frame| frame.iter().copied()).collect()
}
