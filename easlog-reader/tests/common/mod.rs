//! Synthetic EAS log builder for integration tests
//!
//! Produces byte-exact logs: a header of `-----`-separated sections padded
//! with nulls to the header length, then 24-byte frames.

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

/// Lower-case hex dump of the register image
pub fn hex_dump(coefficients: &CalibrationCoefficients) -> String {
    coefficients
        .to_register_image()
        .iter()
        .map(|byte| format!("{:02x}", byte))
        .collect()
}

/// BME280 section with the dump after `": "`
pub fn bme280_section(sensor_id: u32, coefficients: &CalibrationCoefficients) -> String {
    format!(
        "Sensor ID: {}\nBME280 Temperature Humidity Pressure Sensor\nBus: I2C\nAddress: 0x76\nMode: normal\nCalibration: {}\n",
        sensor_id,
        hex_dump(coefficients)
    )
}

/// BME280 section in the older `||` format
pub fn legacy_bme280_section(sensor_id: u32, coefficients: &CalibrationCoefficients) -> String {
    format!(
        "Sensor ID: {}\nBME280 Temperature Humidity Pressure Sensor\nBus: I2C\nAddress: 0x77\nMode: forced\nCalibration||{}\n",
        sensor_id,
        hex_dump(coefficients)
    )
}

/// Section for a device without calibration
pub fn other_section(sensor_id: u32, name: &str) -> String {
    format!("Sensor ID: {}\n{}\n", sensor_id, name)
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

/// Builds a complete log image
pub struct LogBuilder {
    header_len: usize,
    sections: Vec<String>,
    data: Vec<u8>,
}

impl LogBuilder {
    pub fn new() -> Self {
        Self {
            header_len: 0x400,
            sections: Vec::new(),
            data: Vec::new(),
        }
    }

    pub fn with_header_len(mut self, len: usize) -> Self {
        self.header_len = len;
        self
    }

    pub fn section(mut self, text: impl Into<String>) -> Self {
        self.sections.push(text.into());
        self
    }

    pub fn frame(mut self, frame: [u8; FRAME_LEN]) -> Self {
        self.data.extend_from_slice(&frame);
        self
    }

    pub fn raw_data(mut self, bytes: &[u8]) -> Self {
        self.data.extend_from_slice(bytes);
        self
    }

    /// Header sections joined by `-----`, a padding section, then data
    pub fn build(self) -> Vec<u8> {
        let mut bytes = self.sections.join("-----").into_bytes();
        bytes.extend_from_slice(b"-----");
        assert!(bytes.len() <= self.header_len, "header overflows {} bytes", self.header_len);
        bytes.resize(self.header_len, 0);
        bytes.extend_from_slice(&self.data);
        bytes
    }
}
