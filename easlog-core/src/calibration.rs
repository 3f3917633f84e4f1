//! BME280 Calibration Coefficients
//!
//! ## Background
//!
//! Every BME280 leaves the factory with its own trimming constants burned
//! into non-volatile registers. The raw ADC counts are meaningless without
//! them. The EAS logger reads those registers once at start-up and dumps
//! them into the log header as a hex string: the **register image**.
//!
//! ## Register Image Layout
//!
//! ```text
//! byte  register  field   type
//! ----------------------------------
//!  0-1  0x88/89   T1      u16 LE
//!  2-3  0x8A/8B   T2      i16 LE
//!  4-5  0x8C/8D   T3      i16 LE
//!  6-7  0x8E/8F   P1      u16 LE
//!  8-23 0x90..9F  P2..P9  i16 LE
//!   24  0xA1      H1      u8
//! 25-26 0xE1/E2   H2      i16 LE
//!   27  0xE3      H3      u8
//!   28  0xE4      H4[11:4]
//!   29  0xE5      H5[3:0] | H4[3:0]
//!   30  0xE6      H5[11:4]
//!   31  0xE7      H6      i8
//! ```
//!
//! H4 and H5 are 12-bit signed values that share byte 29, one nibble each.
//! The high byte of each is sign-extended before shifting, exactly as the
//! vendor driver does:
//!
//! ```text
//! H4 = (i8(byte28) << 4) | (byte29 & 0x0F)
//! H5 = (i8(byte30) << 4) | (byte29 >> 4)
//! ```
//!
//! Coefficients are plain `Copy` values. Decoding the same image twice
//! always yields identical coefficients.

use crate::{
    constants::layout::{CALIBRATION_HEX_LEN, CALIBRATION_IMAGE_LEN},
    errors::{CalibrationError, CalibrationResult},
};

/// Temperature trimming constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TemperatureCoefficients {
    /// dig_T1
    pub t1: u16,
    /// dig_T2
    pub t2: i16,
    /// dig_T3
    pub t3: i16,
}

/// Pressure trimming constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PressureCoefficients {
    /// dig_P1
    pub p1: u16,
    /// dig_P2
    pub p2: i16,
    /// dig_P3
    pub p3: i16,
    /// dig_P4
    pub p4: i16,
    /// dig_P5
    pub p5: i16,
    /// dig_P6
    pub p6: i16,
    /// dig_P7
    pub p7: i16,
    /// dig_P8
    pub p8: i16,
    /// dig_P9
    pub p9: i16,
}

/// Humidity trimming constants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HumidityCoefficients {
    /// dig_H1
    pub h1: u8,
    /// dig_H2
    pub h2: i16,
    /// dig_H3
    pub h3: u8,
    /// dig_H4, 12-bit signed
    pub h4: i16,
    /// dig_H5, 12-bit signed
    pub h5: i16,
    /// dig_H6
    pub h6: i8,
}

/// Full coefficient set for one sensor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationCoefficients {
    /// Temperature group
    pub temperature: TemperatureCoefficients,
    /// Pressure group
    pub pressure: PressureCoefficients,
    /// Humidity group
    pub humidity: HumidityCoefficients,
}

#[inline]
fn u16_at(image: &[u8; CALIBRATION_IMAGE_LEN], offset: usize) -> u16 {
    u16::from_le_bytes([image[offset], image[offset + 1]])
}

#[inline]
fn i16_at(image: &[u8; CALIBRATION_IMAGE_LEN], offset: usize) -> i16 {
    i16::from_le_bytes([image[offset], image[offset + 1]])
}

#[inline]
fn i8_at(image: &[u8; CALIBRATION_IMAGE_LEN], offset: usize) -> i8 {
    i8::from_le_bytes([image[offset]])
}

fn hex_value(digit: u8) -> Option<u8> {
    match digit {
        b'0'..=b'9' => Some(digit - b'0'),
        b'a'..=b'f' => Some(digit - b'a' + 10),
        b'A'..=b'F' => Some(digit - b'A' + 10),
        _ => None,
    }
}

impl CalibrationCoefficients {
    /// Decode the 32-byte register image.
    ///
    /// Bytes beyond the image are ignored.
    pub fn from_register_image(bytes: &[u8]) -> CalibrationResult<Self> {
        let image: &[u8; CALIBRATION_IMAGE_LEN] = bytes
            .get(..CALIBRATION_IMAGE_LEN)
            .and_then(|head| head.try_into().ok())
            .ok_or(CalibrationError::TooShort {
                expected: CALIBRATION_IMAGE_LEN,
                actual: bytes.len(),
            })?;

        Ok(Self::decode(image))
    }

    /// Decode the register image from its hex dump.
    ///
    /// The first 64 characters are read as 32 hex-digit pairs, one byte
    /// per pair. Anything after them is ignored, as the logger sometimes
    /// pads the line.
    pub fn from_hex(hex: &str) -> CalibrationResult<Self> {
        let digits = hex.as_bytes();
        if digits.len() < CALIBRATION_HEX_LEN {
            return Err(CalibrationError::TooShort {
                expected: CALIBRATION_HEX_LEN,
                actual: digits.len(),
            });
        }

        let mut image = [0u8; CALIBRATION_IMAGE_LEN];
        for (index, byte) in image.iter_mut().enumerate() {
            let position = index * 2;
            let high = hex_value(digits[position])
                .ok_or(CalibrationError::InvalidHexDigit { position })?;
            let low = hex_value(digits[position + 1])
                .ok_or(CalibrationError::InvalidHexDigit { position: position + 1 })?;
            *byte = (high << 4) | low;
        }

        Ok(Self::decode(&image))
    }

    fn decode(image: &[u8; CALIBRATION_IMAGE_LEN]) -> Self {
        let temperature = TemperatureCoefficients {
            t1: u16_at(image, 0),
            t2: i16_at(image, 2),
            t3: i16_at(image, 4),
        };

        let pressure = PressureCoefficients {
            p1: u16_at(image, 6),
            p2: i16_at(image, 8),
            p3: i16_at(image, 10),
            p4: i16_at(image, 12),
            p5: i16_at(image, 14),
            p6: i16_at(image, 16),
            p7: i16_at(image, 18),
            p8: i16_at(image, 20),
            p9: i16_at(image, 22),
        };

        // H4/H5 share byte 29, see module docs
        let shared = image[29];
        let humidity = HumidityCoefficients {
            h1: image[24],
            h2: i16_at(image, 25),
            h3: image[27],
            h4: (i16::from(i8_at(image, 28)) << 4) | i16::from(shared & 0x0F),
            h5: (i16::from(i8_at(image, 30)) << 4) | i16::from(shared >> 4),
            h6: i8_at(image, 31),
        };

        Self {
            temperature,
            pressure,
            humidity,
        }
    }

    /// Encode back into the 32-byte register image.
    ///
    /// Exact inverse of [`from_register_image`](Self::from_register_image)
    /// as long as H4 and H5 fit in 12 signed bits, which is always true
    /// for decoded coefficients.
    pub fn to_register_image(&self) -> [u8; CALIBRATION_IMAGE_LEN] {
        let mut image = [0u8; CALIBRATION_IMAGE_LEN];
        let t = &self.temperature;
        let p = &self.pressure;
        let h = &self.humidity;

        image[0..2].copy_from_slice(&t.t1.to_le_bytes());
        image[2..4].copy_from_slice(&t.t2.to_le_bytes());
        image[4..6].copy_from_slice(&t.t3.to_le_bytes());

        image[6..8].copy_from_slice(&p.p1.to_le_bytes());
        let signed = [p.p2, p.p3, p.p4, p.p5, p.p6, p.p7, p.p8, p.p9];
        for (index, value) in signed.iter().enumerate() {
            let offset = 8 + index * 2;
            image[offset..offset + 2].copy_from_slice(&value.to_le_bytes());
        }

        image[24] = h.h1;
        image[25..27].copy_from_slice(&h.h2.to_le_bytes());
        image[27] = h.h3;
        image[28] = (h.h4 >> 4) as u8;
        image[29] = ((h.h4 & 0x0F) as u8) | (((h.h5 & 0x0F) as u8) << 4);
        image[30] = (h.h5 >> 4) as u8;
        image[31] = h.h6 as u8;

        image
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Image assembled from the BME280 datasheet example trimming values
    fn datasheet_image() -> [u8; 32] {
        let coefficients = CalibrationCoefficients {
            temperature: TemperatureCoefficients { t1: 28_485, t2: 26_735, t3: 50 },
            pressure: PressureCoefficients {
                p1: 36_738, p2: -10_635, p3: 3_024, p4: 6_980, p5: -4,
                p6: -7, p7: 9_900, p8: -10_230, p9: 4_285,
            },
            humidity: HumidityCoefficients { h1: 75, h2: 365, h3: 0, h4: 312, h5: 50, h6: 30 },
        };
        coefficients.to_register_image()
    }

    #[test]
    fn unsigned_u16_is_little_endian() {
        let mut image = [0u8; 32];
        image[0] = 0x00;
        image[1] = 0x01;
        image[2] = 0x00;
        image[3] = 0x02;
        let coefficients = CalibrationCoefficients::from_register_image(&image).unwrap();
        assert_eq!(coefficients.temperature.t1, 256);
        assert_eq!(coefficients.temperature.t2, 512);
    }

    #[test]
    fn signed_fields_sign_extend() {
        let mut image = [0u8; 32];
        image[2] = 0xFF;
        image[3] = 0xFF; // T2 = -1
        image[8] = 0x00;
        image[9] = 0x80; // P2 = i16::MIN
        image[31] = 0xF6; // H6 = -10
        let coefficients = CalibrationCoefficients::from_register_image(&image).unwrap();
        assert_eq!(coefficients.temperature.t2, -1);
        assert_eq!(coefficients.pressure.p2, i16::MIN);
        assert_eq!(coefficients.humidity.h6, -10);
    }

    #[test]
    fn humidity_nibbles_unpack() {
        let mut image = [0u8; 32];
        image[24] = 75;
        image[25] = 0x6D;
        image[26] = 0x01; // H2 = 365
        image[27] = 0;
        image[28] = 0x13; // H4 high byte
        image[29] = 0x28; // H5 low nibble 2, H4 low nibble 8
        image[30] = 0x03; // H5 high byte
        image[31] = 30;
        let h = CalibrationCoefficients::from_register_image(&image).unwrap().humidity;
        assert_eq!(h.h1, 75);
        assert_eq!(h.h2, 365);
        assert_eq!(h.h4, 0x138);
        assert_eq!(h.h5, 0x032);
        assert_eq!(h.h6, 30);
    }

    #[test]
    fn negative_packed_humidity_fields() {
        let mut image = [0u8; 32];
        image[28] = 0xFF; // H4 high byte -1
        image[29] = 0xF0; // H5 low nibble 0xF, H4 low nibble 0
        image[30] = 0x80; // H5 high byte -128
        let h = CalibrationCoefficients::from_register_image(&image).unwrap().humidity;
        assert_eq!(h.h4, -16);
        assert_eq!(h.h5, -2_048 | 0x0F);
    }

    #[test]
    fn hex_matches_raw_image() {
        let image = datasheet_image();
        let mut hex = [0u8; 64];
        for (index, byte) in image.iter().enumerate() {
            let digits = b"0123456789abcdef";
            hex[index * 2] = digits[usize::from(byte >> 4)];
            hex[index * 2 + 1] = digits[usize::from(byte & 0x0F)];
        }
        let hex = core::str::from_utf8(&hex).unwrap();

        let from_hex = CalibrationCoefficients::from_hex(hex).unwrap();
        let from_raw = CalibrationCoefficients::from_register_image(&image).unwrap();
        assert_eq!(from_hex, from_raw);
        assert_eq!(from_hex.temperature.t1, 28_485);
        assert_eq!(from_hex.pressure.p8, -10_230);
        assert_eq!(from_hex.humidity.h4, 312);
        assert_eq!(from_hex.humidity.h5, 50);
    }

    #[test]
    fn uppercase_hex_and_trailing_text_accepted() {
        let lower = "00ab00cd000000000000000000000000000000000000000000000000000000ff trailing";
        let upper = "00AB00CD000000000000000000000000000000000000000000000000000000FF";
        let coefficients = CalibrationCoefficients::from_hex(lower).unwrap();
        assert_eq!(coefficients, CalibrationCoefficients::from_hex(upper).unwrap());
        assert_eq!(coefficients.temperature.t1, 0xAB00);
        assert_eq!(coefficients.humidity.h6, -1);
    }

    #[test]
    fn short_inputs_rejected() {
        assert_eq!(
            CalibrationCoefficients::from_register_image(&[0u8; 31]),
            Err(CalibrationError::TooShort { expected: 32, actual: 31 }),
        );
        assert_eq!(
            CalibrationCoefficients::from_hex("00ff"),
            Err(CalibrationError::TooShort { expected: 64, actual: 4 }),
        );
    }

    #[test]
    fn bad_digit_reports_position() {
        let mut hex = [b'0'; 64];
        hex[13] = b'g';
        let hex = core::str::from_utf8(&hex).unwrap();
        assert_eq!(
            CalibrationCoefficients::from_hex(hex),
            Err(CalibrationError::InvalidHexDigit { position: 13 }),
        );
    }

    #[test]
    fn decoding_is_idempotent() {
        let image = datasheet_image();
        let first = CalibrationCoefficients::from_register_image(&image).unwrap();
        let second = CalibrationCoefficients::from_register_image(&image).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.to_register_image(), image);
    }
}
