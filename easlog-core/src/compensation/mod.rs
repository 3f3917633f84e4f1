//! BME280 Compensation Engine
//!
//! ## Overview
//!
//! The BME280 reports three uncompensated ADC counts per sample. Turning
//! them into physical units needs the sensor's own trimming constants (see
//! [`crate::calibration`]) and a chain of fixed-point formulas published
//! by the vendor.
//!
//! ```text
//!  raw temperature ─┐
//!                   ├─► temperature ──► 0.01 °C
//!  T1..T3 ──────────┘        │
//!                            │ fine temperature
//!            ┌───────────────┴───────────────┐
//!  raw pressure ─┐                  raw humidity ─┐
//!                ├─► pressure ─► Pa×100           ├─► humidity ─► %RH×1000
//!  P1..P9 ───────┘                  H1..H6 ───────┘
//! ```
//!
//! ## Evaluation Order
//!
//! Pressure and humidity both depend on the **fine temperature**, an
//! intermediate produced by temperature compensation. The vendor driver
//! keeps it in a global. Here it is returned explicitly as
//! [`FineTemperature`] and passed to the other two calls, so every
//! function is pure and the three may be reused independently.
//!
//! ## Arithmetic
//!
//! All formulas run on [`Reg32`](crate::Reg32) / [`Reg64`](crate::Reg64):
//! wrapping at the register width and truncating division. The register
//! width of each formula is part of the contract:
//!
//! | Quantity    | Register | Output unit | Clamp |
//! |-------------|----------|-------------|-------|
//! | temperature | 32-bit   | 0.01 °C     | [-4000, 8500] |
//! | pressure    | 64-bit   | Pa × 100    | [3000000, 11000000] |
//! | humidity    | 32-bit   | %RH × 1000  | accumulator [0, 419430400], output ≤ 100000 |
//!
//! Floating point is never used on the compensation path. It would drift
//! from the reference driver in the last digits.

mod humidity;
mod pressure;
mod temperature;

pub use humidity::compensate_humidity;
pub use pressure::compensate_pressure;
pub use temperature::compensate_temperature;

use crate::calibration::CalibrationCoefficients;

/// Fine temperature produced by [`compensate_temperature`]
///
/// Internal resolution temperature needed by pressure and humidity
/// compensation. Not meant for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FineTemperature(pub i32);

impl FineTemperature {
    /// Raw fine temperature value
    pub const fn get(self) -> i32 {
        self.0
    }
}

/// Calibrated output for one sample
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CompensatedReading {
    /// Temperature in hundredths of a degree Celsius
    pub temperature: i32,
    /// Pressure in Pa × 100
    pub pressure: u32,
    /// Relative humidity in thousandths of a percent
    pub humidity: u32,
}

impl CompensatedReading {
    /// Temperature in °C
    pub fn celsius(&self) -> f32 {
        self.temperature as f32 / 100.0
    }

    /// Pressure in hPa
    pub fn hectopascals(&self) -> f32 {
        self.pressure as f32 / 10_000.0
    }

    /// Relative humidity in %
    pub fn percent_rh(&self) -> f32 {
        self.humidity as f32 / 1_000.0
    }
}

/// Compensate one full sample.
///
/// Runs temperature first and threads its fine temperature into the
/// pressure and humidity formulas.
pub fn compensate(
    raw_temperature: u32,
    raw_pressure: u32,
    raw_humidity: u16,
    coefficients: &CalibrationCoefficients,
) -> CompensatedReading {
    let (temperature, fine) = compensate_temperature(raw_temperature, &coefficients.temperature);
    let pressure = compensate_pressure(raw_pressure, &coefficients.pressure, fine);
    let humidity = compensate_humidity(raw_humidity, &coefficients.humidity, fine);

    CompensatedReading {
        temperature,
        pressure,
        humidity,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calibration::{HumidityCoefficients, PressureCoefficients, TemperatureCoefficients};

    fn datasheet_coefficients() -> CalibrationCoefficients {
        CalibrationCoefficients {
            temperature: TemperatureCoefficients { t1: 28_485, t2: 26_735, t3: 50 },
            pressure: PressureCoefficients {
                p1: 36_738, p2: -10_635, p3: 3_024, p4: 6_980, p5: -4,
                p6: -7, p7: 9_900, p8: -10_230, p9: 4_285,
            },
            humidity: HumidityCoefficients { h1: 75, h2: 365, h3: 0, h4: 312, h5: 50, h6: 30 },
        }
    }

    #[test]
    fn full_sample_uses_own_fine_temperature() {
        let coefficients = datasheet_coefficients();
        let reading = compensate(527_312, 337_136, 30_049, &coefficients);

        let (temperature, fine) = compensate_temperature(527_312, &coefficients.temperature);
        assert_eq!(reading.temperature, temperature);
        assert_eq!(reading.temperature, 2_281);
        assert_eq!(
            reading.pressure,
            compensate_pressure(337_136, &coefficients.pressure, fine)
        );
        assert_eq!(reading.humidity, 57_350);
    }

    #[test]
    fn unit_conversions() {
        let reading = CompensatedReading {
            temperature: 2_281,
            pressure: 10_170_625,
            humidity: 57_350,
        };
        assert!((reading.celsius() - 22.81).abs() < 1e-4);
        assert!((reading.hectopascals() - 1_017.0625).abs() < 1e-2);
        assert!((reading.percent_rh() - 57.35).abs() < 1e-4);
    }

    #[test]
    fn compensation_is_deterministic() {
        let coefficients = datasheet_coefficients();
        let first = compensate(519_888, 415_148, 28_000, &coefficients);
        let second = compensate(519_888, 415_148, 28_000, &coefficients);
        assert_eq!(first, second);
    }
}
