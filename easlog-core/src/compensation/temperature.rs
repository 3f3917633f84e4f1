//! Temperature compensation, 32-bit path

use crate::{
    calibration::TemperatureCoefficients,
    constants::limits::{TEMPERATURE_MAX, TEMPERATURE_MIN},
    fixed_point::Reg32,
};

use super::FineTemperature;

/// Compensate a raw temperature count.
///
/// Returns the temperature in 0.01 °C, clamped to `[-4000, 8500]`, and the
/// fine temperature that pressure and humidity compensation need.
///
/// ```text
/// var1 = (raw/8 - T1*2) * T2 / 2048
/// var2 = ((raw/16 - T1)² / 4096 * T3) / 16384
/// fine = var1 + var2
/// T    = (fine*5 + 128) / 256
/// ```
///
/// The raw count is loaded into a signed 32-bit register as-is. The
/// sensor only produces 20 bits, so in practice it never changes sign.
pub fn compensate_temperature(
    raw: u32,
    coefficients: &TemperatureCoefficients,
) -> (i32, FineTemperature) {
    let raw = Reg32::from_bits(raw);
    let t1 = Reg32::from(coefficients.t1);
    let t2 = Reg32::from(coefficients.t2);
    let t3 = Reg32::from(coefficients.t3);

    let var1 = (raw / 8 - t1 * 2) * t2 / 2_048;
    let var2 = raw / 16 - t1;
    let var2 = var2 * var2 / 4_096 * t3 / 16_384;
    let fine = var1 + var2;

    let temperature = ((fine * 5 + 128) / 256).clamp(TEMPERATURE_MIN, TEMPERATURE_MAX);

    (temperature.get(), FineTemperature(fine.get()))
}
