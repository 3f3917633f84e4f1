//! Humidity compensation, 32-bit path

use crate::{
    calibration::HumidityCoefficients,
    constants::limits::{HUMIDITY_INTERMEDIATE_MAX, HUMIDITY_INTERMEDIATE_MIN, HUMIDITY_MAX},
    fixed_point::Reg32,
};

use super::FineTemperature;

/// Compensate a raw humidity count.
///
/// Returns relative humidity in thousandths of a percent, at most 100000.
///
/// The accumulator is clamped to `[0, 419430400]` before the final
/// division by 4096. There is no separate lower clamp on the result;
/// the accumulator clamp already keeps it non-negative.
pub fn compensate_humidity(
    raw: u16,
    coefficients: &HumidityCoefficients,
    fine: FineTemperature,
) -> u32 {
    let c = coefficients;
    let raw = Reg32::from(raw);
    let h1 = Reg32::from(c.h1);
    let h2 = Reg32::from(c.h2);
    let h3 = Reg32::from(c.h3);
    let h4 = Reg32::from(c.h4);
    let h5 = Reg32::from(c.h5);
    let h6 = Reg32::from(c.h6);

    let var1 = Reg32::new(fine.get()) - 76_800;
    let var2 = raw * 16_384;
    let var3 = h4 * 1_048_576;
    let var4 = h5 * var1;
    let var5 = (var2 - var3 - var4 + 16_384) / 32_768;
    let var2 = var1 * h6 / 1_024;
    let var3 = var1 * h3 / 2_048;
    let var4 = var2 * (var3 + 32_768) / 1_024 + 2_097_152;
    let var2 = (var4 * h2 + 8_192) / 16_384;
    let var3 = var5 * var2;
    let var4 = (var3 / 32_768) * (var3 / 32_768) / 128;
    let var5 = (var3 - var4 * h1 / 16)
        .clamp(HUMIDITY_INTERMEDIATE_MIN, HUMIDITY_INTERMEDIATE_MAX);

    // var5 is non-negative after the clamp
    let humidity = (var5 / 4_096).get() as u32;
    humidity.min(HUMIDITY_MAX)
}
