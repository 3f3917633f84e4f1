//! Pressure compensation, 64-bit path
//!
//! The cross products of the pressure formula overflow 32 bits, so every
//! accumulator here is a [`Reg64`]. `var1..var4` are reused in the same
//! order as the reference driver so the two can be compared line by line.

use crate::{
    calibration::PressureCoefficients,
    constants::limits::{PRESSURE_MAX, PRESSURE_MIN},
    fixed_point::Reg64,
};

use super::FineTemperature;

/// Compensate a raw pressure count.
///
/// Returns pressure in Pa × 100, clamped to `[3000000, 11000000]`.
///
/// ```text
/// var1 = fine - 128000
/// var2 = var1²·P6 + var1·P5·2¹⁷ + P4·2³⁵
/// var1 = var1²·P3/2⁸ + var1·P2·2¹²
/// var1 = (2⁴⁷ + var1)·P1 / 2³³
/// var4 = 1048576 - raw
/// var4 = ((var4·2³¹ - var2)·3125) / var1
/// var1 = P9·(var4/2¹³)² / 2²⁵
/// var2 = P8·var4 / 2¹⁹
/// var4 = (var4 + var1 + var2)/2⁸ + P7·16
/// P    = (var4/2 · 100) / 128
/// ```
///
/// When the divisor `var1` comes out as zero (only possible with a broken
/// or blank coefficient set) the minimum pressure is returned instead of
/// dividing.
pub fn compensate_pressure(
    raw: u32,
    coefficients: &PressureCoefficients,
    fine: FineTemperature,
) -> u32 {
    let c = coefficients;
    let raw = Reg64::from(raw);
    let p1 = Reg64::from(c.p1);
    let p2 = Reg64::from(c.p2);
    let p3 = Reg64::from(c.p3);
    let p4 = Reg64::from(c.p4);
    let p5 = Reg64::from(c.p5);
    let p6 = Reg64::from(c.p6);
    let p7 = Reg64::from(c.p7);
    let p8 = Reg64::from(c.p8);
    let p9 = Reg64::from(c.p9);

    let var1 = Reg64::from(fine.get()) - 128_000;
    let var2 = var1 * var1 * p6;
    let var2 = var2 + var1 * p5 * 131_072;
    let var2 = var2 + p4 * 34_359_738_368;
    let var1 = var1 * var1 * p3 / 256 + var1 * p2 * 4_096;
    let var1 = (Reg64::new(140_737_488_355_328) + var1) * p1 / 8_589_934_592;

    if var1.is_zero() {
        log_warn!("Pressure divisor is zero (P1 = {}), returning minimum", c.p1);
        return PRESSURE_MIN;
    }

    let var4 = Reg64::new(1_048_576) - raw;
    let var4 = (var4 * 2_147_483_648 - var2) * 3_125 / var1;
    let var1 = p9 * (var4 / 8_192) * (var4 / 8_192) / 33_554_432;
    let var2 = p8 * var4 / 524_288;
    let var4 = (var4 + var1 + var2) / 256 + p7 * 16;

    // Narrowed to a 32-bit register before the range check
    let pressure = (var4 / 2 * 100 / 128)
        .truncate()
        .clamp(PRESSURE_MIN as i32, PRESSURE_MAX as i32);

    pressure.get() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    const DATASHEET: PressureCoefficients = PressureCoefficients {
        p1: 36_738,
        p2: -10_635,
        p3: 3_024,
        p4: 6_980,
        p5: -4,
        p6: -7,
        p7: 9_900,
        p8: -10_230,
        p9: 4_285,
    };

    #[test]
    fn datasheet_vector() {
        let pressure = compensate_pressure(337_136, &DATASHEET, FineTemperature(120_035));
        // 1017.0625 hPa
        assert_eq!(pressure, 10_170_625);
    }

    #[test]
    fn zero_divisor_returns_minimum() {
        let blank = PressureCoefficients { p1: 0, ..DATASHEET };
        assert_eq!(
            compensate_pressure(337_136, &blank, FineTemperature(120_035)),
            PRESSURE_MIN
        );
        assert_eq!(
            compensate_pressure(0, &PressureCoefficients::default(), FineTemperature::default()),
            PRESSURE_MIN
        );
    }

    #[test]
    fn vacuum_reading_clamps_to_max() {
        // raw 0 means maximum pressure on this sensor
        let pressure = compensate_pressure(0, &DATASHEET, FineTemperature(120_035));
        assert_eq!(pressure, PRESSURE_MAX);
    }

    #[test]
    fn full_scale_reading_clamps_to_min() {
        let pressure = compensate_pressure(1_048_575, &DATASHEET, FineTemperature(120_035));
        assert_eq!(pressure, PRESSURE_MIN);
    }

    #[test]
    fn output_always_in_range() {
        for raw in (0..1_048_576u32).step_by(4_099) {
            for fine in [-200_000, 0, 120_035, 300_000] {
                let pressure = compensate_pressure(raw, &DATASHEET, FineTemperature(fine));
                assert!((PRESSURE_MIN..=PRESSURE_MAX).contains(&pressure));
            }
        }
    }
}
