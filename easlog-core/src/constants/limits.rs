//! Compensated Output Limits
//!
//! The reference driver clamps each compensated value into the range the
//! sensor is specified for. Out-of-range results are clamped silently; no
//! error is signalled. This matches the hardware driver and is kept as-is.

// ===== TEMPERATURE =====

/// Lowest compensated temperature, in 0.01 °C.
///
/// -40.00 °C, bottom of the BME280 operating range.
///
/// Source: BME280 datasheet, section 1 (operating range)
pub const TEMPERATURE_MIN: i32 = -4_000;

/// Highest compensated temperature, in 0.01 °C.
///
/// 85.00 °C, top of the BME280 operating range.
pub const TEMPERATURE_MAX: i32 = 8_500;

// ===== PRESSURE =====

/// Lowest compensated pressure, in Pa × 100.
///
/// 300 hPa. Also returned when the pressure divisor evaluates to zero.
///
/// Source: BME280 reference driver, 64-bit pressure path
pub const PRESSURE_MIN: u32 = 3_000_000;

/// Highest compensated pressure, in Pa × 100.
///
/// 1100 hPa.
pub const PRESSURE_MAX: u32 = 11_000_000;

// ===== HUMIDITY =====

/// Highest compensated humidity, in %RH × 1000.
pub const HUMIDITY_MAX: u32 = 100_000;

/// Upper clamp applied to the humidity accumulator before the final
/// division by 4096.
///
/// 419430400 = 100 %RH in the driver's Q22.10 × 4096 representation.
pub const HUMIDITY_INTERMEDIATE_MAX: i32 = 419_430_400;

/// Lower clamp applied to the humidity accumulator.
pub const HUMIDITY_INTERMEDIATE_MIN: i32 = 0;
