//! Fixed-Width Integer Registers
//!
//! ## Why not plain `i32`/`i64`?
//!
//! The BME280 compensation formulas come from the vendor's C driver, where
//! every intermediate lives in a fixed-width register. Reproducing those
//! results bit for bit needs two things that plain Rust arithmetic does
//! not give for free:
//!
//! 1. **Wraparound**: a product that overflows the register wraps at the
//!    register width instead of panicking (debug) or silently promoting.
//! 2. **Truncating division**: the driver divides by powers of two with
//!    `/`, which rounds toward zero. An arithmetic shift floors instead,
//!    so `-7 >> 1 == -4` while `-7 / 2 == -3`. The two disagree on every
//!    negative odd intermediate.
//!
//! ```text
//! Operation   Reg32 / Reg64 behaviour
//! ----------------------------------------
//! a + b       wrapping_add
//! a - b       wrapping_sub
//! a * b       wrapping_mul
//! a / b       wrapping_div (toward zero; MIN / -1 wraps)
//! ```
//!
//! Dividing by zero still panics, exactly as the primitive does. Every
//! runtime divisor in this crate is guarded before use.
//!
//! Both operands of a binary operation may be a register or the raw
//! primitive, so formulas read close to the reference:
//!
//! ```
//! use easlog_core::Reg32;
//!
//! let raw = Reg32::new(519_888);
//! let var1 = (raw / 8 - Reg32::from(27_504u16) * 2) * Reg32::from(26_435i16) / 2048;
//! assert_eq!(var1.get(), 128_793);
//! ```

use core::ops::{Add, Div, Mul, Sub};

macro_rules! binary_op {
    ($reg:ident, $inner:ty, $trait:ident, $method:ident, $wrapping:ident) => {
        impl $trait for $reg {
            type Output = $reg;

            #[inline]
            fn $method(self, rhs: $reg) -> $reg {
                $reg(self.0.$wrapping(rhs.0))
            }
        }

        impl $trait<$inner> for $reg {
            type Output = $reg;

            #[inline]
            fn $method(self, rhs: $inner) -> $reg {
                $reg(self.0.$wrapping(rhs))
            }
        }
    };
}

macro_rules! register {
    ($(#[$meta:meta])* $reg:ident, $inner:ty, from: [$($from:ty),*]) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
        pub struct $reg($inner);

        impl $reg {
            /// Largest value the register holds
            pub const MAX: $reg = $reg(<$inner>::MAX);
            /// Smallest value the register holds
            pub const MIN: $reg = $reg(<$inner>::MIN);

            /// Load a value into the register
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Current register contents
            #[inline]
            pub const fn get(self) -> $inner {
                self.0
            }

            /// Whether the register holds zero
            #[inline]
            pub const fn is_zero(self) -> bool {
                self.0 == 0
            }

            /// Restrict the value to `[min, max]`
            #[inline]
            pub fn clamp(self, min: $inner, max: $inner) -> Self {
                Self(self.0.clamp(min, max))
            }
        }

        binary_op!($reg, $inner, Add, add, wrapping_add);
        binary_op!($reg, $inner, Sub, sub, wrapping_sub);
        binary_op!($reg, $inner, Mul, mul, wrapping_mul);
        binary_op!($reg, $inner, Div, div, wrapping_div);

        impl From<$inner> for $reg {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$reg> for $inner {
            #[inline]
            fn from(value: $reg) -> Self {
                value.0
            }
        }

        $(
            impl From<$from> for $reg {
                #[inline]
                fn from(value: $from) -> Self {
                    Self(<$inner>::from(value))
                }
            }
        )*
    };
}

register!(
    /// Signed 32-bit register
    Reg32, i32, from: [i8, u8, i16, u16]
);

register!(
    /// Signed 64-bit register
    Reg64, i64, from: [i8, u8, i16, u16, i32, u32]
);

impl From<Reg32> for Reg64 {
    #[inline]
    fn from(value: Reg32) -> Self {
        Reg64(i64::from(value.0))
    }
}

impl Reg64 {
    /// Narrow to 32 bits, keeping the low word like a C cast
    #[inline]
    pub const fn truncate(self) -> Reg32 {
        Reg32(self.0 as i32)
    }
}

impl Reg32 {
    /// Reinterpret an unsigned 32-bit reading as a signed register
    #[inline]
    pub const fn from_bits(bits: u32) -> Self {
        Reg32(bits as i32)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn division_truncates_toward_zero() {
        assert_eq!((Reg32::new(-7) / 2).get(), -3);
        assert_eq!((Reg32::new(7) / 2).get(), 3);
        assert_eq!((Reg64::new(-1) / 256).get(), 0);
        // an arithmetic shift would give -1 here
        assert_ne!((Reg64::new(-1) / 256).get(), -1 >> 8);
    }

    #[test]
    fn overflow_wraps_at_register_width() {
        assert_eq!((Reg32::MAX + 1).get(), i32::MIN);
        assert_eq!((Reg32::MIN - 1).get(), i32::MAX);
        assert_eq!((Reg32::new(65_536) * 65_536).get(), 0);
        assert_eq!((Reg64::MAX * 2).get(), -2);
    }

    #[test]
    fn min_over_minus_one_wraps() {
        assert_eq!((Reg32::MIN / -1).get(), i32::MIN);
        assert_eq!((Reg64::MIN / Reg64::new(-1)).get(), i64::MIN);
    }

    #[test]
    fn widening_and_narrowing() {
        let wide = Reg64::from(Reg32::new(-5));
        assert_eq!(wide.get(), -5);
        assert_eq!(Reg64::new(0x1_0000_0005).truncate().get(), 5);
        assert_eq!(Reg32::from_bits(0xFFFF_FFFF).get(), -1);
        assert_eq!(Reg32::from(0xFFFFu16).get(), 65_535);
        assert_eq!(Reg32::from(-1i16).get(), -1);
    }

    #[test]
    fn clamp_limits_value() {
        assert_eq!(Reg32::new(9_000).clamp(-4_000, 8_500).get(), 8_500);
        assert_eq!(Reg32::new(-9_000).clamp(-4_000, 8_500).get(), -4_000);
        assert_eq!(Reg32::new(25).clamp(-4_000, 8_500).get(), 25);
        assert!(Reg64::default().is_zero());
    }
}
