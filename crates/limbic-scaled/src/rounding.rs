// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! # Rounding Policies
//!
//! Rounding applies when a value moves to a coarser exponent and fractional
//! radix digits are discarded. Moving to a finer exponent is exact and never
//! consults a policy.
//!
//! - `Native` does whatever the underlying integer operation does: an
//!   arithmetic right shift (toward negative infinity) for radix 2, a
//!   truncating division (toward zero) for other radices.
//! - `Nearest` rounds to the nearest representable value, resolving ties
//!   away from zero for both signs.
//!
//! Policies are strategy values passed to conversion functions.

use std::fmt::Debug;

use limbic_core::num::limb::Limb;
use num_traits::{WrappingAdd, WrappingSub};

/// Strategy for discarding low-order radix digits.
pub trait Rounding: Debug {
    /// Divides `value` by `radix^shift`, rounding per policy.
    fn coarsen<S: Limb>(&self, value: S, radix: u32, shift: u32) -> S;

    /// Rounds a floating-point value to an integer per policy.
    fn round_f64(&self, value: f64) -> f64;
}

/// Rounding performed by the underlying integer operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Native;

/// Round to nearest, ties away from zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Nearest;

impl Rounding for Native {
    fn coarsen<S: Limb>(&self, value: S, radix: u32, shift: u32) -> S {
        if shift == 0 {
            return value;
        }
        if radix == 2 {
            return value.shr_total(shift);
        }
        match power::<S>(radix, shift) {
            Some(divisor) => value.div_rem(divisor).0,
            None => S::zero(),
        }
    }

    #[inline]
    fn round_f64(&self, value: f64) -> f64 {
        value.trunc()
    }
}

impl Rounding for Nearest {
    fn coarsen<S: Limb>(&self, value: S, radix: u32, shift: u32) -> S {
        if shift == 0 {
            return value;
        }
        // Rounding the magnitude keeps ties symmetric and cannot overflow.
        let magnitude = value.unsigned_abs();
        let rounded = if radix == 2 {
            let half_bit = magnitude.bit(shift - 1);
            magnitude
                .shr_total(shift)
                .wrapping_add(&Limb::from_bool(half_bit))
        } else {
            match power(radix, shift) {
                Some(divisor) => {
                    let (quotient, remainder) = magnitude.div_rem(divisor);
                    let round_up = remainder >= divisor.wrapping_sub(&remainder);
                    quotient.wrapping_add(&Limb::from_bool(round_up))
                }
                None => {
                    // The divisor exceeds the magnitude; only the half-way
                    // test remains, done at double width.
                    let doubled = magnitude.widen().shl_total(1);
                    let round_up = power::<<S::Unsigned as Limb>::Wide>(radix, shift)
                        .is_some_and(|divisor| doubled >= divisor);
                    Limb::from_bool(round_up)
                }
            }
        };
        let rounded = S::cast_from(rounded);
        if value.is_negative() {
            rounded.wrapping_neg()
        } else {
            rounded
        }
    }

    #[inline]
    fn round_f64(&self, value: f64) -> f64 {
        value.round()
    }
}

/// `radix^exponent` if it fits in `S`.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::rounding::power;
/// assert_eq!(power::<i16>(10, 4), Some(10_000));
/// assert_eq!(power::<i16>(10, 5), None);
/// assert_eq!(power::<u8>(2, 7), Some(128));
/// ```
pub fn power<S: Limb>(radix: u32, exponent: u32) -> Option<S> {
    let base = S::cast_from(radix);
    if base.is_negative() || base.to_u128_wrapping() != radix as u128 {
        return None;
    }
    let mut result = S::one();
    for _ in 0..exponent {
        result = result.checked_mul_val(base)?;
    }
    Some(result)
}

/// Multiplies `value` by `radix^shift`, or `None` if the result leaves `S`.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::rounding::scale_up;
/// assert_eq!(scale_up(-3i8, 2, 5), Some(-96));
/// assert_eq!(scale_up(-3i8, 2, 6), None);
/// assert_eq!(scale_up(125i32, 10, 2), Some(12_500));
/// ```
pub fn scale_up<S: Limb>(value: S, radix: u32, shift: u32) -> Option<S> {
    if shift == 0 || value.is_zero() {
        return Some(value);
    }
    if radix == 2 {
        if shift >= S::BITS {
            return None;
        }
        let shifted = value.shl_total(shift);
        return (shifted.shr_total(shift) == value && shifted.is_negative() == value.is_negative())
            .then_some(shifted);
    }
    let factor = power::<S>(radix, shift)?;
    value.checked_mul_val(factor)
}

/// Floors `value / radix^shift` and reports whether anything was discarded.
///
/// Unlike [`Native::coarsen`] this floors for every radix; it is the basis of
/// exact comparison across exponents.
pub fn floor_div<S: Limb>(value: S, radix: u32, shift: u32) -> (S, bool) {
    if shift == 0 {
        return (value, false);
    }
    if radix == 2 {
        let quotient = value.shr_total(shift);
        return (quotient, quotient.shl_total(shift) != value);
    }
    match power::<S>(radix, shift) {
        Some(divisor) => {
            let (quotient, remainder) = value.div_rem(divisor);
            if remainder.is_negative() {
                (quotient.wrapping_sub(&S::one()), true)
            } else {
                (quotient, !remainder.is_zero())
            }
        }
        // The divisor exceeds every magnitude `S` can hold.
        None if value.is_negative() => (S::zero().wrapping_sub(&S::one()), true),
        None => (S::zero(), !value.is_zero()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limbic_core::duplex::I256;

    #[test]
    fn test_native_radix_two_floors() {
        assert_eq!(Native.coarsen(7i32, 2, 1), 3);
        assert_eq!(Native.coarsen(-7i32, 2, 1), -4);
        assert_eq!(Native.coarsen(-1i32, 2, 40), -1);
        assert_eq!(Native.coarsen(5u8, 2, 9), 0);
    }

    #[test]
    fn test_native_decimal_truncates() {
        assert_eq!(Native.coarsen(129i32, 10, 1), 12);
        assert_eq!(Native.coarsen(-129i32, 10, 1), -12);
        assert_eq!(Native.coarsen(-125i8, 10, 3), 0);
    }

    #[test]
    fn test_nearest_ties_away_from_zero() {
        // 2.5 -> 3, -2.5 -> -3, 2.25 -> 2
        assert_eq!(Nearest.coarsen(5i32, 2, 1), 3);
        assert_eq!(Nearest.coarsen(-5i32, 2, 1), -3);
        assert_eq!(Nearest.coarsen(9i32, 2, 2), 2);
        assert_eq!(Nearest.coarsen(-9i32, 2, 2), -2);
        assert_eq!(Nearest.coarsen(125i32, 10, 1), 13);
        assert_eq!(Nearest.coarsen(-125i32, 10, 1), -13);
        assert_eq!(Nearest.coarsen(124i32, 10, 1), 12);
    }

    #[test]
    fn test_nearest_at_extremes() {
        // -128 / 2 rounds to -64 without overflowing the magnitude.
        assert_eq!(Nearest.coarsen(i8::MIN, 2, 1), -64);
        assert_eq!(Nearest.coarsen(i8::MIN, 2, 8), -1);
        assert_eq!(Nearest.coarsen(u8::MAX, 2, 1), 128);
        assert_eq!(Nearest.coarsen(100i8, 10, 9), 0);
        // 7^3 overflows u8 but 200 is past its half-way point.
        assert_eq!(Nearest.coarsen(200u8, 7, 3), 1);
        assert_eq!(Nearest.coarsen(100u8, 7, 3), 0);
    }

    #[test]
    fn test_nearest_differs_from_native() {
        let value = -3i16; // -0.75 at exponent -2
        assert_eq!(Native.coarsen(value, 2, 2), -1);
        assert_eq!(Nearest.coarsen(value, 2, 2), -1);
        let value = -1i16; // -0.25
        assert_eq!(Native.coarsen(value, 2, 2), -1);
        assert_eq!(Nearest.coarsen(value, 2, 2), 0);
    }

    #[test]
    fn test_float_rounding() {
        assert_eq!(Native.round_f64(2.7), 2.0);
        assert_eq!(Native.round_f64(-2.7), -2.0);
        assert_eq!(Nearest.round_f64(2.5), 3.0);
        assert_eq!(Nearest.round_f64(-2.5), -3.0);
    }

    #[test]
    fn test_scale_up_on_wide_storage() {
        let value = I256::from_integer(-3);
        assert_eq!(scale_up(value, 2, 200), Some(value << 200));
        assert_eq!(scale_up(value, 2, 254), None);
        let seven = I256::from_integer(7);
        assert_eq!(scale_up(seven, 10, 70), power::<I256>(10, 70).map(|p| p * seven));
        assert_eq!(scale_up(seven, 10, 77), None);
    }

    #[test]
    fn test_floor_div_reports_remainder() {
        assert_eq!(floor_div(-7i32, 2, 1), (-4, true));
        assert_eq!(floor_div(-8i32, 2, 1), (-4, false));
        assert_eq!(floor_div(-129i32, 10, 1), (-13, true));
        assert_eq!(floor_div(130i32, 10, 1), (13, false));
        assert_eq!(floor_div(-5i8, 10, 3), (-1, true));
        assert_eq!(floor_div(5i8, 2, 20), (0, true));
        assert_eq!(floor_div(0i8, 2, 20), (0, false));
    }
}
