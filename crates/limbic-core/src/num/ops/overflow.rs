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

//! # Overflow Detection
//!
//! Predicates that decide, *before* a raw limb operation runs, whether its
//! result would leave the limb's range, together with the `OverflowPolicy`
//! strategy through which callers intercept raw addition, subtraction and
//! multiplication.
//!
//! The default `NativeOverflow` policy wraps around like machine integers. A
//! policy that saturates or traps is built from the predicates in this
//! module.

use crate::num::limb::Limb;

/// Returns `true` if `lhs + rhs` does not fit in `T`.
///
/// # Examples
///
/// ```rust
/// # use limbic_core::num::ops::overflow::add_overflows;
/// assert!(add_overflows(200u8, 56));
/// assert!(!add_overflows(200u8, 55));
/// assert!(add_overflows(-100i8, -29));
/// ```
#[inline]
pub fn add_overflows<T: Limb>(lhs: T, rhs: T) -> bool {
    if rhs.is_negative() {
        lhs < T::min_value().wrapping_sub(&rhs)
    } else {
        lhs > T::max_value().wrapping_sub(&rhs)
    }
}

/// Returns `true` if `lhs - rhs` does not fit in `T`.
#[inline]
pub fn sub_overflows<T: Limb>(lhs: T, rhs: T) -> bool {
    if rhs.is_negative() {
        lhs > T::max_value().wrapping_add(&rhs)
    } else {
        lhs < T::min_value().wrapping_add(&rhs)
    }
}

/// Returns `true` if `lhs * rhs` does not fit in `T`.
///
/// The exact product is formed in the double-width limb and compared with its
/// own truncation.
#[inline]
pub fn mul_overflows<T: Limb>(lhs: T, rhs: T) -> bool {
    let product = lhs.widening_mul(rhs);
    T::cast_from(product).widen() != product
}

/// Returns `true` if `-value` does not fit in `T`.
#[inline]
pub fn neg_overflows<T: Limb>(value: T) -> bool {
    if T::SIGNED {
        value == T::min_value()
    } else {
        !value.is_zero()
    }
}

/// Returns `true` if `lhs / rhs` (or `lhs % rhs`) has no defined result:
/// division by zero, or `MIN / -1` for signed limbs.
#[inline]
pub fn div_overflows<T: Limb>(lhs: T, rhs: T) -> bool {
    rhs.is_zero() || (T::SIGNED && lhs == T::min_value() && rhs == T::all_ones())
}

/// Strategy applied to raw limb arithmetic whose result may not fit.
///
/// The scaled-number layer routes every raw addition, subtraction and
/// multiplication through a policy value, so a caller can replace the
/// default wraparound with saturation or trapping without touching the
/// result-type deduction.
pub trait OverflowPolicy {
    /// Adds two limbs.
    fn add<T: Limb>(&self, lhs: T, rhs: T) -> T;

    /// Subtracts two limbs.
    fn sub<T: Limb>(&self, lhs: T, rhs: T) -> T;

    /// Multiplies two limbs.
    fn mul<T: Limb>(&self, lhs: T, rhs: T) -> T;
}

/// Two's-complement wraparound, the behavior of the underlying machine
/// operation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct NativeOverflow;

impl OverflowPolicy for NativeOverflow {
    #[inline(always)]
    fn add<T: Limb>(&self, lhs: T, rhs: T) -> T {
        lhs.wrapping_add(&rhs)
    }

    #[inline(always)]
    fn sub<T: Limb>(&self, lhs: T, rhs: T) -> T {
        lhs.wrapping_sub(&rhs)
    }

    #[inline(always)]
    fn mul<T: Limb>(&self, lhs: T, rhs: T) -> T {
        lhs.wrapping_mul(&rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplex::{Duplex, I256};
    use num_traits::Bounded;

    /// Clamps to the limb range, built only from the predicates.
    struct Saturate;

    impl OverflowPolicy for Saturate {
        fn add<T: Limb>(&self, lhs: T, rhs: T) -> T {
            match (add_overflows(lhs, rhs), rhs.is_negative()) {
                (false, _) => lhs.wrapping_add(&rhs),
                (true, true) => T::min_value(),
                (true, false) => T::max_value(),
            }
        }

        fn sub<T: Limb>(&self, lhs: T, rhs: T) -> T {
            match (sub_overflows(lhs, rhs), rhs.is_negative()) {
                (false, _) => lhs.wrapping_sub(&rhs),
                (true, true) => T::max_value(),
                (true, false) => T::min_value(),
            }
        }

        fn mul<T: Limb>(&self, lhs: T, rhs: T) -> T {
            if !mul_overflows(lhs, rhs) {
                lhs.wrapping_mul(&rhs)
            } else if lhs.is_negative() != rhs.is_negative() {
                T::min_value()
            } else {
                T::max_value()
            }
        }
    }

    #[test]
    fn test_add_overflows_signed() {
        assert!(add_overflows(i8::MAX, 1));
        assert!(add_overflows(i8::MIN, -1));
        assert!(!add_overflows(i8::MIN, i8::MAX));
        assert!(!add_overflows(-1i8, -127));
        assert!(add_overflows(-1i8, -128));
    }

    #[test]
    fn test_sub_overflows() {
        assert!(sub_overflows(0u16, 1));
        assert!(!sub_overflows(1u16, 1));
        assert!(sub_overflows(i16::MIN, 1));
        assert!(sub_overflows(0i16, i16::MIN));
        assert!(!sub_overflows(-1i16, i16::MIN));
    }

    #[test]
    fn test_mul_overflows() {
        assert!(!mul_overflows(15u8, 17));
        assert!(mul_overflows(16u8, 16));
        assert!(!mul_overflows(-128i8, 1));
        assert!(mul_overflows(-128i8, -1));
        assert!(mul_overflows(i128::MAX, 2));
        assert!(!mul_overflows(i128::MIN, 1));
    }

    #[test]
    fn test_neg_and_div_overflows() {
        assert!(neg_overflows(i32::MIN));
        assert!(!neg_overflows(i32::MAX));
        assert!(neg_overflows(1u32));
        assert!(!neg_overflows(0u32));
        assert!(div_overflows(1i32, 0));
        assert!(div_overflows(i32::MIN, -1));
        assert!(!div_overflows(i32::MIN, 1));
        assert!(!div_overflows(u32::MAX, u32::MAX));
    }

    #[test]
    fn test_predicates_on_duplex() {
        let max = Duplex::<i64, u64>::max_value();
        let one = Duplex::<i64, u64>::from_integer(1);
        assert!(add_overflows(max, one));
        assert!(!add_overflows(max, -one));
        assert!(mul_overflows(max, Duplex::from_integer(2)));
        assert!(!mul_overflows(I256::from_integer(u128::MAX), I256::from_integer(u64::MAX)));
    }

    #[test]
    fn test_native_policy_wraps() {
        assert_eq!(NativeOverflow.add(250u8, 10), 4);
        assert_eq!(NativeOverflow.sub(i8::MIN, 1), i8::MAX);
        assert_eq!(NativeOverflow.mul(16u8, 16), 0);
    }

    #[test]
    fn test_custom_policy_through_hook() {
        assert_eq!(Saturate.add(250u8, 10), u8::MAX);
        assert_eq!(Saturate.sub(i8::MIN, 1), i8::MIN);
        assert_eq!(Saturate.mul(-100i16, 1000), i16::MIN);
        assert_eq!(Saturate.mul(7i16, 6), 42);
    }
}
