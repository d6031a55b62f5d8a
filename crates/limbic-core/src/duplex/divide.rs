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

//! Restoring long division.
//!
//! Signed operands are divided by magnitude; the quotient is negated when the
//! signs differ and the remainder takes the sign of the dividend, so that
//! `q * d + r == n` holds with truncation toward zero.

use core::ops::{Div, DivAssign, Rem, RemAssign};
use num_traits::Zero;

use super::Duplex;
use crate::num::limb::{Limb, UnsignedLimb};

/// Truncating quotient and remainder.
///
/// # Panics
///
/// Panics if `rhs` is zero.
pub(super) fn div_rem<H: Limb, L: UnsignedLimb>(
    lhs: Duplex<H, L>,
    rhs: Duplex<H, L>,
) -> (Duplex<H, L>, Duplex<H, L>) {
    assert!(!rhs.is_zero(), "attempt to divide by zero");

    let negative_quotient = lhs.is_negative() != rhs.is_negative();
    let negative_remainder = lhs.is_negative();

    let (quotient, remainder) = unsigned_div_rem(lhs.unsigned_abs(), rhs.unsigned_abs());
    let quotient = Duplex::<H, L>::cast_from(quotient);
    let remainder = Duplex::<H, L>::cast_from(remainder);

    (
        if negative_quotient { -quotient } else { quotient },
        if negative_remainder { -remainder } else { remainder },
    )
}

/// Divides magnitudes, using the low limb's native division when both fit in
/// it.
fn unsigned_div_rem<H: UnsignedLimb, L: UnsignedLimb>(
    dividend: Duplex<H, L>,
    divisor: Duplex<H, L>,
) -> (Duplex<H, L>, Duplex<H, L>) {
    if dividend < divisor {
        return (Duplex::zero(), dividend);
    }
    if dividend.high.is_zero() && divisor.high.is_zero() {
        let (quotient, remainder) = dividend.low.div_rem(divisor.low);
        return (
            Duplex::from_parts(H::zero(), quotient),
            Duplex::from_parts(H::zero(), remainder),
        );
    }
    restoring_div_rem(dividend, divisor)
}

/// Bit-serial restoring division of unsigned limbs.
///
/// Walks the dividend from its most significant set bit downwards, shifting
/// each bit into the accumulator and subtracting the divisor whenever the
/// accumulator reaches it. The bit shifted out of the accumulator is kept so
/// that divisors with the top bit set are handled.
fn restoring_div_rem<U: UnsignedLimb>(dividend: U, divisor: U) -> (U, U) {
    let mut quotient = U::zero();
    let mut remainder = U::zero();
    let start = U::BITS - dividend.leading_zeros();

    for index in (0..start).rev() {
        let overflow = remainder.bit(U::BITS - 1);
        remainder = remainder.shl_total(1) | U::from_bool(dividend.bit(index));
        if overflow || remainder >= divisor {
            remainder = remainder.wrapping_sub(&divisor);
            quotient = quotient | U::one().shl_total(index);
        }
    }

    (quotient, remainder)
}

impl<H: Limb, L: UnsignedLimb> Div for Duplex<H, L> {
    type Output = Self;

    #[inline]
    fn div(self, rhs: Self) -> Self {
        div_rem(self, rhs).0
    }
}

impl<H: Limb, L: UnsignedLimb> Rem for Duplex<H, L> {
    type Output = Self;

    /// Remainder with the sign of the dividend, equal to
    /// `self - rhs * (self / rhs)`.
    #[inline]
    fn rem(self, rhs: Self) -> Self {
        div_rem(self, rhs).1
    }
}

impl<H: Limb, L: UnsignedLimb> DivAssign for Duplex<H, L> {
    #[inline(always)]
    fn div_assign(&mut self, rhs: Self) {
        *self = *self / rhs;
    }
}

impl<H: Limb, L: UnsignedLimb> RemAssign for Duplex<H, L> {
    #[inline(always)]
    fn rem_assign(&mut self, rhs: Self) {
        *self = *self % rhs;
    }
}
