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

//! Carry/borrow arithmetic and bitwise operators.

use core::ops::{
    Add, AddAssign, BitAnd, BitAndAssign, BitOr, BitOrAssign, BitXor, BitXorAssign, Neg, Not, Sub,
    SubAssign,
};
use num_traits::Zero;

use super::Duplex;
use crate::num::limb::{Limb, UnsignedLimb};

/// Adds two unsigned limbs, returning the wrapped sum and the carry-out bit.
#[inline(always)]
pub(super) fn carrying_add<L: UnsignedLimb>(lhs: L, rhs: L) -> (L, bool) {
    let sum = lhs.wrapping_add(&rhs);
    (sum, sum < lhs)
}

impl<H: Limb, L: UnsignedLimb> Add for Duplex<H, L> {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        let (low, carry) = carrying_add(self.low, rhs.low);
        let high = self
            .high
            .wrapping_add(&rhs.high)
            .wrapping_add(&H::from_bool(carry));
        Self::from_parts(high, low)
    }
}

impl<H: Limb, L: UnsignedLimb> Sub for Duplex<H, L> {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        let low = self.low.wrapping_sub(&rhs.low);
        let borrow = self.low < rhs.low;
        let high = self
            .high
            .wrapping_sub(&rhs.high)
            .wrapping_sub(&H::from_bool(borrow));
        Self::from_parts(high, low)
    }
}

impl<H: Limb, L: UnsignedLimb> Neg for Duplex<H, L> {
    type Output = Self;

    /// Two's-complement negation. The most negative value negates to itself.
    #[inline]
    fn neg(self) -> Self {
        Self::zero() - self
    }
}

impl<H: Limb, L: UnsignedLimb> Not for Duplex<H, L> {
    type Output = Self;

    #[inline]
    fn not(self) -> Self {
        Self::from_parts(!self.high, !self.low)
    }
}

macro_rules! impl_bitwise {
    ($trait_name:ident, $method:ident, $assign_trait:ident, $assign_method:ident, $op:tt) => {
        impl<H: Limb, L: UnsignedLimb> $trait_name for Duplex<H, L> {
            type Output = Self;

            #[inline(always)]
            fn $method(self, rhs: Self) -> Self {
                Self::from_parts(self.high $op rhs.high, self.low $op rhs.low)
            }
        }

        impl<H: Limb, L: UnsignedLimb> $assign_trait for Duplex<H, L> {
            #[inline(always)]
            fn $assign_method(&mut self, rhs: Self) {
                *self = *self $op rhs;
            }
        }
    };
}

impl_bitwise!(BitAnd, bitand, BitAndAssign, bitand_assign, &);
impl_bitwise!(BitOr, bitor, BitOrAssign, bitor_assign, |);
impl_bitwise!(BitXor, bitxor, BitXorAssign, bitxor_assign, ^);

impl<H: Limb, L: UnsignedLimb> AddAssign for Duplex<H, L> {
    #[inline(always)]
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<H: Limb, L: UnsignedLimb> SubAssign for Duplex<H, L> {
    #[inline(always)]
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Bounded;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    type I64x = Duplex<i32, u32>;
    type I128x = Duplex<i64, u64>;
    type U128x = Duplex<u64, u64>;

    #[test]
    fn test_add_within_low_limb() {
        let sum = I64x::from_integer(0x12345678) + I64x::from_integer(0x7625);
        assert_eq!(sum, I64x::from_integer(0x12345678 + 0x7625));
    }

    #[test]
    fn test_add_carries_into_high() {
        let sum = I64x::from_integer(u32::MAX) + I64x::from_integer(1);
        assert_eq!(sum.into_parts(), (1, 0));

        let sum = I64x::from_integer(-1) + I64x::from_integer(1);
        assert_eq!(sum, I64x::zero());
    }

    #[test]
    fn test_sub_borrows_from_high() {
        let difference = I64x::from_integer(1i64 << 32) - I64x::from_integer(1);
        assert_eq!(difference.into_parts(), (0, u32::MAX));

        let difference = I64x::from_integer(0) - I64x::from_integer(1);
        assert_eq!(difference.into_parts(), (-1, u32::MAX));
    }

    #[test]
    fn test_wraps_at_bounds() {
        assert_eq!(I64x::max_value() + I64x::from_integer(1), I64x::min_value());
        assert_eq!(U128x::zero() - U128x::from_integer(1u8), U128x::max_value());
    }

    #[test]
    fn test_negation_is_idempotent() {
        for value in [0i64, 1, -1, 42, -(1 << 32), i64::MAX, i64::MIN + 1] {
            let x = I64x::from_integer(value);
            assert_eq!(-(-x), x);
            assert_eq!((-x).to_integer::<i64>(), -value);
        }
    }

    #[test]
    fn test_negation_of_most_negative_value_is_itself() {
        let min = I64x::min_value();
        assert_eq!(-min, min);
    }

    #[test]
    fn test_bitwise_operators() {
        let a = U128x::from_integer(0xff00_ff00_ff00_ff00_ff00u128);
        let b = U128x::from_integer(0x0ff0_0ff0_0ff0_0ff0_0ff0u128);
        assert_eq!(a & b, U128x::from_integer(0x0f00_0f00_0f00_0f00_0f00u128));
        assert_eq!(a | b, U128x::from_integer(0xfff0_fff0_fff0_fff0_fff0u128));
        assert_eq!(a ^ b, U128x::from_integer(0xf0f0_f0f0_f0f0_f0f0_f0f0u128));
        assert_eq!(!U128x::zero(), U128x::max_value());

        let mut c = a;
        c ^= a;
        assert!(c.is_zero());
    }

    #[test]
    fn test_add_sub_match_native_i128() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let a: i128 = rng.random();
            let b: i128 = rng.random();
            let (x, y) = (I128x::from_integer(a), I128x::from_integer(b));
            // Native wrapping semantics are the reference.
            assert_eq!((x + y).to_integer::<i128>(), a.wrapping_add(b));
            assert_eq!((x - y).to_integer::<i128>(), a.wrapping_sub(b));
            assert_eq!((!x).to_integer::<i128>(), !a);
            assert_eq!(x < y, a < b);

            let mut z = x;
            z += y;
            z -= y;
            assert_eq!(z, x);
        }
    }

    #[test]
    fn test_add_sub_match_native_u128() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let a: u128 = rng.random();
            let b: u128 = rng.random();
            let (x, y) = (U128x::from_integer(a), U128x::from_integer(b));
            assert_eq!((x + y).to_integer::<u128>(), a.wrapping_add(b));
            assert_eq!((x - y).to_integer::<u128>(), a.wrapping_sub(b));
            assert_eq!(x.cmp(&y), a.cmp(&b));
        }
    }
}
