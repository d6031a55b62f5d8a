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

//! Truncating and widening multiplication.

use core::ops::{Mul, MulAssign};

use super::{Duplex, arithmetic::carrying_add};
use crate::num::limb::{Limb, UnsignedLimb};

/// Splits a double-width limb product into `(low, high)` limbs.
#[inline(always)]
fn split<L: UnsignedLimb>(product: L::Wide) -> (L, L) {
    (L::cast_from(product), L::cast_from(product.shr_total(L::BITS)))
}

/// Schoolbook multiplication at limb granularity.
///
/// Both operands are read as two unsigned limbs; the four partial products
/// are accumulated with carry propagation into four result words. For signed
/// operands the upper half is then corrected by subtracting the other
/// operand once for each negative factor, which turns the unsigned product
/// of the bit patterns into the signed product.
pub(super) fn long_multiply<H: Limb, L: UnsignedLimb>(
    lhs: Duplex<H, L>,
    rhs: Duplex<H, L>,
) -> Duplex<Duplex<H, L>, Duplex<H::Unsigned, L>> {
    let a = [lhs.low, L::cast_from(lhs.high)];
    let b = [rhs.low, L::cast_from(rhs.high)];

    let mut words = [L::zero(); 4];
    for (i, &x) in a.iter().enumerate() {
        let mut carry = L::zero();
        for (j, &y) in b.iter().enumerate() {
            let (product_low, product_high) = split::<L>(x.widening_mul(y));
            let (sum, c1) = carrying_add(words[i + j], product_low);
            let (sum, c2) = carrying_add(sum, carry);
            words[i + j] = sum;
            // x * y + word + carry < 2^(2W), so the new carry fits one limb.
            carry = product_high
                .wrapping_add(&L::from_bool(c1))
                .wrapping_add(&L::from_bool(c2));
        }
        words[i + 2] = carry;
    }

    let mut upper = Duplex::from_parts(H::cast_from(words[3]), words[2]);
    if lhs.is_negative() {
        upper = upper - rhs;
    }
    if rhs.is_negative() {
        upper = upper - lhs;
    }
    let lower = Duplex::from_parts(H::Unsigned::cast_from(words[1]), words[0]);
    Duplex::from_parts(upper, lower)
}

impl<H: Limb, L: UnsignedLimb> Mul for Duplex<H, L> {
    type Output = Self;

    /// Wrapping multiplication: the low half of the full product.
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        let (low, carry) = split::<L>(self.low.widening_mul(rhs.low));
        let cross = L::cast_from(self.high)
            .wrapping_mul(&rhs.low)
            .wrapping_add(&self.low.wrapping_mul(&L::cast_from(rhs.high)));
        let high = H::cast_from(carry.wrapping_add(&cross));
        Self::from_parts(high, low)
    }
}

impl<H: Limb, L: UnsignedLimb> MulAssign for Duplex<H, L> {
    #[inline(always)]
    fn mul_assign(&mut self, rhs: Self) {
        *self = *self * rhs;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplex::{I256, U256};
    use num_traits::{Bounded, Zero};
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    type I64x = Duplex<i32, u32>;
    type U64x = Duplex<u32, u32>;
    type I128x = Duplex<i64, u64>;
    type U128x = Duplex<u64, u64>;

    #[test]
    fn test_mul_small_values() {
        let product = I64x::from_integer(-7) * I64x::from_integer(6);
        assert_eq!(product, I64x::from_integer(-42));
        let product = I64x::from_integer(1i64 << 31) * I64x::from_integer(4);
        assert_eq!(product.into_parts(), (2, 0));
    }

    #[test]
    fn test_widening_mul_of_extremes() {
        let max = U64x::max_value();
        let product = max.widening_mul(max);
        assert_eq!(product.to_integer::<u128>(), (u64::MAX as u128) * (u64::MAX as u128));

        let min = I64x::min_value();
        let product = min.widening_mul(min);
        assert_eq!(product.to_integer::<i128>(), 1i128 << 126);
        let product = min.widening_mul(I64x::max_value());
        assert_eq!(product.to_integer::<i128>(), (i64::MIN as i128) * (i64::MAX as i128));
    }

    #[test]
    fn test_widening_mul_into_512_bits() {
        let a = I256::from_integer(i128::MIN);
        let product = a.widening_mul(a);
        // (-2^127)^2 = 2^254 fits in the low 256 bits.
        assert!(product.high().is_zero());
        assert_eq!(product.low(), U256::from_integer(1u8) << 254);

        let product = I256::from_integer(-1).widening_mul(I256::max_value());
        assert_eq!(product.high(), I256::from_integer(-1));
        assert_eq!(product.low(), (U256::max_value() >> 1) + U256::from_integer(2u8));
    }

    #[test]
    fn test_mul_matches_native_i128() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let a: i128 = rng.random();
            let b: i128 = rng.random();
            let product = I128x::from_integer(a) * I128x::from_integer(b);
            assert_eq!(product.to_integer::<i128>(), a.wrapping_mul(b));

            let mut assigned = I128x::from_integer(a);
            assigned *= I128x::from_integer(b);
            assert_eq!(assigned, product);
        }
    }

    #[test]
    fn test_widening_mul_matches_native_i128() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let a: i64 = rng.random();
            let b: i64 = rng.random();
            let product = I64x::from_integer(a).widening_mul(I64x::from_integer(b));
            assert_eq!(product.to_integer::<i128>(), (a as i128) * (b as i128));
        }
    }

    #[test]
    fn test_widening_mul_matches_native_u128() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10_000 {
            let a: u64 = rng.random();
            let b: u64 = rng.random();
            let product = U64x::from_integer(a).widening_mul(U64x::from_integer(b));
            assert_eq!(product.to_integer::<u128>(), (a as u128) * (b as u128));

            let product = U128x::from_integer(a) * U128x::from_integer(b);
            assert_eq!(product.to_integer::<u128>(), (a as u128) * (b as u128));
        }
    }
}
