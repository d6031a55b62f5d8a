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

//! # Limb Capability
//!
//! A *limb* is an integer of fixed width that can be used as one half of a
//! wider [`Duplex`] integer. Every built-in integer from `u8`/`i8` up to
//! `u128`/`i128` is a limb, and every `Duplex<High, Low>` built from limbs is a
//! limb again, so composition recurses to any power-of-two width.
//!
//! The trait collects the small operation set the duplex algorithms need:
//! wrapping arithmetic (through `num_traits`), checked arithmetic (through
//! the by-value `Checked*Val` traits), total shifts that accept
//! amounts at or beyond the width, a full-width (widening) multiply, a
//! truncating division, and two's-complement casts between limbs of any
//! width.

use core::{
    fmt::Debug,
    hash::Hash,
    ops::{BitAnd, BitOr, BitXor, Not},
};
use num_traits::{Bounded, One, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub, Zero};

use crate::{
    duplex::Duplex,
    num::ops::checked_arithmetic::{CheckedAddVal, CheckedMulVal, CheckedNegVal, CheckedSubVal},
};

/// An integer usable as a building block of wider integers.
///
/// Arithmetic through the `Wrapping*` traits wraps on overflow, matching
/// machine-integer semantics. `Ord` is the numeric order for the limb's own
/// signedness.
///
/// # Examples
///
/// ```rust
/// # use limbic_core::num::limb::Limb;
/// assert_eq!(<i16 as Limb>::DIGITS, 15);
/// assert_eq!(u8::cast_from(-1i32), 255);
/// assert_eq!((-8i32).shr_total(40), -1);
/// assert_eq!(Limb::widening_mul(100u8, 3), 300u16);
/// assert_eq!(14i64.used_digits(), 4);
/// ```
pub trait Limb:
    Copy
    + Default
    + Debug
    + Eq
    + Ord
    + Hash
    + Send
    + Sync
    + Not<Output = Self>
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + BitXor<Output = Self>
    + Zero
    + One
    + Bounded
    + WrappingAdd
    + WrappingSub
    + WrappingMul
    + WrappingNeg
    + CheckedAddVal
    + CheckedSubVal
    + CheckedMulVal
    + CheckedNegVal
{
    /// Storage width in bits.
    const BITS: u32;
    /// Whether the top bit is a two's-complement sign bit.
    const SIGNED: bool;
    /// Number of value bits, excluding the sign bit.
    const DIGITS: u32 = Self::BITS - Self::SIGNED as u32;

    /// The unsigned limb of the same width.
    type Unsigned: UnsignedLimb;
    /// The signed limb of the same width.
    type Signed: Limb;
    /// A limb of twice the width and the same signedness.
    type Wide: Limb;

    /// Converts any limb into `Self`, truncating or sign/zero-extending the
    /// two's-complement bit pattern like an `as` cast.
    fn cast_from<T: Limb>(value: T) -> Self;

    /// Returns the low 128 bits of the value, sign-extended when `Self` is
    /// signed and narrower than 128 bits.
    fn to_u128_wrapping(self) -> u128;

    /// Shift left; amounts of `BITS` or more yield zero.
    fn shl_total(self, n: u32) -> Self;

    /// Shift right, arithmetic for signed limbs; amounts of `BITS` or more
    /// yield the sign fill.
    fn shr_total(self, n: u32) -> Self;

    /// Number of leading zero bits of the bit pattern.
    fn leading_zeros(self) -> u32;

    /// The exact product in the double-width limb.
    fn widening_mul(self, rhs: Self) -> Self::Wide;

    /// Truncating quotient and remainder. `MIN / -1` wraps to `MIN`.
    ///
    /// # Panics
    ///
    /// Panics if `rhs` is zero.
    fn div_rem(self, rhs: Self) -> (Self, Self);

    /// Nearest `f64` value.
    fn to_f64(self) -> f64;

    /// Converts from `f64`, truncating toward zero. Non-finite or out of range
    /// inputs produce an unspecified but valid limb.
    fn from_f64(value: f64) -> Self;

    /// Returns `true` if the value is below zero.
    #[inline]
    fn is_negative(self) -> bool {
        Self::SIGNED && self < Self::zero()
    }

    /// The value with every bit set.
    #[inline]
    fn all_ones() -> Self {
        !Self::zero()
    }

    /// `1` for `true`, `0` for `false`.
    #[inline]
    fn from_bool(bit: bool) -> Self {
        if bit { Self::one() } else { Self::zero() }
    }

    /// Returns the bit at `index` (0 is least significant).
    #[inline]
    fn bit(self, index: u32) -> bool {
        !(self.shr_total(index) & Self::one()).is_zero()
    }

    /// Magnitude as the unsigned limb of the same width.
    #[inline]
    fn unsigned_abs(self) -> Self::Unsigned {
        if self.is_negative() {
            Self::Unsigned::cast_from(self.wrapping_neg())
        } else {
            Self::Unsigned::cast_from(self)
        }
    }

    /// Number of bits needed to hold the magnitude of the value.
    #[inline]
    fn used_digits(self) -> u32 {
        let magnitude = self.unsigned_abs();
        <Self::Unsigned as Limb>::BITS - magnitude.leading_zeros()
    }

    /// Sign- or zero-extends into the double-width limb.
    #[inline]
    fn widen(self) -> Self::Wide {
        Self::Wide::cast_from(self)
    }
}

/// Marker for limbs whose bit pattern is read as an unsigned number.
///
/// The low half of every [`Duplex`] must be an unsigned limb.
pub trait UnsignedLimb: Limb {}

macro_rules! impl_primitive_limb {
    ($t:ty, $bits:expr, $signed:expr, $unsigned:ty, $signed_ty:ty, $wide:ty, |$a:ident, $b:ident| $mul:expr) => {
        impl Limb for $t {
            const BITS: u32 = $bits;
            const SIGNED: bool = $signed;

            type Unsigned = $unsigned;
            type Signed = $signed_ty;
            type Wide = $wide;

            #[inline(always)]
            fn cast_from<T: Limb>(value: T) -> Self {
                value.to_u128_wrapping() as $t
            }

            #[inline(always)]
            fn to_u128_wrapping(self) -> u128 {
                self as u128
            }

            #[inline(always)]
            fn shl_total(self, n: u32) -> Self {
                self.checked_shl(n).unwrap_or(0)
            }

            #[inline(always)]
            fn shr_total(self, n: u32) -> Self {
                match self.checked_shr(n) {
                    Some(shifted) => shifted,
                    None if <$t as Limb>::is_negative(self) => !0,
                    None => 0,
                }
            }

            #[inline(always)]
            fn leading_zeros(self) -> u32 {
                <$t>::leading_zeros(self)
            }

            #[inline(always)]
            fn widening_mul(self, rhs: Self) -> $wide {
                let ($a, $b) = (self, rhs);
                $mul
            }

            #[inline(always)]
            fn div_rem(self, rhs: Self) -> (Self, Self) {
                (self.wrapping_div(rhs), self.wrapping_rem(rhs))
            }

            #[inline(always)]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline(always)]
            fn from_f64(value: f64) -> Self {
                value as $t
            }
        }
    };
}

impl_primitive_limb!(u8, 8, false, u8, i8, u16, |a, b| (a as u16) * (b as u16));
impl_primitive_limb!(u16, 16, false, u16, i16, u32, |a, b| (a as u32) * (b as u32));
impl_primitive_limb!(u32, 32, false, u32, i32, u64, |a, b| (a as u64) * (b as u64));
impl_primitive_limb!(u64, 64, false, u64, i64, u128, |a, b| (a as u128) * (b as u128));
impl_primitive_limb!(u128, 128, false, u128, i128, Duplex<u128, u128>, |a, b| {
    long_multiply_u128(a, b)
});

impl_primitive_limb!(i8, 8, true, u8, i8, i16, |a, b| (a as i16) * (b as i16));
impl_primitive_limb!(i16, 16, true, u16, i16, i32, |a, b| (a as i32) * (b as i32));
impl_primitive_limb!(i32, 32, true, u32, i32, i64, |a, b| (a as i64) * (b as i64));
impl_primitive_limb!(i64, 64, true, u64, i64, i128, |a, b| (a as i128) * (b as i128));
impl_primitive_limb!(i128, 128, true, u128, i128, Duplex<i128, u128>, |a, b| {
    long_multiply_i128(a, b)
});

impl UnsignedLimb for u8 {}
impl UnsignedLimb for u16 {}
impl UnsignedLimb for u32 {}
impl UnsignedLimb for u64 {}
impl UnsignedLimb for u128 {}

/// Schoolbook product of two 128-bit words using four 64-bit partial products.
fn long_multiply_u128(lhs: u128, rhs: u128) -> Duplex<u128, u128> {
    const HALF: u32 = 64;
    const MASK: u128 = u64::MAX as u128;

    let (a1, a0) = (lhs >> HALF, lhs & MASK);
    let (b1, b0) = (rhs >> HALF, rhs & MASK);

    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    // At most three 64-bit terms, so this cannot overflow.
    let mid = (p00 >> HALF) + (p01 & MASK) + (p10 & MASK);
    let low = (p00 & MASK) | (mid << HALF);
    let high = p11 + (p01 >> HALF) + (p10 >> HALF) + (mid >> HALF);

    Duplex::from_parts(high, low)
}

/// Signed 256-bit product: the unsigned product of the bit patterns with the
/// upper half corrected for each negative operand.
fn long_multiply_i128(lhs: i128, rhs: i128) -> Duplex<i128, u128> {
    let unsigned = long_multiply_u128(lhs as u128, rhs as u128);
    let mut high = unsigned.high();
    if lhs < 0 {
        high = high.wrapping_sub(rhs as u128);
    }
    if rhs < 0 {
        high = high.wrapping_sub(lhs as u128);
    }
    Duplex::from_parts(high as i128, unsigned.low())
}
