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

//! # Duplex Integers
//!
//! `Duplex<High, Low>` is an integer of twice the limb width, holding the value
//! `high * 2^W + low` where `W` is the width of the limbs. The low limb is
//! always unsigned; the signedness of the whole integer is the signedness of
//! the high limb. Because a `Duplex` is itself a [`Limb`], duplexes nest to any
//! power-of-two width:
//!
//! ```rust
//! # use limbic_core::duplex::Duplex;
//! # use limbic_core::num::limb::Limb;
//! type I256 = Duplex<Duplex<i64, u64>, Duplex<u64, u64>>;
//! assert_eq!(<I256 as Limb>::BITS, 256);
//! let big = I256::from_integer(u128::MAX) * I256::from_integer(4);
//! assert_eq!(big >> 2, I256::from_integer(u128::MAX));
//! ```
//!
//! ## Submodules
//!
//! - `arithmetic`: Addition and subtraction with carry/borrow propagation,
//!   negation and the bitwise operators.
//! - `multiply`: Truncating and widening (schoolbook) multiplication.
//! - `divide`: Restoring long division producing quotient and remainder in
//!   one pass.
//! - `shift`: Shifts that stitch bits across the limb boundary.
//!
//! All operators wrap on overflow. Division by zero panics.

mod arithmetic;
mod divide;
mod multiply;
mod shift;

use num_traits::{Bounded, One, WrappingAdd, WrappingMul, WrappingNeg, WrappingSub, Zero};

use crate::num::limb::{Limb, UnsignedLimb};

/// A two's-complement integer composed of a high and a low limb of equal width.
///
/// Field order makes the derived `Ord` a lexicographic comparison of
/// `(high, low)`, which is the numeric order: the high limb compares with its
/// own signedness and the low limb as unsigned.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Duplex<H, L> {
    high: H,
    low: L,
}

/// 256-bit signed integer.
pub type I256 = Duplex<i128, u128>;
/// 256-bit unsigned integer.
pub type U256 = Duplex<u128, u128>;
/// 512-bit signed integer.
pub type I512 = Duplex<I256, U256>;
/// 512-bit unsigned integer.
pub type U512 = Duplex<U256, U256>;

impl<H: Limb, L: UnsignedLimb> Duplex<H, L> {
    const EQUAL_LIMB_WIDTHS: () = assert!(H::BITS == L::BITS, "duplex limbs must have equal widths");

    /// Creates a duplex from its two limbs.
    ///
    /// Limbs of unequal width are rejected at compile time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_core::duplex::Duplex;
    /// let value = Duplex::<i32, u32>::from_parts(-1, 5);
    /// assert_eq!(value, Duplex::from_integer(-(1i64 << 32) + 5));
    /// ```
    #[inline(always)]
    pub fn from_parts(high: H, low: L) -> Self {
        #[allow(clippy::let_unit_value)]
        let () = Self::EQUAL_LIMB_WIDTHS;
        Self { high, low }
    }

    /// Creates a duplex from any limb, sign-extending signed negative inputs
    /// and zero-extending everything else. Wider inputs are truncated.
    #[inline]
    pub fn from_integer<T: Limb>(value: T) -> Self {
        Self::cast_from(value)
    }

    /// Converts into any limb with `as`-cast semantics.
    #[inline]
    pub fn to_integer<T: Limb>(self) -> T {
        T::cast_from(self)
    }

    /// The upper limb, carrying the sign.
    #[inline(always)]
    pub fn high(&self) -> H {
        self.high
    }

    /// The lower limb, always unsigned.
    #[inline(always)]
    pub fn low(&self) -> L {
        self.low
    }

    /// Splits into `(high, low)`.
    #[inline(always)]
    pub fn into_parts(self) -> (H, L) {
        (self.high, self.low)
    }
}

impl<H: Limb, L: UnsignedLimb> Limb for Duplex<H, L> {
    const BITS: u32 = H::BITS + L::BITS;
    const SIGNED: bool = H::SIGNED;

    type Unsigned = Duplex<H::Unsigned, L>;
    type Signed = Duplex<H::Signed, L>;
    type Wide = Duplex<Self, Self::Unsigned>;

    fn cast_from<T: Limb>(value: T) -> Self {
        let low = L::cast_from(value);
        let high = if T::BITS > L::BITS {
            H::cast_from(value.shr_total(L::BITS))
        } else if value.is_negative() {
            H::all_ones()
        } else {
            H::zero()
        };
        Self::from_parts(high, low)
    }

    #[inline]
    fn to_u128_wrapping(self) -> u128 {
        let low = self.low.to_u128_wrapping();
        if L::BITS >= 128 {
            low
        } else {
            (self.high.to_u128_wrapping() << L::BITS) | low
        }
    }

    #[inline]
    fn shl_total(self, n: u32) -> Self {
        shift::shl(self, n)
    }

    #[inline]
    fn shr_total(self, n: u32) -> Self {
        shift::shr(self, n)
    }

    #[inline]
    fn leading_zeros(self) -> u32 {
        if self.high.is_zero() {
            H::BITS + self.low.leading_zeros()
        } else {
            self.high.leading_zeros()
        }
    }

    #[inline]
    fn widening_mul(self, rhs: Self) -> Self::Wide {
        multiply::long_multiply(self, rhs)
    }

    #[inline]
    fn div_rem(self, rhs: Self) -> (Self, Self) {
        divide::div_rem(self, rhs)
    }

    fn to_f64(self) -> f64 {
        self.high.to_f64() * 2f64.powi(L::BITS as i32) + self.low.to_f64()
    }

    fn from_f64(value: f64) -> Self {
        let scale = 2f64.powi(L::BITS as i32);
        let value = value.trunc();
        let high = (value / scale).floor();
        let low = value - high * scale;
        Self::from_parts(H::from_f64(high), L::from_f64(low))
    }
}

impl<H: UnsignedLimb, L: UnsignedLimb> UnsignedLimb for Duplex<H, L> {}

impl<H: Limb, L: UnsignedLimb> Zero for Duplex<H, L> {
    #[inline(always)]
    fn zero() -> Self {
        Self::from_parts(H::zero(), L::zero())
    }

    #[inline(always)]
    fn is_zero(&self) -> bool {
        self.high.is_zero() && self.low.is_zero()
    }
}

impl<H: Limb, L: UnsignedLimb> One for Duplex<H, L> {
    #[inline(always)]
    fn one() -> Self {
        Self::from_parts(H::zero(), L::one())
    }
}

impl<H: Limb, L: UnsignedLimb> Bounded for Duplex<H, L> {
    #[inline(always)]
    fn min_value() -> Self {
        Self::from_parts(H::min_value(), L::zero())
    }

    #[inline(always)]
    fn max_value() -> Self {
        Self::from_parts(H::max_value(), L::max_value())
    }
}

impl<H: Limb, L: UnsignedLimb> WrappingAdd for Duplex<H, L> {
    #[inline(always)]
    fn wrapping_add(&self, v: &Self) -> Self {
        *self + *v
    }
}

impl<H: Limb, L: UnsignedLimb> WrappingSub for Duplex<H, L> {
    #[inline(always)]
    fn wrapping_sub(&self, v: &Self) -> Self {
        *self - *v
    }
}

impl<H: Limb, L: UnsignedLimb> WrappingMul for Duplex<H, L> {
    #[inline(always)]
    fn wrapping_mul(&self, v: &Self) -> Self {
        *self * *v
    }
}

impl<H: Limb, L: UnsignedLimb> WrappingNeg for Duplex<H, L> {
    #[inline(always)]
    fn wrapping_neg(&self) -> Self {
        -*self
    }
}
