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

//! # Fractions
//!
//! An unreduced ratio of two integers. Fractions are a conversion source for
//! scaled values; their operators wrap on overflow and are not range
//! checked.
//!
//! ```rust
//! # use limbic_scaled::fraction::Fraction;
//! let sum = Fraction::new(1i32, 6) + Fraction::new(1, 3);
//! assert_eq!(sum, Fraction::new(9, 18));
//! assert_eq!(sum.reduce(), Fraction::new(1, 2));
//! assert_eq!(sum.to_string(), "9/18");
//! ```

use std::{
    fmt::Display,
    ops::{Add, Div, Mul, Neg, Sub},
};

use limbic_core::num::limb::Limb;
use num_traits::Zero;

use crate::{error::ArithmeticError, scaled::Scaled};

/// The ratio `numerator / denominator`.
///
/// Equality is structural: `1/2` and `2/4` differ until reduced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Fraction<N, D = N> {
    /// The dividend.
    pub numerator: N,
    /// The divisor. Zero is allowed; dividing by it is the caller's concern.
    pub denominator: D,
}

impl<N, D> Fraction<N, D> {
    /// Creates `numerator / denominator` without reducing it.
    #[inline]
    pub const fn new(numerator: N, denominator: D) -> Self {
        Self {
            numerator,
            denominator,
        }
    }
}

/// Greatest common divisor by Stein's binary algorithm.
fn gcd<U: Limb>(mut a: U, mut b: U) -> U {
    if a.is_zero() {
        return b;
    }
    if b.is_zero() {
        return a;
    }
    let shift = trailing_zeros(a | b);
    a = a.shr_total(trailing_zeros(a));
    loop {
        b = b.shr_total(trailing_zeros(b));
        if a > b {
            std::mem::swap(&mut a, &mut b);
        }
        b = b.wrapping_sub(&a);
        if b.is_zero() {
            return a.shl_total(shift);
        }
    }
}

fn trailing_zeros<U: Limb>(value: U) -> u32 {
    (0..U::BITS).find(|&index| value.bit(index)).unwrap_or(U::BITS)
}

impl<T: Limb> Fraction<T, T> {
    /// Divides numerator and denominator by their greatest common divisor.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::fraction::Fraction;
    /// assert_eq!(Fraction::new(-12i16, 18).reduce(), Fraction::new(-2, 3));
    /// assert_eq!(Fraction::new(0u8, 0).reduce(), Fraction::new(0, 0));
    /// ```
    pub fn reduce(self) -> Self {
        let divisor = gcd(self.numerator.unsigned_abs(), self.denominator.unsigned_abs());
        if divisor.is_zero() {
            return self;
        }
        // A gcd that does not fit `T` only arises from `MIN / MIN`.
        let divisor = T::cast_from(divisor);
        if divisor.is_negative() {
            return Self::new(T::one(), T::one());
        }
        Self::new(
            self.numerator.div_rem(divisor).0,
            self.denominator.div_rem(divisor).0,
        )
    }

    /// The nearest float to the ratio; a zero denominator gives an infinity
    /// or NaN like float division.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.numerator.to_f64() / self.denominator.to_f64()
    }

    /// The widened quotient of numerator and denominator as scaled values at
    /// exponent zero.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::fraction::Fraction;
    /// let third = Fraction::new(1i16, 3).to_scaled::<2>().unwrap();
    /// assert_eq!((third.rep(), third.exponent()), (10_922i32, -15));
    /// ```
    pub fn to_scaled<const RADIX: u32>(self) -> Result<Scaled<T::Wide, RADIX>, ArithmeticError> {
        Scaled::<T, RADIX>::from_rep(self.numerator, 0)
            .quotient::<T::Wide>(Scaled::from_rep(self.denominator, 0))
    }
}

impl<T: Limb> Add for Fraction<T, T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(
            self.numerator
                .wrapping_mul(&rhs.denominator)
                .wrapping_add(&rhs.numerator.wrapping_mul(&self.denominator)),
            self.denominator.wrapping_mul(&rhs.denominator),
        )
    }
}

impl<T: Limb> Sub for Fraction<T, T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(
            self.numerator
                .wrapping_mul(&rhs.denominator)
                .wrapping_sub(&rhs.numerator.wrapping_mul(&self.denominator)),
            self.denominator.wrapping_mul(&rhs.denominator),
        )
    }
}

impl<T: Limb> Mul for Fraction<T, T> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        Self::new(
            self.numerator.wrapping_mul(&rhs.numerator),
            self.denominator.wrapping_mul(&rhs.denominator),
        )
    }
}

impl<T: Limb> Div for Fraction<T, T> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        Self::new(
            self.numerator.wrapping_mul(&rhs.denominator),
            self.denominator.wrapping_mul(&rhs.numerator),
        )
    }
}

impl<T: Limb> Neg for Fraction<T, T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(self.numerator.wrapping_neg(), self.denominator)
    }
}

impl<N: Display, D: Display> Display for Fraction<N, D> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.numerator, self.denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use limbic_core::duplex::U256;

    #[test]
    fn test_gcd() {
        assert_eq!(gcd(48u32, 18), 6);
        assert_eq!(gcd(17u32, 5), 1);
        assert_eq!(gcd(0u32, 9), 9);
        assert_eq!(gcd(1u8 << 7, 1 << 3), 8);
        assert_eq!(
            gcd(U256::from_integer(1u8) << 200, U256::from_integer(3u8) << 100),
            U256::from_integer(1u8) << 100
        );
    }

    #[test]
    fn test_reduce() {
        assert_eq!(Fraction::new(10i32, -4).reduce(), Fraction::new(5, -2));
        assert_eq!(Fraction::new(0i32, 7).reduce(), Fraction::new(0, 1));
        assert_eq!(Fraction::new(i8::MIN, i8::MIN).reduce(), Fraction::new(1, 1));
    }

    #[test]
    fn test_arithmetic() {
        let a = Fraction::new(1i32, 2);
        let b = Fraction::new(2i32, 3);
        assert_eq!((a - b).reduce(), Fraction::new(-1, 6));
        assert_eq!((a * b).reduce(), Fraction::new(1, 3));
        assert_eq!((a / b).reduce(), Fraction::new(3, 4));
        assert_eq!(-a, Fraction::new(-1, 2));
        assert_eq!((a + b).to_f64(), 7.0 / 6.0);
    }

    #[test]
    fn test_to_scaled() {
        let q = Fraction::new(-7i32, 2).to_scaled::<2>().unwrap();
        assert_eq!(q.to_f64(), -3.5);
        let eighth = Fraction::new(1i32, 8).to_scaled::<10>().unwrap();
        assert_eq!((eighth.rep(), eighth.exponent()), (125_000_000i64, -9));
        let small = Fraction::new(-2i8, 3).to_scaled::<10>().unwrap();
        assert_eq!((small.rep(), small.exponent()), (-66i16, -2));
        assert_eq!(
            Fraction::new(1i32, 0).to_scaled::<2>(),
            Err(ArithmeticError::DivisionByZero)
        );
    }

    #[test]
    fn test_mixed_types_display() {
        let f: Fraction<i64, u8> = Fraction::new(-3, 4);
        assert_eq!(format!("{f}"), "-3/4");
    }
}
