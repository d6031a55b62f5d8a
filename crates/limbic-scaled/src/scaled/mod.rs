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

//! # Scaled Values
//!
//! `Scaled<R, RADIX>` is the fixed-point number `rep * RADIX^exponent`. The
//! representation `R` is a limb (a built-in integer or a `Duplex`) or an
//! elastic integer; the radix is a const generic defaulting to 2.
//!
//! The exponent and the digit count are carried with each value. The
//! storage of an arithmetic result is selected statically:
//!
//! | Operation        | Result representation                        |
//! |------------------|----------------------------------------------|
//! | `+`, `*`, `/`, `%` | `R::Widened`                              |
//! | `-`, unary `-`   | the signed counterpart of `R::Widened`       |
//! | `<<`, `>>`       | `R`                                          |
//!
//! Before every raw operation the deduced digit count is checked against the
//! result storage. The `checked_*` methods report a shortfall as
//! [`ArithmeticError::CapacityExceeded`](crate::error::ArithmeticError); the
//! operators panic with it.
//!
//! ```rust
//! # use limbic_scaled::scaled::Scaled;
//! let a = Scaled::<i16>::from_f64(1.5, -4).unwrap();
//! let b = Scaled::<i16>::from_f64(0.25, -2).unwrap();
//! let sum = a + b;
//! assert_eq!(sum.exponent(), -4);
//! assert_eq!(sum.rep(), 28i32);
//! assert_eq!(sum.to_f64(), 1.75);
//! assert_eq!((a * b).exponent(), -6);
//! ```

mod convert;
mod ops;

use std::{
    cmp::Ordering,
    fmt::Display,
};

use limbic_core::num::{limb::Limb, ops::overflow::neg_overflows};
use num_traits::{One, WrappingNeg, Zero};

use crate::{
    deduce::Descriptor,
    error::ArithmeticError,
    repr::Representation,
    rounding::floor_div,
};

/// A representation scaled by a power of the radix.
#[derive(Debug, Clone, Copy)]
pub struct Scaled<R, const RADIX: u32 = 2> {
    rep: R,
    exponent: i32,
}

impl<R: Representation, const RADIX: u32> Scaled<R, RADIX> {
    const VALID_RADIX: () = assert!(RADIX >= 2, "the radix of a scaled value must be at least 2");

    /// Wraps a representation without changing it.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::scaled::Scaled;
    /// let x = Scaled::<i32, 10>::from_rep(12_345, -2);
    /// assert_eq!(x.to_f64(), 123.45);
    /// ```
    #[inline]
    pub fn from_rep(rep: R, exponent: i32) -> Self {
        let () = Self::VALID_RADIX;
        Self { rep, exponent }
    }

    /// The stored representation.
    #[inline(always)]
    pub fn rep(&self) -> R {
        self.rep
    }

    /// The power of the radix the representation is scaled by.
    #[inline(always)]
    pub fn exponent(&self) -> i32 {
        self.exponent
    }

    /// Splits into representation and exponent.
    #[inline(always)]
    pub fn into_parts(self) -> (R, i32) {
        (self.rep, self.exponent)
    }

    /// The digits the representation declares.
    #[inline]
    pub fn digits(&self) -> u32 {
        self.rep.digits()
    }

    /// The shape of this value as seen by the deduction rules.
    #[inline]
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::new(
            self.rep.digits(),
            self.exponent,
            RADIX,
            <R::Storage as Limb>::SIGNED,
        )
    }

    /// Digits left of the radix point; negative when the value is a pure
    /// fraction with leading zeros.
    #[inline]
    pub fn integer_digits(&self) -> i32 {
        self.descriptor().integer_digits()
    }

    /// Digits right of the radix point.
    #[inline]
    pub fn fractional_digits(&self) -> i32 {
        self.descriptor().fractional_digits()
    }

    /// Whether the value is zero, at any exponent.
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.rep.storage().is_zero()
    }

    /// Whether the value is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.rep.storage().is_negative()
    }

    /// The largest value at `exponent`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::scaled::Scaled;
    /// assert_eq!(Scaled::<i8>::max_value(-2).to_f64(), 31.75);
    /// assert_eq!(Scaled::<i8>::lowest(-2).to_f64(), -32.0);
    /// ```
    pub fn max_value(exponent: i32) -> Self {
        Self::max_value_with_digits(R::capacity(), exponent)
    }

    /// The largest value with `digits` digits at `exponent`.
    pub fn max_value_with_digits(digits: u32, exponent: i32) -> Self {
        Self::from_rep(R::max_with_digits(digits), exponent)
    }

    /// The smallest (most negative) value at `exponent`.
    pub fn lowest(exponent: i32) -> Self {
        Self::from_rep(R::lowest_with_digits(R::capacity()), exponent)
    }

    /// The smallest positive value at `exponent`: one unit in the last place.
    pub fn min_positive(exponent: i32) -> Self {
        Self::from_rep(R::from_storage(R::Storage::one(), 1), exponent)
    }

    /// The difference between one and the next value above it.
    #[inline]
    pub fn epsilon(exponent: i32) -> Self {
        Self::min_positive(exponent)
    }

    /// Conversions into a scaled value are exact or rounded by an explicit
    /// policy, so the implicit rounding error is zero.
    #[inline]
    pub fn round_error(exponent: i32) -> Self {
        Self::from_rep(R::from_storage(R::Storage::zero(), 0), exponent)
    }

    /// The magnitude, keeping the representation and exponent.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::NotRepresentable`] for the most negative value of a
    /// limb, whose magnitude needs one more digit.
    pub fn abs(self) -> Result<Self, ArithmeticError> {
        let storage = self.rep.storage();
        if !storage.is_negative() {
            return Ok(self);
        }
        if neg_overflows(storage) {
            return Err(ArithmeticError::NotRepresentable);
        }
        let rep = R::try_from_storage(storage.wrapping_neg(), self.rep.digits())?;
        Ok(Self::from_rep(rep, self.exponent))
    }

    /// The largest integer not above the value, at exponent zero.
    ///
    /// Values with a non-negative exponent are integers already and are
    /// returned unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::scaled::Scaled;
    /// let x = Scaled::<i32>::from_f64(-2.25, -2).unwrap().floor();
    /// assert_eq!((x.rep(), x.exponent()), (-3, 0));
    /// ```
    pub fn floor(self) -> Self {
        if self.exponent >= 0 {
            return self;
        }
        let shift = self.exponent.unsigned_abs();
        let (floored, _) = floor_div(self.rep.storage(), RADIX, shift);
        // A floored magnitude never exceeds the original one.
        Self::from_rep(R::from_storage(floored, self.rep.digits()), 0)
    }

    /// Exact three-way comparison of the represented values.
    fn compare(&self, other: &Self) -> Ordering {
        match self.exponent.cmp(&other.exponent) {
            Ordering::Equal => self.rep.storage().cmp(&other.rep.storage()),
            Ordering::Less => compare_finer::<R::Storage>(
                self.rep.storage(),
                other.rep.storage(),
                RADIX,
                (other.exponent as i64 - self.exponent as i64) as u32,
            ),
            Ordering::Greater => compare_finer::<R::Storage>(
                other.rep.storage(),
                self.rep.storage(),
                RADIX,
                (self.exponent as i64 - other.exponent as i64) as u32,
            )
            .reverse(),
        }
    }
}

/// Compares `fine * radix^-shift` against `coarse` without leaving the
/// storage: the fine value is floored to the coarse exponent and a discarded
/// remainder breaks the tie.
fn compare_finer<S: Limb>(fine: S, coarse: S, radix: u32, shift: u32) -> Ordering {
    let (floored, inexact) = floor_div(fine, radix, shift);
    match floored.cmp(&coarse) {
        Ordering::Equal if inexact => Ordering::Greater,
        ordering => ordering,
    }
}

impl<R: Representation, const RADIX: u32> PartialEq for Scaled<R, RADIX> {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl<R: Representation, const RADIX: u32> Eq for Scaled<R, RADIX> {}

impl<R: Representation, const RADIX: u32> PartialOrd for Scaled<R, RADIX> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl<R: Representation, const RADIX: u32> Ord for Scaled<R, RADIX> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl<R: Representation + Display, const RADIX: u32> Display for Scaled<R, RADIX> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}*{}^{}", self.rep, RADIX, self.exponent)
    }
}
