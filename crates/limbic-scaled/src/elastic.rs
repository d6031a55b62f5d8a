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

//! # Elastic Integers
//!
//! `Elastic<S>` pairs a stored integer with a declared digit count: the
//! number of binary digits known to suffice for the value. Arithmetic grows
//! the count with the same rules that govern scaled values at exponent zero,
//! so a chain of operations never loses a bit without reporting it.
//!
//! Signed elastic integers use the symmetric range
//! `[-(2^digits - 1), 2^digits - 1]`; the most negative two's-complement value
//! is never produced, which keeps negation closed.
//!
//! The storage type stays fixed. An operation whose result would need more
//! digits than the storage holds fails with
//! [`ArithmeticError::CapacityExceeded`]; the operators panic with that error,
//! the `checked_*` methods return it. Move to a wider storage with
//! [`Elastic::widen`] or [`Elastic::resize`] before such an operation.
//!
//! ```rust
//! # use limbic_scaled::elastic::Elastic;
//! let a = Elastic::from_literal(14i32).unwrap();
//! assert_eq!(a.digits(), 4);
//! let b = a * a + a;
//! assert_eq!(b.value(), 210);
//! assert_eq!(b.digits(), 9);
//! ```

use std::{
    cmp::Ordering,
    fmt::Display,
    hash::{Hash, Hasher},
    ops::{Add, BitAnd, BitOr, BitXor, Div, Mul, Neg, Not, Rem, Shl, Shr, Sub},
};

use limbic_core::num::limb::Limb;
use num_traits::{WrappingNeg, WrappingSub};

use crate::{
    deduce::{self, Descriptor},
    error::{or_panic, ArithmeticError},
    repr::Representation,
};

/// An integer with a tracked digit count.
#[derive(Debug, Clone, Copy)]
pub struct Elastic<S> {
    value: S,
    digits: u32,
}

impl<S: Limb> Elastic<S> {
    /// Creates an elastic integer declaring `digits` digits.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::InvalidDigits`] if the storage holds fewer digits,
    /// [`ArithmeticError::NotRepresentable`] if `value` needs more.
    pub fn new(value: S, digits: u32) -> Result<Self, ArithmeticError> {
        if digits > S::DIGITS {
            return Err(ArithmeticError::InvalidDigits {
                digits,
                capacity: S::DIGITS,
            });
        }
        if value.used_digits() > digits {
            return Err(ArithmeticError::NotRepresentable);
        }
        Ok(Self { value, digits })
    }

    /// Creates an elastic integer declaring exactly the digits `value` uses.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::NotRepresentable`] for the most negative value of a
    /// signed storage, which lies outside every symmetric range.
    pub fn from_literal(value: S) -> Result<Self, ArithmeticError> {
        Self::new(value, value.used_digits())
    }

    /// The largest value with `digits` digits.
    pub fn max_value(digits: u32) -> Result<Self, ArithmeticError> {
        Self::new(<S as Representation>::max_with_digits(digits), digits)
    }

    /// The smallest value with `digits` digits: zero when unsigned, the
    /// negated maximum when signed.
    pub fn lowest(digits: u32) -> Result<Self, ArithmeticError> {
        let max = Self::max_value(digits)?;
        if S::SIGNED {
            Ok(Self {
                value: max.value.wrapping_neg(),
                digits,
            })
        } else {
            Ok(Self {
                value: S::zero(),
                digits,
            })
        }
    }

    /// The stored integer.
    #[inline(always)]
    pub fn value(&self) -> S {
        self.value
    }

    /// The declared digit count.
    #[inline(always)]
    pub fn digits(&self) -> u32 {
        self.digits
    }

    /// The shape of this value as an exponent-zero, radix-2 descriptor.
    #[inline]
    pub fn descriptor(&self) -> Descriptor {
        Descriptor::new(self.digits, 0, 2, S::SIGNED)
    }

    /// Moves to the double-width storage, keeping the digits.
    #[inline]
    pub fn widen(self) -> Elastic<S::Wide> {
        Elastic {
            value: self.value.widen(),
            digits: self.digits,
        }
    }

    /// Moves to another storage, keeping the digits.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::CapacityExceeded`] if `T` holds fewer digits,
    /// [`ArithmeticError::NotRepresentable`] for a negative value and an
    /// unsigned `T`.
    pub fn resize<T: Limb>(self) -> Result<Elastic<T>, ArithmeticError> {
        if self.value.is_negative() && !T::SIGNED {
            return Err(ArithmeticError::NotRepresentable);
        }
        sized(T::cast_from(self.value), self.digits)
    }

    /// `self + rhs` with `max(d1, d2) + 1` digits.
    pub fn checked_add(self, rhs: Self) -> Result<Self, ArithmeticError> {
        let result = deduce::add(&self.descriptor(), &rhs.descriptor()).result;
        sized(self.value.wrapping_add(&rhs.value), result.digits)
    }

    /// `self - rhs` in the signed storage.
    pub fn checked_sub(self, rhs: Self) -> Result<Elastic<S::Signed>, ArithmeticError> {
        let result = deduce::subtract(&self.descriptor(), &rhs.descriptor()).result;
        ensure_capacity::<S::Signed>(result.digits)?;
        let lhs = S::Signed::cast_from(self.value);
        let rhs = S::Signed::cast_from(rhs.value);
        sized(lhs.wrapping_sub(&rhs), result.digits)
    }

    /// `self * rhs` with `d1 + d2` digits.
    pub fn checked_mul(self, rhs: Self) -> Result<Self, ArithmeticError> {
        let result = deduce::multiply(&self.descriptor(), &rhs.descriptor()).result;
        sized(self.value.wrapping_mul(&rhs.value), result.digits)
    }

    /// Truncating `self / rhs`, keeping the dividend's digits.
    pub fn checked_div(self, rhs: Self) -> Result<Self, ArithmeticError> {
        if rhs.value.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let result = deduce::divide(&self.descriptor(), &rhs.descriptor()).result;
        sized(self.value.div_rem(rhs.value).0, result.digits)
    }

    /// `self % rhs` with the sign of the dividend.
    pub fn checked_rem(self, rhs: Self) -> Result<Self, ArithmeticError> {
        if rhs.value.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let result = deduce::remainder(&self.descriptor(), &rhs.descriptor()).result;
        sized(self.value.div_rem(rhs.value).1, result.digits)
    }

    /// `-self` in the signed storage, keeping the digits.
    pub fn checked_neg(self) -> Result<Elastic<S::Signed>, ArithmeticError> {
        let result = deduce::negate(&self.descriptor());
        ensure_capacity::<S::Signed>(result.digits)?;
        sized(S::Signed::cast_from(self.value).wrapping_neg(), result.digits)
    }

    /// `!self`. A signed complement maps `x` to `-x - 1` and grows by one
    /// digit; an unsigned one complements only the declared digits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::elastic::Elastic;
    /// let x = Elastic::new(7i8, 3).unwrap().checked_not().unwrap();
    /// assert_eq!((x.value(), x.digits()), (-8, 4));
    /// let y = Elastic::new(0b0101u8, 4).unwrap().checked_not().unwrap();
    /// assert_eq!((y.value(), y.digits()), (0b1010, 4));
    /// assert!(Elastic::new(1i8, 7).unwrap().checked_not().is_err());
    /// ```
    pub fn checked_not(self) -> Result<Self, ArithmeticError> {
        let result = deduce::bit_not(&self.descriptor());
        let value = if S::SIGNED {
            !self.value
        } else {
            !self.value & <S as Representation>::max_with_digits(self.digits)
        };
        sized(value, result.digits)
    }

    /// `self << amount`, growing the digits by `amount`.
    pub fn checked_shl(self, amount: u32) -> Result<Self, ArithmeticError> {
        let digits = self.digits.saturating_add(amount);
        ensure_capacity::<S>(digits)?;
        sized(self.value.shl_total(amount), digits)
    }
}

/// Fails if `T` cannot hold `digits` digits.
#[inline]
fn ensure_capacity<T: Limb>(digits: u32) -> Result<(), ArithmeticError> {
    if digits > T::DIGITS {
        Err(ArithmeticError::capacity(digits, T::DIGITS))
    } else {
        Ok(())
    }
}

/// Wraps a result whose value is known to fit `digits`.
#[inline]
fn sized<T: Limb>(value: T, digits: u32) -> Result<Elastic<T>, ArithmeticError> {
    ensure_capacity::<T>(digits)?;
    Ok(Elastic { value, digits })
}

impl<S: Limb> Representation for Elastic<S> {
    type Storage = S;
    type Widened = Self;
    type Signed = Elastic<S::Signed>;

    #[inline(always)]
    fn digits(&self) -> u32 {
        self.digits
    }

    #[inline(always)]
    fn storage(self) -> S {
        self.value
    }

    #[inline(always)]
    fn from_storage(storage: S, digits: u32) -> Self {
        Self {
            value: storage,
            digits,
        }
    }

    #[inline]
    fn try_from_storage(storage: S, digits: u32) -> Result<Self, ArithmeticError> {
        Self::new(storage, digits)
    }

    fn max_with_digits(digits: u32) -> Self {
        let digits = digits.min(S::DIGITS);
        Self::from_storage(<S as Representation>::max_with_digits(digits), digits)
    }

    fn lowest_with_digits(digits: u32) -> Self {
        let max = <Self as Representation>::max_with_digits(digits);
        if S::SIGNED {
            Self::from_storage(max.value.wrapping_neg(), max.digits)
        } else {
            Self::from_storage(S::zero(), max.digits)
        }
    }
}

impl<S: Limb> Add for Elastic<S> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        or_panic(self.checked_add(rhs))
    }
}

impl<S: Limb> Sub for Elastic<S> {
    type Output = Elastic<S::Signed>;

    fn sub(self, rhs: Self) -> Elastic<S::Signed> {
        or_panic(self.checked_sub(rhs))
    }
}

impl<S: Limb> Mul for Elastic<S> {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        or_panic(self.checked_mul(rhs))
    }
}

impl<S: Limb> Div for Elastic<S> {
    type Output = Self;

    fn div(self, rhs: Self) -> Self {
        or_panic(self.checked_div(rhs))
    }
}

impl<S: Limb> Rem for Elastic<S> {
    type Output = Self;

    fn rem(self, rhs: Self) -> Self {
        or_panic(self.checked_rem(rhs))
    }
}

impl<S: Limb> Neg for Elastic<S> {
    type Output = Elastic<S::Signed>;

    fn neg(self) -> Elastic<S::Signed> {
        or_panic(self.checked_neg())
    }
}

impl<S: Limb> Shl<u32> for Elastic<S> {
    type Output = Self;

    fn shl(self, amount: u32) -> Self {
        or_panic(self.checked_shl(amount))
    }
}

impl<S: Limb> Shr<u32> for Elastic<S> {
    type Output = Self;

    /// Flooring shift; the digits shrink by `amount` (signed values keep one
    /// for the rounded-away magnitude).
    fn shr(self, amount: u32) -> Self {
        Self {
            value: self.value.shr_total(amount),
            digits: deduce::shrink_digits(self.digits, amount, S::SIGNED),
        }
    }
}

impl<S: Limb> Not for Elastic<S> {
    type Output = Self;

    fn not(self) -> Self {
        or_panic(self.checked_not())
    }
}

impl<S: Limb> BitAnd for Elastic<S> {
    type Output = Self;

    fn bitand(self, rhs: Self) -> Self {
        let result = deduce::bit_and(&self.descriptor(), &rhs.descriptor());
        or_panic(sized(self.value & rhs.value, result.digits))
    }
}

impl<S: Limb> BitOr for Elastic<S> {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        let result = deduce::bit_or(&self.descriptor(), &rhs.descriptor());
        or_panic(sized(self.value | rhs.value, result.digits))
    }
}

impl<S: Limb> BitXor for Elastic<S> {
    type Output = Self;

    fn bitxor(self, rhs: Self) -> Self {
        let result = deduce::bit_xor(&self.descriptor(), &rhs.descriptor());
        or_panic(sized(self.value ^ rhs.value, result.digits))
    }
}

impl<S: Limb> PartialEq for Elastic<S> {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl<S: Limb> Eq for Elastic<S> {}

impl<S: Limb> PartialOrd for Elastic<S> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<S: Limb> Ord for Elastic<S> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.value.cmp(&other.value)
    }
}

impl<S: Limb> Hash for Elastic<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl<S: Limb + Display> Display for Elastic<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.value)
    }
}
