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

use std::ops::{Add, Div, Mul, Neg, Rem, Shl, ShlAssign, Shr, ShrAssign, Sub};

use limbic_core::num::{
    limb::Limb,
    ops::overflow::{NativeOverflow, OverflowPolicy},
};
use num_traits::{WrappingMul, WrappingNeg};

use super::Scaled;
use crate::{
    deduce::{self, Deduction, Descriptor},
    error::{or_panic, ArithmeticError},
    repr::{fitting_digits, Representation},
    rounding::scale_up,
};

/// Fails unless `W` can declare `digits` digits.
#[inline]
fn ensure_capacity<W: Representation>(digits: u32) -> Result<(), ArithmeticError> {
    if digits > W::capacity() {
        Err(ArithmeticError::capacity(digits, W::capacity()))
    } else {
        Ok(())
    }
}

/// Fails if a signed result is requested in an unsigned representation.
#[inline]
fn ensure_sign<W: Representation>(result: &Descriptor) -> Result<(), ArithmeticError> {
    if result.signed && !<W::Storage as Limb>::SIGNED {
        Err(ArithmeticError::NotRepresentable)
    } else {
        Ok(())
    }
}

/// Moves an operand into the result storage and scales it to the common
/// exponent. The operand is bounded by the already checked result digits.
#[inline]
fn lift<S: Limb, T: Limb>(value: S, radix: u32, shift: u32, required: u32) -> Result<T, ArithmeticError> {
    scale_up(T::cast_from(value), radix, shift).ok_or(ArithmeticError::capacity(required, T::DIGITS))
}

/// Packs a raw result with its deduced shape.
///
/// A limb declares all of its digits, yet its most negative value uses one
/// more, so the result is checked against what it actually uses.
#[inline]
fn assemble<W: Representation, const RADIX: u32>(
    value: W::Storage,
    result: &Descriptor,
) -> Result<Scaled<W, RADIX>, ArithmeticError> {
    let rep = W::try_from_storage(value, fitting_digits::<W>(value, result.digits))?;
    Ok(Scaled::from_rep(rep, result.exponent))
}

impl<R: Representation, const RADIX: u32> Scaled<R, RADIX> {
    /// Both operands in the storage of `W`, aligned as `deduction` says.
    fn aligned<W: Representation>(
        self,
        rhs: Self,
        deduction: &Deduction,
    ) -> Result<(W::Storage, W::Storage), ArithmeticError> {
        let required = deduction.result.digits;
        ensure_capacity::<W>(required)?;
        Ok((
            lift(self.rep.storage(), RADIX, deduction.lhs_shift, required)?,
            lift(rhs.rep.storage(), RADIX, deduction.rhs_shift, required)?,
        ))
    }

    fn offset_exponent(self, offset: i64) -> Result<Self, ArithmeticError> {
        let exponent = i32::try_from(self.exponent as i64 + offset)
            .map_err(|_| ArithmeticError::NotRepresentable)?;
        Ok(Self::from_rep(self.rep, exponent))
    }

    /// `self + rhs` with the raw addition routed through `policy`.
    ///
    /// The operands are aligned to the smaller exponent first.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::CapacityExceeded`] if the aligned sum needs more
    /// digits than `R::Widened` holds.
    pub fn add_with<P: OverflowPolicy>(
        self,
        rhs: Self,
        policy: &P,
    ) -> Result<Scaled<R::Widened, RADIX>, ArithmeticError> {
        let deduction = deduce::add(&self.descriptor(), &rhs.descriptor());
        let (lhs, rhs) = self.aligned::<R::Widened>(rhs, &deduction)?;
        assemble(OverflowPolicy::add(policy, lhs, rhs), &deduction.result)
    }

    /// `self - rhs` with the raw subtraction routed through `policy`. The
    /// difference is always signed.
    pub fn sub_with<P: OverflowPolicy>(
        self,
        rhs: Self,
        policy: &P,
    ) -> Result<Scaled<<R::Widened as Representation>::Signed, RADIX>, ArithmeticError> {
        let deduction = deduce::subtract(&self.descriptor(), &rhs.descriptor());
        let (lhs, rhs) = self.aligned::<<R::Widened as Representation>::Signed>(rhs, &deduction)?;
        assemble(OverflowPolicy::sub(policy, lhs, rhs), &deduction.result)
    }

    /// `self * rhs` with the raw multiplication routed through `policy`.
    /// Exponents add.
    pub fn mul_with<P: OverflowPolicy>(
        self,
        rhs: Self,
        policy: &P,
    ) -> Result<Scaled<R::Widened, RADIX>, ArithmeticError> {
        let deduction = deduce::multiply(&self.descriptor(), &rhs.descriptor());
        let (lhs, rhs) = self.aligned::<R::Widened>(rhs, &deduction)?;
        assemble(OverflowPolicy::mul(policy, lhs, rhs), &deduction.result)
    }

    /// `self + rhs` in `R::Widened`.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::CapacityExceeded`] if the aligned sum needs more
    /// digits than `R::Widened` holds.
    #[inline]
    pub fn checked_add(self, rhs: Self) -> Result<Scaled<R::Widened, RADIX>, ArithmeticError> {
        self.add_with(rhs, &NativeOverflow)
    }

    /// `self - rhs` in the signed counterpart of `R::Widened`.
    #[inline]
    pub fn checked_sub(
        self,
        rhs: Self,
    ) -> Result<Scaled<<R::Widened as Representation>::Signed, RADIX>, ArithmeticError> {
        self.sub_with(rhs, &NativeOverflow)
    }

    /// `self * rhs` in `R::Widened`; exponents add.
    #[inline]
    pub fn checked_mul(self, rhs: Self) -> Result<Scaled<R::Widened, RADIX>, ArithmeticError> {
        self.mul_with(rhs, &NativeOverflow)
    }

    /// The widened quotient in a representation of the caller's choice.
    ///
    /// The dividend is scaled up by as many radix digits as the divisor's
    /// digits hold completely, so the quotient keeps the dividend's integer digits plus the
    /// divisor's fractional digits, and the dividend's fractional digits plus
    /// the divisor's integer digits. The raw division truncates toward zero.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::DivisionByZero`] for a zero divisor,
    /// [`ArithmeticError::CapacityExceeded`] if `Q` holds too few digits and
    /// [`ArithmeticError::NotRepresentable`] if the quotient is signed but
    /// `Q` is not.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::scaled::Scaled;
    /// let one = Scaled::<i16>::from_rep(1, 0);
    /// let three = Scaled::<i16>::from_rep(3, 0);
    /// let third = one.quotient::<i32>(three).unwrap();
    /// assert_eq!((third.rep(), third.exponent()), (10_922, -15));
    /// assert!(one.quotient::<i16>(three).is_err());
    /// ```
    pub fn quotient<Q: Representation>(self, rhs: Self) -> Result<Scaled<Q, RADIX>, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let deduction = deduce::quotient(&self.descriptor(), &rhs.descriptor());
        ensure_sign::<Q>(&deduction.result)?;
        let (lhs, rhs) = self.aligned::<Q>(rhs, &deduction)?;
        assemble(lhs.div_rem(rhs).0, &deduction.result)
    }

    /// The widened quotient in `R::Widened`.
    #[inline]
    pub fn checked_div(self, rhs: Self) -> Result<Scaled<R::Widened, RADIX>, ArithmeticError> {
        self.quotient::<R::Widened>(rhs)
    }

    /// `self % rhs` at the common exponent, with the sign of the dividend.
    pub fn checked_rem(self, rhs: Self) -> Result<Scaled<R::Widened, RADIX>, ArithmeticError> {
        if rhs.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let deduction = deduce::remainder(&self.descriptor(), &rhs.descriptor());
        let (lhs, rhs) = self.aligned::<R::Widened>(rhs, &deduction)?;
        assemble(lhs.div_rem(rhs).1, &deduction.result)
    }

    /// `-self` in the signed counterpart of `R::Widened`, which also holds
    /// the negated most negative limb value.
    pub fn checked_neg(
        self,
    ) -> Result<Scaled<<R::Widened as Representation>::Signed, RADIX>, ArithmeticError> {
        let result = deduce::negate(&self.descriptor());
        ensure_capacity::<<R::Widened as Representation>::Signed>(result.digits)?;
        let value: <<R::Widened as Representation>::Signed as Representation>::Storage =
            lift(self.rep.storage(), RADIX, 0, result.digits)?;
        assemble(value.wrapping_neg(), &result)
    }

    /// The product in a representation of the caller's choice, without
    /// widening.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::CapacityExceeded`] if `T` holds fewer digits than
    /// the sum of the operands' digits.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::{error::ArithmeticError, scaled::Scaled};
    /// let x = Scaled::<i8>::from_rep(-100, -2);
    /// assert_eq!(x.multiply_into::<i16>(x).unwrap().rep(), 10_000);
    /// assert_eq!(
    ///     x.multiply_into::<i8>(x),
    ///     Err(ArithmeticError::capacity(14, 7))
    /// );
    /// ```
    pub fn multiply_into<T: Representation>(self, rhs: Self) -> Result<Scaled<T, RADIX>, ArithmeticError> {
        let deduction = deduce::multiply(&self.descriptor(), &rhs.descriptor());
        ensure_sign::<T>(&deduction.result)?;
        let (lhs, rhs) = self.aligned::<T>(rhs, &deduction)?;
        assemble(lhs.wrapping_mul(&rhs), &deduction.result)
    }

    /// `self * 2^amount`.
    ///
    /// With radix 2 only the exponent moves. Other radices shift the stored
    /// integer, which must keep fitting its representation.
    pub fn checked_shl(self, amount: u32) -> Result<Self, ArithmeticError> {
        if RADIX == 2 {
            return self.offset_exponent(amount as i64);
        }
        let result = deduce::shift_left(&self.descriptor(), amount);
        let value = scale_up(self.rep.storage(), 2, amount)
            .ok_or(ArithmeticError::capacity(result.digits, R::capacity()))?;
        let rep = R::try_from_storage(value, fitting_digits::<R>(value, result.digits))?;
        Ok(Self::from_rep(rep, self.exponent))
    }

    /// `self * 2^-amount`.
    ///
    /// With radix 2 only the exponent moves. Other radices floor the stored
    /// integer.
    pub fn checked_shr(self, amount: u32) -> Result<Self, ArithmeticError> {
        if RADIX == 2 {
            return self.offset_exponent(-(amount as i64));
        }
        let result = deduce::shift_right(&self.descriptor(), amount);
        let value = self.rep.storage().shr_total(amount);
        Ok(Self::from_rep(R::from_storage(value, result.digits), self.exponent))
    }
}

impl<R: Representation, const RADIX: u32> Add for Scaled<R, RADIX> {
    type Output = Scaled<R::Widened, RADIX>;

    fn add(self, rhs: Self) -> Self::Output {
        or_panic(self.checked_add(rhs))
    }
}

impl<R: Representation, const RADIX: u32> Sub for Scaled<R, RADIX> {
    type Output = Scaled<<R::Widened as Representation>::Signed, RADIX>;

    fn sub(self, rhs: Self) -> Self::Output {
        or_panic(self.checked_sub(rhs))
    }
}

impl<R: Representation, const RADIX: u32> Mul for Scaled<R, RADIX> {
    type Output = Scaled<R::Widened, RADIX>;

    fn mul(self, rhs: Self) -> Self::Output {
        or_panic(self.checked_mul(rhs))
    }
}

impl<R: Representation, const RADIX: u32> Div for Scaled<R, RADIX> {
    type Output = Scaled<R::Widened, RADIX>;

    fn div(self, rhs: Self) -> Self::Output {
        or_panic(self.checked_div(rhs))
    }
}

impl<R: Representation, const RADIX: u32> Rem for Scaled<R, RADIX> {
    type Output = Scaled<R::Widened, RADIX>;

    fn rem(self, rhs: Self) -> Self::Output {
        or_panic(self.checked_rem(rhs))
    }
}

impl<R: Representation, const RADIX: u32> Neg for Scaled<R, RADIX> {
    type Output = Scaled<<R::Widened as Representation>::Signed, RADIX>;

    fn neg(self) -> Self::Output {
        or_panic(self.checked_neg())
    }
}

impl<R: Representation, const RADIX: u32> Shl<u32> for Scaled<R, RADIX> {
    type Output = Self;

    fn shl(self, amount: u32) -> Self {
        or_panic(self.checked_shl(amount))
    }
}

impl<R: Representation, const RADIX: u32> Shr<u32> for Scaled<R, RADIX> {
    type Output = Self;

    fn shr(self, amount: u32) -> Self {
        or_panic(self.checked_shr(amount))
    }
}

impl<R: Representation, const RADIX: u32> ShlAssign<u32> for Scaled<R, RADIX> {
    fn shl_assign(&mut self, amount: u32) {
        *self = *self << amount;
    }
}

impl<R: Representation, const RADIX: u32> ShrAssign<u32> for Scaled<R, RADIX> {
    fn shr_assign(&mut self, amount: u32) {
        *self = *self >> amount;
    }
}
