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

use limbic_core::num::{limb::Limb, ops::overflow::div_overflows};

use super::Scaled;
use crate::{
    deduce::bits_for_radix_digits,
    error::ArithmeticError,
    fraction::Fraction,
    repr::{fitting_digits, Representation},
    rounding::{scale_up, Nearest, Rounding},
};

/// Moves `value` into another limb, failing if the value changes.
fn narrow<S: Limb, T: Limb>(value: S) -> Result<T, ArithmeticError> {
    let cast = T::cast_from(value);
    if S::cast_from(cast) == value && cast.is_negative() == value.is_negative() {
        Ok(cast)
    } else {
        Err(ArithmeticError::NotRepresentable)
    }
}

impl<R: Representation, const RADIX: u32> Scaled<R, RADIX> {
    /// Re-expresses `storage * RADIX^from` at exponent `to`.
    ///
    /// Moving to a finer exponent is exact. Moving to a coarser one discards
    /// digits through `rounding`.
    fn rescaled<S: Limb, P: Rounding>(
        storage: S,
        digits: u32,
        from: i32,
        to: i32,
        rounding: &P,
    ) -> Result<Self, ArithmeticError> {
        let (value, estimate) = if to <= from {
            let shift = (from as i64 - to as i64) as u32;
            let value = narrow::<S, R::Storage>(storage)?;
            let value = scale_up(value, RADIX, shift).ok_or(ArithmeticError::NotRepresentable)?;
            (value, digits.saturating_add(bits_for_radix_digits(shift, RADIX)))
        } else {
            let shift = (to as i64 - from as i64) as u32;
            (narrow(rounding.coarsen(storage, RADIX, shift))?, 0)
        };
        let rep = R::try_from_storage(value, fitting_digits::<R>(value, estimate))?;
        Ok(Self::from_rep(rep, to))
    }

    /// Converts an integer to a scaled value at `exponent`, rounding to
    /// nearest if the exponent is positive.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::scaled::Scaled;
    /// let x = Scaled::<i32>::from_integer(5u8, -4).unwrap();
    /// assert_eq!(x.rep(), 80);
    /// let y = Scaled::<i32>::from_integer(-7i64, 1).unwrap();
    /// assert_eq!(y.rep(), -4);
    /// ```
    pub fn from_integer<T: Limb>(value: T, exponent: i32) -> Result<Self, ArithmeticError> {
        Self::rescaled(value, value.used_digits(), 0, exponent, &Nearest)
    }

    /// Converts to another representation at `exponent`.
    ///
    /// Finer exponents never round. Coarser exponents round with `rounding`.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::NotRepresentable`] if the converted value leaves
    /// the target representation.
    pub fn convert<T: Representation, P: Rounding>(
        self,
        exponent: i32,
        rounding: &P,
    ) -> Result<Scaled<T, RADIX>, ArithmeticError> {
        Scaled::<T, RADIX>::rescaled(
            self.rep.storage(),
            self.rep.digits(),
            self.exponent,
            exponent,
            rounding,
        )
    }

    /// Moves to another exponent, keeping the representation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::{rounding::{Native, Nearest}, scaled::Scaled};
    /// let x = Scaled::<i32, 10>::from_rep(-15, 0);
    /// assert_eq!(x.rescale(1, &Native).unwrap().rep(), -1);
    /// assert_eq!(x.rescale(1, &Nearest).unwrap().rep(), -2);
    /// ```
    pub fn rescale<P: Rounding>(self, exponent: i32, rounding: &P) -> Result<Self, ArithmeticError> {
        self.convert::<R, P>(exponent, rounding)
    }

    /// Converts a float, rounding to nearest.
    #[inline]
    pub fn from_f64(value: f64, exponent: i32) -> Result<Self, ArithmeticError> {
        Self::from_f64_with(value, exponent, &Nearest)
    }

    /// Converts a float with an explicit rounding policy.
    ///
    /// # Errors
    ///
    /// [`ArithmeticError::NotRepresentable`] for non-finite input and for
    /// values outside the representation at `exponent`.
    pub fn from_f64_with<P: Rounding>(
        value: f64,
        exponent: i32,
        rounding: &P,
    ) -> Result<Self, ArithmeticError> {
        let base = RADIX as f64;
        let scaled = if exponent > 0 {
            value / base.powi(exponent)
        } else {
            value * base.powi(exponent.saturating_neg())
        };
        let rounded = rounding.round_f64(scaled);
        if !rounded.is_finite() {
            return Err(ArithmeticError::NotRepresentable);
        }
        let limit = 2f64.powi(<R::Storage as Limb>::DIGITS as i32);
        let lower = if <R::Storage as Limb>::SIGNED { -limit } else { 0.0 };
        if rounded >= limit || rounded < lower {
            return Err(ArithmeticError::NotRepresentable);
        }
        let storage = <R::Storage as Limb>::from_f64(rounded);
        let rep = R::try_from_storage(storage, fitting_digits::<R>(storage, 0))?;
        Ok(Self::from_rep(rep, exponent))
    }

    /// The nearest float.
    #[inline]
    pub fn to_f64(self) -> f64 {
        self.rep.storage().to_f64() * (RADIX as f64).powi(self.exponent)
    }

    /// Truncated `numerator / denominator` at `exponent`, computed in the
    /// work limb `W`, which holds both terms.
    fn ratio<T: Limb, W: Limb>(fraction: Fraction<T>, exponent: i32) -> Result<Self, ArithmeticError> {
        let mut numerator = W::cast_from(fraction.numerator);
        let mut denominator = W::cast_from(fraction.denominator);
        let shift = exponent.unsigned_abs();
        if exponent < 0 {
            numerator = scale_up(numerator, RADIX, shift).ok_or(ArithmeticError::NotRepresentable)?;
        } else if exponent > 0 {
            match scale_up(denominator, RADIX, shift) {
                Some(scaled) => denominator = scaled,
                // The divisor exceeds every numerator; the quotient is zero.
                None => numerator = W::zero(),
            }
        }
        if div_overflows(numerator, denominator) {
            return Err(ArithmeticError::NotRepresentable);
        }
        let value = narrow::<W, R::Storage>(numerator.div_rem(denominator).0)?;
        let rep = R::try_from_storage(value, fitting_digits::<R>(value, 0))?;
        Ok(Self::from_rep(rep, exponent))
    }

    /// The quotient `numerator / denominator` at `exponent`, truncated
    /// toward zero.
    ///
    /// The division runs at double the width of the fraction or of the
    /// storage, whichever is wider, so any ratio the storage can hold at
    /// `exponent` is found.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::{fraction::Fraction, scaled::Scaled};
    /// let third = Scaled::<i32>::from_fraction(Fraction::new(1, 3), -8).unwrap();
    /// assert_eq!(third.rep(), 85);
    /// ```
    pub fn from_fraction<T: Limb>(
        fraction: Fraction<T>,
        exponent: i32,
    ) -> Result<Self, ArithmeticError> {
        if fraction.denominator.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let storage_work = <<<R::Storage as Limb>::Wide as Limb>::Signed as Limb>::BITS;
        let fraction_work = <<T::Wide as Limb>::Signed as Limb>::BITS;
        if storage_work >= fraction_work {
            Self::ratio::<T, <<R::Storage as Limb>::Wide as Limb>::Signed>(fraction, exponent)
        } else {
            Self::ratio::<T, <T::Wide as Limb>::Signed>(fraction, exponent)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{elastic::Elastic, rounding::Native};
    use limbic_core::duplex::I256;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_narrow() {
        assert_eq!(narrow::<i32, i8>(-100), Ok(-100i8));
        assert_eq!(narrow::<i32, i8>(300), Err(ArithmeticError::NotRepresentable));
        assert_eq!(narrow::<u8, i8>(200), Err(ArithmeticError::NotRepresentable));
        assert_eq!(narrow::<i8, u16>(-1), Err(ArithmeticError::NotRepresentable));
        assert_eq!(narrow::<u64, I256>(u64::MAX), Ok(I256::from_integer(u64::MAX)));
    }

    #[test]
    fn test_convert_finer_is_exact() {
        let x = Scaled::<i16>::from_rep(-300, 0);
        let finer = x.convert::<i32, _>(-8, &Native).unwrap();
        assert_eq!(finer.rep(), -300 * 256);
        assert_eq!(finer.exponent(), -8);
        assert_eq!(finer, Scaled::<i32>::from_rep(-300, 0));
    }

    #[test]
    fn test_convert_rejects_values_outside_the_target() {
        assert_eq!(
            Scaled::<i32>::from_rep(300, 0).convert::<i8, _>(0, &Native),
            Err(ArithmeticError::NotRepresentable)
        );
        assert_eq!(
            Scaled::<i32>::from_rep(-1, 0).convert::<u32, _>(0, &Native),
            Err(ArithmeticError::NotRepresentable)
        );
        assert_eq!(
            Scaled::<i32>::from_rep(100, 0).convert::<i8, _>(-1, &Native),
            Err(ArithmeticError::NotRepresentable)
        );
    }

    #[test]
    fn test_coarsening_uses_the_policy() {
        let x = Scaled::<i32>::from_rep(7, 0);
        assert_eq!(x.rescale(1, &Native).unwrap().rep(), 3);
        assert_eq!(x.rescale(1, &Nearest).unwrap().rep(), 4);
        let y = Scaled::<i32>::from_rep(-7, 0);
        assert_eq!(y.rescale(1, &Native).unwrap().rep(), -4);
        assert_eq!(y.rescale(1, &Nearest).unwrap().rep(), -4);
        let z = Scaled::<i32>::from_rep(-5, 0);
        assert_eq!(z.rescale(2, &Native).unwrap().rep(), -2);
        assert_eq!(z.rescale(2, &Nearest).unwrap().rep(), -1);
    }

    #[test]
    fn test_native_round_trip() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..1_000 {
            let rep: i16 = rng.random();
            let exponent = rng.random_range(-20..20);
            let shift = rng.random_range(0..=16);
            let x = Scaled::<i16>::from_rep(rep, exponent);
            let wide = x.convert::<i32, _>(exponent - shift, &Native).unwrap();
            let back = wide.convert::<i16, _>(exponent, &Native).unwrap();
            assert_eq!(back.rep(), rep);
            assert_eq!(back.exponent(), exponent);
        }
    }

    #[test]
    fn test_convert_elastic_tracks_digits() {
        let x = Scaled::<Elastic<i32>>::from_rep(Elastic::new(5, 3).unwrap(), 0);
        let y = x.convert::<Elastic<i64>, _>(-10, &Native).unwrap();
        assert_eq!(y.rep().value(), 5 << 10);
        assert_eq!(y.digits(), 13);

        let z = y.convert::<Elastic<i8>, _>(-2, &Native).unwrap();
        assert_eq!(z.rep().value(), 20);
        assert_eq!(z.digits(), 5);
    }

    #[test]
    fn test_from_f64() {
        assert_eq!(Scaled::<i16>::from_f64(1.3, -4).unwrap().rep(), 21);
        assert_eq!(Scaled::<i16>::from_f64_with(1.3, -4, &Native).unwrap().rep(), 20);
        assert_eq!(Scaled::<i16>::from_f64(-1.3, -4).unwrap().rep(), -21);
        assert_eq!(Scaled::<i16>::from_f64_with(-1.3, -4, &Native).unwrap().rep(), -20);
        assert_eq!(Scaled::<i32, 10>::from_f64(123.45, -2).unwrap().rep(), 12_345);
        assert_eq!(Scaled::<i32, 10>::from_f64(12_345.0, 2).unwrap().rep(), 123);
        assert_eq!(Scaled::<i8>::from_f64(-128.0, 0).unwrap().rep(), i8::MIN);
        assert_eq!(Scaled::<u8>::from_f64(-0.25, 0).unwrap().rep(), 0);

        let elastic = Scaled::<Elastic<i32>>::from_f64(6.5, -1).unwrap();
        assert_eq!(elastic.rep().value(), 13);
        assert_eq!(elastic.digits(), 4);
    }

    #[test]
    fn test_from_f64_rejects_out_of_range() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_eq!(
                Scaled::<i32>::from_f64(value, 0),
                Err(ArithmeticError::NotRepresentable)
            );
        }
        assert!(Scaled::<i8>::from_f64(128.0, 0).is_err());
        assert!(Scaled::<i8>::from_f64(1.0, -7).is_err());
        assert!(Scaled::<u8>::from_f64(-1.0, 0).is_err());
        assert_eq!(
            Scaled::<Elastic<i8>>::from_f64(-128.0, 0),
            Err(ArithmeticError::NotRepresentable)
        );
    }

    #[test]
    fn test_to_f64() {
        assert_eq!(Scaled::<i32>::from_rep(-3, -2).to_f64(), -0.75);
        assert_eq!(Scaled::<u8, 10>::from_rep(7, 3).to_f64(), 7000.0);
        let big = Scaled::<I256>::from_rep(I256::from_integer(1u8) << 200, -200);
        assert_eq!(big.to_f64(), 1.0);
    }

    #[test]
    fn test_from_fraction() {
        let x = Scaled::<i32>::from_fraction(Fraction::new(-7i32, 2), 0).unwrap();
        assert_eq!(x.rep(), -3);
        let y = Scaled::<i64, 10>::from_fraction(Fraction::new(2i32, 3), -4).unwrap();
        assert_eq!(y.rep(), 6_666);
        let z = Scaled::<i8>::from_fraction(Fraction::new(100i8, 1), 20).unwrap();
        assert!(z.is_zero());
        assert_eq!(
            Scaled::<i32>::from_fraction(Fraction::new(1i32, 0), 0),
            Err(ArithmeticError::DivisionByZero)
        );
        assert_eq!(
            Scaled::<i8>::from_fraction(Fraction::new(1i32, 1), -8),
            Err(ArithmeticError::NotRepresentable)
        );
    }

    #[test]
    fn test_from_fraction_uses_the_wider_side() {
        // A narrow fraction into wide storage keeps the storage's precision.
        let third = Scaled::<I256>::from_fraction(Fraction::new(1i32, 3), -100).unwrap();
        assert_eq!(third.rep(), I256::from_integer((1i128 << 100) / 3));
        assert_eq!(third.exponent(), -100);

        // A wide fraction into narrow storage divides at the fraction's width.
        let half = Scaled::<i8>::from_fraction(Fraction::new(u128::MAX / 2, u128::MAX), -6).unwrap();
        assert_eq!(half.rep(), 31);

        let negative = Scaled::<i16>::from_fraction(Fraction::new(-1i8, 3), -12).unwrap();
        assert_eq!(negative.rep(), -1_365);
    }
}
