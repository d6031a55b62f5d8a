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

//! # Elastic Scaled Values
//!
//! A scaled value over an elastic integer. The exponent tracks where the
//! radix point sits and the elastic digit count tracks how many bits the
//! value needs, so both grow through a chain of operations and every result
//! stays exact until the storage runs out, which is reported instead of
//! wrapped.
//!
//! ```rust
//! # use limbic_scaled::elastic_scaled::ElasticScaled;
//! let a = ElasticScaled::<i32>::elastic_from_f64(123.125, 15, -7).unwrap();
//! let sum = a + a;
//! assert_eq!(sum.exponent(), -7);
//! assert_eq!(sum.digits(), 16);
//! assert_eq!(sum.to_f64(), 246.25);
//! ```

use limbic_core::num::limb::Limb;

use crate::{elastic::Elastic, error::ArithmeticError, rounding::power, scaled::Scaled};

/// A scaled value whose representation is an elastic integer over `S`.
pub type ElasticScaled<S, const RADIX: u32 = 2> = Scaled<Elastic<S>, RADIX>;

impl<S: Limb, const RADIX: u32> Scaled<Elastic<S>, RADIX> {
    /// `value * RADIX^exponent` declaring `digits` digits.
    pub fn elastic(value: S, digits: u32, exponent: i32) -> Result<Self, ArithmeticError> {
        Ok(Self::from_rep(Elastic::new(value, digits)?, exponent))
    }

    /// A float rounded to nearest at `exponent`, declaring `digits` digits.
    pub fn elastic_from_f64(value: f64, digits: u32, exponent: i32) -> Result<Self, ArithmeticError> {
        let rounded = Self::from_f64(value, exponent)?;
        Self::elastic(rounded.rep().value(), digits, exponent)
    }

    /// An integer with its trailing zero radix digits moved into the
    /// exponent, declaring only the digits the rest needs.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::elastic_scaled::ElasticScaled;
    /// let x = ElasticScaled::<i32, 10>::from_literal(-4500).unwrap();
    /// assert_eq!((x.rep().value(), x.exponent(), x.digits()), (-45, 2, 6));
    /// ```
    pub fn from_literal(value: S) -> Result<Self, ArithmeticError> {
        let mut value = value;
        let mut exponent = 0;
        if let Some(radix) = power::<S>(RADIX, 1) {
            while !value.is_zero() {
                let (quotient, remainder) = value.div_rem(radix);
                if !remainder.is_zero() {
                    break;
                }
                value = quotient;
                exponent += 1;
            }
        }
        Ok(Self::from_rep(Elastic::from_literal(value)?, exponent))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::Native;

    #[test]
    fn test_sum_of_two_elastic_values() {
        let a = ElasticScaled::<i32>::elastic_from_f64(123.125, 15, -7).unwrap();
        assert_eq!(a.rep().value(), 15_760);
        assert_eq!(a.integer_digits(), 8);

        let sum: ElasticScaled<i32> = a + a;
        assert_eq!(sum.rep().value(), 31_520);
        assert_eq!(sum.exponent(), -7);
        assert_eq!(sum.digits(), 16);
        assert_eq!(sum.integer_digits(), 9);
        assert_eq!(sum.to_f64(), 246.25);
    }

    #[test]
    fn test_sum_of_two_limb_values() {
        let a = Scaled::<i16>::from_f64(123.125, -7).unwrap();
        let sum: Scaled<i32> = a + a;
        assert_eq!(sum.rep(), 31_520);
        assert_eq!(sum.exponent(), -7);
        assert_eq!(sum.to_f64(), 246.25);

        // Eight bits cannot hold 123.125 with seven fractional digits.
        assert!(Scaled::<i8>::from_f64(123.125, -7).is_err());
    }

    #[test]
    fn test_chain_until_storage_runs_out() {
        let a = ElasticScaled::<i32>::elastic_from_f64(123.125, 15, -7).unwrap();
        let square = a * a;
        assert_eq!(square.digits(), 30);
        assert_eq!(square.exponent(), -14);

        let a_fine = a.rescale(-14, &Native).unwrap();
        assert_eq!(a_fine.digits(), 22);
        let total = square + a_fine;
        assert_eq!(total.digits(), 31);
        assert_eq!(total.to_f64(), 123.125 * 123.125 + 123.125);

        assert_eq!(total.checked_mul(a_fine), Err(ArithmeticError::capacity(53, 31)));
        let wide = total.convert::<Elastic<i64>, _>(-14, &Native).unwrap();
        let a_wide = a.convert::<Elastic<i64>, _>(-7, &Native).unwrap();
        let product = wide * a_wide;
        assert_eq!(product.digits(), 46);
        assert_eq!(product.exponent(), -21);
        assert_eq!(product.to_f64(), (123.125 * 123.125 + 123.125) * 123.125);
    }

    #[test]
    fn test_elastic_quotient() {
        let a = ElasticScaled::<i32>::elastic(15_760, 15, -7).unwrap();
        let q = a / a;
        assert_eq!(q.digits(), 30);
        assert_eq!(q.exponent(), -15);
        assert_eq!(q.to_f64(), 1.0);
    }

    #[test]
    fn test_ordering_follows_values() {
        let a = ElasticScaled::<i32>::elastic(3, 2, 0).unwrap();
        let b = ElasticScaled::<i32>::elastic(5, 3, -1).unwrap();
        assert!(b < a);
        assert!(a < a + b);
    }

    #[test]
    fn test_from_literal() {
        let x = ElasticScaled::<i32>::from_literal(1024).unwrap();
        assert_eq!((x.rep().value(), x.exponent(), x.digits()), (1, 10, 1));
        let zero = ElasticScaled::<u8>::from_literal(0).unwrap();
        assert_eq!((zero.rep().value(), zero.exponent(), zero.digits()), (0, 0, 0));
        let odd = ElasticScaled::<i64>::from_literal(-7).unwrap();
        assert_eq!((odd.rep().value(), odd.exponent(), odd.digits()), (-7, 0, 3));
    }

    #[test]
    fn test_elastic_validates() {
        assert_eq!(
            ElasticScaled::<i32>::elastic(300, 8, 0),
            Err(ArithmeticError::NotRepresentable)
        );
        assert_eq!(
            ElasticScaled::<i16>::elastic(1, 16, 0),
            Err(ArithmeticError::InvalidDigits {
                digits: 16,
                capacity: 15
            })
        );
    }
}
