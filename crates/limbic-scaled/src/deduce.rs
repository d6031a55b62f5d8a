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

//! # Result-Type Deduction
//!
//! Given descriptors of two operands, compute the descriptor of the exact
//! result of an operator, and how far each operand must be re-scaled before
//! the raw integer operation runs.
//!
//! A descriptor carries a digit count (binary digits of magnitude, excluding
//! the sign), an exponent in powers of the radix, the radix itself and the
//! signedness. The represented values are `m * radix^exponent` with
//! `|m| < 2^digits`.
//!
//! | Operator | Exponent | Digits |
//! |---|---|---|
//! | add | `min(e1, e2)` | `max(d1', d2') + 1` |
//! | subtract | `min(e1, e2)` | `max(d1', d2') + 1` if any operand is signed, else `max(d1', d2')`; always signed |
//! | multiply | `e1 + e2` | `d1 + d2` |
//! | quotient | `e1 - e2 - r2` | `d1 + bits(r2)` |
//! | divide | `e1 - e2` | `d1` |
//! | remainder | `min(e1, e2)` | `max(d1', d2')` |
//!
//! Here `d'` is an operand's digit count after re-scaling it to the common
//! exponent, `r2` is the number of whole radix digits the divisor's binary
//! digits hold and
//! `bits(n)` is the number of binary digits a factor of `radix^n` adds.
//!
//! The quotient rule is the widened division: the dividend is scaled up by
//! `radix^r2` first, so the result has as many integer digits as the dividend
//! has integer digits plus the divisor has fractional digits, and as many
//! fractional digits as the dividend has fractional digits plus the divisor
//! has integer digits.

use std::fmt::Display;

/// Static shape of a scaled or elastic value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Descriptor {
    /// Binary digits of magnitude, excluding the sign bit.
    pub digits: u32,
    /// Power of the radix applied to the stored integer.
    pub exponent: i32,
    /// Base of the exponent.
    pub radix: u32,
    /// Whether negative values are allowed.
    pub signed: bool,
}

impl Descriptor {
    /// Creates a descriptor.
    #[inline]
    pub const fn new(digits: u32, exponent: i32, radix: u32, signed: bool) -> Self {
        Self {
            digits,
            exponent,
            radix,
            signed,
        }
    }

    /// Radix digits before the radix point. May be negative for values that
    /// are entirely fractional.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # use limbic_scaled::deduce::Descriptor;
    /// let sum = Descriptor::new(16, -7, 2, true);
    /// assert_eq!(sum.integer_digits(), 9);
    /// assert_eq!(sum.fractional_digits(), 7);
    /// ```
    #[inline]
    pub fn integer_digits(&self) -> i32 {
        radix_digits(self.digits, self.radix) as i32 + self.exponent
    }

    /// Radix digits after the radix point. Negative when the exponent is
    /// positive.
    #[inline]
    pub fn fractional_digits(&self) -> i32 {
        -self.exponent
    }

    /// Digits plus the sign bit.
    #[inline]
    pub fn width(&self) -> u32 {
        self.digits + self.signed as u32
    }
}

impl Display for Descriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "digits={}, exponent={}, radix={}, signed={}",
            self.digits, self.exponent, self.radix, self.signed
        )
    }
}

/// Outcome of deducing a binary operator: the result shape and how many radix
/// digits each operand is shifted up by before the raw operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Deduction {
    /// Shape of the exact result.
    pub result: Descriptor,
    /// Radix digits the left operand is scaled up by.
    pub lhs_shift: u32,
    /// Radix digits the right operand is scaled up by.
    pub rhs_shift: u32,
}

impl Deduction {
    #[inline]
    fn unshifted(result: Descriptor) -> Self {
        Self {
            result,
            lhs_shift: 0,
            rhs_shift: 0,
        }
    }
}

/// Binary digits added by multiplying with `radix^count`.
///
/// Exact for power-of-two radices; otherwise `ceil(count * log2(radix))`.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::deduce::bits_for_radix_digits;
/// assert_eq!(bits_for_radix_digits(7, 2), 7);
/// assert_eq!(bits_for_radix_digits(3, 16), 12);
/// assert_eq!(bits_for_radix_digits(3, 10), 10);
/// ```
pub fn bits_for_radix_digits(count: u32, radix: u32) -> u32 {
    if count == 0 {
        return 0;
    }
    if radix.is_power_of_two() {
        return count.saturating_mul(radix.trailing_zeros());
    }
    (count as f64 * (radix as f64).log2()).ceil() as u32
}

/// Radix digits needed to hold any magnitude of `bits` binary digits.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::deduce::radix_digits;
/// assert_eq!(radix_digits(15, 2), 15);
/// assert_eq!(radix_digits(10, 10), 4);
/// assert_eq!(radix_digits(9, 16), 3);
/// ```
pub fn radix_digits(bits: u32, radix: u32) -> u32 {
    if bits == 0 {
        return 0;
    }
    if radix.is_power_of_two() {
        return bits.div_ceil(radix.trailing_zeros());
    }
    (bits as f64 / (radix as f64).log2()).ceil() as u32
}

/// Radix digits that `bits` binary digits hold completely, so that every
/// number with that many radix digits fits.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::deduce::whole_radix_digits;
/// assert_eq!(whole_radix_digits(15, 2), 15);
/// assert_eq!(whole_radix_digits(31, 10), 9);
/// assert_eq!(whole_radix_digits(9, 16), 2);
/// ```
pub fn whole_radix_digits(bits: u32, radix: u32) -> u32 {
    if radix.is_power_of_two() {
        return bits / radix.trailing_zeros();
    }
    (bits as f64 / (radix as f64).log2()).floor() as u32
}

/// Common (smaller) exponent and the shift each operand needs to reach it.
fn align(lhs: &Descriptor, rhs: &Descriptor) -> (i32, u32, u32) {
    debug_assert_eq!(lhs.radix, rhs.radix, "operands must share a radix");
    let exponent = lhs.exponent.min(rhs.exponent);
    let lhs_shift = (lhs.exponent as i64 - exponent as i64) as u32;
    let rhs_shift = (rhs.exponent as i64 - exponent as i64) as u32;
    (exponent, lhs_shift, rhs_shift)
}

/// Digits of both operands after aligning them to the common exponent.
fn aligned_digits(lhs: &Descriptor, rhs: &Descriptor, lhs_shift: u32, rhs_shift: u32) -> (u32, u32) {
    (
        lhs.digits + bits_for_radix_digits(lhs_shift, lhs.radix),
        rhs.digits + bits_for_radix_digits(rhs_shift, rhs.radix),
    )
}

/// Result of `lhs + rhs`.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::deduce::{add, Descriptor};
/// let a = Descriptor::new(8, 0, 2, true);
/// let b = Descriptor::new(8, -4, 2, true);
/// let sum = add(&a, &b);
/// assert_eq!(sum.result, Descriptor::new(13, -4, 2, true));
/// assert_eq!((sum.lhs_shift, sum.rhs_shift), (4, 0));
/// ```
pub fn add(lhs: &Descriptor, rhs: &Descriptor) -> Deduction {
    let (exponent, lhs_shift, rhs_shift) = align(lhs, rhs);
    let (lhs_digits, rhs_digits) = aligned_digits(lhs, rhs, lhs_shift, rhs_shift);
    Deduction {
        result: Descriptor::new(
            lhs_digits.max(rhs_digits) + 1,
            exponent,
            lhs.radix,
            lhs.signed || rhs.signed,
        ),
        lhs_shift,
        rhs_shift,
    }
}

/// Result of `lhs - rhs`. The result is always signed; the difference of two
/// unsigned values needs no extra digit, only a sign.
pub fn subtract(lhs: &Descriptor, rhs: &Descriptor) -> Deduction {
    let (exponent, lhs_shift, rhs_shift) = align(lhs, rhs);
    let (lhs_digits, rhs_digits) = aligned_digits(lhs, rhs, lhs_shift, rhs_shift);
    let borrow = (lhs.signed || rhs.signed) as u32;
    Deduction {
        result: Descriptor::new(lhs_digits.max(rhs_digits) + borrow, exponent, lhs.radix, true),
        lhs_shift,
        rhs_shift,
    }
}

/// Result of `lhs * rhs`. Exponents add, digits add.
pub fn multiply(lhs: &Descriptor, rhs: &Descriptor) -> Deduction {
    debug_assert_eq!(lhs.radix, rhs.radix, "operands must share a radix");
    Deduction::unshifted(Descriptor::new(
        lhs.digits + rhs.digits,
        lhs.exponent + rhs.exponent,
        lhs.radix,
        lhs.signed || rhs.signed,
    ))
}

/// Result of the widened division `lhs / rhs`.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::deduce::{quotient, Descriptor};
/// let a = Descriptor::new(15, -7, 2, true);
/// let q = quotient(&a, &a);
/// assert_eq!(q.result, Descriptor::new(30, -15, 2, true));
/// assert_eq!(q.lhs_shift, 15);
/// // Integer digits: 8 (dividend) + 7 (divisor fraction).
/// assert_eq!(q.result.integer_digits(), 15);
/// ```
pub fn quotient(lhs: &Descriptor, rhs: &Descriptor) -> Deduction {
    debug_assert_eq!(lhs.radix, rhs.radix, "operands must share a radix");
    // Scaling by whole radix digits costs at most `rhs.digits` bits, so the
    // quotient of two limbs always fits their double-width limb.
    let divisor_digits = whole_radix_digits(rhs.digits, rhs.radix);
    let exponent = lhs.exponent - rhs.exponent - divisor_digits as i32;
    // The raw quotient of the scaled-up dividend never has more digits than
    // the scaled-up dividend itself.
    let digits = lhs.digits + bits_for_radix_digits(divisor_digits, lhs.radix);
    Deduction {
        result: Descriptor::new(digits, exponent, lhs.radix, lhs.signed || rhs.signed),
        lhs_shift: divisor_digits,
        rhs_shift: 0,
    }
}

/// Result of the natural integer division `lhs / rhs`, which keeps the
/// dividend's digits.
pub fn divide(lhs: &Descriptor, rhs: &Descriptor) -> Deduction {
    debug_assert_eq!(lhs.radix, rhs.radix, "operands must share a radix");
    Deduction::unshifted(Descriptor::new(
        lhs.digits,
        lhs.exponent - rhs.exponent,
        lhs.radix,
        lhs.signed || rhs.signed,
    ))
}

/// Result of `lhs % rhs` at the common exponent. The sign follows the
/// dividend.
pub fn remainder(lhs: &Descriptor, rhs: &Descriptor) -> Deduction {
    let (exponent, lhs_shift, rhs_shift) = align(lhs, rhs);
    let (lhs_digits, rhs_digits) = aligned_digits(lhs, rhs, lhs_shift, rhs_shift);
    Deduction {
        result: Descriptor::new(lhs_digits.max(rhs_digits), exponent, lhs.radix, lhs.signed),
        lhs_shift,
        rhs_shift,
    }
}

/// Result of `-operand`: same digits, signed.
#[inline]
pub fn negate(operand: &Descriptor) -> Descriptor {
    Descriptor {
        signed: true,
        ..*operand
    }
}

/// Digits left after a flooring right shift by `amount` bits.
///
/// Flooring a negative magnitude rounds it away from zero, so signed values
/// keep one extra digit.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::deduce::shrink_digits;
/// assert_eq!(shrink_digits(8, 3, false), 5);
/// assert_eq!(shrink_digits(8, 3, true), 6);
/// assert_eq!(shrink_digits(8, 20, false), 0);
/// assert_eq!(shrink_digits(8, 20, true), 1);
/// ```
pub fn shrink_digits(digits: u32, amount: u32, signed: bool) -> u32 {
    if amount == 0 || digits == 0 {
        digits
    } else if signed {
        (digits.saturating_sub(amount) + 1).min(digits)
    } else {
        digits.saturating_sub(amount)
    }
}

/// Result of `operand << amount`.
///
/// For radix 2 the shift is absorbed by the exponent and no value bits
/// change. Other radices shift the stored integer, growing its digits.
pub fn shift_left(operand: &Descriptor, amount: u32) -> Descriptor {
    if operand.radix == 2 {
        Descriptor {
            exponent: operand.exponent + amount as i32,
            ..*operand
        }
    } else {
        Descriptor {
            digits: operand.digits + amount,
            ..*operand
        }
    }
}

/// Result of `operand >> amount`; the counterpart of [`shift_left`].
pub fn shift_right(operand: &Descriptor, amount: u32) -> Descriptor {
    if operand.radix == 2 {
        Descriptor {
            exponent: operand.exponent - amount as i32,
            ..*operand
        }
    } else {
        Descriptor {
            digits: shrink_digits(operand.digits, amount, operand.signed),
            ..*operand
        }
    }
}

/// Result of `!operand` on an integer.
///
/// Complementing a signed value maps `x` to `-x - 1`, so the magnitude can
/// reach `2^digits`. An unsigned complement stays inside its digits.
///
/// # Examples
///
/// ```rust
/// # use limbic_scaled::deduce::{bit_not, Descriptor};
/// assert_eq!(bit_not(&Descriptor::new(3, 0, 2, true)).digits, 4);
/// assert_eq!(bit_not(&Descriptor::new(3, 0, 2, false)).digits, 3);
/// ```
pub fn bit_not(operand: &Descriptor) -> Descriptor {
    Descriptor {
        digits: operand.digits + operand.signed as u32,
        ..*operand
    }
}

/// Result of `lhs & rhs` on integers.
///
/// Two non-negative operands cannot produce more digits than the narrower
/// one; a signed pair can reach `-2^max`, which needs one more.
pub fn bit_and(lhs: &Descriptor, rhs: &Descriptor) -> Descriptor {
    let digits = match (lhs.signed, rhs.signed) {
        (false, false) => lhs.digits.min(rhs.digits),
        (true, true) => lhs.digits.max(rhs.digits) + 1,
        (true, false) => rhs.digits,
        (false, true) => lhs.digits,
    };
    Descriptor::new(digits, 0, lhs.radix, lhs.signed && rhs.signed)
}

/// Result of `lhs | rhs` on integers.
pub fn bit_or(lhs: &Descriptor, rhs: &Descriptor) -> Descriptor {
    Descriptor::new(
        lhs.digits.max(rhs.digits),
        0,
        lhs.radix,
        lhs.signed || rhs.signed,
    )
}

/// Result of `lhs ^ rhs` on integers. A signed operand can flip the result
/// to `-2^max`, which needs one more digit.
pub fn bit_xor(lhs: &Descriptor, rhs: &Descriptor) -> Descriptor {
    let signed = lhs.signed || rhs.signed;
    Descriptor::new(
        lhs.digits.max(rhs.digits) + signed as u32,
        0,
        lhs.radix,
        signed,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn binary(digits: u32, exponent: i32, signed: bool) -> Descriptor {
        Descriptor::new(digits, exponent, 2, signed)
    }

    #[test]
    fn test_add_same_exponent_grows_one_digit() {
        let a = binary(15, -7, true);
        let sum = add(&a, &a);
        assert_eq!(sum.result, binary(16, -7, true));
        assert_eq!(sum.result.integer_digits(), 9);
        assert_eq!((sum.lhs_shift, sum.rhs_shift), (0, 0));
    }

    #[test]
    fn test_add_different_exponents_aligns_to_finer() {
        let coarse = binary(10, 2, false);
        let fine = binary(6, -3, true);
        let sum = add(&coarse, &fine);
        // The coarse operand moves down by five digits.
        assert_eq!(sum.lhs_shift, 5);
        assert_eq!(sum.rhs_shift, 0);
        assert_eq!(sum.result, binary(16, -3, true));
    }

    #[test]
    fn test_subtract_is_signed() {
        let a = binary(8, 0, false);
        assert_eq!(subtract(&a, &a).result, binary(8, 0, true));
        let b = binary(8, 0, true);
        assert_eq!(subtract(&a, &b).result, binary(9, 0, true));
    }

    #[test]
    fn test_multiply_exponents_add() {
        let a = binary(7, -3, true);
        let b = binary(9, 5, false);
        let product = multiply(&a, &b);
        assert_eq!(product.result, binary(16, 2, true));
    }

    #[test]
    fn test_quotient_widens_both_ways() {
        // 8 integer digits and 4 fractional digits over 3 integer digits and
        // 5 fractional digits.
        let dividend = binary(12, -4, true);
        let divisor = binary(8, -5, true);
        let q = quotient(&dividend, &divisor);
        assert_eq!(q.result.integer_digits(), 8 + 5);
        assert_eq!(q.result.fractional_digits(), 4 + 3);
        assert_eq!(q.result.digits, 20);
        assert_eq!(q.lhs_shift, 8);
    }

    #[test]
    fn test_decimal_quotient_fits_double_width() {
        // (digits, double-width capacity) of every built-in limb pair.
        let limbs = [
            (7, 15),
            (8, 16),
            (15, 31),
            (16, 32),
            (31, 63),
            (32, 64),
            (63, 127),
            (64, 128),
            (127, 255),
            (128, 256),
        ];
        for (digits, capacity) in limbs {
            let operand = Descriptor::new(digits, -2, 10, digits % 2 == 1);
            let q = quotient(&operand, &operand);
            assert!(q.result.digits <= capacity, "{digits} digits need {}", q.result.digits);
        }
        let i32_like = Descriptor::new(31, -2, 10, true);
        let q = quotient(&i32_like, &i32_like);
        assert_eq!(q.lhs_shift, 9);
        assert_eq!(q.result, Descriptor::new(61, -9, 10, true));
    }

    #[test]
    fn test_natural_divide_keeps_dividend_digits() {
        let q = divide(&binary(12, -4, false), &binary(8, -5, true));
        assert_eq!(q.result, binary(12, 1, true));
    }

    #[test]
    fn test_remainder_follows_dividend_sign() {
        let r = remainder(&binary(8, 0, false), &binary(4, -2, true));
        assert_eq!(r.result, binary(10, -2, false));
        assert_eq!((r.lhs_shift, r.rhs_shift), (2, 0));
    }

    #[test]
    fn test_shifts_radix_two_move_exponent() {
        let a = binary(8, -3, true);
        assert_eq!(shift_left(&a, 5), binary(8, 2, true));
        assert_eq!(shift_right(&a, 5), binary(8, -8, true));
    }

    #[test]
    fn test_shifts_other_radix_change_digits() {
        let a = Descriptor::new(8, -2, 10, false);
        assert_eq!(shift_left(&a, 3), Descriptor::new(11, -2, 10, false));
        assert_eq!(shift_right(&a, 3), Descriptor::new(5, -2, 10, false));
    }

    #[test]
    fn test_decimal_alignment() {
        let a = Descriptor::new(10, 0, 10, false);
        let b = Descriptor::new(10, -3, 10, false);
        let sum = add(&a, &b);
        // 10^3 < 2^10
        assert_eq!(sum.result, Descriptor::new(21, -3, 10, false));
        assert_eq!(sum.result.integer_digits(), 4);
    }

    #[test]
    fn test_bitwise_digit_rules() {
        let small = Descriptor::new(3, 0, 2, false);
        let large = Descriptor::new(9, 0, 2, false);
        assert_eq!(bit_and(&small, &large).digits, 3);
        assert_eq!(bit_or(&small, &large).digits, 9);
        assert_eq!(bit_xor(&small, &large).digits, 9);

        let signed = Descriptor::new(9, 0, 2, true);
        assert_eq!(bit_and(&small, &signed).digits, 3);
        assert_eq!(bit_and(&signed, &signed).digits, 10);
        assert_eq!(bit_xor(&small, &signed), Descriptor::new(10, 0, 2, true));
    }

    #[test]
    fn test_not_grows_signed_digits() {
        assert_eq!(bit_not(&Descriptor::new(4, 0, 2, true)), Descriptor::new(5, 0, 2, true));
        assert_eq!(bit_not(&Descriptor::new(4, 0, 2, false)), Descriptor::new(4, 0, 2, false));
    }

    #[test]
    fn test_descriptor_display() {
        assert_eq!(
            binary(16, -7, true).to_string(),
            "digits=16, exponent=-7, radix=2, signed=true"
        );
        assert_eq!(binary(16, -7, true).width(), 17);
    }
}
