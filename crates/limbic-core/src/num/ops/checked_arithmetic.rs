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

//! # Checked Limb Arithmetic
//!
//! By-value checked operations for every limb. The built-in integers forward
//! to their intrinsic `checked_*` methods; `Duplex` integers evaluate the
//! overflow predicates from [`overflow`](super::overflow) before running the
//! wrapping operation.

use core::ops::{Add, Div, Mul, Rem, Shl, Shr, Sub};

use crate::{
    duplex::Duplex,
    num::{
        limb::{Limb, UnsignedLimb},
        ops::overflow::{add_overflows, div_overflows, mul_overflows, neg_overflows, sub_overflows},
    },
};

/// Checked addition by value.
///
/// # Examples
///
/// ```rust
/// # use limbic_core::num::ops::checked_arithmetic::CheckedAddVal;
/// assert_eq!(200u8.checked_add_val(100), None);
/// assert_eq!(200u8.checked_add_val(50), Some(250));
/// ```
pub trait CheckedAddVal: Sized + Add<Self, Output = Self> {
    /// Returns `None` if the sum does not fit.
    fn checked_add_val(self, v: Self) -> Option<Self>;
}

/// Checked subtraction by value.
///
/// # Examples
///
/// ```rust
/// # use limbic_core::num::ops::checked_arithmetic::CheckedSubVal;
/// assert_eq!(50u8.checked_sub_val(100), None);
/// assert_eq!(50u8.checked_sub_val(20), Some(30));
/// ```
pub trait CheckedSubVal: Sized + Sub<Self, Output = Self> {
    /// Returns `None` if the difference does not fit.
    fn checked_sub_val(self, v: Self) -> Option<Self>;
}

/// Checked multiplication by value.
///
/// # Examples
///
/// ```rust
/// # use limbic_core::num::ops::checked_arithmetic::CheckedMulVal;
/// assert_eq!(20u8.checked_mul_val(10), Some(200));
/// assert_eq!(20u8.checked_mul_val(20), None);
/// ```
pub trait CheckedMulVal: Sized + Mul<Self, Output = Self> {
    /// Returns `None` if the product does not fit.
    fn checked_mul_val(self, v: Self) -> Option<Self>;
}

/// Checked division by value.
pub trait CheckedDivVal: Sized + Div<Self, Output = Self> {
    /// Returns `None` on division by zero or if the quotient does not fit.
    fn checked_div_val(self, v: Self) -> Option<Self>;
}

/// Checked remainder by value.
pub trait CheckedRemVal: Sized + Rem<Self, Output = Self> {
    /// Returns `None` on division by zero or if the quotient does not fit.
    fn checked_rem_val(self, v: Self) -> Option<Self>;
}

/// Checked negation by value.
///
/// # Examples
///
/// ```rust
/// # use limbic_core::num::ops::checked_arithmetic::CheckedNegVal;
/// assert_eq!((-128i8).checked_neg_val(), None);
/// assert_eq!(100i8.checked_neg_val(), Some(-100));
/// ```
pub trait CheckedNegVal: Sized {
    /// Returns `None` if the negation does not fit.
    fn checked_neg_val(self) -> Option<Self>;
}

/// Checked left shift by value.
pub trait CheckedShlVal: Sized + Shl<u32, Output = Self> {
    /// Returns `None` if `rhs` is at least the bit width.
    fn checked_shl_val(self, rhs: u32) -> Option<Self>;
}

/// Checked right shift by value.
pub trait CheckedShrVal: Sized + Shr<u32, Output = Self> {
    /// Returns `None` if `rhs` is at least the bit width.
    fn checked_shr_val(self, rhs: u32) -> Option<Self>;
}

macro_rules! checked_impl_primitive {
    ($($t:ty),+ $(,)?) => {
        $(
            impl CheckedAddVal for $t {
                #[inline(always)]
                fn checked_add_val(self, v: $t) -> Option<$t> {
                    <$t>::checked_add(self, v)
                }
            }

            impl CheckedSubVal for $t {
                #[inline(always)]
                fn checked_sub_val(self, v: $t) -> Option<$t> {
                    <$t>::checked_sub(self, v)
                }
            }

            impl CheckedMulVal for $t {
                #[inline(always)]
                fn checked_mul_val(self, v: $t) -> Option<$t> {
                    <$t>::checked_mul(self, v)
                }
            }

            impl CheckedDivVal for $t {
                #[inline(always)]
                fn checked_div_val(self, v: $t) -> Option<$t> {
                    <$t>::checked_div(self, v)
                }
            }

            impl CheckedRemVal for $t {
                #[inline(always)]
                fn checked_rem_val(self, v: $t) -> Option<$t> {
                    <$t>::checked_rem(self, v)
                }
            }

            impl CheckedNegVal for $t {
                #[inline(always)]
                fn checked_neg_val(self) -> Option<$t> {
                    <$t>::checked_neg(self)
                }
            }

            impl CheckedShlVal for $t {
                #[inline(always)]
                fn checked_shl_val(self, rhs: u32) -> Option<$t> {
                    <$t>::checked_shl(self, rhs)
                }
            }

            impl CheckedShrVal for $t {
                #[inline(always)]
                fn checked_shr_val(self, rhs: u32) -> Option<$t> {
                    <$t>::checked_shr(self, rhs)
                }
            }
        )+
    };
}

checked_impl_primitive!(u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize);

impl<H: Limb, L: UnsignedLimb> CheckedAddVal for Duplex<H, L> {
    #[inline]
    fn checked_add_val(self, v: Self) -> Option<Self> {
        (!add_overflows(self, v)).then(|| self + v)
    }
}

impl<H: Limb, L: UnsignedLimb> CheckedSubVal for Duplex<H, L> {
    #[inline]
    fn checked_sub_val(self, v: Self) -> Option<Self> {
        (!sub_overflows(self, v)).then(|| self - v)
    }
}

impl<H: Limb, L: UnsignedLimb> CheckedMulVal for Duplex<H, L> {
    #[inline]
    fn checked_mul_val(self, v: Self) -> Option<Self> {
        (!mul_overflows(self, v)).then(|| self * v)
    }
}

impl<H: Limb, L: UnsignedLimb> CheckedDivVal for Duplex<H, L> {
    #[inline]
    fn checked_div_val(self, v: Self) -> Option<Self> {
        (!div_overflows(self, v)).then(|| self / v)
    }
}

impl<H: Limb, L: UnsignedLimb> CheckedRemVal for Duplex<H, L> {
    #[inline]
    fn checked_rem_val(self, v: Self) -> Option<Self> {
        (!div_overflows(self, v)).then(|| self % v)
    }
}

impl<H: Limb, L: UnsignedLimb> CheckedNegVal for Duplex<H, L> {
    #[inline]
    fn checked_neg_val(self) -> Option<Self> {
        (!neg_overflows(self)).then(|| -self)
    }
}

impl<H: Limb, L: UnsignedLimb> CheckedShlVal for Duplex<H, L> {
    #[inline]
    fn checked_shl_val(self, rhs: u32) -> Option<Self> {
        (rhs < <Self as Limb>::BITS).then(|| self << rhs)
    }
}

impl<H: Limb, L: UnsignedLimb> CheckedShrVal for Duplex<H, L> {
    #[inline]
    fn checked_shr_val(self, rhs: u32) -> Option<Self> {
        (rhs < <Self as Limb>::BITS).then(|| self >> rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::duplex::{I256, U256};

    type I128x = Duplex<i64, u64>;
    type U128x = Duplex<u64, u64>;

    #[test]
    fn test_primitive_forwarding() {
        assert_eq!(i64::MAX.checked_add_val(1), None);
        assert_eq!(5u16.checked_sub_val(6), None);
        assert_eq!(7i32.checked_div_val(0), None);
        assert_eq!(i32::MIN.checked_rem_val(-1), None);
        assert_eq!(1u64.checked_shl_val(64), None);
        assert_eq!(1u64.checked_shl_val(63), Some(1 << 63));
    }

    #[test]
    fn test_duplex_add_sub_match_i128() {
        let max = I128x::from_integer(i128::MAX);
        let one = I128x::from_integer(1);
        assert_eq!(max.checked_add_val(one), None);
        assert_eq!(max.checked_sub_val(one), Some(I128x::from_integer(i128::MAX - 1)));
        let min = I128x::from_integer(i128::MIN);
        assert_eq!(min.checked_sub_val(one), None);
        assert_eq!(min.checked_add_val(one), Some(I128x::from_integer(i128::MIN + 1)));
    }

    #[test]
    fn test_duplex_unsigned_underflow() {
        let zero = U128x::from_integer(0u8);
        assert_eq!(zero.checked_sub_val(U128x::from_integer(1u8)), None);
        assert_eq!(zero.checked_neg_val(), Some(zero));
        assert_eq!(U128x::from_integer(3u8).checked_neg_val(), None);
    }

    #[test]
    fn test_duplex_mul_div() {
        let a = U256::from_integer(u128::MAX);
        assert!(a.checked_mul_val(a).is_some());
        let b = a * U256::from_integer(2u8);
        let c = U256::from_integer(u64::MAX);
        assert_eq!(b.checked_mul_val(c).map(|p| p / c), Some(b));
        assert_eq!(b.checked_mul_val(a), None);
        assert_eq!(b.checked_mul_val(b), None);
        assert_eq!(a.checked_div_val(U256::from_integer(0u8)), None);

        let min = I256::from_integer(-1i8) << 255;
        assert_eq!(min.checked_div_val(I256::from_integer(-1i8)), None);
        assert_eq!(min.checked_neg_val(), None);
    }

    #[test]
    fn test_duplex_shift_range() {
        let one = U128x::from_integer(1u8);
        assert_eq!(one.checked_shl_val(128), None);
        assert_eq!(one.checked_shl_val(127).and_then(|v| v.checked_shr_val(127)), Some(one));
    }
}
