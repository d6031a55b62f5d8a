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

//! Shifts across the limb boundary.
//!
//! Amounts of a full limb or more move whole limbs; smaller amounts shift
//! each limb natively and stitch the bits that cross the boundary into the
//! neighbouring limb. Right shifts of signed values are arithmetic: vacated
//! bits are filled with the sign, also when the amount reaches or exceeds the
//! full width.

use core::ops::{Shl, ShlAssign, Shr, ShrAssign};
use num_traits::Zero;

use super::Duplex;
use crate::num::limb::{Limb, UnsignedLimb};

pub(super) fn shl<H: Limb, L: UnsignedLimb>(value: Duplex<H, L>, n: u32) -> Duplex<H, L> {
    let width = L::BITS;
    if n == 0 {
        value
    } else if n >= 2 * width {
        Duplex::zero()
    } else if n >= width {
        Duplex::from_parts(H::cast_from(value.low.shl_total(n - width)), L::zero())
    } else {
        let high = value.high.shl_total(n) | H::cast_from(value.low.shr_total(width - n));
        Duplex::from_parts(high, value.low.shl_total(n))
    }
}

pub(super) fn shr<H: Limb, L: UnsignedLimb>(value: Duplex<H, L>, n: u32) -> Duplex<H, L> {
    let width = L::BITS;
    if n == 0 {
        value
    } else if n >= width {
        // Amounts of 2W or more leave only the sign fill in both limbs.
        let low = L::cast_from(value.high.shr_total(n - width));
        Duplex::from_parts(value.high.shr_total(width), low)
    } else {
        let low = value.low.shr_total(n) | L::cast_from(value.high.shl_total(width - n));
        Duplex::from_parts(value.high.shr_total(n), low)
    }
}

impl<H: Limb, L: UnsignedLimb> Shl<u32> for Duplex<H, L> {
    type Output = Self;

    /// Shift left; amounts of the full width or more yield zero.
    #[inline]
    fn shl(self, rhs: u32) -> Self {
        shl(self, rhs)
    }
}

impl<H: Limb, L: UnsignedLimb> Shr<u32> for Duplex<H, L> {
    type Output = Self;

    /// Shift right, arithmetic for signed values.
    #[inline]
    fn shr(self, rhs: u32) -> Self {
        shr(self, rhs)
    }
}

impl<H: Limb, L: UnsignedLimb> ShlAssign<u32> for Duplex<H, L> {
    #[inline(always)]
    fn shl_assign(&mut self, rhs: u32) {
        *self = shl(*self, rhs);
    }
}

impl<H: Limb, L: UnsignedLimb> ShrAssign<u32> for Duplex<H, L> {
    #[inline(always)]
    fn shr_assign(&mut self, rhs: u32) {
        *self = shr(*self, rhs);
    }
}
