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

//! # Representations
//!
//! A *representation* is the integer stored inside a scaled value. Every limb
//! (the built-in integers and every `Duplex`) is a representation whose digit
//! count is its full width, and so is the elastic integer, whose digit count
//! is tracked per value.
//!
//! The associated `Widened` type selects the storage of arithmetic results.
//! Limbs widen to their double-width limb, because the result of a raw limb
//! operation is no wider than its operands. Elastic integers already grow
//! their digit count through arithmetic, so they are their own widened type;
//! widening them again would double their storage on every operation.
//!
//! A scaled value is not a representation, which rules out scaling a scaled
//! value at compile time.

use std::fmt::Debug;

use limbic_core::num::limb::Limb;
use num_traits::Bounded;

use crate::error::ArithmeticError;

/// Integer-like storage of a scaled value.
pub trait Representation: Copy + Debug {
    /// The limb holding the bits.
    type Storage: Limb;
    /// Representation of add, multiply, divide and remainder results.
    type Widened: Representation;
    /// Signed counterpart of the same storage width.
    type Signed: Representation;

    /// The most digits any value of this representation can declare.
    #[inline]
    fn capacity() -> u32 {
        <Self::Storage as Limb>::DIGITS
    }

    /// The digits this value declares.
    fn digits(&self) -> u32;

    /// The stored integer.
    fn storage(self) -> Self::Storage;

    /// Wraps a stored integer that is known to fit `digits`.
    fn from_storage(storage: Self::Storage, digits: u32) -> Self;

    /// Wraps a stored integer, checking it against `digits` where the
    /// representation tracks them.
    #[inline]
    fn try_from_storage(storage: Self::Storage, digits: u32) -> Result<Self, ArithmeticError> {
        Ok(Self::from_storage(storage, digits))
    }

    /// Largest value with the given digits (clamped to the capacity).
    fn max_with_digits(digits: u32) -> Self;

    /// Smallest value with the given digits (clamped to the capacity).
    fn lowest_with_digits(digits: u32) -> Self;
}

impl<T: Limb> Representation for T {
    type Storage = T;
    type Widened = T::Wide;
    type Signed = T::Signed;

    #[inline(always)]
    fn digits(&self) -> u32 {
        T::DIGITS
    }

    #[inline(always)]
    fn storage(self) -> T {
        self
    }

    #[inline(always)]
    fn from_storage(storage: T, _digits: u32) -> T {
        storage
    }

    fn max_with_digits(digits: u32) -> T {
        if digits >= T::DIGITS {
            <T as Bounded>::max_value()
        } else {
            T::one().shl_total(digits).wrapping_sub(&T::one())
        }
    }

    fn lowest_with_digits(digits: u32) -> T {
        if !<T as Limb>::SIGNED {
            T::zero()
        } else if digits >= T::DIGITS {
            <T as Bounded>::min_value()
        } else {
            T::max_with_digits(digits).wrapping_neg()
        }
    }
}

/// Digit count to declare for a converted value: the estimate, raised to
/// what the value actually uses and clamped to the capacity. Values that need
/// more than the capacity are rejected later by `try_from_storage`.
#[inline]
pub(crate) fn fitting_digits<R: Representation>(value: R::Storage, estimate: u32) -> u32 {
    estimate.max(value.used_digits()).min(R::capacity())
}

#[cfg(test)]
mod tests {
    use super::*;
    use limbic_core::duplex::{Duplex, I256, U256};

    #[test]
    fn test_limbs_widen_to_double_width() {
        fn widened_capacity<R: Representation>() -> u32 {
            <R::Widened as Representation>::capacity()
        }
        assert_eq!(widened_capacity::<i16>(), 31);
        assert_eq!(widened_capacity::<u64>(), 128);
        assert_eq!(widened_capacity::<i128>(), 255);
        assert_eq!(widened_capacity::<U256>(), 512);
    }

    #[test]
    fn test_signed_counterpart() {
        fn signed_capacity<R: Representation>() -> u32 {
            <R::Signed as Representation>::capacity()
        }
        assert_eq!(signed_capacity::<u8>(), 7);
        assert_eq!(signed_capacity::<Duplex<u64, u64>>(), 127);
        assert_eq!(signed_capacity::<U256>(), 255);
        assert_eq!(signed_capacity::<I256>(), 255);
    }

    #[test]
    fn test_limb_limits_by_digits() {
        assert_eq!(<i16 as Representation>::max_with_digits(15), i16::MAX);
        assert_eq!(<i16 as Representation>::lowest_with_digits(15), i16::MIN);
        assert_eq!(<i16 as Representation>::max_with_digits(4), 15);
        assert_eq!(<i16 as Representation>::lowest_with_digits(4), -15);
        assert_eq!(<u8 as Representation>::lowest_with_digits(4), 0);
        assert_eq!(<u8 as Representation>::max_with_digits(40), u8::MAX);
    }

    #[test]
    fn test_limb_digits_are_full_width() {
        assert_eq!(3i32.digits(), 31);
        assert_eq!(<u32 as Representation>::from_storage(7, 3), 7);
        assert_eq!(fitting_digits::<i32>(5, 2), 3);
        assert_eq!(fitting_digits::<i32>(5, 40), 31);
    }
}
