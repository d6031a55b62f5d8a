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

//! # Arithmetic Errors
//!
//! The single error type of the scaled-number layer. Operator traits
//! (`Add`, `Mul`, ...) panic with the `Display` text of these errors, while the
//! `checked_*` methods and fallible constructors return them.

use std::fmt::Display;

/// A result type needs more digits than its storage provides.
///
/// This is the run-time form of requesting a result type that is too narrow
/// for the deduced digit count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CapacityError {
    /// Digits the result must be able to hold.
    pub required: u32,
    /// Digits the chosen storage can hold.
    pub available: u32,
}

impl Display for CapacityError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Result requires {} digits but the storage holds only {}",
            self.required, self.available
        )
    }
}

impl std::error::Error for CapacityError {}

/// Errors raised by scaled and elastic arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArithmeticError {
    /// The deduced result does not fit the chosen representation.
    CapacityExceeded(CapacityError),
    /// The divisor of a division or remainder is zero.
    DivisionByZero,
    /// A value lies outside the range of its target (including non-finite
    /// floating-point input and negative values for unsigned targets).
    NotRepresentable,
    /// A declared digit count exceeds what the storage can hold.
    InvalidDigits {
        /// The declared digit count.
        digits: u32,
        /// The storage's digit capacity.
        capacity: u32,
    },
}

impl ArithmeticError {
    /// Shorthand for [`ArithmeticError::CapacityExceeded`].
    #[inline]
    pub fn capacity(required: u32, available: u32) -> Self {
        Self::CapacityExceeded(CapacityError {
            required,
            available,
        })
    }
}

impl Display for ArithmeticError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CapacityExceeded(e) => write!(f, "Capacity exceeded: {e}"),
            Self::DivisionByZero => write!(f, "Attempt to divide by zero"),
            Self::NotRepresentable => write!(f, "Value is not representable in the target type"),
            Self::InvalidDigits { digits, capacity } => write!(
                f,
                "Declared {digits} digits but the storage holds at most {capacity}"
            ),
        }
    }
}

impl std::error::Error for ArithmeticError {}

impl From<CapacityError> for ArithmeticError {
    fn from(e: CapacityError) -> Self {
        Self::CapacityExceeded(e)
    }
}

/// Unwraps the result of a checked operation behind an operator, panicking
/// with the error message the way primitive operators panic on overflow.
#[track_caller]
pub(crate) fn or_panic<T>(result: Result<T, ArithmeticError>) -> T {
    match result {
        Ok(value) => value,
        Err(error) => panic!("{error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let error = ArithmeticError::capacity(16, 15);
        assert_eq!(
            error.to_string(),
            "Capacity exceeded: Result requires 16 digits but the storage holds only 15"
        );
        assert_eq!(ArithmeticError::DivisionByZero.to_string(), "Attempt to divide by zero");
        let error = ArithmeticError::InvalidDigits {
            digits: 40,
            capacity: 31,
        };
        assert_eq!(
            error.to_string(),
            "Declared 40 digits but the storage holds at most 31"
        );
    }

    #[test]
    fn test_from_capacity_error() {
        let error: ArithmeticError = CapacityError {
            required: 9,
            available: 7,
        }
        .into();
        assert_eq!(error, ArithmeticError::capacity(9, 7));
    }
}
