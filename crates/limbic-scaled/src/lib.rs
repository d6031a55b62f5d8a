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

//! # Limbic Scaled
//!
//! Fixed-point numbers and elastic integers on top of `limbic-core`. Every
//! arithmetic operation deduces the exponent and the digit count of its exact
//! result first and only then performs the raw limb operation in a storage
//! known to hold it.
//!
//! ## Modules
//!
//! - `deduce`: The result-shape rules (`Descriptor`, `Deduction`) for
//!   addition, subtraction, multiplication, widened division, remainder,
//!   negation, shifts and bitwise operations.
//! - `rounding`: The `Native` and `Nearest` rounding policies and the radix
//!   power helpers used when a value moves between exponents.
//! - `repr`: The `Representation` capability shared by limbs and elastic
//!   integers, which selects the storage of arithmetic results.
//! - `scaled`: `Scaled<R, RADIX>`, the value `rep * RADIX^exponent`, with its
//!   operators, conversions, exact comparison and limits.
//! - `elastic`: `Elastic<S>`, an integer that carries the number of digits it
//!   is known to need.
//! - `elastic_scaled`: `ElasticScaled<S, RADIX>`, a scaled value over an
//!   elastic integer.
//! - `fraction`: `Fraction<N, D>`, a ratio used as a conversion source.
//! - `error`: `ArithmeticError` and `CapacityError`.

pub mod deduce;
pub mod elastic;
pub mod elastic_scaled;
pub mod error;
pub mod fraction;
pub mod repr;
pub mod rounding;
pub mod scaled;
