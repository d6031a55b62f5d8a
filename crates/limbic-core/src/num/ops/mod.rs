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

//! # Numeric Operations Traits
//!
//! By-value numeric operation traits for limbs.
//!
//! ## Submodules
//!
//! - `checked_arithmetic`: Traits like `CheckedAddVal`, `CheckedSubVal`,
//!   `CheckedMulVal`, `CheckedDivVal`, `CheckedRemVal`, `CheckedNegVal`,
//!   `CheckedShlVal`, `CheckedShrVal` returning `Option<T>` on overflow,
//!   division by zero or an out-of-range shift. Implemented for the built-in
//!   integers and for every `Duplex`.
//! - `overflow`: Overflow predicates computed before an operation runs, and
//!   the `OverflowPolicy` strategy that decides what raw limb addition,
//!   subtraction and multiplication do when the result does not fit.

pub mod checked_arithmetic;
pub mod overflow;
