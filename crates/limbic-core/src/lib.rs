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

//! # Limbic Core
//!
//! Wide integers assembled from narrower ones. This crate provides the
//! integer layer of the Limbic numerics stack: a capability trait shared by
//! every usable limb, and a recursive two-limb integer that lifts any pair of
//! limbs to twice their width.
//!
//! ## Modules
//!
//! - `num`: The `Limb` capability trait with implementations for every
//!   built-in integer from 8 to 128 bits, by-value checked arithmetic traits
//!   (`CheckedAddVal`, `CheckedMulVal`, ...) and the overflow policy hook used
//!   by higher layers to intercept raw limb arithmetic.
//! - `duplex`: `Duplex<High, Low>`, a two's-complement integer of twice the
//!   limb width. Duplexes nest, so `Duplex<Duplex<i64, u64>, Duplex<u64, u64>>`
//!   is a 256-bit signed integer.
//!
//! ## Purpose
//!
//! Fixed-point arithmetic routinely needs intermediates wider than any native
//! integer. Composing them from native limbs keeps the results exact while the
//! common case stays on the machine word.

pub mod duplex;
pub mod num;
