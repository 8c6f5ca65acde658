/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Monoid: semigroup with identity element.

use super::Semigroup;

/// A semigroup with a statically known identity element.
///
/// Laws:
/// - Identity: `empty().combine(a) == a` and `a.combine(empty()) == a`
/// - Associativity: inherited from Semigroup
pub trait Monoid: Semigroup {
    /// The identity element.
    fn empty() -> Self;

    /// Combine all elements from an iterator.
    fn concat<I>(iter: I) -> Self
    where
        I: IntoIterator<Item = Self>,
        Self: Sized,
    {
        iter.into_iter()
            .fold(Self::empty(), |acc, x| acc.combine(&x))
    }
}

/// A semigroup whose identity depends on the structure a value lives
/// in, rather than on its type alone.
///
/// Residues modulo `n` and permutations of degree `n` share a Rust
/// type across every `n`; the identity for a given value is the one
/// of its own modulus or degree.
///
/// Laws:
/// - `x.unit().combine(x) == x` and `x.combine(&x.unit()) == x`
/// - `x.unit() == x.combine(y).unit()` for `x`, `y` in one structure
pub trait Unital: Semigroup {
    /// The identity of the structure containing `self`.
    fn unit(&self) -> Self;
}

impl<T: Monoid> Unital for T {
    fn unit(&self) -> Self {
        T::empty()
    }
}
