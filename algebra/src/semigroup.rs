/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Semigroup: associative binary operation, and the external
//! [`Operation`] capability.

/// A type with an associative binary operation.
///
/// Laws:
/// - Associativity: `a.combine(b).combine(c) == a.combine(b.combine(c))`
///
/// Commutativity is not assumed: `a.combine(b)` reads "`a` then `b`".
pub trait Semigroup {
    /// Combine two values associatively.
    fn combine(&self, other: &Self) -> Self;
}

/// An externally supplied associative operation over values of type
/// `A`.
///
/// This is the multiplication consumed by code that treats ambient
/// values as opaque: it never inspects `A`, only combines values
/// through an `Operation`. Closures of shape `Fn(&A, &A) -> A`
/// implement it directly; [`Combine`] lifts any [`Semigroup`].
///
/// ```
/// use algebra::Operation;
///
/// let add_mod_7 = |a: &u32, b: &u32| (a + b) % 7;
/// assert_eq!(add_mod_7.apply(&5, &4), 2);
/// ```
pub trait Operation<A> {
    /// Compute `lhs * rhs`.
    fn apply(&self, lhs: &A, rhs: &A) -> A;
}

impl<A, F> Operation<A> for F
where
    F: Fn(&A, &A) -> A,
{
    fn apply(&self, lhs: &A, rhs: &A) -> A {
        self(lhs, rhs)
    }
}

/// The operation that defers to [`Semigroup::combine`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Combine;

impl<A: Semigroup> Operation<A> for Combine {
    fn apply(&self, lhs: &A, rhs: &A) -> A {
        lhs.combine(rhs)
    }
}
