/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Ambient algebraic structures and the operations that combine
//! them.
//!
//! Code that builds structures *inside* an ambient monoid (for
//! example, the submonoid generated by a few elements) treats ambient
//! values as opaque: it needs equality and hashing, an associative
//! [`Operation`], and an identity. This crate provides those
//! capabilities and a handful of concrete ambient structures.
//!
//! # Quick Start
//!
//! ```rust
//! use algebra::Combine;
//! use algebra::Operation;
//! use algebra::Residue;
//! use algebra::Unital;
//!
//! let three = Residue::new(3, 12).unwrap();
//! let nine = Combine.apply(&three, &three);
//! assert_eq!(nine.value(), 9);
//! assert_eq!(three.unit().value(), 1);
//! ```
//!
//! # Core Concepts
//!
//! - **Semigroup**: A type with an associative binary operation
//!   (`combine`), not necessarily commutative.
//!
//! - **Monoid**: A semigroup whose identity (`empty`) is fixed by the
//!   type. Example: the empty word for [`FreeWord`].
//!
//! - **Unital**: A semigroup whose identity is determined by the
//!   structure a value belongs to (`unit`). Example: `1 mod n` for a
//!   [`Residue`] modulo `n`. Every `Monoid` is `Unital`.
//!
//! - **Operation**: An externally supplied multiplication over an
//!   opaque value type. Closures implement it; [`Combine`] lifts a
//!   `Semigroup`.
//!
//! # Provided Types
//!
//! - [`Residue`]: integers modulo `n` under multiplication.
//! - [`Permutation`]: bijections of `0..n`, composed left to right.
//! - [`Transformation`]: arbitrary self-maps of `0..n`.
//! - [`Matrix`]: square `i64` matrices under the matrix product.
//! - [`FreeWord<T>`]: the free monoid, under concatenation.

mod monoid;
mod primitives;
mod semigroup;

pub use monoid::Monoid;
pub use monoid::Unital;
pub use primitives::AlgebraError;
pub use primitives::FreeWord;
pub use primitives::Matrix;
pub use primitives::Permutation;
pub use primitives::Residue;
pub use primitives::Transformation;
pub use semigroup::Combine;
pub use semigroup::Operation;
pub use semigroup::Semigroup;

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn residues(modulus: u64) -> impl Strategy<Value = Residue> {
        (0..modulus).prop_map(move |v| Residue::new(v, modulus).unwrap())
    }

    fn permutations(degree: usize) -> impl Strategy<Value = Permutation> {
        Just((0..degree).collect::<Vec<_>>())
            .prop_shuffle()
            .prop_map(|images| Permutation::from_images(images).unwrap())
    }

    #[test]
    fn closures_are_operations() {
        let max = |a: &i32, b: &i32| *a.max(b);
        assert_eq!(max.apply(&3, &5), 5);
    }

    #[test]
    fn combine_defers_to_semigroup() {
        let a = FreeWord::letter(1);
        let b = FreeWord::letter(2);
        assert_eq!(Combine.apply(&a, &b), a.combine(&b));
        assert_eq!(Combine.apply(&b, &a), FreeWord(vec![2, 1]));
    }

    proptest! {
        #[test]
        fn residue_is_associative(x in residues(36), y in residues(36), z in residues(36)) {
            prop_assert_eq!(x.combine(&y).combine(&z), x.combine(&y.combine(&z)));
        }

        #[test]
        fn residue_unit_is_identity(x in residues(36)) {
            prop_assert_eq!(x.unit().combine(&x), x);
            prop_assert_eq!(x.combine(&x.unit()), x);
        }

        #[test]
        fn permutation_is_associative(
            p in permutations(6),
            q in permutations(6),
            r in permutations(6),
        ) {
            prop_assert_eq!(p.combine(&q).combine(&r), p.combine(&q.combine(&r)));
        }

        #[test]
        fn permutation_unit_is_identity(p in permutations(6)) {
            prop_assert_eq!(p.unit().combine(&p), p.clone());
            prop_assert_eq!(p.combine(&p.unit()), p);
        }
    }
}
