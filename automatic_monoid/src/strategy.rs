/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Property-based generators for generator families.
//!
//! Residues modulo small `n` make good test monoids: every family
//! generates a finite monoid, small enough to check exhaustively,
//! and multiplication is cheap to verify independently.
//!
//! This module is only included in test builds (`#[cfg(test)]`).

use algebra::Combine;
use algebra::Residue;
use proptest::prelude::*;

use crate::AutomaticMonoid;

/// Generates `(modulus, values)`: a modulus in `2..=max_modulus` and
/// between 1 and `max_generators` values below it. Values may repeat,
/// and may be `0` or `1`.
pub fn gen_residue_family(
    max_modulus: u64,
    max_generators: usize,
) -> impl Strategy<Value = (u64, Vec<u64>)> {
    (2..=max_modulus).prop_flat_map(move |modulus| {
        (
            Just(modulus),
            prop::collection::vec(0..modulus, 1..=max_generators),
        )
    })
}

/// The monoid generated by `values` modulo `modulus`, indexed by
/// position.
pub fn residue_monoid(modulus: u64, values: &[u64]) -> AutomaticMonoid<usize, Residue, Combine> {
    let residue = |value| Residue::new(value, modulus).unwrap();
    AutomaticMonoid::from_list(
        values.iter().map(|&value| residue(value)),
        residue(1),
        Combine,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    proptest! {
        #[test]
        fn test_family_properties((modulus, values) in gen_residue_family(20, 3)) {
            prop_assert!((2..=20).contains(&modulus));
            prop_assert!(!values.is_empty() && values.len() <= 3);
            prop_assert!(values.iter().all(|&v| v < modulus));
        }

        #[test]
        fn test_residue_monoid_is_bounded((modulus, values) in gen_residue_family(20, 3)) {
            let m = residue_monoid(modulus, &values);
            let cardinality = m.cardinality().unwrap();
            prop_assert!(cardinality >= 1 && cardinality as u64 <= modulus);
        }
    }
}
