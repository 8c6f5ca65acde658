/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

/// The type of error for automatic monoid operations.
///
/// Misuse (an element of another monoid, an index that names no
/// generator) is a programmer error and panics instead.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum MonoidError {
    #[error(
        "automatic monoid requires at least one generator or an identity to determine the ambient structure"
    )]
    NoAmbient,

    #[error("{value} is not in the generated monoid")]
    NotInMonoid { value: String },

    #[error("monoid is not assumed finite; {discovered} elements discovered so far")]
    NotKnownFinite { discovered: usize },
}
