/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Lazily constructed submonoids of an ambient monoid.
//!
//! Given a family of generators drawn from some ambient monoid,
//! [`AutomaticMonoid`] discovers the elements they generate
//! breadth-first, on demand, and names each one by its reduced word:
//! the length-lexicographically least word over the generator
//! indices whose product is that element.
//!
//! Nothing about the ambient monoid is known in advance beyond
//! equality, hashing, an associative [`algebra::Operation`] and an
//! identity. In particular the generated monoid need not be known to
//! be finite: queries explore only as far as they need to, and later
//! queries resume where earlier ones stopped.
//!
//! # Quick Start
//!
//! ```rust
//! use algebra::Combine;
//! use algebra::Permutation;
//! use automatic_monoid::AutomaticMonoid;
//!
//! let swap = Permutation::from_cycles(4, &[&[1, 2]]).unwrap();
//! let cycle = Permutation::from_cycles(4, &[&[1, 2, 3, 4]]).unwrap();
//! let s4 = AutomaticMonoid::new([(1, swap), (2, cycle)], None, Combine).unwrap();
//!
//! let x = s4.retract(Permutation::from_cycles(4, &[&[1, 3]]).unwrap());
//! assert_eq!(x.reduced_word_forced().unwrap(), vec![2, 1, 2, 2, 1]);
//! assert_eq!(s4.cardinality().unwrap(), 24);
//! ```
//!
//! # Core Concepts
//!
//! - **Retraction** ([`AutomaticMonoid::retract`]): ambient value to
//!   element. There is exactly one element per distinct value.
//!
//! - **Lifting** ([`Element::lift`]): element to ambient value.
//!
//! - **Transition** ([`Element::transition`]): right multiplication
//!   by one generator, memoized. This is the only place exploration
//!   multiplies ambient values.
//!
//! - **Enumeration** ([`AutomaticMonoid::iter`]): the elements in
//!   breadth-first order. Membership ([`AutomaticMonoid::contains`]),
//!   bounded computation and whole-monoid queries all drive the same
//!   resumable exploration.

mod config;
mod element;
mod enumerate;
mod error;
mod monoid;
mod registry;
mod report;

pub use config::EnumerationConfig;
pub use config::ASSUME_FINITE_ENV;
pub use config::PROGRESS_INTERVAL_ENV;
pub use element::Element;
pub use element::ElementId;
pub use enumerate::Elements;
pub use error::MonoidError;
pub use monoid::AmbientValue;
pub use monoid::AutomaticMonoid;
pub use monoid::GeneratorIndex;
pub use registry::MonoidRegistry;
pub use report::CayleyEdge;
pub use report::Side;

/// Property-based generators for randomized test input.
#[cfg(test)]
pub mod strategy;
