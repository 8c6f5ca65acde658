/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;
use std::ops::Mul;

use algebra::Operation;
use serde::Deserialize;
use serde::Serialize;

use crate::error::MonoidError;
use crate::monoid::AmbientValue;
use crate::monoid::AutomaticMonoid;
use crate::monoid::GeneratorIndex;

/// Identifies an element within its monoid. Ids are assigned in the
/// order values are first seen, which is not necessarily discovery
/// order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ElementId(pub(crate) usize);

impl ElementId {
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// An element of an [`AutomaticMonoid`].
///
/// A cheap handle: there is exactly one element per distinct ambient
/// value, so handles compare and hash by identity. An element's
/// reduced word is fixed once assigned.
pub struct Element<'m, I, A, Op> {
    monoid: &'m AutomaticMonoid<I, A, Op>,
    id: ElementId,
}

impl<'m, I, A, Op> Element<'m, I, A, Op> {
    pub(crate) fn new(monoid: &'m AutomaticMonoid<I, A, Op>, id: ElementId) -> Self {
        Self { monoid, id }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    /// The monoid this element belongs to.
    pub fn monoid(&self) -> &'m AutomaticMonoid<I, A, Op> {
        self.monoid
    }
}

impl<'m, I, A, Op> Element<'m, I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
    Op: Operation<A>,
{
    /// The ambient value.
    pub fn lift(&self) -> A {
        self.monoid.value(self.id)
    }

    /// The reduced word, or `None` if enumeration has not reached this
    /// element yet. Never enumerates.
    pub fn reduced_word(&self) -> Option<Vec<I>> {
        self.monoid.word(self.id)
    }

    /// The reduced word, enumerating until this element is found.
    ///
    /// Fails with [`MonoidError::NotInMonoid`] if enumeration exhausts
    /// the monoid first: the value is not reachable from the
    /// generators. Does not return for an unreachable element of an
    /// infinite monoid.
    pub fn reduced_word_forced(&self) -> Result<Vec<I>, MonoidError> {
        self.monoid.forced_word(self.id)
    }

    /// Right multiplication by the generator at `index`.
    pub fn transition(&self, index: &I) -> Self {
        self.monoid.transition(*self, index)
    }

    pub fn is_idempotent(&self) -> bool {
        *self * *self == *self
    }

    /// The pair `(k, j)` with `k` least such that `x^k == x^j` for some
    /// `j < k`: `x^j` starts the cycle of powers and `k - j` is its
    /// period.
    ///
    /// Powers are taken by [`AutomaticMonoid::product`], so any new
    /// values are retracted into the monoid. Does not return for an
    /// element of infinite order.
    pub fn pseudo_order(&self) -> (usize, usize) {
        let mut seen = HashMap::from([(self.monoid.one().id, 0)]);
        let mut power = *self;
        let mut k = 1;
        loop {
            if let Some(&j) = seen.get(&power.id) {
                return (k, j);
            }
            seen.insert(power.id, k);
            power = power * *self;
            k += 1;
        }
    }
}

impl<I, A, Op> Clone for Element<'_, I, A, Op> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<I, A, Op> Copy for Element<'_, I, A, Op> {}

impl<I, A, Op> PartialEq for Element<'_, I, A, Op> {
    fn eq(&self, other: &Self) -> bool {
        std::ptr::eq(self.monoid, other.monoid) && self.id == other.id
    }
}

impl<I, A, Op> Eq for Element<'_, I, A, Op> {}

impl<I, A, Op> Hash for Element<'_, I, A, Op> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<'m, I, A, Op> Mul for Element<'m, I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
    Op: Operation<A>,
{
    type Output = Element<'m, I, A, Op>;

    fn mul(self, rhs: Self) -> Self::Output {
        self.monoid.product(self, rhs)
    }
}

impl<I, A, Op> fmt::Display for Element<'_, I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue + fmt::Display,
    Op: Operation<A>,
{
    /// The reduced word if known, the ambient value otherwise.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reduced_word() {
            Some(word) => write!(f, "{:?}", word),
            None => write!(f, "{}", self.lift()),
        }
    }
}

impl<I, A, Op> fmt::Debug for Element<'_, I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
    Op: Operation<A>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("id", &self.id)
            .field("reduced_word", &self.reduced_word())
            .field("value", &self.lift())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use algebra::Combine;
    use algebra::Residue;

    use super::*;

    fn r(value: u64) -> Residue {
        Residue::new(value, 18).unwrap()
    }

    fn z18() -> AutomaticMonoid<i32, Residue, Combine> {
        AutomaticMonoid::new([(1, r(3)), (2, r(5))], None, Combine).unwrap()
    }

    #[test]
    fn display_prefers_reduced_word() {
        let m = z18();
        let a = m.an_element().unwrap();
        assert_eq!(a.to_string(), "[1]");
        assert_eq!(m.one().to_string(), "[]");

        // Products may reach an element before enumeration does.
        let b = m.from_word(&[1, 2, 1]);
        assert_eq!(b.lift(), r(9));
        assert_eq!(b.to_string(), "9");
        assert_eq!(b.reduced_word_forced(), Ok(vec![1, 1]));
        assert_eq!(b.to_string(), "[1, 1]");
    }

    #[test]
    fn unreachable_element_displays_its_value() {
        let m = z18();
        let c = m.retract(r(6));
        assert_eq!(c.to_string(), "6");
        assert!(!m.contains(c));
    }

    #[test]
    fn elements_hash_by_identity() {
        let m = z18();
        let g = m.generator(&1).unwrap();
        let set: HashSet<_> = [g, m.retract(r(3)), m.from_word(&[1]), g.transition(&2)]
            .into_iter()
            .collect();
        // 3 * 5 = 15, distinct from 3 mod 18.
        assert_eq!(set.len(), 2);
        assert!(set.contains(&g));
        assert_eq!(g * g * g, g.transition(&1).transition(&1));
    }

    #[test]
    fn pseudo_orders_in_z12() {
        let r = |v| Residue::new(v, 12).unwrap();
        let m = AutomaticMonoid::new([(1, r(3)), (2, r(5))], Some(r(1)), Combine).unwrap();
        let orders: Vec<_> = m.iter().map(|e| e.pseudo_order()).collect();
        assert_eq!(orders, vec![(1, 0), (3, 1), (2, 0), (2, 1)]);
    }

    #[test]
    fn pseudo_orders_in_z18() {
        // Powers of 3 mod 18: 3, 9, 9, ..
        let m = z18();
        let g = m.generator(&1).unwrap();
        assert_eq!(g.pseudo_order(), (3, 2));
        // 5 has order 6 in the units of Z/18.
        assert_eq!(m.generator(&2).unwrap().pseudo_order(), (6, 0));
    }

    #[test]
    fn idempotents() {
        let m = z18();
        assert!(m.one().is_idempotent());
        assert!(!m.an_element().unwrap().is_idempotent());
        assert!(m.from_word(&[1, 1]).is_idempotent());
    }
}
