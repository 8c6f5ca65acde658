/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

use std::iter::FusedIterator;

use algebra::Operation;

use crate::element::Element;
use crate::monoid::AmbientValue;
use crate::monoid::AutomaticMonoid;
use crate::monoid::GeneratorIndex;

/// Iterator over the elements of an [`AutomaticMonoid`] in
/// breadth-first discovery order.
///
/// Yields the elements discovered so far, then drives exploration one
/// discovery at a time. Exploration state belongs to the monoid, not
/// to the iterator: dropping an iterator leaves the monoid resumable,
/// and any number of iterators may be interleaved. Each sees the
/// same sequence.
///
/// Ends when the monoid is exhausted; infinite for an infinite
/// monoid.
pub struct Elements<'m, I, A, Op> {
    monoid: &'m AutomaticMonoid<I, A, Op>,
    position: usize,
}

impl<'m, I, A, Op> Elements<'m, I, A, Op> {
    pub(crate) fn new(monoid: &'m AutomaticMonoid<I, A, Op>) -> Self {
        Self {
            monoid,
            position: 0,
        }
    }
}

impl<'m, I, A, Op> Iterator for Elements<'m, I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
    Op: Operation<A>,
{
    type Item = Element<'m, I, A, Op>;

    fn next(&mut self) -> Option<Self::Item> {
        // Discovery only appends, so `position` never passes the end
        // of the discovery list, and a new discovery lands exactly at
        // `position`.
        let id = match self.monoid.discovered_at(self.position) {
            Some(id) => id,
            None => self.monoid.discover_next()?,
        };
        self.position += 1;
        Some(self.monoid.element(id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let known = self.monoid.num_discovered() - self.position;
        if self.monoid.is_exhausted() {
            (known, Some(known))
        } else {
            (known, None)
        }
    }
}

impl<I, A, Op> FusedIterator for Elements<'_, I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
    Op: Operation<A>,
{
}
