/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! The canonical-element store.
//!
//! An [`AutomaticMonoid`] owns every element it has seen, in an arena
//! indexed by [`ElementId`]. Two indices sit over the arena:
//!
//! - a value index, mapping each ambient value to its unique element
//!   (whether reached by enumeration or by [`AutomaticMonoid::retract`]);
//! - the discovery list, holding exactly the elements with an assigned
//!   reduced word, in breadth-first discovery order.
//!
//! Breadth-first exploration expands the discovery list from a
//! frontier pointer. The pointer and the position of the next
//! generator to try are part of the store, so exploration resumes
//! exactly where it stopped regardless of which query drove it.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

use algebra::Operation;
use algebra::Unital;
use indexmap::IndexMap;

use crate::config::EnumerationConfig;
use crate::element::Element;
use crate::element::ElementId;
use crate::enumerate::Elements;
use crate::error::MonoidError;

/// Values of an ambient monoid: compared and hashed to de-duplicate
/// elements, cloned into the store's indices.
pub trait AmbientValue: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> AmbientValue for T {}

/// Keys of a generator family. Their order in the family, not any
/// order on the keys themselves, breaks ties between words.
pub trait GeneratorIndex: Clone + Eq + Hash + Debug {}

impl<T: Clone + Eq + Hash + Debug> GeneratorIndex for T {}

struct Node<I, A> {
    value: A,
    /// `None` until enumeration reaches this element.
    reduced_word: Option<Vec<I>>,
    /// Memoized right multiplication, by generator position.
    transitions: Vec<Option<ElementId>>,
}

struct State<I, A> {
    nodes: Vec<Node<I, A>>,
    by_value: HashMap<A, ElementId>,
    discovered: Vec<ElementId>,
    /// Number of discovered elements whose transitions are all explored.
    frontier: usize,
    /// Position of the next generator to try on `discovered[frontier]`.
    next_generator: usize,
    exhausted: bool,
}

impl<I, A: AmbientValue> State<I, A> {
    fn new() -> Self {
        Self {
            nodes: Vec::new(),
            by_value: HashMap::new(),
            discovered: Vec::new(),
            frontier: 0,
            next_generator: 0,
            exhausted: false,
        }
    }

    /// The element for `value`, created (undiscovered) if missing.
    fn intern(&mut self, value: A, degree: usize) -> (ElementId, bool) {
        if let Some(&id) = self.by_value.get(&value) {
            return (id, false);
        }
        let id = ElementId(self.nodes.len());
        self.by_value.insert(value.clone(), id);
        self.nodes.push(Node {
            value,
            reduced_word: None,
            transitions: vec![None; degree],
        });
        (id, true)
    }

    fn is_discovered(&self, id: ElementId) -> bool {
        self.nodes[id.0].reduced_word.is_some()
    }

    fn discover(&mut self, id: ElementId, word: Vec<I>) {
        debug_assert!(!self.is_discovered(id), "{id} discovered twice");
        self.nodes[id.0].reduced_word = Some(word);
        self.discovered.push(id);
    }
}

/// The monoid generated by a family of values inside an ambient
/// monoid, constructed lazily.
///
/// Elements are discovered breadth-first by right multiplication with
/// the generators. Each discovered element carries its reduced word:
/// the shortest word over the generator indices whose product is the
/// element, lexicographically least among the shortest with respect
/// to the order of the generator family.
///
/// ```
/// use algebra::Combine;
/// use algebra::Residue;
/// use automatic_monoid::AutomaticMonoid;
///
/// let r = |v| Residue::new(v, 12).unwrap();
/// let m = AutomaticMonoid::new([(1, r(3)), (2, r(5))], None, Combine).unwrap();
///
/// let words: Vec<_> = m.iter().map(|e| e.reduced_word().unwrap()).collect();
/// assert_eq!(words, vec![vec![], vec![1], vec![2], vec![1, 1]]);
///
/// let g1 = m.generator(&1).unwrap();
/// let g2 = m.generator(&2).unwrap();
/// assert_eq!(g1 * g2, g1);
/// assert!(!m.contains(m.retract(r(4))));
/// ```
///
/// The store is single-threaded: exploration state lives behind a
/// `RefCell`, and elements borrow the store they belong to.
pub struct AutomaticMonoid<I, A, Op> {
    generators: IndexMap<I, A>,
    /// The element of each generator, by position.
    generator_ids: Vec<ElementId>,
    one: ElementId,
    op: Op,
    config: EnumerationConfig,
    state: RefCell<State<I, A>>,
}

impl<I, A, Op> AutomaticMonoid<I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue + Unital,
    Op: Operation<A>,
{
    /// Create the monoid generated by `generators` under `op`.
    ///
    /// Without an explicit `identity`, the identity of the ambient
    /// structure is taken from the first generator. With neither a
    /// generator nor an identity there is no ambient structure to
    /// work in, and construction fails.
    pub fn new(
        generators: impl IntoIterator<Item = (I, A)>,
        identity: Option<A>,
        op: Op,
    ) -> Result<Self, MonoidError> {
        let generators: IndexMap<I, A> = generators.into_iter().collect();
        let identity = match identity {
            Some(identity) => identity,
            None => generators
                .values()
                .next()
                .map(Unital::unit)
                .ok_or(MonoidError::NoAmbient)?,
        };
        Ok(Self::with_identity(generators, identity, op))
    }
}

impl<A, Op> AutomaticMonoid<usize, A, Op>
where
    A: AmbientValue,
    Op: Operation<A>,
{
    /// Create the monoid generated by a list of values, indexed by
    /// their positions `0, 1, ..`.
    pub fn from_list(values: impl IntoIterator<Item = A>, identity: A, op: Op) -> Self {
        Self::with_identity(values.into_iter().enumerate(), identity, op)
    }
}

impl<I, A, Op> AutomaticMonoid<I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
    Op: Operation<A>,
{
    /// Create the monoid generated by `generators` under `op`, with
    /// the given identity.
    ///
    /// The family's order fixes the tie-break between words of equal
    /// length. A key repeated in `generators` keeps its first position
    /// and its last value. Generators equal to the identity, or to an
    /// earlier generator, share that element and its shorter word.
    pub fn with_identity(
        generators: impl IntoIterator<Item = (I, A)>,
        identity: A,
        op: Op,
    ) -> Self {
        let generators: IndexMap<I, A> = generators.into_iter().collect();
        let degree = generators.len();
        let mut state = State::new();

        let (one, _) = state.intern(identity, degree);
        state.discover(one, Vec::new());
        let generator_ids = generators
            .iter()
            .map(|(index, value)| {
                let (id, _) = state.intern(value.clone(), degree);
                if !state.is_discovered(id) {
                    state.discover(id, vec![index.clone()]);
                }
                id
            })
            .collect();

        tracing::debug!(
            generators = degree,
            discovered = state.discovered.len(),
            "created automatic monoid"
        );
        Self {
            generators,
            generator_ids,
            one,
            op,
            config: EnumerationConfig::default(),
            state: RefCell::new(state),
        }
    }

    /// Replace the enumeration configuration.
    pub fn with_config(mut self, config: EnumerationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &EnumerationConfig {
        &self.config
    }

    /// The generator family, as given.
    pub fn ambient_generators(&self) -> &IndexMap<I, A> {
        &self.generators
    }

    /// The identity; its reduced word is empty.
    pub fn one(&self) -> Element<'_, I, A, Op> {
        self.element(self.one)
    }

    /// The generator with the given index.
    pub fn generator(&self, index: &I) -> Option<Element<'_, I, A, Op>> {
        let position = self.generators.get_index_of(index)?;
        Some(self.element(self.generator_ids[position]))
    }

    /// The generators with their indices, in family order.
    pub fn generators(&self) -> impl Iterator<Item = (&I, Element<'_, I, A, Op>)> + '_ {
        self.generators
            .keys()
            .zip(&self.generator_ids)
            .map(move |(index, &id)| (index, self.element(id)))
    }

    /// The first generator, if any.
    pub fn an_element(&self) -> Option<Element<'_, I, A, Op>> {
        self.generator_ids.first().map(|&id| self.element(id))
    }

    /// A few elements of the monoid: its generators.
    pub fn some_elements(&self) -> Vec<Element<'_, I, A, Op>> {
        self.generators().map(|(_, element)| element).collect()
    }

    /// The element for an ambient value.
    ///
    /// Returns the existing element when the value has been seen
    /// before. Otherwise a new element is created without a reduced
    /// word; it receives one if and when enumeration reaches it. A
    /// value that the generators do not reach never does.
    pub fn retract(&self, value: A) -> Element<'_, I, A, Op> {
        self.element(self.retract_id(value))
    }

    /// The ambient value of an element.
    pub fn lift(&self, element: Element<'_, I, A, Op>) -> A {
        self.assert_owns(&element);
        self.value(element.id())
    }

    /// Right multiplication of `element` by the generator at `index`.
    ///
    /// Memoized: the ambient operation runs at most once per element
    /// and generator.
    ///
    /// # Panics
    ///
    /// If `index` names no generator or `element` belongs to another
    /// monoid.
    pub fn transition<'a>(
        &'a self,
        element: Element<'a, I, A, Op>,
        index: &I,
    ) -> Element<'a, I, A, Op> {
        self.assert_owns(&element);
        let position = self
            .generators
            .get_index_of(index)
            .unwrap_or_else(|| panic!("{index:?} is not a generator index"));
        self.element(self.transition_at(element.id(), position))
    }

    /// The product `x * y`.
    ///
    /// When `y`'s reduced word is known the product replays it as
    /// transitions from `x`, so repeated products reuse memoized
    /// multiplications. Otherwise the ambient values are multiplied
    /// and the result retracted.
    pub fn product<'a>(
        &'a self,
        x: Element<'a, I, A, Op>,
        y: Element<'a, I, A, Op>,
    ) -> Element<'a, I, A, Op> {
        self.assert_owns(&x);
        self.assert_owns(&y);
        match self.word(y.id()) {
            Some(word) => word
                .iter()
                .fold(x, |acc, index| self.transition(acc, index)),
            None => {
                let value = {
                    let state = self.state.borrow();
                    self.op
                        .apply(&state.nodes[x.id().0].value, &state.nodes[y.id().0].value)
                };
                self.retract(value)
            }
        }
    }

    /// The product of a word over the generator indices, computed by
    /// transitions from the identity.
    ///
    /// The word need not be reduced, and is not recorded as the
    /// result's reduced word.
    pub fn from_word(&self, word: &[I]) -> Element<'_, I, A, Op> {
        word.iter()
            .fold(self.one(), |acc, index| self.transition(acc, index))
    }

    /// The elements in breadth-first order, discovering more as
    /// needed. See [`Elements`].
    pub fn iter(&self) -> Elements<'_, I, A, Op> {
        Elements::new(self)
    }

    /// Whether `element` is reachable from the generators.
    ///
    /// Enumerates until `element` is discovered or the monoid is
    /// exhausted. Does not return for an unreachable element of an
    /// infinite monoid. Elements of another monoid are never
    /// contained.
    pub fn contains(&self, element: Element<'_, I, A, Op>) -> bool {
        std::ptr::eq(element.monoid(), self) && self.forced_word(element.id()).is_ok()
    }

    /// Enumerate at least the first `n` elements (fewer if the monoid
    /// is smaller).
    pub fn compute_first_n(&self, n: usize) {
        self.iter().take(n).for_each(drop);
    }

    /// Enumerate until `element` is discovered, and report whether it
    /// was. If it is not in the monoid, the whole monoid is
    /// enumerated.
    pub fn compute_until(&self, element: Element<'_, I, A, Op>) -> bool {
        self.contains(element)
    }

    /// The number of elements, enumerating the whole monoid.
    pub fn cardinality(&self) -> Result<usize, MonoidError> {
        self.exhaust()?;
        Ok(self.state.borrow().discovered.len())
    }

    /// All elements in discovery order, enumerating the whole monoid.
    pub fn list(&self) -> Result<Vec<Element<'_, I, A, Op>>, MonoidError> {
        self.exhaust()?;
        Ok(self
            .state
            .borrow()
            .discovered
            .iter()
            .map(|&id| self.element(id))
            .collect())
    }

    /// Whether every discovered element has been fully expanded.
    pub fn is_exhausted(&self) -> bool {
        let state = self.state.borrow();
        state.frontier == state.discovered.len()
            || (state.frontier + 1 == state.discovered.len()
                && state.next_generator == self.generators.len())
    }

    /// The number of elements discovered so far.
    pub fn num_discovered(&self) -> usize {
        self.state.borrow().discovered.len()
    }

    /// The number of distinct ambient values seen so far, including
    /// retracted values not (yet) discovered.
    pub fn num_retracted(&self) -> usize {
        self.state.borrow().nodes.len()
    }

    pub(crate) fn element(&self, id: ElementId) -> Element<'_, I, A, Op> {
        Element::new(self, id)
    }

    pub(crate) fn value(&self, id: ElementId) -> A {
        self.state.borrow().nodes[id.0].value.clone()
    }

    pub(crate) fn word(&self, id: ElementId) -> Option<Vec<I>> {
        self.state.borrow().nodes[id.0].reduced_word.clone()
    }

    pub(crate) fn discovered_at(&self, position: usize) -> Option<ElementId> {
        self.state.borrow().discovered.get(position).copied()
    }

    /// The reduced word of `id`, enumerating until it is discovered.
    pub(crate) fn forced_word(&self, id: ElementId) -> Result<Vec<I>, MonoidError> {
        loop {
            if let Some(word) = self.word(id) {
                return Ok(word);
            }
            if self.discover_next().is_none() {
                return Err(MonoidError::NotInMonoid {
                    value: format!("{:?}", self.value(id)),
                });
            }
        }
    }

    pub(crate) fn assert_owns(&self, element: &Element<'_, I, A, Op>) {
        assert!(
            std::ptr::eq(element.monoid(), self),
            "element {} belongs to a different monoid",
            element.id()
        );
    }

    fn retract_id(&self, value: A) -> ElementId {
        let mut state = self.state.borrow_mut();
        let (id, created) = state.intern(value, self.generators.len());
        if created {
            tracing::trace!(element = %id, "retracted a new value");
        }
        id
    }

    fn transition_at(&self, id: ElementId, position: usize) -> ElementId {
        let product = {
            let state = self.state.borrow();
            let node = &state.nodes[id.0];
            if let Some(target) = node.transitions[position] {
                return target;
            }
            self.op.apply(&node.value, &self.generators[position])
        };
        let target = self.retract_id(product);
        self.state.borrow_mut().nodes[id.0].transitions[position] = Some(target);
        target
    }

    /// Advance breadth-first exploration until one more element is
    /// discovered. Returns `None` once the monoid is exhausted.
    pub(crate) fn discover_next(&self) -> Option<ElementId> {
        loop {
            let (current, position) = {
                let mut state = self.state.borrow_mut();
                while state.next_generator == self.generators.len()
                    && state.frontier < state.discovered.len()
                {
                    state.frontier += 1;
                    state.next_generator = 0;
                }
                if state.frontier == state.discovered.len() {
                    if !state.exhausted {
                        state.exhausted = true;
                        tracing::debug!(
                            cardinality = state.discovered.len(),
                            "enumeration complete"
                        );
                    }
                    return None;
                }
                let position = state.next_generator;
                state.next_generator += 1;
                (state.discovered[state.frontier], position)
            };

            let target = self.transition_at(current, position);
            let mut state = self.state.borrow_mut();
            if state.is_discovered(target) {
                continue;
            }
            let (index, _) = self
                .generators
                .get_index(position)
                .expect("next_generator stays below the number of generators");
            let mut word = state.nodes[current.0]
                .reduced_word
                .clone()
                .expect("frontier elements are discovered");
            word.push(index.clone());
            state.discover(target, word);

            let discovered = state.discovered.len();
            tracing::trace!(element = %target, discovered, "discovered element");
            if self.config.progress_interval > 0 && discovered % self.config.progress_interval == 0
            {
                tracing::info!(
                    discovered,
                    frontier = state.frontier,
                    "enumeration progress"
                );
            }
            return Some(target);
        }
    }

    /// Enumerate everything, unless the monoid is not assumed finite.
    pub(crate) fn exhaust(&self) -> Result<(), MonoidError> {
        if !self.config.assume_finite && !self.is_exhausted() {
            return Err(MonoidError::NotKnownFinite {
                discovered: self.num_discovered(),
            });
        }
        while self.discover_next().is_some() {}
        Ok(())
    }
}

impl<I, A, Op> Debug for AutomaticMonoid<I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("AutomaticMonoid")
            .field("generators", &self.generators)
            .field("discovered", &state.discovered.len())
            .field("frontier", &state.frontier)
            .finish()
    }
}
