/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Structural reports over a fully enumerated monoid: idempotents,
//! Cayley graphs and J-classes.
//!
//! Each report enumerates the whole monoid first, so each fails with
//! [`MonoidError::NotKnownFinite`] where
//! [`AutomaticMonoid::cardinality`] does.

use std::collections::HashMap;

use algebra::Operation;
use serde::Deserialize;
use serde::Serialize;

use crate::element::Element;
use crate::element::ElementId;
use crate::error::MonoidError;
use crate::monoid::AmbientValue;
use crate::monoid::AutomaticMonoid;
use crate::monoid::GeneratorIndex;

/// Which multiplications a Cayley graph records.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// `x -> g * x`
    Left,
    /// `x -> x * g`
    Right,
    /// Both; every edge is labelled `Left` or `Right`.
    TwoSided,
}

/// An edge `source -> target` of a Cayley graph, labelled by the
/// generator and the side it multiplies on.
pub struct CayleyEdge<'m, I, A, Op> {
    pub source: Element<'m, I, A, Op>,
    pub target: Element<'m, I, A, Op>,
    pub generator: I,
    pub side: Side,
}

impl<I, A, Op> AutomaticMonoid<I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
    Op: Operation<A>,
{
    /// The idempotents (`e * e == e`), in discovery order.
    pub fn idempotents(&self) -> Result<Vec<Element<'_, I, A, Op>>, MonoidError> {
        Ok(self
            .list()?
            .into_iter()
            .filter(Element::is_idempotent)
            .collect())
    }

    /// The Cayley graph, as edges ordered by source (discovery order),
    /// then generator (family order), right before left.
    pub fn cayley_graph(&self, side: Side) -> Result<Vec<CayleyEdge<'_, I, A, Op>>, MonoidError> {
        let elements = self.list()?;
        let generators: Vec<_> = self.generators().collect();
        let mut edges = Vec::new();
        for &x in &elements {
            for (index, g) in &generators {
                if side != Side::Left {
                    edges.push(CayleyEdge {
                        source: x,
                        target: self.transition(x, index),
                        generator: (*index).clone(),
                        side: Side::Right,
                    });
                }
                if side != Side::Right {
                    edges.push(CayleyEdge {
                        source: x,
                        target: self.product(*g, x),
                        generator: (*index).clone(),
                        side: Side::Left,
                    });
                }
            }
        }
        Ok(edges)
    }

    /// The J-classes: strongly connected components of the two-sided
    /// Cayley graph. Elements within a class are in discovery order,
    /// and classes are ordered by their first element.
    #[tracing::instrument(level = "debug", skip_all)]
    pub fn j_classes(&self) -> Result<Vec<Vec<Element<'_, I, A, Op>>>, MonoidError> {
        let elements = self.list()?;
        let position: HashMap<ElementId, usize> = elements
            .iter()
            .enumerate()
            .map(|(i, e)| (e.id(), i))
            .collect();
        let mut adjacency = vec![Vec::new(); elements.len()];
        for edge in self.cayley_graph(Side::TwoSided)? {
            adjacency[position[&edge.source.id()]].push(position[&edge.target.id()]);
        }
        let classes: Vec<Vec<Element<'_, I, A, Op>>> = strongly_connected_components(&adjacency)
            .into_iter()
            .map(|class| class.into_iter().map(|i| elements[i]).collect())
            .collect();
        tracing::debug!(classes = classes.len(), "computed j-classes");
        Ok(classes)
    }

    /// The idempotents of each J-class that has any.
    pub fn j_classes_of_idempotents(
        &self,
    ) -> Result<Vec<Vec<Element<'_, I, A, Op>>>, MonoidError> {
        Ok(self
            .j_classes()?
            .into_iter()
            .map(|class| class.into_iter().filter(Element::is_idempotent).collect::<Vec<_>>())
            .filter(|class| !class.is_empty())
            .collect())
    }

    /// One idempotent from each J-class that has any: the first
    /// discovered.
    pub fn j_transversal_of_idempotents(&self) -> Result<Vec<Element<'_, I, A, Op>>, MonoidError> {
        Ok(self
            .j_classes_of_idempotents()?
            .into_iter()
            .filter_map(|class| class.into_iter().next())
            .collect())
    }
}

/// Tarjan's algorithm, iteratively. Components come back sorted
/// internally and ordered by their least vertex.
fn strongly_connected_components(adjacency: &[Vec<usize>]) -> Vec<Vec<usize>> {
    const UNVISITED: usize = usize::MAX;

    let n = adjacency.len();
    let mut index = vec![UNVISITED; n];
    let mut low = vec![0; n];
    let mut on_stack = vec![false; n];
    let mut stack = Vec::new();
    let mut components = Vec::new();
    let mut counter = 0;

    for root in 0..n {
        if index[root] != UNVISITED {
            continue;
        }
        index[root] = counter;
        low[root] = counter;
        counter += 1;
        stack.push(root);
        on_stack[root] = true;
        // (vertex, next edge to follow)
        let mut calls = vec![(root, 0)];

        while let Some(frame) = calls.last_mut() {
            let v = frame.0;
            if let Some(&w) = adjacency[v].get(frame.1) {
                frame.1 += 1;
                if index[w] == UNVISITED {
                    index[w] = counter;
                    low[w] = counter;
                    counter += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    calls.push((w, 0));
                } else if on_stack[w] {
                    low[v] = low[v].min(index[w]);
                }
                continue;
            }

            calls.pop();
            if let Some(&(parent, _)) = calls.last() {
                low[parent] = low[parent].min(low[v]);
            }
            if low[v] == index[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                component.sort_unstable();
                components.push(component);
            }
        }
    }

    components.sort_unstable_by_key(|component| component[0]);
    components
}

#[cfg(test)]
mod tests {
    use algebra::Combine;
    use algebra::Residue;

    use super::*;

    fn z12() -> AutomaticMonoid<i32, Residue, Combine> {
        let r = |v| Residue::new(v, 12).unwrap();
        AutomaticMonoid::new([(1, r(3)), (2, r(5))], Some(r(1)), Combine).unwrap()
    }

    fn words<I: GeneratorIndex, A: AmbientValue, Op: Operation<A>>(
        elements: &[Element<'_, I, A, Op>],
    ) -> Vec<Vec<I>> {
        elements.iter().map(|e| e.reduced_word().unwrap()).collect()
    }

    #[test]
    fn scc_of_small_graphs() {
        // 0 <-> 1 -> 2 <-> 3, 4 alone
        let adjacency = vec![vec![1], vec![0, 2], vec![3], vec![2], vec![]];
        assert_eq!(
            strongly_connected_components(&adjacency),
            vec![vec![0, 1], vec![2, 3], vec![4]]
        );
        assert!(strongly_connected_components(&[]).is_empty());
    }

    #[test]
    fn z12_idempotents() {
        let m = z12();
        assert_eq!(words(&m.idempotents().unwrap()), vec![vec![], vec![1, 1]]);
    }

    #[test]
    fn z12_cayley_graph() {
        let m = z12();
        let right = m.cayley_graph(Side::Right).unwrap();
        assert_eq!(right.len(), 8);
        assert!(right.iter().all(|e| e.side == Side::Right));

        let two_sided = m.cayley_graph(Side::TwoSided).unwrap();
        assert_eq!(two_sided.len(), 16);
        // Z/12 is commutative: left and right edges pair up.
        for pair in two_sided.chunks(2) {
            assert_eq!(pair[0].source, pair[1].source);
            assert_eq!(pair[0].target, pair[1].target);
            assert_eq!(pair[0].generator, pair[1].generator);
            assert_eq!((pair[0].side, pair[1].side), (Side::Right, Side::Left));
        }
        let g2 = m.generator(&2).unwrap();
        let edge = two_sided
            .iter()
            .find(|e| e.source == g2 && e.generator == 2)
            .unwrap();
        assert_eq!(edge.target, m.one());
    }

    #[test]
    fn z12_j_classes() {
        let m = z12();
        let classes = m.j_classes().unwrap();
        let classes: Vec<_> = classes.iter().map(|c| words(c)).collect();
        assert_eq!(
            classes,
            vec![vec![vec![], vec![2]], vec![vec![1], vec![1, 1]]]
        );
        let idempotents: Vec<_> = m
            .j_classes_of_idempotents()
            .unwrap()
            .iter()
            .map(|c| words(c))
            .collect();
        assert_eq!(idempotents, vec![vec![vec![]], vec![vec![1, 1]]]);
        assert_eq!(
            words(&m.j_transversal_of_idempotents().unwrap()),
            vec![vec![], vec![1, 1]]
        );
    }
}
