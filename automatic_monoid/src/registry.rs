/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! A memoizing factory for [`AutomaticMonoid`]s.
//!
//! Callers that build the same monoid independently share one store,
//! and with it all enumeration work done so far.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use algebra::Operation;

use crate::monoid::AmbientValue;
use crate::monoid::AutomaticMonoid;
use crate::monoid::GeneratorIndex;

#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct RegistryKey<I, A> {
    generators: Vec<(I, A)>,
    identity: A,
    operation: String,
}

/// Caches monoids by generator family (in order), identity and
/// operation name.
///
/// Operations are generally closures, which cannot be compared;
/// callers name them instead. Two operations registered under one
/// name must be the same operation.
///
/// ```
/// use algebra::Combine;
/// use algebra::Residue;
/// use automatic_monoid::MonoidRegistry;
///
/// let r = |v| Residue::new(v, 12).unwrap();
/// let registry = MonoidRegistry::new();
/// let a = registry.get_or_create([(1, r(3)), (2, r(5))], r(1), "mul", || Combine);
/// let b = registry.get_or_create([(1, r(3)), (2, r(5))], r(1), "mul", || Combine);
/// assert!(std::rc::Rc::ptr_eq(&a, &b));
/// ```
pub struct MonoidRegistry<I, A, Op> {
    monoids: RefCell<HashMap<RegistryKey<I, A>, Rc<AutomaticMonoid<I, A, Op>>>>,
}

impl<I, A, Op> Default for MonoidRegistry<I, A, Op> {
    fn default() -> Self {
        Self {
            monoids: RefCell::new(HashMap::new()),
        }
    }
}

impl<I, A, Op> MonoidRegistry<I, A, Op>
where
    I: GeneratorIndex,
    A: AmbientValue,
    Op: Operation<A>,
{
    pub fn new() -> Self {
        Self::default()
    }

    /// The monoid for this key, created with `make_op` on first use.
    pub fn get_or_create(
        &self,
        generators: impl IntoIterator<Item = (I, A)>,
        identity: A,
        operation: impl Into<String>,
        make_op: impl FnOnce() -> Op,
    ) -> Rc<AutomaticMonoid<I, A, Op>> {
        let key = RegistryKey {
            generators: generators.into_iter().collect(),
            identity,
            operation: operation.into(),
        };
        if let Some(monoid) = self.monoids.borrow().get(&key) {
            return Rc::clone(monoid);
        }
        tracing::debug!(
            operation = %key.operation,
            generators = key.generators.len(),
            "registering automatic monoid"
        );
        let monoid = Rc::new(AutomaticMonoid::with_identity(
            key.generators.iter().cloned(),
            key.identity.clone(),
            make_op(),
        ));
        self.monoids.borrow_mut().insert(key, Rc::clone(&monoid));
        monoid
    }

    pub fn len(&self) -> usize {
        self.monoids.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.monoids.borrow().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use algebra::Combine;
    use algebra::Residue;

    use super::*;

    fn r(value: u64, modulus: u64) -> Residue {
        Residue::new(value, modulus).unwrap()
    }

    #[test]
    fn equal_keys_share_a_monoid() {
        let registry = MonoidRegistry::new();
        let a = registry.get_or_create([(1, r(3, 12)), (2, r(5, 12))], r(1, 12), "mul", || Combine);
        a.compute_first_n(usize::MAX);

        let mut made = false;
        let b = registry.get_or_create([(1, r(3, 12)), (2, r(5, 12))], r(1, 12), "mul", || {
            made = true;
            Combine
        });
        assert!(!made);
        assert!(Rc::ptr_eq(&a, &b));
        assert!(b.is_exhausted());
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn distinct_keys_get_distinct_monoids() {
        let registry = MonoidRegistry::new();
        let m12 = registry.get_or_create([(1, r(3, 12)), (2, r(5, 12))], r(1, 12), "mul", || Combine);
        let m16 = registry.get_or_create([(1, r(3, 16)), (2, r(5, 16))], r(1, 16), "mul", || Combine);
        let swapped =
            registry.get_or_create([(2, r(5, 12)), (1, r(3, 12))], r(1, 12), "mul", || Combine);
        let renamed =
            registry.get_or_create([(1, r(3, 12)), (2, r(5, 12))], r(1, 12), "other", || Combine);
        assert!(!Rc::ptr_eq(&m12, &m16));
        assert!(!Rc::ptr_eq(&m12, &swapped));
        assert!(!Rc::ptr_eq(&m12, &renamed));
        assert_eq!(registry.len(), 4);
        assert_eq!(m12.cardinality(), Ok(4));
        assert_eq!(m16.cardinality(), Ok(8));
    }

    #[test]
    fn closures_are_registered_by_name() {
        let registry = MonoidRegistry::new();
        let add = |a: &u32, b: &u32| (a + b) % 6;
        let m = registry.get_or_create([('x', 2u32)], 0, "add mod 6", || add);
        assert!(!registry.is_empty());
        assert_eq!(m.cardinality(), Ok(3));
    }
}
