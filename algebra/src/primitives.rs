/*
 * Copyright (c) Meta Platforms, Inc. and affiliates.
 * All rights reserved.
 *
 * This source code is licensed under the BSD-style license found in the
 * LICENSE file in the root directory of this source tree.
 */

//! Concrete ambient structures: Residue, Permutation, Transformation,
//! Matrix, FreeWord.

use std::fmt;

use serde::Deserialize;
use serde::Serialize;

use super::Monoid;
use super::Semigroup;
use super::Unital;

/// The type of error for constructing ambient values.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum AlgebraError {
    #[error("modulus must be positive")]
    ZeroModulus,

    #[error("image {image} out of range for degree {degree}")]
    ImageOutOfRange { image: usize, degree: usize },

    #[error("not a bijection: {image} is hit more than once")]
    NotBijective { image: usize },

    #[error("cycle point {point} out of range 1..={degree}")]
    CyclePointOutOfRange { point: usize, degree: usize },

    #[error("cycles are not disjoint: {point} appears twice")]
    OverlappingCycles { point: usize },

    #[error("expected {expected} entries for a square matrix, got {got}")]
    NotSquare { expected: usize, got: usize },

    #[error("row {row} has {len} entries, expected {dim}")]
    RaggedRow { row: usize, len: usize, dim: usize },
}

// Residue: multiplication mod n

/// An integer modulo `n` under multiplication.
///
/// The identity of a residue is `1 mod n` for its own `n`:
///
/// ```
/// use algebra::Residue;
/// use algebra::Semigroup;
/// use algebra::Unital;
///
/// let x = Residue::new(3, 12).unwrap();
/// let y = Residue::new(5, 12).unwrap();
/// assert_eq!(x.combine(&y), x);
/// assert_eq!(x.unit().value(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Residue {
    value: u64,
    modulus: u64,
}

impl Residue {
    /// The residue of `value` modulo `modulus`.
    pub fn new(value: u64, modulus: u64) -> Result<Self, AlgebraError> {
        if modulus == 0 {
            return Err(AlgebraError::ZeroModulus);
        }
        Ok(Self {
            value: value % modulus,
            modulus,
        })
    }

    /// The canonical representative in `0..modulus`.
    pub fn value(&self) -> u64 {
        self.value
    }

    pub fn modulus(&self) -> u64 {
        self.modulus
    }
}

impl Semigroup for Residue {
    fn combine(&self, other: &Self) -> Self {
        debug_assert_eq!(self.modulus, other.modulus, "mixed moduli");
        let product = (self.value as u128 * other.value as u128) % self.modulus as u128;
        Self {
            value: product as u64,
            modulus: self.modulus,
        }
    }
}

impl Unital for Residue {
    fn unit(&self) -> Self {
        Self {
            value: 1 % self.modulus,
            modulus: self.modulus,
        }
    }
}

impl fmt::Display for Residue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

// Permutation and Transformation: maps on 0..n, composed left to right

fn check_images(images: &[usize]) -> Result<(), AlgebraError> {
    let degree = images.len();
    match images.iter().find(|&&image| image >= degree) {
        Some(&image) => Err(AlgebraError::ImageOutOfRange { image, degree }),
        None => Ok(()),
    }
}

/// `(f ; g)(x) = g(f(x))`: apply `f` first.
fn compose(first: &[usize], then: &[usize]) -> Vec<usize> {
    debug_assert_eq!(first.len(), then.len(), "mixed degrees");
    first.iter().map(|&x| then[x]).collect()
}

/// A bijection of `{0, .., n - 1}`.
///
/// `p.combine(&q)` applies `p` first, then `q`. Permutations are
/// usually written in 1-based cycle notation:
///
/// ```
/// use algebra::Permutation;
/// use algebra::Semigroup;
///
/// let swap = Permutation::from_cycles(3, &[&[1, 2]]).unwrap();
/// let rotate = Permutation::from_cycles(3, &[&[1, 2, 3]]).unwrap();
/// // 1 -> 2 -> 3, 2 -> 1 -> 2, 3 -> 3 -> 1
/// assert_eq!(swap.combine(&rotate).images(), &[2, 1, 0]);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Permutation(Vec<usize>);

impl Permutation {
    /// The permutation sending `i` to `images[i]` (0-based).
    pub fn from_images(images: Vec<usize>) -> Result<Self, AlgebraError> {
        check_images(&images)?;
        let mut seen = vec![false; images.len()];
        for &image in &images {
            if std::mem::replace(&mut seen[image], true) {
                return Err(AlgebraError::NotBijective { image });
            }
        }
        Ok(Self(images))
    }

    /// The permutation of degree `degree` given by disjoint 1-based
    /// cycles. Points not mentioned are fixed.
    pub fn from_cycles(degree: usize, cycles: &[&[usize]]) -> Result<Self, AlgebraError> {
        let mut images: Vec<usize> = (0..degree).collect();
        let mut moved = vec![false; degree];
        for cycle in cycles {
            for &point in cycle.iter() {
                if point == 0 || point > degree {
                    return Err(AlgebraError::CyclePointOutOfRange { point, degree });
                }
                if std::mem::replace(&mut moved[point - 1], true) {
                    return Err(AlgebraError::OverlappingCycles { point });
                }
            }
            for (i, &point) in cycle.iter().enumerate() {
                let next = cycle[(i + 1) % cycle.len()];
                images[point - 1] = next - 1;
            }
        }
        Ok(Self(images))
    }

    pub fn identity(degree: usize) -> Self {
        Self((0..degree).collect())
    }

    pub fn degree(&self) -> usize {
        self.0.len()
    }

    /// The 0-based images.
    pub fn images(&self) -> &[usize] {
        &self.0
    }
}

impl Semigroup for Permutation {
    fn combine(&self, other: &Self) -> Self {
        Self(compose(&self.0, &other.0))
    }
}

impl Unital for Permutation {
    fn unit(&self) -> Self {
        Self::identity(self.degree())
    }
}

impl fmt::Display for Permutation {
    /// Cycle notation, 1-based, fixed points omitted; `()` for the
    /// identity.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut visited = vec![false; self.degree()];
        let mut wrote = false;
        for start in 0..self.degree() {
            if visited[start] || self.0[start] == start {
                continue;
            }
            write!(f, "(")?;
            let mut point = start;
            let mut first = true;
            while !visited[point] {
                visited[point] = true;
                if !first {
                    write!(f, ",")?;
                }
                write!(f, "{}", point + 1)?;
                first = false;
                point = self.0[point];
            }
            write!(f, ")")?;
            wrote = true;
        }
        if !wrote {
            write!(f, "()")?;
        }
        Ok(())
    }
}

/// An arbitrary self-map of `{0, .., n - 1}`, an element of the full
/// transformation monoid. Composition follows [`Permutation`]: apply
/// `self` first.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Transformation(Vec<usize>);

impl Transformation {
    pub fn from_images(images: Vec<usize>) -> Result<Self, AlgebraError> {
        check_images(&images)?;
        Ok(Self(images))
    }

    pub fn identity(degree: usize) -> Self {
        Self((0..degree).collect())
    }

    pub fn degree(&self) -> usize {
        self.0.len()
    }

    pub fn images(&self) -> &[usize] {
        &self.0
    }

    /// The number of distinct images.
    pub fn rank(&self) -> usize {
        let mut hit = vec![false; self.degree()];
        self.0.iter().for_each(|&image| hit[image] = true);
        hit.into_iter().filter(|&h| h).count()
    }
}

impl Semigroup for Transformation {
    fn combine(&self, other: &Self) -> Self {
        Self(compose(&self.0, &other.0))
    }
}

impl Unital for Transformation {
    fn unit(&self) -> Self {
        Self::identity(self.degree())
    }
}

impl From<Permutation> for Transformation {
    fn from(permutation: Permutation) -> Self {
        Self(permutation.0)
    }
}

// Matrix: square integer matrices under the usual product

/// A square matrix of `i64`, stored row-major.
///
/// Arithmetic wraps: entries are integers modulo 2^64, in two's
/// complement. The product stays associative, so a generating set
/// whose exact powers grow without bound (such as `[[2]]`) generates
/// a finite monoid here instead of overflowing.
///
/// ```
/// use algebra::Matrix;
/// use algebra::Semigroup;
///
/// let m = Matrix::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
/// assert_eq!(m.combine(&m), Matrix::identity(2));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Matrix {
    dim: usize,
    entries: Vec<i64>,
}

impl Matrix {
    pub fn new(dim: usize, entries: Vec<i64>) -> Result<Self, AlgebraError> {
        if entries.len() != dim * dim {
            return Err(AlgebraError::NotSquare {
                expected: dim * dim,
                got: entries.len(),
            });
        }
        Ok(Self { dim, entries })
    }

    pub fn from_rows(rows: Vec<Vec<i64>>) -> Result<Self, AlgebraError> {
        let dim = rows.len();
        if let Some((row, len)) = rows
            .iter()
            .map(Vec::len)
            .enumerate()
            .find(|&(_, len)| len != dim)
        {
            return Err(AlgebraError::RaggedRow { row, len, dim });
        }
        Self::new(dim, rows.into_iter().flatten().collect())
    }

    pub fn identity(dim: usize) -> Self {
        let mut entries = vec![0; dim * dim];
        (0..dim).for_each(|i| entries[i * dim + i] = 1);
        Self { dim, entries }
    }

    pub fn dim(&self) -> usize {
        self.dim
    }

    /// The entry at `(row, col)`.
    pub fn get(&self, row: usize, col: usize) -> i64 {
        self.entries[row * self.dim + col]
    }
}

impl Semigroup for Matrix {
    fn combine(&self, other: &Self) -> Self {
        debug_assert_eq!(self.dim, other.dim, "mixed dimensions");
        let n = self.dim;
        let mut entries = vec![0i64; n * n];
        for i in 0..n {
            for k in 0..n {
                let a = self.entries[i * n + k];
                if a == 0 {
                    continue;
                }
                for j in 0..n {
                    entries[i * n + j] =
                        entries[i * n + j].wrapping_add(a.wrapping_mul(other.entries[k * n + j]));
                }
            }
        }
        Self { dim: n, entries }
    }
}

impl Unital for Matrix {
    fn unit(&self) -> Self {
        Self::identity(self.dim)
    }
}

// FreeWord<T>: concatenation

/// The free monoid over `T`: finite sequences under concatenation.
///
/// Any nonempty generating set produces an infinite monoid.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FreeWord<T>(pub Vec<T>);

impl<T> FreeWord<T> {
    /// The word of length one.
    pub fn letter(letter: T) -> Self {
        Self(vec![letter])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<T: Clone> Semigroup for FreeWord<T> {
    fn combine(&self, other: &Self) -> Self {
        let mut letters = Vec::with_capacity(self.0.len() + other.0.len());
        letters.extend_from_slice(&self.0);
        letters.extend_from_slice(&other.0);
        Self(letters)
    }
}

impl<T: Clone> Monoid for FreeWord<T> {
    fn empty() -> Self {
        Self(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Residue tests

    #[test]
    fn residue_reduces_on_construction() {
        assert_eq!(Residue::new(15, 12).unwrap().value(), 3);
        assert_eq!(Residue::new(3, 0), Err(AlgebraError::ZeroModulus));
    }

    #[test]
    fn residue_multiplies_mod_n() {
        let x = Residue::new(5, 12).unwrap();
        assert_eq!(x.combine(&x), Residue::new(1, 12).unwrap());
        assert_eq!(x.combine(&x.unit()), x);
    }

    #[test]
    fn residue_unit_mod_one_is_zero() {
        let x = Residue::new(7, 1).unwrap();
        assert_eq!(x.unit().value(), 0);
        assert_eq!(x.combine(&x.unit()), x);
    }

    #[test]
    fn residue_does_not_overflow() {
        let x = Residue::new(u64::MAX - 1, u64::MAX).unwrap();
        assert_eq!(x.combine(&x).value(), 1);
    }

    // Permutation tests

    #[test]
    fn permutation_rejects_non_bijection() {
        assert_eq!(
            Permutation::from_images(vec![0, 0, 1]),
            Err(AlgebraError::NotBijective { image: 0 })
        );
        assert_eq!(
            Permutation::from_images(vec![0, 3, 1]),
            Err(AlgebraError::ImageOutOfRange {
                image: 3,
                degree: 3
            })
        );
    }

    #[test]
    fn permutation_from_cycles() {
        let p = Permutation::from_cycles(5, &[&[1, 4, 3, 5, 2]]).unwrap();
        assert_eq!(p.images(), &[3, 0, 4, 2, 1]);
        assert_eq!(p.to_string(), "(1,4,3,5,2)");
        assert_eq!(Permutation::identity(3).to_string(), "()");
        assert_eq!(
            Permutation::from_cycles(3, &[&[1, 2], &[2, 3]]),
            Err(AlgebraError::OverlappingCycles { point: 2 })
        );
        assert_eq!(
            Permutation::from_cycles(3, &[&[0, 1]]),
            Err(AlgebraError::CyclePointOutOfRange {
                point: 0,
                degree: 3
            })
        );
    }

    #[test]
    fn permutation_composes_left_to_right() {
        let swap = Permutation::from_cycles(3, &[&[1, 2]]).unwrap();
        let rotate = Permutation::from_cycles(3, &[&[1, 2, 3]]).unwrap();
        assert_eq!(swap.combine(&rotate).images(), &[2, 1, 0]);
        assert_eq!(rotate.combine(&swap).images(), &[0, 2, 1]);
        assert_eq!(swap.combine(&swap), swap.unit());
    }

    // Transformation tests

    #[test]
    fn transformation_rank_and_composition() {
        let collapse = Transformation::from_images(vec![0, 0, 2]).unwrap();
        let shift = Transformation::from_images(vec![1, 2, 0]).unwrap();
        assert_eq!(collapse.rank(), 2);
        assert_eq!(collapse.combine(&shift).images(), &[1, 1, 0]);
        assert_eq!(shift.combine(&collapse).images(), &[0, 2, 0]);
        assert_eq!(collapse.combine(&collapse.unit()), collapse);
    }

    // Matrix tests

    #[test]
    fn matrix_product() {
        let a = Matrix::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap();
        let b = Matrix::from_rows(vec![vec![0, 1], vec![1, 0]]).unwrap();
        assert_eq!(
            a.combine(&b),
            Matrix::from_rows(vec![vec![2, 1], vec![4, 3]]).unwrap()
        );
        assert_eq!(a.combine(&a.unit()), a);
        assert_eq!(
            Matrix::new(2, vec![1, 2, 3]),
            Err(AlgebraError::NotSquare {
                expected: 4,
                got: 3
            })
        );
        let ragged = Matrix::from_rows(vec![vec![1, 2, 3], vec![4]]);
        assert_eq!(
            ragged,
            Err(AlgebraError::RaggedRow {
                row: 0,
                len: 3,
                dim: 2
            })
        );
        assert_eq!(
            ragged.unwrap_err().to_string(),
            "row 0 has 3 entries, expected 2"
        );
    }

    #[test]
    fn matrix_product_wraps() {
        let two = Matrix::from_rows(vec![vec![2]]).unwrap();
        let mut power = two.clone();
        for _ in 1..63 {
            power = power.combine(&two);
        }
        assert_eq!(power.get(0, 0), i64::MIN);
        assert_eq!(power.combine(&two).get(0, 0), 0);

        let big = Matrix::from_rows(vec![vec![i64::MAX, i64::MAX], vec![1, 1]]).unwrap();
        let product = big.combine(&big);
        assert_eq!(product.get(0, 0), i64::MAX.wrapping_mul(i64::MAX).wrapping_add(i64::MAX));
        assert_eq!(product.get(1, 1), i64::MAX.wrapping_add(1));
    }

    // FreeWord tests

    #[test]
    fn free_word_concatenates() {
        let a = FreeWord::letter('a');
        let b = FreeWord::letter('b');
        assert_eq!(a.combine(&b), FreeWord(vec!['a', 'b']));
        assert_eq!(a.unit(), FreeWord::empty());
        assert!(FreeWord::<char>::concat(Vec::new()).is_empty());
    }
}
