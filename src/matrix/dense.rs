//! Dense‐matrix helpers on top of Faer.
//!
//! This module provides the `DenseMatrix` construction trait for `faer::Mat<T>`,
//! the `SmallBlock` trace/determinant used by the shift computation, and the
//! structural queries (quasi-triangularity, diagonal block layout, finiteness)
//! used to validate Schur forms.

use crate::core::traits::{MatShape, SmallBlock};
use faer::{Mat, MatMut, MatRef};
use num_traits::Float;

/// Construction helpers that only need `num_traits::Float`.
pub trait DenseMatrix<T>: Sized {
    /// Construct from raw column-major storage.
    fn from_raw(nrows: usize, ncols: usize, data: Vec<T>) -> Self;
    /// Construct from a slice of equally long rows.
    fn from_rows(rows: &[&[T]]) -> Self;
    /// The n×n identity.
    fn identity_of(n: usize) -> Self;
}

impl<T: Float> DenseMatrix<T> for Mat<T> {
    fn from_raw(nrows: usize, ncols: usize, data: Vec<T>) -> Self {
        assert_eq!(data.len(), nrows * ncols, "raw storage has incorrect length");
        Mat::from_fn(nrows, ncols, |i, j| data[j * nrows + i])
    }

    fn from_rows(rows: &[&[T]]) -> Self {
        let ncols = rows.first().map_or(0, |r| r.len());
        assert!(rows.iter().all(|r| r.len() == ncols), "rows have different lengths");
        Mat::from_fn(rows.len(), ncols, |i, j| rows[i][j])
    }

    fn identity_of(n: usize) -> Self {
        Mat::from_fn(n, n, |i, j| if i == j { T::one() } else { T::zero() })
    }
}

impl<T> MatShape for Mat<T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

impl<T> MatShape for MatRef<'_, T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

impl<T> MatShape for MatMut<'_, T> {
    fn nrows(&self) -> usize {
        self.nrows()
    }
    fn ncols(&self) -> usize {
        self.ncols()
    }
}

impl<T: Float> SmallBlock<T> for MatRef<'_, T> {
    fn block_trace(&self) -> T {
        assert!(MatShape::is_square(self), "trace of a non-square block");
        (0..self.nrows()).fold(T::zero(), |acc, i| acc + self[(i, i)])
    }

    /// # Panics
    /// Panics for blocks larger than 3×3.
    fn block_determinant(&self) -> T {
        assert!(MatShape::is_square(self), "determinant of a non-square block");
        let m = self;
        match self.nrows() {
            0 => T::one(),
            1 => m[(0, 0)],
            2 => m[(0, 0)] * m[(1, 1)] - m[(0, 1)] * m[(1, 0)],
            3 => {
                m[(0, 0)] * (m[(1, 1)] * m[(2, 2)] - m[(1, 2)] * m[(2, 1)])
                    - m[(0, 1)] * (m[(1, 0)] * m[(2, 2)] - m[(1, 2)] * m[(2, 0)])
                    + m[(0, 2)] * (m[(1, 0)] * m[(2, 1)] - m[(1, 1)] * m[(2, 0)])
            }
            n => panic!("determinant is only provided for blocks up to 3x3, got {n}x{n}"),
        }
    }
}

/// Converts an `f64` constant into `T`; NaN if it is not representable.
pub(crate) fn from_f64<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::nan)
}

/// True if every entry two or more rows below the diagonal is exactly zero
/// and no two consecutive sub-diagonal entries are nonzero.
pub fn is_quasi_upper_triangular<T: Float>(t: MatRef<'_, T>) -> bool {
    let n = t.nrows();
    if n != t.ncols() {
        return false;
    }
    for j in 0..n {
        for i in (j + 2)..n {
            if t[(i, j)] != T::zero() {
                return false;
            }
        }
    }
    (2..n).all(|i| t[(i, i - 1)] == T::zero() || t[(i - 1, i - 2)] == T::zero())
}

/// Diagonal block layout of a quasi-triangular matrix as `(start, size)`
/// pairs, size 1 or 2, read off the nonzero sub-diagonal entries.
pub fn diagonal_blocks<T: Float>(t: MatRef<'_, T>) -> Vec<(usize, usize)> {
    let n = t.nrows();
    let mut blocks = Vec::with_capacity(n);
    let mut i = 0;
    while i < n {
        if i + 1 < n && t[(i + 1, i)] != T::zero() {
            blocks.push((i, 2));
            i += 2;
        } else {
            blocks.push((i, 1));
            i += 1;
        }
    }
    blocks
}

/// Position of the first NaN/Inf entry, scanning column by column.
pub fn first_non_finite<T: Float>(t: MatRef<'_, T>) -> Option<(usize, usize)> {
    for j in 0..t.ncols() {
        for i in 0..t.nrows() {
            if !t[(i, j)].is_finite() {
                return Some((i, j));
            }
        }
    }
    None
}
