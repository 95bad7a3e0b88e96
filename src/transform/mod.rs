//! Elementary orthogonal transforms and their similarity updates.

use crate::core::traits::OrthogonalTransform;
use faer::MatMut;

pub mod givens;
pub mod householder;

pub use givens::GivensRotation;
pub use householder::HouseholderReflector;

/// Row/column band a similarity update touches.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Band {
    /// First row (and column) the transform mixes.
    pub offset: usize,
    /// Left application covers columns `col_start..n`.
    pub col_start: usize,
    /// Right application covers rows `0..row_end`.
    pub row_end: usize,
}

/// T ← Q T Qᵗ restricted to `band`, and U ← U Qᵗ over all rows of U.
pub fn similarity<T, Q>(q: &Q, mut schur: MatMut<'_, T>, mut unitary: MatMut<'_, T>, band: Band)
where
    Q: OrthogonalTransform<T>,
{
    let n = schur.ncols();
    let w = q.width();
    q.apply_left(schur.as_mut().submatrix_mut(band.offset, band.col_start, w, n - band.col_start));
    q.apply_right(schur.as_mut().submatrix_mut(0, band.offset, band.row_end, w));
    let m = unitary.nrows();
    q.apply_right(unitary.as_mut().submatrix_mut(0, band.offset, m, w));
}
