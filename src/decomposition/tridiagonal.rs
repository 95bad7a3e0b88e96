//! Compact storage for symmetric tridiagonal matrices.

use crate::core::traits::MatShape;
use crate::decomposition::hessenberg::HessenbergReduction;
use crate::error::SchurError;
use crate::matrix::dense::DenseMatrix;
use faer::{Mat, MatRef};
use num_traits::Float;

/// Major diagonal (length n) and side diagonal (length n − 1) of a
/// symmetric tridiagonal matrix. The size is fixed at construction.
#[derive(Clone, Debug, PartialEq)]
pub struct TridiagonalSymmetric<T> {
    major: Vec<T>,
    side: Vec<T>,
}

impl<T: Float> TridiagonalSymmetric<T> {
    /// Zero matrix of the given size.
    pub fn new(size: usize) -> Result<Self, SchurError> {
        if size < 2 {
            return Err(SchurError::InvalidArgument(format!(
                "tridiagonal size must be at least 2, got {size}"
            )));
        }
        Ok(Self {
            major: vec![T::zero(); size],
            side: vec![T::zero(); size - 1],
        })
    }

    pub fn from_diagonals(major: Vec<T>, side: Vec<T>) -> Result<Self, SchurError> {
        let mut tri = Self::new(major.len())?;
        if side.len() + 1 != major.len() {
            return Err(SchurError::InvalidArgument(format!(
                "side diagonal must have length {}, got {}",
                major.len() - 1,
                side.len()
            )));
        }
        tri.major = major;
        tri.side = side;
        Ok(tri)
    }

    /// Reduces a symmetric matrix (only its lower triangle is read) to
    /// tridiagonal form, writing the orthogonal factor into `unitary` so that
    /// `A = U T Uᵗ`.
    pub fn from_symmetric(
        matrix: MatRef<'_, T>,
        unitary: &mut Mat<T>,
    ) -> Result<Self, SchurError> {
        if !matrix.is_square() {
            return Err(SchurError::not_square(
                "symmetric matrix",
                matrix.nrows(),
                matrix.ncols(),
            ));
        }
        let n = matrix.nrows();
        let mut tri = Self::new(n)?;
        let mut work = Mat::from_fn(n, n, |i, j| {
            if i >= j {
                matrix[(i, j)]
            } else {
                matrix[(j, i)]
            }
        });
        *unitary = Mat::identity_of(n);
        HessenbergReduction::new().run(work.as_mut(), unitary.as_mut())?;

        for i in 0..n {
            tri.major[i] = work[(i, i)];
        }
        for i in 0..n - 1 {
            tri.side[i] = work[(i + 1, i)];
        }
        Ok(tri)
    }

    pub fn major_diagonal(&self) -> &[T] {
        &self.major
    }

    pub fn major_diagonal_mut(&mut self) -> &mut [T] {
        &mut self.major
    }

    pub fn side_diagonal(&self) -> &[T] {
        &self.side
    }

    pub fn side_diagonal_mut(&mut self) -> &mut [T] {
        &mut self.side
    }

    /// Both diagonals at once, for in-place iterations.
    pub fn diagonals_mut(&mut self) -> (&mut [T], &mut [T]) {
        (&mut self.major, &mut self.side)
    }

    pub fn size(&self) -> usize {
        self.major.len()
    }

    pub fn to_dense(&self) -> Mat<T> {
        let n = self.size();
        Mat::from_fn(n, n, |i, j| {
            if i == j {
                self.major[i]
            } else if i == j + 1 {
                self.side[j]
            } else if j == i + 1 {
                self.side[i]
            } else {
                T::zero()
            }
        })
    }
}
