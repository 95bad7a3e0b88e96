//! Householder reduction to upper-Hessenberg form.
//!
//! One reflector per column, left to right: the reflector for column `k` is
//! built from rows `k+1..n` and eliminates everything below the first
//! sub-diagonal. Each reflector is applied as a similarity to the matrix and
//! accumulated from the right into the orthogonal factor, so that on return
//! `A = U H Uᵗ`.
//!
//! # References
//! - Golub & Van Loan, Matrix Computations, Algorithm 7.4.2

use crate::core::traits::MatShape;
use crate::error::SchurError;
use crate::matrix::dense::DenseMatrix;
use crate::transform::{Band, HouseholderReflector, similarity};
use faer::{Mat, MatMut};
use num_traits::Float;

#[derive(Copy, Clone, Debug, Default)]
pub struct HessenbergReduction;

impl HessenbergReduction {
    pub fn new() -> Self {
        HessenbergReduction
    }

    /// Reduces `matrix` in place and overwrites `unitary` with the
    /// accumulated transform.
    pub fn run<T: Float>(
        &self,
        mut matrix: MatMut<'_, T>,
        mut unitary: MatMut<'_, T>,
    ) -> Result<(), SchurError> {
        if !matrix.is_square() {
            return Err(SchurError::not_square("matrix", matrix.nrows(), matrix.ncols()));
        }
        let n = matrix.nrows();
        if unitary.nrows() != n || unitary.ncols() != n {
            return Err(SchurError::InvalidArgument(format!(
                "unitary accumulator must be {n}x{n}, got {}x{}",
                unitary.nrows(),
                unitary.ncols()
            )));
        }

        for j in 0..n {
            for i in 0..n {
                unitary[(i, j)] = if i == j { T::one() } else { T::zero() };
            }
        }

        for k in 0..n.saturating_sub(2) {
            let column: Vec<T> = (k + 1..n).map(|i| matrix[(i, k)]).collect();
            let reflector = HouseholderReflector::new(&column);
            if reflector.is_identity() {
                continue;
            }
            let band = Band {
                offset: k + 1,
                col_start: k,
                row_end: n,
            };
            similarity(&reflector, matrix.as_mut(), unitary.as_mut(), band);

            matrix[(k + 1, k)] = reflector.head();
            for i in k + 2..n {
                matrix[(i, k)] = T::zero();
            }
        }
        log::trace!(target: "schur_qr", "hessenberg reduction of {n}x{n} matrix done");
        Ok(())
    }

    /// Convenience wrapper returning `(H, U)` for an owned copy of `a`.
    pub fn reduce<T: Float>(&self, a: &Mat<T>) -> Result<(Mat<T>, Mat<T>), SchurError> {
        let mut h = Mat::from_fn(a.nrows(), a.ncols(), |i, j| a[(i, j)]);
        let mut u = Mat::<T>::identity_of(a.nrows());
        self.run(h.as_mut(), u.as_mut())?;
        Ok((h, u))
    }
}
