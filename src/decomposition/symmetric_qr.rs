//! Implicit symmetric QR iteration on a tridiagonal matrix.
//!
//! Every sweep chases one Givens bulge down the active window, starting
//! from the Wilkinson shift of the trailing 2×2 block. Converged side
//! entries are set to exactly zero, so on return the major diagonal holds
//! the eigenvalues.
//!
//! # References
//! - Golub & Van Loan, Matrix Computations, Algorithm 8.3.2

use crate::config::options::check_precision;
use crate::core::traits::MatShape;
use crate::decomposition::tridiagonal::TridiagonalSymmetric;
use crate::error::SchurError;
use crate::transform::GivensRotation;
use crate::utils::convergence::EigenStats;
use faer::{Mat, MatMut, MatRef};
use num_traits::Float;

#[derive(Clone, Debug)]
pub struct SymmetricTridiagonalQr<T> {
    precision: T,
    max_sweeps: usize,
}

impl<T: Float> SymmetricTridiagonalQr<T> {
    pub fn new(precision: T, max_sweeps: usize) -> Result<Self, SchurError> {
        check_precision(precision)?;
        Ok(Self { precision, max_sweeps })
    }

    pub fn precision(&self) -> T {
        self.precision
    }

    pub fn max_sweeps(&self) -> usize {
        self.max_sweeps
    }

    /// Diagonalizes `tri` in place. When given, `eigenvectors` (n×n) is
    /// multiplied from the right by every rotation, then its columns are
    /// permuted along with the sorted eigenvalues.
    pub fn run(
        &self,
        tri: &mut TridiagonalSymmetric<T>,
        mut eigenvectors: Option<MatMut<'_, T>>,
    ) -> Result<EigenStats, SchurError> {
        let n = tri.size();
        if let Some(v) = eigenvectors.as_ref() {
            if v.nrows() != n || v.ncols() != n {
                return Err(SchurError::InvalidArgument(format!(
                    "eigenvector accumulator must be {n}x{n}, got {}x{}",
                    v.nrows(),
                    v.ncols()
                )));
            }
        }

        let mut stats = EigenStats::default();
        let (d, e) = tri.diagonals_mut();
        let mut hi = n - 1;
        while hi > 0 {
            if self.negligible(d, e, hi - 1) {
                e[hi - 1] = T::zero();
                hi -= 1;
                continue;
            }
            let mut lo = hi - 1;
            while lo > 0 && !self.negligible(d, e, lo - 1) {
                lo -= 1;
            }
            if lo > 0 {
                e[lo - 1] = T::zero();
            }

            if stats.sweeps >= self.max_sweeps {
                log::debug!(target: "schur_qr", "symmetric QR stopped at window {lo}..={hi}");
                return Err(SchurError::NonConvergence {
                    active_size: hi + 1,
                    sweeps: stats.sweeps,
                });
            }
            stats.sweeps += 1;
            chase(d, e, lo, hi, eigenvectors.as_mut().map(|v| v.as_mut()));
        }

        sort_ascending(d, eigenvectors);
        log::trace!(target: "schur_qr", "symmetric QR converged after {} sweeps", stats.sweeps);
        Ok(stats)
    }

    /// Eigenvalues (ascending) of a symmetric matrix, reading its lower
    /// triangle. `eigenvectors` is overwritten with the matching orthonormal
    /// eigenvectors, one per column.
    pub fn eigen(
        &self,
        matrix: MatRef<'_, T>,
        eigenvectors: &mut Mat<T>,
    ) -> Result<(Vec<T>, EigenStats), SchurError> {
        if !matrix.is_square() {
            return Err(SchurError::not_square(
                "symmetric matrix",
                matrix.nrows(),
                matrix.ncols(),
            ));
        }
        let mut tri = TridiagonalSymmetric::from_symmetric(matrix, eigenvectors)?;
        let stats = self.run(&mut tri, Some(eigenvectors.as_mut()))?;
        Ok((tri.major_diagonal().to_vec(), stats))
    }

    fn negligible(&self, d: &[T], e: &[T], k: usize) -> bool {
        let off = e[k].abs();
        off <= self.precision * (d[k].abs() + d[k + 1].abs()) || off < T::min_positive_value()
    }
}

/// Wilkinson shift: the eigenvalue of the trailing 2×2 block closer to its
/// last diagonal entry.
fn wilkinson_shift<T: Float>(a: T, b: T, c: T) -> T {
    // block [[a, b], [b, c]]
    let two = T::one() + T::one();
    let delta = (a - c) / two;
    let r = delta.hypot(b);
    let denom = if delta >= T::zero() { delta + r } else { delta - r };
    c - b * b / denom
}

fn chase<T: Float>(
    d: &mut [T],
    e: &mut [T],
    lo: usize,
    hi: usize,
    mut v: Option<MatMut<'_, T>>,
) {
    let mu = wilkinson_shift(d[hi - 1], e[hi - 1], d[hi]);
    let mut x = d[lo] - mu;
    let mut z = e[lo];

    for k in lo..hi {
        let g = GivensRotation::new(x, z);
        let (c, s) = (g.c(), g.s());
        if k > lo {
            e[k - 1] = c * x + s * z;
        }

        let (dk, dk1, ek) = (d[k], d[k + 1], e[k]);
        let cs = c * s;
        d[k] = c * c * dk + (cs + cs) * ek + s * s * dk1;
        d[k + 1] = s * s * dk - (cs + cs) * ek + c * c * dk1;
        e[k] = cs * (dk1 - dk) + (c * c - s * s) * ek;

        if let Some(v) = v.as_mut() {
            let nrows = v.nrows();
            g.apply_right(v.as_mut().submatrix_mut(0, k, nrows, 2));
        }

        if k + 1 < hi {
            x = e[k];
            z = s * e[k + 1];
            e[k + 1] = c * e[k + 1];
        }
    }
}

/// Selection sort of the eigenvalues, swapping eigenvector columns along.
fn sort_ascending<T: Float>(d: &mut [T], mut v: Option<MatMut<'_, T>>) {
    let n = d.len();
    for i in 0..n {
        let mut min = i;
        for j in i + 1..n {
            if d[j] < d[min] {
                min = j;
            }
        }
        if min == i {
            continue;
        }
        d.swap(i, min);
        if let Some(v) = v.as_mut() {
            for r in 0..v.nrows() {
                let tmp = v[(r, i)];
                v[(r, i)] = v[(r, min)];
                v[(r, min)] = tmp;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::matrix::dense::DenseMatrix;
    use approx::assert_abs_diff_eq;

    fn solver() -> SymmetricTridiagonalQr<f64> {
        SymmetricTridiagonalQr::new(f64::EPSILON, 200).unwrap()
    }

    #[test]
    fn rejects_bad_precision() {
        assert!(SymmetricTridiagonalQr::new(-1.0f64, 10).is_err());
        assert!(SymmetricTridiagonalQr::new(f64::NAN, 10).is_err());
    }

    #[test]
    fn two_by_two_eigenvalues() {
        let mut tri = TridiagonalSymmetric::from_diagonals(vec![2.0, 2.0], vec![1.0]).unwrap();
        let stats = solver().run(&mut tri, None).unwrap();
        assert!(stats.sweeps >= 1);
        assert_eq!(tri.side_diagonal()[0], 0.0);
        assert_abs_diff_eq!(tri.major_diagonal()[0], 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(tri.major_diagonal()[1], 3.0, epsilon = 1e-14);
    }

    #[test]
    fn laplacian_spectrum() {
        // eigenvalues 2 - 2cos(kπ/(n+1))
        let n = 6;
        let mut tri =
            TridiagonalSymmetric::from_diagonals(vec![2.0; n], vec![-1.0; n - 1]).unwrap();
        let mut v = Mat::<f64>::identity_of(n);
        solver().run(&mut tri, Some(v.as_mut())).unwrap();

        let dense = TridiagonalSymmetric::from_diagonals(vec![2.0; n], vec![-1.0; n - 1])
            .unwrap()
            .to_dense();
        for k in 0..n {
            let angle = (k + 1) as f64 * std::f64::consts::PI / (n + 1) as f64;
            let expected = 2.0 - 2.0 * angle.cos();
            let lambda = tri.major_diagonal()[k];
            assert_abs_diff_eq!(lambda, expected, epsilon = 1e-12);
            for i in 0..n {
                let av: f64 = (0..n).map(|j| dense[(i, j)] * v[(j, k)]).sum();
                assert_abs_diff_eq!(av, lambda * v[(i, k)], epsilon = 1e-12);
            }
        }
        assert!(tri.side_diagonal().iter().all(|&x| x == 0.0));
    }

    #[test]
    fn already_diagonal_needs_no_sweep() {
        let mut tri =
            TridiagonalSymmetric::from_diagonals(vec![3.0, -1.0, 2.0], vec![0.0, 0.0]).unwrap();
        let stats = solver().run(&mut tri, None).unwrap();
        assert_eq!(stats.sweeps, 0);
        assert_eq!(tri.major_diagonal(), &[-1.0, 2.0, 3.0]);
    }

    #[test]
    fn sweep_cap_reports_non_convergence() {
        let mut tri =
            TridiagonalSymmetric::from_diagonals(vec![1.0, 2.0, 3.0], vec![1.0, 1.0]).unwrap();
        let capped = SymmetricTridiagonalQr::new(f64::EPSILON, 0).unwrap();
        let err = capped.run(&mut tri, None).unwrap_err();
        assert_eq!(err, SchurError::NonConvergence { active_size: 3, sweeps: 0 });
    }

    #[test]
    fn accumulator_shape_is_checked() {
        let mut tri = TridiagonalSymmetric::<f64>::new(3).unwrap();
        let mut v = Mat::<f64>::identity_of(2);
        assert!(solver().run(&mut tri, Some(v.as_mut())).is_err());
    }
}
