//! Real Schur decomposition by the Francis double-shift QR algorithm.
//!
//! `SchurDecomposition::run` copies the input into the caller's Schur-form
//! buffer, reduces it to Hessenberg form, then repeatedly chases a
//! double-shift bulge down the active window and deflates converged trailing
//! 1×1 and 2×2 blocks until the active block boundary drops below 2. On
//! success the Schur form T is upper quasi-triangular, U is orthogonal and
//! `A = U T Uᵗ`.
//!
//! The state that lives across the steps of one call (the two output views,
//! the active block boundary and the counters) is held by a call-scoped
//! `FrancisIteration`, so a `SchurDecomposition` carries only its options
//! and `run` can be called any number of times on the same value.
//!
//! # Deflation
//! A sub-diagonal entry T(i, i−1) is negligible when
//! `|T(i,i−1)| <= precision · (|T(i,i)| + |T(i−1,i−1)|)`. After every sweep
//! the trailing entry is tested first (deflating one real eigenvalue), then
//! the one above it (deflating a 2×2 block as a unit), repeatedly, since one
//! deflation can expose another.
//!
//! # References
//! - Francis, J. G. F. (1961). The QR Transformation, parts I and II.
//! - Golub & Van Loan, Matrix Computations, Algorithm 7.5.1
//! - LAPACK `dlahqr` (exceptional shifts, interior splitting)

use crate::config::options::{SchurFlags, SchurOptions, check_precision};
use crate::core::traits::{MatShape, SmallBlock};
use crate::decomposition::hessenberg::HessenbergReduction;
use crate::error::SchurError;
use crate::matrix::dense::{DenseMatrix, diagonal_blocks, first_non_finite, from_f64};
use crate::transform::{Band, GivensRotation, HouseholderReflector, similarity};
use crate::utils::convergence::{Deflation, SchurStats};
use faer::{Mat, MatMut, MatRef};
use num_traits::Float;

/// Schur decomposition driver. Holds only its options.
#[derive(Copy, Clone, Debug)]
pub struct SchurDecomposition<T> {
    options: SchurOptions<T>,
}

impl<T: Float> SchurDecomposition<T> {
    /// Driver with default options and the given deflation precision.
    pub fn new(precision: T) -> Result<Self, SchurError> {
        Ok(Self { options: SchurOptions::new(precision)? })
    }

    pub fn with_options(options: SchurOptions<T>) -> Result<Self, SchurError> {
        check_precision(options.precision)?;
        Ok(Self { options })
    }

    pub fn set_precision(&mut self, precision: T) -> Result<(), SchurError> {
        check_precision(precision)?;
        self.options.precision = precision;
        Ok(())
    }

    pub fn precision(&self) -> T {
        self.options.precision
    }

    pub fn options(&self) -> &SchurOptions<T> {
        &self.options
    }

    /// Computes `data = U T Uᵗ`, writing T into `schur_form` and U into
    /// `unitary` (both are resized to match `data`).
    ///
    /// On `NonConvergence` or `NumericalFailure` the two buffers hold the
    /// state reached so far.
    pub fn run(
        &self,
        data: MatRef<'_, T>,
        schur_form: &mut Mat<T>,
        unitary: &mut Mat<T>,
    ) -> Result<SchurStats, SchurError> {
        if !data.is_square() {
            return Err(SchurError::not_square("input", data.nrows(), data.ncols()));
        }
        let n = data.nrows();
        *schur_form = Mat::from_fn(n, n, |i, j| data[(i, j)]);
        *unitary = Mat::identity_of(n);

        HessenbergReduction::new().run(schur_form.as_mut(), unitary.as_mut())?;

        let mut iteration =
            FrancisIteration::new(schur_form.as_mut(), unitary.as_mut(), &self.options);
        iteration.check_finite()?;
        iteration.iterate()?;
        if self.options.flags.contains(SchurFlags::SPLIT_REAL_BLOCKS) {
            iteration.split_real_blocks();
            iteration.check_finite()?;
        }
        let stats = iteration.into_stats();
        log::debug!(
            target: "schur_qr",
            "schur decomposition of {n}x{n} matrix: {} sweeps, {} deflations",
            stats.sweeps,
            stats.deflations.len()
        );
        Ok(stats)
    }

    /// Owned variant of [`run`](Self::run) returning `(T, U, stats)`.
    pub fn compute(&self, data: MatRef<'_, T>) -> Result<(Mat<T>, Mat<T>, SchurStats), SchurError> {
        let mut schur_form = Mat::from_fn(0, 0, |_, _| T::zero());
        let mut unitary = Mat::from_fn(0, 0, |_, _| T::zero());
        let stats = self.run(data, &mut schur_form, &mut unitary)?;
        Ok((schur_form, unitary, stats))
    }
}

/// State of one `run` call: the two output views, the active block boundary
/// and the counters. Never outlives the call.
struct FrancisIteration<'a, T> {
    schur: MatMut<'a, T>,
    unitary: MatMut<'a, T>,
    options: &'a SchurOptions<T>,
    /// Last row of the unreduced trailing block [0, cur_size].
    cur_size: usize,
    /// Sweeps since the last deflation.
    stalled: usize,
    stats: SchurStats,
}

impl<'a, T: Float> FrancisIteration<'a, T> {
    fn new(schur: MatMut<'a, T>, unitary: MatMut<'a, T>, options: &'a SchurOptions<T>) -> Self {
        let cur_size = schur.nrows().saturating_sub(1);
        Self {
            schur,
            unitary,
            options,
            cur_size,
            stalled: 0,
            stats: SchurStats::default(),
        }
    }

    fn into_stats(self) -> SchurStats {
        self.stats
    }

    fn iterate(&mut self) -> Result<(), SchurError> {
        if self.cur_size >= 2 {
            self.deflate();
        }
        while self.cur_size >= 2 {
            if self.options.limit.exhausted(self.stalled) {
                log::warn!(
                    target: "schur_qr",
                    "giving up after {} sweeps without deflation (active block ends at row {})",
                    self.stalled,
                    self.cur_size
                );
                return Err(SchurError::NonConvergence {
                    active_size: self.cur_size,
                    sweeps: self.stats.sweeps,
                });
            }
            self.sweep();
            self.check_finite()?;
            self.deflate();
        }
        Ok(())
    }

    fn negligible(&self, i: usize) -> bool {
        let t = &self.schur;
        self.options.negligible(t[(i, i - 1)], t[(i, i)], t[(i - 1, i - 1)])
    }

    fn deflate(&mut self) {
        loop {
            let cur = self.cur_size;
            let size = if cur >= 1 && self.negligible(cur) {
                1
            } else if cur >= 2 && self.negligible(cur - 1) {
                2
            } else {
                break;
            };
            let start = cur + 1 - size;
            self.schur[(start, start - 1)] = T::zero();
            self.stats.deflations.push(Deflation { start, size });
            self.cur_size -= size;
            self.stalled = 0;
            log::trace!(target: "schur_qr", "deflated {size}x{size} block at row {start}");
        }
    }

    /// Top of the active window: the lowest row in [1, cur_size − 2] whose
    /// sub-diagonal entry is negligible (which is then zeroed), or 0.
    fn window_start(&mut self) -> usize {
        if !self.options.flags.contains(SchurFlags::INTERIOR_SPLIT) {
            return 0;
        }
        for k in (1..=self.cur_size - 2).rev() {
            if self.negligible(k) {
                self.schur[(k, k - 1)] = T::zero();
                self.stats.interior_splits += 1;
                return k;
            }
        }
        0
    }

    /// Largest magnitude among the entries feeding the shift vector of the
    /// window [lo, cur_size]; 1 if they are all zero.
    fn shift_scale(&self, lo: usize) -> T {
        let hi = self.cur_size;
        let t = &self.schur;
        let entries = [
            t[(lo, lo)],
            t[(lo, lo + 1)],
            t[(lo + 1, lo)],
            t[(lo + 1, lo + 1)],
            t[(lo + 2, lo + 1)],
            t[(hi - 1, hi - 2)],
            t[(hi - 1, hi - 1)],
            t[(hi - 1, hi)],
            t[(hi, hi - 1)],
            t[(hi, hi)],
        ];
        let scale = entries.iter().fold(T::zero(), |m, &x| m.max(x.abs()));
        if scale == T::zero() { T::one() } else { scale }
    }

    /// Trace and determinant of the shift block, in units of `scale`.
    fn shift(&mut self, scale: T) -> (T, T) {
        let hi = self.cur_size;
        let interval = self.options.exceptional_shift_interval;
        let t = &self.schur;
        if self.options.flags.contains(SchurFlags::EXCEPTIONAL_SHIFTS)
            && interval > 0
            && self.stalled % interval == 0
        {
            let w = t[(hi, hi - 1)].abs() / scale + t[(hi - 1, hi - 2)].abs() / scale;
            let h11 = from_f64::<T>(0.75) * w + t[(hi, hi)] / scale;
            let h12 = from_f64::<T>(-0.4375) * w;
            let h21 = w;
            self.stats.exceptional_shifts += 1;
            log::debug!(
                target: "schur_qr",
                "exceptional shift after {} stalled sweeps",
                self.stalled
            );
            return (h11 + h11, h11 * h11 - h12 * h21);
        }
        // column-major corner block
        let corner = [
            t[(hi - 1, hi - 1)] / scale,
            t[(hi, hi - 1)] / scale,
            t[(hi - 1, hi)] / scale,
            t[(hi, hi)] / scale,
        ];
        let corner = MatRef::from_column_major_slice(&corner, 2, 2);
        (corner.block_trace(), corner.block_determinant())
    }

    /// Direction of the first column of M² − tr·M + det·I for the leading
    /// 3×3 block M of the window starting at `lo`. `trace` and `det` are in
    /// units of `scale` and `scale²`.
    fn starter(&self, lo: usize, scale: T, trace: T, det: T) -> [T; 3] {
        let t = &self.schur;
        let h00 = t[(lo, lo)] / scale;
        let h01 = t[(lo, lo + 1)] / scale;
        let h10 = t[(lo + 1, lo)] / scale;
        let h11 = t[(lo + 1, lo + 1)] / scale;
        let h21 = t[(lo + 2, lo + 1)] / scale;
        [
            h00 * h00 + h01 * h10 - trace * h00 + det,
            h10 * (h00 + h11 - trace),
            h10 * h21,
        ]
    }

    /// One implicit double-shift sweep over the window [lo, cur_size].
    fn sweep(&mut self) {
        let hi = self.cur_size;
        let lo = self.window_start();
        self.stalled += 1;
        self.stats.sweeps += 1;

        let scale = self.shift_scale(lo);
        let (trace, det) = self.shift(scale);
        let reflector = HouseholderReflector::from_array(self.starter(lo, scale, trace, det));
        let band = Band {
            offset: lo,
            col_start: lo,
            row_end: hi.min(lo + 3) + 1,
        };
        similarity(&reflector, self.schur.as_mut(), self.unitary.as_mut(), band);

        for k in lo..hi - 2 {
            let t = &self.schur;
            let reflector =
                HouseholderReflector::from_array([t[(k + 1, k)], t[(k + 2, k)], t[(k + 3, k)]]);
            let band = Band {
                offset: k + 1,
                col_start: k,
                row_end: hi.min(k + 4) + 1,
            };
            similarity(&reflector, self.schur.as_mut(), self.unitary.as_mut(), band);
            self.schur[(k + 1, k)] = reflector.head();
            self.schur[(k + 2, k)] = T::zero();
            self.schur[(k + 3, k)] = T::zero();
        }

        let k = hi - 2;
        let t = &self.schur;
        let reflector = HouseholderReflector::from_array([t[(k + 1, k)], t[(k + 2, k)]]);
        let band = Band {
            offset: k + 1,
            col_start: k,
            row_end: hi + 1,
        };
        similarity(&reflector, self.schur.as_mut(), self.unitary.as_mut(), band);
        self.schur[(k + 1, k)] = reflector.head();
        self.schur[(k + 2, k)] = T::zero();

        log::trace!(target: "schur_qr", "sweep {} over rows {lo}..={hi}", self.stats.sweeps);
    }

    fn check_finite(&self) -> Result<(), SchurError> {
        if !self.options.flags.contains(SchurFlags::CHECK_FINITE) {
            return Ok(());
        }
        match first_non_finite(self.schur.as_ref()) {
            Some((row, col)) => {
                log::warn!(target: "schur_qr", "non-finite entry at ({row}, {col})");
                Err(SchurError::NumericalFailure { row, col })
            }
            None => Ok(()),
        }
    }

    /// Rotates every 2×2 diagonal block with real eigenvalues to upper
    /// triangular form. Complex-conjugate blocks are left as they are.
    fn split_real_blocks(&mut self) {
        for (start, size) in diagonal_blocks(self.schur.as_ref()) {
            if size != 2 {
                continue;
            }
            let t = &self.schur;
            let scale = t[(start, start)].abs()
                + t[(start, start + 1)].abs()
                + t[(start + 1, start)].abs()
                + t[(start + 1, start + 1)].abs();
            let (a, b) = (t[(start, start)] / scale, t[(start, start + 1)] / scale);
            let (c, d) = (t[(start + 1, start)] / scale, t[(start + 1, start + 1)] / scale);
            let p = (a - d) * from_f64(0.5);
            let disc = p * p + b * c;
            if disc < T::zero() {
                continue;
            }
            let root = disc.sqrt();
            let z = if p >= T::zero() { p + root } else { p - root };
            // eigenvector for λ = d + z, from whichever row of (T − λI) is larger
            let (x0, y0) = (b, z - (p + p));
            let (x1, y1) = (z, c);
            let rotation = if x1.abs() + y1.abs() >= x0.abs() + y0.abs() {
                GivensRotation::new(x1, y1)
            } else {
                GivensRotation::new(x0, y0)
            };
            if !(rotation.c().is_finite() && rotation.s().is_finite()) {
                continue;
            }
            let band = Band {
                offset: start,
                col_start: start,
                row_end: start + 2,
            };
            similarity(&rotation, self.schur.as_mut(), self.unitary.as_mut(), band);
            self.schur[(start + 1, start)] = T::zero();
            log::trace!(target: "schur_qr", "split real 2x2 block at row {start}");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::options::DeflationCriterion;
    use approx::assert_abs_diff_eq;

    fn reconstruct(t: &Mat<f64>, u: &Mat<f64>) -> Mat<f64> {
        let ut = u * t;
        &ut * u.transpose()
    }

    #[test]
    fn upper_triangular_input_needs_no_sweep() {
        let a = Mat::<f64>::from_rows(&[&[1.0, 2.0, 3.0], &[0.0, 4.0, 5.0], &[0.0, 0.0, 6.0]]);
        let schur = SchurDecomposition::new(f64::EPSILON).unwrap();
        let (t, u, stats) = schur.compute(a.as_ref()).unwrap();
        assert_eq!(stats.sweeps, 0);
        assert_eq!(
            stats.deflations,
            vec![
                Deflation { start: 2, size: 1 },
                Deflation { start: 1, size: 1 }
            ]
        );
        for i in 0..3 {
            for j in 0..3 {
                assert_eq!(t[(i, j)], a[(i, j)]);
                assert_eq!(u[(i, j)], if i == j { 1.0 } else { 0.0 });
            }
        }
    }

    #[test]
    fn general_four_by_four_reconstructs() {
        let a = Mat::<f64>::from_rows(&[
            &[4.0, 1.0, -2.0, 2.0],
            &[1.0, 2.0, 0.0, 1.0],
            &[-2.0, 0.0, 3.0, -2.0],
            &[2.0, 1.0, -2.0, -1.0],
        ]);
        let schur = SchurDecomposition::new(f64::EPSILON).unwrap();
        let (t, u, stats) = schur.compute(a.as_ref()).unwrap();
        assert!(stats.sweeps > 0);
        assert!(crate::matrix::dense::is_quasi_upper_triangular(t.as_ref()));
        let back = reconstruct(&t, &u);
        for i in 0..4 {
            for j in 0..4 {
                assert_abs_diff_eq!(back[(i, j)], a[(i, j)], epsilon = 1e-11);
            }
        }
    }

    #[test]
    fn precision_accessors_validate() {
        let mut schur = SchurDecomposition::new(1e-10).unwrap();
        assert_eq!(schur.precision(), 1e-10);
        assert!(schur.set_precision(-1.0).is_err());
        assert_eq!(schur.precision(), 1e-10);
        schur.set_precision(1e-8).unwrap();
        assert_eq!(schur.precision(), 1e-8);
        assert!(SchurDecomposition::new(-0.5).is_err());
    }

    #[test]
    fn absolute_criterion_deflates_small_entries_regardless_of_scale() {
        // |T(2,1)| = 1e-9 is not small next to diagonals of 1e-12
        let a = Mat::<f64>::from_rows(&[
            &[1e-12, 0.0, 0.0],
            &[0.0, 2e-12, 0.0],
            &[0.0, 1e-9, 3e-12],
        ]);
        let opts = SchurOptions::new(1e-6)
            .unwrap()
            .with_criterion(DeflationCriterion::Absolute)
            .with_flags(SchurFlags::CHECK_FINITE);
        let (t, _, stats) = SchurDecomposition::with_options(opts)
            .unwrap()
            .compute(a.as_ref())
            .unwrap();
        assert_eq!(stats.sweeps, 0);
        assert_eq!(stats.deflations[0], Deflation { start: 2, size: 1 });
        assert_eq!(t[(2, 1)], 0.0);
    }
}
