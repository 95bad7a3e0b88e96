//! Options for the Schur decomposition driver.
//!
//! This module provides the `SchurOptions` struct, which carries the
//! deflation precision, the deflation criterion, the sweep guard and a set
//! of `SchurFlags` switching the optional stages of the iteration on or off.

use std::fmt;

use bitflags::bitflags;
use num_traits::Float;

use crate::error::SchurError;
use crate::utils::convergence::SweepLimit;

bitflags! {
    #[derive(Copy, Clone, Debug, PartialEq, Eq)]
    pub struct SchurFlags: u32 {
        /// Scan the Schur form for NaN/Inf after the reduction and every sweep.
        const CHECK_FINITE         = 0b0000_0001;
        /// Replace the shift after repeated sweeps without a deflation.
        const EXCEPTIONAL_SHIFTS   = 0b0000_0010;
        /// Split 2×2 diagonal blocks whose eigenvalues are real.
        const SPLIT_REAL_BLOCKS    = 0b0000_0100;
        /// Start sweeps below the lowest negligible interior sub-diagonal.
        const INTERIOR_SPLIT       = 0b0000_1000;
        const DEFAULT              = Self::CHECK_FINITE.bits()
                                   | Self::EXCEPTIONAL_SHIFTS.bits()
                                   | Self::SPLIT_REAL_BLOCKS.bits()
                                   | Self::INTERIOR_SPLIT.bits();
    }
}

/// How a sub-diagonal entry is judged negligible.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum DeflationCriterion {
    /// |T(i,i-1)| <= precision * (|T(i,i)| + |T(i-1,i-1)|)
    Relative,
    /// |T(i,i-1)| < precision, kept for compatibility with older outputs.
    Absolute,
}

/// Schur decomposition parameters.
#[derive(Copy, Clone, Debug)]
pub struct SchurOptions<T> {
    /// Deflation tolerance, shared by every test of one run.
    pub precision: T,

    pub criterion: DeflationCriterion,

    /// Sweeps allowed between two deflations.
    pub limit: SweepLimit,

    /// Stalled sweeps between exceptional shifts.
    pub exceptional_shift_interval: usize,

    pub flags: SchurFlags,
}

impl<T: Float> SchurOptions<T> {
    pub fn new(precision: T) -> Result<Self, SchurError> {
        check_precision(precision)?;
        Ok(Self {
            precision,
            criterion: DeflationCriterion::Relative,
            limit: SweepLimit::default(),
            exceptional_shift_interval: 10,
            flags: SchurFlags::DEFAULT,
        })
    }

    pub fn with_criterion(mut self, criterion: DeflationCriterion) -> Self {
        self.criterion = criterion;
        self
    }

    pub fn with_max_stalled_sweeps(mut self, max_stalled_sweeps: usize) -> Self {
        self.limit = SweepLimit::new(max_stalled_sweeps);
        self
    }

    pub fn with_exceptional_shift_interval(mut self, interval: usize) -> Self {
        self.exceptional_shift_interval = interval;
        self
    }

    pub fn with_flags(mut self, flags: SchurFlags) -> Self {
        self.flags = flags;
        self
    }

    /// Whether `value` at sub-diagonal position (i, i-1) is negligible next
    /// to the diagonal entries `diag_hi` = T(i,i) and `diag_lo` = T(i-1,i-1).
    pub fn negligible(&self, value: T, diag_hi: T, diag_lo: T) -> bool {
        match self.criterion {
            DeflationCriterion::Relative => {
                value.abs() <= self.precision * (diag_hi.abs() + diag_lo.abs())
            }
            DeflationCriterion::Absolute => value.abs() < self.precision,
        }
    }
}

impl<T: Float> Default for SchurOptions<T> {
    fn default() -> Self {
        Self {
            precision: T::epsilon(),
            criterion: DeflationCriterion::Relative,
            limit: SweepLimit::default(),
            exceptional_shift_interval: 10,
            flags: SchurFlags::DEFAULT,
        }
    }
}

impl<T: Float + fmt::Display> fmt::Display for SchurOptions<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Schur(precision={}, criterion={:?}, max_stalled_sweeps={}, flags={:?})",
            self.precision, self.criterion, self.limit.max_stalled_sweeps, self.flags
        )
    }
}

pub(crate) fn check_precision<T: Float>(precision: T) -> Result<(), SchurError> {
    if precision.is_nan() || precision < T::zero() {
        return Err(SchurError::InvalidArgument(
            "precision must be a non-negative number".to_string(),
        ));
    }
    Ok(())
}
