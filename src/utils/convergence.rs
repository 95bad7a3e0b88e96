//! Sweep limits & stats for the QR iterations.

/// Stopping guard: how many sweeps may run without a deflation.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SweepLimit {
    pub max_stalled_sweeps: usize,
}

impl SweepLimit {
    pub fn new(max_stalled_sweeps: usize) -> Self {
        Self { max_stalled_sweeps }
    }

    /// Returns true once `stalled` sweeps without progress exhaust the limit.
    pub fn exhausted(&self, stalled: usize) -> bool {
        stalled >= self.max_stalled_sweeps
    }
}

impl Default for SweepLimit {
    fn default() -> Self {
        Self { max_stalled_sweeps: 60 }
    }
}

/// One trailing deflation: rows `start..start + size` split off the active block.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Deflation {
    pub start: usize,
    /// 1 for a real eigenvalue, 2 for an indivisible 2×2 block.
    pub size: usize,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SchurStats {
    /// Francis double-shift sweeps performed.
    pub sweeps: usize,
    pub exceptional_shifts: usize,
    /// Sweeps started below a negligible interior sub-diagonal entry.
    pub interior_splits: usize,
    /// Trailing deflations, in the order they happened.
    pub deflations: Vec<Deflation>,
}

impl SchurStats {
    /// Whether a size-1 deflation ever split off row `row`.
    pub fn deflated_single(&self, row: usize) -> bool {
        self.deflations.iter().any(|d| d.size == 1 && d.start == row)
    }
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct EigenStats {
    pub sweeps: usize,
}
