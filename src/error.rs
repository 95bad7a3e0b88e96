use thiserror::Error;

// Unified error type for schur-qr

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SchurError {
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// The sweep guard tripped. The caller's output buffers keep the
    /// partially reduced form, which is still an orthogonal similarity of
    /// the input.
    #[error("no convergence after {sweeps} sweeps (active block ends at row {active_size})")]
    NonConvergence { active_size: usize, sweeps: usize },
    #[error("non-finite value at ({row}, {col})")]
    NumericalFailure { row: usize, col: usize },
}

impl SchurError {
    pub(crate) fn not_square(what: &str, nrows: usize, ncols: usize) -> Self {
        SchurError::InvalidArgument(format!("{what} must be square, got {nrows}x{ncols}"))
    }
}
