//! Matrix module: dense construction helpers and structural queries.

pub mod dense;
pub use dense::{DenseMatrix, diagonal_blocks, first_non_finite, is_quasi_upper_triangular};
