//! schur-qr: real Schur decomposition over Faer
//!
//! This crate provides Householder reflectors and Givens rotations, the
//! Hessenberg reduction, Francis implicit double-shift QR with deflation for
//! the real Schur form, and a symmetric tridiagonal eigensolver.

pub mod config;
pub mod core;
pub mod decomposition;
pub mod error;
pub mod matrix;
pub mod transform;
pub mod utils;

// Re-exports for convenience
pub use config::*;
pub use crate::core::*;
pub use decomposition::*;
pub use error::*;
pub use matrix::*;
pub use transform::*;
pub use utils::*;

pub use utils::convergence::SchurStats;
