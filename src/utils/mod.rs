//! Shared bookkeeping for the iterative decompositions.

pub mod convergence;

pub use convergence::{Deflation, EigenStats, SchurStats, SweepLimit};
