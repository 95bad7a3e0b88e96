//! Configuration for the decompositions.

pub mod options;

pub use options::{DeflationCriterion, SchurFlags, SchurOptions};
