//! Core traits shared by the transforms and decompositions.

pub mod traits;

pub use traits::{MatShape, OrthogonalTransform, SmallBlock};
