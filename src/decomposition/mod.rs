//! Matrix decompositions built on the elementary transforms.

pub mod hessenberg;
pub mod schur;
pub mod symmetric_qr;
pub mod tridiagonal;

pub use hessenberg::HessenbergReduction;
pub use schur::SchurDecomposition;
pub use symmetric_qr::SymmetricTridiagonalQr;
pub use tridiagonal::TridiagonalSymmetric;
