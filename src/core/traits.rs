//! Core linear-algebra traits for schur-qr.

use faer::MatMut;

/// An elementary orthogonal transform acting on `width()` consecutive
/// rows (from the left) or columns (from the right) of a block view.
pub trait OrthogonalTransform<T> {
    /// Number of rows/columns the transform mixes.
    fn width(&self) -> usize;
    /// block ← Q · block, where `block.nrows() == self.width()`.
    fn apply_left(&self, block: MatMut<'_, T>);
    /// block ← block · Qᵗ, where `block.ncols() == self.width()`.
    fn apply_right(&self, block: MatMut<'_, T>);
}

/// Trace and determinant of small (1×1 to 3×3) square blocks.
pub trait SmallBlock<T> {
    fn block_trace(&self) -> T;
    fn block_determinant(&self) -> T;
}

/// Uniform shape queries.
pub trait MatShape {
    fn nrows(&self) -> usize;
    fn ncols(&self) -> usize;
    fn is_square(&self) -> bool {
        self.nrows() == self.ncols()
    }
}
