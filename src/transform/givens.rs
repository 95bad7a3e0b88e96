//! Givens plane rotations.

use crate::core::traits::OrthogonalTransform;
use faer::MatMut;
use num_traits::Float;

/// G = [[c, s], [−s, c]] with G·[a; b] = [r; 0].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GivensRotation<T> {
    c: T,
    s: T,
}

impl<T: Float> GivensRotation<T> {
    /// Rotation zeroing `b` against `a`. `b == 0` gives the identity.
    pub fn new(a: T, b: T) -> Self {
        if b == T::zero() {
            Self { c: T::one(), s: T::zero() }
        } else if b.abs() > a.abs() {
            let t = a / b;
            let s = T::one() / (T::one() + t * t).sqrt();
            Self { c: s * t, s }
        } else {
            let t = b / a;
            let c = T::one() / (T::one() + t * t).sqrt();
            Self { c, s: c * t }
        }
    }

    pub fn identity() -> Self {
        Self { c: T::one(), s: T::zero() }
    }

    pub fn c(&self) -> T {
        self.c
    }

    pub fn s(&self) -> T {
        self.s
    }

    /// [x; y] ← G·[x; y].
    #[inline]
    pub fn apply(&self, x: &mut T, y: &mut T) {
        let (a, b) = (*x, *y);
        *x = self.c * a + self.s * b;
        *y = self.c * b - self.s * a;
    }

    /// Rotates the two rows of a 2×m block: block ← G·block.
    pub fn apply_left(&self, mut block: MatMut<'_, T>) {
        assert_eq!(block.nrows(), 2, "rotation needs a two-row block");
        for j in 0..block.ncols() {
            let (mut x, mut y) = (block[(0, j)], block[(1, j)]);
            self.apply(&mut x, &mut y);
            block[(0, j)] = x;
            block[(1, j)] = y;
        }
    }

    /// Rotates the two columns of an m×2 block: block ← block·Gᵗ.
    pub fn apply_right(&self, mut block: MatMut<'_, T>) {
        assert_eq!(block.ncols(), 2, "rotation needs a two-column block");
        for i in 0..block.nrows() {
            let (mut x, mut y) = (block[(i, 0)], block[(i, 1)]);
            self.apply(&mut x, &mut y);
            block[(i, 0)] = x;
            block[(i, 1)] = y;
        }
    }
}

impl<T: Float> OrthogonalTransform<T> for GivensRotation<T> {
    fn width(&self) -> usize {
        2
    }
    fn apply_left(&self, block: MatMut<'_, T>) {
        GivensRotation::apply_left(self, block);
    }
    fn apply_right(&self, block: MatMut<'_, T>) {
        GivensRotation::apply_right(self, block);
    }
}
