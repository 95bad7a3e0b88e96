//! Householder reflectors H = I − β v vᵗ.
//!
//! A reflector is built from one vector `x` and maps it onto the first
//! coordinate axis: H x = −sign(x₀)‖x‖ e₁. When every entry after the first
//! is exactly zero (no tolerance is applied) the reflector is the identity
//! with β = 0. The reflection vector is stored with its leading entry
//! normalized to one. Storage is generic so that the bulge chase can keep
//! its 2- and 3-element reflectors on the stack while the Hessenberg
//! reduction uses heap vectors of arbitrary length.
//!
//! # References
//! - Golub, G. H. & Van Loan, C. F. (2013). Matrix Computations, 4th ed., §5.1.2.

use crate::core::traits::OrthogonalTransform;
use faer::MatMut;
use num_traits::Float;

/// Elementary reflector built from one input vector.
#[derive(Clone, Debug)]
pub struct HouseholderReflector<T, S = Vec<T>> {
    /// Reflection vector, `v[0] == 1`.
    v: S,
    beta: T,
    /// First entry of H x.
    head: T,
}

impl<T: Float> HouseholderReflector<T, Vec<T>> {
    /// Build the reflector for `x` (any length ≥ 1).
    pub fn new(x: &[T]) -> Self {
        let mut v = x.to_vec();
        let (beta, head) = make_reflector(&mut v);
        Self { v, beta, head }
    }
}

impl<T: Float, const N: usize> HouseholderReflector<T, [T; N]> {
    /// Build the reflector for a fixed-size vector without allocating.
    pub fn from_array(x: [T; N]) -> Self {
        let mut v = x;
        let (beta, head) = make_reflector(&mut v);
        Self { v, beta, head }
    }
}

/// Overwrites `x` with the reflection vector and returns `(beta, head)`.
fn make_reflector<T: Float>(x: &mut [T]) -> (T, T) {
    assert!(!x.is_empty(), "cannot build a reflector from an empty vector");
    let alpha = x[0];
    if x[1..].iter().all(|&xi| xi == T::zero()) {
        // already on the axis (or zero): identity
        x[0] = T::one();
        return (T::zero(), alpha);
    }

    let scale = x.iter().fold(T::zero(), |m, &xi| m.max(xi.abs()));
    let norm = scale
        * x.iter()
            .fold(T::zero(), |acc, &xi| {
                let s = xi / scale;
                acc + s * s
            })
            .sqrt();
    let head = if alpha >= T::zero() { -norm } else { norm };
    let v0 = alpha - head;

    x[0] = T::one();
    for xi in x[1..].iter_mut() {
        *xi = *xi / v0;
    }
    (-v0 / head, head)
}

impl<T: Float, S: AsRef<[T]>> HouseholderReflector<T, S> {
    /// Reflection vector with unit leading entry.
    pub fn vector(&self) -> &[T] {
        self.v.as_ref()
    }

    pub fn beta(&self) -> T {
        self.beta
    }

    /// The value H x takes in its first entry; all others are zero.
    pub fn head(&self) -> T {
        self.head
    }

    pub fn is_identity(&self) -> bool {
        self.beta == T::zero()
    }

    /// block ← H · block.
    ///
    /// # Panics
    /// Panics if `block.nrows()` differs from the reflector length.
    pub fn reflect_left(&self, mut block: MatMut<'_, T>) {
        let v = self.v.as_ref();
        assert_eq!(block.nrows(), v.len(), "block has incorrect row count");
        if self.is_identity() {
            return;
        }
        for j in 0..block.ncols() {
            let mut dot = T::zero();
            for (i, &vi) in v.iter().enumerate() {
                dot = dot + vi * block[(i, j)];
            }
            let f = self.beta * dot;
            for (i, &vi) in v.iter().enumerate() {
                block[(i, j)] = block[(i, j)] - f * vi;
            }
        }
    }

    /// block ← block · H.
    ///
    /// # Panics
    /// Panics if `block.ncols()` differs from the reflector length.
    pub fn reflect_right(&self, mut block: MatMut<'_, T>) {
        let v = self.v.as_ref();
        assert_eq!(block.ncols(), v.len(), "block has incorrect column count");
        if self.is_identity() {
            return;
        }
        for i in 0..block.nrows() {
            let mut dot = T::zero();
            for (j, &vj) in v.iter().enumerate() {
                dot = dot + block[(i, j)] * vj;
            }
            let f = self.beta * dot;
            for (j, &vj) in v.iter().enumerate() {
                block[(i, j)] = block[(i, j)] - f * vj;
            }
        }
    }
}

/// H is symmetric, so the right action block · Hᵗ is `reflect_right`.
impl<T: Float, S: AsRef<[T]>> OrthogonalTransform<T> for HouseholderReflector<T, S> {
    fn width(&self) -> usize {
        self.v.as_ref().len()
    }
    fn apply_left(&self, block: MatMut<'_, T>) {
        self.reflect_left(block);
    }
    fn apply_right(&self, block: MatMut<'_, T>) {
        self.reflect_right(block);
    }
}
