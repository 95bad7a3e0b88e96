//! Tests for the elementary transforms applied through block views.

use approx::assert_abs_diff_eq;
use faer::Mat;
use schur_qr::core::OrthogonalTransform;
use schur_qr::matrix::DenseMatrix;
use schur_qr::transform::{Band, GivensRotation, HouseholderReflector, similarity};

/// A reflector built from the zero vector leaves any block untouched.
#[test]
fn zero_vector_reflector_is_identity() {
    let h = HouseholderReflector::new(&[0.0f64; 3]);
    assert!(h.is_identity());
    let a = Mat::<f64>::from_fn(3, 4, |i, j| (i * 4 + j) as f64 - 5.5);
    let mut left = a.clone();
    h.reflect_left(left.as_mut());
    let mut right = a.transpose().to_owned();
    h.reflect_right(right.as_mut());
    for i in 0..3 {
        for j in 0..4 {
            assert_eq!(left[(i, j)], a[(i, j)]);
            assert_eq!(right[(j, i)], a[(i, j)]);
        }
    }
}

/// Reflecting a column of a larger matrix through a sub-view only touches
/// the viewed rows.
#[test]
fn reflector_on_submatrix_view() {
    let mut a = Mat::<f64>::from_rows(&[
        &[9.0, 9.0, 9.0],
        &[3.0, 1.0, 0.0],
        &[4.0, 2.0, 1.0],
        &[0.0, 5.0, 2.0],
    ]);
    let h = HouseholderReflector::new(&[3.0, 4.0, 0.0]);
    h.reflect_left(a.as_mut().submatrix_mut(1, 0, 3, 3));
    assert_eq!(a[(0, 0)], 9.0);
    assert_abs_diff_eq!(a[(1, 0)].abs(), 5.0, epsilon = 1e-14);
    assert_abs_diff_eq!(a[(2, 0)], 0.0, epsilon = 1e-14);
    assert_abs_diff_eq!(a[(3, 0)], 0.0, epsilon = 1e-14);
    assert_abs_diff_eq!(a[(1, 0)], h.head(), epsilon = 1e-14);
}

/// A banded similarity keeps the spectrum-defining identity A = U T Uᵗ.
#[test]
fn similarity_updates_both_buffers() {
    let a = Mat::<f64>::from_rows(&[&[1.0, 2.0, 0.5], &[2.0, -1.0, 3.0], &[0.5, 3.0, 2.0]]);
    let mut t = a.clone();
    let mut u = Mat::<f64>::identity_of(3);
    let g = GivensRotation::new(t[(1, 0)], t[(2, 0)]);
    assert_eq!(OrthogonalTransform::width(&g), 2);
    similarity(&g, t.as_mut(), u.as_mut(), Band { offset: 1, col_start: 0, row_end: 3 });
    assert_abs_diff_eq!(t[(2, 0)], 0.0, epsilon = 1e-15);

    let ut = &u * &t;
    let back = &ut * u.transpose();
    for i in 0..3 {
        for j in 0..3 {
            assert_abs_diff_eq!(back[(i, j)], a[(i, j)], epsilon = 1e-14);
        }
    }
}
