//! Tests for the symmetric tridiagonal path: reduction of a symmetric matrix,
//! the implicit QR iteration, and agreement with the Schur decomposition.

use approx::assert_abs_diff_eq;
use faer::Mat;
use rand::Rng;
use schur_qr::decomposition::{SchurDecomposition, SymmetricTridiagonalQr, TridiagonalSymmetric};
use schur_qr::matrix::DenseMatrix;

fn random_symmetric(n: usize) -> Mat<f64> {
    let mut rng = rand::thread_rng();
    let vals: Vec<f64> = (0..n * n).map(|_| rng.gen_range(-1.0..1.0)).collect();
    Mat::from_fn(n, n, |i, j| vals[i.max(j) * n + i.min(j)])
}

/// Random symmetric matrices: A v = λ v for every returned pair, and the
/// eigenvectors are orthonormal.
#[test]
fn eigenpairs_of_random_symmetric_matrices() {
    let solver = SymmetricTridiagonalQr::new(f64::EPSILON, 30 * 12).unwrap();
    for &n in &[2usize, 4, 7, 12] {
        let a = random_symmetric(n);
        let mut v = Mat::<f64>::identity_of(1);
        let (values, _) = solver.eigen(a.as_ref(), &mut v).unwrap();
        assert_eq!(values.len(), n);
        assert!(values.windows(2).all(|w| w[0] <= w[1]));

        let av = &a * &v;
        for k in 0..n {
            for i in 0..n {
                assert_abs_diff_eq!(av[(i, k)], values[k] * v[(i, k)], epsilon = 1e-10);
            }
        }
        let vtv = v.transpose() * &v;
        for i in 0..n {
            for j in 0..n {
                assert_abs_diff_eq!(vtv[(i, j)], if i == j { 1.0 } else { 0.0 }, epsilon = 1e-12);
            }
        }
    }
}

/// Only the lower triangle of the input is read.
#[test]
fn upper_triangle_is_ignored() {
    let lower = Mat::<f64>::from_rows(&[&[2.0, 99.0, -7.0], &[1.0, 3.0, 42.0], &[0.5, -1.0, 1.0]]);
    let sym = Mat::<f64>::from_rows(&[&[2.0, 1.0, 0.5], &[1.0, 3.0, -1.0], &[0.5, -1.0, 1.0]]);
    let mut u1 = Mat::<f64>::identity_of(1);
    let mut u2 = Mat::<f64>::identity_of(1);
    let t1 = TridiagonalSymmetric::from_symmetric(lower.as_ref(), &mut u1).unwrap();
    let t2 = TridiagonalSymmetric::from_symmetric(sym.as_ref(), &mut u2).unwrap();
    assert_eq!(t1, t2);
}

/// The symmetric path and the general Schur path agree on the spectrum.
#[test]
fn agrees_with_schur_diagonal() {
    let a = Mat::<f64>::from_rows(&[
        &[4.0, 1.0, -2.0, 2.0],
        &[1.0, 2.0, 0.0, 1.0],
        &[-2.0, 0.0, 3.0, -2.0],
        &[2.0, 1.0, -2.0, -1.0],
    ]);
    let mut v = Mat::<f64>::identity_of(1);
    let (values, _) = SymmetricTridiagonalQr::new(f64::EPSILON, 100)
        .unwrap()
        .eigen(a.as_ref(), &mut v)
        .unwrap();

    let (t, _, _) = SchurDecomposition::new(f64::EPSILON).unwrap().compute(a.as_ref()).unwrap();
    let mut diag: Vec<f64> = (0..4).map(|i| t[(i, i)]).collect();
    diag.sort_by(|x, y| x.partial_cmp(y).unwrap());
    for i in 1..4 {
        assert_eq!(t[(i, i - 1)], 0.0);
    }
    for (x, y) in values.iter().zip(&diag) {
        assert_abs_diff_eq!(*x, *y, epsilon = 1e-11);
    }
}

#[test]
fn one_by_one_is_rejected() {
    let a = Mat::<f64>::from_rows(&[&[5.0]]);
    let mut v = Mat::<f64>::identity_of(1);
    let solver = SymmetricTridiagonalQr::new(f64::EPSILON, 10).unwrap();
    assert!(solver.eigen(a.as_ref(), &mut v).is_err());
}
