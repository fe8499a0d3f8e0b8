//! Common test utilities
#![allow(dead_code)]

use eigs::algorithm::linalg::{EigenPair, EigenResult};
use eigs::dtype::{Complex128, Scalar};

/// Assert two f64 slices are close within tolerance
///
/// Uses the formula: |a - b| <= atol + rtol * |b|
pub fn assert_allclose_f64(a: &[f64], b: &[f64], rtol: f64, atol: f64, msg: &str) {
    assert_eq!(a.len(), b.len(), "{}: length mismatch", msg);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        let diff = (x - y).abs();
        let tol = atol + rtol * y.abs();
        assert!(
            diff <= tol,
            "{}: element {} differs: {} vs {} (diff={}, tol={})",
            msg,
            i,
            x,
            y,
            diff,
            tol
        );
    }
}

/// Real parts of a result's eigenvalues
pub fn real_values(result: &EigenResult) -> Vec<f64> {
    result.values.as_slice().iter().map(Scalar::re).collect()
}

/// Complex eigenvalues of a result
pub fn complex_values(result: &EigenResult) -> Vec<Complex128> {
    result.values.as_slice().iter().map(Scalar::as_complex).collect()
}

/// Eigenvector of a pair as complex numbers
pub fn complex_vector(pair: &EigenPair) -> Vec<Complex128> {
    pair.vector.as_slice().iter().map(Scalar::as_complex).collect()
}

/// Eigenvector of a pair as real numbers
pub fn real_vector(pair: &EigenPair) -> Vec<f64> {
    pair.vector.as_slice().iter().map(Scalar::re).collect()
}

/// Row-major matrix-vector product
pub fn matvec(a: &[Complex128], n: usize, v: &[Complex128]) -> Vec<Complex128> {
    (0..n)
        .map(|r| {
            let mut s = Complex128::ZERO;
            for c in 0..n {
                s += a[r * n + c] * v[c];
            }
            s
        })
        .collect()
}

/// Largest |A·v - λ·v| over all pairs
pub fn max_residual(a: &[Complex128], n: usize, pairs: &[EigenPair]) -> f64 {
    let mut worst = 0.0f64;
    for pair in pairs {
        let lambda = pair.value.as_complex();
        let v = complex_vector(pair);
        let av = matvec(a, n, &v);
        for (x, y) in av.iter().zip(v.iter()) {
            worst = worst.max((*x - lambda * *y).magnitude());
        }
    }
    worst
}

/// Hermitian inner product vᴴw
pub fn inner(v: &[Complex128], w: &[Complex128]) -> Complex128 {
    let mut s = Complex128::ZERO;
    for (a, b) in v.iter().zip(w.iter()) {
        s += a.conj() * *b;
    }
    s
}

/// Check that eigenvectors form an orthonormal set
pub fn assert_orthonormal(pairs: &[EigenPair], tol: f64, msg: &str) {
    let vectors: Vec<Vec<Complex128>> = pairs.iter().map(complex_vector).collect();
    for (i, v) in vectors.iter().enumerate() {
        for (j, w) in vectors.iter().enumerate() {
            let expected = if i == j { 1.0 } else { 0.0 };
            let actual = inner(v, w);
            assert!(
                (actual.re - expected).abs() <= tol && actual.im.abs() <= tol,
                "{}: <v{}, v{}> = {} (expected {})",
                msg,
                i,
                j,
                actual,
                expected
            );
        }
    }
}

/// Check eigenvalues ascend by magnitude
pub fn assert_magnitude_ascending(values: &[Scalar], msg: &str) {
    for i in 1..values.len() {
        let prev = values[i - 1].magnitude();
        let curr = values[i].magnitude();
        assert!(
            prev <= curr + 1e-12,
            "{}: |λ[{}]|={} should be <= |λ[{}]|={}",
            msg,
            i - 1,
            prev,
            i,
            curr
        );
    }
}

/// Real row-major matrix as complex entries
pub fn to_complex(a: &[f64]) -> Vec<Complex128> {
    a.iter().map(|&x| Complex128::new(x, 0.0)).collect()
}

/// Deterministic symmetric test matrix of order n
pub fn symmetric_matrix(n: usize) -> Vec<Vec<f64>> {
    let mut rows = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let v = ((i * 7 + j * 13) % 11) as f64 / 3.0 - 1.5 + if i == j { n as f64 } else { 0.0 };
            rows[i][j] = v;
            rows[j][i] = v;
        }
    }
    rows
}
