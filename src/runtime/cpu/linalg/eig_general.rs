//! General eigendecomposition for non-symmetric and complex matrices

use super::schur::{SchurOutcome, schur_decompose, schur_decompose_bounded};
use crate::algorithm::linalg::{EigenPair, PartialEigen};
use crate::dtype::{Complex128, Decimal, Scalar, ScalarKind};
use rust_decimal::prelude::FromPrimitive;
use crate::error::{Error, Result};
use std::cmp::Ordering;

/// Eigenvalues and eigenpairs of a general matrix, sorted ascending by
/// magnitude.
///
/// `eigenvectors` holds one pair per independent eigenvector found; for a
/// defective matrix this is fewer than `values.len()`.
#[derive(Debug, Clone)]
pub struct GeneralEigenSystem {
    /// All n eigenvalues, repeated per algebraic multiplicity
    pub values: Vec<Scalar>,
    /// Unit-norm eigenpairs, if requested
    pub eigenvectors: Option<Vec<EigenPair>>,
    /// QR iterations performed
    pub iterations: usize,
}

/// General eigendecomposition of a row-major [n × n] complex buffer.
///
/// Uses the complex Schur decomposition `A = Z T Zᴴ` followed by eigenvector
/// extraction via back-substitution on `(T - λ_k I) y = 0` with `y_k = 1`.
///
/// `kind` is the tag of the input entries: for real kinds, values and
/// vectors whose imaginary parts are negligible come back in that tag;
/// genuine complex results are returned as [`Scalar::Complex`].
pub fn decompose_general(
    work: Vec<Complex128>,
    n: usize,
    precision: f64,
    kind: ScalarKind,
    compute_vectors: bool,
) -> Result<GeneralEigenSystem> {
    eigenpairs_from_schur(schur_decompose(work, n), n, precision, kind, compute_vectors)
}

/// Eigenpairs from a (possibly unconverged) Schur outcome.
///
/// An unconverged outcome still yields best-effort values and, if
/// requested, vectors back-substituted from the current upper triangle;
/// both travel in [`Error::NoConvergence`].
fn eigenpairs_from_schur(
    outcome: SchurOutcome,
    n: usize,
    precision: f64,
    kind: ScalarKind,
    compute_vectors: bool,
) -> Result<GeneralEigenSystem> {
    let SchurOutcome {
        t,
        z,
        iterations,
        converged,
    } = outcome;

    let lambdas: Vec<Complex128> = (0..n).map(|i| t[i * n + i]).collect();
    let norm = t.iter().map(|x| x.magnitude_squared()).sum::<f64>().sqrt();
    let tol = precision.max(f64::EPSILON * norm);
    let order = argsort_by_magnitude(&lambdas);
    let values = order
        .iter()
        .map(|&k| output_scalar(lambdas[k], kind, tol))
        .collect::<Result<Vec<_>>>()?;

    let eigenvectors = if compute_vectors {
        let mut pairs = Vec::with_capacity(n);
        for (pos, &k) in order.iter().enumerate() {
            if let Some(v) = schur_eigenvector(&t, &z, n, k, tol) {
                pairs.push(EigenPair::array(values[pos], output_vector(&v, kind, tol)?));
            }
        }
        Some(pairs)
    } else {
        None
    };

    if !converged {
        return Err(Error::no_convergence(
            n,
            precision,
            iterations,
            PartialEigen { values, eigenvectors },
        ));
    }

    if let Some(pairs) = &eigenvectors {
        if pairs.len() < n {
            log::debug!(
                "defective matrix: {} independent eigenvectors for n = {n}",
                pairs.len()
            );
        }
    }

    Ok(GeneralEigenSystem {
        values,
        eigenvectors,
        iterations,
    })
}

/// Eigenvector for `T[k][k]`, or `None` when `k` sits in a defective cluster.
///
/// Diagonal entries within `tol` of `λ_k` form a cluster; their component is
/// free (set to zero) only if the rest of the row already vanishes.
fn schur_eigenvector(
    t: &[Complex128],
    z: &[Complex128],
    n: usize,
    k: usize,
    tol: f64,
) -> Option<Vec<Complex128>> {
    let lambda = t[k * n + k];
    let mut y = vec![Complex128::ZERO; k + 1];
    y[k] = Complex128::ONE;

    for i in (0..k).rev() {
        let mut s = Complex128::ZERO;
        for j in (i + 1)..=k {
            s += t[i * n + j] * y[j];
        }
        let d = t[i * n + i] - lambda;
        if d.magnitude() <= tol {
            let scale = y[(i + 1)..=k]
                .iter()
                .map(|v| v.magnitude())
                .fold(1.0, f64::max);
            if s.magnitude() > tol * scale {
                return None;
            }
            y[i] = Complex128::ZERO;
        } else {
            y[i] = -(s / d);
        }
    }

    // v = Z y
    let mut v: Vec<Complex128> = (0..n)
        .map(|r| {
            let mut s = Complex128::ZERO;
            for (j, yj) in y.iter().enumerate() {
                s += z[r * n + j] * *yj;
            }
            s
        })
        .collect();

    let norm = v.iter().map(|x| x.magnitude_squared()).sum::<f64>().sqrt();
    if norm == 0.0 || !norm.is_finite() {
        return None;
    }

    // Unit norm, largest component real positive
    let mut pivot = 0;
    for (i, x) in v.iter().enumerate() {
        if x.magnitude() > v[pivot].magnitude() {
            pivot = i;
        }
    }
    let p = v[pivot];
    let rotate = p.conj().scale(1.0 / (p.magnitude() * norm));
    for x in v.iter_mut() {
        *x = *x * rotate;
    }
    v[pivot] = Complex128::new(v[pivot].re, 0.0);
    Some(v)
}

/// Stable ascending argsort by complex magnitude
fn argsort_by_magnitude(values: &[Complex128]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        values[a]
            .magnitude()
            .partial_cmp(&values[b].magnitude())
            .unwrap_or(Ordering::Equal)
    });
    indices
}

fn real_scalar(re: f64, kind: ScalarKind) -> Result<Scalar> {
    match kind {
        ScalarKind::Decimal => Decimal::from_f64(re)
            .map(Scalar::Decimal)
            .ok_or_else(|| Error::overflow(ScalarKind::Decimal, "eigenvalue conversion")),
        _ => Ok(Scalar::Float(re)),
    }
}

fn output_scalar(z: Complex128, kind: ScalarKind, tol: f64) -> Result<Scalar> {
    if kind.is_real() && z.im.abs() < tol {
        real_scalar(z.re, kind)
    } else {
        Ok(Scalar::Complex(z))
    }
}

fn output_vector(v: &[Complex128], kind: ScalarKind, tol: f64) -> Result<Vec<Scalar>> {
    if kind.is_real() && v.iter().all(|x| x.im.abs() < tol) {
        v.iter().map(|x| real_scalar(x.re, kind)).collect()
    } else {
        Ok(v.iter().map(|x| Scalar::Complex(*x)).collect())
    }
}
