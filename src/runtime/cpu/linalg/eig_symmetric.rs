//! Eigendecomposition for real symmetric matrices using the Jacobi algorithm

use super::super::jacobi::{
    JacobiRotation, LinalgElement, apply_rotation_to_columns, apply_two_sided_rotation,
    argsort_by_magnitude_asc, identity_matrix, max_off_diagonal, permute_columns, permute_vector,
};
use crate::algorithm::linalg::{EigenPair, PartialEigen};
use crate::error::{Error, Result};

/// Number of classical Jacobi sweeps (N(N-1)/2 rotations each) allowed
/// before the solver reports non-convergence.
pub const JACOBI_SWEEPS: usize = 64;

/// Lower bound on the rotation budget for small matrices.
pub const MIN_ROTATIONS: usize = 1000;

/// Eigenvalues and optional eigenvector matrix of one typed decomposition.
///
/// `vectors` is row-major [n × n]; column `k` belongs to `values[k]`.
#[derive(Debug, Clone)]
pub struct EigenSystem<T> {
    /// Eigenvalues (diagonal of the converged matrix)
    pub values: Vec<T>,
    /// Accumulated rotations, if eigenvectors were requested
    pub vectors: Option<Vec<T>>,
    /// Rotations (or native iterations) performed
    pub iterations: usize,
}

impl<T: LinalgElement> EigenSystem<T> {
    /// Sort eigenvalues ascending by magnitude and permute the eigenvector
    /// columns identically. Ties keep their diagonal order.
    pub fn sorted_by_magnitude(self) -> Self {
        let n = self.values.len();
        let indices = argsort_by_magnitude_asc(&self.values);
        Self {
            values: permute_vector(&self.values, &indices),
            vectors: self.vectors.map(|v| permute_columns(&v, n, n, &indices)),
            iterations: self.iterations,
        }
    }

    /// Eigenvalues and `(value, column)` pairs as tagged scalars
    pub fn into_scalar_pairs(self) -> (Vec<crate::dtype::Scalar>, Option<Vec<EigenPair>>) {
        let n = self.values.len();
        let values: Vec<_> = self.values.iter().map(|v| v.into_scalar()).collect();
        let pairs = self.vectors.map(|v| {
            (0..n)
                .map(|k| EigenPair::array(values[k], (0..n).map(|r| v[r * n + k].into_scalar()).collect()))
                .collect()
        });
        (values, pairs)
    }
}

/// Rotation budget for an `n × n` matrix: `sweeps` full sweeps, at least
/// `min_rotations`
pub fn max_rotations(n: usize, sweeps: usize, min_rotations: usize) -> usize {
    (sweeps * n * n.saturating_sub(1) / 2).max(min_rotations)
}

/// Eigendecomposition of a real symmetric matrix using the Jacobi algorithm.
///
/// Consumes `work` (row-major [n × n]) and rotates it in place.
///
/// Algorithm: classical Jacobi eigenvalue method
/// 1. e0 = |precision / n| is the convergence threshold
/// 2. V = I_n if eigenvectors are requested
/// 3. REPEAT (at most `max_rotations` times):
///    - (i, j) = position of the largest |A[i,j]|, i < j
///    - If |A[i,j]| < e0: converged
///    - θ = π/4 if |A[j,j] - A[i,i]| ≤ rel_tol, else ½·atan(2A[i,j] / (A[j,j] - A[i,i]))
///    - A = Jᵀ A J (zeros A[i,j] and A[j,i]); V = V J
/// 4. eigenvalues = diag(A), eigenvectors = columns of V
/// 5. Sort eigenvalues ascending by magnitude, reorder eigenvector columns
///
/// Exhausting the budget returns [`Error::NoConvergence`] with the sorted
/// current diagonal and accumulator attached. A rotated entry leaving the
/// range of `T` returns [`Error::Overflow`].
pub fn diagonalize<T: LinalgElement>(
    mut work: Vec<T>,
    n: usize,
    precision: T,
    rel_tol: T,
    compute_vectors: bool,
    max_rotations: usize,
) -> Result<EigenSystem<T>> {
    debug_assert_eq!(work.len(), n * n);

    let mut v: Option<Vec<T>> = compute_vectors.then(|| identity_matrix(n));
    let e0 = precision.abs_val() / T::from_f64(n.max(1) as f64);
    let mut rotations = 0;

    if n >= 2 {
        loop {
            let (i, j, max_abs) = max_off_diagonal(&work, n);

            if max_abs < e0 || max_abs == T::zero() {
                break;
            }

            if rotations >= max_rotations {
                let system = finish(work, v, n, rotations).sorted_by_magnitude();
                let (values, eigenvectors) = system.into_scalar_pairs();
                return Err(Error::no_convergence(
                    n,
                    precision.to_f64(),
                    rotations,
                    PartialEigen {
                        values,
                        eigenvectors,
                    },
                ));
            }

            let rot = JacobiRotation::compute(work[i * n + i], work[j * n + j], work[i * n + j], rel_tol);
            if apply_two_sided_rotation(&mut work, n, i, j, &rot).is_none() {
                return Err(Error::overflow(T::KIND, "jacobi rotation"));
            }
            if let Some(v) = v.as_mut() {
                apply_rotation_to_columns(v, n, n, i, j, &rot);
            }
            rotations += 1;
        }
    }

    log::trace!("jacobi converged after {rotations} rotations (n = {n})");
    Ok(finish(work, v, n, rotations).sorted_by_magnitude())
}

fn finish<T: LinalgElement>(work: Vec<T>, vectors: Option<Vec<T>>, n: usize, iterations: usize) -> EigenSystem<T> {
    EigenSystem {
        values: (0..n).map(|i| work[i * n + i]).collect(),
        vectors,
        iterations,
    }
}
