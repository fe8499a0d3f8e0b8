//! Decomposition result types
//!
//! This module contains the result structures returned by the eigensolvers
//! and the dispatcher: [`EigenResult`], its [`EigenPair`] entries and the
//! best-effort [`PartialEigen`] attached to convergence failures.

use crate::dtype::Scalar;
use crate::matrix::Matrix;

/// Ordered sequence of scalars in the caller's preferred container shape
#[derive(Clone, Debug, PartialEq)]
pub enum Collection {
    /// Plain vector
    Array(Vec<Scalar>),
    /// 1-D [`Matrix`] container
    Matrix(Matrix<Scalar>),
}

impl Collection {
    /// Entries in order
    pub fn as_slice(&self) -> &[Scalar] {
        match self {
            Self::Array(v) => v,
            Self::Matrix(m) => m.as_slice(),
        }
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.as_slice().len()
    }

    /// True if there are no entries
    pub fn is_empty(&self) -> bool {
        self.as_slice().is_empty()
    }

    /// True if wrapped in a [`Matrix`] container
    pub fn is_matrix(&self) -> bool {
        matches!(self, Self::Matrix(_))
    }

    /// Owned copy of the entries
    pub fn to_vec(&self) -> Vec<Scalar> {
        self.as_slice().to_vec()
    }

    /// Wrap `values` as a 1-D matrix or a plain vector
    pub fn wrap(values: Vec<Scalar>, matricize: bool) -> Self {
        if matricize {
            Self::Matrix(Matrix::vector(values))
        } else {
            Self::Array(values)
        }
    }

    fn into_vec(self) -> Vec<Scalar> {
        match self {
            Self::Array(v) => v,
            Self::Matrix(m) => m.into_vec(),
        }
    }
}

/// One eigenvalue and a unit-norm eigenvector belonging to it
#[derive(Clone, Debug, PartialEq)]
pub struct EigenPair {
    /// Eigenvalue λ
    pub value: Scalar,
    /// Eigenvector v with A·v ≈ λ·v
    pub vector: Collection,
}

impl EigenPair {
    /// Pair with the vector held as a plain array
    pub fn array(value: Scalar, vector: Vec<Scalar>) -> Self {
        Self {
            value,
            vector: Collection::Array(vector),
        }
    }
}

/// Eigendecomposition result: A·vₖ = λₖ·vₖ
///
/// - `values` has exactly n entries, each eigenvalue repeated per its
///   algebraic multiplicity, ascending by magnitude (ties keep the order in
///   which the solver found them)
/// - `eigenvectors` follows the same order. It has n pairs for
///   diagonalizable input and one pair per independent eigenvector for
///   defective input; symmetric input always yields an orthonormal set
#[derive(Clone, Debug, PartialEq)]
pub struct EigenResult {
    /// Eigenvalues λ
    pub values: Collection,
    /// Eigenpairs, or `None` if eigenvectors were not requested
    pub eigenvectors: Option<Vec<EigenPair>>,
}

impl EigenResult {
    /// Build a result from sorted values and pairs, wrapping every
    /// sequence as a 1-D matrix when `matricize` is set.
    pub fn assemble(values: Vec<Scalar>, eigenvectors: Option<Vec<EigenPair>>, matricize: bool) -> Self {
        let eigenvectors = eigenvectors.map(|pairs| {
            pairs
                .into_iter()
                .map(|pair| EigenPair {
                    value: pair.value,
                    vector: Collection::wrap(pair.vector.into_vec(), matricize),
                })
                .collect()
        });
        Self {
            values: Collection::wrap(values, matricize),
            eigenvectors,
        }
    }

    /// Empty result for a 0×0 input
    pub fn empty(compute_vectors: bool, matricize: bool) -> Self {
        Self::assemble(Vec::new(), compute_vectors.then(Vec::new), matricize)
    }
}

/// Best-effort state of a decomposition that ran out of iterations
#[derive(Clone, Debug, PartialEq)]
pub struct PartialEigen {
    /// Current diagonal, sorted like a converged result
    pub values: Vec<Scalar>,
    /// Current accumulator columns, if eigenvectors were requested
    pub eigenvectors: Option<Vec<EigenPair>>,
}
