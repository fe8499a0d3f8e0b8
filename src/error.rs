//! Error types for eigs

use crate::algorithm::linalg::PartialEigen;
use crate::dtype::ScalarKind;
use thiserror::Error;

/// Result type alias using eigs' Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur during a decomposition
#[derive(Error, Debug)]
pub enum Error {
    /// Input is not a two-dimensional square matrix
    #[error("Matrix must be square (size: {shape:?})")]
    NotSquare {
        /// Actual shape of the input
        shape: Vec<usize>,
    },

    /// A matrix entry is not a float, decimal or complex number
    #[error("Unsupported type in matrix: {type_name} at [{row}, {col}]")]
    UnsupportedType {
        /// Name of the offending element type
        type_name: &'static str,
        /// Row of the offending entry
        row: usize,
        /// Column of the offending entry
        col: usize,
    },

    /// Invalid argument provided to an operation
    #[error("Invalid argument '{arg}': {reason}")]
    InvalidArgument {
        /// The argument name
        arg: &'static str,
        /// Reason for invalidity
        reason: String,
    },

    /// The iteration bound was exhausted before the off-diagonal threshold was met.
    ///
    /// The best-effort result found so far is attached; see [`Error::partial`].
    #[error(
        "Eigenvalue iteration did not converge for {n}x{n} matrix \
         (precision {precision:e}, {iterations} iterations)"
    )]
    NoConvergence {
        /// Matrix order
        n: usize,
        /// Precision the call attempted to reach
        precision: f64,
        /// Iterations performed before giving up
        iterations: usize,
        /// Current diagonal / accumulator at the time of failure
        partial: Box<PartialEigen>,
    },

    /// A value left the range of the working scalar type
    #[error("{kind} overflow during {operation}")]
    Overflow {
        /// Scalar kind whose range was exceeded
        kind: ScalarKind,
        /// Step that produced the value
        operation: &'static str,
    },

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// Native acceleration module failure. Never returned by `decompose`:
    /// the adapter falls back to the pure algorithm instead.
    #[error("Native module error: {0}")]
    Native(String),
}

impl Error {
    /// Create a not-square error
    pub fn not_square(shape: &[usize]) -> Self {
        Self::NotSquare {
            shape: shape.to_vec(),
        }
    }

    /// Create an invalid argument error
    pub fn invalid_argument(arg: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            arg,
            reason: reason.into(),
        }
    }

    /// Create a convergence error carrying a partial result
    pub fn no_convergence(n: usize, precision: f64, iterations: usize, partial: PartialEigen) -> Self {
        Self::NoConvergence {
            n,
            precision,
            iterations,
            partial: Box::new(partial),
        }
    }

    /// Create an overflow error
    pub fn overflow(kind: ScalarKind, operation: &'static str) -> Self {
        Self::Overflow { kind, operation }
    }

    /// Best-effort result attached to a convergence failure
    pub fn partial(&self) -> Option<&PartialEigen> {
        match self {
            Self::NoConvergence { partial, .. } => Some(partial),
            _ => None,
        }
    }
}
