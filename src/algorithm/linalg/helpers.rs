//! Helper functions for the eigendecomposition entry points
//!
//! Validation utilities shared by the dispatcher and the solver client.

use crate::dtype::{Scalar, ToScalar};
use crate::error::{Error, Result};
use crate::matrix::Matrix;

/// Validate matrix is 2D and square, returning its order
pub fn validate_square_matrix(shape: &[usize]) -> Result<usize> {
    match shape {
        [rows, cols] if rows == cols => Ok(*rows),
        _ => Err(Error::not_square(shape)),
    }
}

/// Convert every entry to a [`Scalar`].
///
/// Unsupported entries are reported with their position in the 2-D layout.
pub fn to_scalar_entries<T: ToScalar>(matrix: &Matrix<T>) -> Result<Vec<Scalar>> {
    let cols = matrix.shape().get(1).copied().unwrap_or(1).max(1);
    matrix
        .as_slice()
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            entry.to_scalar().map_err(|type_name| Error::UnsupportedType {
                type_name,
                row: idx / cols,
                col: idx % cols,
            })
        })
        .collect()
}

/// Resolve the per-call precision.
///
/// Must be a real, non-NaN number; the sign is dropped. `None` falls back
/// to `default`.
pub fn resolve_precision(precision: Option<Scalar>, default: f64) -> Result<Scalar> {
    let precision = precision.unwrap_or(Scalar::Float(default));
    match precision {
        Scalar::Complex(_) => Err(Error::invalid_argument(
            "precision",
            format!("must be a real number, got {precision}"),
        )),
        Scalar::Float(v) if v.is_nan() => Err(Error::invalid_argument("precision", "must not be NaN")),
        Scalar::Float(v) => Ok(Scalar::Float(v.abs())),
        Scalar::Decimal(d) => Ok(Scalar::Decimal(d.abs())),
    }
}
