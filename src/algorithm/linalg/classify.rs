//! Scalar type classification of matrix entries
//!
//! Decides whether a matrix is effectively real and effectively symmetric
//! within a precision, and coerces entries to one common [`ScalarKind`].

use crate::dtype::{Scalar, ScalarKind, is_lossy_mix, promote};
use crate::error::Result;

/// True if every entry's imaginary part is below `precision` in magnitude
pub fn is_real(entries: &[Scalar], precision: &Scalar) -> bool {
    entries
        .iter()
        .all(|e| !e.kind().is_complex() || Scalar::Float(e.im()).is_below(precision))
}

/// Drop the imaginary part of every complex entry
pub fn strip_imaginary(entries: Vec<Scalar>) -> Vec<Scalar> {
    entries.into_iter().map(Scalar::strip_imaginary).collect()
}

/// True if `|A[i][j] - A[j][i]| < precision` for every off-diagonal pair.
///
/// The difference is taken in decimal arithmetic when either entry is a
/// decimal.
pub fn is_symmetric(entries: &[Scalar], n: usize, precision: &Scalar) -> bool {
    (0..n).all(|i| {
        ((i + 1)..n).all(|j| {
            entries[i * n + j]
                .abs_diff(&entries[j * n + i])
                .is_below(precision)
        })
    })
}

/// Dominant kind of the entries (complex > decimal > float)
pub fn dominant_kind(entries: &[Scalar]) -> ScalarKind {
    entries
        .iter()
        .map(Scalar::kind)
        .fold(ScalarKind::Float, promote)
}

/// Coerce every entry to the dominant kind.
///
/// Mixing decimals with complex entries loses decimal precision; this is
/// allowed but logged.
pub fn coerce_types(entries: Vec<Scalar>) -> Result<(Vec<Scalar>, ScalarKind)> {
    let has_decimal = entries.iter().any(|e| e.kind() == ScalarKind::Decimal);
    let has_complex = entries.iter().any(|e| e.kind().is_complex());
    if is_lossy_mix(has_decimal, has_complex) {
        log::warn!("complex entries force decimal entries to double precision; decimal precision is lost");
    }

    let kind = dominant_kind(&entries);
    let coerced = entries
        .into_iter()
        .map(|e| e.coerce(kind))
        .collect::<Result<Vec<_>>>()?;
    Ok((coerced, kind))
}
