//! Scalar type system for eigs
//!
//! This module provides the [`ScalarKind`] tag describing the three numeric
//! representations a matrix entry can take, the [`Scalar`] tagged value, and
//! the promotion rules used to coerce a matrix to one common representation.

pub mod complex;
mod element;
mod promotion;
mod scalar;

pub use complex::Complex128;
pub use element::Element;
pub use promotion::{is_lossy_mix, promote};
pub use rust_decimal::Decimal;
pub use scalar::{Scalar, ToScalar, Value};

use std::fmt;

/// Numeric representation of matrix entries
///
/// Within one decomposition every entry carries the same kind. Mixed input
/// is promoted to the dominant kind (see [`promote`]).
///
/// # Discriminant Values
///
/// The discriminants double as promotion priority:
/// Float=0 < Decimal=1 < Complex=2.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ScalarKind {
    /// 64-bit machine floating point
    Float = 0,
    /// Arbitrary-precision decimal (28 significant digits)
    Decimal = 1,
    /// Double-precision complex number
    Complex = 2,
}

impl ScalarKind {
    /// Returns true if entries of this kind carry an imaginary part
    #[inline]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex)
    }

    /// Returns true for the real kinds (float and decimal)
    #[inline]
    pub const fn is_real(self) -> bool {
        !self.is_complex()
    }

    /// Short name used in diagnostics
    pub const fn name(self) -> &'static str {
        match self {
            Self::Float => "float",
            Self::Decimal => "decimal",
            Self::Complex => "complex",
        }
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_ordering_is_priority() {
        assert!(ScalarKind::Float < ScalarKind::Decimal);
        assert!(ScalarKind::Decimal < ScalarKind::Complex);
        assert!(ScalarKind::Complex.is_complex());
        assert!(ScalarKind::Decimal.is_real());
        assert_eq!(ScalarKind::Decimal.to_string(), "decimal");
    }
}
