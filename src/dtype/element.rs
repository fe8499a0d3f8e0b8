//! Element trait for mapping Rust types to ScalarKind

use super::{Complex128, Decimal, Scalar, ScalarKind};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::fmt::Debug;
use std::ops::{Add, Div, Mul, Sub};

/// Trait for types a solver can run on
///
/// This trait connects Rust's type system to the runtime [`ScalarKind`] tag.
/// It's implemented for `f64`, [`Decimal`] and [`Complex128`].
///
/// # Bounds
/// - `Copy + Send + Sync + 'static` - working buffers are plain values
/// - `Add + Sub + Mul + Div` - Arithmetic operations (Output = Self)
pub trait Element:
    Copy
    + Debug
    + Send
    + Sync
    + 'static
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + PartialEq
{
    /// The corresponding kind for this Rust type
    const KIND: ScalarKind;

    /// Convert to f64 for diagnostics and mixed-kind comparisons
    ///
    /// # Complex Number Behavior
    ///
    /// For [`Complex128`] this returns the **magnitude** (|z|), not the real part.
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    ///
    /// Values a decimal cannot represent (NaN, infinities) map to zero.
    fn from_f64(v: f64) -> Self;

    /// Zero value
    fn zero() -> Self;

    /// One value
    fn one() -> Self;

    /// Wrap into the tagged [`Scalar`]
    fn into_scalar(self) -> Scalar;

    /// Unwrap a [`Scalar`] already coerced to this kind
    fn from_scalar(s: &Scalar) -> Option<Self>;
}

impl Element for f64 {
    const KIND: ScalarKind = ScalarKind::Float;

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }

    #[inline]
    fn zero() -> Self {
        0.0
    }

    #[inline]
    fn one() -> Self {
        1.0
    }

    #[inline]
    fn into_scalar(self) -> Scalar {
        Scalar::Float(self)
    }

    #[inline]
    fn from_scalar(s: &Scalar) -> Option<Self> {
        match s {
            Scalar::Float(v) => Some(*v),
            _ => None,
        }
    }
}

impl Element for Decimal {
    const KIND: ScalarKind = ScalarKind::Decimal;

    #[inline]
    fn to_f64(self) -> f64 {
        ToPrimitive::to_f64(&self).unwrap_or(f64::NAN)
    }

    /// Out-of-range values saturate to `Decimal::MAX` / `Decimal::MIN`;
    /// NaN maps to zero.
    #[inline]
    fn from_f64(v: f64) -> Self {
        <Decimal as FromPrimitive>::from_f64(v).unwrap_or(if v > 0.0 {
            Decimal::MAX
        } else if v < 0.0 {
            Decimal::MIN
        } else {
            Decimal::ZERO
        })
    }

    #[inline]
    fn zero() -> Self {
        Decimal::ZERO
    }

    #[inline]
    fn one() -> Self {
        Decimal::ONE
    }

    #[inline]
    fn into_scalar(self) -> Scalar {
        Scalar::Decimal(self)
    }

    #[inline]
    fn from_scalar(s: &Scalar) -> Option<Self> {
        match s {
            Scalar::Decimal(v) => Some(*v),
            _ => None,
        }
    }
}

impl Element for Complex128 {
    const KIND: ScalarKind = ScalarKind::Complex;

    #[inline]
    fn to_f64(self) -> f64 {
        self.magnitude()
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        Complex128::new(v, 0.0)
    }

    #[inline]
    fn zero() -> Self {
        Complex128::ZERO
    }

    #[inline]
    fn one() -> Self {
        Complex128::ONE
    }

    #[inline]
    fn into_scalar(self) -> Scalar {
        Scalar::Complex(self)
    }

    #[inline]
    fn from_scalar(s: &Scalar) -> Option<Self> {
        match s {
            Scalar::Complex(v) => Some(*v),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kinds() {
        assert_eq!(<f64 as Element>::KIND, ScalarKind::Float);
        assert_eq!(<Decimal as Element>::KIND, ScalarKind::Decimal);
        assert_eq!(<Complex128 as Element>::KIND, ScalarKind::Complex);
    }

    #[test]
    fn test_decimal_from_f64() {
        let d = <Decimal as Element>::from_f64(0.25);
        assert_eq!(d, Decimal::new(25, 2));
        assert_eq!(<Decimal as Element>::from_f64(f64::NAN), Decimal::ZERO);
        assert_eq!(Element::to_f64(Decimal::new(-15, 1)), -1.5);
    }

    #[test]
    fn test_decimal_from_f64_saturates() {
        assert_eq!(<Decimal as Element>::from_f64(1e30), Decimal::MAX);
        assert_eq!(<Decimal as Element>::from_f64(-1e30), Decimal::MIN);
        assert_eq!(<Decimal as Element>::from_f64(f64::INFINITY), Decimal::MAX);
    }

    #[test]
    fn test_complex_to_f64_is_magnitude() {
        assert_eq!(Element::to_f64(Complex128::new(3.0, -4.0)), 5.0);
    }

    #[test]
    fn test_scalar_round_trip_requires_matching_kind() {
        let s = 2.0f64.into_scalar();
        assert_eq!(<f64 as Element>::from_scalar(&s), Some(2.0));
        assert_eq!(<Decimal as Element>::from_scalar(&s), None);
    }
}
