//! Tagged scalar values and input coercion

use super::{Complex128, Decimal, ScalarKind};
use crate::error::{Error, Result};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use std::cmp::Ordering;
use std::fmt;

/// A matrix entry after coercion: float, decimal or complex
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Scalar {
    /// Machine floating point
    Float(f64),
    /// Arbitrary-precision decimal
    Decimal(Decimal),
    /// Double-precision complex
    Complex(Complex128),
}

impl Scalar {
    /// The representation tag of this value
    #[inline]
    pub fn kind(&self) -> ScalarKind {
        match self {
            Self::Float(_) => ScalarKind::Float,
            Self::Decimal(_) => ScalarKind::Decimal,
            Self::Complex(_) => ScalarKind::Complex,
        }
    }

    /// Real part as f64 (decimals are rounded)
    pub fn re(&self) -> f64 {
        match self {
            Self::Float(v) => *v,
            Self::Decimal(d) => d.to_f64().unwrap_or(f64::NAN),
            Self::Complex(c) => c.re,
        }
    }

    /// Imaginary part as f64 (zero for real kinds)
    #[inline]
    pub fn im(&self) -> f64 {
        match self {
            Self::Complex(c) => c.im,
            _ => 0.0,
        }
    }

    /// Magnitude as f64
    pub fn magnitude(&self) -> f64 {
        match self {
            Self::Float(v) => v.abs(),
            Self::Decimal(d) => d.abs().to_f64().unwrap_or(f64::NAN),
            Self::Complex(c) => c.magnitude(),
        }
    }

    /// Value as a complex number (decimals are rounded)
    #[inline]
    pub fn as_complex(&self) -> Complex128 {
        match self {
            Self::Complex(c) => *c,
            other => Complex128::new(other.re(), 0.0),
        }
    }

    /// Decimal value, if this entry is a decimal
    #[inline]
    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    /// Float value, if this entry is a float
    #[inline]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(v) => Some(*v),
            _ => None,
        }
    }

    /// Drop the imaginary part of a complex entry, keeping real kinds as they are
    pub fn strip_imaginary(self) -> Self {
        match self {
            Self::Complex(c) => Self::Float(c.re),
            other => other,
        }
    }

    /// Convert this value to `kind`.
    ///
    /// Only widening conversions are allowed: float → decimal → complex.
    pub fn coerce(self, kind: ScalarKind) -> Result<Self> {
        match (self, kind) {
            (s, k) if s.kind() == k => Ok(s),
            (Self::Float(v), ScalarKind::Decimal) => Decimal::from_f64(v)
                .map(Self::Decimal)
                .ok_or_else(|| {
                    Error::invalid_argument("matrix", format!("{v} cannot be represented as a decimal"))
                }),
            (s, ScalarKind::Complex) => Ok(Self::Complex(s.as_complex())),
            (s, k) => Err(Error::Internal(format!(
                "cannot narrow {} entry to {}",
                s.kind(),
                k
            ))),
        }
    }

    /// Absolute difference `|self - other|`.
    ///
    /// Computed in decimal arithmetic when both sides are real and at least
    /// one is a decimal, in complex arithmetic when either side is complex.
    pub fn abs_diff(&self, other: &Scalar) -> Scalar {
        match (self, other) {
            (Self::Float(a), Self::Float(b)) => Self::Float((a - b).abs()),
            (Self::Complex(_), _) | (_, Self::Complex(_)) => {
                Self::Float((self.as_complex() - other.as_complex()).magnitude())
            }
            _ => match (self.to_decimal(), other.to_decimal()) {
                (Some(a), Some(b)) => match a.checked_sub(b) {
                    Some(d) => Self::Decimal(d.abs()),
                    None => Self::Float(f64::INFINITY),
                },
                _ => Self::Float((self.re() - other.re()).abs()),
            },
        }
    }

    /// True when the magnitude of this value is strictly below `bound`.
    ///
    /// Uses decimal comparison when either side is a decimal.
    pub fn is_below(&self, bound: &Scalar) -> bool {
        match (self, bound) {
            (Self::Decimal(_), _) | (_, Self::Decimal(_)) if !self.kind().is_complex() => {
                match (self.to_decimal(), bound.to_decimal()) {
                    (Some(v), Some(b)) => v.abs() < b.abs(),
                    _ => self.magnitude() < bound.magnitude(),
                }
            }
            _ => self.magnitude() < bound.magnitude(),
        }
    }

    /// Compare magnitudes, exactly for decimal pairs.
    pub fn cmp_magnitude(&self, other: &Scalar) -> Ordering {
        match (self, other) {
            (Self::Decimal(a), Self::Decimal(b)) => a.abs().cmp(&b.abs()),
            _ => self
                .magnitude()
                .partial_cmp(&other.magnitude())
                .unwrap_or(Ordering::Equal),
        }
    }

    fn to_decimal(self) -> Option<Decimal> {
        match self {
            Self::Decimal(d) => Some(d),
            Self::Float(v) => Decimal::from_f64(v),
            Self::Complex(c) => Decimal::from_f64(c.re),
        }
    }
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Float(v) => write!(f, "{v}"),
            Self::Decimal(d) => write!(f, "{d}"),
            Self::Complex(c) => write!(f, "{c}"),
        }
    }
}

impl From<f64> for Scalar {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<Decimal> for Scalar {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<Complex128> for Scalar {
    fn from(v: Complex128) -> Self {
        Self::Complex(v)
    }
}

/// A dynamically typed matrix entry, as produced by parsers or mixed containers
#[derive(Clone, Debug, PartialEq)]
pub enum Value {
    /// Machine number
    Number(f64),
    /// Decimal number
    Decimal(Decimal),
    /// Complex number
    Complex(Complex128),
    /// Boolean (not a supported entry)
    Boolean(bool),
    /// Text (not a supported entry)
    Text(String),
}

impl Value {
    /// Name of the entry's type, as reported in errors
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::Decimal(_) => "decimal",
            Self::Complex(_) => "complex",
            Self::Boolean(_) => "boolean",
            Self::Text(_) => "string",
        }
    }
}

/// Conversion of container elements into [`Scalar`] entries
///
/// `Err` carries the element's type name for [`Error::UnsupportedType`].
pub trait ToScalar {
    /// Convert into a scalar, or report the unsupported type name
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str>;
}

impl ToScalar for Scalar {
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str> {
        Ok(*self)
    }
}

impl ToScalar for f64 {
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str> {
        Ok(Scalar::Float(*self))
    }
}

impl ToScalar for f32 {
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str> {
        Ok(Scalar::Float(*self as f64))
    }
}

impl ToScalar for i32 {
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str> {
        Ok(Scalar::Float(*self as f64))
    }
}

impl ToScalar for i64 {
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str> {
        Ok(Scalar::Float(*self as f64))
    }
}

impl ToScalar for Decimal {
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str> {
        Ok(Scalar::Decimal(*self))
    }
}

impl ToScalar for Complex128 {
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str> {
        Ok(Scalar::Complex(*self))
    }
}

impl ToScalar for Value {
    fn to_scalar(&self) -> std::result::Result<Scalar, &'static str> {
        match self {
            Self::Number(v) => Ok(Scalar::Float(*v)),
            Self::Decimal(d) => Ok(Scalar::Decimal(*d)),
            Self::Complex(c) => Ok(Scalar::Complex(*c)),
            other => Err(other.type_name()),
        }
    }
}
