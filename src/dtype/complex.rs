//! Double-precision complex numbers for the general eigensolver
//!
//! The complex tag of a matrix entry, and the working type of the
//! Hessenberg/QR iteration for non-symmetric input.
//!
//! # Arithmetic Operations
//!
//! - Addition: `(a+bi) + (c+di) = (a+c) + (b+d)i`
//! - Multiplication: `(a+bi)(c+di) = (ac-bd) + (ad+bc)i`
//! - Division: `(a+bi)/(c+di) = (a+bi)*conj(c+di)/|c+di|²`
//!
//! # Examples
//!
//! ```
//! use eigs::dtype::Complex128;
//!
//! let z = Complex128::new(3.0, 4.0);
//! assert_eq!(z.magnitude(), 5.0);
//! assert_eq!(z.conj(), Complex128::new(3.0, -4.0));
//! ```

use std::fmt;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// 128-bit complex number with f64 real and imaginary parts
#[repr(C)]
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct Complex128 {
    /// Real part
    pub re: f64,
    /// Imaginary part
    pub im: f64,
}

impl Complex128 {
    /// Zero complex number
    pub const ZERO: Self = Self { re: 0.0, im: 0.0 };

    /// One (real unit)
    pub const ONE: Self = Self { re: 1.0, im: 0.0 };

    /// Imaginary unit i
    pub const I: Self = Self { re: 0.0, im: 1.0 };

    /// Create a new complex number
    #[inline]
    pub const fn new(re: f64, im: f64) -> Self {
        Self { re, im }
    }

    /// Magnitude (absolute value): |z| = sqrt(re² + im²), overflow-safe
    #[inline]
    pub fn magnitude(self) -> f64 {
        self.re.hypot(self.im)
    }

    /// Squared magnitude: |z|² = re² + im²
    #[inline]
    pub fn magnitude_squared(self) -> f64 {
        self.re * self.re + self.im * self.im
    }

    /// Phase angle (argument): atan2(im, re)
    #[inline]
    pub fn phase(self) -> f64 {
        self.im.atan2(self.re)
    }

    /// Complex conjugate: conj(a + bi) = a - bi
    #[inline]
    pub fn conj(self) -> Self {
        Self {
            re: self.re,
            im: -self.im,
        }
    }

    /// Multiply by a real factor
    #[inline]
    pub fn scale(self, k: f64) -> Self {
        Self {
            re: self.re * k,
            im: self.im * k,
        }
    }

    /// Square root using principal branch
    #[inline]
    pub fn sqrt(self) -> Self {
        let mag = self.magnitude();
        if mag == 0.0 {
            Self::ZERO
        } else {
            let re = ((mag + self.re) / 2.0).sqrt();
            let im = if self.im < 0.0 { -1.0 } else { 1.0 } * ((mag - self.re) / 2.0).sqrt();
            Self { re, im }
        }
    }

    /// True when both parts are finite
    #[inline]
    pub fn is_finite(self) -> bool {
        self.re.is_finite() && self.im.is_finite()
    }
}

impl Add for Complex128 {
    type Output = Self;

    #[inline]
    fn add(self, rhs: Self) -> Self {
        Self {
            re: self.re + rhs.re,
            im: self.im + rhs.im,
        }
    }
}

impl AddAssign for Complex128 {
    #[inline]
    fn add_assign(&mut self, rhs: Self) {
        self.re += rhs.re;
        self.im += rhs.im;
    }
}

impl Sub for Complex128 {
    type Output = Self;

    #[inline]
    fn sub(self, rhs: Self) -> Self {
        Self {
            re: self.re - rhs.re,
            im: self.im - rhs.im,
        }
    }
}

impl SubAssign for Complex128 {
    #[inline]
    fn sub_assign(&mut self, rhs: Self) {
        self.re -= rhs.re;
        self.im -= rhs.im;
    }
}

impl Mul for Complex128 {
    type Output = Self;

    /// Complex multiplication: (a+bi)(c+di) = (ac-bd) + (ad+bc)i
    #[inline]
    fn mul(self, rhs: Self) -> Self {
        Self {
            re: self.re * rhs.re - self.im * rhs.im,
            im: self.re * rhs.im + self.im * rhs.re,
        }
    }
}

impl Div for Complex128 {
    type Output = Self;

    /// Complex division: (a+bi)/(c+di) = (a+bi)*conj(c+di)/|c+di|²
    #[inline]
    fn div(self, rhs: Self) -> Self {
        let denom = rhs.magnitude_squared();
        if denom == 0.0 {
            Self {
                re: f64::NAN,
                im: f64::NAN,
            }
        } else {
            Self {
                re: (self.re * rhs.re + self.im * rhs.im) / denom,
                im: (self.im * rhs.re - self.re * rhs.im) / denom,
            }
        }
    }
}

impl Neg for Complex128 {
    type Output = Self;

    #[inline]
    fn neg(self) -> Self {
        Self {
            re: -self.re,
            im: -self.im,
        }
    }
}

impl fmt::Display for Complex128 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.im >= 0.0 {
            write!(f, "{}+{}i", self.re, self.im)
        } else {
            write!(f, "{}{}i", self.re, self.im)
        }
    }
}

impl From<f64> for Complex128 {
    #[inline]
    fn from(re: f64) -> Self {
        Self { re, im: 0.0 }
    }
}

impl From<(f64, f64)> for Complex128 {
    #[inline]
    fn from((re, im): (f64, f64)) -> Self {
        Self { re, im }
    }
}
