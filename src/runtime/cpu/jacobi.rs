//! Jacobi rotation utilities for the symmetric eigensolver
//!
//! This module contains the rotation angle computation and the in-place
//! matrix updates of the classical Jacobi eigenvalue method. Everything is
//! generic over [`LinalgElement`] so the same code runs on `f64` and on
//! `Decimal` without round-tripping the decimal path through floats.

use crate::dtype::{Decimal, Element};
use rust_decimal::MathematicalOps;
use std::cmp::Ordering;

/// Trait for real elements that support the Jacobi method.
///
/// This trait extends `Element` with the transcendental operations the
/// rotation needs. Methods like `zero()`, `one()`, `to_f64()`, and
/// `from_f64()` are inherited from `Element`.
pub trait LinalgElement: Element + PartialOrd + Sized {
    /// Returns π/4
    fn quarter_pi() -> Self;
    /// Returns absolute value
    fn abs_val(&self) -> Self;
    /// Returns negation
    fn neg_val(&self) -> Self;
    /// Returns sine
    fn sin_val(&self) -> Self;
    /// Returns cosine
    fn cos_val(&self) -> Self;
    /// Returns arctangent
    fn atan_val(&self) -> Self;
    /// Addition that reports overflow instead of panicking
    fn checked_add_val(&self, rhs: Self) -> Option<Self>;
    /// Subtraction that reports overflow instead of panicking
    fn checked_sub_val(&self, rhs: Self) -> Option<Self>;
    /// Multiplication that reports overflow instead of panicking
    fn checked_mul_val(&self, rhs: Self) -> Option<Self>;
    /// Division that reports overflow instead of panicking
    fn checked_div_val(&self, rhs: Self) -> Option<Self>;
}

impl LinalgElement for f64 {
    #[inline]
    fn quarter_pi() -> Self {
        std::f64::consts::FRAC_PI_4
    }
    #[inline]
    fn abs_val(&self) -> Self {
        self.abs()
    }
    #[inline]
    fn neg_val(&self) -> Self {
        -*self
    }
    #[inline]
    fn sin_val(&self) -> Self {
        self.sin()
    }
    #[inline]
    fn cos_val(&self) -> Self {
        self.cos()
    }
    #[inline]
    fn atan_val(&self) -> Self {
        self.atan()
    }
    #[inline]
    fn checked_add_val(&self, rhs: Self) -> Option<Self> {
        let r = self + rhs;
        r.is_finite().then_some(r)
    }
    #[inline]
    fn checked_sub_val(&self, rhs: Self) -> Option<Self> {
        let r = self - rhs;
        r.is_finite().then_some(r)
    }
    #[inline]
    fn checked_mul_val(&self, rhs: Self) -> Option<Self> {
        let r = self * rhs;
        r.is_finite().then_some(r)
    }
    #[inline]
    fn checked_div_val(&self, rhs: Self) -> Option<Self> {
        let q = self / rhs;
        q.is_finite().then_some(q)
    }
}

impl LinalgElement for Decimal {
    #[inline]
    fn quarter_pi() -> Self {
        Decimal::PI / Decimal::from(4)
    }
    #[inline]
    fn abs_val(&self) -> Self {
        self.abs()
    }
    #[inline]
    fn neg_val(&self) -> Self {
        -*self
    }
    #[inline]
    fn sin_val(&self) -> Self {
        self.sin()
    }
    #[inline]
    fn cos_val(&self) -> Self {
        self.cos()
    }

    /// Arctangent seeded in f64 and refined by one Newton step in decimal
    /// arithmetic. `|x| > 1` uses `atan(x) = ±π/2 - atan(1/x)`.
    fn atan_val(&self) -> Self {
        let x = *self;
        if x.abs() > Decimal::ONE {
            let half_pi = Decimal::PI / Decimal::from(2);
            let inner = (Decimal::ONE / x).atan_val();
            return if x.is_sign_negative() {
                -half_pi - inner
            } else {
                half_pi - inner
            };
        }
        let seed = <Decimal as Element>::from_f64(Element::to_f64(x).atan());
        let (sin, cos) = (seed.sin(), seed.cos());
        // f(θ) = tan θ - x, θ' = θ - cos θ (sin θ - x cos θ)
        seed - cos * (sin - x * cos)
    }

    #[inline]
    fn checked_add_val(&self, rhs: Self) -> Option<Self> {
        self.checked_add(rhs)
    }
    #[inline]
    fn checked_sub_val(&self, rhs: Self) -> Option<Self> {
        self.checked_sub(rhs)
    }
    #[inline]
    fn checked_mul_val(&self, rhs: Self) -> Option<Self> {
        self.checked_mul(rhs)
    }
    #[inline]
    fn checked_div_val(&self, rhs: Self) -> Option<Self> {
        self.checked_div(rhs)
    }
}

/// Jacobi rotation parameters (cosine and sine of rotation angle).
///
/// These parameters define the plane rotation
/// ```text
/// J = [ c  s ]
///     [-s  c ]
/// ```
/// applied to rows/columns `i` and `j`.
#[derive(Debug, Clone, Copy)]
pub struct JacobiRotation<T> {
    /// Cosine of rotation angle
    pub c: T,
    /// Sine of rotation angle
    pub s: T,
}

impl<T: LinalgElement> JacobiRotation<T> {
    /// Rotation that annihilates `a_ij` in the 2×2 block
    /// `[[a_ii, a_ij], [a_ij, a_jj]]`.
    ///
    /// # Algorithm
    /// ```text
    /// θ = π/4                                 if |a_jj - a_ii| ≤ tol
    /// θ = ½ · atan(2·a_ij / (a_jj - a_ii))    otherwise
    /// c = cos θ, s = sin θ
    /// ```
    #[inline]
    pub fn compute(a_ii: T, a_jj: T, a_ij: T, tol: T) -> Self {
        Self::from_angle(rotation_angle(a_ii, a_jj, a_ij, tol))
    }

    /// Rotation parameters for angle `theta`
    #[inline]
    pub fn from_angle(theta: T) -> Self {
        Self {
            c: theta.cos_val(),
            s: theta.sin_val(),
        }
    }
}

/// Rotation angle θ zeroing `a_ij`.
///
/// The ratio is formed as `a_ij / ((a_jj - a_ii) / 2)` from halved
/// diagonals, which stays inside the element range for any finite input.
/// Falls back to ±π/4 when the ratio itself overflows.
pub fn rotation_angle<T: LinalgElement>(a_ii: T, a_jj: T, a_ij: T, tol: T) -> T {
    let half = T::one() / (T::one() + T::one());
    let half_denom = match (a_jj * half).checked_sub_val(a_ii * half) {
        Some(d) => d,
        // Opposite-sign diagonals at the edge of the range: the angle only
        // needs f64 accuracy here
        None => {
            let ratio = 2.0 * a_ij.to_f64() / (a_jj.to_f64() - a_ii.to_f64());
            return T::from_f64(0.5 * ratio.atan());
        }
    };
    if half_denom.abs_val() <= tol * half {
        return T::quarter_pi();
    }
    match a_ij.checked_div_val(half_denom) {
        Some(ratio) => half * ratio.atan_val(),
        None => {
            let q = T::quarter_pi();
            let negative = (a_ij < T::zero()) != (half_denom < T::zero());
            if negative { q.neg_val() } else { q }
        }
    }
}

/// Apply Jacobi rotation to two columns of a matrix.
///
/// Computes: `[col_i', col_j'] = [c·col_i - s·col_j, s·col_i + c·col_j]`
///
/// # Arguments
/// * `data` - Matrix data in row-major order [rows × cols]
/// * `rows` - Number of rows
/// * `cols` - Number of columns (stride)
/// * `i`, `j` - Column indices
/// * `rot` - Rotation parameters
#[inline]
pub fn apply_rotation_to_columns<T: LinalgElement>(
    data: &mut [T],
    rows: usize,
    cols: usize,
    i: usize,
    j: usize,
    rot: &JacobiRotation<T>,
) {
    let JacobiRotation { c, s } = *rot;

    for r in 0..rows {
        let idx_i = r * cols + i;
        let idx_j = r * cols + j;

        let val_i = data[idx_i];
        let val_j = data[idx_j];

        data[idx_i] = c * val_i - s * val_j;
        data[idx_j] = s * val_i + c * val_j;
    }
}

/// `a·x + b·y`, or `None` on overflow
#[inline]
fn checked_combine<T: LinalgElement>(a: T, x: T, b: T, y: T) -> Option<T> {
    a.checked_mul_val(x)?.checked_add_val(b.checked_mul_val(y)?)
}

/// Apply two-sided Jacobi rotation to a symmetric matrix.
///
/// Computes `A' = Jᵀ A J`, setting `A[i,j]` and `A[j,i]` to exactly zero.
/// Returns `None` if an updated entry leaves the element range; `work` is
/// then partially rotated and must be discarded.
///
/// # Arguments
/// * `work` - Symmetric matrix [n × n] in row-major order
/// * `n` - Matrix dimension
/// * `i`, `j` - Element indices (i < j)
/// * `rot` - Rotation parameters
#[inline]
pub fn apply_two_sided_rotation<T: LinalgElement>(
    work: &mut [T],
    n: usize,
    i: usize,
    j: usize,
    rot: &JacobiRotation<T>,
) -> Option<()> {
    let JacobiRotation { c, s } = *rot;
    let a_ii = work[i * n + i];
    let a_jj = work[j * n + j];
    let a_ij = work[i * n + j];

    // Update off-diagonal rows/columns
    for k in 0..n {
        if k != i && k != j {
            let a_ki = work[k * n + i];
            let a_kj = work[k * n + j];

            let new_ki = checked_combine(c, a_ki, s.neg_val(), a_kj)?;
            let new_kj = checked_combine(s, a_ki, c, a_kj)?;

            work[k * n + i] = new_ki;
            work[i * n + k] = new_ki;
            work[k * n + j] = new_kj;
            work[j * n + k] = new_kj;
        }
    }

    // Update diagonal elements
    let c2 = c * c;
    let s2 = s * s;
    let cs = c * s;
    let cs2 = cs + cs;

    let new_ii = checked_combine(c2, a_ii, cs2.neg_val(), a_ij)?.checked_add_val(s2.checked_mul_val(a_jj)?)?;
    let new_jj = checked_combine(s2, a_ii, cs2, a_ij)?.checked_add_val(c2.checked_mul_val(a_jj)?)?;
    work[i * n + i] = new_ii;
    work[j * n + j] = new_jj;
    work[i * n + j] = T::zero();
    work[j * n + i] = T::zero();
    Some(())
}

/// Largest-magnitude entry of the strict upper triangle.
///
/// Returns `(i, j, |a_ij|)`. Ties keep the first entry in row-major order.
pub fn max_off_diagonal<T: LinalgElement>(work: &[T], n: usize) -> (usize, usize, T) {
    let mut best = (0, 1, T::zero());
    for i in 0..n {
        for j in (i + 1)..n {
            let val = work[i * n + j].abs_val();
            if val > best.2 {
                best = (i, j, val);
            }
        }
    }
    best
}

/// Sort indices by value magnitude (ascending, stable).
#[inline]
pub fn argsort_by_magnitude_asc<T: LinalgElement>(values: &[T]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..values.len()).collect();
    indices.sort_by(|&a, &b| {
        values[a]
            .abs_val()
            .partial_cmp(&values[b].abs_val())
            .unwrap_or(Ordering::Equal)
    });
    indices
}

/// Reorder vector elements according to index permutation.
#[inline]
pub fn permute_vector<T: Copy>(data: &[T], indices: &[usize]) -> Vec<T> {
    indices.iter().map(|&idx| data[idx]).collect()
}

/// Reorder matrix columns according to index permutation.
#[inline]
pub fn permute_columns<T: Element>(data: &[T], rows: usize, cols: usize, indices: &[usize]) -> Vec<T> {
    let new_cols = indices.len();
    let mut result = vec![T::zero(); rows * new_cols];
    for (new_idx, &old_idx) in indices.iter().enumerate() {
        for r in 0..rows {
            result[r * new_cols + new_idx] = data[r * cols + old_idx];
        }
    }
    result
}

/// Initialize an identity matrix [n × n].
#[inline]
pub fn identity_matrix<T: Element>(n: usize) -> Vec<T> {
    let mut result = vec![T::zero(); n * n];
    for i in 0..n {
        result[i * n + i] = T::one();
    }
    result
}
