//! Complex Schur decomposition using QR iteration with Wilkinson shift

use crate::dtype::Complex128;

/// Iterations between exceptional shifts on a stagnating window
const EXCEPTIONAL_SHIFT_PERIOD: usize = 10;

/// Result of [`schur_decompose`]: `A = Z T Zᴴ` with Z unitary and T upper
/// triangular, both row-major [n × n].
#[derive(Debug, Clone)]
pub struct SchurOutcome {
    /// Upper triangular factor (eigenvalues on the diagonal)
    pub t: Vec<Complex128>,
    /// Unitary factor
    pub z: Vec<Complex128>,
    /// QR iterations performed
    pub iterations: usize,
    /// False if the iteration bound was hit before every subdiagonal deflated
    pub converged: bool,
}

/// Iteration bound of the shifted QR phase for an `n × n` matrix
pub fn max_qr_iterations(n: usize) -> usize {
    30 * n.max(10)
}

/// Complex Schur decomposition of a row-major [n × n] matrix.
///
/// Algorithm:
/// 1. Householder reduction to upper Hessenberg form, accumulating Z
/// 2. Shifted QR iteration with Givens rotations on the active window,
///    deflating when `|h[k][k-1]| ≤ ε(|h[k-1][k-1]| + |h[k][k]|)`
/// 3. Wilkinson shift from the trailing 2×2 block, with an exceptional
///    shift every 10 iterations without deflation
pub fn schur_decompose(a: Vec<Complex128>, n: usize) -> SchurOutcome {
    schur_decompose_bounded(a, n, max_qr_iterations(n))
}

/// [`schur_decompose`] with an explicit QR iteration bound
pub fn schur_decompose_bounded(a: Vec<Complex128>, n: usize, max_iter: usize) -> SchurOutcome {
    debug_assert_eq!(a.len(), n * n);
    let mut t = a;
    let mut z = vec![Complex128::ZERO; n * n];
    for i in 0..n {
        z[i * n + i] = Complex128::ONE;
    }

    if n < 2 {
        return SchurOutcome {
            t,
            z,
            iterations: 0,
            converged: true,
        };
    }

    hessenberg_reduction(&mut t, &mut z, n);

    let norm = frobenius_norm(&t);
    let eps = f64::EPSILON;
    let mut iterations = 0;
    let mut since_deflation = 0;
    let mut hi = n - 1;

    while hi > 0 {
        // Find the start of the unreduced block ending at `hi`
        let mut lo = hi;
        while lo > 0 {
            let scale = t[(lo - 1) * n + (lo - 1)].magnitude() + t[lo * n + lo].magnitude();
            let scale = if scale == 0.0 { norm } else { scale };
            if t[lo * n + lo - 1].magnitude() <= eps * scale {
                t[lo * n + lo - 1] = Complex128::ZERO;
                break;
            }
            lo -= 1;
        }

        if lo == hi {
            hi -= 1;
            since_deflation = 0;
            continue;
        }

        if iterations >= max_iter {
            return SchurOutcome {
                t,
                z,
                iterations,
                converged: false,
            };
        }
        iterations += 1;
        since_deflation += 1;

        let mu = if since_deflation % EXCEPTIONAL_SHIFT_PERIOD == 0 {
            t[hi * n + hi] + Complex128::from(0.75 * t[hi * n + hi - 1].magnitude())
        } else {
            wilkinson_shift(&t, n, hi)
        };

        qr_step(&mut t, &mut z, n, lo, hi, mu);
    }

    // Everything below the diagonal has deflated to zero
    for i in 1..n {
        for j in 0..i {
            t[i * n + j] = Complex128::ZERO;
        }
    }

    SchurOutcome {
        t,
        z,
        iterations,
        converged: true,
    }
}

/// Reduce matrix to upper Hessenberg form using complex Householder
/// reflections. Modifies H in-place and accumulates `Z = Z P`.
///
/// For column k the reflector `P = I - 2vvᴴ/(vᴴv)` maps `x = h[k+1.., k]`
/// onto `alpha·e₁` with `alpha = -e^{i·arg x₀}‖x‖`.
pub fn hessenberg_reduction(h: &mut [Complex128], z: &mut [Complex128], n: usize) {
    for k in 0..n.saturating_sub(2) {
        let mut v: Vec<Complex128> = ((k + 1)..n).map(|i| h[i * n + k]).collect();
        let norm = v.iter().map(|x| x.magnitude_squared()).sum::<f64>().sqrt();
        if norm == 0.0 {
            continue;
        }

        let x0 = v[0];
        let phase = if x0.magnitude() == 0.0 {
            Complex128::ONE
        } else {
            x0.scale(1.0 / x0.magnitude())
        };
        let alpha = -phase.scale(norm);
        v[0] = x0 - alpha;

        let v_norm_sq: f64 = v.iter().map(|x| x.magnitude_squared()).sum();
        if v_norm_sq == 0.0 {
            continue;
        }
        let beta = 2.0 / v_norm_sq;

        // H = P H (rows k+1..n)
        for c in 0..n {
            let mut s = Complex128::ZERO;
            for (idx, vi) in v.iter().enumerate() {
                s += vi.conj() * h[(k + 1 + idx) * n + c];
            }
            let s = s.scale(beta);
            for (idx, vi) in v.iter().enumerate() {
                h[(k + 1 + idx) * n + c] -= *vi * s;
            }
        }

        // H = H P, Z = Z P (columns k+1..n)
        for m in [&mut *h, &mut *z] {
            for r in 0..n {
                let mut s = Complex128::ZERO;
                for (idx, vi) in v.iter().enumerate() {
                    s += m[r * n + k + 1 + idx] * *vi;
                }
                let s = s.scale(beta);
                for (idx, vi) in v.iter().enumerate() {
                    m[r * n + k + 1 + idx] -= s * vi.conj();
                }
            }
        }

        h[(k + 1) * n + k] = alpha;
        for i in (k + 2)..n {
            h[i * n + k] = Complex128::ZERO;
        }
    }
}

/// Eigenvalue of the trailing 2×2 block `[[a, b], [c, d]]` closest to `d`
fn wilkinson_shift(t: &[Complex128], n: usize, hi: usize) -> Complex128 {
    let a = t[(hi - 1) * n + hi - 1];
    let b = t[(hi - 1) * n + hi];
    let c = t[hi * n + hi - 1];
    let d = t[hi * n + hi];

    let half = (a - d).scale(0.5);
    let disc = (half * half + b * c).sqrt();
    let mean = (a + d).scale(0.5);
    let mu1 = mean + disc;
    let mu2 = mean - disc;
    if (mu1 - d).magnitude() <= (mu2 - d).magnitude() {
        mu1
    } else {
        mu2
    }
}

/// Complex Givens rotation `G = [[c, s], [-s̄, c]]` (c real) with
/// `G·[a, b]ᵀ = [r, 0]ᵀ`.
#[derive(Debug, Clone, Copy)]
struct Givens {
    c: f64,
    s: Complex128,
}

impl Givens {
    fn zeroing(a: Complex128, b: Complex128) -> Self {
        let abs_a = a.magnitude();
        let abs_b = b.magnitude();
        let r = abs_a.hypot(abs_b);
        if r == 0.0 {
            Self {
                c: 1.0,
                s: Complex128::ZERO,
            }
        } else if abs_a == 0.0 {
            Self {
                c: 0.0,
                s: b.conj().scale(1.0 / abs_b),
            }
        } else {
            Self {
                c: abs_a / r,
                s: a.scale(1.0 / abs_a) * b.conj().scale(1.0 / r),
            }
        }
    }

    /// Rows k, k+1 ← G · rows k, k+1 over columns `cols`
    fn apply_rows(&self, m: &mut [Complex128], n: usize, k: usize, cols: std::ops::Range<usize>) {
        for col in cols {
            let x = m[k * n + col];
            let y = m[(k + 1) * n + col];
            m[k * n + col] = x.scale(self.c) + self.s * y;
            m[(k + 1) * n + col] = y.scale(self.c) - self.s.conj() * x;
        }
    }

    /// Columns k, k+1 ← columns k, k+1 · Gᴴ over rows `rows`
    fn apply_columns(&self, m: &mut [Complex128], n: usize, k: usize, rows: std::ops::Range<usize>) {
        for row in rows {
            let x = m[row * n + k];
            let y = m[row * n + k + 1];
            m[row * n + k] = x.scale(self.c) + y * self.s.conj();
            m[row * n + k + 1] = y.scale(self.c) - x * self.s;
        }
    }
}

/// One explicit shifted QR step on the window `lo..=hi`:
/// `H - μI = QR`, `H ← RQ + μI`, `Z ← Z Q`.
fn qr_step(t: &mut [Complex128], z: &mut [Complex128], n: usize, lo: usize, hi: usize, mu: Complex128) {
    for k in lo..=hi {
        t[k * n + k] -= mu;
    }

    let mut rotations = Vec::with_capacity(hi - lo);
    for k in lo..hi {
        let g = Givens::zeroing(t[k * n + k], t[(k + 1) * n + k]);
        g.apply_rows(t, n, k, k..n);
        t[(k + 1) * n + k] = Complex128::ZERO;
        rotations.push(g);
    }

    for (offset, g) in rotations.iter().enumerate() {
        let k = lo + offset;
        g.apply_columns(t, n, k, 0..(k + 2));
        g.apply_columns(z, n, k, 0..n);
    }

    for k in lo..=hi {
        t[k * n + k] += mu;
    }
}

fn frobenius_norm(m: &[Complex128]) -> f64 {
    m.iter().map(|x| x.magnitude_squared()).sum::<f64>().sqrt()
}
