//! Eigendecomposition entry points
//!
//! [`EigenSolver`] validates the input, classifies it, routes it to the
//! symmetric (Jacobi) or general (Schur) solver and re-wraps the result in
//! the caller's preferred container shape.
//!
//! ```text
//! shape check → entry conversion → precision
//!   └─ real? ── symmetric? ── Decimal ──────────── Jacobi<Decimal>
//!        │          │        └ Float ── native? ── Jacobi<f64>
//!        │          └─ no ─┐
//!        └─ no ────────────┴── coerce → Schur (Complex128)
//! ```

use super::classify::{coerce_types, is_real, is_symmetric, strip_imaginary};
use super::decompositions::{EigenPair, EigenResult};
use super::helpers::{resolve_precision, to_scalar_entries, validate_square_matrix};
use super::options::{EigenOptions, EngineConfig};
use crate::dtype::{Decimal, Element, Scalar, ScalarKind, ToScalar};
use crate::error::{Error, Result};
use crate::matrix::Matrix;
use crate::runtime::cpu::linalg::{decompose_general, diagonalize, max_rotations};
use crate::runtime::native::{self, NativeEigenModule};
use std::fmt;
use std::sync::{Arc, OnceLock};

type Decomposed = (Vec<Scalar>, Option<Vec<EigenPair>>);

/// Configured eigendecomposition client
///
/// Holds the engine configuration and the native module (if any). Each call
/// works on private copies, so one solver may serve concurrent callers.
///
/// ```
/// use eigs::algorithm::linalg::{EigenOptions, EigenSolver};
///
/// let solver = EigenSolver::pure();
/// let result = solver
///     .decompose_rows(vec![vec![2.0, 0.0], vec![0.0, 3.0]], EigenOptions::new())
///     .unwrap();
/// assert_eq!(result.values.len(), 2);
/// ```
#[derive(Clone)]
pub struct EigenSolver {
    config: EngineConfig,
    native: Option<Arc<dyn NativeEigenModule>>,
}

impl EigenSolver {
    /// Solver configured from the environment, with the native module if
    /// one can be loaded
    pub fn new() -> Self {
        Self::with_config(EngineConfig::from_env())
    }

    /// Solver with an explicit configuration
    pub fn with_config(config: EngineConfig) -> Self {
        let native = if config.use_native {
            native::shared_module(&config)
        } else {
            None
        };
        Self { config, native }
    }

    /// Solver that never uses the native fast path
    pub fn pure() -> Self {
        Self {
            config: EngineConfig {
                use_native: false,
                ..EngineConfig::from_env()
            },
            native: None,
        }
    }

    /// Use `module` for the float symmetric fast path
    pub fn with_native_module(mut self, module: Arc<dyn NativeEigenModule>) -> Self {
        self.config.use_native = true;
        self.native = Some(module);
        self
    }

    /// Engine configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// True if a native module is attached
    pub fn has_native(&self) -> bool {
        self.native.is_some()
    }

    /// Decompose a [`Matrix`]. Results default to 1-D matrix containers.
    pub fn decompose<T: ToScalar>(&self, matrix: &Matrix<T>, options: EigenOptions) -> Result<EigenResult> {
        self.run(matrix, &options, true)
    }

    /// Decompose nested rows. Results default to plain vectors.
    pub fn decompose_rows<T: ToScalar>(&self, rows: Vec<Vec<T>>, options: EigenOptions) -> Result<EigenResult> {
        let matrix = Matrix::from_rows(rows)?;
        self.run(&matrix, &options, false)
    }

    fn run<T: ToScalar>(&self, matrix: &Matrix<T>, options: &EigenOptions, input_is_matrix: bool) -> Result<EigenResult> {
        let n = validate_square_matrix(matrix.shape())?;
        let entries = to_scalar_entries(matrix)?;
        let precision = resolve_precision(options.precision_value(), self.config.rel_tol)?;
        let compute_vectors = options.wants_eigenvectors();
        let matricize = options.wants_matrix(input_is_matrix);

        if n == 0 {
            return Ok(EigenResult::empty(compute_vectors, matricize));
        }

        let (values, eigenvectors) = if is_real(&entries, &precision) {
            let entries = strip_imaginary(entries);
            if is_symmetric(&entries, n, &precision) {
                let (entries, kind) = coerce_types(entries)?;
                self.symmetric(entries, n, kind, &precision, compute_vectors)?
            } else {
                self.general(entries, n, &precision, compute_vectors)?
            }
        } else {
            self.general(entries, n, &precision, compute_vectors)?
        };

        Ok(EigenResult::assemble(values, eigenvectors, matricize))
    }

    fn symmetric(
        &self,
        entries: Vec<Scalar>,
        n: usize,
        kind: ScalarKind,
        precision: &Scalar,
        compute_vectors: bool,
    ) -> Result<Decomposed> {
        let budget = max_rotations(n, self.config.jacobi_sweeps, self.config.min_rotations);
        match kind {
            ScalarKind::Decimal => {
                log::debug!("eigs: {n}x{n} decimal symmetric, jacobi");
                let work = unwrap_entries::<Decimal>(&entries)?;
                let precision = match precision {
                    Scalar::Decimal(d) => *d,
                    other => <Decimal as Element>::from_f64(other.re()),
                };
                let rel_tol = <Decimal as Element>::from_f64(self.config.rel_tol);
                let system = diagonalize(work, n, precision, rel_tol, compute_vectors, budget)?;
                Ok(system.into_scalar_pairs())
            }
            ScalarKind::Float => {
                let work = unwrap_entries::<f64>(&entries)?;
                let precision = precision.re();
                if let Some(module) = self.native_for(n) {
                    log::debug!("eigs: {n}x{n} float symmetric, native module {}", module.name());
                    match native::eigs_symmetric(
                        module,
                        &work,
                        n,
                        compute_vectors,
                        self.config.native_max_iterations,
                        precision,
                    ) {
                        Ok(system) => return Ok(system.into_scalar_pairs()),
                        Err(e) => log::debug!("eigs: falling back to jacobi: {e}"),
                    }
                } else {
                    log::debug!("eigs: {n}x{n} float symmetric, jacobi");
                }
                let system = diagonalize(work, n, precision, self.config.rel_tol, compute_vectors, budget)?;
                Ok(system.into_scalar_pairs())
            }
            ScalarKind::Complex => Err(Error::Internal(
                "complex entries reached the symmetric solver".to_string(),
            )),
        }
    }

    fn general(&self, entries: Vec<Scalar>, n: usize, precision: &Scalar, compute_vectors: bool) -> Result<Decomposed> {
        let (entries, kind) = coerce_types(entries)?;
        log::debug!("eigs: {n}x{n} {kind} general, schur");
        let work = entries.iter().map(Scalar::as_complex).collect();
        let system = decompose_general(work, n, precision.magnitude(), kind, compute_vectors)?;
        Ok((system.values, system.eigenvectors))
    }

    fn native_for(&self, n: usize) -> Option<&dyn NativeEigenModule> {
        if !self.config.use_native || n * n < self.config.native_threshold {
            return None;
        }
        self.native.as_deref()
    }
}

impl Default for EigenSolver {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EigenSolver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EigenSolver")
            .field("config", &self.config)
            .field("native", &self.native.as_ref().map(|m| m.name().to_string()))
            .finish()
    }
}

fn unwrap_entries<T: Element>(entries: &[Scalar]) -> Result<Vec<T>> {
    entries
        .iter()
        .map(|e| {
            T::from_scalar(e).ok_or_else(|| {
                Error::Internal(format!("expected {} entry, found {}", T::KIND, e.kind()))
            })
        })
        .collect()
}

fn default_solver() -> &'static EigenSolver {
    static SOLVER: OnceLock<EigenSolver> = OnceLock::new();
    SOLVER.get_or_init(EigenSolver::new)
}

/// Eigenvalues and eigenvectors of a square matrix
///
/// Uses a process-wide solver configured from the environment. Results are
/// 1-D [`Matrix`] containers unless `options` turn `matricize` off.
///
/// # Errors
/// - [`Error::NotSquare`] if the matrix is not 2-D and square
/// - [`Error::UnsupportedType`] for entries that are not numbers
/// - [`Error::InvalidArgument`] for a complex or NaN precision
/// - [`Error::NoConvergence`] if the iteration bound is exhausted
/// - [`Error::Overflow`] if a decimal result leaves the `Decimal` range
///
/// ```
/// use eigs::prelude::*;
///
/// let a = Matrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
/// let result = decompose(&a, EigenOptions::new()).unwrap();
/// let values = result.values.to_vec();
/// assert!((values[0].re() - 1.0).abs() < 1e-10);
/// assert!((values[1].re() - 3.0).abs() < 1e-10);
/// ```
pub fn decompose<T: ToScalar>(matrix: &Matrix<T>, options: EigenOptions) -> Result<EigenResult> {
    default_solver().decompose(matrix, options)
}

/// Like [`decompose`] for nested rows; results default to plain vectors.
pub fn decompose_rows<T: ToScalar>(rows: Vec<Vec<T>>, options: EigenOptions) -> Result<EigenResult> {
    default_solver().decompose_rows(rows, options)
}
