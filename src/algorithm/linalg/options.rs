//! Per-call options and engine-wide configuration

use crate::dtype::Scalar;
use crate::runtime::cpu::linalg::{JACOBI_SWEEPS, MIN_ROTATIONS};
use std::env;
use std::path::PathBuf;

/// Default relative tolerance, used as precision when a call gives none
pub const DEFAULT_REL_TOL: f64 = 1e-12;

/// Minimum number of matrix entries (N²) for the native fast path
pub const DEFAULT_NATIVE_THRESHOLD: usize = 16;

/// Iteration cap handed to the native routine
pub const DEFAULT_NATIVE_MAX_ITERATIONS: i32 = 1000;

/// Options for a single decomposition
///
/// ```
/// use eigs::algorithm::linalg::EigenOptions;
///
/// let opts = EigenOptions::new().precision(1e-9).eigenvectors(false);
/// assert!(!opts.wants_eigenvectors());
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct EigenOptions {
    precision: Option<Scalar>,
    eigenvectors: Option<bool>,
    matricize: Option<bool>,
}

impl EigenOptions {
    /// Default options: library precision, eigenvectors on, container-shaped output
    pub fn new() -> Self {
        Self::default()
    }

    /// Convergence / numerical-zero threshold (float or decimal)
    pub fn precision(mut self, precision: impl Into<Scalar>) -> Self {
        self.precision = Some(precision.into());
        self
    }

    /// Whether eigenvectors are computed (default `true`)
    pub fn eigenvectors(mut self, eigenvectors: bool) -> Self {
        self.eigenvectors = Some(eigenvectors);
        self
    }

    /// Wrap values and vectors as 1-D [`Matrix`](crate::matrix::Matrix) containers
    pub fn matricize(mut self, matricize: bool) -> Self {
        self.matricize = Some(matricize);
        self
    }

    /// Precision set on these options, if any
    pub fn precision_value(&self) -> Option<Scalar> {
        self.precision
    }

    /// Resolved eigenvector flag
    pub fn wants_eigenvectors(&self) -> bool {
        self.eigenvectors.unwrap_or(true)
    }

    /// Resolved matricize flag, given the container the call started from
    pub fn wants_matrix(&self, input_is_matrix: bool) -> bool {
        self.matricize.unwrap_or(input_is_matrix)
    }
}

/// Engine-wide configuration
///
/// Read once when a solver is built; see [`EngineConfig::from_env`] for the
/// environment overrides.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Relative tolerance: default precision and the θ = π/4 cutoff
    pub rel_tol: f64,
    /// Whether the native fast path may be used at all
    pub use_native: bool,
    /// Minimum N² for the native fast path
    pub native_threshold: usize,
    /// Iteration cap handed to the native routine
    pub native_max_iterations: i32,
    /// Jacobi sweeps allowed before reporting non-convergence
    pub jacobi_sweeps: usize,
    /// Lower bound on the Jacobi rotation budget
    pub min_rotations: usize,
    /// Shared library to load the native module from (feature `native`)
    pub native_library: Option<PathBuf>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rel_tol: DEFAULT_REL_TOL,
            use_native: true,
            native_threshold: DEFAULT_NATIVE_THRESHOLD,
            native_max_iterations: DEFAULT_NATIVE_MAX_ITERATIONS,
            jacobi_sweeps: JACOBI_SWEEPS,
            min_rotations: MIN_ROTATIONS,
            native_library: None,
        }
    }
}

impl EngineConfig {
    /// Defaults with environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Apply environment variable overrides
    ///
    /// - `EIGS_REL_TOL`
    /// - `EIGS_USE_NATIVE` (`true` / `false`)
    /// - `EIGS_NATIVE_THRESHOLD`
    /// - `EIGS_NATIVE_MAX_ITERATIONS`
    /// - `EIGS_JACOBI_SWEEPS`
    /// - `EIGS_MIN_ROTATIONS`
    /// - `EIGS_NATIVE_LIBRARY` (path to the shared library)
    ///
    /// Unparseable values are ignored.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(|key| env::var(key).ok());
    }

    /// Apply overrides from `lookup`, keyed by the `EIGS_*` variable names
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(val) = lookup("EIGS_REL_TOL") {
            match val.parse::<f64>() {
                Ok(tol) if tol.is_finite() && tol > 0.0 => self.rel_tol = tol,
                _ => log::warn!("ignoring EIGS_REL_TOL={val}"),
            }
        }

        if let Some(val) = lookup("EIGS_USE_NATIVE") {
            match val.parse::<bool>() {
                Ok(flag) => self.use_native = flag,
                Err(_) => log::warn!("ignoring EIGS_USE_NATIVE={val}"),
            }
        }

        if let Some(val) = lookup("EIGS_NATIVE_THRESHOLD") {
            match val.parse::<usize>() {
                Ok(threshold) => self.native_threshold = threshold,
                Err(_) => log::warn!("ignoring EIGS_NATIVE_THRESHOLD={val}"),
            }
        }

        if let Some(val) = lookup("EIGS_NATIVE_MAX_ITERATIONS") {
            match val.parse::<i32>() {
                Ok(max) => self.native_max_iterations = max,
                Err(_) => log::warn!("ignoring EIGS_NATIVE_MAX_ITERATIONS={val}"),
            }
        }

        if let Some(val) = lookup("EIGS_JACOBI_SWEEPS") {
            match val.parse::<usize>() {
                Ok(sweeps) => self.jacobi_sweeps = sweeps.max(1),
                Err(_) => log::warn!("ignoring EIGS_JACOBI_SWEEPS={val}"),
            }
        }

        if let Some(val) = lookup("EIGS_MIN_ROTATIONS") {
            match val.parse::<usize>() {
                Ok(min) => self.min_rotations = min,
                Err(_) => log::warn!("ignoring EIGS_MIN_ROTATIONS={val}"),
            }
        }

        if let Some(path) = lookup("EIGS_NATIVE_LIBRARY") {
            self.native_library = Some(PathBuf::from(path));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_option_defaults() {
        let opts = EigenOptions::new();
        assert!(opts.wants_eigenvectors());
        assert!(opts.wants_matrix(true));
        assert!(!opts.wants_matrix(false));
        assert_eq!(opts.precision_value(), None);
    }

    #[test]
    fn test_option_builder() {
        let opts = EigenOptions::new().precision(1e-6).matricize(true).eigenvectors(false);
        assert_eq!(opts.precision_value(), Some(Scalar::Float(1e-6)));
        assert!(opts.wants_matrix(false));
        assert!(!opts.wants_eigenvectors());
    }

    #[test]
    fn test_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.rel_tol, 1e-12);
        assert_eq!(config.native_threshold, 16);
        assert_eq!(config.native_max_iterations, 1000);
        assert_eq!(config.jacobi_sweeps, 64);
        assert_eq!(config.min_rotations, 1000);
        assert!(config.use_native);
        assert!(config.native_library.is_none());
    }

    #[test]
    fn test_overrides_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("EIGS_REL_TOL", "1e-9"),
            ("EIGS_USE_NATIVE", "false"),
            ("EIGS_NATIVE_THRESHOLD", "64"),
            ("EIGS_NATIVE_MAX_ITERATIONS", "250"),
            ("EIGS_JACOBI_SWEEPS", "0"),
            ("EIGS_MIN_ROTATIONS", "10"),
            ("EIGS_NATIVE_LIBRARY", "/opt/eigs/libeigs.so"),
        ]
        .into_iter()
        .collect();

        let mut config = EngineConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config.rel_tol, 1e-9);
        assert!(!config.use_native);
        assert_eq!(config.native_threshold, 64);
        assert_eq!(config.native_max_iterations, 250);
        assert_eq!(config.jacobi_sweeps, 1);
        assert_eq!(config.min_rotations, 10);
        assert_eq!(config.native_library, Some(PathBuf::from("/opt/eigs/libeigs.so")));
    }

    #[test]
    fn test_unparseable_overrides_ignored() {
        let vars: HashMap<&str, &str> = [
            ("EIGS_REL_TOL", "-1"),
            ("EIGS_USE_NATIVE", "maybe"),
            ("EIGS_NATIVE_THRESHOLD", "lots"),
            ("EIGS_JACOBI_SWEEPS", "1.5"),
        ]
        .into_iter()
        .collect();

        let mut config = EngineConfig::default();
        config.apply_overrides(|key| vars.get(key).map(|v| v.to_string()));
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_env_overrides() {
        // No other unit test depends on these two variables.
        // SAFETY: environment access in this crate goes through std, which
        // serializes reads and writes.
        unsafe {
            env::set_var("EIGS_NATIVE_MAX_ITERATIONS", "77");
            env::set_var("EIGS_NATIVE_LIBRARY", "libmissing-eigs.so");
        }
        let config = EngineConfig::from_env();
        unsafe {
            env::remove_var("EIGS_NATIVE_MAX_ITERATIONS");
            env::remove_var("EIGS_NATIVE_LIBRARY");
        }

        assert_eq!(config.native_max_iterations, 77);
        assert_eq!(config.native_library, Some(PathBuf::from("libmissing-eigs.so")));
        assert_eq!(EngineConfig::from_env().native_max_iterations, DEFAULT_NATIVE_MAX_ITERATIONS);
    }
}
