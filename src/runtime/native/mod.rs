//! Native acceleration for the float symmetric path
//!
//! A [`NativeEigenModule`] is a pre-compiled routine operating on flat f64
//! buffers it allocates itself. The adapter copies the matrix into a
//! module-owned buffer, invokes the routine, reads eigenvalues and
//! column-major eigenvectors back, and sorts them exactly like the pure
//! Jacobi solver. Any failure comes back as [`Error::Native`] so the caller
//! can fall back to the pure algorithm.

mod buffer;
#[cfg(feature = "native")]
mod library;

pub use buffer::NativeBuffer;
#[cfg(feature = "native")]
pub use library::DynamicModule;

use crate::algorithm::linalg::EngineConfig;
use crate::error::{Error, Result};
use crate::runtime::cpu::linalg::EigenSystem;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};

/// Exported surface of a native eigen module
///
/// # Safety
/// Implementors guarantee that:
/// - `alloc(len)` returns either null or a pointer valid for `len` f64
///   reads and writes until it is passed to `free` with the same `len`
/// - `eigs_symmetric` reads `n²` values from `matrix`, writes at most `n`
///   values to `values` and `n²` to `vectors` (column-major, column k
///   belonging to eigenvalue k) and uses at most `n²` slots of `work`
pub unsafe trait NativeEigenModule: Send + Sync {
    /// Name used in diagnostics
    fn name(&self) -> &str;

    /// Allocate `len` f64 slots, or return null
    fn alloc(&self, len: usize) -> *mut f64;

    /// Release a buffer obtained from [`alloc`](Self::alloc)
    ///
    /// # Safety
    /// `ptr` must come from `alloc(len)` on this module and not be freed yet.
    unsafe fn free(&self, ptr: *mut f64, len: usize);

    /// Symmetric eigendecomposition. Returns a negative value on failure,
    /// otherwise the number of iterations performed.
    ///
    /// # Safety
    /// All pointers must come from [`alloc`](Self::alloc) with the sizes
    /// given in the trait documentation.
    #[allow(clippy::too_many_arguments)]
    unsafe fn eigs_symmetric(
        &self,
        matrix: *const f64,
        n: usize,
        values: *mut f64,
        vectors: *mut f64,
        work: *mut f64,
        max_iterations: i32,
        precision: f64,
    ) -> i32;
}

static NATIVE_MODULE: OnceLock<Option<Arc<dyn NativeEigenModule>>> = OnceLock::new();

/// Process-wide native module, loaded on first use.
///
/// The first configuration to load decides; later calls reuse the cached
/// outcome.
pub fn shared_module(config: &EngineConfig) -> Option<Arc<dyn NativeEigenModule>> {
    NATIVE_MODULE.get_or_init(|| load_module(config)).clone()
}

#[cfg(feature = "native")]
fn load_module(config: &EngineConfig) -> Option<Arc<dyn NativeEigenModule>> {
    let path = config.native_library.as_ref()?;
    match DynamicModule::load(path) {
        Ok(module) => {
            log::debug!("native eigen module loaded from {}", path.display());
            Some(Arc::new(module))
        }
        Err(e) => {
            log::debug!("native eigen module unavailable: {e}");
            None
        }
    }
}

#[cfg(not(feature = "native"))]
fn load_module(config: &EngineConfig) -> Option<Arc<dyn NativeEigenModule>> {
    if config.native_library.is_some() {
        log::debug!("native library configured but the `native` feature is disabled");
    }
    None
}

/// Run the native symmetric eigendecomposition on a row-major [n × n] matrix.
///
/// The result is sorted ascending by magnitude with eigenvector columns
/// permuted alongside, in row-major layout. Every module buffer is freed
/// exactly once, including when the module panics.
pub fn eigs_symmetric(
    module: &dyn NativeEigenModule,
    matrix: &[f64],
    n: usize,
    compute_vectors: bool,
    max_iterations: i32,
    precision: f64,
) -> Result<EigenSystem<f64>> {
    match panic::catch_unwind(AssertUnwindSafe(|| {
        run(module, matrix, n, compute_vectors, max_iterations, precision)
    })) {
        Ok(result) => result,
        Err(payload) => Err(Error::Native(format!(
            "{} panicked: {}",
            module.name(),
            panic_message(payload.as_ref())
        ))),
    }
}

fn run(
    module: &dyn NativeEigenModule,
    matrix: &[f64],
    n: usize,
    compute_vectors: bool,
    max_iterations: i32,
    precision: f64,
) -> Result<EigenSystem<f64>> {
    let nn = n * n;
    let mut a = NativeBuffer::alloc(module, nn)?;
    a.copy_from_slice(matrix);
    let mut values = NativeBuffer::alloc(module, n)?;
    let mut vectors = NativeBuffer::alloc(module, nn)?;
    let mut work = NativeBuffer::alloc(module, nn)?;

    // SAFETY: every buffer was allocated by `module` with the documented size
    let status = unsafe {
        module.eigs_symmetric(
            a.as_ptr(),
            n,
            values.as_mut_ptr(),
            vectors.as_mut_ptr(),
            work.as_mut_ptr(),
            max_iterations,
            precision,
        )
    };
    if status < 0 {
        return Err(Error::Native(format!("{} returned status {status}", module.name())));
    }

    let eigenvalues = values.as_slice().to_vec();
    if eigenvalues.iter().any(|v| !v.is_finite()) {
        return Err(Error::Native(format!("{} produced non-finite eigenvalues", module.name())));
    }

    let eigenvectors = if compute_vectors {
        let col_major = vectors.as_slice();
        if col_major.iter().any(|v| !v.is_finite()) {
            return Err(Error::Native(format!("{} produced non-finite eigenvectors", module.name())));
        }
        let mut row_major = vec![0.0; nn];
        for k in 0..n {
            for r in 0..n {
                row_major[r * n + k] = col_major[k * n + r];
            }
        }
        Some(row_major)
    } else {
        None
    };

    Ok(EigenSystem {
        values: eigenvalues,
        vectors: eigenvectors,
        iterations: status as usize,
    }
    .sorted_by_magnitude())
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
