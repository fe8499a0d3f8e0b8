//! Native eigen module loaded from a shared library.

use super::NativeEigenModule;
use crate::error::{Error, Result};
use libloading::Library;
use std::path::Path;

type AllocFn = unsafe extern "C" fn(usize) -> *mut f64;
type FreeFn = unsafe extern "C" fn(*mut f64, usize);
type EigsSymmetricFn =
    unsafe extern "C" fn(*const f64, usize, *mut f64, *mut f64, *mut f64, i32, f64) -> i32;

/// A shared library exporting `eigs_alloc`, `eigs_free` and `eigs_symmetric`.
pub struct DynamicModule {
    /// Keeps the function pointers below valid
    _library: Library,
    /// Path to the library (for debugging)
    path: String,
    alloc: AllocFn,
    free: FreeFn,
    eigs_symmetric: EigsSymmetricFn,
}

impl DynamicModule {
    /// Load a native module from a path.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let display = path.display().to_string();

        // SAFETY: loading runs the library's initializers; the path is
        // configured by the embedder
        let library = unsafe { Library::new(path) }
            .map_err(|e| Error::Native(format!("Failed to load library '{display}': {e}")))?;

        // SAFETY: the signatures match the documented C ABI
        let (alloc, free, eigs_symmetric) = unsafe {
            (
                symbol::<AllocFn>(&library, b"eigs_alloc\0", &display)?,
                symbol::<FreeFn>(&library, b"eigs_free\0", &display)?,
                symbol::<EigsSymmetricFn>(&library, b"eigs_symmetric\0", &display)?,
            )
        };

        Ok(Self {
            _library: library,
            path: display,
            alloc,
            free,
            eigs_symmetric,
        })
    }

    /// Get the path of this library.
    pub fn path(&self) -> &str {
        &self.path
    }
}

/// Copy a function pointer out of the library.
///
/// # Safety
/// `F` must match the symbol's actual signature.
unsafe fn symbol<F: Copy>(library: &Library, name: &[u8], path: &str) -> Result<F> {
    let symbol = unsafe { library.get::<F>(name) }.map_err(|e| {
        Error::Native(format!(
            "Function '{}' not found in '{path}': {e}",
            String::from_utf8_lossy(&name[..name.len() - 1])
        ))
    })?;
    Ok(*symbol)
}

// SAFETY: the library implements the documented allocation and buffer contract
unsafe impl NativeEigenModule for DynamicModule {
    fn name(&self) -> &str {
        &self.path
    }

    fn alloc(&self, len: usize) -> *mut f64 {
        // SAFETY: plain C call with a length argument
        unsafe { (self.alloc)(len) }
    }

    unsafe fn free(&self, ptr: *mut f64, len: usize) {
        unsafe { (self.free)(ptr, len) }
    }

    unsafe fn eigs_symmetric(
        &self,
        matrix: *const f64,
        n: usize,
        values: *mut f64,
        vectors: *mut f64,
        work: *mut f64,
        max_iterations: i32,
        precision: f64,
    ) -> i32 {
        unsafe { (self.eigs_symmetric)(matrix, n, values, vectors, work, max_iterations, precision) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_library_is_an_error() {
        let err = DynamicModule::load("/nonexistent/libeigs_native.so")
            .err()
            .unwrap();
        assert!(matches!(err, Error::Native(msg) if msg.contains("Failed to load library")));
    }
}
