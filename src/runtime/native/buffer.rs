//! Scratch buffers owned by a native module
//!
//! A [`NativeBuffer`] is allocated through the module's own allocator and
//! handed back to it exactly once when the guard drops, on success, on
//! error returns and while unwinding.

use super::NativeEigenModule;
use crate::error::{Error, Result};
use std::ptr::NonNull;

/// `len` f64 slots allocated by a [`NativeEigenModule`]
pub struct NativeBuffer<'m> {
    module: &'m dyn NativeEigenModule,
    ptr: NonNull<f64>,
    len: usize,
}

impl<'m> NativeBuffer<'m> {
    /// Allocate `len` zeroed slots from `module`
    pub fn alloc(module: &'m dyn NativeEigenModule, len: usize) -> Result<Self> {
        let ptr = NonNull::new(module.alloc(len)).ok_or_else(|| {
            Error::Native(format!("{}: allocation of {len} values failed", module.name()))
        })?;
        // SAFETY: the module guarantees `len` writable f64 slots behind a non-null pointer
        unsafe { ptr.as_ptr().write_bytes(0, len) };
        Ok(Self { module, ptr, len })
    }

    /// Number of f64 slots
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// True for a zero-length buffer
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Read-only pointer for input arguments
    #[inline]
    pub fn as_ptr(&self) -> *const f64 {
        self.ptr.as_ptr()
    }

    /// Mutable pointer for output arguments
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut f64 {
        self.ptr.as_ptr()
    }

    /// Contents as a slice
    pub fn as_slice(&self) -> &[f64] {
        // SAFETY: `ptr` is valid for `len` initialized values until drop
        unsafe { std::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Copy `src` into the buffer
    ///
    /// # Panics
    /// If `src.len()` differs from the buffer length.
    pub fn copy_from_slice(&mut self, src: &[f64]) {
        // SAFETY: see `as_slice`; we hold the only handle to the allocation
        let dst = unsafe { std::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) };
        dst.copy_from_slice(src);
    }
}

impl Drop for NativeBuffer<'_> {
    fn drop(&mut self) {
        // SAFETY: allocated by this module with this length and freed only here
        unsafe { self.module.free(self.ptr.as_ptr(), self.len) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[derive(Default)]
    struct CountingModule {
        allocs: AtomicUsize,
        frees: AtomicUsize,
        fail_alloc: bool,
    }

    unsafe impl NativeEigenModule for CountingModule {
        fn name(&self) -> &str {
            "counting"
        }

        fn alloc(&self, len: usize) -> *mut f64 {
            if self.fail_alloc {
                return std::ptr::null_mut();
            }
            self.allocs.fetch_add(1, Ordering::SeqCst);
            Box::into_raw(vec![1.0f64; len].into_boxed_slice()) as *mut f64
        }

        unsafe fn free(&self, ptr: *mut f64, len: usize) {
            self.frees.fetch_add(1, Ordering::SeqCst);
            drop(unsafe { Box::from_raw(std::ptr::slice_from_raw_parts_mut(ptr, len)) });
        }

        unsafe fn eigs_symmetric(
            &self,
            _matrix: *const f64,
            _n: usize,
            _values: *mut f64,
            _vectors: *mut f64,
            _work: *mut f64,
            _max_iterations: i32,
            _precision: f64,
        ) -> i32 {
            -1
        }
    }

    #[test]
    fn test_buffer_zeroed_and_freed_once() {
        let module = CountingModule::default();
        {
            let mut buf = NativeBuffer::alloc(&module, 4).unwrap();
            assert_eq!(buf.as_slice(), &[0.0; 4]);
            buf.copy_from_slice(&[1.0, 2.0, 3.0, 4.0]);
            assert_eq!(buf.as_slice()[2], 3.0);
            assert_eq!(buf.len(), 4);
        }
        assert_eq!(module.allocs.load(Ordering::SeqCst), 1);
        assert_eq!(module.frees.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_null_allocation_is_an_error() {
        let module = CountingModule {
            fail_alloc: true,
            ..Default::default()
        };
        assert!(matches!(NativeBuffer::alloc(&module, 4), Err(Error::Native(_))));
        assert_eq!(module.frees.load(Ordering::SeqCst), 0);
    }
}
