//! CPU runtime implementation
//!
//! Pure-Rust reference implementation of every eigensolver. Always present;
//! the native module only ever accelerates the float symmetric path.

pub mod jacobi;
pub mod linalg;
