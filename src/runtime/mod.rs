//! Runtime backends for the eigensolvers
//!
//! ```text
//! runtime
//! ├── cpu     (pure Jacobi / Schur solvers, always available)
//! └── native  (optional pre-compiled module for the float symmetric path)
//! ```

pub mod cpu;
pub mod native;
