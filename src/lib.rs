//! # eigs
//!
//! **Eigenvalue and eigenvector decomposition of dense square matrices.**
//!
//! eigs decomposes matrices whose entries are machine floats, arbitrary-precision
//! decimals or complex numbers, with the same entry point for all three.
//!
//! ## Features
//!
//! - **Symmetric matrices**: Jacobi rotations on the largest off-diagonal entry, generic over `f64` and
//!   [`Decimal`](dtype::Decimal); orthonormal eigenvectors
//! - **General matrices**: complex Hessenberg reduction and shifted QR to
//!   Schur form; complex eigenpairs of real non-symmetric input
//! - **Ordering**: eigenvalues ascend by magnitude and repeat per algebraic
//!   multiplicity
//! - **Native fast path**: an optional pre-compiled module accelerates the
//!   float symmetric case, with silent fallback to the pure solver
//!
//! ## Quick Start
//!
//! ```rust
//! use eigs::prelude::*;
//!
//! let a = Matrix::from_rows(vec![vec![5.0, 2.3], vec![2.3, 1.0]])?;
//! let result = decompose(&a, EigenOptions::new())?;
//!
//! let values = result.values.to_vec();
//! let sum: f64 = values.iter().map(|v| v.re()).sum();
//! assert!((sum - 6.0).abs() < 1e-10);
//! # Ok::<(), eigs::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `native`: load the native module from a shared library
//!   (`EIGS_NATIVE_LIBRARY`) with `libloading`

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod algorithm;
pub mod dtype;
pub mod error;
pub mod matrix;
pub mod runtime;

pub use algorithm::linalg::{decompose, decompose_rows};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::algorithm::linalg::{
        Collection, EigenOptions, EigenPair, EigenResult, EigenSolver, EngineConfig, decompose,
        decompose_rows,
    };
    pub use crate::dtype::{Complex128, Decimal, Scalar, ScalarKind, Value};
    pub use crate::error::{Error, Result};
    pub use crate::matrix::Matrix;
    pub use crate::runtime::native::NativeEigenModule;
}
