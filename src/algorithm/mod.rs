//! Algorithms built on the CPU runtime
//!
//! - [`linalg`] - eigendecomposition dispatcher, scalar classification and
//!   result types
//!
//! The numerical kernels themselves live in [`crate::runtime::cpu`]; this
//! layer decides which one runs and shapes the result.

pub mod linalg;
