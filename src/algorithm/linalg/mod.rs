//! Eigendecomposition algorithms
//!
//! # Module Structure
//!
//! - `decompositions`: Result types (`EigenResult`, `EigenPair`, `PartialEigen`)
//! - `classify`: Realness / symmetry detection and scalar coercion
//! - `dispatch`: `EigenSolver` and the `decompose` entry points
//! - `options`: Per-call `EigenOptions` and engine-wide `EngineConfig`
//! - `helpers`: Validation utilities

pub mod classify;
pub mod decompositions;
pub mod dispatch;
pub mod helpers;
pub mod options;

// Re-export all public types for convenient access
pub use decompositions::*;
pub use dispatch::{EigenSolver, decompose, decompose_rows};
pub use helpers::*;
pub use options::*;
