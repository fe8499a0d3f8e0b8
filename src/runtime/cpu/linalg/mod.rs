//! CPU implementation of the eigensolvers
//!
//! - `eig_symmetric`: classical Jacobi rotation method, generic over
//!   [`LinalgElement`](super::jacobi::LinalgElement) (f64 and Decimal)
//! - `schur`: complex Hessenberg reduction and shifted QR iteration
//! - `eig_general`: eigenpairs of any square matrix from its Schur form

mod eig_general;
mod eig_symmetric;
mod schur;

pub use eig_general::{GeneralEigenSystem, decompose_general};
pub use eig_symmetric::{EigenSystem, JACOBI_SWEEPS, MIN_ROTATIONS, diagonalize, max_rotations};
pub use schur::{SchurOutcome, max_qr_iterations, schur_decompose, schur_decompose_bounded};
