//! Integration tests for Eigendecomposition (Symmetric Matrices)
//!
//! Tests verify:
//! - Eigenvalue equation: A·v ≈ λ·v for every pair
//! - Orthogonality: eigenvectors form an orthonormal set
//! - Eigenvalues sorted by magnitude ascending, repeated per multiplicity
//! - Trace and determinant identities
//! - Edge cases: identity, diagonal, single element, empty
//! - Decimal path agrees with the float path

use eigs::algorithm::linalg::{Collection, EigenOptions, EigenSolver, EngineConfig};
use eigs::dtype::{Decimal, Scalar, ScalarKind, Value};
use eigs::error::Error;
use eigs::matrix::Matrix;

mod common;

use common::{
    assert_allclose_f64, assert_magnitude_ascending, assert_orthonormal, max_residual,
    real_values, symmetric_matrix, to_complex,
};

// ============================================================================
// Helper Functions
// ============================================================================

fn solver() -> EigenSolver {
    EigenSolver::pure()
}

fn flatten(rows: &[Vec<f64>]) -> Vec<f64> {
    rows.iter().flatten().copied().collect()
}

fn det3(a: &[f64]) -> f64 {
    a[0] * (a[4] * a[8] - a[5] * a[7]) - a[1] * (a[3] * a[8] - a[5] * a[6])
        + a[2] * (a[3] * a[7] - a[4] * a[6])
}

// ============================================================================
// Scenarios
// ============================================================================

#[test]
fn test_scaled_identity_2x2() {
    let result = solver()
        .decompose_rows(vec![vec![2.0, 0.0], vec![0.0, 2.0]], EigenOptions::new())
        .unwrap();

    assert_allclose_f64(&real_values(&result), &[2.0, 2.0], 0.0, 1e-12, "eigenvalues");
    let pairs = result.eigenvectors.unwrap();
    assert_eq!(pairs.len(), 2);
    assert_orthonormal(&pairs, 1e-12, "eigenvectors");
}

#[test]
fn test_2x2_symmetric_sum_and_product() {
    let rows = vec![vec![5.0, 2.3], vec![2.3, 1.0]];
    let a = flatten(&rows);
    let result = solver().decompose_rows(rows, EigenOptions::new()).unwrap();

    let values = real_values(&result);
    assert_eq!(values.len(), 2);
    assert!((values[0] + values[1] - 6.0).abs() < 1e-10, "sum {values:?}");
    assert!((values[0] * values[1] + 0.29).abs() < 1e-10, "product {values:?}");

    let pairs = result.eigenvectors.unwrap();
    assert!(max_residual(&to_complex(&a), 2, &pairs) < 1e-10);
}

#[test]
fn test_identity_any_order() {
    for n in 1..=6 {
        let result = solver()
            .decompose(&Matrix::identity(n), EigenOptions::new())
            .unwrap();

        assert_allclose_f64(&real_values(&result), &vec![1.0; n], 0.0, 1e-12, "identity values");
        let pairs = result.eigenvectors.unwrap();
        assert_eq!(pairs.len(), n);
        assert_orthonormal(&pairs, 1e-12, "identity vectors");
    }
}

// ============================================================================
// Invariants
// ============================================================================

#[test]
fn test_reconstruction_and_orthogonality() {
    for n in [3, 4, 6] {
        let rows = symmetric_matrix(n);
        let a = flatten(&rows);
        let result = solver().decompose_rows(rows, EigenOptions::new()).unwrap();

        assert_eq!(result.values.len(), n);
        let pairs = result.eigenvectors.unwrap();
        assert_eq!(pairs.len(), n);
        assert!(max_residual(&to_complex(&a), n, &pairs) < 1e-9, "n = {n}");
        assert_orthonormal(&pairs, 1e-10, "symmetric vectors");
    }
}

#[test]
fn test_trace_and_determinant() {
    let rows = vec![
        vec![4.0, 1.0, -2.0],
        vec![1.0, 2.0, 0.5],
        vec![-2.0, 0.5, 3.0],
    ];
    let a = flatten(&rows);
    let result = solver()
        .decompose_rows(rows, EigenOptions::new().eigenvectors(false))
        .unwrap();
    assert!(result.eigenvectors.is_none());

    let values = real_values(&result);
    let trace: f64 = values.iter().sum();
    let product: f64 = values.iter().product();
    assert!((trace - 9.0).abs() < 1e-10);
    assert!((product - det3(&a)).abs() < 1e-9);
}

#[test]
fn test_ordering_by_magnitude() {
    let rows = vec![
        vec![-5.0, 0.0, 0.0],
        vec![0.0, 1.0, 0.0],
        vec![0.0, 0.0, 3.0],
    ];
    let result = solver().decompose_rows(rows, EigenOptions::new()).unwrap();
    assert_magnitude_ascending(result.values.as_slice(), "diag");
    assert_eq!(
        result.values.to_vec(),
        vec![Scalar::Float(1.0), Scalar::Float(3.0), Scalar::Float(-5.0)]
    );

    // Each pair keeps its own vector after sorting
    let pairs = result.eigenvectors.unwrap();
    let v = common::real_vector(&pairs[2]);
    assert_allclose_f64(&v, &[1.0, 0.0, 0.0], 0.0, 1e-12, "vector of -5");
}

#[test]
fn test_repeated_eigenvalue_multiplicity() {
    // Eigenvalues 2, 2, 4
    let rows = vec![
        vec![2.0, 0.0, 0.0],
        vec![0.0, 3.0, 1.0],
        vec![0.0, 1.0, 3.0],
    ];
    let a = flatten(&rows);
    let result = solver().decompose_rows(rows, EigenOptions::new()).unwrap();

    assert_allclose_f64(&real_values(&result), &[2.0, 2.0, 4.0], 0.0, 1e-10, "values");
    let pairs = result.eigenvectors.unwrap();
    assert_eq!(pairs.len(), 3);
    assert!(max_residual(&to_complex(&a), 3, &pairs) < 1e-10);
    assert_orthonormal(&pairs, 1e-10, "degenerate vectors");
}

#[test]
fn test_loose_precision_accepts_nearly_symmetric() {
    let rows = vec![vec![2.0, 1.0], vec![1.0 + 1e-8, 2.0]];
    let result = solver()
        .decompose_rows(rows, EigenOptions::new().precision(1e-6))
        .unwrap();
    // Routed to the symmetric solver: orthonormal real vectors
    assert!(result.values.as_slice().iter().all(|v| v.kind() == ScalarKind::Float));
    assert_orthonormal(&result.eigenvectors.unwrap(), 1e-12, "near-symmetric");
}

// ============================================================================
// Result shape
// ============================================================================

#[test]
fn test_matricize_defaults_follow_input() {
    let m = Matrix::from_rows(vec![vec![1.0, 0.0], vec![0.0, 2.0]]).unwrap();

    let from_matrix = solver().decompose(&m, EigenOptions::new()).unwrap();
    assert!(from_matrix.values.is_matrix());
    assert!(from_matrix.eigenvectors.unwrap().iter().all(|p| p.vector.is_matrix()));

    let from_rows = solver().decompose_rows(m.to_rows(), EigenOptions::new()).unwrap();
    assert!(matches!(from_rows.values, Collection::Array(_)));

    let forced = solver()
        .decompose(&m, EigenOptions::new().matricize(false))
        .unwrap();
    assert!(!forced.values.is_matrix());

    let forced = solver()
        .decompose_rows(m.to_rows(), EigenOptions::new().matricize(true))
        .unwrap();
    match forced.values {
        Collection::Matrix(values) => assert_eq!(values.shape(), &[2]),
        Collection::Array(_) => panic!("expected matrix container"),
    }
}

#[test]
fn test_input_is_not_mutated() {
    let m = Matrix::from_rows(vec![vec![2.0, 1.0], vec![1.0, 2.0]]).unwrap();
    let before = m.clone();
    solver().decompose(&m, EigenOptions::new()).unwrap();
    assert_eq!(m, before);
}

#[test]
fn test_empty_matrix() {
    let m = Matrix::<f64>::from_vec(Vec::new(), &[0, 0]).unwrap();
    let result = solver().decompose(&m, EigenOptions::new()).unwrap();
    assert!(result.values.is_empty());
    assert_eq!(result.eigenvectors.map(|p| p.len()), Some(0));
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_not_square_reports_shape() {
    let err = solver()
        .decompose_rows(vec![vec![1.0, 2.0, 3.0], vec![4.0, 5.0, 6.0]], EigenOptions::new())
        .unwrap_err();
    match err {
        Error::NotSquare { shape } => assert_eq!(shape, vec![2, 3]),
        other => panic!("unexpected error {other:?}"),
    }

    let vector = Matrix::vector(vec![1.0, 2.0]);
    assert!(matches!(
        solver().decompose(&vector, EigenOptions::new()),
        Err(Error::NotSquare { .. })
    ));
}

#[test]
fn test_unsupported_entry_type() {
    let rows = vec![
        vec![Value::Number(1.0), Value::Number(0.0)],
        vec![Value::Number(0.0), Value::Boolean(false)],
    ];
    let err = solver().decompose_rows(rows, EigenOptions::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::UnsupportedType {
            type_name: "boolean",
            row: 1,
            col: 1
        }
    ));
}

#[test]
fn test_nan_precision_rejected() {
    let err = solver()
        .decompose_rows(vec![vec![1.0]], EigenOptions::new().precision(f64::NAN))
        .unwrap_err();
    assert!(matches!(err, Error::InvalidArgument { arg: "precision", .. }));
}

#[test]
fn test_no_convergence_carries_partial_result() {
    let config = EngineConfig {
        use_native: false,
        jacobi_sweeps: 1,
        min_rotations: 1,
        ..EngineConfig::default()
    };
    let rows = symmetric_matrix(4);
    let err = EigenSolver::with_config(config)
        .decompose_rows(rows, EigenOptions::new())
        .unwrap_err();

    match &err {
        Error::NoConvergence { n, iterations, precision, .. } => {
            assert_eq!(*n, 4);
            assert_eq!(*iterations, 6);
            assert_eq!(*precision, 1e-12);
        }
        other => panic!("unexpected error {other:?}"),
    }
    let partial = err.partial().unwrap();
    assert_eq!(partial.values.len(), 4);
    assert_magnitude_ascending(&partial.values, "partial");
    assert_eq!(partial.eigenvectors.as_ref().map(Vec::len), Some(4));
}

// ============================================================================
// Decimal path
// ============================================================================

fn dec(x: &str) -> Decimal {
    x.parse().unwrap()
}

#[test]
fn test_decimal_matches_float() {
    let rows = vec![vec![dec("5"), dec("2.3")], vec![dec("2.3"), dec("1")]];
    let result = solver().decompose_rows(rows, EigenOptions::new()).unwrap();
    assert!(result.values.as_slice().iter().all(|v| v.kind() == ScalarKind::Decimal));

    let float = solver()
        .decompose_rows(vec![vec![5.0, 2.3], vec![2.3, 1.0]], EigenOptions::new())
        .unwrap();
    assert_allclose_f64(&real_values(&result), &real_values(&float), 1e-10, 1e-12, "decimal vs float");

    for pair in result.eigenvectors.unwrap() {
        assert!(pair.vector.as_slice().iter().all(|v| v.kind() == ScalarKind::Decimal));
    }
}

#[test]
fn test_mixed_float_and_decimal_promotes_to_decimal() {
    let rows = vec![
        vec![Scalar::Float(2.0), Scalar::Decimal(dec("1"))],
        vec![Scalar::Decimal(dec("1")), Scalar::Float(2.0)],
    ];
    let result = solver()
        .decompose_rows(rows, EigenOptions::new().precision(dec("0.0000000001")))
        .unwrap();
    let values = result.values.to_vec();
    assert!(values.iter().all(|v| v.kind() == ScalarKind::Decimal));
    assert_allclose_f64(&real_values(&result), &[1.0, 3.0], 0.0, 1e-10, "mixed");
}

#[test]
fn test_decimal_entries_near_range_limit() {
    let big = dec("40000000000000000000000000000");
    let rows = vec![vec![dec("10"), big], vec![big, dec("20")]];
    let result = solver().decompose_rows(rows, EigenOptions::new()).unwrap();

    let values = real_values(&result);
    assert!(result.values.as_slice().iter().all(|v| v.kind() == ScalarKind::Decimal));
    assert_allclose_f64(&values, &[-4e28, 4e28], 1e-12, 0.0, "near-limit values");
    assert_eq!(result.eigenvectors.map(|p| p.len()), Some(2));
}

#[test]
fn test_decimal_overflow_is_reported() {
    let big = dec("70000000000000000000000000000");
    let rows = vec![vec![big, big], vec![big, -big]];
    let err = solver().decompose_rows(rows, EigenOptions::new()).unwrap_err();
    assert!(matches!(
        err,
        Error::Overflow {
            kind: ScalarKind::Decimal,
            ..
        }
    ));
}
