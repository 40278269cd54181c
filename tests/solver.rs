use pagewarp::MapError;
use pagewarp::solver::*;

fn assert_close(actual: &[f64], expected: &[f64]) {
    assert_eq!(actual.len(), expected.len());
    for (a, e) in actual.iter().zip(expected) {
        assert!((a - e).abs() < 1e-9, "expected {expected:?}, got {actual:?}");
    }
}

// ── Well-conditioned systems ─────────────────────────────────────────────────

#[test]
fn test_solves_2x2() {
    let x = solve(&[[2.0, 1.0], [1.0, 3.0]], &[3.0, 5.0]).unwrap();
    assert_close(&x, &[0.8, 1.4]);
}

#[test]
fn test_solves_3x3() {
    let rows = [[2.0, 1.0, -1.0], [-3.0, -1.0, 2.0], [-2.0, 1.0, 2.0]];
    let x = solve(&rows, &[8.0, -11.0, -3.0]).unwrap();
    assert_close(&x, &[2.0, 3.0, -1.0]);
}

#[test]
fn test_zero_leading_entry_needs_row_swap() {
    // Without pivoting the first step would divide by zero.
    let x = solve(&[[0.0, 1.0], [1.0, 0.0]], &[2.0, 3.0]).unwrap();
    assert_close(&x, &[3.0, 2.0]);
}

#[test]
fn test_accepts_vec_rows() {
    let rows = vec![vec![4.0]];
    let x = solve(&rows, &[2.0]).unwrap();
    assert_close(&x, &[0.5]);
}

#[test]
fn test_empty_system_has_empty_solution() {
    let rows: [[f64; 0]; 0] = [];
    assert_eq!(solve(&rows, &[]).unwrap(), Vec::<f64>::new());
}

// ── Singular systems ──────────────────────────────────────────────────────────

#[test]
fn test_singular_2x2_is_rejected() {
    let err = solve(&[[1.0, 2.0], [2.0, 4.0]], &[1.0, 1.0]).unwrap_err();
    assert_eq!(err, MapError::SingularMatrix);
}

#[test]
fn test_singularity_detected_at_last_pivot() {
    // First two pivots are fine; the duplicated row only shows up at column 2.
    let rows = [[1.0, 0.0, 0.0], [0.0, 1.0, 1.0], [0.0, 1.0, 1.0]];
    assert_eq!(solve(&rows, &[1.0, 2.0, 3.0]), Err(MapError::SingularMatrix));
}

#[test]
fn test_tolerance_is_configurable() {
    let system = LinearSystem::from_rows(&[[1e-12]], &[1.0]).unwrap();
    assert_eq!(system.solve(), Err(MapError::SingularMatrix));

    let x = system.solve_with_tolerance(1e-15).unwrap();
    assert!((x[0] - 1e12).abs() < 1.0);
}

#[test]
fn test_nan_pivot_is_singular() {
    assert_eq!(solve(&[[f64::NAN]], &[1.0]), Err(MapError::SingularMatrix));
}

// ── Shape checks ──────────────────────────────────────────────────────────────

#[test]
fn test_rhs_length_mismatch() {
    let err = solve(&[[1.0, 0.0], [0.0, 1.0]], &[1.0, 2.0, 3.0]).unwrap_err();
    assert_eq!(err, MapError::DimensionMismatch { expected: 2, found: 3 });
}

#[test]
fn test_ragged_rows_are_rejected() {
    let rows = vec![vec![1.0, 2.0], vec![3.0]];
    let err = solve(&rows, &[1.0, 2.0]).unwrap_err();
    assert_eq!(err, MapError::DimensionMismatch { expected: 2, found: 1 });
}

#[test]
fn test_set_row_out_of_range() {
    let mut system = LinearSystem::zeros(2);
    assert!(system.set_row(2, &[1.0, 1.0], 0.0).is_err());
    assert!(system.set_row(1, &[1.0, 1.0], 0.0).is_ok());
}

// ── Inputs are not consumed ───────────────────────────────────────────────────

#[test]
fn test_solve_leaves_system_untouched() {
    let rows = [[0.0, 2.0, 1.0], [1.0, -2.0, -3.0], [-1.0, 1.0, 2.0]];
    let rhs = [-8.0, 0.0, 3.0];
    let system = LinearSystem::from_rows(&rows, &rhs).unwrap();
    let before = system.clone();

    let first = system.solve().unwrap();
    assert_eq!(system, before);
    assert_eq!(system.coefficient(0, 0), 0.0);
    assert_eq!(system.rhs(2), 3.0);

    let second = system.solve().unwrap();
    assert_eq!(first, second);
    assert_close(&first, &[-4.0, -5.0, 2.0]);
}
