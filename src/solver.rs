// =============================================================================
// SOLVER.RS — Dense linear systems
//
// Gaussian elimination with partial pivoting over an N×N system. Knows
// nothing about geometry; the homography estimator is one caller of many.
// =============================================================================

use crate::error::MapError;

/// Smallest pivot magnitude accepted before the system is declared singular.
pub const DEFAULT_PIVOT_TOLERANCE: f64 = 1e-10;

/// An N×N coefficient matrix (row-major) plus its right-hand side.
#[derive(Clone, Debug, PartialEq)]
pub struct LinearSystem {
    n: usize,
    a: Vec<f64>,
    b: Vec<f64>,
}

impl LinearSystem {
    /// An all-zero `n`×`n` system.
    pub fn zeros(n: usize) -> Self {
        Self { n, a: vec![0.0; n * n], b: vec![0.0; n] }
    }

    /// Build a system from coefficient rows and a right-hand side.
    ///
    /// Every row must have exactly `rows.len()` entries and `rhs` must have
    /// the same length, otherwise `DimensionMismatch` is returned.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R], rhs: &[f64]) -> Result<Self, MapError> {
        let n = rows.len();
        if rhs.len() != n {
            return Err(MapError::DimensionMismatch { expected: n, found: rhs.len() });
        }
        let mut system = Self::zeros(n);
        for (i, row) in rows.iter().enumerate() {
            system.set_row(i, row.as_ref(), rhs[i])?;
        }
        Ok(system)
    }

    /// Number of unknowns.
    pub fn size(&self) -> usize {
        self.n
    }

    /// Overwrite row `row` with `coeffs` and its right-hand side with `rhs`.
    pub fn set_row(&mut self, row: usize, coeffs: &[f64], rhs: f64) -> Result<(), MapError> {
        if row >= self.n {
            return Err(MapError::DimensionMismatch { expected: self.n, found: row + 1 });
        }
        if coeffs.len() != self.n {
            return Err(MapError::DimensionMismatch { expected: self.n, found: coeffs.len() });
        }
        self.a[row * self.n..(row + 1) * self.n].copy_from_slice(coeffs);
        self.b[row] = rhs;
        Ok(())
    }

    pub fn coefficient(&self, row: usize, col: usize) -> f64 {
        self.a[row * self.n + col]
    }

    pub fn rhs(&self, row: usize) -> f64 {
        self.b[row]
    }

    /// Solve with [`DEFAULT_PIVOT_TOLERANCE`].
    pub fn solve(&self) -> Result<Vec<f64>, MapError> {
        self.solve_with_tolerance(DEFAULT_PIVOT_TOLERANCE)
    }

    /// Solve `A·x = b`, failing with `SingularMatrix` as soon as any pivot
    /// (after row exchange) is smaller than `tolerance` in magnitude.
    ///
    /// `self` is left untouched; elimination runs on private copies.
    pub fn solve_with_tolerance(&self, tolerance: f64) -> Result<Vec<f64>, MapError> {
        let n = self.n;
        let mut a = self.a.clone();
        let mut b = self.b.clone();

        for i in 0..n {
            let mut pivot_row = i;
            for r in (i + 1)..n {
                if a[r * n + i].abs() > a[pivot_row * n + i].abs() {
                    pivot_row = r;
                }
            }

            if pivot_row != i {
                swap_rows(&mut a, n, i, pivot_row);
                b.swap(i, pivot_row);
            }

            let pivot = a[i * n + i];
            if pivot.is_nan() || pivot.abs() < tolerance {
                return Err(MapError::SingularMatrix);
            }

            for k in (i + 1)..n {
                let factor = a[k * n + i] / pivot;
                if factor == 0.0 {
                    continue;
                }
                for j in i..n {
                    a[k * n + j] -= factor * a[i * n + j];
                }
                b[k] -= factor * b[i];
            }
        }

        Ok(back_substitute(&a, &b, n))
    }
}

/// Solve `rows · x = rhs` for a square system given as borrowed rows.
///
/// ```
/// let x = pagewarp::solver::solve(&[[2.0, 1.0], [1.0, 3.0]], &[3.0, 5.0]).unwrap();
/// assert!((x[0] - 0.8).abs() < 1e-12 && (x[1] - 1.4).abs() < 1e-12);
/// ```
pub fn solve<R: AsRef<[f64]>>(rows: &[R], rhs: &[f64]) -> Result<Vec<f64>, MapError> {
    LinearSystem::from_rows(rows, rhs)?.solve()
}

fn swap_rows(a: &mut [f64], n: usize, r: usize, s: usize) {
    let (lo, hi) = if r < s { (r, s) } else { (s, r) };
    let (head, tail) = a.split_at_mut(hi * n);
    head[lo * n..(lo + 1) * n].swap_with_slice(&mut tail[..n]);
}

/// Upper-triangular `a` (row-major, n×n) → solution vector.
fn back_substitute(a: &[f64], b: &[f64], n: usize) -> Vec<f64> {
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let mut sum = b[i];
        for j in (i + 1)..n {
            sum -= a[i * n + j] * x[j];
        }
        x[i] = sum / a[i * n + i];
    }
    x
}

// ── Tests ──────────────────────────────────────────────────────────────────────
