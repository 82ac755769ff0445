//! Ordinary least squares via the normal equations.
//!
//! The design matrices here are tiny (a handful of monomial terms at most),
//! so a dense solve with partial pivoting is plenty. Rows containing any
//! non-finite value must be filtered out by the caller before reaching this
//! module.

use ndarray::Array2;

use crate::error::ModelError;

/// Pivots smaller than this are treated as zero during elimination.
const PIVOT_EPS: f64 = 1e-12;

/// Solves `min ||X b - y||` for `b` where `x` is `(n, k)` row major.
///
/// Requires `n >= k`; fewer rows than unknowns cannot determine the
/// coefficients and reports [`ModelError::InsufficientData`].
pub(crate) fn solve_least_squares(x: &Array2<f64>, y: &[f64]) -> Result<Vec<f64>, ModelError> {
    let n = x.nrows();
    let k = x.ncols();
    debug_assert_eq!(n, y.len());
    if n < k {
        return Err(ModelError::InsufficientData { needed: k, got: n });
    }

    // Normal equations: (X^T X) b = X^T y.
    let mut xtx = vec![0.0; k * k];
    let mut xty = vec![0.0; k];
    for row in 0..n {
        for i in 0..k {
            let xi = x[[row, i]];
            xty[i] += xi * y[row];
            for j in i..k {
                xtx[i * k + j] += xi * x[[row, j]];
            }
        }
    }
    // Mirror the upper triangle; the accumulation above only filled i <= j.
    for i in 0..k {
        for j in 0..i {
            xtx[i * k + j] = xtx[j * k + i];
        }
    }

    gaussian_solve(&mut xtx, &mut xty, k)
}

/// Gaussian elimination with partial pivoting on a dense `k x k` system.
///
/// `a` is row major and both `a` and `b` are consumed as scratch space.
fn gaussian_solve(a: &mut [f64], b: &mut [f64], k: usize) -> Result<Vec<f64>, ModelError> {
    for col in 0..k {
        let mut pivot_row = col;
        let mut pivot_abs = a[col * k + col].abs();
        for row in (col + 1)..k {
            let candidate = a[row * k + col].abs();
            if candidate > pivot_abs {
                pivot_row = row;
                pivot_abs = candidate;
            }
        }
        if pivot_abs < PIVOT_EPS {
            return Err(ModelError::SingularSystem { size: k });
        }
        if pivot_row != col {
            for j in 0..k {
                a.swap(col * k + j, pivot_row * k + j);
            }
            b.swap(col, pivot_row);
        }

        let pivot = a[col * k + col];
        for row in (col + 1)..k {
            let factor = a[row * k + col] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in col..k {
                a[row * k + j] -= factor * a[col * k + j];
            }
            b[row] -= factor * b[col];
        }
    }

    let mut solution = vec![0.0; k];
    for col in (0..k).rev() {
        let mut acc = b[col];
        for j in (col + 1)..k {
            acc -= a[col * k + j] * solution[j];
        }
        solution[col] = acc / a[col * k + col];
    }
    Ok(solution)
}
