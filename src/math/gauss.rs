//! Dense Gaussian elimination with partial pivoting

use super::{max_abs, Mat, Vec};
use crate::error::{FEAError, FEAResult};

/// Pivot threshold, relative to the largest absolute entry of the matrix
pub const PIVOT_TOLERANCE: f64 = 1e-12;

/// Solve `a * x = b`
///
/// Each column is pivoted on the largest-magnitude candidate row, eliminated
/// forward, then the triangular system is back-substituted. A pivot below
/// `PIVOT_TOLERANCE * max|a|` means the unknown for that column is not
/// determined by the system and `FEAError::Singular` is returned with the
/// (unpermuted) column index. No unknown is ever defaulted to zero.
pub fn solve(a: &Mat, b: &Vec) -> FEAResult<Vec> {
    let n = a.nrows();
    if a.ncols() != n {
        return Err(FEAError::shape("solve (square)", a.shape(), a.shape()));
    }
    if b.len() != n {
        return Err(FEAError::shape("solve", a.shape(), (b.len(), 1)));
    }
    if n == 0 {
        return Ok(Vec::zeros(0));
    }

    let scale = max_abs(a);
    if scale == 0.0 || !scale.is_finite() {
        return Err(FEAError::Singular { column: 0 });
    }
    let tol = PIVOT_TOLERANCE * scale;

    let mut m = a.clone();
    let mut rhs = b.clone();

    // Forward elimination
    for k in 0..n {
        let mut pivot_row = k;
        let mut pivot_mag = m[(k, k)].abs();
        for i in (k + 1)..n {
            let mag = m[(i, k)].abs();
            if mag > pivot_mag {
                pivot_mag = mag;
                pivot_row = i;
            }
        }

        if pivot_mag < tol {
            return Err(FEAError::Singular { column: k });
        }
        if pivot_row != k {
            m.swap_rows(k, pivot_row);
            rhs.swap_rows(k, pivot_row);
        }

        let pivot = m[(k, k)];
        for i in (k + 1)..n {
            let factor = m[(i, k)] / pivot;
            if factor == 0.0 {
                continue;
            }
            for j in k..n {
                m[(i, j)] -= factor * m[(k, j)];
            }
            rhs[i] -= factor * rhs[k];
        }
    }

    // Back substitution
    let mut x = Vec::zeros(n);
    for i in (0..n).rev() {
        let mut sum = rhs[i];
        for j in (i + 1)..n {
            sum -= m[(i, j)] * x[j];
        }
        x[i] = sum / m[(i, i)];
    }

    Ok(x)
}
