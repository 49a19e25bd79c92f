//! Small dense and tridiagonal linear solvers.
//!
//! - `solve_tridiagonal`: Thomas algorithm, O(n)
//! - `solve_lu`: Doolittle LU factorisation without pivoting, O(n³)

use crate::types::LinearAlgebraError;

/// Solve a tridiagonal system `A x = rhs` with the Thomas algorithm.
///
/// `sub`, `diag` and `sup` are the sub-, main and super-diagonals. For an
/// `n × n` system `diag` and `rhs` have length `n`, `sub` and `sup` have
/// length `n - 1` (`sub[i]` is `A[i+1][i]`, `sup[i]` is `A[i][i+1]`).
///
/// No pivoting is performed; diagonally dominant systems such as the cubic
/// spline moment equations are always safe.
///
/// # Examples
/// ```
/// use quant_core::math::linear_algebra::solve_tridiagonal;
///
/// // [2 1 0; 1 2 1; 0 1 2] x = [4, 8, 8]
/// let x = solve_tridiagonal(&[1.0, 1.0], &[2.0, 2.0, 2.0], &[1.0, 1.0], &[4.0, 8.0, 8.0]).unwrap();
/// assert!((x[0] - 1.0).abs() < 1e-12);
/// assert!((x[1] - 2.0).abs() < 1e-12);
/// assert!((x[2] - 3.0).abs() < 1e-12);
/// ```
pub fn solve_tridiagonal(
    sub: &[f64],
    diag: &[f64],
    sup: &[f64],
    rhs: &[f64],
) -> Result<Vec<f64>, LinearAlgebraError> {
    let n = diag.len();
    if rhs.len() != n {
        return Err(LinearAlgebraError::DimensionMismatch {
            expected: n,
            got: rhs.len(),
        });
    }
    if n == 0 {
        return Ok(Vec::new());
    }
    for band in [sub, sup] {
        if band.len() != n - 1 {
            return Err(LinearAlgebraError::DimensionMismatch {
                expected: n - 1,
                got: band.len(),
            });
        }
    }

    // forward sweep
    let mut u = vec![0.0; n];
    let mut y = vec![0.0; n];
    u[0] = diag[0];
    y[0] = rhs[0];
    for k in 1..n {
        if u[k - 1] == 0.0 {
            return Err(LinearAlgebraError::Singular { index: k - 1 });
        }
        let l = sub[k - 1] / u[k - 1];
        u[k] = diag[k] - l * sup[k - 1];
        y[k] = rhs[k] - l * y[k - 1];
    }
    if u[n - 1] == 0.0 {
        return Err(LinearAlgebraError::Singular { index: n - 1 });
    }

    // back substitution
    let mut x = vec![0.0; n];
    x[n - 1] = y[n - 1] / u[n - 1];
    for m in (0..n - 1).rev() {
        x[m] = (y[m] - sup[m] * x[m + 1]) / u[m];
    }
    Ok(x)
}

/// Solve a dense square system `A x = rhs` by Doolittle LU factorisation.
///
/// `matrix` is row-major; every row must have length `rhs.len()`.
///
/// # Errors
///
/// [`LinearAlgebraError::DimensionMismatch`] for ragged input and
/// [`LinearAlgebraError::Singular`] when a zero pivot appears (no pivoting
/// is attempted).
pub fn solve_lu(matrix: &[Vec<f64>], rhs: &[f64]) -> Result<Vec<f64>, LinearAlgebraError> {
    let n = rhs.len();
    if matrix.len() != n {
        return Err(LinearAlgebraError::DimensionMismatch {
            expected: n,
            got: matrix.len(),
        });
    }
    if let Some(row) = matrix.iter().find(|row| row.len() != n) {
        return Err(LinearAlgebraError::DimensionMismatch {
            expected: n,
            got: row.len(),
        });
    }

    let mut l = vec![vec![0.0; n]; n];
    let mut u = vec![vec![0.0; n]; n];
    for i in 0..n {
        for j in i..n {
            let s: f64 = (0..i).map(|k| l[i][k] * u[k][j]).sum();
            u[i][j] = matrix[i][j] - s;
        }
        if u[i][i] == 0.0 {
            return Err(LinearAlgebraError::Singular { index: i });
        }
        l[i][i] = 1.0;
        for j in i + 1..n {
            let s: f64 = (0..i).map(|k| l[j][k] * u[k][i]).sum();
            l[j][i] = (matrix[j][i] - s) / u[i][i];
        }
    }

    // L y = b
    let mut y = vec![0.0; n];
    for i in 0..n {
        let s: f64 = (0..i).map(|j| l[i][j] * y[j]).sum();
        y[i] = rhs[i] - s;
    }

    // U x = y
    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let s: f64 = (i + 1..n).map(|j| u[i][j] * x[j]).sum();
        x[i] = (y[i] - s) / u[i][i];
    }
    Ok(x)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_tridiagonal_matches_dense() {
        let sub = [1.0, 0.5, 2.0];
        let diag = [4.0, 5.0, 6.0, 7.0];
        let sup = [1.5, 1.0, 0.5];
        let rhs = [1.0, 2.0, 3.0, 4.0];
        let dense = vec![
            vec![4.0, 1.5, 0.0, 0.0],
            vec![1.0, 5.0, 1.0, 0.0],
            vec![0.0, 0.5, 6.0, 0.5],
            vec![0.0, 0.0, 2.0, 7.0],
        ];

        let a = solve_tridiagonal(&sub, &diag, &sup, &rhs).unwrap();
        let b = solve_lu(&dense, &rhs).unwrap();
        for (x, y) in a.iter().zip(b.iter()) {
            assert_abs_diff_eq!(x, y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_tridiagonal_single_equation() {
        let x = solve_tridiagonal(&[], &[4.0], &[], &[2.0]).unwrap();
        assert_eq!(x, vec![0.5]);
    }

    #[test]
    fn test_tridiagonal_dimension_mismatch() {
        assert_eq!(
            solve_tridiagonal(&[1.0], &[1.0, 1.0], &[1.0, 1.0], &[1.0, 1.0]),
            Err(LinearAlgebraError::DimensionMismatch {
                expected: 1,
                got: 2
            })
        );
        assert!(solve_tridiagonal(&[1.0], &[1.0, 1.0], &[1.0], &[1.0]).is_err());
    }

    #[test]
    fn test_tridiagonal_singular() {
        assert_eq!(
            solve_tridiagonal(&[1.0], &[0.0, 1.0], &[1.0], &[1.0, 1.0]),
            Err(LinearAlgebraError::Singular { index: 0 })
        );
    }

    #[test]
    fn test_lu_solves_dense_system() {
        let a = vec![
            vec![2.0, 1.0, 1.0],
            vec![4.0, -6.0, 0.0],
            vec![-2.0, 7.0, 2.0],
        ];
        let x = solve_lu(&a, &[5.0, -2.0, 9.0]).unwrap();
        assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[1], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(x[2], 2.0, epsilon = 1e-12);
    }

    #[test]
    fn test_lu_errors() {
        let ragged = vec![vec![1.0, 2.0], vec![3.0]];
        assert!(matches!(
            solve_lu(&ragged, &[1.0, 1.0]),
            Err(LinearAlgebraError::DimensionMismatch { .. })
        ));
        let singular = vec![vec![1.0, 2.0], vec![2.0, 4.0]];
        assert_eq!(
            solve_lu(&singular, &[1.0, 1.0]),
            Err(LinearAlgebraError::Singular { index: 1 })
        );
    }
}
