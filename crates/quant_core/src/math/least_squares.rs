//! Polynomial least-squares fitting.

use crate::types::{InterpolationError, LinearAlgebraError};

/// Fit a polynomial of the given degree to `(xs, ys)` by least squares.
///
/// Solves the normal equations `Σ x^(i+j) a_j = Σ x^i y` with Gaussian
/// elimination and partial pivoting. Coefficients are returned in
/// ascending order, `[a0, a1, ..., a_degree]`.
///
/// # Errors
///
/// - `InvalidInput` if `xs` and `ys` differ in length
/// - `InsufficientData` if there are fewer than `degree + 1` points
/// - `LinearAlgebra(Singular)` if the normal matrix is singular (for
///   instance, too few distinct abscissae)
///
/// # Examples
/// ```
/// use quant_core::math::least_squares::{evaluate_polynomial, fit_polynomial};
///
/// let xs = [0.0, 1.0, 2.0, 3.0];
/// let ys = [1.0, 3.0, 5.0, 7.0];
/// let coeffs = fit_polynomial(&xs, &ys, 1).unwrap();
/// assert!((coeffs[0] - 1.0).abs() < 1e-10);
/// assert!((coeffs[1] - 2.0).abs() < 1e-10);
/// assert!((evaluate_polynomial(&coeffs, 4.0) - 9.0).abs() < 1e-10);
/// ```
pub fn fit_polynomial(
    xs: &[f64],
    ys: &[f64],
    degree: usize,
) -> Result<Vec<f64>, InterpolationError> {
    if xs.len() != ys.len() {
        return Err(InterpolationError::InvalidInput(format!(
            "xs and ys must have same length: got {} and {}",
            xs.len(),
            ys.len()
        )));
    }
    let n = degree + 1;
    if xs.len() < n {
        return Err(InterpolationError::InsufficientData {
            got: xs.len(),
            need: n,
        });
    }

    // augmented normal matrix [A | b]
    let mut gauss = vec![vec![0.0; n + 1]; n];
    for (i, row) in gauss.iter_mut().enumerate() {
        for (j, cell) in row.iter_mut().take(n).enumerate() {
            *cell = xs.iter().map(|x| x.powi((i + j) as i32)).sum();
        }
        row[n] = xs
            .iter()
            .zip(ys)
            .map(|(x, y)| x.powi(i as i32) * y)
            .sum();
    }

    Ok(gaussian_elimination(gauss)?)
}

/// Evaluate `Σ coeffs[i] x^i` with Horner's rule.
pub fn evaluate_polynomial(coeffs: &[f64], x: f64) -> f64 {
    coeffs.iter().rev().fold(0.0, |acc, c| acc * x + c)
}

/// Solve an augmented `n × (n + 1)` system in place.
fn gaussian_elimination(mut gauss: Vec<Vec<f64>>) -> Result<Vec<f64>, LinearAlgebraError> {
    let n = gauss.len();
    for j in 0..n {
        let pivot = (j..n)
            .max_by(|&a, &b| gauss[a][j].abs().total_cmp(&gauss[b][j].abs()))
            .unwrap_or(j);
        if gauss[pivot][j] == 0.0 {
            return Err(LinearAlgebraError::Singular { index: j });
        }
        gauss.swap(j, pivot);

        for i in j + 1..n {
            let factor = gauss[i][j] / gauss[j][j];
            for m in j..=n {
                gauss[i][m] -= factor * gauss[j][m];
            }
        }
    }

    let mut x = vec![0.0; n];
    for i in (0..n).rev() {
        let s: f64 = (i + 1..n).map(|j| gauss[i][j] * x[j]).sum();
        x[i] = (gauss[i][n] - s) / gauss[i][i];
    }
    Ok(x)
}
