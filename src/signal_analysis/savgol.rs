// src/signal_analysis/savgol.rs

use ndarray::Array1;

use crate::error::{AnalysisError, Result};

/// Savitzky-Golay smoothing: a degree-`polyorder` polynomial is fit over a
/// sliding window of `window` samples and evaluated at the window center.
///
/// Output length always equals input length. Interior points use the
/// precomputed central convolution weights; the first and last `window / 2`
/// points are produced by refitting the polynomial over the first/last full
/// window and evaluating it at the edge positions, so the edges are
/// extrapolated rather than dropped.
pub fn savgol_filter(data: &Array1<f64>, window: usize, polyorder: usize) -> Result<Array1<f64>> {
    if window % 2 == 0 {
        return Err(AnalysisError::InvalidParameter(format!(
            "smoothing window must be odd, got {}",
            window
        )));
    }
    if window < polyorder + 2 {
        return Err(AnalysisError::InvalidParameter(format!(
            "smoothing window {} too short for polynomial order {}",
            window, polyorder
        )));
    }
    let n = data.len();
    if window > n {
        return Err(AnalysisError::InsufficientData {
            needed: window,
            got: n,
        });
    }

    let half = window / 2;
    let mut smoothed = Array1::<f64>::zeros(n);

    // Interior: one weight vector, reused as a convolution kernel.
    let weights = central_weights(window, polyorder)?;
    for i in half..n - half {
        let mut acc = 0.0;
        for (j, w) in weights.iter().enumerate() {
            acc += w * data[i - half + j];
        }
        smoothed[i] = acc;
    }

    // Leading edge: polynomial over the first full window, evaluated at the
    // positions the sliding window cannot center on.
    let xs: Vec<f64> = (0..window).map(|i| i as f64).collect();
    let head: Vec<f64> = data.iter().take(window).copied().collect();
    let head_coeffs = polyfit(&xs, &head, polyorder)?;
    for i in 0..half {
        smoothed[i] = polyval(&head_coeffs, i as f64);
    }

    // Trailing edge, same treatment over the last full window.
    let tail: Vec<f64> = data.iter().skip(n - window).copied().collect();
    let tail_coeffs = polyfit(&xs, &tail, polyorder)?;
    for i in n - half..n {
        smoothed[i] = polyval(&tail_coeffs, (i - (n - window)) as f64);
    }

    Ok(smoothed)
}

/// Convolution weights for the window-center fitted value.
///
/// With the design matrix A over offsets -h..=h, the fitted value at the
/// center is the constant coefficient of the least-squares polynomial,
/// which reduces to the dot product of the samples with `A * (AtA)^-1 e0`.
fn central_weights(window: usize, polyorder: usize) -> Result<Vec<f64>> {
    let half = (window / 2) as isize;
    let terms = polyorder + 1;

    // AtA and the unit vector selecting the constant coefficient.
    let mut ata = vec![vec![0.0f64; terms]; terms];
    for offset in -half..=half {
        let x = offset as f64;
        let mut powers = vec![1.0f64; terms];
        for k in 1..terms {
            powers[k] = powers[k - 1] * x;
        }
        for r in 0..terms {
            for c in 0..terms {
                ata[r][c] += powers[r] * powers[c];
            }
        }
    }
    let mut e0 = vec![0.0f64; terms];
    e0[0] = 1.0;
    let z = solve_linear(ata, e0)?;

    let mut weights = Vec::with_capacity(window);
    for offset in -half..=half {
        let x = offset as f64;
        let mut acc = 0.0;
        let mut xp = 1.0;
        for zk in &z {
            acc += zk * xp;
            xp *= x;
        }
        weights.push(acc);
    }
    Ok(weights)
}

/// Least-squares polynomial fit via the normal equations.
fn polyfit(xs: &[f64], ys: &[f64], degree: usize) -> Result<Vec<f64>> {
    let terms = degree + 1;
    let mut ata = vec![vec![0.0f64; terms]; terms];
    let mut aty = vec![0.0f64; terms];
    for (&x, &y) in xs.iter().zip(ys.iter()) {
        let mut powers = vec![1.0f64; terms];
        for k in 1..terms {
            powers[k] = powers[k - 1] * x;
        }
        for r in 0..terms {
            aty[r] += powers[r] * y;
            for c in 0..terms {
                ata[r][c] += powers[r] * powers[c];
            }
        }
    }
    solve_linear(ata, aty)
}

fn polyval(coeffs: &[f64], x: f64) -> f64 {
    let mut acc = 0.0;
    for &c in coeffs.iter().rev() {
        acc = acc * x + c;
    }
    acc
}

/// Gaussian elimination with partial pivoting for the small normal-equation
/// systems above (at most polyorder + 1 unknowns).
fn solve_linear(mut a: Vec<Vec<f64>>, mut b: Vec<f64>) -> Result<Vec<f64>> {
    let n = b.len();
    for col in 0..n {
        let mut pivot_row = col;
        for row in col + 1..n {
            if a[row][col].abs() > a[pivot_row][col].abs() {
                pivot_row = row;
            }
        }
        if a[pivot_row][col].abs() < 1e-12 {
            return Err(AnalysisError::InvalidParameter(
                "singular system in polynomial fit".to_string(),
            ));
        }
        a.swap(col, pivot_row);
        b.swap(col, pivot_row);

        for row in col + 1..n {
            let factor = a[row][col] / a[col][col];
            for k in col..n {
                a[row][k] -= factor * a[col][k];
            }
            b[row] -= factor * b[col];
        }
    }
    let mut x = vec![0.0f64; n];
    for row in (0..n).rev() {
        let mut acc = b[row];
        for k in row + 1..n {
            acc -= a[row][k] * x[k];
        }
        x[row] = acc / a[row][row];
    }
    Ok(x)
}
