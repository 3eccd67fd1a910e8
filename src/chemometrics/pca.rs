// src/chemometrics/pca.rs

use ndarray::{Array1, Array2};

use crate::error::{AnalysisError, Result};

/// Principal-component projection of a batch matrix.
#[derive(Debug, Clone)]
pub struct PcaResult {
    /// Component scores, one row per input row, one column per component.
    pub scores: Array2<f64>,
    /// Each component's share of the total variance, in component order.
    pub explained_variance_ratio: Vec<f64>,
}

/// Fits a `components`-axis PCA on `matrix` and projects every row onto it.
///
/// Batch matrices here are short and wide (a handful of scans, hundreds of
/// current samples), so instead of eigendecomposing the large column
/// covariance we decompose the small row Gram matrix `X Xt`: its nonzero
/// eigenvalues are the squared singular values of `X` and `u_k * sqrt(l_k)`
/// is exactly the k-th score column of the SVD projection.
///
/// Eigenvector signs are fixed deterministically (largest-magnitude entry
/// made positive), so all rows of one invocation share the same orientation.
/// The absolute orientation is still implementation-defined; callers must
/// not rely on it.
pub fn principal_components(matrix: &Array2<f64>, components: usize) -> Result<PcaResult> {
    let rows = matrix.nrows();
    let cols = matrix.ncols();
    let max_components = rows.min(cols);
    if components == 0 || components > max_components {
        return Err(AnalysisError::InvalidComponentCount {
            requested: components,
            max: max_components,
        });
    }

    // Center columns; input is usually standardized already but the fit must
    // not depend on that.
    let mut centered = matrix.clone();
    for mut col in centered.columns_mut() {
        let mean = col.sum() / rows as f64;
        col.mapv_inplace(|v| v - mean);
    }

    let gram = centered.dot(&centered.t());
    let (eigenvalues, eigenvectors) = jacobi_eigen(&gram);

    // Largest variance first.
    let mut order: Vec<usize> = (0..rows).collect();
    order.sort_by(|&a, &b| {
        eigenvalues[b]
            .partial_cmp(&eigenvalues[a])
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    // Rounding can push near-zero eigenvalues slightly negative.
    let total_variance: f64 = eigenvalues.iter().map(|&l| l.max(0.0)).sum();

    let mut scores = Array2::<f64>::zeros((rows, components));
    let mut explained_variance_ratio = Vec::with_capacity(components);

    for (k, &idx) in order.iter().take(components).enumerate() {
        let lambda = eigenvalues[idx].max(0.0);
        let mut axis: Array1<f64> = eigenvectors.column(idx).to_owned();

        // Deterministic sign: the dominant entry of each axis is positive.
        let dominant = axis
            .iter()
            .fold(0.0f64, |acc, &v| if v.abs() > acc.abs() { v } else { acc });
        if dominant < 0.0 {
            axis.mapv_inplace(|v| -v);
        }

        let sigma = lambda.sqrt();
        for r in 0..rows {
            scores[[r, k]] = axis[r] * sigma;
        }
        explained_variance_ratio.push(if total_variance > f64::EPSILON {
            lambda / total_variance
        } else {
            0.0
        });
    }

    Ok(PcaResult {
        scores,
        explained_variance_ratio,
    })
}

/// Cyclic Jacobi eigendecomposition of a symmetric matrix.
///
/// Returns unsorted eigenvalues and the matching eigenvectors as columns.
/// Sized for the small row Gram matrices this crate produces.
fn jacobi_eigen(sym: &Array2<f64>) -> (Vec<f64>, Array2<f64>) {
    let n = sym.nrows();
    let mut a = sym.clone();
    let mut v = Array2::<f64>::eye(n);

    const MAX_SWEEPS: usize = 100;
    for _ in 0..MAX_SWEEPS {
        let off_diagonal: f64 = (0..n)
            .flat_map(|p| (p + 1..n).map(move |q| (p, q)))
            .map(|(p, q)| a[[p, q]] * a[[p, q]])
            .sum();
        let scale: f64 = (0..n).map(|i| a[[i, i]] * a[[i, i]]).sum::<f64>() + off_diagonal;
        if off_diagonal <= 1e-24 * scale.max(f64::MIN_POSITIVE) {
            break;
        }

        for p in 0..n {
            for q in p + 1..n {
                let apq = a[[p, q]];
                if apq.abs() < 1e-300 {
                    continue;
                }
                let tau = (a[[q, q]] - a[[p, p]]) / (2.0 * apq);
                let t = if tau >= 0.0 {
                    1.0 / (tau + (1.0 + tau * tau).sqrt())
                } else {
                    1.0 / (tau - (1.0 + tau * tau).sqrt())
                };
                let c = 1.0 / (1.0 + t * t).sqrt();
                let s = t * c;

                for k in 0..n {
                    let akp = a[[k, p]];
                    let akq = a[[k, q]];
                    a[[k, p]] = c * akp - s * akq;
                    a[[k, q]] = s * akp + c * akq;
                }
                for k in 0..n {
                    let apk = a[[p, k]];
                    let aqk = a[[q, k]];
                    a[[p, k]] = c * apk - s * aqk;
                    a[[q, k]] = s * apk + c * aqk;
                }
                for k in 0..n {
                    let vkp = v[[k, p]];
                    let vkq = v[[k, q]];
                    v[[k, p]] = c * vkp - s * vkq;
                    v[[k, q]] = s * vkp + c * vkq;
                }
            }
        }
    }

    let eigenvalues: Vec<f64> = (0..n).map(|i| a[[i, i]]).collect();
    (eigenvalues, v)
}
