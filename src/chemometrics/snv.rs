// src/chemometrics/snv.rs

use ndarray::Array2;

/// Standard Normal Variate: each row is centered on its own mean and scaled
/// by its own population standard deviation, so peak shape rather than
/// magnitude drives the downstream comparison.
///
/// Rows with zero variance divide by 1 instead of 0. That guard is part of
/// the contract: a constant row comes out as all zeros, never NaN.
pub fn apply_snv(matrix: &Array2<f64>) -> Array2<f64> {
    let mut normalized = matrix.clone();
    for mut row in normalized.rows_mut() {
        let n = row.len() as f64;
        if n == 0.0 {
            continue;
        }
        let mean = row.sum() / n;
        let variance = row.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let divisor = if std == 0.0 { 1.0 } else { std };
        row.mapv_inplace(|v| (v - mean) / divisor);
    }
    normalized
}
