// src/chemometrics/standardize.rs

use ndarray::Array2;

/// Column-wise zero-mean/unit-variance scaling using the population
/// statistics of the supplied batch. Fit and transform happen on the same
/// matrix; no scaler state survives the call.
///
/// Zero-variance columns use divisor 1, the same guard as SNV.
pub fn standardize_columns(matrix: &Array2<f64>) -> Array2<f64> {
    let mut scaled = matrix.clone();
    for mut col in scaled.columns_mut() {
        let n = col.len() as f64;
        if n == 0.0 {
            continue;
        }
        let mean = col.sum() / n;
        let variance = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
        let std = variance.sqrt();
        let divisor = if std == 0.0 { 1.0 } else { std };
        col.mapv_inplace(|v| (v - mean) / divisor);
    }
    scaled
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn columns_come_out_zero_mean_unit_std() {
        let matrix = array![[1.0, 10.0], [2.0, 30.0], [3.0, 20.0], [4.0, 40.0]];
        let out = standardize_columns(&matrix);
        for col in out.columns() {
            let mean = col.sum() / col.len() as f64;
            let var = col.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / col.len() as f64;
            assert!(mean.abs() < 1e-12);
            assert!((var - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn standardizing_twice_is_idempotent_within_tolerance() {
        let matrix = array![[1.0, -4.0, 0.5], [7.0, 2.0, 0.9], [3.0, 5.0, 0.1], [2.0, 1.0, 0.7]];
        let once = standardize_columns(&matrix);
        let twice = standardize_columns(&once);
        for (a, b) in once.iter().zip(twice.iter()) {
            assert!((a - b).abs() < 1e-9);
        }
    }

    #[test]
    fn constant_column_becomes_zeros_without_nan() {
        let matrix = array![[2.0, 1.0], [2.0, 5.0], [2.0, 3.0]];
        let out = standardize_columns(&matrix);
        for &v in out.column(0).iter() {
            assert_eq!(v, 0.0);
        }
        assert!(out.iter().all(|v| v.is_finite()));
    }
}
