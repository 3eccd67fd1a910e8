// src/chemometrics/batch_pipeline.rs

use std::collections::HashMap;

use ndarray::Array2;

use crate::chemometrics::pca::principal_components;
use crate::chemometrics::snv::apply_snv;
use crate::chemometrics::standardize::standardize_columns;
use crate::error::{AnalysisError, Result};
use crate::types::{AnalysisConfig, BatchLabel, EmbeddingRecord, ScanTrace};

/// Batch anomaly-detection output: one embedding row per input scan, in
/// input order, plus the variance share captured by each component.
#[derive(Debug, Clone)]
pub struct BatchAnalysis {
    pub records: Vec<EmbeddingRecord>,
    pub explained_variance_ratio: Vec<f64>,
}

/// Stacks the current traces into a rows-are-scans matrix in the order the
/// caller supplied. The batch is only valid when every scan has the same
/// sample count; a deviating scan is a shape error, never truncated.
pub fn build_batch_matrix(traces: &[ScanTrace]) -> Result<Array2<f64>> {
    let first = traces.first().ok_or(AnalysisError::EmptyBatch)?;
    let cols = first.len();
    for trace in traces {
        if trace.len() != cols {
            return Err(AnalysisError::ShapeMismatch {
                expected: cols,
                got: trace.len(),
                scan: trace.name().to_string(),
            });
        }
    }

    let mut matrix = Array2::<f64>::zeros((traces.len(), cols));
    for (r, trace) in traces.iter().enumerate() {
        matrix.row_mut(r).assign(trace.current_ua());
    }
    Ok(matrix)
}

/// Batch provenance for display. An explicit label map wins; otherwise the
/// demo naming convention applies (a "Contaminated" substring in the scan
/// name). Labels never feed the projection itself.
pub fn label_for(name: &str, overrides: Option<&HashMap<String, BatchLabel>>) -> BatchLabel {
    if let Some(map) = overrides {
        if let Some(&label) = map.get(name) {
            return label;
        }
    }
    if name.contains("Contaminated") {
        BatchLabel::Contaminated
    } else {
        BatchLabel::Standard
    }
}

/// Runs the batch pipeline: optional SNV, column standardization, PCA, then
/// zips scan names and labels back onto the embedding rows.
pub fn run_batch_analysis(
    traces: &[ScanTrace],
    labels: Option<&HashMap<String, BatchLabel>>,
    config: &AnalysisConfig,
) -> Result<BatchAnalysis> {
    let matrix = build_batch_matrix(traces)?;

    let matrix = if config.snv_enabled {
        apply_snv(&matrix)
    } else {
        matrix
    };
    let scaled = standardize_columns(&matrix);
    let pca = principal_components(&scaled, config.pca_components)?;

    let records = traces
        .iter()
        .enumerate()
        .map(|(r, trace)| EmbeddingRecord {
            filename: trace.name().to_string(),
            pc1: pca.scores[[r, 0]],
            pc2: if pca.scores.ncols() > 1 {
                pca.scores[[r, 1]]
            } else {
                0.0
            },
            label: label_for(trace.name(), labels),
        })
        .collect();

    Ok(BatchAnalysis {
        records,
        explained_variance_ratio: pca.explained_variance_ratio,
    })
}
