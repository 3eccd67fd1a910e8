// src/types.rs

use ndarray::Array1;

use crate::constants::{
    DEFAULT_PCA_COMPONENTS, DEFAULT_PEAK_MIN_HEIGHT_UA, DEFAULT_QC_PASS_THRESHOLD_UA,
    DEFAULT_SMOOTHING_ORDER, DEFAULT_SMOOTHING_WINDOW,
};
use crate::error::{AnalysisError, Result};

/// One cyclic-voltammetry scan: paired potential/current samples in sweep
/// order (forward ramp followed by backward ramp). Immutable once built.
#[derive(Debug, Clone)]
pub struct ScanTrace {
    name: String,
    potential_v: Array1<f64>,
    current_ua: Array1<f64>,
}

impl ScanTrace {
    /// Validates pairing and numeric sanity up front so the analysis
    /// stages never see a malformed trace.
    pub fn new(name: impl Into<String>, potential_v: Vec<f64>, current_ua: Vec<f64>) -> Result<Self> {
        let name = name.into();
        if potential_v.len() != current_ua.len() {
            return Err(AnalysisError::MalformedTrace(format!(
                "'{}': {} potential samples vs {} current samples",
                name,
                potential_v.len(),
                current_ua.len()
            )));
        }
        if let Some(idx) = potential_v
            .iter()
            .chain(current_ua.iter())
            .position(|v| !v.is_finite())
        {
            return Err(AnalysisError::MalformedTrace(format!(
                "'{}': non-finite value at flattened sample {}",
                name, idx
            )));
        }
        Ok(Self {
            name,
            potential_v: Array1::from(potential_v),
            current_ua: Array1::from(current_ua),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn potential_v(&self) -> &Array1<f64> {
        &self.potential_v
    }

    pub fn current_ua(&self) -> &Array1<f64> {
        &self.current_ua
    }

    pub fn len(&self) -> usize {
        self.current_ua.len()
    }

    pub fn is_empty(&self) -> bool {
        self.current_ua.is_empty()
    }
}

/// Dominant-peak search outcome. `found == false` is a valid domain result
/// (blank or dead electrode), not an error; callers must branch on it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeakResult {
    pub potential_v: f64,
    pub current_ua: f64,
    pub found: bool,
}

impl PeakResult {
    pub fn at(potential_v: f64, current_ua: f64) -> Self {
        Self {
            potential_v,
            current_ua,
            found: true,
        }
    }

    /// The explicit "no peak above threshold" sentinel.
    pub fn none() -> Self {
        Self {
            potential_v: 0.0,
            current_ua: 0.0,
            found: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QcStatus {
    Pass,
    Fail,
}

impl QcStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QcStatus::Pass => "PASS",
            QcStatus::Fail => "FAIL",
        }
    }
}

impl std::fmt::Display for QcStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-scan quality record: the dominant anodic peak position/height and
/// the PASS/FAIL verdict derived from it.
#[derive(Debug, Clone)]
pub struct QcRecord {
    pub filename: String,
    pub epa_v: f64,
    pub ipa_ua: f64,
    pub status: QcStatus,
}

/// Batch provenance label. Display metadata only; never an input to the
/// anomaly-detection math.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BatchLabel {
    Standard,
    Contaminated,
}

impl BatchLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            BatchLabel::Standard => "Standard",
            BatchLabel::Contaminated => "Contaminated",
        }
    }
}

impl std::fmt::Display for BatchLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row of the batch embedding: a scan projected onto the first two
/// principal components.
#[derive(Debug, Clone)]
pub struct EmbeddingRecord {
    pub filename: String,
    pub pc1: f64,
    pub pc2: f64,
    pub label: BatchLabel,
}

/// Tunables for both pipelines. Defaults match the values the system was
/// calibrated with; every field can be overridden per invocation.
#[derive(Debug, Clone, Copy)]
pub struct AnalysisConfig {
    pub smoothing_window: usize,
    pub smoothing_order: usize,
    pub peak_min_height: f64,
    pub qc_pass_threshold: f64,
    pub pca_components: usize,
    pub snv_enabled: bool,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            smoothing_window: DEFAULT_SMOOTHING_WINDOW,
            smoothing_order: DEFAULT_SMOOTHING_ORDER,
            peak_min_height: DEFAULT_PEAK_MIN_HEIGHT_UA,
            qc_pass_threshold: DEFAULT_QC_PASS_THRESHOLD_UA,
            pca_components: DEFAULT_PCA_COMPONENTS,
            snv_enabled: true,
        }
    }
}
