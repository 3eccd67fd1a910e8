// src/signal_analysis/scan_analyzer.rs

use ndarray::Array1;

use crate::error::Result;
use crate::signal_analysis::peak_detection::find_dominant_peak;
use crate::signal_analysis::savgol::savgol_filter;
use crate::types::{AnalysisConfig, PeakResult, QcRecord, QcStatus, ScanTrace};

/// Full per-scan result: the QC record plus the smoothed trace and raw peak,
/// kept so a display layer can overlay the smoothed curve on the raw scan.
#[derive(Debug, Clone)]
pub struct ScanAnalysis {
    pub record: QcRecord,
    pub peak: PeakResult,
    pub smoothed_ua: Array1<f64>,
}

/// PASS iff the peak current strictly exceeds the threshold. Exactly the
/// threshold is a FAIL.
pub fn classify(ipa_ua: f64, pass_threshold: f64) -> QcStatus {
    if ipa_ua > pass_threshold {
        QcStatus::Pass
    } else {
        QcStatus::Fail
    }
}

/// Runs the per-scan pipeline: smooth, extract the dominant anodic peak,
/// classify. A scan with no detectable peak gets zero-valued metrics and a
/// FAIL verdict rather than an error.
pub fn analyze_scan(trace: &ScanTrace, config: &AnalysisConfig) -> Result<ScanAnalysis> {
    let smoothed_ua = savgol_filter(
        trace.current_ua(),
        config.smoothing_window,
        config.smoothing_order,
    )?;

    let peak = find_dominant_peak(trace.potential_v(), &smoothed_ua, config.peak_min_height);

    let record = QcRecord {
        filename: trace.name().to_string(),
        epa_v: peak.potential_v,
        ipa_ua: peak.current_ua,
        status: classify(peak.current_ua, config.qc_pass_threshold),
    };

    Ok(ScanAnalysis {
        record,
        peak,
        smoothed_ua,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalysisError;

    fn synthetic_trace(name: &str, peak_height: f64, peak_center_v: f64) -> ScanTrace {
        let n = 400;
        let potential: Vec<f64> = (0..n).map(|i| -0.5 + 1.5 * i as f64 / (n - 1) as f64).collect();
        let current: Vec<f64> = potential
            .iter()
            .map(|&v| {
                let d = v - peak_center_v;
                peak_height * (-d * d / 0.05).exp()
            })
            .collect();
        ScanTrace::new(name, potential, current).unwrap()
    }

    #[test]
    fn boundary_is_exclusive_at_the_threshold() {
        assert_eq!(classify(9.0, 9.0), QcStatus::Fail);
        assert_eq!(classify(9.0001, 9.0), QcStatus::Pass);
    }

    #[test]
    fn strong_peak_passes_qc() {
        let trace = synthetic_trace("good.csv", 10.5, 0.40);
        let analysis = analyze_scan(&trace, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.record.status, QcStatus::Pass);
        assert!(analysis.peak.found);
        assert!((analysis.record.epa_v - 0.40).abs() < 0.02);
        assert!((analysis.record.ipa_ua - 10.5).abs() < 0.2);
        assert_eq!(analysis.smoothed_ua.len(), trace.len());
    }

    #[test]
    fn weak_peak_fails_qc() {
        let trace = synthetic_trace("weak.csv", 5.0, 0.40);
        let analysis = analyze_scan(&trace, &AnalysisConfig::default()).unwrap();
        assert_eq!(analysis.record.status, QcStatus::Fail);
        assert!(analysis.peak.found);
    }

    #[test]
    fn flat_trace_yields_zeroed_fail_record() {
        let n = 200;
        let potential: Vec<f64> = (0..n).map(|i| i as f64 * 0.01).collect();
        let trace = ScanTrace::new("flat.csv", potential, vec![0.0; n]).unwrap();
        let analysis = analyze_scan(&trace, &AnalysisConfig::default()).unwrap();
        assert!(!analysis.peak.found);
        assert_eq!(analysis.record.epa_v, 0.0);
        assert_eq!(analysis.record.ipa_ua, 0.0);
        assert_eq!(analysis.record.status, QcStatus::Fail);
    }

    #[test]
    fn short_trace_propagates_insufficient_data() {
        let trace = ScanTrace::new("short.csv", vec![0.0; 5], vec![0.0; 5]).unwrap();
        let err = analyze_scan(&trace, &AnalysisConfig::default()).unwrap_err();
        assert!(matches!(err, AnalysisError::InsufficientData { .. }));
    }
}
