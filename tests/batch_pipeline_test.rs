// tests/batch_pipeline_test.rs
//
// End-to-end checks of the batch anomaly-detection pipeline on synthetic
// scans: contaminated scans carry a shifted anodic peak and elevated noise,
// and must land in their own region of the 2-D embedding.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rand_distr::{Distribution, Normal};

use cv_insight::chemometrics::batch_pipeline::run_batch_analysis;
use cv_insight::error::AnalysisError;
use cv_insight::signal_analysis::scan_analyzer::analyze_scan;
use cv_insight::types::{AnalysisConfig, BatchLabel, QcStatus, ScanTrace};

/// A bare scan with a single Gaussian anodic peak of known amplitude, the
/// shape the QC thresholds were calibrated against.
fn peak_scan(name: &str, peak_position_v: f64, amplitude_ua: f64, noise_sigma: f64, rng: &mut StdRng) -> ScanTrace {
    let n = 1000;
    let noise = Normal::new(0.0, noise_sigma).unwrap();
    let forward = (0..n / 2).map(move |i| -0.5 + 1.5 * i as f64 / (n / 2 - 1) as f64);
    let backward = (0..n / 2).map(move |i| 1.0 - 1.5 * i as f64 / (n / 2 - 1) as f64);
    let potential: Vec<f64> = forward.chain(backward).collect();
    let current: Vec<f64> = potential
        .iter()
        .map(|&v| {
            let d = v - peak_position_v;
            amplitude_ua * (-d * d / 0.05).exp() + noise.sample(rng)
        })
        .collect();
    ScanTrace::new(name, potential, current).unwrap()
}

fn two_population_batch(rng: &mut StdRng) -> Vec<ScanTrace> {
    let mut traces = Vec::new();
    for i in 0..5 {
        traces.push(peak_scan(
            &format!("Run_{i}_Standard.csv"),
            0.40,
            10.5,
            0.1,
            rng,
        ));
    }
    for i in 5..10 {
        traces.push(peak_scan(
            &format!("Run_{i}_Contaminated.csv"),
            0.48,
            10.5,
            0.25,
            rng,
        ));
    }
    traces
}

fn centroid(points: &[(f64, f64)]) -> (f64, f64) {
    let n = points.len() as f64;
    let sum = points
        .iter()
        .fold((0.0, 0.0), |acc, p| (acc.0 + p.0, acc.1 + p.1));
    (sum.0 / n, sum.1 / n)
}

fn distance(a: (f64, f64), b: (f64, f64)) -> f64 {
    ((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt()
}

#[test]
fn contaminated_scans_separate_from_standard_scans_in_the_embedding() {
    let mut rng = StdRng::seed_from_u64(2024);
    let traces = two_population_batch(&mut rng);

    let config = AnalysisConfig::default(); // SNV enabled
    let batch = run_batch_analysis(&traces, None, &config).unwrap();
    assert_eq!(batch.records.len(), 10);
    assert_eq!(batch.explained_variance_ratio.len(), 2);
    let evr_sum: f64 = batch.explained_variance_ratio.iter().sum();
    assert!(evr_sum <= 1.0 + 1e-9);

    let standard: Vec<(f64, f64)> = batch
        .records
        .iter()
        .filter(|r| r.label == BatchLabel::Standard)
        .map(|r| (r.pc1, r.pc2))
        .collect();
    let contaminated: Vec<(f64, f64)> = batch
        .records
        .iter()
        .filter(|r| r.label == BatchLabel::Contaminated)
        .map(|r| (r.pc1, r.pc2))
        .collect();
    assert_eq!(standard.len(), 5);
    assert_eq!(contaminated.len(), 5);

    // Assert on cluster separation, never on component sign or orientation.
    let c_std = centroid(&standard);
    let c_con = centroid(&contaminated);
    let separation = distance(c_std, c_con);
    let spread = standard
        .iter()
        .map(|&p| distance(p, c_std))
        .chain(contaminated.iter().map(|&p| distance(p, c_con)))
        .fold(0.0f64, f64::max);
    assert!(
        separation > spread,
        "cluster separation {separation:.3} does not exceed max spread {spread:.3}"
    );
}

#[test]
fn separation_holds_without_snv_as_well() {
    let mut rng = StdRng::seed_from_u64(7);
    let traces = two_population_batch(&mut rng);

    let config = AnalysisConfig {
        snv_enabled: false,
        ..AnalysisConfig::default()
    };
    let batch = run_batch_analysis(&traces, None, &config).unwrap();

    let groups: (Vec<(f64, f64)>, Vec<(f64, f64)>) = batch
        .records
        .iter()
        .map(|r| (r.label, (r.pc1, r.pc2)))
        .fold((Vec::new(), Vec::new()), |mut acc, (label, p)| {
            match label {
                BatchLabel::Standard => acc.0.push(p),
                BatchLabel::Contaminated => acc.1.push(p),
            }
            acc
        });
    let c_std = centroid(&groups.0);
    let c_con = centroid(&groups.1);
    let separation = distance(c_std, c_con);
    let spread = groups
        .0
        .iter()
        .map(|&p| distance(p, c_std))
        .chain(groups.1.iter().map(|&p| distance(p, c_con)))
        .fold(0.0f64, f64::max);
    assert!(
        separation > 0.5 * spread,
        "separation {separation:.3} vs spread {spread:.3}"
    );
}

#[test]
fn empty_batch_fails_with_the_dedicated_error() {
    let config = AnalysisConfig::default();
    let err = run_batch_analysis(&[], None, &config).unwrap_err();
    assert!(matches!(err, AnalysisError::EmptyBatch));
}

#[test]
fn strong_synthetic_scan_passes_per_scan_qc() {
    let mut rng = StdRng::seed_from_u64(11);
    let trace = peak_scan("Run_0_Standard.csv", 0.40, 10.5, 0.1, &mut rng);
    let analysis = analyze_scan(&trace, &AnalysisConfig::default()).unwrap();
    assert!(analysis.peak.found);
    assert_eq!(analysis.record.status, QcStatus::Pass);
    assert!((analysis.record.epa_v - 0.40).abs() < 0.03);
    assert!((analysis.record.ipa_ua - 10.5).abs() < 0.5);
    assert_eq!(analysis.smoothed_ua.len(), trace.len());
}

#[test]
fn component_count_above_rank_bound_is_rejected_end_to_end() {
    let mut rng = StdRng::seed_from_u64(3);
    let traces: Vec<ScanTrace> = (0..3)
        .map(|i| peak_scan(&format!("Run_{i}_Standard.csv"), 0.40, 10.5, 0.1, &mut rng))
        .collect();
    let config = AnalysisConfig {
        pca_components: 4, // only 3 scans available
        ..AnalysisConfig::default()
    };
    let err = run_batch_analysis(&traces, None, &config).unwrap_err();
    assert!(matches!(
        err,
        AnalysisError::InvalidComponentCount { requested: 4, max: 3 }
    ));
}
