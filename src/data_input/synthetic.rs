// src/data_input/synthetic.rs

use std::path::{Path, PathBuf};

use rand::Rng;
use rand_distr::{Distribution, Normal};

use crate::constants::{
    BACKGROUND_SLOPE_UA_PER_V, CONTAMINATED_NOISE_SIGMA_UA, CONTAMINATED_PEAK_POSITION_V,
    PEAK_AMPLITUDE_MAX_UA, PEAK_AMPLITUDE_MIN_UA, PEAK_GAUSSIAN_VARIANCE,
    REDUCTION_PEAK_OFFSET_V, STANDARD_NOISE_SIGMA_UA, STANDARD_PEAK_POSITION_V,
    SWEEP_END_V, SWEEP_POINTS_PER_RAMP, SWEEP_START_V,
};
use crate::error::{AnalysisError, Result};
use crate::types::{BatchLabel, ScanTrace};

/// Generates one synthetic CV scan: forward and backward potential ramps, a
/// Gaussian oxidation peak with a mirrored reduction peak, a linear
/// capacitive background, and Gaussian instrument noise.
///
/// Standard scans peak at 0.40 V with low noise; contaminated scans carry
/// the shifted peak and elevated noise that the batch pipeline is meant to
/// catch.
pub fn generate_scan<R: Rng>(name: &str, label: BatchLabel, rng: &mut R) -> Result<ScanTrace> {
    let (peak_position_v, noise_sigma) = match label {
        BatchLabel::Standard => (STANDARD_PEAK_POSITION_V, STANDARD_NOISE_SIGMA_UA),
        BatchLabel::Contaminated => (CONTAMINATED_PEAK_POSITION_V, CONTAMINATED_NOISE_SIGMA_UA),
    };
    let noise = Normal::new(0.0, noise_sigma)
        .map_err(|e| AnalysisError::InvalidParameter(format!("noise distribution: {e}")))?;
    let amplitude = rng.gen_range(PEAK_AMPLITUDE_MIN_UA..PEAK_AMPLITUDE_MAX_UA);

    let forward = (0..SWEEP_POINTS_PER_RAMP).map(|i| {
        SWEEP_START_V
            + (SWEEP_END_V - SWEEP_START_V) * i as f64 / (SWEEP_POINTS_PER_RAMP - 1) as f64
    });
    let backward = (0..SWEEP_POINTS_PER_RAMP).map(|i| {
        SWEEP_END_V
            - (SWEEP_END_V - SWEEP_START_V) * i as f64 / (SWEEP_POINTS_PER_RAMP - 1) as f64
    });
    let potential_v: Vec<f64> = forward.chain(backward).collect();

    let current_ua: Vec<f64> = potential_v
        .iter()
        .map(|&v| {
            let ox = amplitude * gaussian(v, peak_position_v);
            let red = -amplitude * gaussian(v, peak_position_v - REDUCTION_PEAK_OFFSET_V);
            let background = BACKGROUND_SLOPE_UA_PER_V * v;
            ox + red + background + noise.sample(rng)
        })
        .collect();

    ScanTrace::new(name, potential_v, current_ua)
}

fn gaussian(v: f64, center: f64) -> f64 {
    let d = v - center;
    (-d * d / PEAK_GAUSSIAN_VARIANCE).exp()
}

/// Generates a demo batch: the first half standard, the second half
/// contaminated, named by the `Run_{i}_{label}.csv` convention the
/// fallback labeling rule understands.
pub fn generate_batch<R: Rng>(num_scans: usize, rng: &mut R) -> Result<Vec<ScanTrace>> {
    let mut traces = Vec::with_capacity(num_scans);
    for i in 0..num_scans {
        let label = if i < num_scans / 2 {
            BatchLabel::Standard
        } else {
            BatchLabel::Contaminated
        };
        let name = format!("Run_{i}_{label}.csv");
        traces.push(generate_scan(&name, label, rng)?);
    }
    Ok(traces)
}

/// Writes a scan to `dir` in the two-column input format, returning the
/// path written.
pub fn write_scan_csv(trace: &ScanTrace, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(trace.name());
    let mut writer = csv::Writer::from_path(&path)?;
    writer.write_record(["Potential_V", "Current_uA"])?;
    for (v, i) in trace.potential_v().iter().zip(trace.current_ua().iter()) {
        writer.write_record([v.to_string(), i.to_string()])?;
    }
    writer.flush()?;
    Ok(path)
}
