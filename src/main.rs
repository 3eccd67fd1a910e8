// src/main.rs

use std::env;
use std::error::Error;
use std::path::PathBuf;

use ndarray::Array1;
use ndarray_stats::QuantileExt;

use cv_insight::chemometrics::batch_pipeline::run_batch_analysis;
use cv_insight::data_input::scan_parser::{discover_scan_files, read_scan_file};
use cv_insight::data_input::synthetic::{generate_batch, write_scan_csv};
use cv_insight::error::AnalysisError;
use cv_insight::signal_analysis::scan_analyzer::analyze_scan;
use cv_insight::types::{AnalysisConfig, ScanTrace};

fn print_usage(program: &str) {
    eprintln!(
        "Usage: {} <data_dir> [--generate N] [--no-snv] [--window N] [--order N] \
         [--min-height X] [--qc-threshold X] [--components N]",
        program
    );
}

fn main() -> Result<(), Box<dyn Error>> {
    // --- Argument Parsing ---
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage(&args[0]);
        std::process::exit(1);
    }
    let data_dir = PathBuf::from(&args[1]);

    let mut config = AnalysisConfig::default();
    let mut generate_count: Option<usize> = None;

    fn next_value(args: &[String], i: &mut usize, flag: &str) -> Result<String, Box<dyn Error>> {
        *i += 1;
        args.get(*i)
            .cloned()
            .ok_or_else(|| format!("Missing value for {}", flag).into())
    }

    let mut i = 2;
    while i < args.len() {
        match args[i].as_str() {
            "--generate" => generate_count = Some(next_value(&args, &mut i, "--generate")?.parse()?),
            "--no-snv" => config.snv_enabled = false,
            "--window" => config.smoothing_window = next_value(&args, &mut i, "--window")?.parse()?,
            "--order" => config.smoothing_order = next_value(&args, &mut i, "--order")?.parse()?,
            "--min-height" => {
                config.peak_min_height = next_value(&args, &mut i, "--min-height")?.parse()?
            }
            "--qc-threshold" => {
                config.qc_pass_threshold = next_value(&args, &mut i, "--qc-threshold")?.parse()?
            }
            "--components" => {
                config.pca_components = next_value(&args, &mut i, "--components")?.parse()?
            }
            other => {
                eprintln!("Unknown argument: {}", other);
                print_usage(&args[0]);
                std::process::exit(1);
            }
        }
        i += 1;
    }

    // --- Optional Synthetic Batch Generation ---
    if let Some(count) = generate_count {
        println!("--- Generating {} Synthetic CV Scans ---", count);
        std::fs::create_dir_all(&data_dir)?;
        let mut rng = rand::thread_rng();
        let traces = generate_batch(count, &mut rng)?;
        for trace in &traces {
            let path = write_scan_csv(trace, &data_dir)?;
            println!("  Wrote '{}'", path.display());
        }
    }

    // --- Scan Discovery and Parsing ---
    println!("\n--- Reading Scans from '{}' ---", data_dir.display());
    let files = discover_scan_files(&data_dir)?;
    let mut traces: Vec<ScanTrace> = Vec::new();
    for path in &files {
        match read_scan_file(path) {
            Ok(trace) => traces.push(trace),
            Err(e) => eprintln!("  Warning: Skipping '{}': {}", path.display(), e),
        }
    }
    println!("  Loaded {} of {} scan files.", traces.len(), files.len());
    if traces.is_empty() {
        return Err(Box::new(AnalysisError::EmptyBatch));
    }

    // --- Per-Scan Quality Control ---
    println!("\n--- Per-Scan Quality Control ---");
    println!("  {:<32} {:>9} {:>9}  {}", "Scan", "Epa (V)", "Ipa (uA)", "QC");
    for trace in &traces {
        match analyze_scan(trace, &config) {
            Ok(analysis) => {
                let note = if analysis.peak.found { "" } else { "  (no peak)" };
                println!(
                    "  {:<32} {:>9.3} {:>9.2}  {}{}",
                    analysis.record.filename,
                    analysis.record.epa_v,
                    analysis.record.ipa_ua,
                    analysis.record.status,
                    note
                );
            }
            Err(e) => eprintln!("  Warning: QC failed for '{}': {}", trace.name(), e),
        }
    }

    // --- Batch Anomaly Detection ---
    println!("\n--- Batch Anomaly Detection (PCA) ---");
    println!(
        "  SNV: {}, components: {}",
        if config.snv_enabled { "enabled" } else { "disabled" },
        config.pca_components
    );
    let batch = run_batch_analysis(&traces, None, &config)?;

    let ratios: Vec<String> = batch
        .explained_variance_ratio
        .iter()
        .map(|r| format!("{:.1}%", r * 100.0))
        .collect();
    println!("  Explained variance ratio: [{}]", ratios.join(", "));

    println!("  {:<32} {:>9} {:>9}  {}", "Scan", "PC1", "PC2", "Batch");
    for record in &batch.records {
        println!(
            "  {:<32} {:>9.3} {:>9.3}  {}",
            record.filename, record.pc1, record.pc2, record.label
        );
    }

    let pc1 = Array1::from_iter(batch.records.iter().map(|r| r.pc1));
    let pc2 = Array1::from_iter(batch.records.iter().map(|r| r.pc2));
    if let (Ok(min1), Ok(max1), Ok(min2), Ok(max2)) = (pc1.min(), pc1.max(), pc2.min(), pc2.max()) {
        println!(
            "  Embedding extent: PC1 [{:.3}, {:.3}], PC2 [{:.3}, {:.3}]",
            min1, max1, min2, max2
        );
    }

    Ok(())
}
