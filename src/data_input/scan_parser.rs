// src/data_input/scan_parser.rs

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use csv::ReaderBuilder;

use crate::error::{AnalysisError, Result};
use crate::types::ScanTrace;

const POTENTIAL_HEADER: &str = "Potential_V";
const CURRENT_HEADER: &str = "Current_uA";

/// Reads one scan CSV (`Potential_V`, `Current_uA`) into a `ScanTrace`.
/// The trace is named after the file so batch rows stay identifiable.
pub fn read_scan_file(path: &Path) -> Result<ScanTrace> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let file = File::open(path)?;
    read_scan(BufReader::new(file), &name)
}

/// Reader-based variant of `read_scan_file`, also used by tests.
pub fn read_scan<R: Read>(reader: R, name: &str) -> Result<ScanTrace> {
    let mut csv_reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = csv_reader.headers()?.clone();
    let potential_idx = headers
        .iter()
        .position(|h| h == POTENTIAL_HEADER)
        .ok_or_else(|| {
            AnalysisError::MalformedTrace(format!("'{name}': missing '{POTENTIAL_HEADER}' column"))
        })?;
    let current_idx = headers
        .iter()
        .position(|h| h == CURRENT_HEADER)
        .ok_or_else(|| {
            AnalysisError::MalformedTrace(format!("'{name}': missing '{CURRENT_HEADER}' column"))
        })?;

    let mut potential_v = Vec::new();
    let mut current_ua = Vec::new();
    for (row_index, record) in csv_reader.records().enumerate() {
        let record = record?;
        let parse = |idx: usize, column: &str| -> Result<f64> {
            record
                .get(idx)
                .and_then(|s| s.parse::<f64>().ok())
                .ok_or_else(|| {
                    AnalysisError::MalformedTrace(format!(
                        "'{name}': non-numeric {column} at data row {}",
                        row_index + 1
                    ))
                })
        };
        potential_v.push(parse(potential_idx, POTENTIAL_HEADER)?);
        current_ua.push(parse(current_idx, CURRENT_HEADER)?);
    }

    ScanTrace::new(name, potential_v, current_ua)
}

/// Lists the scan CSVs in a directory, sorted by file name so discovery
/// order is deterministic. The analysis core itself never scans
/// directories; this feeds the explicit scan list the pipeline consumes.
pub fn discover_scan_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.extension().map(|e| e == "csv").unwrap_or(false))
        .collect();
    files.sort();
    Ok(files)
}
