// src/signal_analysis/mod.rs

pub mod peak_detection;
pub mod savgol;
pub mod scan_analyzer;
