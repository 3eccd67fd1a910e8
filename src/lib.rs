// src/lib.rs - Library interface for internal module access

pub mod chemometrics;
pub mod constants;
pub mod data_input;
pub mod error;
pub mod signal_analysis;
pub mod types;
