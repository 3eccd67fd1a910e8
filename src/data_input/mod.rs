// src/data_input/mod.rs

pub mod scan_parser;
pub mod synthetic;
