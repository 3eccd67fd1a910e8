// src/chemometrics/mod.rs

pub mod batch_pipeline;
pub mod pca;
pub mod snv;
pub mod standardize;
