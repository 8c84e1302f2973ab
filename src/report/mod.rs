// src/report/mod.rs
//! Export of run summaries

pub use json::export_summary;

pub mod json;
