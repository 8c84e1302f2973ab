// src/reencrypt/mod.rs
//! Per-row decrypt → verify → re-encrypt → point UPDATE
//!
//! Failures are contained at the row boundary and turned into an
//! [`Outcome`]; only errors producing the rows themselves abort a run.

pub mod engine;
pub mod outcome;

pub use engine::Reencryptor;
pub use outcome::{Outcome, RowReport, RunSummary};
