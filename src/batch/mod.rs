// src/batch/mod.rs
//! Memory-bounded iteration over large tables
//!
//! A [`BatchSequence`] is an ordered list of [`Batch`]es plus an up-front
//! row count. Iterating it fetches one window at a time, so peak memory is
//! one window regardless of table size.

pub mod planner;
pub mod sequence;
pub mod single;

pub use planner::{plan_by_ids, plan_full_scan, windows};
pub use sequence::{BatchSequence, Items};
pub use single::Batch;
