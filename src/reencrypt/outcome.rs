// src/reencrypt/outcome.rs
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::consts::MAX_REPORTED_FAILURES;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Updated,
    /// Stored value was null or empty
    SkippedEmpty,
    /// Non-empty ciphertext decrypted to an empty string
    DecryptFailed,
    /// Decrypt, encrypt or write raised an error
    Failed(String),
}

impl Outcome {
    pub fn is_failure(&self) -> bool {
        matches!(self, Outcome::DecryptFailed | Outcome::Failed(_))
    }
}

/// Outcome of one row, tagged with its identity
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RowReport {
    pub id: i64,
    pub label: String,
    pub outcome: Outcome,
}

impl RowReport {
    pub fn new(id: i64, label: impl Into<String>, outcome: Outcome) -> Self {
        RowReport {
            id,
            label: label.into(),
            outcome,
        }
    }
}

/// Tally of a run. The first [`MAX_REPORTED_FAILURES`] failures keep their
/// identity and cause; later ones only bump the counters and
/// `failures_dropped`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RunSummary {
    pub started_at: DateTime<Utc>,
    pub finished_at: Option<DateTime<Utc>>,
    pub total: u64,
    pub processed: u64,
    pub updated: u64,
    pub skipped_empty: u64,
    pub decrypt_failed: u64,
    pub errored: u64,
    pub failures: Vec<RowReport>,
    pub failures_dropped: u64,
}

impl RunSummary {
    pub fn start(total: u64) -> Self {
        RunSummary {
            started_at: Utc::now(),
            finished_at: None,
            total,
            processed: 0,
            updated: 0,
            skipped_empty: 0,
            decrypt_failed: 0,
            errored: 0,
            failures: Vec::new(),
            failures_dropped: 0,
        }
    }

    pub fn record(&mut self, report: RowReport) {
        self.processed += 1;
        match report.outcome {
            Outcome::Updated => self.updated += 1,
            Outcome::SkippedEmpty => self.skipped_empty += 1,
            Outcome::DecryptFailed => self.decrypt_failed += 1,
            Outcome::Failed(_) => self.errored += 1,
        }
        if report.outcome.is_failure() {
            if self.failures.len() < MAX_REPORTED_FAILURES {
                self.failures.push(report);
            } else {
                self.failures_dropped += 1;
            }
        }
    }

    pub fn finish(mut self) -> Self {
        self.finished_at = Some(Utc::now());
        self
    }

    pub fn has_failures(&self) -> bool {
        self.decrypt_failed + self.errored > 0
    }
}
