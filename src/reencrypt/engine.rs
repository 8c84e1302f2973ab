// src/reencrypt/engine.rs
use tracing::{debug, info, warn};

use super::outcome::{Outcome, RowReport, RunSummary};
use crate::batch::BatchSequence;
use crate::crypto::Encryptor;
use crate::db::{ConfigStore, ConfigValue, Record, RowStore};
use crate::Result;

/// Stateless across rows: re-running the same plan after an abort picks up
/// whatever is still under an old key.
#[derive(Debug, Clone)]
pub struct Reencryptor<E> {
    encryptor: E,
}

impl<E: Encryptor> Reencryptor<E> {
    pub fn new(encryptor: E) -> Self {
        Reencryptor { encryptor }
    }

    pub fn encryptor(&self) -> &E {
        &self.encryptor
    }

    /// Re-encrypt one stored value and hand the new ciphertext to `write`.
    ///
    /// An empty plaintext from a non-empty ciphertext is the provider's only
    /// failure signal. A genuinely empty secret is indistinguishable from a
    /// corrupt one and is reported as `DecryptFailed`.
    pub fn reencrypt_value<W>(&self, ciphertext: Option<&str>, write: W) -> Outcome
    where
        W: FnOnce(&str) -> Result<()>,
    {
        let ciphertext = match ciphertext {
            Some(c) if !c.is_empty() => c,
            _ => return Outcome::SkippedEmpty,
        };

        let attempt = || -> Result<Outcome> {
            let plaintext = self.encryptor.decrypt(ciphertext)?;
            if plaintext.expose_secret().is_empty() {
                return Ok(Outcome::DecryptFailed);
            }
            let fresh = self.encryptor.encrypt(plaintext.expose_secret())?;
            write(&fresh)?;
            Ok(Outcome::Updated)
        };

        attempt().unwrap_or_else(|err| Outcome::Failed(err.to_string()))
    }

    /// Walk every row of `sequence` once. Row-level failures are reported,
    /// a failed batch fetch aborts the run.
    pub fn run_records<R, S, F>(
        &self,
        store: &S,
        sequence: &BatchSequence<R>,
        mut observe: F,
    ) -> Result<RunSummary>
    where
        R: Record + Clone,
        S: RowStore,
        F: FnMut(&RowReport),
    {
        info!(table = R::TABLE, total = sequence.total(), "re-encryption started");
        let mut summary = RunSummary::start(sequence.total());

        for row in sequence.items(store) {
            let row = row?;
            let outcome = self.reencrypt_value(row.secret(), |fresh| {
                store.update_secret::<R>(row.id(), fresh)
            });
            let report = RowReport::new(row.id(), row.label(), outcome);
            log_report(&report);
            observe(&report);
            summary.record(report);
        }

        let summary = summary.finish();
        info!(
            table = R::TABLE,
            updated = summary.updated,
            failed = summary.decrypt_failed + summary.errored,
            "re-encryption finished"
        );
        Ok(summary)
    }

    /// Re-encrypt already-fetched configuration values into `summary`
    pub fn run_config_values<S, F>(
        &self,
        store: &S,
        values: &[ConfigValue],
        summary: &mut RunSummary,
        mut observe: F,
    ) where
        S: ConfigStore,
        F: FnMut(&RowReport),
    {
        for value in values {
            let outcome = self.reencrypt_value(value.value.as_deref(), |fresh| {
                store.set_value_by_id(value.config_id, fresh)
            });
            let report = RowReport::new(
                value.config_id,
                format!("config ID {}", value.config_id),
                outcome,
            );
            log_report(&report);
            observe(&report);
            summary.record(report);
        }
    }

    /// Re-encrypt every stored value of one configuration path
    pub fn run_config_path<S, F>(&self, store: &S, path: &str, observe: F) -> Result<RunSummary>
    where
        S: ConfigStore,
        F: FnMut(&RowReport),
    {
        let values = store.values_by_path(path)?;
        let mut summary = RunSummary::start(values.len() as u64);
        self.run_config_values(store, &values, &mut summary, observe);
        Ok(summary.finish())
    }
}

fn log_report(report: &RowReport) {
    match &report.outcome {
        Outcome::Updated => debug!(id = report.id, "re-encrypted {}", report.label),
        Outcome::SkippedEmpty => debug!(id = report.id, "{} has no stored value", report.label),
        Outcome::DecryptFailed => warn!(
            id = report.id,
            "Decryption failed for {}. Value might be corrupted.", report.label
        ),
        Outcome::Failed(cause) => warn!(id = report.id, "Error processing {}: {cause}", report.label),
    }
}
