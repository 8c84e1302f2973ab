// src/report/json.rs
use std::path::Path;

use chrono::Utc;
use serde_json::json;
use tracing::info;

use crate::reencrypt::RunSummary;
use crate::Result;

/// Write a run summary as pretty JSON.
///
/// Only identities and causes are written, never ciphertext or plaintext.
pub fn export_summary<P: AsRef<Path>>(summary: &RunSummary, path: P) -> Result<()> {
    let export = json!({
        "export_format": "secret-reencrypt-report-v1",
        "exported_at": Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
        "exporter_version": env!("CARGO_PKG_VERSION"),
        "summary": summary,
    });

    std::fs::write(path.as_ref(), serde_json::to_string_pretty(&export)?)?;
    info!(path = %path.as_ref().display(), failures = summary.decrypt_failed + summary.errored, "report exported");
    Ok(())
}
