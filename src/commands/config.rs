// src/commands/config.rs
use tracing::{debug, info};

use crate::crypto::Encryptor;
use crate::db::ConfigStore;
use crate::error::CoreError;
use crate::reencrypt::{Reencryptor, RowReport, RunSummary};
use crate::schema::EncryptedPathSource;
use crate::Result;

/// Re-encrypt every stored value of every encrypted configuration path.
///
/// Paths without stored values are skipped; no discovered paths at all is a
/// planning error. `on_path` sees each path and its value count before any of
/// its values is touched.
pub fn config_reencrypt_all<E, S, P, O, F>(
    engine: &Reencryptor<E>,
    store: &S,
    paths: &P,
    mut on_path: O,
    mut observe: F,
) -> Result<RunSummary>
where
    E: Encryptor,
    S: ConfigStore,
    P: EncryptedPathSource + ?Sized,
    O: FnMut(&str, u64),
    F: FnMut(&str, &RowReport),
{
    let paths = paths.encrypted_paths()?;
    if paths.is_empty() {
        return Err(CoreError::NothingFound(
            "could not retrieve a list of encrypted configuration fields".into(),
        ));
    }
    info!(paths = paths.len(), "retrieved list of encrypted configuration fields");

    let mut summary = RunSummary::start(0);
    for path in &paths {
        let values = store.values_by_path(path)?;
        debug!(path = %path, values = values.len(), "re-encrypting path");
        summary.total += values.len() as u64;
        on_path(path, values.len() as u64);
        engine.run_config_values(store, &values, &mut summary, |report| {
            observe(path, report)
        });
    }

    Ok(summary.finish())
}

/// Re-encrypt every stored value of one configuration path.
///
/// `on_plan` sees the value count before any value is touched.
pub fn config_reencrypt_path<E, S, P, F>(
    engine: &Reencryptor<E>,
    store: &S,
    path: &str,
    on_plan: P,
    observe: F,
) -> Result<RunSummary>
where
    E: Encryptor,
    S: ConfigStore,
    P: FnOnce(u64),
    F: FnMut(&RowReport),
{
    let values = store.values_by_path(path)?;
    if values.is_empty() {
        return Err(CoreError::NothingFound(format!(
            "no configuration values found for the specified path: {path}"
        )));
    }
    info!(path, values = values.len(), "re-encrypting configuration path");
    on_plan(values.len() as u64);

    let mut summary = RunSummary::start(values.len() as u64);
    engine.run_config_values(store, &values, &mut summary, observe);
    Ok(summary.finish())
}
