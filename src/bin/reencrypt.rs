// src/bin/reencrypt.rs
//! Re-encrypt stored secrets under the active key, or add a new key

use std::cell::Cell;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use secret_reencrypt::commands::{
    config_reencrypt_all, config_reencrypt_path, key_add, order_reencrypt,
};
use secret_reencrypt::report::export_summary;
use secret_reencrypt::{
    open_db, CoreError, EnvironmentConfig, FieldSchema, Outcome, Reencryptor, RowReport,
    RunSummary, Settings,
};
use tracing::{error, info};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "reencrypt", about = "Re-encrypt at-rest secrets after a key rotation")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Settings file (defaults to REENCRYPT_CONFIG, then the user config dir).
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error). RUST_LOG wins when set.
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Write a JSON summary of the run to this file.
    #[arg(long, global = true)]
    report: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Command {
    /// Re-encrypt all encrypted configuration values using the current key.
    #[command(name = "config:reencrypt")]
    ConfigAll,
    /// Re-encrypt all configuration values stored for one path.
    #[command(name = "config:reencrypt:path")]
    ConfigPath {
        /// Configuration path, e.g. "payment/gateway/api_key".
        path: String,
    },
    /// Re-encrypt order payments, optionally only the given order IDs.
    #[command(name = "order:reencrypt")]
    Orders {
        /// Order IDs. When omitted, every order with a stored value is re-encrypted.
        /// Long lists are looked up in chunks.
        ids: Vec<i64>,
        /// Rows per window; higher is faster but uses more memory.
        #[arg(long)]
        batch_size: Option<u64>,
    },
    /// Add a new encryption key to the deployment configuration.
    #[command(name = "key:add")]
    KeyAdd {
        /// Key to use instead of generating a random one.
        key: Option<String>,
    },
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            match err.downcast_ref::<CoreError>() {
                Some(CoreError::NothingFound(what)) => error!("{what}"),
                _ => error!("{err:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref()).context("Failed to load settings")?;
    let mut env = EnvironmentConfig::open(&settings.deployment.env_file);

    if let Command::KeyAdd { key } = &cli.command {
        let added = key_add(&mut env, key.as_deref()).with_context(|| {
            format!(
                "Failed to add key to {}",
                settings.deployment.env_file.display()
            )
        })?;
        match &added.generated {
            Some(generated) => {
                println!("No key provided. Generated a random key: {}", generated.expose_secret())
            }
            None => println!("Using the provided key."),
        }
        println!(
            "Encryption key v{} (fingerprint {}) added to {}",
            added.version,
            added.fingerprint,
            settings.deployment.env_file.display()
        );
        return Ok(());
    }

    let ring = env
        .key_ring()
        .context("Failed to read key ring")?
        .with_context(|| {
            format!(
                "No encryption keys in {}; run `reencrypt key:add` first",
                settings.deployment.env_file.display()
            )
        })?;
    info!(keys = ring.len(), active = ring.active_version(), "key ring loaded");

    let conn = open_db(&settings.database.path).with_context(|| {
        format!(
            "Failed to open database {}",
            settings.database.path.display()
        )
    })?;
    let engine = Reencryptor::new(ring);

    let summary = match cli.command {
        Command::ConfigAll => {
            let schema = FieldSchema::load(&settings.schema.file).with_context(|| {
                format!("Failed to load field schema {}", settings.schema.file.display())
            })?;
            let progress = Progress::default();
            config_reencrypt_all(
                &engine,
                &conn,
                &schema,
                |_, values| progress.restart(values),
                |path, report| progress.advance(Some(path), report),
            )?
        }
        Command::ConfigPath { path } => {
            info!("Starting re-encryption of configuration values for path: {path}");
            let progress = Progress::default();
            config_reencrypt_path(
                &engine,
                &conn,
                &path,
                |values| progress.restart(values),
                |report| progress.advance(None, report),
            )?
        }
        Command::Orders { ids, batch_size } => {
            let batch_size = batch_size.unwrap_or(settings.reencrypt.batch_size);
            let progress = Progress::default();
            order_reencrypt(
                &engine,
                &conn,
                &ids,
                batch_size,
                |plan| progress.restart(plan.total()),
                |report| progress.advance(None, report),
            )?
        }
        // handled above
        Command::KeyAdd { .. } => return Ok(()),
    };

    print_summary(&summary);
    if let Some(path) = &cli.report {
        export_summary(&summary, path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }
    Ok(())
}

/// Progress lines every ~5% of the planned total
#[derive(Default)]
struct Progress {
    done: Cell<u64>,
    total: Cell<u64>,
}

impl Progress {
    fn restart(&self, total: u64) {
        self.done.set(0);
        self.total.set(total);
    }

    fn advance(&self, path: Option<&str>, report: &RowReport) {
        let done = self.done.get() + 1;
        self.done.set(done);
        let total = self.total.get();
        let step = (total / 20).max(1);
        if done % step == 0 || done == total {
            match path {
                Some(path) => info!("{path}: {done}/{total}"),
                None => info!("{}: {done}/{total}", report.label),
            }
        }
    }
}

fn print_summary(summary: &RunSummary) {
    println!("\n=== RE-ENCRYPTION COMPLETE ===");
    println!("Updated:         {}", summary.updated);
    println!("Skipped (empty): {}", summary.skipped_empty);
    println!("Decrypt failed:  {}", summary.decrypt_failed);
    println!("Errors:          {}", summary.errored);
    if summary.failures_dropped > 0 {
        println!(
            "Failures listed: {} ({} more only in the log)",
            summary.failures.len(),
            summary.failures_dropped
        );
    }
    if let Some(finished) = summary.finished_at {
        let elapsed = finished - summary.started_at;
        println!("Elapsed:         {}.{:03}s", elapsed.num_seconds(), elapsed.num_milliseconds() % 1000);
    }
    for failure in &summary.failures {
        match &failure.outcome {
            Outcome::DecryptFailed => println!(
                "  ✗ {}: decryption failed, value might be corrupted",
                failure.label
            ),
            Outcome::Failed(cause) => println!("  ✗ {}: {cause}", failure.label),
            _ => {}
        }
    }
}
