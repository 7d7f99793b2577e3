use anyhow::{Context, Result};
use std::fs::{File, OpenOptions};
use std::path::Path;
use std::sync::Mutex;
use tracing::Subscriber;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Human-readable logs on stderr (`RUST_LOG`, default `info`) plus an
/// append-only error log file that only receives `ERROR` events.
pub fn init_logging(error_log: &Path) -> Result<()> {
    let file = open_error_log(error_log)?;
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing::subscriber::set_global_default(subscriber(filter, Mutex::new(file)))
        .context("installing log subscriber")?;
    Ok(())
}

fn open_error_log(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("opening error log {}", path.display()))
}

fn subscriber<W>(filter: EnvFilter, error_writer: W) -> impl Subscriber + Send + Sync + 'static
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false).with_filter(filter))
        .with(
            fmt::layer()
                .with_writer(error_writer)
                .with_ansi(false)
                .with_target(false)
                .with_filter(LevelFilter::ERROR),
        )
}
