//! Operations log.
//!
//! Every significant operation lands in `operaciones.log` as one line:
//! timestamp, level, message and structured fields. An optional stderr layer
//! mirrors the log while debugging; it is off by default so it never mixes
//! with the menu on stdout.

use std::fs;

use anyhow::{Context, Result};
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::config::LogSettings;

/// Initialize logging with the given settings.
///
/// The returned guard flushes the file writer when dropped; hold it until
/// the process exits.
pub fn init_logging(settings: &LogSettings) -> Result<WorkerGuard> {
    fs::create_dir_all(&settings.directory).with_context(|| {
        format!(
            "Failed to create log directory: {}",
            settings.directory.display()
        )
    })?;

    let mut layers = Vec::new();

    // File layer; RUST_LOG wins over the configured level
    let file_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file_appender = tracing_appender::rolling::never(&settings.directory, &settings.file_name);
    let (file_writer, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = fmt::layer()
        .with_target(false)
        .with_ansi(false)
        .with_writer(file_writer)
        .with_filter(file_filter);
    layers.push(file_layer.boxed());

    // Console layer
    if !settings.console_level.eq_ignore_ascii_case("off") {
        let console_filter =
            EnvFilter::try_new(&settings.console_level).unwrap_or_else(|_| EnvFilter::new("warn"));

        let console_layer = fmt::layer()
            .with_target(false)
            .with_writer(std::io::stderr)
            .with_filter(console_filter);
        layers.push(console_layer.boxed());
    }

    tracing_subscriber::registry()
        .with(layers)
        .try_init()
        .context("Failed to initialize tracing subscriber")?;

    info!(
        file = %settings.directory.join(&settings.file_name).display(),
        level = %settings.level,
        "Logging initialized"
    );

    Ok(guard)
}
