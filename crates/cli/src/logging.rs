// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Logging setup for `../datallog.log`, grounded in the daemon's
//! `setup_logging()`: a non-blocking rolling file appender for structured
//! events, seeded from `DATALLOG_LOG_LEVEL` via
//! [`dtl_config::env::log_level`].

use std::path::Path;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Initialises the global subscriber and returns the guard that must be
/// held for the process lifetime to keep the non-blocking writer flushing.
pub fn setup_logging(log_file: &Path) -> std::io::Result<tracing_appender::non_blocking::WorkerGuard> {
    if let Some(parent) = log_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let file_name = log_file
        .file_name()
        .ok_or_else(|| std::io::Error::other("log path has no file name"))?;
    let dir = log_file
        .parent()
        .ok_or_else(|| std::io::Error::other("log path has no parent directory"))?;
    let file_appender = tracing_appender::rolling::never(dir, file_name);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let level = dtl_config::env::log_level();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level.to_string().to_lowercase()));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(guard)
}
