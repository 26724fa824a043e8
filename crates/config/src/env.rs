// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access, matching the daemon crate's
//! `env.rs` convention of one function per variable rather than scattered
//! `std::env::var` calls.

use tracing::Level;

use crate::error::ConfigError;

/// `DATALLOG_CURRENT_PATH` — required; the working directory the user
/// invoked the tool from. Resolved once at CLI startup.
pub fn current_path() -> Result<String, ConfigError> {
    std::env::var("DATALLOG_CURRENT_PATH").map_err(|_| ConfigError::MissingEnvVar("DATALLOG_CURRENT_PATH"))
}

/// `DATALLOG_LOG_LEVEL` — optional, one of `DEBUG|INFO|WARNING|ERROR`
/// (default `INFO`). `WARNING` maps onto tracing's `WARN`.
pub fn log_level() -> Level {
    match std::env::var("DATALLOG_LOG_LEVEL").ok().as_deref() {
        Some("DEBUG") => Level::DEBUG,
        Some("WARNING") => Level::WARN,
        Some("ERROR") => Level::ERROR,
        _ => Level::INFO,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn missing_current_path_is_an_error() {
        std::env::remove_var("DATALLOG_CURRENT_PATH");
        assert!(current_path().is_err());
    }

    #[test]
    #[serial]
    fn current_path_is_read_verbatim() {
        std::env::set_var("DATALLOG_CURRENT_PATH", "/tmp/proj");
        assert_eq!(current_path().unwrap(), "/tmp/proj");
        std::env::remove_var("DATALLOG_CURRENT_PATH");
    }

    #[test]
    #[serial]
    fn log_level_defaults_to_info() {
        std::env::remove_var("DATALLOG_LOG_LEVEL");
        assert_eq!(log_level(), Level::INFO);
    }

    #[test]
    #[serial]
    fn log_level_maps_warning_to_warn() {
        std::env::set_var("DATALLOG_LOG_LEVEL", "WARNING");
        assert_eq!(log_level(), Level::WARN);
        std::env::remove_var("DATALLOG_LOG_LEVEL");
    }
}
