// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Custom error type that carries a process exit code.
//!
//! Commands return `ExitError` instead of calling `std::process::exit()`
//! directly, allowing `main()` to handle process termination.

use std::fmt;

#[derive(Debug)]
pub struct ExitError {
    pub code: i32,
    pub message: String,
}

impl ExitError {
    pub fn new(code: i32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl fmt::Display for ExitError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ExitError {}

impl From<dtl_config::ConfigError> for ExitError {
    fn from(e: dtl_config::ConfigError) -> Self {
        ExitError::new(1, e.to_string())
    }
}

impl From<dtl_container::ContainerError> for ExitError {
    fn from(e: dtl_container::ContainerError) -> Self {
        ExitError::new(1, e.to_string())
    }
}

impl From<dtl_engine::EngineError> for ExitError {
    fn from(e: dtl_engine::EngineError) -> Self {
        ExitError::new(1, e.to_string())
    }
}

impl From<dtl_registry::RegistryError> for ExitError {
    fn from(e: dtl_registry::RegistryError) -> Self {
        ExitError::new(1, e.to_string())
    }
}

impl From<std::io::Error> for ExitError {
    fn from(e: std::io::Error) -> Self {
        ExitError::new(1, e.to_string())
    }
}
