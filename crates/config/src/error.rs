// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("required environment variable {0} is not set")]
    MissingEnvVar(&'static str),

    #[error("invalid settings file: {0}")]
    InvalidSettings(String),

    #[error("project.ini not found at {0}")]
    NoProjectIni(String),

    #[error("invalid project.ini: {0}")]
    InvalidProjectIni(String),

    #[error("invalid app name: {0}")]
    InvalidAppName(String),

    #[error("invalid login token: {0}")]
    InvalidLoginToken(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
