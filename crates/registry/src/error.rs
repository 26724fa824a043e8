// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("login required")]
    LoginRequired,

    #[error("your plan has expired")]
    PlanExpired,

    #[error("project does not exist")]
    ProjectNotFound,

    #[error("network error: {0}")]
    Network(String),

    #[error("remote build failed: {0}")]
    BuildFailed(String),

    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("zip error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Maps a non-2xx HTTP response body/status: 403 + "Forbidden" body =>
/// LoginRequired; "plan expired" substring anywhere => PlanExpired; 404 is
/// handled by the caller (project-not-found retry flow), not here.
pub fn map_error_response(status: reqwest::StatusCode, body: &str) -> RegistryError {
    if status == reqwest::StatusCode::FORBIDDEN && body.contains("Forbidden") {
        return RegistryError::LoginRequired;
    }
    if body.to_lowercase().contains("plan have expired") || body.to_lowercase().contains("plan expired")
    {
        return RegistryError::PlanExpired;
    }
    RegistryError::Network(body.to_string())
}
