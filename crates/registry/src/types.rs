// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuildStatus {
    Building,
    Success,
    Failed,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    pub exists: bool,
    pub status: BuildStatus,
    pub id: String,
}

impl BuildRecord {
    /// Whether the existing build can be reused as-is.
    pub fn reusable(&self) -> bool {
        self.exists && self.status != BuildStatus::Failed
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ConsultHashesRequest {
    pub project_name: String,
    pub region: String,
    pub requirements_hash: String,
    pub application_hash: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ConsultHashesResponse {
    pub req_build: BuildRecord,
    pub app_build: BuildRecord,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PresignedUpload {
    pub url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct BuildStatusResponse {
    pub status: BuildStatus,
    pub message: Option<String>,
}
