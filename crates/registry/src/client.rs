// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote registry HTTP client, grounded in the original `push` subcommand's
//! consult-hashes / presigned-upload / poll-status flow.

use std::path::Path;
use std::time::Duration;

use reqwest::StatusCode;

use crate::error::{map_error_response, RegistryError};
use crate::types::{
    BuildRecord, BuildStatus, BuildStatusResponse, ConsultHashesRequest, ConsultHashesResponse,
    PresignedUpload,
};

const POLL_INTERVAL: Duration = Duration::from_secs(5);

pub struct RegistryClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl RegistryClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api/sdk/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn handle_response(
        &self,
        resp: reqwest::Response,
    ) -> Result<reqwest::Response, RegistryError> {
        if resp.status().is_success() {
            return Ok(resp);
        }
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(RegistryError::ProjectNotFound);
        }
        let status = resp.status();
        let body = resp.text().await.unwrap_or_default();
        Err(map_error_response(status, &body))
    }

    /// Consults the remote for existing build records for the given hashes.
    /// A 404 means the project doesn't exist yet — callers should call
    /// [`Self::create_project`] and retry once.
    pub async fn consult_hashes(
        &self,
        project_name: &str,
        region: &str,
        requirements_hash: &str,
        application_hash: &str,
    ) -> Result<ConsultHashesResponse, RegistryError> {
        let body = ConsultHashesRequest {
            project_name: project_name.to_string(),
            region: region.to_string(),
            requirements_hash: requirements_hash.to_string(),
            application_hash: application_hash.to_string(),
        };
        let resp = self
            .http
            .post(self.url("consult-hashes"))
            .bearer_auth(&self.token)
            .json(&body)
            .send()
            .await?;
        let resp = self.handle_response(resp).await?;
        Ok(resp.json().await?)
    }

    pub async fn create_project(
        &self,
        project_name: &str,
        region: &str,
    ) -> Result<(), RegistryError> {
        let resp = self
            .http
            .post(self.url("create-project"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "project_name": project_name, "region": region }))
            .send()
            .await?;
        self.handle_response(resp).await?;
        Ok(())
    }

    /// Uploads the requirements file, confirming server-side, and polls the
    /// build status until terminal. No-ops entirely when `record.reusable()`.
    pub async fn ensure_requirements_build(
        &self,
        project_name: &str,
        record: &BuildRecord,
        requirements_file: &Path,
    ) -> Result<String, RegistryError> {
        if record.reusable() {
            return Ok(record.id.clone());
        }

        let presigned: PresignedUpload = self
            .handle_response(
                self.http
                    .get(self.url("get-deploy-requirements-presigned-url"))
                    .bearer_auth(&self.token)
                    .query(&[("project_name", project_name)])
                    .send()
                    .await?,
            )
            .await?
            .json()
            .await?;

        let bytes = tokio::fs::read(requirements_file).await?;
        self.http
            .put(&presigned.url)
            .header("Content-Type", "text/plain")
            .body(bytes)
            .send()
            .await?
            .error_for_status()?;

        let resp = self
            .http
            .post(self.url("confirm-requirements-upload"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "project_name": project_name }))
            .send()
            .await?;
        self.handle_response(resp).await?;

        self.poll_build_status("requirements-build-status", &record.id, POLL_INTERVAL)
            .await
    }

    /// Symmetric flow for the application ZIP archive.
    pub async fn ensure_applications_build(
        &self,
        project_name: &str,
        record: &BuildRecord,
        application_zip: &Path,
    ) -> Result<String, RegistryError> {
        if record.reusable() {
            return Ok(record.id.clone());
        }

        let presigned: PresignedUpload = self
            .handle_response(
                self.http
                    .get(self.url("get-deploy-applications-presigned-url"))
                    .bearer_auth(&self.token)
                    .query(&[("project_name", project_name)])
                    .send()
                    .await?,
            )
            .await?
            .json()
            .await?;

        let bytes = tokio::fs::read(application_zip).await?;
        self.http
            .put(&presigned.url)
            .header("Content-Type", "application/zip")
            .body(bytes)
            .send()
            .await?
            .error_for_status()?;

        let resp = self
            .http
            .post(self.url("confirm-applications-upload"))
            .bearer_auth(&self.token)
            .json(&serde_json::json!({ "project_name": project_name }))
            .send()
            .await?;
        self.handle_response(resp).await?;

        self.poll_build_status("applications-build-status", &record.id, POLL_INTERVAL)
            .await
    }

    async fn poll_build_status(
        &self,
        endpoint: &str,
        build_id: &str,
        interval: Duration,
    ) -> Result<String, RegistryError> {
        loop {
            let resp: BuildStatusResponse = self
                .handle_response(
                    self.http
                        .get(self.url(&format!("{endpoint}/{build_id}")))
                        .bearer_auth(&self.token)
                        .send()
                        .await?,
                )
                .await?
                .json()
                .await?;

            match resp.status {
                BuildStatus::Building => tokio::time::sleep(interval).await,
                BuildStatus::Success => return Ok(build_id.to_string()),
                BuildStatus::Failed => {
                    return Err(RegistryError::BuildFailed(
                        resp.message.unwrap_or_else(|| "build failed".to_string()),
                    ))
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
