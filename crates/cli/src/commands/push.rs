// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `datallog push <app_name>` — the build-cache reuse decision and
//! registry upload flow, grounded in
//! `original_source/utils/subcommands/push.py`'s `push()`.

use clap::Args;
use tracing::info;

use dtl_config::CredentialStore;
use dtl_container::ImagePresence;
use dtl_registry::{bundle_deploy_directory, RegistryClient};

use crate::exit_error::ExitError;
use crate::project;

/// Overridable via `DATALLOG_REGISTRY_URL`; the original hardcodes this as
/// `variables.datallog_url`, which isn't present anywhere in this
/// retrieval pack — an env override keeps the client testable against a
/// local stub server.
const DEFAULT_REGISTRY_URL: &str = "https://api.datallog.dev";

#[derive(Debug, Args)]
pub struct PushArgs {
    /// Application name; unused beyond validating the project layout, since
    /// a push bundles the whole deploy directory.
    pub app_name: String,
}

pub async fn handle(args: PushArgs) -> Result<(), ExitError> {
    let tool_dir = project::tool_dir()?;
    let settings = project::load_project_settings(&tool_dir)?;
    let project_path = project::project_base_dir()?;

    let credentials = dtl_config::FileCredentialStore::new(&tool_dir)
        .load()?
        .ok_or_else(|| {
            ExitError::new(1, "You are not logged in. Please log in first with `datallog login`.")
        })?;

    let _ = project::parse_app(&args.app_name)?;
    let project_config = project::load_project_config(&project_path)?;
    let driver = project::container_driver(&tool_dir, &settings);

    info!(runtime = %project_config.runtime, "checking docker image");
    match driver.image_exists(&project_config.runtime).await? {
        ImagePresence::Built => {}
        ImagePresence::Outdated | ImagePresence::Absent => {
            driver.build(&project_config.runtime).await?;
        }
    }

    let env_dir = dtl_config::paths::ensure_project_env_dir(&tool_dir, &project_path)?;
    driver
        .install_packages(
            &project_path.join("requirements.txt"),
            &env_dir,
            &project_config.runtime,
        )
        .await?;

    let keys = driver
        .generate_hash(&project_path, &env_dir, &project_config.runtime)
        .await?;

    let registry_url =
        std::env::var("DATALLOG_REGISTRY_URL").unwrap_or_else(|_| DEFAULT_REGISTRY_URL.to_string());
    let token = format!("{} {}", credentials.authorization, credentials.x_api_key);
    let client = RegistryClient::new(registry_url, token);

    let response = client
        .consult_hashes(
            &project_config.name,
            &project_config.region,
            &keys.requirements_hash,
            &keys.application_hash,
        )
        .await;

    let hashes = match response {
        Ok(hashes) => hashes,
        Err(dtl_registry::RegistryError::ProjectNotFound) => {
            info!("project does not exist yet; creating it");
            client
                .create_project(&project_config.name, &project_config.region)
                .await?;
            client
                .consult_hashes(
                    &project_config.name,
                    &project_config.region,
                    &keys.requirements_hash,
                    &keys.application_hash,
                )
                .await?
        }
        Err(e) => return Err(e.into()),
    };

    let requirements_build_id = client
        .ensure_requirements_build(
            &project_config.name,
            &hashes.req_build,
            &project_path.join("requirements.txt"),
        )
        .await?;

    let bundle_path = std::env::temp_dir().join(format!("datallog-push-{}.zip", uuid::Uuid::new_v4()));
    let manifest = serde_json::json!({
        "requirements_hash": keys.requirements_hash,
        "application_hash": keys.application_hash,
        "requirements_build_identifier": requirements_build_id,
    });
    bundle_deploy_directory(&project_path, &manifest, &bundle_path)?;

    let applications_build_id = client
        .ensure_applications_build(&project_config.name, &hashes.app_build, &bundle_path)
        .await?;
    let _ = std::fs::remove_file(&bundle_path);

    info!(requirements_build_id, applications_build_id, "push complete");
    if hashes.req_build.reusable() && hashes.app_build.reusable() {
        println!("Project is already up to date");
    } else {
        println!("Project successfully updated and deployed");
    }
    Ok(())
}
