// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `datallog run <app_name>` — drives the execution controller end to end,
//! grounded in `original_source/utils/subcommands/run.py`'s `run()`.

use std::path::PathBuf;

use clap::Args;
use serde_json::Value;
use tracing::info;

use dtl_container::ImagePresence;
use dtl_engine::{run_execution, ExecutionRequest};

use crate::exit_error::ExitError;
use crate::project;

#[derive(Debug, Args)]
pub struct RunArgs {
    /// Application name under `apps/`, in any of the forms `datallog`
    /// itself accepts (`demo`, `demo.py`, `apps/demo`, `./apps/demo.py`).
    pub app_name: String,

    /// Inline JSON seed value. Mutually exclusive with `--seed-file` in
    /// effect: if given, `--seed-file` and the default `seed.json` lookup
    /// are skipped.
    #[arg(long)]
    pub seed: Option<String>,

    /// Path to a JSON file holding the seed value.
    #[arg(long)]
    pub seed_file: Option<String>,

    /// Maximum number of concurrent worker containers.
    #[arg(long, default_value_t = 1)]
    pub parallelism: usize,

    /// Directory workers should write their own logs into (mounted at
    /// `/logs` inside each worker container). Created if missing.
    #[arg(long)]
    pub log_to_dir: Option<PathBuf>,
}

pub async fn handle(args: RunArgs) -> Result<(), ExitError> {
    let tool_dir = project::tool_dir()?;
    let settings = project::load_project_settings(&tool_dir)?;
    let project_path = project::project_base_dir()?;

    let name = project::parse_app(&args.app_name)?;
    let app_file = project::app_file(&project_path, &name);
    if !app_file.exists() {
        return Err(ExitError::new(
            1,
            format!(
                "Application file '{}' does not exist. Please check the app name.",
                app_file.display()
            ),
        ));
    }

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

    let seed = resolve_seed(&args, &project_path, &name)?;

    let log_to_dir = match args.log_to_dir {
        Some(dir) => {
            if !dir.exists() {
                std::fs::create_dir_all(&dir)?;
            }
            if !dir.is_dir() {
                return Err(ExitError::new(1, format!("{} is not a directory.", dir.display())));
            }
            Some(dir.canonicalize().unwrap_or(dir))
        }
        None => None,
    };

    let request = ExecutionRequest {
        runtime_image: project_config.runtime.clone(),
        env_dir,
        deploy_dir: project_path,
        app_name: name,
        seed,
        parallelism: args.parallelism,
        log_to_dir,
        step_count: None,
    };

    let outcome = run_execution(driver, request).await?;
    println!("{}", outcome.render());
    if !outcome.errors.is_empty() {
        for error in &outcome.errors {
            eprintln!("{}", crate::color::error(&error.error));
        }
        return Err(ExitError::new(1, "execution completed with worker errors"));
    }
    Ok(())
}

#[allow(clippy::expect_used)]
fn resolve_seed(args: &RunArgs, project_path: &std::path::Path, name: &str) -> Result<Value, ExitError> {
    if let Some(inline) = &args.seed {
        return serde_json::from_str(inline).map_err(|e| {
            ExitError::new(1, format!("Invalid seed content, please provide a valid JSON: {e}"))
        });
    }

    let seed_file = match args.seed_file.as_deref().map(str::trim) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => project::app_file(project_path, name)
            .parent()
            .expect("app_file always has a parent")
            .join("seed.json"),
    };

    if !seed_file.exists() {
        return Err(ExitError::new(
            1,
            format!(
                "Seed file '{}' does not exist. Please provide a valid seed file.",
                seed_file.display()
            ),
        ));
    }

    let contents = std::fs::read_to_string(&seed_file)?;
    serde_json::from_str(&contents).map_err(|e| {
        ExitError::new(1, format!("Invalid seed content, please provide a valid JSON: {e}"))
    })
}
