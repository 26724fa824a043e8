// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `datallog purge` — removes the current project's env directory and any
//! stale worker sockets left under the system temp directory. Narrower
//! than the original's global multi-path purge: it touches only state this
//! project owns, not every project's.

use clap::Args;

use crate::exit_error::ExitError;
use crate::project;

#[derive(Debug, Args)]
pub struct PurgeArgs {}

pub fn handle(_args: PurgeArgs) -> Result<(), ExitError> {
    let tool_dir = project::tool_dir()?;
    let project_path = project::project_base_dir()?;

    let env_dir = dtl_config::paths::project_env_dir(&tool_dir, &project_path);
    if env_dir.exists() {
        std::fs::remove_dir_all(&env_dir)?;
        println!("Removed {}", env_dir.display());
    }

    let mut removed_sockets = 0;
    for entry in std::fs::read_dir(std::env::temp_dir())?.flatten() {
        let name = entry.file_name();
        let name = name.to_string_lossy();
        if name.starts_with("datallog_worker_") && name.ends_with(".sock") {
            if std::fs::remove_file(entry.path()).is_ok() {
                removed_sockets += 1;
            }
        }
    }
    if removed_sockets > 0 {
        println!("Removed {removed_sockets} stale worker socket(s)");
    }

    println!("Purge complete.");
    Ok(())
}
