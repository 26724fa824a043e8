// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Build-cache key derivation: the host-side env directory hash (keyed on
//! deploy path) and parsing of the in-container hasher's stdout.

use std::path::Path;

use sha2::{Digest, Sha256};

use crate::error::ContainerError;

/// `sha256(deploy_path)` hex digest, used as the env directory name so
/// repeated deployments from the same path reuse installed packages.
pub fn env_dir_hash(deploy_path: &Path) -> String {
    let resolved = deploy_path
        .canonicalize()
        .unwrap_or_else(|_| deploy_path.to_path_buf());
    let mut hasher = Sha256::new();
    hasher.update(resolved.to_string_lossy().as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildCacheKeys {
    pub requirements_hash: String,
    pub application_hash: String,
}

/// Parses the two `DATALLOG_*_HASH=<value>` lines out of the in-container
/// hasher's stdout. Either missing is a hard error.
pub fn parse_hash_output(stdout: &str) -> Result<BuildCacheKeys, ContainerError> {
    let mut requirements_hash = None;
    let mut application_hash = None;

    for line in stdout.lines() {
        if let Some(value) = line.strip_prefix("DATALLOG_REQUIREMENTS_HASH=") {
            requirements_hash = Some(value.trim().to_string());
        } else if let Some(value) = line.strip_prefix("DATALLOG_APP_HASH=") {
            application_hash = Some(value.trim().to_string());
        }
    }

    Ok(BuildCacheKeys {
        requirements_hash: requirements_hash.ok_or(ContainerError::HashMissing {
            which: "DATALLOG_REQUIREMENTS_HASH",
        })?,
        application_hash: application_hash.ok_or(ContainerError::HashMissing {
            which: "DATALLOG_APP_HASH",
        })?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn same_path_yields_same_hash() {
        let path = PathBuf::from("/tmp/some/deploy/dir");
        assert_eq!(env_dir_hash(&path), env_dir_hash(&path));
    }

    #[test]
    fn different_paths_yield_different_hashes() {
        let a = PathBuf::from("/tmp/a");
        let b = PathBuf::from("/tmp/b");
        assert_ne!(env_dir_hash(&a), env_dir_hash(&b));
    }

    #[test]
    fn parses_both_hash_lines_in_either_order() {
        let stdout = "some noise\nDATALLOG_APP_HASH=app123\nDATALLOG_REQUIREMENTS_HASH=req456\n";
        let keys = parse_hash_output(stdout).unwrap();
        assert_eq!(keys.requirements_hash, "req456");
        assert_eq!(keys.application_hash, "app123");
    }

    #[test]
    fn missing_requirements_hash_is_an_error() {
        let stdout = "DATALLOG_APP_HASH=app123\n";
        assert!(parse_hash_output(stdout).is_err());
    }

    #[test]
    fn empty_stdout_is_an_error() {
        assert!(parse_hash_output("").is_err());
    }
}
