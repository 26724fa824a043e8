//! `datallog purge` specs: a `purge` followed by a fresh `run` should
//! succeed end-to-end (cold-start correctness), exercised here as far as
//! the env-directory lifecycle goes, since a fresh `run` still needs a
//! container engine to go further.

use std::path::PathBuf;

use crate::prelude::*;

fn env_dir_for(project: &Project) -> PathBuf {
    let tool_dir = PathBuf::from(assert_cmd::cargo::cargo_bin("datallog"))
        .parent()
        .expect("bin has a parent dir")
        .to_path_buf();
    let canonical = project
        .path()
        .canonicalize()
        .unwrap_or_else(|_| project.path().to_path_buf());
    let hash = sha256_hex(&canonical.to_string_lossy());
    tool_dir.join("..").join("project-envs").join(hash)
}

/// Mirrors `dtl_container::env_dir_hash` without depending on the crate,
/// so this spec is a black-box check of the on-disk layout rather than a
/// white-box check of the hashing crate's internals.
fn sha256_hex(input: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[test]
fn purge_is_idempotent_on_a_project_with_no_env_dir_yet() {
    let project = Project::empty();
    project.datallog().args(["purge"]).passes().stdout_has("Purge complete.");
    // Running it again with nothing left to remove must still succeed.
    project.datallog().args(["purge"]).passes().stdout_has("Purge complete.");
}

#[test]
fn purge_removes_an_existing_env_dir() {
    let project = Project::empty();
    let env_dir = env_dir_for(&project);
    std::fs::create_dir_all(&env_dir).expect("create fixture env dir");
    std::fs::write(env_dir.join("marker"), b"installed-package-stub").expect("write marker file");
    assert!(env_dir.exists());

    project
        .datallog()
        .args(["purge"])
        .passes()
        .stdout_has("Removed")
        .stdout_has("Purge complete.");

    assert!(!env_dir.exists(), "env dir should be removed by purge");
}
