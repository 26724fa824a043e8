// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Per-execution Unix socket path generation:
//! `<tmpdir>/datallog_worker_<10alnum>.sock`, pre-unlinked before bind.

use std::path::PathBuf;

use rand::distributions::Alphanumeric;
use rand::Rng;

const RANDOM_PART_LEN: usize = 10;

/// Generates a fresh candidate socket path under the system temp
/// directory. Collisions are astronomically unlikely (62^10 combinations)
/// but callers that need a guarantee should retry on `AddrInUse` rather
/// than trust uniqueness blindly.
pub fn generate_socket_path() -> PathBuf {
    let random_part: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(RANDOM_PART_LEN)
        .map(char::from)
        .collect();
    std::env::temp_dir().join(format!("datallog_worker_{random_part}.sock"))
}

/// Removes a stale socket file at `path`, if any, before binding.
/// `NotFound` is not an error — there is nothing to clean up.
pub fn unlink_stale(path: &std::path::Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn generated_paths_live_under_temp_dir_with_expected_prefix() {
        let path = generate_socket_path();
        assert_eq!(path.parent(), Some(std::env::temp_dir().as_path()));
        let name = path.file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("datallog_worker_"));
        assert!(name.ends_with(".sock"));
    }

    #[test]
    fn repeated_generation_does_not_collide_in_practice() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            assert!(seen.insert(generate_socket_path()));
        }
    }

    #[test]
    fn unlink_stale_is_a_noop_when_file_is_absent() {
        let path = std::env::temp_dir().join("datallog_worker_does_not_exist.sock");
        assert!(unlink_stale(&path).is_ok());
    }

    #[test]
    fn unlink_stale_removes_an_existing_file() {
        let path = generate_socket_path();
        std::fs::write(&path, b"stale").unwrap();
        assert!(path.exists());
        unlink_stale(&path).unwrap();
        assert!(!path.exists());
    }
}
