// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `settings.json`, living in the tool's parent directory:
//! `{ container_engine: "docker" | "podman" }`. Additional keys are
//! ignored (`serde(default)` fields only); a missing file yields the
//! default settings rather than an error, matching the original
//! `load_settings()`'s `FileNotFoundError` fallback.

use std::path::{Path, PathBuf};

use dtl_container::Engine;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Settings {
    #[serde(default = "default_engine")]
    pub container_engine: Engine,
}

fn default_engine() -> Engine {
    Engine::Docker
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            container_engine: default_engine(),
        }
    }
}

/// `<tool_dir>/../settings.json`, resolved relative to the current
/// executable's parent directory.
pub fn settings_path(tool_dir: &Path) -> PathBuf {
    tool_dir.join("..").join("settings.json")
}

pub fn load_settings(tool_dir: &Path) -> Result<Settings, ConfigError> {
    let path = settings_path(tool_dir);
    let contents = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Settings::default()),
        Err(e) => return Err(ConfigError::Io(e)),
    };
    serde_json::from_str(&contents).map_err(|e| ConfigError::InvalidSettings(e.to_string()))
}

pub fn save_settings(tool_dir: &Path, settings: &Settings) -> Result<(), ConfigError> {
    let path = settings_path(tool_dir);
    let json = serde_json::to_string_pretty(settings)
        .map_err(|e| ConfigError::InvalidSettings(e.to_string()))?;
    std::fs::write(path, json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_settings_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let settings = load_settings(dir.path()).unwrap();
        assert_eq!(settings.container_engine, Engine::Docker);
    }

    #[test]
    fn round_trips_through_save_and_load() {
        let dir = tempdir().unwrap();
        let settings = Settings {
            container_engine: Engine::Podman,
        };
        save_settings(dir.path(), &settings).unwrap();
        let loaded = load_settings(dir.path()).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let dir = tempdir().unwrap();
        std::fs::write(
            settings_path(dir.path()),
            r#"{"container_engine": "docker", "future_key": 1}"#,
        )
        .unwrap();
        let settings = load_settings(dir.path()).unwrap();
        assert_eq!(settings.container_engine, Engine::Docker);
    }

    #[test]
    fn malformed_json_is_an_error() {
        let dir = tempdir().unwrap();
        std::fs::write(settings_path(dir.path()), "{not json").unwrap();
        assert!(load_settings(dir.path()).is_err());
    }
}
