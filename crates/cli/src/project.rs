// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared project resolution: the tool's install directory, the project
//! base directory (`DATALLOG_CURRENT_PATH`), `settings.json`/`project.ini`
//! loading, and app-name normalization, grounded in
//! `original_source/utils/subcommands/run.py`'s `parse_app`/`get_project_base_dir`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use dtl_config::{load_settings, ConfigError, Ini, ProjectConfig, Settings};
use dtl_container::ContainerDriver;

/// The directory containing the running `datallog` binary — every
/// persisted-state path is resolved relative to its parent.
pub fn tool_dir() -> std::io::Result<PathBuf> {
    let exe = std::env::current_exe()?;
    Ok(exe
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(".")))
}

/// `DATALLOG_CURRENT_PATH`, the project's base directory.
pub fn project_base_dir() -> Result<PathBuf, ConfigError> {
    Ok(PathBuf::from(dtl_config::env::current_path()?))
}

pub fn load_project_settings(tool_dir: &Path) -> Result<Settings, ConfigError> {
    load_settings(tool_dir)
}

pub fn load_project_config(project_path: &Path) -> Result<ProjectConfig, ConfigError> {
    let ini = Ini::read(&project_path.join("project.ini"))?;
    ProjectConfig::from_ini(&ini)
}

pub fn container_driver(tool_dir: &Path, settings: &Settings) -> Arc<ContainerDriver> {
    Arc::new(ContainerDriver::new(
        settings.container_engine,
        dtl_config::paths::runtimes_dir(tool_dir),
    ))
}

/// Normalizes a user-supplied app name the way the original `parse_app`
/// does: strips a trailing slash, a leading `./`, a trailing `.py`, and a
/// leading `apps/`; if the remainder still contains a path separator only
/// the last segment is kept. An empty result after stripping is an error.
pub fn parse_app(app_name: &str) -> Result<String, ConfigError> {
    let mut name = app_name.trim();
    name = name.strip_suffix('/').unwrap_or(name);
    name = name.strip_prefix("./").unwrap_or(name);
    name = name.strip_suffix(".py").unwrap_or(name);
    name = name.strip_prefix("apps/").unwrap_or(name);

    let normalized = match name.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => name,
    };

    if normalized.is_empty() {
        return Err(ConfigError::InvalidAppName(app_name.to_string()));
    }
    Ok(normalized.to_string())
}

/// `<project_path>/apps/<name>/<name>.py`, the application entry point the
/// worker is pointed at.
pub fn app_file(project_path: &Path, name: &str) -> PathBuf {
    project_path.join("apps").join(name).join(format!("{name}.py"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use yare::parameterized;

    #[parameterized(
        bare = { "demo", "demo" },
        trailing_slash = { "demo/", "demo" },
        leading_dot_slash = { "./demo", "demo" },
        trailing_py = { "demo.py", "demo" },
        leading_apps = { "apps/demo", "demo" },
        fully_qualified = { "./apps/demo.py", "demo" },
        nested = { "apps/sub/demo", "demo" },
    )]
    fn normalizes_app_names(input: &str, expected: &str) {
        assert_eq!(parse_app(input).unwrap(), expected);
    }

    #[test]
    fn empty_after_stripping_is_an_error() {
        assert!(parse_app("").is_err());
        assert!(parse_app("   ").is_err());
    }

    #[test]
    fn app_file_points_at_the_package_entry_point() {
        let path = app_file(Path::new("/proj"), "demo");
        assert_eq!(path, Path::new("/proj/apps/demo/demo.py"));
    }
}
