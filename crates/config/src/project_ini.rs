// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Minimal INI parser for `project.ini`: `[project]` section with `name`,
//! `runtime`, `region` keys. No crate in the retrieval pack provides an INI
//! dialect and the original only leans on Python's stdlib `configparser`,
//! so this is a small hand-written parser rather than a shortcut around an
//! available crate.

use std::collections::HashMap;
use std::path::Path;

use crate::error::ConfigError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ini {
    sections: HashMap<String, HashMap<String, String>>,
}

impl Ini {
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let mut sections: HashMap<String, HashMap<String, String>> = HashMap::new();
        let mut current: Option<String> = None;

        for raw_line in contents.lines() {
            let line = strip_comment(raw_line).trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('[') && line.ends_with(']') {
                let name = line[1..line.len() - 1].trim().to_string();
                sections.entry(name.clone()).or_default();
                current = Some(name);
                continue;
            }
            let Some(section) = current.as_ref() else {
                continue;
            };
            let Some((key, value)) = split_key_value(line) else {
                continue;
            };
            sections
                .entry(section.clone())
                .or_default()
                .insert(key.trim().to_string(), value.trim().to_string());
        }

        if sections.is_empty() {
            return Err(ConfigError::InvalidProjectIni(
                "no sections found; ensure the file is correctly formatted".to_string(),
            ));
        }

        Ok(Self { sections })
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NoProjectIni(path.display().to_string())
            } else {
                ConfigError::Io(e)
            }
        })?;
        Self::parse(&contents)
    }

    pub fn get(&self, section: &str, key: &str) -> Option<&str> {
        self.sections.get(section)?.get(key).map(String::as_str)
    }

    /// Mirrors `configparser.get`'s strictness: missing section or key is
    /// an error, not a silent `None`.
    pub fn require(&self, section: &str, key: &str) -> Result<&str, ConfigError> {
        self.get(section, key).ok_or_else(|| {
            ConfigError::InvalidProjectIni(format!("missing [{section}] {key}"))
        })
    }
}

fn strip_comment(line: &str) -> &str {
    for (i, c) in line.char_indices() {
        if c == ';' || c == '#' {
            return &line[..i];
        }
    }
    line
}

fn split_key_value(line: &str) -> Option<(&str, &str)> {
    let eq = line.find('=');
    let colon = line.find(':');
    let idx = match (eq, colon) {
        (Some(a), Some(b)) => a.min(b),
        (Some(a), None) => a,
        (None, Some(b)) => b,
        (None, None) => return None,
    };
    Some((&line[..idx], &line[idx + 1..]))
}

/// Project configuration resolved from `project.ini`'s `[project]` section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    pub name: String,
    pub runtime: String,
    pub region: String,
}

impl ProjectConfig {
    pub fn from_ini(ini: &Ini) -> Result<Self, ConfigError> {
        Ok(Self {
            name: ini.require("project", "name")?.to_string(),
            runtime: ini.require("project", "runtime")?.to_string(),
            region: ini.require("project", "region")?.to_string(),
        })
    }

    /// `runtime` is expected in `python-<major.minor>` shape; returns the
    /// bare version suffix after the `python-` prefix, when present.
    pub fn runtime_version(&self) -> Option<&str> {
        self.runtime.strip_prefix("python-")
    }
}
