// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Which container engine CLI to shell out to, and the one place its
//! command-line dialect differs: user/group mapping for bind-mounted
//! volumes.

use nix::unistd::{getgid, getuid};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Engine {
    Docker,
    Podman,
}

impl Engine {
    pub fn binary(&self) -> &'static str {
        match self {
            Engine::Docker => "docker",
            Engine::Podman => "podman",
        }
    }

    /// User-mapping flags passed to `run` so files created in bind mounts
    /// are owned by the invoking user rather than root.
    pub fn user_mapping_args(&self) -> Vec<String> {
        match self {
            Engine::Docker => vec!["--user".into(), format!("{}:{}", getuid(), getgid())],
            Engine::Podman => vec!["--userns=keep-id".into()],
        }
    }
}
