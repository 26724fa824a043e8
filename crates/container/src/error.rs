// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ContainerError {
    #[error("cannot connect to the container daemon")]
    EngineUnreachable,

    #[error("container engine command failed\nstdout:\n{stdout}\nstderr:\n{stderr}")]
    EngineFailure { stdout: String, stderr: String },

    #[error("could not parse image creation timestamp: {raw}")]
    ImageTimestampUnparsable { raw: String },

    #[error("runtime hasher did not report {which}")]
    HashMissing { which: &'static str },

    #[error("image build failed for runtime {runtime}")]
    BuildFailed { runtime: String },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
