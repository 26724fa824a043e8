// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    /// A worker reported a `WORK_ITEM` whose `step_index` falls outside the
    /// declared step range. Spec §7: this is the one case where the
    /// controller itself crashes rather than recording a worker error.
    #[error("invariant violation: step_index {step_index} is outside the declared range (0..{step_count})")]
    InvariantViolation { step_index: usize, step_count: usize },

    #[error("could not bind worker socket after {attempts} attempts")]
    SocketPathExhausted { attempts: usize },

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error("protocol error: {0}")]
    Protocol(#[from] dtl_wire::ProtocolError),

    #[error("container error: {0}")]
    Container(#[from] dtl_container::ContainerError),
}
