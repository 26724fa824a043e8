// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The coordination protocol message vocabulary: a single tagged union
//! covering every message exchanged between host and worker over the
//! per-execution stream socket.

use dtl_core::{ExecutionProps, WorkerId, WorkerError as CoreWorkerError, WorkerResult};
use serde::{Deserialize, Serialize};

/// A coordination protocol message, tagged on the wire by its `type` field.
///
/// `WorkItem` is sent in both directions: host→worker to dispatch a unit of
/// work, and worker→host to schedule a successor step — the shape is
/// identical, only the direction differs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Message {
    #[serde(rename = "GET_STEP_EXECUTION_PROPS")]
    GetStepExecutionProps { worker_id: WorkerId },

    #[serde(rename = "EXECUTION_PROPS")]
    ExecutionProps(ExecutionProps),

    #[serde(rename = "GET_WORK_ITEM")]
    GetWorkItem { worker_id: WorkerId },

    #[serde(rename = "WORK_ITEM")]
    WorkItem(dtl_core::WorkItem),

    #[serde(rename = "NO_MORE_WORK_ITEMS")]
    NoMoreWorkItems,

    #[serde(rename = "PUBLISH_RESULT")]
    PublishResult(WorkerResult),

    #[serde(rename = "WORKER_ERROR")]
    WorkerError(CoreWorkerError),

    #[serde(rename = "MARK_AS_IDLE")]
    MarkAsIdle { worker_id: WorkerId },
}

impl Message {
    pub fn type_tag(&self) -> &'static str {
        match self {
            Message::GetStepExecutionProps { .. } => "GET_STEP_EXECUTION_PROPS",
            Message::ExecutionProps(_) => "EXECUTION_PROPS",
            Message::GetWorkItem { .. } => "GET_WORK_ITEM",
            Message::WorkItem(_) => "WORK_ITEM",
            Message::NoMoreWorkItems => "NO_MORE_WORK_ITEMS",
            Message::PublishResult(_) => "PUBLISH_RESULT",
            Message::WorkerError(_) => "WORKER_ERROR",
            Message::MarkAsIdle { .. } => "MARK_AS_IDLE",
        }
    }
}

#[cfg(test)]
#[path = "message_tests.rs"]
mod tests;
