// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Work items, execution context, and step declarations.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ids::{ExecutionId, WorkId};

/// One scheduled invocation of a step.
///
/// Invariants: `step_index` must be a valid index into the application's
/// step list; `sequence` is non-empty and its last element equals
/// `step_index`; `from_work_id` is `None` exactly for the root item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkItem {
    #[serde(default)]
    pub work_id: WorkId,
    pub step_index: usize,
    pub argument: Value,
    #[serde(default)]
    pub from_work_id: Option<WorkId>,
    #[serde(default)]
    pub sequence: Vec<usize>,
}

impl WorkItem {
    /// The root item: step 0, no parent, seeded with `argument`.
    pub fn seed(argument: Value) -> Self {
        Self {
            work_id: WorkId::new(),
            step_index: 0,
            argument,
            from_work_id: None,
            sequence: vec![0],
        }
    }

    /// Builds the successor item for a step transition, extending the
    /// lineage sequence and carrying `self.work_id` forward as the parent.
    pub fn successor(&self, next_step_index: usize, argument: Value) -> Self {
        let mut sequence = self.sequence.clone();
        sequence.push(next_step_index);
        Self {
            work_id: WorkId::new(),
            step_index: next_step_index,
            argument,
            from_work_id: Some(self.work_id),
            sequence,
        }
    }
}

/// Static per-execution context, built once at controller construction and
/// delivered verbatim to every worker that asks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionProps {
    pub file_path: String,
    #[serde(default)]
    pub execution_id: ExecutionId,
    pub log_to_dir: Option<String>,
}

/// Pair of (originating work_id, terminal value). Accumulated only when
/// the step that produced it has no declared successor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerResult {
    pub work_id: WorkId,
    pub result: Value,
}

/// An error reported by a worker during step execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerError {
    pub error: String,
    pub traceback: String,
    pub work_id: Option<WorkId>,
}

/// A single declared step: an index, a name, and an optional pointer to its
/// successor step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Step {
    pub index: usize,
    pub name: String,
    pub next_step: Option<usize>,
}

/// The declared step graph of an application, as resolved from the user's
/// application module. The engine only needs the successor relation and the
/// index of the core (entry) step; the step bodies run inside the worker
/// container, not the host.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicationManifest {
    pub app_name: String,
    pub steps: Vec<Step>,
    pub core_step_index: usize,
}

impl ApplicationManifest {
    pub fn successor_of(&self, step_index: usize) -> Option<usize> {
        self.steps
            .iter()
            .find(|s| s.index == step_index)
            .and_then(|s| s.next_step)
    }

    pub fn is_terminal(&self, step_index: usize) -> bool {
        self.successor_of(step_index).is_none()
    }
}
