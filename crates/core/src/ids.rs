// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Identifier newtypes for work items, executions, and workers.
//!
//! Work items and executions are tagged with a [`uuid::Uuid`] (matching the
//! coordination protocol's wire shape); workers are tagged with a plain
//! monotonically increasing integer assigned by the controller, not a
//! content-addressed id — worker identity only needs to be unique within a
//! single execution.

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkId(pub Uuid);

impl WorkId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for WorkId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for WorkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExecutionId(pub Uuid);

impl ExecutionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for ExecutionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ExecutionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monotonically increasing worker identifier. The allocator hands out
/// `1, 2, 3, ...` — never `0`, and never reused within an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkerId(pub u64);

impl fmt::Display for WorkerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Allocates strictly increasing [`WorkerId`]s starting at `1`.
#[derive(Default)]
pub struct WorkerIdAllocator {
    next: AtomicU64,
}

impl WorkerIdAllocator {
    pub fn new() -> Self {
        Self {
            next: AtomicU64::new(0),
        }
    }

    pub fn next(&self) -> WorkerId {
        WorkerId(self.next.fetch_add(1, Ordering::SeqCst) + 1)
    }
}

#[cfg(test)]
#[path = "id_tests.rs"]
mod tests;
