// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The execution controller: the work-item queue and scheduler, worker
//! admission, and result/error accumulation. Each field of its state is
//! guarded by its own mutex and no two are ever locked at once, so
//! admission checks read each field's length as an independent snapshot
//! rather than a single atomic view.

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;
use serde_json::Value;
use tokio::sync::Notify;
use tracing::{debug, warn};

use dtl_core::{ExecutionProps, WorkItem, WorkerError, WorkerId, WorkerIdAllocator, WorkerResult};

use crate::error::EngineError;

/// Spawns a new worker process for the given id. Implemented by the
/// orchestrator (crate `dtl-engine`'s caller), which owns the container
/// driver; the controller only decides *when* a new worker is needed, not
/// *how* one is launched — keeping the scheduler free of any container
/// dependency, matching the stream server's relation-not-ownership split.
pub trait WorkerLauncher: Send + Sync {
    fn launch(&self, worker_id: WorkerId);
}

/// The outcome of a completed execution: the terminal results collected
/// (in arrival order) and the worker errors recorded along the way.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    pub results: Vec<WorkerResult>,
    pub errors: Vec<WorkerError>,
    /// Set when the controller shut down with the queue still non-empty;
    /// treated as an accepted loss, logged as a warning rather than failing
    /// the run.
    pub queue_dropped: bool,
}

impl Outcome {
    /// Renders the completion print: `None` when no terminal leaf exists,
    /// the bare value when exactly one was produced, otherwise a JSON
    /// array of all of them.
    pub fn render(&self) -> String {
        match self.results.len() {
            0 => "None".to_string(),
            1 => serde_json::to_string_pretty(&self.results[0].result)
                .unwrap_or_else(|_| "null".to_string()),
            _ => {
                let values: Vec<&Value> = self.results.iter().map(|r| &r.result).collect();
                serde_json::to_string_pretty(&values).unwrap_or_else(|_| "[]".to_string())
            }
        }
    }
}

pub struct Controller {
    queue: Mutex<VecDeque<WorkItem>>,
    idle_workers: Mutex<HashSet<WorkerId>>,
    spawned: Mutex<HashSet<WorkerId>>,
    results: Mutex<Vec<WorkerResult>>,
    errors: Mutex<Vec<WorkerError>>,
    ended_workers: Mutex<usize>,
    worker_ids: WorkerIdAllocator,
    parallelism: usize,
    step_count: Option<usize>,
    execution_props: ExecutionProps,
    launcher: Arc<dyn WorkerLauncher>,
    done: Notify,
    finished: AtomicBool,
    fatal: Mutex<Option<EngineError>>,
}

impl Controller {
    /// Admits the seed work item and returns the controller ready for
    /// dispatch. `step_count`, when known (from a previously generated
    /// build manifest), enables the invariant check on successor
    /// `WORK_ITEM`s; `run` invocations that never consulted a manifest
    /// pass `None` and skip the check rather than guess a bound.
    #[allow(clippy::expect_used)]
    pub fn new(
        seed: Value,
        execution_props: ExecutionProps,
        parallelism: usize,
        step_count: Option<usize>,
        launcher: Arc<dyn WorkerLauncher>,
    ) -> Arc<Self> {
        let controller = Arc::new(Self {
            queue: Mutex::new(VecDeque::new()),
            idle_workers: Mutex::new(HashSet::new()),
            spawned: Mutex::new(HashSet::new()),
            results: Mutex::new(Vec::new()),
            errors: Mutex::new(Vec::new()),
            ended_workers: Mutex::new(0),
            worker_ids: WorkerIdAllocator::new(),
            parallelism: parallelism.max(1),
            step_count,
            execution_props,
            launcher,
            done: Notify::new(),
            finished: AtomicBool::new(false),
            fatal: Mutex::new(None),
        });
        controller
            .enqueue(WorkItem::seed(seed))
            .expect("seed work item always targets step 0");
        controller
    }

    pub fn execution_props(&self) -> ExecutionProps {
        self.execution_props.clone()
    }

    /// Pops one item non-blockingly (LIFO: most recently enqueued first),
    /// unconditionally clearing `worker_id` from `idle_workers` regardless
    /// of whether an item was found.
    pub fn get_work_item(&self, worker_id: WorkerId) -> Option<WorkItem> {
        let item = self.queue.lock().pop_back();
        self.idle_workers.lock().remove(&worker_id);
        item
    }

    /// Enqueues a work item and re-runs the admission check, adjusting the
    /// worker count on every enqueue. Returns an error without enqueuing
    /// when `step_index` is outside the declared range — a fatal internal
    /// error rather than a worker error.
    pub fn enqueue(&self, item: WorkItem) -> Result<(), EngineError> {
        if let Some(step_count) = self.step_count {
            if item.step_index >= step_count {
                return Err(EngineError::InvariantViolation {
                    step_index: item.step_index,
                    step_count,
                });
            }
        }
        self.queue.lock().push_back(item);
        self.maybe_spawn();
        Ok(())
    }

    pub fn publish_result(&self, result: WorkerResult) {
        self.results.lock().push(result);
    }

    pub fn record_error(&self, error: WorkerError) {
        self.errors.lock().push(error);
    }

    pub fn mark_idle(&self, worker_id: WorkerId) {
        self.idle_workers.lock().insert(worker_id);
    }

    /// Records a fatal internal error (invariant violation) and
    /// immediately triggers completion — siblings are not given a chance
    /// to drain further, since the controller's own state may be corrupt.
    pub fn fail_fatal(&self, error: EngineError) {
        *self.fatal.lock() = Some(error);
        self.finished.store(true, Ordering::SeqCst);
        self.done.notify_waiters();
    }

    /// Spec §4.2 "Retire": called by the process supervisor when a spawned
    /// worker's container run exits. When every spawned worker has exited,
    /// completion is signalled.
    pub fn worker_exited(&self) {
        let (ended, spawned) = {
            let mut ended = self.ended_workers.lock();
            *ended += 1;
            (*ended, self.spawned.lock().len())
        };
        debug!(ended, spawned, "worker exited");
        if ended == spawned {
            if !self.queue.lock().is_empty() {
                warn!("execution completed with a non-empty queue; dropping pending work items");
            }
            self.finished.store(true, Ordering::SeqCst);
            self.done.notify_waiters();
        }
    }

    /// Blocks until every spawned worker has exited (or a fatal error was
    /// recorded), then returns the collected outcome.
    pub async fn wait_for_completion(&self) -> Result<Outcome, EngineError> {
        while !self.finished.load(Ordering::SeqCst) {
            self.done.notified().await;
        }
        if let Some(err) = self.fatal.lock().take() {
            return Err(err);
        }
        let queue_dropped = !self.queue.lock().is_empty();
        Ok(Outcome {
            results: self.results.lock().clone(),
            errors: self.errors.lock().clone(),
            queue_dropped,
        })
    }

    pub fn spawned_count(&self) -> usize {
        self.spawned.lock().len()
    }

    pub fn pending_count(&self) -> usize {
        self.queue.lock().len()
    }

    /// Adjusts the worker count: while pending exceeds idle and the
    /// spawned set has room under `parallelism`, launch one more worker.
    /// The check-and-insert into `spawned` happens under that field's own
    /// lock so `spawned.len() <= parallelism` holds even under concurrent
    /// callers.
    fn maybe_spawn(&self) {
        loop {
            let pending = self.queue.lock().len();
            let idle = self.idle_workers.lock().len();
            let new_id = {
                let mut spawned = self.spawned.lock();
                if !(pending > idle && spawned.len() < self.parallelism) {
                    break;
                }
                let id = self.worker_ids.next();
                spawned.insert(id);
                id
            };
            self.launcher.launch(new_id);
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
