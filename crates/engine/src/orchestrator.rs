// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires the scheduler, the wire server, and the container driver together
//! into one `run` invocation, taking over the original's
//! `_worker_process`/supervisor role. This is the one piece of the engine
//! that actually knows how a worker gets spawned; the [`Controller`]
//! itself only ever sees the [`WorkerLauncher`] trait.

use std::path::PathBuf;
use std::sync::Arc;

use serde_json::Value;
use tracing::warn;

use dtl_container::ContainerDriver;
use dtl_core::{ExecutionId, ExecutionProps, WorkerError, WorkerId};

use crate::controller::{Controller, Outcome, WorkerLauncher};
use crate::error::EngineError;
use crate::server::StreamServer;
use crate::socket::{generate_socket_path, unlink_stale};

/// Everything needed to run one application execution end to end.
pub struct ExecutionRequest {
    pub runtime_image: String,
    pub env_dir: PathBuf,
    pub deploy_dir: PathBuf,
    pub app_name: String,
    pub seed: Value,
    pub parallelism: usize,
    pub log_to_dir: Option<PathBuf>,
    /// Known step count, when a build manifest was consulted up front;
    /// `None` for a plain `run` that never fetched one, in which case the
    /// step-count invariant check is simply skipped.
    pub step_count: Option<usize>,
}

/// Binds the stream server, admits the seed item, spawns workers as the
/// controller calls for them, and blocks until the execution completes.
pub async fn run_execution(
    driver: Arc<ContainerDriver>,
    request: ExecutionRequest,
) -> Result<Outcome, EngineError> {
    let socket_path = generate_socket_path();
    let execution_props = ExecutionProps {
        file_path: format!("/deploy/apps/{0}/{0}.py", request.app_name),
        execution_id: ExecutionId::new(),
        log_to_dir: request
            .log_to_dir
            .as_ref()
            .map(|_| "/logs".to_string()),
    };

    let slot = Arc::new(ControllerSlot::new());
    let launcher = Arc::new(WorkerSupervisor {
        driver,
        runtime_image: request.runtime_image,
        env_dir: request.env_dir,
        deploy_dir: request.deploy_dir,
        socket_path: socket_path.clone(),
        log_to_dir: request.log_to_dir,
        controller: Arc::clone(&slot),
    });

    let controller = Controller::new(
        request.seed,
        execution_props,
        request.parallelism,
        request.step_count,
        launcher,
    );
    slot.set(Arc::clone(&controller));

    let server = StreamServer::bind(socket_path.clone(), Arc::clone(&controller))?;
    server.run().await;

    let outcome = controller.wait_for_completion().await?;
    if let Err(e) = unlink_stale(&socket_path) {
        warn!(error = %e, "failed to remove worker socket after execution");
    }
    Ok(outcome)
}

/// Hands the controller to the launcher after construction without
/// changing `Controller::new`'s all-at-once admission behavior: the seed
/// item is enqueued (and the first worker launched) before the caller has
/// anywhere to put the resulting `Arc<Controller>`, so the launcher holds
/// this slot and waits on it instead. Mirrors the `Notify`-gated
/// completion flag the controller itself uses.
struct ControllerSlot {
    cell: std::sync::OnceLock<Arc<Controller>>,
    ready: tokio::sync::Notify,
}

impl ControllerSlot {
    fn new() -> Self {
        Self {
            cell: std::sync::OnceLock::new(),
            ready: tokio::sync::Notify::new(),
        }
    }

    fn set(&self, controller: Arc<Controller>) {
        let _ = self.cell.set(controller);
        self.ready.notify_waiters();
    }

    async fn get(&self) -> Arc<Controller> {
        loop {
            if let Some(controller) = self.cell.get() {
                return Arc::clone(controller);
            }
            self.ready.notified().await;
        }
    }
}

struct WorkerSupervisor {
    driver: Arc<ContainerDriver>,
    runtime_image: String,
    env_dir: PathBuf,
    deploy_dir: PathBuf,
    socket_path: PathBuf,
    log_to_dir: Option<PathBuf>,
    controller: Arc<ControllerSlot>,
}

impl WorkerLauncher for WorkerSupervisor {
    /// Spawns the container process immediately (it needs no controller
    /// reference), then hands its exit status to a background task that
    /// waits for the controller to become available before reporting it.
    /// A non-zero exit or a failure to even start the container is
    /// recorded as a worker error and still retires the worker slot —
    /// unlike the collaborator this engine is grounded on, which leaves
    /// the execution hanging forever in that case.
    fn launch(&self, worker_id: WorkerId) {
        let spawn_result = self.driver.spawn_worker(
            &self.runtime_image,
            &self.env_dir,
            &self.deploy_dir,
            &self.socket_path,
            worker_id.0,
            self.log_to_dir.as_deref(),
        );
        let slot = Arc::clone(&self.controller);

        tokio::spawn(async move {
            let controller = slot.get().await;
            match spawn_result {
                Ok(mut child) => match child.wait().await {
                    Ok(status) if status.success() => controller.worker_exited(),
                    Ok(status) => {
                        controller.record_error(WorkerError {
                            error: format!("worker {worker_id} container exited with {status}"),
                            traceback: String::new(),
                            work_id: None,
                        });
                        controller.worker_exited();
                    }
                    Err(e) => {
                        controller.record_error(WorkerError {
                            error: format!("worker {worker_id} wait failed: {e}"),
                            traceback: String::new(),
                            work_id: None,
                        });
                        controller.worker_exited();
                    }
                },
                Err(e) => {
                    controller.record_error(WorkerError {
                        error: format!("worker {worker_id} failed to start: {e}"),
                        traceback: String::new(),
                        work_id: None,
                    });
                    controller.worker_exited();
                }
            }
        });
    }
}
