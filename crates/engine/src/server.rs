// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Stream server and request handler: accepts connections on the
//! per-execution Unix socket, and for each one runs a short-lived
//! handler loop that reads one coordination message at a time and
//! dispatches it to the [`Controller`](crate::Controller). Connection
//! termination on EOF or a malformed message is non-fatal to the server —
//! only the offending connection closes.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::BufReader;
use tokio::net::{UnixListener, UnixStream};
use tracing::{debug, warn};

use dtl_core::WorkerError;
use dtl_wire::{read_message, write_message, Message};

use crate::controller::Controller;
use crate::error::EngineError;
use crate::socket::unlink_stale;

pub struct StreamServer {
    listener: UnixListener,
    socket_path: PathBuf,
    controller: Arc<Controller>,
}

impl StreamServer {
    /// Binds the listener at `socket_path`, unlinking any stale file left
    /// behind by a previous run first.
    pub fn bind(socket_path: PathBuf, controller: Arc<Controller>) -> Result<Self, EngineError> {
        unlink_stale(&socket_path)?;
        let listener = UnixListener::bind(&socket_path)?;
        Ok(Self {
            listener,
            socket_path,
            controller,
        })
    }

    pub fn socket_path(&self) -> &Path {
        &self.socket_path
    }

    /// Accepts connections until `controller` signals completion, then
    /// returns. The listener itself is dropped (and the OS reclaims the
    /// socket file, or the temp-directory convention makes any leak
    /// non-critical).
    pub async fn run(self) {
        let controller = self.controller;
        loop {
            tokio::select! {
                accepted = self.listener.accept() => {
                    match accepted {
                        Ok((stream, _addr)) => {
                            let controller = Arc::clone(&controller);
                            tokio::spawn(async move {
                                if let Err(e) = handle_connection(stream, &controller).await {
                                    debug!(error = %e, "worker connection ended with an error");
                                }
                            });
                        }
                        Err(e) => warn!(error = %e, "accept failed"),
                    }
                }
                _ = wait_finished(&controller) => {
                    break;
                }
            }
        }
    }
}

async fn wait_finished(controller: &Controller) {
    // `wait_for_completion` also surfaces fatal errors; the accept loop
    // only cares that the execution is over, so errors are discarded here
    // and re-surfaced to the orchestrator through its own call to the same
    // method after this task observes completion.
    let _ = controller.wait_for_completion().await;
}

/// Handles one worker connection end-to-end: fetches execution props once,
/// then loops fetch-work / accept-notifications until `NO_MORE_WORK_ITEMS`
/// is sent or the peer disconnects.
async fn handle_connection(
    stream: UnixStream,
    controller: &Controller,
) -> Result<(), EngineError> {
    let (read_half, mut write_half) = stream.into_split();
    let mut reader = BufReader::new(read_half);

    loop {
        let message = match read_message(&mut reader).await {
            Ok(Some(message)) => message,
            Ok(None) => return Ok(()),
            Err(e) => {
                // Malformed message: report it as a worker error (work_id
                // unknown) and close this connection; siblings continue.
                controller.record_error(WorkerError {
                    error: format!("protocol error: {e}"),
                    traceback: String::new(),
                    work_id: None,
                });
                return Err(EngineError::Protocol(e));
            }
        };

        match message {
            Message::GetStepExecutionProps { worker_id: _ } => {
                let props = controller.execution_props();
                write_message(&mut write_half, &Message::ExecutionProps(props)).await?;
            }
            Message::GetWorkItem { worker_id } => match controller.get_work_item(worker_id) {
                Some(item) => {
                    write_message(&mut write_half, &Message::WorkItem(item)).await?;
                }
                None => {
                    write_message(&mut write_half, &Message::NoMoreWorkItems).await?;
                    return Ok(());
                }
            },
            Message::WorkItem(item) => {
                if let Err(e) = controller.enqueue(item) {
                    controller.fail_fatal(e);
                    return Ok(());
                }
            }
            Message::PublishResult(result) => {
                controller.publish_result(result);
            }
            Message::WorkerError(error) => {
                controller.record_error(error);
            }
            Message::MarkAsIdle { worker_id } => {
                controller.mark_idle(worker_id);
            }
            Message::ExecutionProps(_) | Message::NoMoreWorkItems => {
                // Host-only messages received from a worker are a protocol
                // violation; close the connection without crashing siblings.
                controller.record_error(WorkerError {
                    error: "worker sent a host-only message".to_string(),
                    traceback: String::new(),
                    work_id: None,
                });
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
#[path = "server_tests.rs"]
mod tests;
