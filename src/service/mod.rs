// src/service/mod.rs

//! Single-writer graph service.
//!
//! The engine itself ([`TaskGraph`](crate::graph::TaskGraph)) is a plain
//! synchronous structure. This module wraps one instance in the
//! serialized-command-queue discipline: a spawned task owns the graph and
//! drains a command channel one command at a time, answering each over a
//! oneshot channel. No caller can observe the graph between a structural
//! change and the completion of propagation, and separate services are
//! fully independent.
//!
//! The pure semantics live in the graph; [`runtime`] is an IO shell around
//! it and [`handle`] is the cloneable client side.

use tokio::sync::oneshot;

use crate::errors::Result;
use crate::graph::{Task, TaskPatch};
use crate::snapshot::SnapshotDocument;

/// Commands flowing into the service from handles.
#[derive(Debug)]
pub enum GraphCommand {
    AddTask {
        task: Task,
        reply: oneshot::Sender<Result<()>>,
    },
    GetTask {
        id: String,
        reply: oneshot::Sender<Result<Task>>,
    },
    ListTasks {
        reply: oneshot::Sender<Vec<Task>>,
    },
    EditTask {
        id: String,
        patch: TaskPatch,
        reply: oneshot::Sender<Result<()>>,
    },
    DeleteTask {
        id: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Connect {
        dependency: String,
        dependent: String,
        reply: oneshot::Sender<Result<()>>,
    },
    Disconnect {
        dependency: String,
        dependent: String,
        reply: oneshot::Sender<Result<()>>,
    },
    /// Capture a snapshot document (used by the backup collaborator).
    Export {
        reply: oneshot::Sender<SnapshotDocument>,
    },
    /// Stop the service loop and hand the graph back.
    Shutdown,
}

pub mod handle;
pub mod runtime;

pub use handle::GraphHandle;
pub use runtime::{spawn, GraphRuntime};
