// src/snapshot.rs

//! JSON snapshotting of a task graph (the backup/recovery collaborator).
//!
//! A snapshot is a graph-shaped JSON document: graph id, label, and the
//! tasks in listing order (each task's `depends_on` list carries the edge
//! set). The core never depends on this module and never blocks on it;
//! snapshots are taken by explicit calls, or by the periodic
//! [`spawn_snapshotter`] task that *polls* the graph service on a
//! caller-chosen interval.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::errors::Result;
use crate::graph::{Task, TaskGraph};
use crate::service::GraphHandle;

/// Serializable capture of one task graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotDocument {
    pub graph_id: String,
    pub name: String,
    /// Tasks in listing order; `depends_on` lists carry the edges.
    pub tasks: Vec<Task>,
}

impl SnapshotDocument {
    /// Capture the current state of a graph.
    pub fn capture(graph: &TaskGraph) -> Self {
        Self {
            graph_id: graph.id().to_string(),
            name: graph.name().to_string(),
            tasks: graph.all_tasks().into_iter().cloned().collect(),
        }
    }

    /// Rebuild a graph from this document.
    ///
    /// The task list is re-validated and propagation re-run, so a
    /// hand-edited document cannot smuggle in dangling references, cycles or
    /// a stale derived status.
    pub fn restore(&self) -> Result<TaskGraph> {
        TaskGraph::from_tasks(self.graph_id.clone(), self.name.clone(), self.tasks.clone())
    }
}

/// Serialize a graph to a JSON file.
pub fn write_snapshot(path: impl AsRef<Path>, graph: &TaskGraph) -> Result<()> {
    let path = path.as_ref();
    let doc = SnapshotDocument::capture(graph);
    write_document(path, &doc)
}

/// Serialize an already-captured document to a JSON file.
pub fn write_document(path: impl AsRef<Path>, doc: &SnapshotDocument) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(doc)?;
    std::fs::write(path, json)?;
    debug!(path = %path.display(), "snapshot written");
    Ok(())
}

/// Read a snapshot file and rebuild the graph it captures.
pub fn read_snapshot(path: impl AsRef<Path>) -> Result<TaskGraph> {
    let contents = std::fs::read_to_string(path.as_ref())?;
    let doc: SnapshotDocument = serde_json::from_str(&contents)?;
    doc.restore()
}

/// Spawn a background task that polls the graph service every `interval`
/// and writes a snapshot to `path`.
///
/// The task stops on its own once the service is gone. Write failures are
/// logged and do not stop the loop; the core never waits on this task.
pub fn spawn_snapshotter(
    handle: GraphHandle,
    path: PathBuf,
    interval: Duration,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        // The first tick fires immediately; skip it so the loop writes on
        // the interval, not at spawn time.
        ticker.tick().await;

        loop {
            ticker.tick().await;
            let doc = match handle.export().await {
                Ok(doc) => doc,
                Err(_) => {
                    info!("graph service stopped; snapshotter exiting");
                    break;
                }
            };
            if let Err(err) = write_document(&path, &doc) {
                warn!(path = %path.display(), error = %err, "failed to write snapshot");
            }
        }
    })
}
