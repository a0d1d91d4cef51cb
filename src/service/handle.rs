// src/service/handle.rs

use tokio::sync::{mpsc, oneshot};

use crate::errors::{Result, TaskmeshError};
use crate::graph::{Task, TaskPatch};
use crate::snapshot::SnapshotDocument;

use super::GraphCommand;

/// Cloneable client side of a graph service.
///
/// Every method sends one command and awaits its reply; a closed channel
/// (the service stopped) surfaces as [`TaskmeshError::ServiceStopped`].
#[derive(Debug, Clone)]
pub struct GraphHandle {
    command_tx: mpsc::Sender<GraphCommand>,
}

impl GraphHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<GraphCommand>) -> Self {
        Self { command_tx }
    }

    async fn request<T>(
        &self,
        command: GraphCommand,
        reply_rx: oneshot::Receiver<T>,
    ) -> Result<T> {
        self.command_tx
            .send(command)
            .await
            .map_err(|_| TaskmeshError::ServiceStopped)?;
        reply_rx.await.map_err(|_| TaskmeshError::ServiceStopped)
    }

    pub async fn add_task(&self, task: Task) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.request(GraphCommand::AddTask { task, reply: tx }, rx)
            .await?
    }

    pub async fn get_task(&self, id: impl Into<String>) -> Result<Task> {
        let (tx, rx) = oneshot::channel();
        self.request(
            GraphCommand::GetTask {
                id: id.into(),
                reply: tx,
            },
            rx,
        )
        .await?
    }

    pub async fn all_tasks(&self) -> Result<Vec<Task>> {
        let (tx, rx) = oneshot::channel();
        self.request(GraphCommand::ListTasks { reply: tx }, rx).await
    }

    pub async fn edit_task(&self, id: impl Into<String>, patch: TaskPatch) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.request(
            GraphCommand::EditTask {
                id: id.into(),
                patch,
                reply: tx,
            },
            rx,
        )
        .await?
    }

    pub async fn delete_task(&self, id: impl Into<String>) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.request(
            GraphCommand::DeleteTask {
                id: id.into(),
                reply: tx,
            },
            rx,
        )
        .await?
    }

    pub async fn connect(
        &self,
        dependency: impl Into<String>,
        dependent: impl Into<String>,
    ) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.request(
            GraphCommand::Connect {
                dependency: dependency.into(),
                dependent: dependent.into(),
                reply: tx,
            },
            rx,
        )
        .await?
    }

    pub async fn disconnect(
        &self,
        dependency: impl Into<String>,
        dependent: impl Into<String>,
    ) -> Result<()> {
        let (tx, rx) = oneshot::channel();
        self.request(
            GraphCommand::Disconnect {
                dependency: dependency.into(),
                dependent: dependent.into(),
                reply: tx,
            },
            rx,
        )
        .await?
    }

    /// Capture a snapshot document of the current graph state.
    pub async fn export(&self) -> Result<SnapshotDocument> {
        let (tx, rx) = oneshot::channel();
        self.request(GraphCommand::Export { reply: tx }, rx).await
    }

    /// Ask the service loop to stop. Best-effort: a service that already
    /// stopped is not an error.
    pub async fn shutdown(&self) {
        let _ = self.command_tx.send(GraphCommand::Shutdown).await;
    }
}
