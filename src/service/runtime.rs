// src/service/runtime.rs

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::graph::TaskGraph;
use crate::snapshot::SnapshotDocument;

use super::{GraphCommand, GraphHandle};

/// Capacity of the command channel between handles and the service loop.
const COMMAND_CHANNEL_CAPACITY: usize = 64;

/// Owns one [`TaskGraph`] and executes commands against it one at a time.
///
/// Every mutation runs to completion, propagation included, before the next
/// command is taken off the channel.
#[derive(Debug)]
pub struct GraphRuntime {
    graph: TaskGraph,
    command_rx: mpsc::Receiver<GraphCommand>,
}

/// Start a service around `graph`.
///
/// Returns the client handle and the join handle of the spawned loop; the
/// loop resolves to the final graph once every handle is dropped or
/// `shutdown` is called.
pub fn spawn(graph: TaskGraph) -> (GraphHandle, JoinHandle<TaskGraph>) {
    let (tx, rx) = mpsc::channel(COMMAND_CHANNEL_CAPACITY);
    let runtime = GraphRuntime {
        graph,
        command_rx: rx,
    };
    let join = tokio::spawn(runtime.run());
    (GraphHandle::new(tx), join)
}

impl GraphRuntime {
    /// Main command loop.
    ///
    /// - Consumes [`GraphCommand`]s from the channel.
    /// - Applies each to the graph and answers over the command's oneshot.
    /// - Exits when the channel closes or a `Shutdown` arrives, returning
    ///   the graph to the caller (e.g. for a final snapshot).
    pub async fn run(mut self) -> TaskGraph {
        info!(graph = %self.graph.id(), "graph service started");

        loop {
            let command = match self.command_rx.recv().await {
                Some(c) => c,
                None => {
                    info!("command channel closed; graph service exiting");
                    break;
                }
            };

            debug!(?command, "graph service received command");

            if !self.execute(command) {
                info!("shutdown requested; graph service exiting");
                break;
            }
        }

        self.graph
    }

    /// Execute a single command. Returns `false` when the loop should stop.
    fn execute(&mut self, command: GraphCommand) -> bool {
        match command {
            GraphCommand::AddTask { task, reply } => {
                let _ = reply.send(self.graph.add_task(task));
            }
            GraphCommand::GetTask { id, reply } => {
                let _ = reply.send(self.graph.get_task(&id).cloned());
            }
            GraphCommand::ListTasks { reply } => {
                let tasks = self.graph.all_tasks().into_iter().cloned().collect();
                let _ = reply.send(tasks);
            }
            GraphCommand::EditTask { id, patch, reply } => {
                let _ = reply.send(self.graph.edit_task(&id, patch));
            }
            GraphCommand::DeleteTask { id, reply } => {
                let _ = reply.send(self.graph.delete_task(&id));
            }
            GraphCommand::Connect {
                dependency,
                dependent,
                reply,
            } => {
                let _ = reply.send(self.graph.connect(&dependency, &dependent));
            }
            GraphCommand::Disconnect {
                dependency,
                dependent,
                reply,
            } => {
                let _ = reply.send(self.graph.disconnect(&dependency, &dependent));
            }
            GraphCommand::Export { reply } => {
                let _ = reply.send(SnapshotDocument::capture(&self.graph));
            }
            GraphCommand::Shutdown => return false,
        }
        true
    }
}
