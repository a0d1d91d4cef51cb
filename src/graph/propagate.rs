// src/graph/propagate.rs

//! Status propagation: recomputes every task's derived `BLOCKED` state from
//! current dependency statuses.
//!
//! The pass runs in topological order (dependencies before dependents), so
//! each task's dependencies have reached their final status for the pass
//! before the task itself is evaluated. That gives single-pass convergence
//! on a DAG: if C depends on B depends on A and A is not done, B becomes
//! `BLOCKED` before C is looked at, and C follows because a blocked B is
//! itself not done. An unordered scan cannot guarantee this and would leave
//! multi-hop blocks stale for a mutation cycle.

use std::collections::HashMap;

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;
use tracing::{debug, warn};

use crate::errors::{Result, TaskmeshError};
use crate::graph::adjacency::DependencyIndex;
use crate::graph::task::{Status, Task, TaskId};

/// Build the petgraph view of the index, edges directed dependency -> dependent.
fn build_digraph(index: &DependencyIndex) -> DiGraphMap<&str, ()> {
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();
    for id in index.node_ids() {
        graph.add_node(id);
    }
    for (dependency, dependent) in index.edges() {
        graph.add_edge(dependency, dependent, ());
    }
    graph
}

/// Topological order of all tasks, dependencies first.
///
/// Fails with `CycleDetected` only if the index is inconsistent; the graph
/// operations reject any edge that would close a cycle before it is stored.
pub(crate) fn topo_order(index: &DependencyIndex) -> Result<Vec<TaskId>> {
    let graph = build_digraph(index);
    match toposort(&graph, None) {
        Ok(order) => Ok(order.into_iter().map(|id| id.to_string()).collect()),
        Err(cycle) => Err(TaskmeshError::CycleDetected(format!(
            "task graph contains a cycle involving task '{}'",
            cycle.node_id()
        ))),
    }
}

/// Whether adding the edge `dependency -> dependent` would close a cycle.
pub(crate) fn would_cycle(index: &DependencyIndex, dependency: &str, dependent: &str) -> bool {
    let mut graph = build_digraph(index);
    graph.add_edge(dependency, dependent, ());
    toposort(&graph, None).is_err()
}

/// Run the propagation pass over all tasks.
///
/// After this returns, a task is `BLOCKED` iff at least one task in its
/// transitive dependency set is not `DONE`; otherwise it carries its last
/// manual state. A task with no dependencies is never `BLOCKED`.
pub(crate) fn propagate(tasks: &mut HashMap<TaskId, Task>, index: &DependencyIndex) -> Result<()> {
    let order = topo_order(index)?;

    for id in order {
        // Earlier entries in the order are already final for this pass.
        let blocked = index.dependencies_of(&id).iter().any(|dep| {
            match tasks.get(dep) {
                Some(task) => task.status != Status::Done,
                None => {
                    // Should not happen with validated mutations, but be defensive.
                    warn!(task = %id, dep = %dep, "dependency missing from task arena");
                    true
                }
            }
        });

        let Some(task) = tasks.get_mut(&id) else {
            warn!(task = %id, "node in adjacency index not present in task arena");
            continue;
        };

        let next = if blocked {
            Status::Blocked
        } else {
            task.manual_status
        };

        if task.status != next {
            debug!(task = %task.id, from = %task.status, to = %next, "propagation changed status");
            task.status = next;
        }
    }

    Ok(())
}
