// src/render.rs

//! Graphviz DOT export (the visualization collaborator).
//!
//! Read-only: consumes the task list plus adjacency and emits a `digraph`
//! document, one node per task labeled with name and status, one edge per
//! dependency pair. No feedback into the core.

use std::fmt::Write as _;

use crate::graph::{Status, TaskGraph};

/// Fill color per status.
fn status_fill(status: Status) -> &'static str {
    match status {
        Status::Todo => "#f8f9fa",
        Status::InProgress => "#fff3cd",
        Status::Done => "#d1edff",
        Status::Review => "#f8d7da",
        Status::Blocked => "#f5c6cb",
    }
}

fn escape(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Render the graph as a Graphviz DOT document.
pub fn to_dot(graph: &TaskGraph) -> String {
    let mut out = String::new();

    // Infallible writes: fmt::Write on String cannot fail.
    let _ = writeln!(out, "digraph \"{}\" {{", escape(graph.name()));
    let _ = writeln!(out, "  rankdir=TB;");
    let _ = writeln!(out, "  node [shape=box, style=filled];");

    for task in graph.all_tasks() {
        let label = if task.name.is_empty() {
            task.id.clone()
        } else {
            task.name.clone()
        };
        let _ = writeln!(
            out,
            "  \"{}\" [label=\"{}\\n{}\", fillcolor=\"{}\"];",
            escape(&task.id),
            escape(&label),
            task.status,
            status_fill(task.status),
        );
    }

    // Emit edges in listing order so output is deterministic.
    for task in graph.all_tasks() {
        for dependency in &task.depends_on {
            let _ = writeln!(
                out,
                "  \"{}\" -> \"{}\";",
                escape(dependency),
                escape(&task.id)
            );
        }
    }

    out.push_str("}\n");
    out
}
