// src/graph/adjacency.rs

use std::collections::HashMap;

use crate::graph::task::TaskId;

/// Internal node structure: stores immediate deps and dependents.
#[derive(Debug, Clone, Default)]
struct AdjacencyNode {
    /// Direct dependencies: tasks that must be done before this one.
    deps: Vec<TaskId>,
    /// Direct dependents: tasks that depend on this one.
    dependents: Vec<TaskId>,
}

/// Mirrored adjacency index for the dependency relation, keyed by task id.
///
/// Edges are stored in both directions so that walking dependents and
/// removing a node are index bookkeeping rather than graph traversal. The
/// owning [`TaskGraph`](crate::graph::TaskGraph) keeps this in lockstep with
/// each task's `depends_on` list.
#[derive(Debug, Clone, Default)]
pub struct DependencyIndex {
    nodes: HashMap<TaskId, AdjacencyNode>,
}

impl DependencyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains_node(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    /// Insert a node with no edges. Inserting an existing node is a no-op.
    pub fn add_node(&mut self, id: &str) {
        self.nodes.entry(id.to_string()).or_default();
    }

    /// Remove a node and every edge touching it.
    pub fn remove_node(&mut self, id: &str) {
        let Some(node) = self.nodes.remove(id) else {
            return;
        };
        for dep in node.deps {
            if let Some(dep_node) = self.nodes.get_mut(&dep) {
                dep_node.dependents.retain(|d| d != id);
            }
        }
        for dependent in node.dependents {
            if let Some(dep_node) = self.nodes.get_mut(&dependent) {
                dep_node.deps.retain(|d| d != id);
            }
        }
    }

    /// Add a directed edge `dependency -> dependent`.
    ///
    /// Both nodes must already exist; duplicate edges are the caller's
    /// responsibility to filter via [`contains_edge`](Self::contains_edge).
    pub fn add_edge(&mut self, dependency: &str, dependent: &str) {
        if let Some(node) = self.nodes.get_mut(dependent) {
            node.deps.push(dependency.to_string());
        }
        if let Some(node) = self.nodes.get_mut(dependency) {
            node.dependents.push(dependent.to_string());
        }
    }

    /// Remove the edge `dependency -> dependent` if present.
    ///
    /// Returns `true` if an edge was removed.
    pub fn remove_edge(&mut self, dependency: &str, dependent: &str) -> bool {
        let mut removed = false;
        if let Some(node) = self.nodes.get_mut(dependent) {
            let before = node.deps.len();
            node.deps.retain(|d| d != dependency);
            removed = node.deps.len() != before;
        }
        if let Some(node) = self.nodes.get_mut(dependency) {
            node.dependents.retain(|d| d != dependent);
        }
        removed
    }

    pub fn contains_edge(&self, dependency: &str, dependent: &str) -> bool {
        self.nodes
            .get(dependent)
            .map(|n| n.deps.iter().any(|d| d == dependency))
            .unwrap_or(false)
    }

    /// Immediate dependencies of a task.
    pub fn dependencies_of(&self, id: &str) -> &[TaskId] {
        self.nodes.get(id).map(|n| n.deps.as_slice()).unwrap_or(&[])
    }

    /// Immediate dependents of a task.
    pub fn dependents_of(&self, id: &str) -> &[TaskId] {
        self.nodes
            .get(id)
            .map(|n| n.dependents.as_slice())
            .unwrap_or(&[])
    }

    /// All node ids (arbitrary order).
    pub fn node_ids(&self) -> impl Iterator<Item = &str> {
        self.nodes.keys().map(|s| s.as_str())
    }

    /// All edges as `(dependency, dependent)` pairs (arbitrary order).
    pub fn edges(&self) -> impl Iterator<Item = (&str, &str)> {
        self.nodes.iter().flat_map(|(dependent, node)| {
            node.deps
                .iter()
                .map(move |dep| (dep.as_str(), dependent.as_str()))
        })
    }
}
