// src/graph/store.rs

//! The mutable task graph: arena of tasks plus adjacency index.

use std::collections::HashMap;

use tracing::debug;
use uuid::Uuid;

use crate::errors::{Result, TaskmeshError};
use crate::graph::adjacency::DependencyIndex;
use crate::graph::propagate;
use crate::graph::task::{Task, TaskId, TaskPatch};

/// Directed graph of tasks and their dependency edges.
///
/// Owns the tasks (arena keyed by id, insertion order retained) and the
/// mirrored adjacency index. All mutation goes through the operations below;
/// each one validates first, applies its changes, then runs propagation, so
/// the derived `BLOCKED` state is consistent graph-wide whenever a call
/// returns. A failing operation applies none of its changes.
#[derive(Debug, Clone)]
pub struct TaskGraph {
    id: String,
    name: String,
    tasks: HashMap<TaskId, Task>,
    /// Task ids in insertion order, for deterministic listing.
    order: Vec<TaskId>,
    index: DependencyIndex,
}

impl TaskGraph {
    /// Create an empty graph with a generated instance id.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_id(Self::generate_id(), name)
    }

    /// Generate a fresh opaque graph id (UUIDv4, hex without hyphens).
    pub fn generate_id() -> String {
        Uuid::new_v4().simple().to_string()
    }

    /// Create an empty graph with an explicit instance id (used when
    /// restoring from a snapshot).
    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            tasks: HashMap::new(),
            order: Vec::new(),
            index: DependencyIndex::new(),
        }
    }

    /// Bulk constructor: build a graph from a full task list in one go.
    ///
    /// Unlike [`add_task`](Self::add_task), dependency references are
    /// checked against the *whole* list, so tasks may appear in any order.
    /// The given order is kept as the listing order. Used by the config
    /// loader and snapshot restore.
    pub fn from_tasks(
        id: impl Into<String>,
        name: impl Into<String>,
        tasks: Vec<Task>,
    ) -> Result<Self> {
        let mut graph = Self::with_id(id, name);

        let tasks = tasks
            .into_iter()
            .map(Task::validated)
            .collect::<Result<Vec<_>>>()?;

        // First pass: create nodes.
        for task in &tasks {
            if graph.tasks.contains_key(&task.id) {
                return Err(TaskmeshError::DuplicateId(task.id.clone()));
            }
            graph.index.add_node(&task.id);
            graph.order.push(task.id.clone());
            graph.tasks.insert(task.id.clone(), task.clone());
        }

        // Second pass: populate edges from each task's dependency list.
        for task in &tasks {
            for dep in &task.depends_on {
                if !graph.tasks.contains_key(dep) {
                    return Err(TaskmeshError::UnknownDependency {
                        task: task.id.clone(),
                        dependency: dep.clone(),
                    });
                }
                graph.index.add_edge(dep, &task.id);
            }
        }

        // Propagation doubles as the acyclicity check here: its topological
        // sort fails on a cyclic task list.
        graph.propagate()?;
        Ok(graph)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Insert a task into the graph.
    ///
    /// Fails with `DuplicateId` if the id already exists and with
    /// `UnknownDependency` if any dependency is not already present:
    /// dependencies must be added before dependents.
    pub fn add_task(&mut self, task: Task) -> Result<()> {
        let task = task.validated()?;

        if self.tasks.contains_key(&task.id) {
            return Err(TaskmeshError::DuplicateId(task.id.clone()));
        }
        for dep in &task.depends_on {
            if !self.tasks.contains_key(dep) {
                return Err(TaskmeshError::UnknownDependency {
                    task: task.id.clone(),
                    dependency: dep.clone(),
                });
            }
        }

        // A new node cannot close a cycle: all its edges point from
        // pre-existing tasks to itself.
        self.index.add_node(&task.id);
        for dep in &task.depends_on {
            self.index.add_edge(dep, &task.id);
        }
        self.order.push(task.id.clone());
        debug!(task = %task.id, deps = task.depends_on.len(), "task added");
        self.tasks.insert(task.id.clone(), task);

        self.propagate()
    }

    /// Look up a task by id.
    pub fn get_task(&self, id: &str) -> Result<&Task> {
        self.tasks
            .get(id)
            .ok_or_else(|| TaskmeshError::NotFound(id.to_string()))
    }

    /// All tasks in insertion order.
    pub fn all_tasks(&self) -> Vec<&Task> {
        self.order
            .iter()
            .filter_map(|id| self.tasks.get(id))
            .collect()
    }

    /// Apply caller-specified field changes to a task, then re-propagate:
    /// changing one task's manual status can unblock or reblock its
    /// dependents.
    pub fn edit_task(&mut self, id: &str, patch: TaskPatch) -> Result<()> {
        let task = self
            .tasks
            .get_mut(id)
            .ok_or_else(|| TaskmeshError::NotFound(id.to_string()))?;
        // `apply_patch` checks the status before writing any field, so a
        // rejected edit leaves the task unchanged.
        task.apply_patch(patch)?;
        debug!(task = %id, "task edited");

        self.propagate()
    }

    /// Remove a task, every edge touching it, and its id from every
    /// remaining task's dependency list. Removing a dependency can unblock
    /// dependents, so propagation runs afterwards.
    pub fn delete_task(&mut self, id: &str) -> Result<()> {
        if !self.tasks.contains_key(id) {
            return Err(TaskmeshError::NotFound(id.to_string()));
        }

        let dependents: Vec<TaskId> = self.index.dependents_of(id).to_vec();
        for dependent in dependents {
            if let Some(task) = self.tasks.get_mut(&dependent) {
                task.depends_on.retain(|d| d != id);
            }
        }

        self.index.remove_node(id);
        self.order.retain(|t| t != id);
        self.tasks.remove(id);
        debug!(task = %id, "task deleted");

        self.propagate()
    }

    /// Add a dependency edge: `dependent` requires `dependency` to be done.
    ///
    /// Adding an already-existing edge is a no-op success. An edge that
    /// would close a cycle is rejected with `CycleDetected` and the graph is
    /// left unchanged.
    pub fn connect(&mut self, dependency: &str, dependent: &str) -> Result<()> {
        if !self.tasks.contains_key(dependency) {
            return Err(TaskmeshError::UnknownTask(dependency.to_string()));
        }
        if !self.tasks.contains_key(dependent) {
            return Err(TaskmeshError::UnknownTask(dependent.to_string()));
        }
        if dependency == dependent {
            return Err(TaskmeshError::SelfDependency(dependency.to_string()));
        }
        if self.index.contains_edge(dependency, dependent) {
            debug!(dependency, dependent, "edge already present; nothing to do");
            return Ok(());
        }
        if propagate::would_cycle(&self.index, dependency, dependent) {
            return Err(TaskmeshError::CycleDetected(format!(
                "making task '{dependent}' depend on '{dependency}' would close a cycle"
            )));
        }

        self.index.add_edge(dependency, dependent);
        if let Some(task) = self.tasks.get_mut(dependent) {
            task.depends_on.push(dependency.to_string());
        }
        debug!(dependency, dependent, "edge connected");

        self.propagate()
    }

    /// Remove a dependency edge if present; removing a nonexistent edge is a
    /// no-op success. Both ids must name known tasks.
    pub fn disconnect(&mut self, dependency: &str, dependent: &str) -> Result<()> {
        if !self.tasks.contains_key(dependency) {
            return Err(TaskmeshError::UnknownTask(dependency.to_string()));
        }
        if !self.tasks.contains_key(dependent) {
            return Err(TaskmeshError::UnknownTask(dependent.to_string()));
        }

        if !self.index.remove_edge(dependency, dependent) {
            debug!(dependency, dependent, "edge not present; nothing to do");
            return Ok(());
        }
        if let Some(task) = self.tasks.get_mut(dependent) {
            task.depends_on.retain(|d| d != dependency);
        }
        debug!(dependency, dependent, "edge disconnected");

        self.propagate()
    }

    /// Immediate dependencies of a task (read-only, for collaborators).
    pub fn dependencies_of(&self, id: &str) -> &[TaskId] {
        self.index.dependencies_of(id)
    }

    /// Immediate dependents of a task (read-only, for collaborators).
    pub fn dependents_of(&self, id: &str) -> &[TaskId] {
        self.index.dependents_of(id)
    }

    /// All dependency edges as `(dependency, dependent)` pairs.
    pub fn edges(&self) -> Vec<(TaskId, TaskId)> {
        self.index
            .edges()
            .map(|(dep, dependent)| (dep.to_string(), dependent.to_string()))
            .collect()
    }

    fn propagate(&mut self) -> Result<()> {
        propagate::propagate(&mut self.tasks, &self.index)
    }
}
