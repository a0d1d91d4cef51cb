// src/graph/task.rs

//! Task entity and status model.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{Result, TaskmeshError};

/// Canonical task id type used throughout the crate.
pub type TaskId = String;

/// Status of a task.
///
/// `Blocked` is derived state: it is written only by the propagation pass
/// and is rejected wherever a caller could set it manually. The other four
/// states are caller-controlled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[default]
    #[serde(alias = "todo")]
    Todo,
    #[serde(alias = "in_progress")]
    InProgress,
    #[serde(alias = "done")]
    Done,
    #[serde(alias = "review")]
    Review,
    #[serde(alias = "blocked")]
    Blocked,
}

impl Status {
    /// Whether this status can be set directly by a caller.
    pub fn is_manual(self) -> bool {
        !matches!(self, Status::Blocked)
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Status::Todo => "TODO",
            Status::InProgress => "IN_PROGRESS",
            Status::Done => "DONE",
            Status::Review => "REVIEW",
            Status::Blocked => "BLOCKED",
        };
        f.write_str(s)
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "todo" => Ok(Status::Todo),
            "in_progress" | "in-progress" => Ok(Status::InProgress),
            "done" => Ok(Status::Done),
            "review" => Ok(Status::Review),
            "blocked" => Ok(Status::Blocked),
            other => Err(format!(
                "invalid status: {other} (expected \"todo\", \"in_progress\", \"done\", \"review\" or \"blocked\")"
            )),
        }
    }
}

/// One unit of work in a task graph.
///
/// The dependency list names other task ids; they need not exist at
/// construction time. Referential integrity and acyclicity are enforced by
/// [`TaskGraph`](crate::graph::TaskGraph) when the task is added or edges
/// are connected.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Ids of tasks that must be `DONE` before this one can proceed.
    #[serde(default)]
    pub depends_on: Vec<TaskId>,
    #[serde(default)]
    pub users: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Current status, including the derived `BLOCKED` state.
    #[serde(default)]
    pub status: Status,
    /// Last manual state set by a caller. Propagation restores this exact
    /// state when the task unblocks.
    #[serde(default)]
    pub(crate) manual_status: Status,
}

impl Task {
    /// Create a minimal task in `TODO` with the given id.
    pub fn new(id: impl Into<TaskId>) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            description: String::new(),
            depends_on: Vec::new(),
            users: Vec::new(),
            tags: Vec::new(),
            status: Status::Todo,
            manual_status: Status::Todo,
        }
    }

    /// Generate a fresh opaque task id (UUIDv4, hex without hyphens).
    pub fn generate_id() -> TaskId {
        Uuid::new_v4().simple().to_string()
    }

    /// The last manual (caller-set) state of this task.
    pub fn manual_status(&self) -> Status {
        self.manual_status
    }

    /// Validate and canonicalise the task shape.
    ///
    /// - rejects an empty id
    /// - rejects a dependency on the task's own id
    /// - collapses duplicate dependency ids (first occurrence wins)
    /// - records the manual status: an incoming `BLOCKED` status is treated
    ///   as derived and the stored manual state is kept (defaulting to
    ///   `TODO`), so propagation remains the only writer of `BLOCKED`
    pub fn validated(mut self) -> Result<Self> {
        if self.id.is_empty() {
            return Err(TaskmeshError::ConfigError(
                "task id must not be empty".to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for dep in &self.depends_on {
            if *dep == self.id {
                return Err(TaskmeshError::SelfDependency(dep.clone()));
            }
        }
        self.depends_on.retain(|dep| seen.insert(dep.clone()));

        if self.status.is_manual() {
            self.manual_status = self.status;
        } else if !self.manual_status.is_manual() {
            self.manual_status = Status::Todo;
        }

        Ok(self)
    }

    /// Apply a partial edit. A patch carrying `BLOCKED` is rejected; that
    /// state is owned by the propagation pass.
    pub(crate) fn apply_patch(&mut self, patch: TaskPatch) -> Result<()> {
        if let Some(status) = patch.status {
            if !status.is_manual() {
                return Err(TaskmeshError::InvalidTransition(format!(
                    "status of task '{}' cannot be set to BLOCKED manually",
                    self.id
                )));
            }
            self.status = status;
            self.manual_status = status;
        }
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(users) = patch.users {
            self.users = users;
        }
        if let Some(tags) = patch.tags {
            self.tags = tags;
        }
        Ok(())
    }
}

/// Caller-specified field changes for
/// [`TaskGraph::edit_task`](crate::graph::TaskGraph::edit_task).
///
/// `None` fields are left untouched. Dependency edges are not editable here;
/// `connect` / `disconnect` own edge mutation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub users: Option<Vec<String>>,
    pub tags: Option<Vec<String>>,
    pub status: Option<Status>,
}

impl TaskPatch {
    /// Patch that only changes the manual status.
    pub fn status(status: Status) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }
}
