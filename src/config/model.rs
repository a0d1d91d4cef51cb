// src/config/model.rs

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::graph::Status;

/// Top-level configuration as read from a TOML file, before validation.
///
/// ```toml
/// [graph]
/// name = "release-train"
///
/// [snapshot]
/// path = ".taskmesh/snapshot.json"
/// interval_secs = 30
///
/// [task.research]
/// name = "Research the problem"
/// status = "done"
///
/// [task.design]
/// after = ["research"]
/// tags = ["api"]
/// ```
///
/// All sections are optional and have reasonable defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawConfigFile {
    /// Graph label from `[graph]`.
    #[serde(default)]
    pub graph: GraphSection,

    /// Backup settings from `[snapshot]`.
    #[serde(default)]
    pub snapshot: SnapshotSection,

    /// Seed tasks from `[task.<key>]`.
    ///
    /// Keys double as the task *ids* (e.g. `"research"`, `"design"`).
    #[serde(default)]
    pub task: BTreeMap<String, TaskSeed>,
}

/// `[graph]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphSection {
    /// Informational label for the graph instance.
    #[serde(default = "default_graph_name")]
    pub name: String,
}

fn default_graph_name() -> String {
    "taskmesh".to_string()
}

impl Default for GraphSection {
    fn default() -> Self {
        Self {
            name: default_graph_name(),
        }
    }
}

/// `[snapshot]` section.
///
/// Snapshotting is entirely externally driven: nothing here starts a
/// background job by itself. The binary writes one snapshot on exit when
/// `path` is set; embedders can pass `interval_secs` to
/// [`spawn_snapshotter`](crate::snapshot::spawn_snapshotter).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SnapshotSection {
    /// Where to write the JSON snapshot document.
    #[serde(default)]
    pub path: Option<String>,

    /// Polling interval for the periodic snapshotter, in seconds.
    #[serde(default)]
    pub interval_secs: Option<u64>,
}

/// `[task.<key>]` section.
#[derive(Debug, Clone, Deserialize)]
pub struct TaskSeed {
    /// Human-readable name; defaults to the task key.
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub description: String,

    /// Keys of tasks that must be done before this one.
    #[serde(default)]
    pub after: Vec<String>,

    #[serde(default)]
    pub users: Vec<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    /// Initial manual status. `"blocked"` is rejected during validation;
    /// that state is derived, never seeded.
    #[serde(default)]
    pub status: Status,
}

/// Validated configuration.
///
/// Construct via `ConfigFile::try_from(raw)` (see `config::validate`), which
/// checks dependency references, self-dependencies, seeded statuses and
/// acyclicity.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    pub graph: GraphSection,
    pub snapshot: SnapshotSection,
    pub task: BTreeMap<String, TaskSeed>,
}

impl ConfigFile {
    /// Wrap already-validated sections. Only `config::validate` and test
    /// builders should call this.
    pub fn new_unchecked(
        graph: GraphSection,
        snapshot: SnapshotSection,
        task: BTreeMap<String, TaskSeed>,
    ) -> Self {
        Self {
            graph,
            snapshot,
            task,
        }
    }
}
