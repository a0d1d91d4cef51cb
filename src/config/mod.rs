// src/config/mod.rs

//! TOML configuration: seed tasks, graph label and snapshot settings.
//!
//! Configuration follows a raw-then-validated split: [`model`] maps the
//! file, [`validate`] turns a `RawConfigFile` into a `ConfigFile`, and
//! [`loader`] reads files from disk.

pub mod loader;
pub mod model;
pub mod validate;

pub use loader::{default_config_path, load_and_validate, load_from_path};
pub use model::{ConfigFile, GraphSection, RawConfigFile, SnapshotSection, TaskSeed};

use crate::errors::Result;
use crate::graph::{Task, TaskGraph};

/// Build a [`TaskGraph`] from a validated configuration.
///
/// The `[task.<key>]` keys become task ids; listing order is the sorted key
/// order the config map carries.
pub fn build_graph(cfg: &ConfigFile) -> Result<TaskGraph> {
    let tasks: Vec<Task> = cfg
        .task
        .iter()
        .map(|(key, seed)| Task {
            id: key.clone(),
            name: seed.name.clone().unwrap_or_else(|| key.clone()),
            description: seed.description.clone(),
            depends_on: seed.after.clone(),
            users: seed.users.clone(),
            tags: seed.tags.clone(),
            status: seed.status,
            manual_status: seed.status,
        })
        .collect();

    TaskGraph::from_tasks(TaskGraph::generate_id(), cfg.graph.name.clone(), tasks)
}
