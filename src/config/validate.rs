// src/config/validate.rs

use petgraph::algo::toposort;
use petgraph::graphmap::DiGraphMap;

use crate::config::model::{ConfigFile, RawConfigFile};
use crate::errors::{Result, TaskmeshError};

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = crate::errors::TaskmeshError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        Ok(ConfigFile::new_unchecked(raw.graph, raw.snapshot, raw.task))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_snapshot_section(cfg)?;
    validate_task_seeds(cfg)?;
    validate_dag(cfg)?;
    Ok(())
}

fn validate_snapshot_section(cfg: &RawConfigFile) -> Result<()> {
    if let Some(0) = cfg.snapshot.interval_secs {
        return Err(TaskmeshError::ConfigError(
            "[snapshot].interval_secs must be >= 1 (got 0)".to_string(),
        ));
    }
    Ok(())
}

fn validate_task_seeds(cfg: &RawConfigFile) -> Result<()> {
    for (key, seed) in cfg.task.iter() {
        for dep in seed.after.iter() {
            if !cfg.task.contains_key(dep) {
                return Err(TaskmeshError::ConfigError(format!(
                    "task '{}' has unknown dependency '{}' in `after`",
                    key, dep
                )));
            }
            if dep == key {
                return Err(TaskmeshError::ConfigError(format!(
                    "task '{}' cannot depend on itself in `after`",
                    key
                )));
            }
        }
        if !seed.status.is_manual() {
            return Err(TaskmeshError::ConfigError(format!(
                "task '{}' seeds status \"blocked\"; that state is derived and cannot be set",
                key
            )));
        }
    }
    Ok(())
}

fn validate_dag(cfg: &RawConfigFile) -> Result<()> {
    // Build a petgraph graph from the seed tasks and their dependencies.
    //
    // Edge direction: dep -> task
    // For:
    //   [task.B]
    //   after = ["A"]
    // we add edge A -> B.
    let mut graph: DiGraphMap<&str, ()> = DiGraphMap::new();

    for key in cfg.task.keys() {
        graph.add_node(key.as_str());
    }

    for (key, seed) in cfg.task.iter() {
        for dep in seed.after.iter() {
            graph.add_edge(dep.as_str(), key.as_str(), ());
        }
    }

    // A topological sort will fail if there is a cycle.
    match toposort(&graph, None) {
        Ok(_order) => Ok(()),
        Err(cycle) => {
            let node = cycle.node_id();
            Err(TaskmeshError::CycleDetected(format!(
                "cycle detected in seed tasks involving task '{}'",
                node
            )))
        }
    }
}
