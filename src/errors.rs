// src/errors.rs

//! Crate-wide error type and result alias.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TaskmeshError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Task not found: {0}")]
    NotFound(String),

    #[error("Task id already present in graph: {0}")]
    DuplicateId(String),

    #[error("Task '{task}' references unknown dependency '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("Unknown task: {0}")]
    UnknownTask(String),

    #[error("Task cannot depend on itself: {0}")]
    SelfDependency(String),

    #[error("Cycle detected in task graph: {0}")]
    CycleDetected(String),

    #[error("Invalid status transition: {0}")]
    InvalidTransition(String),

    #[error("Graph service stopped")]
    ServiceStopped,

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, TaskmeshError>;
