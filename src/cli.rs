// src/cli.rs

//! CLI argument parsing using `clap`.

use clap::{Parser, ValueEnum};

/// Command-line arguments for `taskmesh`.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "taskmesh",
    version,
    about = "Track tasks and derive blocked state from their dependency graph.",
    long_about = None
)]
pub struct CliArgs {
    /// Path to the config file (TOML).
    ///
    /// Default: `Taskmesh.toml` in the current working directory.
    #[arg(long, value_name = "PATH", default_value = "Taskmesh.toml")]
    pub config: String,

    /// Restore the graph from a JSON snapshot instead of seeding it from
    /// the config file.
    #[arg(long, value_name = "PATH")]
    pub restore: Option<String>,

    /// Write a JSON snapshot to this path before exiting.
    ///
    /// Overrides `[snapshot].path` from the config file.
    #[arg(long, value_name = "PATH")]
    pub snapshot: Option<String>,

    /// Print the graph as a Graphviz DOT document instead of the status
    /// report.
    #[arg(long)]
    pub dot: bool,

    /// Parse + validate, print the status report, but skip the service and
    /// any snapshot writes.
    #[arg(long)]
    pub dry_run: bool,

    /// Logging level (error, warn, info, debug, trace).
    ///
    /// If omitted, `TASKMESH_LOG` or a default level will be used.
    #[arg(long, value_enum, value_name = "LEVEL")]
    pub log_level: Option<LogLevel>,
}

/// Log level as exposed on the CLI.
#[derive(Debug, Copy, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convenience wrapper around `CliArgs::parse()`.
pub fn parse() -> CliArgs {
    CliArgs::parse()
}
