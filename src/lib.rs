// src/lib.rs

pub mod cli;
pub mod config;
pub mod errors;
pub mod graph;
pub mod logging;
pub mod render;
pub mod service;
pub mod snapshot;

use std::path::PathBuf;

use anyhow::Result;
use tracing::{debug, info};

use crate::cli::CliArgs;
use crate::config::loader::load_and_validate;
use crate::graph::TaskGraph;

/// High-level entry point used by `main.rs`.
///
/// This wires together:
/// - config loading (or snapshot restore)
/// - the single-writer graph service
/// - report / DOT output
/// - an optional snapshot write on exit
pub async fn run(args: CliArgs) -> Result<()> {
    // Build the graph: from a snapshot (recovery) or from config seeds.
    let (graph, snapshot_path) = if let Some(restore) = &args.restore {
        info!(path = %restore, "restoring graph from snapshot");
        let graph = snapshot::read_snapshot(restore)?;
        (graph, args.snapshot.clone())
    } else {
        let config_path = PathBuf::from(&args.config);
        let cfg = load_and_validate(&config_path)?;
        let graph = config::build_graph(&cfg)?;
        let path = args.snapshot.clone().or_else(|| cfg.snapshot.path.clone());
        (graph, path)
    };

    if args.dot {
        print!("{}", render::to_dot(&graph));
        return Ok(());
    }

    if args.dry_run {
        print_report(&graph);
        return Ok(());
    }

    // Run through the single-writer service so the report and the snapshot
    // observe a settled graph.
    let (handle, join) = service::spawn(graph);
    let doc = handle.export().await?;
    handle.shutdown().await;
    let graph = join.await?;

    print_report(&graph);

    if let Some(path) = snapshot_path {
        snapshot::write_document(&path, &doc)?;
        info!(path = %path, "snapshot written on exit");
    }

    Ok(())
}

/// Status report: graph header, then one block per task in listing order.
fn print_report(graph: &TaskGraph) {
    println!("taskmesh graph '{}' ({})", graph.name(), graph.id());
    println!();

    println!("tasks ({}):", graph.len());
    for task in graph.all_tasks() {
        let title = if task.name.is_empty() {
            task.id.as_str()
        } else {
            task.name.as_str()
        };
        println!("  - [{}] {}", task.status, title);
        println!("      id: {}", task.id);
        if !task.description.is_empty() {
            println!("      description: {}", task.description);
        }
        if !task.depends_on.is_empty() {
            println!("      depends_on: {:?}", task.depends_on);
        }
        if !task.users.is_empty() {
            println!("      users: {:?}", task.users);
        }
        if !task.tags.is_empty() {
            println!("      tags: {:?}", task.tags);
        }
    }

    debug!("report complete");
}
