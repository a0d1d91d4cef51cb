// tests/snapshot_roundtrip.rs

use taskmesh::errors::TaskmeshError;
use taskmesh::graph::{Status, TaskGraph, TaskPatch};
use taskmesh::snapshot::{read_snapshot, write_snapshot, SnapshotDocument};
use taskmesh_test_utils::builders::TaskBuilder;
use taskmesh_test_utils::init_tracing;

fn sample_graph() -> TaskGraph {
    let mut graph = TaskGraph::with_id("g-1", "sample");
    graph
        .add_task(TaskBuilder::new("A").name("first").status(Status::Done).build())
        .unwrap();
    graph
        .add_task(TaskBuilder::new("B").after("A").user("alice").build())
        .unwrap();
    graph
        .add_task(TaskBuilder::new("C").after("B").tag("late").build())
        .unwrap();
    // B carries a manual state that is currently shadowed by nothing; C is
    // blocked behind B.
    graph
        .edit_task("B", TaskPatch::status(Status::InProgress))
        .unwrap();
    graph
}

#[test]
fn capture_restore_preserves_everything() {
    init_tracing();
    let graph = sample_graph();

    let doc = SnapshotDocument::capture(&graph);
    let restored = doc.restore().unwrap();

    assert_eq!(restored.id(), "g-1");
    assert_eq!(restored.name(), "sample");

    let original_ids: Vec<&str> = graph.all_tasks().iter().map(|t| t.id.as_str()).collect();
    let restored_ids: Vec<&str> = restored.all_tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(original_ids, restored_ids);

    assert_eq!(restored.get_task("A").unwrap().status, Status::Done);
    assert_eq!(restored.get_task("B").unwrap().status, Status::InProgress);
    assert_eq!(restored.get_task("C").unwrap().status, Status::Blocked);
    assert_eq!(restored.get_task("B").unwrap().users, vec!["alice"]);
    assert_eq!(restored.get_task("C").unwrap().depends_on, vec!["B"]);
    assert_eq!(restored.dependents_of("A"), ["B"]);
}

#[test]
fn blocked_task_unblocks_to_its_manual_state_after_restore() {
    init_tracing();
    let graph = sample_graph();

    let doc = SnapshotDocument::capture(&graph);
    let mut restored = doc.restore().unwrap();

    // Finish B: C must come back as its manual TODO, proving the manual
    // state survived the round-trip underneath the derived BLOCKED.
    restored
        .edit_task("B", TaskPatch::status(Status::Done))
        .unwrap();
    assert_eq!(restored.get_task("C").unwrap().status, Status::Todo);
}

#[test]
fn snapshot_file_roundtrip() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snapshot.json");

    let graph = sample_graph();
    write_snapshot(&path, &graph).unwrap();

    let restored = read_snapshot(&path).unwrap();
    assert_eq!(restored.id(), graph.id());
    assert_eq!(restored.len(), graph.len());
    assert_eq!(restored.get_task("C").unwrap().status, Status::Blocked);
}

#[test]
fn write_snapshot_creates_parent_directories() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested/state/snapshot.json");

    write_snapshot(&path, &sample_graph()).unwrap();

    assert!(path.exists());
}

#[test]
fn tampered_document_with_dangling_dependency_is_rejected() {
    init_tracing();
    let json = r#"{
        "graph_id": "g-1",
        "name": "tampered",
        "tasks": [
            { "id": "A", "depends_on": ["ghost"] }
        ]
    }"#;

    let doc: SnapshotDocument = serde_json::from_str(json).unwrap();
    let result = doc.restore();

    assert!(matches!(
        result,
        Err(TaskmeshError::UnknownDependency { .. })
    ));
}

#[test]
fn tampered_document_with_stale_derived_status_is_recomputed() {
    init_tracing();
    // A hand-edited document claims A is BLOCKED even though it has no
    // dependencies. Restore re-runs propagation and fixes it.
    let json = r#"{
        "graph_id": "g-1",
        "name": "tampered",
        "tasks": [
            { "id": "A", "status": "BLOCKED" }
        ]
    }"#;

    let doc: SnapshotDocument = serde_json::from_str(json).unwrap();
    let restored = doc.restore().unwrap();

    assert_eq!(restored.get_task("A").unwrap().status, Status::Todo);
}
