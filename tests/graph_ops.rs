// tests/graph_ops.rs

use taskmesh::errors::TaskmeshError;
use taskmesh::graph::{Status, Task, TaskGraph, TaskPatch};
use taskmesh_test_utils::builders::TaskBuilder;
use taskmesh_test_utils::init_tracing;

#[test]
fn add_task_rejects_duplicate_id() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();

    let result = graph.add_task(TaskBuilder::new("A").build());

    match result {
        Err(TaskmeshError::DuplicateId(id)) => assert_eq!(id, "A"),
        other => panic!("Expected DuplicateId error, got: {:?}", other),
    }
    assert_eq!(graph.len(), 1);
}

#[test]
fn add_task_rejects_forward_reference() {
    init_tracing();
    let mut graph = TaskGraph::new("g");

    let result = graph.add_task(TaskBuilder::new("B").after("A").build());

    match result {
        Err(TaskmeshError::UnknownDependency { task, dependency }) => {
            assert_eq!(task, "B");
            assert_eq!(dependency, "A");
        }
        other => panic!("Expected UnknownDependency error, got: {:?}", other),
    }
    // All-or-nothing: the failing add left nothing behind.
    assert!(graph.is_empty());
}

#[test]
fn add_task_rejects_self_dependency() {
    init_tracing();
    let mut graph = TaskGraph::new("g");

    let mut task = Task::new("A");
    task.depends_on.push("A".to_string());
    let result = graph.add_task(task);

    match result {
        Err(TaskmeshError::SelfDependency(id)) => assert_eq!(id, "A"),
        other => panic!("Expected SelfDependency error, got: {:?}", other),
    }
}

#[test]
fn add_task_collapses_duplicate_dependencies() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();
    graph
        .add_task(TaskBuilder::new("B").after("A").after("A").build())
        .unwrap();

    assert_eq!(graph.get_task("B").unwrap().depends_on, vec!["A"]);
    assert_eq!(graph.dependents_of("A"), ["B"]);
}

#[test]
fn get_task_unknown_id_is_not_found() {
    init_tracing();
    let graph = TaskGraph::new("g");

    match graph.get_task("missing") {
        Err(TaskmeshError::NotFound(id)) => assert_eq!(id, "missing"),
        other => panic!("Expected NotFound error, got: {:?}", other),
    }
}

#[test]
fn all_tasks_lists_in_insertion_order() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    for id in ["c", "a", "b"] {
        graph.add_task(TaskBuilder::new(id).build()).unwrap();
    }

    let ids: Vec<&str> = graph.all_tasks().iter().map(|t| t.id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn edit_task_unknown_id_is_not_found() {
    init_tracing();
    let mut graph = TaskGraph::new("g");

    let result = graph.edit_task("missing", TaskPatch::status(Status::Done));
    assert!(matches!(result, Err(TaskmeshError::NotFound(_))));
}

#[test]
fn edit_task_rejects_manual_blocked() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph
        .add_task(TaskBuilder::new("A").name("first").build())
        .unwrap();

    let patch = TaskPatch {
        name: Some("renamed".to_string()),
        status: Some(Status::Blocked),
        ..TaskPatch::default()
    };
    let result = graph.edit_task("A", patch);

    assert!(matches!(result, Err(TaskmeshError::InvalidTransition(_))));
    // The rejected patch applied none of its fields.
    let a = graph.get_task("A").unwrap();
    assert_eq!(a.name, "first");
    assert_eq!(a.status, Status::Todo);
}

#[test]
fn edit_task_applies_partial_fields() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph
        .add_task(
            TaskBuilder::new("A")
                .name("first")
                .description("original")
                .tag("x")
                .build(),
        )
        .unwrap();

    let patch = TaskPatch {
        description: Some("updated".to_string()),
        users: Some(vec!["alice".to_string()]),
        ..TaskPatch::default()
    };
    graph.edit_task("A", patch).unwrap();

    let a = graph.get_task("A").unwrap();
    assert_eq!(a.name, "first");
    assert_eq!(a.description, "updated");
    assert_eq!(a.users, vec!["alice"]);
    assert_eq!(a.tags, vec!["x"]);
}

#[test]
fn delete_task_unknown_id_is_not_found() {
    init_tracing();
    let mut graph = TaskGraph::new("g");

    let result = graph.delete_task("missing");
    assert!(matches!(result, Err(TaskmeshError::NotFound(_))));
}

#[test]
fn connect_rejects_unknown_tasks() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();

    match graph.connect("A", "missing") {
        Err(TaskmeshError::UnknownTask(id)) => assert_eq!(id, "missing"),
        other => panic!("Expected UnknownTask error, got: {:?}", other),
    }
    match graph.connect("missing", "A") {
        Err(TaskmeshError::UnknownTask(id)) => assert_eq!(id, "missing"),
        other => panic!("Expected UnknownTask error, got: {:?}", other),
    }
}

#[test]
fn connect_rejects_self_dependency() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();

    let result = graph.connect("A", "A");
    assert!(matches!(result, Err(TaskmeshError::SelfDependency(_))));
    assert!(graph.get_task("A").unwrap().depends_on.is_empty());
}

#[test]
fn connect_rejects_cycle_and_leaves_graph_unchanged() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();
    graph
        .add_task(TaskBuilder::new("B").after("A").build())
        .unwrap();
    graph
        .add_task(TaskBuilder::new("C").after("B").build())
        .unwrap();

    // A already depends transitively on nothing, but C depends on A
    // through B; making A depend on C closes the loop.
    let result = graph.connect("C", "A");

    match result {
        Err(TaskmeshError::CycleDetected(msg)) => {
            assert!(msg.contains("cycle"));
        }
        other => panic!("Expected CycleDetected error, got: {:?}", other),
    }
    assert!(graph.get_task("A").unwrap().depends_on.is_empty());
    assert!(graph.dependents_of("C").is_empty());
}

#[test]
fn connect_is_idempotent() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();
    graph.add_task(TaskBuilder::new("B").build()).unwrap();

    graph.connect("A", "B").unwrap();
    graph.connect("A", "B").unwrap();

    assert_eq!(graph.get_task("B").unwrap().depends_on, vec!["A"]);
    assert_eq!(graph.dependents_of("A"), ["B"]);
}

#[test]
fn disconnect_missing_edge_is_noop() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();
    graph
        .add_task(TaskBuilder::new("B").after("A").build())
        .unwrap();

    // No edge B -> A exists; the call succeeds and corrupts nothing.
    graph.disconnect("B", "A").unwrap();

    assert_eq!(graph.get_task("B").unwrap().depends_on, vec!["A"]);
}

#[test]
fn disconnect_rejects_unknown_tasks() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();

    let result = graph.disconnect("A", "missing");
    assert!(matches!(result, Err(TaskmeshError::UnknownTask(_))));
}

#[test]
fn delete_task_in_the_middle_of_a_chain() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph.add_task(TaskBuilder::new("A").build()).unwrap();
    graph
        .add_task(TaskBuilder::new("B").after("A").build())
        .unwrap();
    graph
        .add_task(TaskBuilder::new("C").after("B").build())
        .unwrap();

    graph.delete_task("B").unwrap();

    assert_eq!(graph.len(), 2);
    assert!(matches!(
        graph.get_task("B"),
        Err(TaskmeshError::NotFound(_))
    ));
    assert!(graph.get_task("C").unwrap().depends_on.is_empty());
    assert!(graph.dependents_of("A").is_empty());
    assert!(graph.edges().is_empty());
}

#[test]
fn from_tasks_accepts_any_order_and_rejects_cycles() {
    init_tracing();
    // Dependent listed before its dependency: fine for the bulk builder.
    let tasks = vec![
        TaskBuilder::new("B").after("A").build(),
        TaskBuilder::new("A").status(Status::Done).build(),
    ];
    let graph = TaskGraph::from_tasks("gid", "bulk", tasks).unwrap();
    assert_eq!(graph.get_task("B").unwrap().status, Status::Todo);

    let cyclic = vec![
        TaskBuilder::new("A").after("B").build(),
        TaskBuilder::new("B").after("A").build(),
    ];
    let result = TaskGraph::from_tasks("gid", "cyclic", cyclic);
    assert!(matches!(result, Err(TaskmeshError::CycleDetected(_))));
}

#[test]
fn generated_ids_are_opaque_and_unique() {
    init_tracing();
    let a = Task::generate_id();
    let b = Task::generate_id();
    assert_eq!(a.len(), 32);
    assert_ne!(a, b);
}
