// tests/render_dot.rs

use taskmesh::graph::{Status, TaskGraph};
use taskmesh::render::to_dot;
use taskmesh_test_utils::builders::TaskBuilder;
use taskmesh_test_utils::init_tracing;

#[test]
fn dot_output_contains_nodes_edges_and_status_colors() {
    init_tracing();
    let mut graph = TaskGraph::new("render-me");
    graph
        .add_task(TaskBuilder::new("A").name("first").status(Status::Done).build())
        .unwrap();
    graph
        .add_task(TaskBuilder::new("B").after("A").build())
        .unwrap();

    let dot = to_dot(&graph);

    assert!(dot.starts_with("digraph \"render-me\" {"));
    assert!(dot.contains("\"A\" [label=\"first\\nDONE\""));
    // B has no name, so the id doubles as the label; it is actionable.
    assert!(dot.contains("\"B\" [label=\"B\\nTODO\""));
    assert!(dot.contains("\"A\" -> \"B\";"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn dot_output_escapes_quotes_in_labels() {
    init_tracing();
    let mut graph = TaskGraph::new("g");
    graph
        .add_task(TaskBuilder::new("A").name("say \"hi\"").build())
        .unwrap();

    let dot = to_dot(&graph);

    assert!(dot.contains("say \\\"hi\\\""));
}
