#![allow(dead_code)]

use taskmesh::graph::{Status, Task, TaskGraph};

/// Builder for `Task` to simplify test setup.
pub struct TaskBuilder {
    task: Task,
}

impl TaskBuilder {
    pub fn new(id: &str) -> Self {
        Self {
            task: Task::new(id),
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.task.name = name.to_string();
        self
    }

    pub fn description(mut self, description: &str) -> Self {
        self.task.description = description.to_string();
        self
    }

    pub fn after(mut self, dep: &str) -> Self {
        self.task.depends_on.push(dep.to_string());
        self
    }

    pub fn user(mut self, user: &str) -> Self {
        self.task.users.push(user.to_string());
        self
    }

    pub fn tag(mut self, tag: &str) -> Self {
        self.task.tags.push(tag.to_string());
        self
    }

    pub fn status(mut self, status: Status) -> Self {
        self.task.status = status;
        self
    }

    pub fn build(self) -> Task {
        self.task
            .validated()
            .expect("Failed to build valid task from builder")
    }
}

/// Builder for a whole `TaskGraph`.
pub struct GraphBuilder {
    name: String,
    tasks: Vec<Task>,
}

impl GraphBuilder {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            tasks: Vec::new(),
        }
    }

    pub fn with_task(mut self, task: Task) -> Self {
        self.tasks.push(task);
        self
    }

    pub fn build(self) -> TaskGraph {
        TaskGraph::from_tasks(TaskGraph::generate_id(), self.name, self.tasks)
            .expect("Failed to build valid graph from builder")
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new("test-graph")
    }
}
