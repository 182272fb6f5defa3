//! Task hierarchy reconstruction
//!
//! Rebuilds the parent/child tree from the flat task list the API returns.
//! A task whose parent is missing from the list (for example because a
//! server-side filter excluded it) is promoted to a root. Children lists are
//! consumed as the tree is built, so tasks caught in a parent cycle are never
//! reached from a root and simply do not appear.

use std::collections::{HashMap, HashSet};

use super::task::Task;

/// A task and its ordered subtasks
#[derive(Debug)]
pub struct TaskNode<'a> {
    pub task: &'a Task,
    pub children: Vec<TaskNode<'a>>,
}

/// A task emitted by a depth-first walk, with its nesting depth
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Entry<'a> {
    pub depth: usize,
    pub task: &'a Task,
}

/// Ordered forest of tasks
#[derive(Debug, Default)]
pub struct TaskForest<'a> {
    roots: Vec<TaskNode<'a>>,
}

impl<'a> TaskForest<'a> {
    /// Builds the forest from a flat task list
    pub fn build(tasks: &'a [Task]) -> Self {
        let ids: HashSet<&str> = tasks.iter().map(|t| t.id.as_str()).collect();

        let mut roots: Vec<&'a Task> = Vec::new();
        let mut children: HashMap<&'a str, Vec<&'a Task>> = HashMap::new();

        for task in tasks {
            match task.parent() {
                Some(parent) if ids.contains(parent) => {
                    children.entry(parent).or_default().push(task);
                }
                _ => roots.push(task),
            }
        }

        // sort_by_key is stable: equal orders keep their input position
        roots.sort_by_key(|t| t.order);
        for siblings in children.values_mut() {
            siblings.sort_by_key(|t| t.order);
        }

        let roots = roots
            .into_iter()
            .map(|task| Self::node(task, &mut children))
            .collect();

        Self { roots }
    }

    fn node(task: &'a Task, children: &mut HashMap<&'a str, Vec<&'a Task>>) -> TaskNode<'a> {
        let kids = children.remove(task.id.as_str()).unwrap_or_default();

        TaskNode {
            task,
            children: kids
                .into_iter()
                .map(|child| Self::node(child, children))
                .collect(),
        }
    }

    /// Returns the root nodes in display order
    pub fn roots(&self) -> &[TaskNode<'a>] {
        &self.roots
    }

    /// Returns true if the forest has no tasks
    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Returns the depth-first, pre-order walk of the forest
    pub fn flatten(&self) -> Vec<Entry<'a>> {
        let mut entries = Vec::new();
        for root in &self.roots {
            Self::walk(root, 0, &mut entries);
        }
        entries
    }

    fn walk(node: &TaskNode<'a>, depth: usize, entries: &mut Vec<Entry<'a>>) {
        entries.push(Entry {
            depth,
            task: node.task,
        });
        for child in &node.children {
            Self::walk(child, depth + 1, entries);
        }
    }
}
