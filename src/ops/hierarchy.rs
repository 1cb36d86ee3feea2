//! Dependency tree for the radial view.
//!
//! Each task's `deps` lists the tasks drawn beneath it. The input may
//! describe a general graph; [`build`] reduces it to a forest hanging off a
//! synthetic root by keeping only the last parent assignment seen for each
//! task. Nodes are addressed by their index in the input slice and parents
//! are stored as lookups, never as owning links.

use std::collections::HashMap;

use log::debug;

use crate::model::task::Task;

/// Title of the synthetic root node
pub const ROOT_LABEL: &str = "All tasks";

/// Where a task hangs in the tree
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parent {
    /// Directly under the synthetic root
    Root,
    /// Under the task at this index
    Task(usize),
}

/// A forest over a task slice, rooted at a synthetic node.
#[derive(Debug, Clone, PartialEq)]
pub struct Hierarchy {
    label: String,
    roots: Vec<usize>,
    parents: Vec<Parent>,
    children: Vec<Vec<usize>>,
}

/// Build the tree with the default root label.
pub fn build(tasks: &[Task]) -> Hierarchy {
    build_with_label(tasks, ROOT_LABEL)
}

pub fn build_with_label(tasks: &[Task], label: &str) -> Hierarchy {
    // Later duplicates overwrite earlier ones
    let mut index: HashMap<&str, usize> = HashMap::with_capacity(tasks.len());
    for (i, task) in tasks.iter().enumerate() {
        index.insert(task.key.as_str(), i);
    }

    let mut parents: Vec<Option<usize>> = vec![None; tasks.len()];
    for (d, task) in tasks.iter().enumerate() {
        for dep_key in &task.deps {
            let Some(&dep) = index.get(dep_key.as_str()) else {
                debug!("{}: dropping reference to unknown task {}", task.key, dep_key);
                continue;
            };
            if let Some(prev) = parents[dep] {
                if prev != d {
                    debug!("{}: moving {} away from {}", task.key, dep_key, tasks[prev].key);
                }
            }
            parents[dep] = Some(d);
        }
    }

    // Not strict last-write-wins inside a loop: the member with the lowest
    // index loses its parent and hangs off the root.
    for cut in break_cycles(&mut parents) {
        debug!("{}: detached from a dependency loop", tasks[cut].key);
    }

    // Children follow the parent's deps order, limited to surviving
    // assignments, each listed once.
    let mut children: Vec<Vec<usize>> = vec![Vec::new(); tasks.len()];
    for (d, task) in tasks.iter().enumerate() {
        for dep_key in &task.deps {
            if let Some(&dep) = index.get(dep_key.as_str()) {
                if parents[dep] == Some(d) && !children[d].contains(&dep) {
                    children[d].push(dep);
                }
            }
        }
    }

    let roots = (0..tasks.len()).filter(|&i| parents[i].is_none()).collect();

    Hierarchy {
        label: label.to_string(),
        roots,
        parents: parents
            .into_iter()
            .map(|p| p.map_or(Parent::Root, Parent::Task))
            .collect(),
        children,
    }
}

/// Detach one node from every loop in the parent graph and return the
/// detached nodes. Each node has at most one parent, so every loop is found
/// by following parent links, and each node is visited once.
fn break_cycles(parents: &mut [Option<usize>]) -> Vec<usize> {
    const UNSEEN: u8 = 0;
    const ON_PATH: u8 = 1;
    const DONE: u8 = 2;

    let mut state = vec![UNSEEN; parents.len()];
    let mut cut = Vec::new();
    let mut path = Vec::new();
    for start in 0..parents.len() {
        let mut current = Some(start);
        while let Some(i) = current {
            match state[i] {
                UNSEEN => {
                    state[i] = ON_PATH;
                    path.push(i);
                    current = parents[i];
                }
                ON_PATH => {
                    let from = path.iter().position(|&n| n == i).unwrap_or(0);
                    if let Some(&head) = path[from..].iter().min() {
                        parents[head] = None;
                        cut.push(head);
                    }
                    current = None;
                }
                _ => current = None,
            }
        }
        for i in path.drain(..) {
            state[i] = DONE;
        }
    }
    cut
}

impl Hierarchy {
    /// Title of the synthetic root
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Tasks directly under the synthetic root, in input order
    pub fn roots(&self) -> &[usize] {
        &self.roots
    }

    pub fn children(&self, index: usize) -> &[usize] {
        &self.children[index]
    }

    pub fn parent(&self, index: usize) -> Parent {
        self.parents[index]
    }

    /// Key of the parent task, or `None` for tasks under the root.
    pub fn parent_key<'a>(&self, tasks: &'a [Task], index: usize) -> Option<&'a str> {
        match self.parents[index] {
            Parent::Root => None,
            Parent::Task(p) => Some(tasks[p].key.as_str()),
        }
    }

    /// Number of tasks in the tree (the root excluded)
    pub fn len(&self) -> usize {
        self.parents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parents.is_empty()
    }

    /// Depth-first pre-order walk as `(depth, index)`, depth 1 being the
    /// root's children.
    pub fn walk(&self) -> Vec<(usize, usize)> {
        let mut out = Vec::with_capacity(self.len());
        let mut stack: Vec<(usize, usize)> = self.roots.iter().rev().map(|&i| (1, i)).collect();
        while let Some((depth, i)) = stack.pop() {
            out.push((depth, i));
            for &child in self.children[i].iter().rev() {
                stack.push((depth + 1, child));
            }
        }
        out
    }

    /// Whether `index` is the last entry among its siblings.
    pub fn is_last_child(&self, index: usize) -> bool {
        let siblings = match self.parents[index] {
            Parent::Root => &self.roots,
            Parent::Task(p) => &self.children[p],
        };
        siblings.last() == Some(&index)
    }

    /// Segment size of every node for the radial view, by index: a leaf
    /// weighs its own `time`, an inner node the sum of its children.
    pub fn subtree_times(&self, tasks: &[Task]) -> Vec<f64> {
        let mut times = vec![0.0; self.len()];
        // Reverse pre-order visits children before their parent
        for (_, i) in self.walk().into_iter().rev() {
            let children = &self.children[i];
            times[i] = if children.is_empty() {
                tasks[i].time.unwrap_or(0.0)
            } else {
                children.iter().map(|&c| times[c]).sum()
            };
        }
        times
    }

    /// Weight of the whole tree, given the output of [`Self::subtree_times`].
    pub fn total_time(&self, times: &[f64]) -> f64 {
        self.roots.iter().map(|&r| times[r]).sum()
    }
}
