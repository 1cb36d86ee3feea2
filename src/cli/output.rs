use serde::Serialize;

use crate::model::task::Task;
use crate::ops::hierarchy::Hierarchy;

// ---------------------------------------------------------------------------
// JSON output structs
// ---------------------------------------------------------------------------

#[derive(Serialize)]
pub struct PlacedTaskJson {
    pub key: String,
    pub title: String,
    pub ord: usize,
    pub x: f64,
    pub y: f64,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub done: bool,
}

#[derive(Serialize)]
pub struct MoveJson {
    pub changed: Vec<String>,
    pub tasks: Vec<PlacedTaskJson>,
}

/// The tree as a flat node list in depth-first order. Nodes refer to each
/// other by key, so arbitrarily deep trees serialize without nesting.
#[derive(Serialize)]
pub struct TreeJson {
    pub title: String,
    pub time: f64,
    pub roots: Vec<String>,
    pub nodes: Vec<TreeNodeJson>,
}

#[derive(Serialize)]
pub struct TreeNodeJson {
    pub key: String,
    pub title: String,
    pub time: f64,
    pub depth: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub done: bool,
}

// ---------------------------------------------------------------------------
// Conversion
// ---------------------------------------------------------------------------

pub fn placed_task_to_json(task: &Task) -> PlacedTaskJson {
    PlacedTaskJson {
        key: task.key.clone(),
        title: task.title.clone(),
        ord: task.ord,
        x: task.x,
        y: task.y,
        done: task.done,
    }
}

pub fn tree_to_json(tree: &Hierarchy, tasks: &[Task]) -> TreeJson {
    let times = tree.subtree_times(tasks);
    let key_of = |i: usize| tasks[i].key.clone();
    let nodes = tree
        .walk()
        .into_iter()
        .map(|(depth, i)| TreeNodeJson {
            key: key_of(i),
            title: tasks[i].title.clone(),
            time: times[i],
            depth,
            parent: tree.parent_key(tasks, i).map(str::to_string),
            children: tree.children(i).iter().map(|&c| key_of(c)).collect(),
            done: tasks[i].done,
        })
        .collect();

    TreeJson {
        title: tree.label().to_string(),
        time: tree.total_time(&times),
        roots: tree.roots().iter().map(|&r| key_of(r)).collect(),
        nodes,
    }
}

// ---------------------------------------------------------------------------
// Text formatting
// ---------------------------------------------------------------------------

/// Hours without trailing zeros: `2h`, `0.5h`
pub fn format_hours(hours: f64) -> String {
    format!("{}h", hours)
}

/// One line per rank: `  0  T0002  (0, 0)  Buy mineral water`
pub fn format_placed_line(task: &Task) -> String {
    let mark = if task.done { " [x]" } else { "" };
    format!(
        "{:>3}  {}  ({}, {})  {}{}",
        task.ord, task.key, task.x, task.y, task.title, mark
    )
}

/// Guide columns drawn before a line is shifted back to the left margin
const MAX_INDENT: usize = 32;

/// Indented tree, root first, with `├─`/`└─` connectors. Past
/// [`MAX_INDENT`] levels only the innermost guides are drawn, after a `…`.
pub fn format_tree(tree: &Hierarchy, tasks: &[Task]) -> Vec<String> {
    let times = tree.subtree_times(tasks);
    let mut lines = Vec::with_capacity(tasks.len() + 1);
    lines.push(format!("{} ({})", tree.label(), format_hours(tree.total_time(&times))));

    // One entry per ancestor below the root: whether it was a last child
    let mut guides: Vec<bool> = Vec::new();
    for (depth, i) in tree.walk() {
        guides.truncate(depth - 1);

        let mut prefix = String::new();
        let skip = guides.len().saturating_sub(MAX_INDENT);
        if skip > 0 {
            prefix.push_str("… ");
        }
        for &last in &guides[skip..] {
            prefix.push_str(if last { "   " } else { "│  " });
        }

        let last = tree.is_last_child(i);
        let task = &tasks[i];
        let check = if task.done { 'x' } else { ' ' };
        lines.push(format!(
            "{}{} [{}] {} {} ({})",
            prefix,
            if last { "└─" } else { "├─" },
            check,
            task.key,
            task.title,
            format_hours(times[i])
        ));
        guides.push(last);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::hierarchy;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_format_hours() {
        assert_eq!(format_hours(2.0), "2h");
        assert_eq!(format_hours(0.5), "0.5h");
    }

    #[test]
    fn test_format_tree() {
        let tasks = vec![
            Task::new("T1", "Buy cola").with_deps(["T2", "T4"]),
            Task::new("T2", "Pick up cola").with_time(0.5).with_done(true),
            Task::new("T3", "Clean the room").with_time(2.0),
            Task::new("T4", "Pay").with_deps(["T5"]),
            Task::new("T5", "Find wallet").with_time(0.25),
        ];
        let tree = hierarchy::build(&tasks);
        assert_eq!(
            format_tree(&tree, &tasks),
            vec![
                "All tasks (2.75h)",
                "├─ [ ] T1 Buy cola (0.75h)",
                "│  ├─ [x] T2 Pick up cola (0.5h)",
                "│  └─ [ ] T4 Pay (0.25h)",
                "│     └─ [ ] T5 Find wallet (0.25h)",
                "└─ [ ] T3 Clean the room (2h)",
            ]
        );
    }

    #[test]
    fn test_format_tree_long_chain() {
        let n = 100_000;
        let tasks: Vec<Task> = (0..n)
            .map(|i| {
                let task = Task::new(format!("T{}", i), "link").with_time(0.5);
                if i + 1 < n { task.with_deps([format!("T{}", i + 1)]) } else { task }
            })
            .collect();
        let tree = hierarchy::build(&tasks);

        let lines = format_tree(&tree, &tasks);
        assert_eq!(lines.len(), n + 1);
        assert_eq!(lines[0], "All tasks (0.5h)");
        assert_eq!(lines[1], "└─ [ ] T0 link (0.5h)");
        let deepest = &lines[n];
        assert!(deepest.starts_with("… "));
        assert!(deepest.ends_with("└─ [ ] T99999 link (0.5h)"));
        assert_eq!(deepest.matches("   ").count(), MAX_INDENT);

        let json = tree_to_json(&tree, &tasks);
        assert_eq!(json.nodes.len(), n);
        assert_eq!(json.nodes[n - 1].depth, n);
        assert_eq!(json.nodes[n - 1].parent.as_deref(), Some("T99998"));
        assert!(serde_json::to_string(&json).is_ok());
    }

    #[test]
    fn test_tree_json_shape() {
        let tasks = vec![Task::new("T1", "Parent").with_deps(["T2"]), Task::new("T2", "Child")];
        let tree = hierarchy::build(&tasks);
        let json = serde_json::to_value(tree_to_json(&tree, &tasks)).unwrap();
        assert_eq!(json["title"], "All tasks");
        assert_eq!(json["roots"], serde_json::json!(["T1"]));
        assert_eq!(json["nodes"][0]["key"], "T1");
        assert_eq!(json["nodes"][0]["children"], serde_json::json!(["T2"]));
        assert!(json["nodes"][0].get("parent").is_none());
        assert_eq!(json["nodes"][1]["parent"], "T1");
        assert_eq!(json["nodes"][1]["depth"], 2);
    }

    #[test]
    fn test_format_placed_line() {
        let mut task = Task::new("T7", "Buy carrot");
        task.ord = 7;
        task.x = 300.0;
        assert_eq!(format_placed_line(&task), "  7  T7  (300, 0)  Buy carrot");
    }
}
