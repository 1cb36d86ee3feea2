use serde::{Deserialize, Serialize};

/// A task record as supplied by the loader, plus the fields the core writes
/// back while the task is on screen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Task {
    /// Unique identifier within a collection, like `T0001`
    pub key: String,
    /// Display title
    pub title: String,
    /// Due date, kept as the loader wrote it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due: Option<String>,
    /// Estimated effort in hours
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<f64>,
    /// Completed tasks drop out of the active collection unless shown
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub done: bool,
    /// Keys of the tasks shown beneath this one in the dependency tree
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub deps: Vec<String>,

    // --- View state, written by the core ---
    /// Rank within the active collection that last ranked this task
    #[serde(skip)]
    pub ord: usize,
    /// Horizontal pixel position
    #[serde(skip)]
    pub x: f64,
    /// Vertical pixel position
    #[serde(skip)]
    pub y: f64,
}

impl Task {
    /// Create an open task with no dependencies
    pub fn new(key: impl Into<String>, title: impl Into<String>) -> Self {
        Task {
            key: key.into(),
            title: title.into(),
            ..Task::default()
        }
    }

    /// Builder-style helper for attaching dependency keys
    pub fn with_deps<I, S>(mut self, deps: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.deps = deps.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_time(mut self, hours: f64) -> Self {
        self.time = Some(hours);
        self
    }

    pub fn with_done(mut self, done: bool) -> Self {
        self.done = done;
        self
    }

    /// Whether the task belongs in the active collection for the given
    /// show-done setting
    pub fn is_active(&self, show_done: bool) -> bool {
        show_done || !self.done
    }
}
