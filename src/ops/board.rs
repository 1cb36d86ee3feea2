//! The interactive task list: an owned task store, the active collection
//! derived from it, and the gestures that reorder it.
//!
//! Every gesture runs to completion before the next one is accepted. The
//! board assumes exclusive access for the duration of a call; callers that
//! feed it from several input sources must serialize them.

use log::debug;

use crate::model::config::Config;
use crate::model::task::Task;
use crate::ops::hierarchy::{self, Hierarchy};
use crate::ops::layout::{self, Layout, LayoutError, Placement, Point, Positioned};
use crate::ops::ordinal::{self, OrdinalError};
use crate::ops::search::Query;

/// Error type for board operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BoardError {
    #[error(transparent)]
    Ordinal(#[from] OrdinalError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
    #[error("task not found: {0}")]
    NotFound(String),
    #[error("duplicate task key: {0}")]
    DuplicateKey(String),
    #[error("no drag in progress")]
    NoDrag,
}

#[derive(Debug, Clone)]
pub struct Board {
    tasks: Vec<Task>,
    layout: Layout,
    show_done: bool,
    root_label: String,
    /// Key of the task under the pointer between drag start and end
    dragging: Option<String>,
}

impl Board {
    pub fn new(tasks: Vec<Task>, layout: Layout) -> Self {
        let mut board = Board {
            tasks,
            layout,
            show_done: false,
            root_label: hierarchy::ROOT_LABEL.to_string(),
            dragging: None,
        };
        board.relayout();
        board
    }

    pub fn from_config(tasks: Vec<Task>, config: &Config) -> Result<Self, BoardError> {
        let layout = Layout::from_config(&config.layout)?;
        let mut board = Board {
            tasks,
            layout,
            show_done: config.view.show_done,
            root_label: config.view.root_label.clone(),
            dragging: None,
        };
        board.relayout();
        Ok(board)
    }

    /// All tasks, done or not, in store order
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn task(&self, key: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.key == key)
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    pub fn show_done(&self) -> bool {
        self.show_done
    }

    pub fn dragging(&self) -> Option<&str> {
        self.dragging.as_deref()
    }

    /// The active collection in rank order
    pub fn active(&self) -> Vec<&Task> {
        let mut active: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.is_active(self.show_done))
            .collect();
        active.sort_by_key(|t| t.ord);
        active
    }

    pub fn active_len(&self) -> usize {
        self.tasks
            .iter()
            .filter(|t| t.is_active(self.show_done))
            .count()
    }

    fn active_mut(tasks: &mut [Task], show_done: bool) -> Vec<&mut Task> {
        tasks.iter_mut().filter(|t| t.is_active(show_done)).collect()
    }

    /// Re-rank the active collection in store order and move every active
    /// task to its slot. Any outstanding drag is dropped.
    pub fn relayout(&mut self) {
        let mut active = Self::active_mut(&mut self.tasks, self.show_done);
        ordinal::assign(&mut active);
        self.layout.place_all(&mut active);
        if let Some(key) = self.dragging.take() {
            debug!("relayout cancels drag of {}", key);
        }
    }

    /// Keep the store in rank order so a later `relayout` reproduces the
    /// current ranks. Inactive tasks keep their slots.
    fn commit_order(&mut self) {
        let show_done = self.show_done;
        let slots: Vec<usize> = (0..self.tasks.len())
            .filter(|&i| self.tasks[i].is_active(show_done))
            .collect();
        let mut picked: Vec<Task> = slots
            .iter()
            .map(|&i| std::mem::take(&mut self.tasks[i]))
            .collect();
        picked.sort_by_key(|t| t.ord);
        for (slot, task) in slots.into_iter().zip(picked) {
            self.tasks[slot] = task;
        }
    }

    // -----------------------------------------------------------------------
    // Reordering
    // -----------------------------------------------------------------------

    /// Move an active task to rank `target`. Returns the keys of the tasks
    /// whose rank changed; they have already been moved to their new slots.
    pub fn move_to(&mut self, key: &str, target: usize) -> Result<Vec<String>, BoardError> {
        let changed = {
            let mut active = Self::active_mut(&mut self.tasks, self.show_done);
            let changed = ordinal::move_to(&mut active, key, target)?;
            for &i in &changed {
                self.layout.place(&mut active[i]);
            }
            changed
                .iter()
                .map(|&i| active[i].key.clone())
                .collect::<Vec<_>>()
        };
        if !changed.is_empty() {
            self.commit_order();
        }
        Ok(changed)
    }

    pub fn move_to_top(&mut self, key: &str) -> Result<Vec<String>, BoardError> {
        self.move_to(key, 0)
    }

    pub fn move_to_bottom(&mut self, key: &str) -> Result<Vec<String>, BoardError> {
        let len = self.active_len();
        if len == 0 {
            return Err(BoardError::NotFound(key.to_string()));
        }
        self.move_to(key, len - 1)
    }

    // -----------------------------------------------------------------------
    // Drag gesture
    // -----------------------------------------------------------------------

    /// Begin dragging an active task. A drag that was never ended is
    /// abandoned.
    pub fn drag_start(&mut self, key: &str) -> Result<(), BoardError> {
        if !self
            .tasks
            .iter()
            .any(|t| t.key == key && t.is_active(self.show_done))
        {
            return Err(BoardError::NotFound(key.to_string()));
        }
        if let Some(prev) = self.dragging.replace(key.to_string()) {
            debug!("abandoning drag of {}", prev);
        }
        debug!("drag start {}", key);
        Ok(())
    }

    /// Follow the pointer to `point` (top-left of the dragged box). The
    /// dragged task takes the live position; tasks whose rank changed are
    /// moved to their new slots. Returns the keys whose rank changed.
    pub fn drag_move(&mut self, point: Point) -> Result<Vec<String>, BoardError> {
        let key = self.dragging.clone().ok_or(BoardError::NoDrag)?;

        let changed = {
            let mut active = Self::active_mut(&mut self.tasks, self.show_done);
            let dragged = ordinal::position_of(&active, &key)?;

            let changed = match &self.layout {
                Layout::Grid(grid) => {
                    let live = grid.clamp_point(point);
                    active[dragged].set_position(live);
                    match layout::clamp_ordinal(grid.to_ordinal(live), active.len()) {
                        Some(target) => ordinal::move_to(&mut active, &key, target)?,
                        None => Vec::new(),
                    }
                }
                Layout::List(list) => {
                    let max_y = active.len().saturating_sub(1) as f64 * list.cell_height();
                    let live_y = point.y.clamp(0.0, max_y);
                    let changed = list.reorder_by_offset(&mut active, &key, live_y)?;
                    active[dragged].set_position(Point::new(0.0, live_y));
                    changed
                }
            };

            for &i in &changed {
                if i != dragged {
                    self.layout.place(&mut active[i]);
                }
            }
            changed
                .iter()
                .map(|&i| active[i].key.clone())
                .collect::<Vec<_>>()
        };

        if !changed.is_empty() {
            self.commit_order();
        }
        Ok(changed)
    }

    /// Drop the dragged task into its slot. Returns its key.
    pub fn drag_end(&mut self) -> Result<String, BoardError> {
        let key = self.dragging.take().ok_or(BoardError::NoDrag)?;
        let show_done = self.show_done;
        if let Some(task) = self
            .tasks
            .iter_mut()
            .find(|t| t.key == key && t.is_active(show_done))
        {
            self.layout.place(task);
        }
        debug!("drag end {}", key);
        Ok(key)
    }

    // -----------------------------------------------------------------------
    // Collection changes
    // -----------------------------------------------------------------------

    pub fn set_show_done(&mut self, show_done: bool) {
        self.show_done = show_done;
        self.relayout();
    }

    /// Flip a task's done flag and re-rank. Returns the new flag.
    pub fn toggle_done(&mut self, key: &str) -> Result<bool, BoardError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.key == key)
            .ok_or_else(|| BoardError::NotFound(key.to_string()))?;
        task.done = !task.done;
        let done = task.done;
        self.relayout();
        Ok(done)
    }

    pub fn edit_title(&mut self, key: &str, title: String) -> Result<(), BoardError> {
        let task = self
            .tasks
            .iter_mut()
            .find(|t| t.key == key)
            .ok_or_else(|| BoardError::NotFound(key.to_string()))?;
        task.title = title;
        Ok(())
    }

    /// Append a task at the bottom and re-rank.
    pub fn add_task(&mut self, task: Task) -> Result<(), BoardError> {
        if self.tasks.iter().any(|t| t.key == task.key) {
            return Err(BoardError::DuplicateKey(task.key));
        }
        self.tasks.push(task);
        self.relayout();
        Ok(())
    }

    pub fn remove_task(&mut self, key: &str) -> Result<Task, BoardError> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.key == key)
            .ok_or_else(|| BoardError::NotFound(key.to_string()))?;
        let task = self.tasks.remove(idx);
        self.relayout();
        Ok(task)
    }

    // -----------------------------------------------------------------------
    // Views
    // -----------------------------------------------------------------------

    /// Keys of active tasks whose title matches `query`, in rank order.
    pub fn filter(&self, query: &str) -> Vec<&str> {
        let query = Query::parse(query);
        self.active()
            .into_iter()
            .filter(|t| query.is_empty() || query.matches(&t.title))
            .map(|t| t.key.as_str())
            .collect()
    }

    /// Dependency tree over every task, done or not.
    pub fn hierarchy(&self) -> Hierarchy {
        hierarchy::build_with_label(&self.tasks, &self.root_label)
    }
}
