use serde::Serialize;

use crate::model::config::{LayoutConfig, LayoutMode};
use crate::model::task::Task;
use crate::ops::ordinal::{self, OrdinalError, Ranked};

/// Error type for layout construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LayoutError {
    #[error("invalid layout: {0}")]
    InvalidLayout(String),
}

/// A pixel position, top-left origin
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// Anything that carries an on-screen position.
pub trait Positioned {
    fn position(&self) -> Point;
    fn set_position(&mut self, position: Point);
}

impl Positioned for Task {
    fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }
}

impl<T: Positioned + ?Sized> Positioned for &mut T {
    fn position(&self) -> Point {
        (**self).position()
    }

    fn set_position(&mut self, position: Point) {
        (**self).set_position(position);
    }
}

/// Mapping between ranks and pixel positions.
pub trait Placement {
    /// Top-left corner of the slot for `ord`.
    fn to_position(&self, ord: usize) -> Point;

    /// Rank of the slot under a dragged box whose top-left corner is at
    /// `pos`. Unclamped: may be negative or past the last item.
    fn to_ordinal(&self, pos: Point) -> i64;

    /// Move an item to the slot of its current rank.
    fn place<T: Ranked + Positioned>(&self, item: &mut T) {
        let pos = self.to_position(item.ord());
        item.set_position(pos);
    }

    fn place_all<T: Ranked + Positioned>(&self, items: &mut [T]) {
        for item in items {
            self.place(item);
        }
    }
}

/// Clamp a raw rank from `to_ordinal` into `0..len`. `None` for an empty
/// collection.
pub fn clamp_ordinal(raw: i64, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    let max = (len - 1) as i64;
    Some(raw.clamp(0, max) as usize)
}

fn check_extent(name: &str, value: f64) -> Result<(), LayoutError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(LayoutError::InvalidLayout(format!(
            "{} must be a positive number, got {}",
            name, value
        )))
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// Most rows a grid column may hold
pub const MAX_ROWS: u32 = u32::MAX;

/// Column-major grid: slots fill a column top to bottom, then continue in
/// the next column to the right.
#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    cell_width: f64,
    cell_height: f64,
    viewport_width: f64,
    viewport_height: f64,
    max_per_column: usize,
}

impl GridLayout {
    pub fn new(
        cell_width: f64,
        cell_height: f64,
        viewport_width: f64,
        viewport_height: f64,
    ) -> Result<Self, LayoutError> {
        check_extent("cell_width", cell_width)?;
        check_extent("cell_height", cell_height)?;
        check_extent("viewport_width", viewport_width)?;
        check_extent("viewport_height", viewport_height)?;

        let per_column = (viewport_height / cell_height).floor();
        if per_column < 1.0 {
            return Err(LayoutError::InvalidLayout(format!(
                "viewport height {} cannot fit a cell of height {}",
                viewport_height, cell_height
            )));
        }
        if per_column > MAX_ROWS as f64 {
            return Err(LayoutError::InvalidLayout(format!(
                "viewport height {} holds more than {} cells of height {}",
                viewport_height, MAX_ROWS, cell_height
            )));
        }
        let max_per_column = per_column as usize;

        Ok(GridLayout {
            cell_width,
            cell_height,
            viewport_width,
            viewport_height,
            max_per_column,
        })
    }

    pub fn max_per_column(&self) -> usize {
        self.max_per_column
    }

    /// Keep a drag point inside the viewport.
    pub fn clamp_point(&self, pos: Point) -> Point {
        Point::new(
            pos.x.clamp(0.0, self.viewport_width),
            pos.y.clamp(0.0, self.viewport_height),
        )
    }
}

impl Placement for GridLayout {
    fn to_position(&self, ord: usize) -> Point {
        let column = ord / self.max_per_column;
        let row = ord % self.max_per_column;
        Point::new(
            column as f64 * self.cell_width,
            row as f64 * self.cell_height,
        )
    }

    fn to_ordinal(&self, pos: Point) -> i64 {
        // Sample at the center of the box so the rank does not flicker
        // while the corner sits on a cell boundary.
        let cx = pos.x + self.cell_width / 2.0;
        let cy = pos.y + self.cell_height / 2.0;
        let column = (cx / self.cell_width).floor() as i64;
        let row = (cy / self.cell_height).floor() as i64;
        // Far off-screen points saturate instead of wrapping
        column
            .saturating_mul(self.max_per_column as i64)
            .saturating_add(row)
    }
}

// ---------------------------------------------------------------------------
// Single column
// ---------------------------------------------------------------------------

/// A vertical list: every slot sits in column 0.
#[derive(Debug, Clone, PartialEq)]
pub struct ListLayout {
    cell_height: f64,
}

impl ListLayout {
    pub fn new(cell_height: f64) -> Result<Self, LayoutError> {
        check_extent("cell_height", cell_height)?;
        Ok(ListLayout { cell_height })
    }

    pub fn cell_height(&self) -> f64 {
        self.cell_height
    }

    /// Whether a live offset of `live_y` has drifted more than half a cell
    /// from the nominal slot of `ord`.
    pub fn exceeds_threshold(&self, ord: usize, live_y: f64) -> bool {
        let nominal = ord as f64 * self.cell_height;
        (live_y - nominal).abs() > self.cell_height / 2.0
    }

    /// Re-rank the collection after the item `key` was dragged to `live_y`.
    ///
    /// Below the hysteresis threshold nothing happens. Above it every item
    /// is ordered by its vertical position, using `live_y` for the dragged
    /// item and the committed `y` for all others, and ranks are reassigned
    /// in that order. Returns the positions whose rank changed.
    pub fn reorder_by_offset<T: Ranked + Positioned>(
        &self,
        items: &mut [T],
        key: &str,
        live_y: f64,
    ) -> Result<Vec<usize>, OrdinalError> {
        let dragged = ordinal::position_of(items, key)?;
        if !self.exceeds_threshold(items[dragged].ord(), live_y) {
            return Ok(Vec::new());
        }

        let y_of = |i: usize| {
            if i == dragged {
                live_y
            } else {
                items[i].position().y
            }
        };
        let mut order: Vec<usize> = (0..items.len()).collect();
        order.sort_by(|&a, &b| {
            y_of(a)
                .total_cmp(&y_of(b))
                .then_with(|| items[a].ord().cmp(&items[b].ord()))
        });

        Ok(ordinal::assign_in_order(items, &order))
    }
}

impl Placement for ListLayout {
    fn to_position(&self, ord: usize) -> Point {
        Point::new(0.0, ord as f64 * self.cell_height)
    }

    fn to_ordinal(&self, pos: Point) -> i64 {
        ((pos.y + self.cell_height / 2.0) / self.cell_height).floor() as i64
    }
}

// ---------------------------------------------------------------------------
// Configured layout
// ---------------------------------------------------------------------------

/// The layout picked by configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Layout {
    Grid(GridLayout),
    List(ListLayout),
}

impl Layout {
    pub fn from_config(config: &LayoutConfig) -> Result<Self, LayoutError> {
        match config.mode {
            LayoutMode::Grid => Ok(Layout::Grid(GridLayout::new(
                config.cell_width,
                config.cell_height,
                config.viewport_width,
                config.viewport_height,
            )?)),
            LayoutMode::List => Ok(Layout::List(ListLayout::new(config.cell_height)?)),
        }
    }
}

impl Placement for Layout {
    fn to_position(&self, ord: usize) -> Point {
        match self {
            Layout::Grid(grid) => grid.to_position(ord),
            Layout::List(list) => list.to_position(ord),
        }
    }

    fn to_ordinal(&self, pos: Point) -> i64 {
        match self {
            Layout::Grid(grid) => grid.to_ordinal(pos),
            Layout::List(list) => list.to_ordinal(pos),
        }
    }
}
