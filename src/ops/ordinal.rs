use log::trace;

use crate::model::task::Task;

/// Error type for rank operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum OrdinalError {
    #[error("task not found in active collection: {0}")]
    NotFound(String),
    #[error("rank {target} is out of range for {len} tasks")]
    OutOfRange { target: usize, len: usize },
}

/// Anything that can hold a rank inside an active collection.
///
/// Implemented for `Task` and for `&mut T`, so a collection can be a plain
/// `Vec<Task>` or a filtered `Vec<&mut Task>` borrowed out of a larger store.
pub trait Ranked {
    fn key(&self) -> &str;
    fn ord(&self) -> usize;
    fn set_ord(&mut self, ord: usize);
}

impl Ranked for Task {
    fn key(&self) -> &str {
        &self.key
    }

    fn ord(&self) -> usize {
        self.ord
    }

    fn set_ord(&mut self, ord: usize) {
        self.ord = ord;
    }
}

impl<T: Ranked + ?Sized> Ranked for &mut T {
    fn key(&self) -> &str {
        (**self).key()
    }

    fn ord(&self) -> usize {
        (**self).ord()
    }

    fn set_ord(&mut self, ord: usize) {
        (**self).set_ord(ord);
    }
}

/// Rank every item by its position in the slice.
pub fn assign<T: Ranked>(items: &mut [T]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.set_ord(i);
    }
}

/// Rank items in the given visiting order: `order[r]` is the slice position
/// of the item that receives rank `r`. Returns the positions whose rank
/// changed, ascending.
///
/// `order` must be a permutation of `0..items.len()`.
pub fn assign_in_order<T: Ranked>(items: &mut [T], order: &[usize]) -> Vec<usize> {
    debug_assert_eq!(order.len(), items.len());
    let mut changed = Vec::new();
    for (rank, &pos) in order.iter().enumerate() {
        if items[pos].ord() != rank {
            items[pos].set_ord(rank);
            changed.push(pos);
        }
    }
    changed.sort_unstable();
    changed
}

/// Slice position of the item with the given key.
pub fn position_of<T: Ranked>(items: &[T], key: &str) -> Result<usize, OrdinalError> {
    items
        .iter()
        .position(|item| item.key() == key)
        .ok_or_else(|| OrdinalError::NotFound(key.to_string()))
}

/// Move the item with `key` to rank `target`, sliding the items in between
/// over by one slot to close the gap.
///
/// Returns the slice positions of every item whose rank changed (the moved
/// item included), ascending. Moving an item onto its own rank changes
/// nothing and returns an empty list. On error no rank is touched.
pub fn move_to<T: Ranked>(
    items: &mut [T],
    key: &str,
    target: usize,
) -> Result<Vec<usize>, OrdinalError> {
    let len = items.len();
    let pos = position_of(items, key)?;
    if target >= len {
        return Err(OrdinalError::OutOfRange { target, len });
    }

    let old = items[pos].ord();
    if old == target {
        return Ok(Vec::new());
    }

    let mut changed = Vec::new();
    for (i, item) in items.iter_mut().enumerate() {
        if i == pos {
            continue;
        }
        let ord = item.ord();
        if old < target && ord > old && ord <= target {
            item.set_ord(ord - 1);
            changed.push(i);
        } else if target < old && ord >= target && ord < old {
            item.set_ord(ord + 1);
            changed.push(i);
        }
    }
    items[pos].set_ord(target);
    changed.push(pos);
    changed.sort_unstable();

    trace!("moved {} from rank {} to {} ({} shifted)", key, old, target, changed.len() - 1);
    Ok(changed)
}

/// Reorder the slice so that position equals rank.
pub fn sort_by_ordinal<T: Ranked>(items: &mut [T]) {
    items.sort_by_key(|item| item.ord());
}

/// True when the ranks are exactly `0..items.len()`, each used once.
pub fn is_dense<T: Ranked>(items: &[T]) -> bool {
    let mut seen = vec![false; items.len()];
    for item in items {
        match seen.get_mut(item.ord()) {
            Some(slot) if !*slot => *slot = true,
            _ => return false,
        }
    }
    true
}
