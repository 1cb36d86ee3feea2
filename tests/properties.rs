//! Property tests for rank maintenance, coordinate mapping and tree building.

use std::collections::HashSet;

use gtdo::model::task::Task;
use gtdo::ops::hierarchy::{self, Parent};
use gtdo::ops::layout::{GridLayout, ListLayout, Placement};
use gtdo::ops::ordinal::{self, OrdinalError};
use proptest::prelude::*;

fn ranked(n: usize) -> Vec<Task> {
    let mut tasks: Vec<Task> = (0..n)
        .map(|i| Task::new(format!("T{}", i), format!("Task {}", i)))
        .collect();
    ordinal::assign(&mut tasks);
    tasks
}

fn ords(tasks: &[Task]) -> Vec<usize> {
    tasks.iter().map(|t| t.ord).collect()
}

/// Collections of up to 30 tasks with a sequence of (item, target) moves
fn moves_strategy() -> impl Strategy<Value = (usize, Vec<(usize, usize)>)> {
    (1usize..30).prop_flat_map(|n| (Just(n), prop::collection::vec((0..n, 0..n), 0..20)))
}

/// Tasks whose deps point at arbitrary keys, some of them missing
fn graph_strategy() -> impl Strategy<Value = Vec<Task>> {
    (0usize..15).prop_flat_map(|n| {
        prop::collection::vec(prop::collection::vec(0usize..(n + 3), 0..4), n).prop_map(|deps| {
            deps.into_iter()
                .enumerate()
                .map(|(i, d)| {
                    Task::new(format!("T{}", i), "t").with_deps(d.into_iter().map(|k| format!("T{}", k)))
                })
                .collect()
        })
    })
}

proptest! {
    #[test]
    fn assign_is_dense(n in 0usize..50) {
        let tasks = ranked(n);
        prop_assert!(ordinal::is_dense(&tasks));
        prop_assert_eq!(ords(&tasks), (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn moves_keep_ranks_dense((n, moves) in moves_strategy()) {
        let mut tasks = ranked(n);
        for (item, target) in moves {
            let key = format!("T{}", item);
            let before = ords(&tasks);
            let old = tasks[item].ord;
            let changed = ordinal::move_to(&mut tasks, &key, target).unwrap();

            prop_assert_eq!(tasks[item].ord, target);
            prop_assert!(ordinal::is_dense(&tasks));

            // Exactly the items whose rank differs are reported
            let differs: Vec<usize> = (0..n).filter(|&i| before[i] != tasks[i].ord).collect();
            prop_assert_eq!(&changed, &differs);

            // Minimal disturbance: one slot per shifted item, inside the span
            let (lo, hi) = if old < target { (old, target) } else { (target, old) };
            for &i in &changed {
                if i != item {
                    prop_assert!(before[i] >= lo && before[i] <= hi);
                    prop_assert_eq!(before[i].abs_diff(tasks[i].ord), 1);
                }
            }
        }
    }

    #[test]
    fn move_to_own_rank_changes_nothing(n in 1usize..30, pick in 0usize..30) {
        let mut tasks = ranked(n);
        let item = pick % n;
        let key = format!("T{}", item);
        let changed = ordinal::move_to(&mut tasks, &key, item).unwrap();
        prop_assert!(changed.is_empty());
        prop_assert_eq!(ords(&tasks), (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn failed_move_leaves_ranks(n in 1usize..30, extra in 0usize..10) {
        let mut tasks = ranked(n);
        let err = ordinal::move_to(&mut tasks, "T0", n + extra).unwrap_err();
        prop_assert_eq!(err, OrdinalError::OutOfRange { target: n + extra, len: n });
        let err = ordinal::move_to(&mut tasks, "missing", 0).unwrap_err();
        prop_assert_eq!(err, OrdinalError::NotFound("missing".into()));
        prop_assert_eq!(ords(&tasks), (0..n).collect::<Vec<_>>());
    }

    #[test]
    fn grid_round_trip(
        cell_w in 10u32..400,
        cell_h in 10u32..200,
        rows in 1u32..20,
        ord in 0usize..500,
    ) {
        let grid = GridLayout::new(
            cell_w as f64,
            cell_h as f64,
            1000.0,
            (cell_h * rows) as f64 + 1.0,
        ).unwrap();
        prop_assert_eq!(grid.max_per_column(), rows as usize);
        prop_assert_eq!(grid.to_ordinal(grid.to_position(ord)), ord as i64);
    }

    #[test]
    fn list_round_trip(cell_h in 1u32..200, ord in 0usize..500) {
        let list = ListLayout::new(cell_h as f64).unwrap();
        prop_assert_eq!(list.to_ordinal(list.to_position(ord)), ord as i64);
    }

    #[test]
    fn hierarchy_spans_every_task_once(tasks in graph_strategy()) {
        let tree = hierarchy::build(&tasks);
        let walked = tree.walk();
        prop_assert_eq!(walked.len(), tasks.len());

        let seen: HashSet<usize> = walked.iter().map(|&(_, i)| i).collect();
        prop_assert_eq!(seen.len(), tasks.len());

        for &(_, i) in &walked {
            for &c in tree.children(i) {
                prop_assert_eq!(tree.parent(c), Parent::Task(i));
            }
        }
        for &r in tree.roots() {
            prop_assert_eq!(tree.parent(r), Parent::Root);
        }
    }
}
