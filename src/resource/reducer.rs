//! Pure cache patching after a successful mutation.
//!
//! `reduce(rows, change)` returns the list the view should show once the data store
//! has confirmed `change`. It never talks to the store, so it is tested on plain
//! vectors.

use super::Resource;
use std::cmp::Ordering;
use table_store::Record;

/// A mutation the data store has confirmed.
#[derive(Debug, Clone)]
pub enum Change<T: Record> {
    /// Row returned by an insert.
    Created(T),
    /// Row returned by an update.
    Updated(T),
    Deleted(T::Id),
}

impl<T: Record> Change<T> {
    pub fn id(&self) -> &T::Id {
        match self {
            Change::Created(row) | Change::Updated(row) => row.id(),
            Change::Deleted(id) => id,
        }
    }
}

/// Applies a confirmed change to a cached list.
///
/// * `Created` inserts the row once, after every row that sorts before or level with
///   it under [`Resource::list_order`]. A stale copy with the same id is dropped
///   first.
/// * `Updated` replaces the row with the same id where it stands. A row the list
///   does not hold (filtered out of this view) is ignored.
/// * `Deleted` removes the row with that id.
pub fn reduce<T: Resource>(rows: &[T], change: &Change<T>) -> Vec<T> {
    match change {
        Change::Created(created) => {
            let mut next: Vec<T> = rows
                .iter()
                .filter(|row| row.id() != created.id())
                .cloned()
                .collect();
            let at = next.partition_point(|row| T::list_order(row, created) != Ordering::Greater);
            next.insert(at, created.clone());
            next
        }
        Change::Updated(updated) => rows
            .iter()
            .map(|row| {
                if row.id() == updated.id() {
                    updated.clone()
                } else {
                    row.clone()
                }
            })
            .collect(),
        Change::Deleted(id) => rows.iter().filter(|row| row.id() != id).cloned().collect(),
    }
}
