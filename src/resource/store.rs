//! The list cache a view owns.

use super::reducer::{reduce, Change};
use super::Resource;
use table_store::Filter;

/// Where the cached list stands relative to the data store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// Never loaded, or invalidated since the last load.
    #[default]
    Stale,
    Loading,
    Loaded,
    /// The last load failed; the list is empty.
    Failed,
}

/// Rows of one table as last read by a view, patched in place after every
/// confirmed mutation.
///
/// A `ListStore` belongs to exactly one view; nothing else reads or writes it.
/// When the view is restricted by a filter, the store holds the same filter and
/// never caches a row the filter rejects.
#[derive(Debug, Clone)]
pub struct ListStore<T> {
    rows: Vec<T>,
    state: LoadState,
    filter: Option<Filter<T>>,
}

impl<T> Default for ListStore<T> {
    fn default() -> Self {
        Self {
            rows: Vec::new(),
            state: LoadState::Stale,
            filter: None,
        }
    }
}

impl<T: Resource> ListStore<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restricts the cache to the rows `filter` admits. Rows already held are kept
    /// until the next load, so the store is marked stale.
    pub fn set_filter(&mut self, filter: Option<Filter<T>>) {
        self.filter = filter;
        self.invalidate();
    }

    pub fn admits(&self, row: &T) -> bool {
        self.filter.as_ref().map_or(true, |filter| filter.matches(row))
    }

    pub fn read(&self) -> &[T] {
        &self.rows
    }

    pub fn get(&self, id: &T::Id) -> Option<&T> {
        self.rows.iter().find(|row| row.id() == id)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn state(&self) -> LoadState {
        self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// True when the next render should read the table again.
    pub fn needs_refresh(&self) -> bool {
        matches!(self.state, LoadState::Stale | LoadState::Failed)
    }

    /// Marks the cached rows as out of date. They stay readable until reloaded.
    pub fn invalidate(&mut self) {
        if self.state != LoadState::Loading {
            self.state = LoadState::Stale;
        }
    }

    pub fn begin_load(&mut self) {
        self.state = LoadState::Loading;
    }

    pub fn finish_load(&mut self, rows: Vec<T>) {
        self.rows = rows;
        self.state = LoadState::Loaded;
    }

    pub fn fail_load(&mut self) {
        self.rows.clear();
        self.state = LoadState::Failed;
    }

    /// Patches the cache with a change the data store has confirmed.
    ///
    /// A created row outside the filter is not cached; an updated row that left
    /// the filter is dropped.
    pub fn apply(&mut self, change: &Change<T>) {
        self.rows = match change {
            Change::Created(row) if !self.admits(row) => return,
            Change::Updated(row) if !self.admits(row) => reduce(&self.rows, &Change::Deleted(row.id().clone())),
            change => reduce(&self.rows, change),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Medium;
    use chrono::Utc;

    fn medium(id: u64, name: &str) -> Medium {
        Medium {
            id,
            name: name.into(),
            specialty: "Voyance".into(),
            description: String::new(),
            price_per_minute: 3.0,
            rating: 5.0,
            years_experience: 4,
            image_url: None,
            is_available: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_load_cycle() {
        let mut store = ListStore::<Medium>::new();
        assert!(store.needs_refresh());

        store.begin_load();
        assert!(store.is_loading());
        store.invalidate();
        assert!(store.is_loading(), "invalidate must not hide an in-flight load");

        store.finish_load(vec![medium(1, "Alba")]);
        assert_eq!(store.state(), LoadState::Loaded);
        assert!(!store.needs_refresh());

        store.invalidate();
        assert!(store.needs_refresh());
        assert_eq!(store.len(), 1);

        store.fail_load();
        assert!(store.is_empty());
        assert_eq!(store.state(), LoadState::Failed);
    }

    #[test]
    fn test_apply_patches_rows() {
        let mut store = ListStore::<Medium>::new();
        store.finish_load(vec![medium(1, "Alba")]);

        store.apply(&Change::Created(medium(2, "Bea")));
        assert_eq!(store.len(), 2);
        assert_eq!(store.get(&2).map(|m| m.name.as_str()), Some("Bea"));

        store.apply(&Change::Deleted(1));
        assert!(store.get(&1).is_none());
    }

    #[test]
    fn test_apply_respects_the_filter() {
        let mut store = ListStore::<Medium>::new();
        store.set_filter(Some(Filter::new(|m: &Medium| m.is_available)));
        store.finish_load(vec![medium(1, "Alba")]);

        let mut away = medium(2, "Bea");
        away.is_available = false;
        store.apply(&Change::Created(away));
        assert_eq!(store.len(), 1);

        let mut gone = medium(1, "Alba");
        gone.is_available = false;
        store.apply(&Change::Updated(gone));
        assert!(store.is_empty());
    }
}
