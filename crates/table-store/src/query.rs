//! # Select Queries
//!
//! A [`Select`] describes a read against one table: an optional row predicate, an
//! optional ordering and an optional limit. It is the in-process counterpart of
//! `select * from t where .. order by .. limit ..`.

use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

/// Shareable row predicate.
pub struct Filter<T>(Arc<dyn Fn(&T) -> bool + Send + Sync>);

impl<T> Filter<T> {
    pub fn new(predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self(Arc::new(predicate))
    }

    pub fn matches(&self, row: &T) -> bool {
        (self.0)(row)
    }
}

impl<T> Clone for Filter<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

impl<T> fmt::Debug for Filter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Filter(..)")
    }
}

/// Row comparator used to order a selection.
pub type Comparator<T> = fn(&T, &T) -> Ordering;

/// A read against one table.
///
/// ```rust
/// use table_store::Select;
///
/// let select: Select<u32> = Select::all()
///     .filter(|n: &u32| n % 2 == 0)
///     .order_by(|a: &u32, b: &u32| b.cmp(a))
///     .limit(10);
/// assert!(select.admits(&4));
/// assert!(!select.admits(&3));
/// ```
pub struct Select<T> {
    filter: Option<Filter<T>>,
    order: Option<Comparator<T>>,
    limit: Option<usize>,
}

impl<T> Select<T> {
    /// Every row, in insertion order.
    pub fn all() -> Self {
        Self {
            filter: None,
            order: None,
            limit: None,
        }
    }

    pub fn filter(mut self, predicate: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.filter = Some(Filter::new(predicate));
        self
    }

    /// Replace the predicate with an existing (possibly absent) one.
    pub fn with_filter(mut self, filter: Option<Filter<T>>) -> Self {
        self.filter = filter;
        self
    }

    pub fn order_by(mut self, order: Comparator<T>) -> Self {
        self.order = Some(order);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// True when the row passes the predicate.
    pub fn admits(&self, row: &T) -> bool {
        self.filter.as_ref().map_or(true, |f| f.matches(row))
    }

    /// Run the query over an iterator of rows.
    pub fn apply<'a>(&self, rows: impl Iterator<Item = &'a T>) -> Vec<T>
    where
        T: Clone + 'a,
    {
        let mut selected: Vec<T> = rows.filter(|row| self.admits(row)).cloned().collect();
        if let Some(order) = self.order {
            selected.sort_by(order);
        }
        if let Some(limit) = self.limit {
            selected.truncate(limit);
        }
        selected
    }
}

impl<T> Clone for Select<T> {
    fn clone(&self) -> Self {
        Self {
            filter: self.filter.clone(),
            order: self.order,
            limit: self.limit,
        }
    }
}

impl<T> Default for Select<T> {
    fn default() -> Self {
        Self::all()
    }
}

impl<T> fmt::Debug for Select<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Select")
            .field("filtered", &self.filter.is_some())
            .field("ordered", &self.order.is_some())
            .field("limit", &self.limit)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_apply_filters_orders_and_limits() {
        let rows = vec![5u32, 2, 8, 1, 4];
        let select = Select::all()
            .filter(|n: &u32| *n > 1)
            .order_by(|a: &u32, b: &u32| a.cmp(b))
            .limit(3);

        assert_eq!(select.apply(rows.iter()), vec![2, 4, 5]);
    }

    #[test]
    fn test_all_keeps_insertion_order() {
        let rows = vec![3u32, 1, 2];
        assert_eq!(Select::all().apply(rows.iter()), vec![3, 1, 2]);
    }
}
