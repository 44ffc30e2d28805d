//! The read side of a resource: load every visible row of one table.

use super::store::ListStore;
use super::Resource;
use crate::ui::Toasts;
use table_store::{Filter, Select, TableClient};
use tracing::{debug, instrument};

/// Reads one table, optionally restricted by a row predicate (for example a
/// partner's own rows), in the resource's display order.
pub struct ResourceQuery<T: Resource> {
    client: TableClient<T>,
    filter: Option<Filter<T>>,
}

impl<T: Resource> Clone for ResourceQuery<T> {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            filter: self.filter.clone(),
        }
    }
}

impl<T: Resource> ResourceQuery<T> {
    pub fn new(client: TableClient<T>) -> Self {
        Self { client, filter: None }
    }

    pub fn with_filter(mut self, filter: Option<Filter<T>>) -> Self {
        self.filter = filter;
        self
    }

    pub fn set_filter(&mut self, filter: Option<Filter<T>>) {
        self.filter = filter;
    }

    /// Loads the rows into `store` and returns them.
    ///
    /// A failed read leaves the store empty (state `Failed`) and queues an error
    /// notification; it is never returned as an error.
    #[instrument(skip_all, fields(table = T::TABLE))]
    pub async fn fetch_all<'s>(&self, store: &'s mut ListStore<T>, toasts: &mut Toasts) -> &'s [T] {
        store.begin_load();
        let select = Select::all()
            .with_filter(self.filter.clone())
            .order_by(T::list_order);

        match self.client.select(select).await {
            Ok(rows) => {
                debug!(count = rows.len(), "Loaded");
                store.finish_load(rows);
            }
            Err(e) => {
                store.fail_load();
                toasts.error("Erreur", format!("Impossible de charger {} : {e}", T::TABLE));
            }
        }
        store.read()
    }
}
