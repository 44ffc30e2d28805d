//! # Table Server
//!
//! `TableActor<T>` owns the rows of one table and answers `TableRequest<T>` messages
//! one at a time. It plays the part of the hosted relational store: reads are
//! filtered and ordered server-side, writes go through the record hooks, and
//! uniqueness is enforced before anything is stored.

use crate::client::TableClient;
use crate::error::StoreError;
use crate::message::TableRequest;
use crate::record::Record;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// The server half of a table.
///
/// Rows live in a `HashMap` keyed by id. A separate `Vec` keeps insertion order so
/// an unordered select returns rows the way they were written.
///
/// Each table runs in its own Tokio task and processes its mailbox sequentially,
/// so the rows need no lock.
///
/// ```rust
/// use table_store::{sequential_ids, Record, Select, TableActor};
/// use async_trait::async_trait;
/// use chrono::{DateTime, Utc};
///
/// #[derive(Clone, Debug)] struct Note { id: u64, text: String }
/// #[derive(Clone, Debug)] struct NoteDraft { text: String }
/// #[derive(Debug)] struct NotePatch { text: Option<String> }
/// #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
///
/// #[async_trait]
/// impl Record for Note {
///     const TABLE: &'static str = "notes";
///     type Id = u64; type Draft = NoteDraft; type Patch = NotePatch;
///     type Context = (); type Error = NoteError;
///     fn id(&self) -> &u64 { &self.id }
///     fn from_draft(id: u64, d: NoteDraft, _: DateTime<Utc>) -> Result<Self, NoteError> {
///         Ok(Self { id, text: d.text })
///     }
///     async fn on_update(&mut self, p: NotePatch, _: &()) -> Result<(), NoteError> {
///         if let Some(text) = p.text { self.text = text; }
///         Ok(())
///     }
/// }
///
/// #[tokio::main]
/// async fn main() {
///     let (table, client) = TableActor::<Note>::new(8, sequential_ids(1));
///     tokio::spawn(table.run(()));
///     let note = client.insert(NoteDraft { text: "hello".into() }).await.unwrap();
///     assert_eq!(note.id, 1);
///     assert_eq!(client.select(Select::all()).await.unwrap().len(), 1);
/// }
/// ```
pub struct TableActor<T: Record> {
    receiver: mpsc::Receiver<TableRequest<T>>,
    rows: HashMap<T::Id, T>,
    insertion_order: Vec<T::Id>,
    next_id_fn: Box<dyn Fn() -> T::Id + Send + Sync>,
}

/// Id generator counting up from `start`.
pub fn sequential_ids(start: u64) -> impl Fn() -> u64 + Send + Sync + 'static {
    let counter = Arc::new(AtomicU64::new(start));
    move || counter.fetch_add(1, Ordering::SeqCst)
}

impl<T: Record> TableActor<T> {
    /// Creates the table and its client.
    ///
    /// * `buffer_size` - mailbox capacity; senders wait when it is full.
    /// * `next_id_fn` - called once per insert to produce the primary key.
    pub fn new(
        buffer_size: usize,
        next_id_fn: impl Fn() -> T::Id + Send + Sync + 'static,
    ) -> (Self, TableClient<T>) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let actor = Self {
            receiver,
            rows: HashMap::new(),
            insertion_order: Vec::new(),
            next_id_fn: Box::new(next_id_fn),
        };
        (actor, TableClient::new(sender))
    }

    /// Preloads existing rows before the table starts serving. Rows with an id that
    /// is already present replace the earlier one.
    pub fn seed(mut self, rows: impl IntoIterator<Item = T>) -> Self {
        for row in rows {
            self.store(row);
        }
        self
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn store(&mut self, row: T) {
        let id = row.id().clone();
        if self.rows.insert(id.clone(), row).is_none() {
            self.insertion_order.push(id);
        }
    }

    fn remove(&mut self, id: &T::Id) {
        self.rows.remove(id);
        self.insertion_order.retain(|existing| existing != id);
    }

    /// Rejects `row` when another row already holds its unique key.
    fn check_unique(&self, row: &T) -> Result<(), StoreError> {
        let Some(key) = row.unique_key() else {
            return Ok(());
        };
        let taken = self
            .rows
            .values()
            .any(|other| other.id() != row.id() && other.unique_key().as_deref() == Some(key.as_str()));
        if taken {
            Err(StoreError::Conflict { table: T::TABLE, key })
        } else {
            Ok(())
        }
    }

    async fn insert(&mut self, draft: T::Draft, context: &T::Context) -> Result<T, StoreError> {
        let id = (self.next_id_fn)();
        let mut row = T::from_draft(id, draft, Utc::now()).map_err(StoreError::rejected)?;
        row.on_insert(context).await.map_err(StoreError::rejected)?;
        self.check_unique(&row)?;
        self.store(row.clone());
        Ok(row)
    }

    async fn update(&mut self, id: &T::Id, patch: T::Patch, context: &T::Context) -> Result<T, StoreError> {
        let mut candidate = self
            .rows
            .get(id)
            .cloned()
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        candidate.on_update(patch, context).await.map_err(StoreError::rejected)?;
        self.check_unique(&candidate)?;
        self.rows.insert(id.clone(), candidate.clone());
        Ok(candidate)
    }

    async fn delete(&mut self, id: &T::Id, context: &T::Context) -> Result<(), StoreError> {
        let row = self
            .rows
            .get(id)
            .ok_or_else(|| StoreError::NotFound(id.to_string()))?;
        row.on_delete(context).await.map_err(StoreError::rejected)?;
        self.remove(id);
        Ok(())
    }

    /// Runs the table's event loop until every client is dropped.
    ///
    /// The `context` is handed to every record hook.
    pub async fn run(mut self, context: T::Context) {
        let table = T::TABLE;
        info!(table, size = self.rows.len(), "Table started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                TableRequest::Select { query, respond_to } => {
                    let rows = self
                        .insertion_order
                        .iter()
                        .filter_map(|id| self.rows.get(id));
                    let selected = query.apply(rows);
                    debug!(table, ?query, returned = selected.len(), "Select");
                    let _ = respond_to.send(Ok(selected));
                }
                TableRequest::Get { id, respond_to } => {
                    let row = self.rows.get(&id).cloned();
                    debug!(table, %id, found = row.is_some(), "Get");
                    let _ = respond_to.send(Ok(row));
                }
                TableRequest::Insert { draft, respond_to } => {
                    debug!(table, ?draft, "Insert");
                    let result = self.insert(draft, &context).await;
                    match &result {
                        Ok(row) => info!(table, id = %row.id(), size = self.rows.len(), "Inserted"),
                        Err(e) => warn!(table, error = %e, "Insert failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Update { id, patch, respond_to } => {
                    debug!(table, %id, ?patch, "Update");
                    let result = self.update(&id, patch, &context).await;
                    match &result {
                        Ok(_) => info!(table, %id, "Updated"),
                        Err(e) => warn!(table, %id, error = %e, "Update failed"),
                    }
                    let _ = respond_to.send(result);
                }
                TableRequest::Delete { id, respond_to } => {
                    debug!(table, %id, "Delete");
                    let result = self.delete(&id, &context).await;
                    match &result {
                        Ok(()) => info!(table, %id, size = self.rows.len(), "Deleted"),
                        Err(e) => warn!(table, %id, error = %e, "Delete failed"),
                    }
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(table, size = self.rows.len(), "Shutdown");
    }
}
