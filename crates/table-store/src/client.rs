//! # Table Client
//!
//! The typed, cloneable handle callers use to talk to a `TableActor`.

use crate::error::StoreError;
use crate::message::TableRequest;
use crate::query::Select;
use crate::record::Record;
use tokio::sync::{mpsc, oneshot};

/// A type-safe client for one table.
///
/// Holds only the sender half of the mailbox, so clones are cheap. When every clone
/// is dropped the table shuts down; when the table is gone every call fails with
/// [`StoreError::Unavailable`].
pub struct TableClient<T: Record> {
    sender: mpsc::Sender<TableRequest<T>>,
}

impl<T: Record> Clone for TableClient<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T: Record> TableClient<T> {
    pub fn new(sender: mpsc::Sender<TableRequest<T>>) -> Self {
        Self { sender }
    }

    /// Table name this client talks to.
    pub fn table(&self) -> &'static str {
        T::TABLE
    }

    async fn request<R>(
        &self,
        build: impl FnOnce(oneshot::Sender<Result<R, StoreError>>) -> TableRequest<T>,
    ) -> Result<R, StoreError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(build(respond_to))
            .await
            .map_err(|_| StoreError::Unavailable)?;
        response.await.map_err(|_| StoreError::Dropped)?
    }

    pub async fn select(&self, query: Select<T>) -> Result<Vec<T>, StoreError> {
        self.request(|respond_to| TableRequest::Select { query, respond_to })
            .await
    }

    pub async fn get(&self, id: T::Id) -> Result<Option<T>, StoreError> {
        self.request(|respond_to| TableRequest::Get { id, respond_to })
            .await
    }

    pub async fn insert(&self, draft: T::Draft) -> Result<T, StoreError> {
        self.request(|respond_to| TableRequest::Insert { draft, respond_to })
            .await
    }

    pub async fn update(&self, id: T::Id, patch: T::Patch) -> Result<T, StoreError> {
        self.request(|respond_to| TableRequest::Update {
            id,
            patch,
            respond_to,
        })
        .await
    }

    pub async fn delete(&self, id: T::Id) -> Result<(), StoreError> {
        self.request(|respond_to| TableRequest::Delete { id, respond_to })
            .await
    }
}
