//! # Mock Tables
//!
//! [`MockTable<T>`] hands out a real [`TableClient<T>`] whose requests are answered
//! from a queue of expectations instead of a running table. It is the easiest way
//! to simulate a data store that is offline or that rejects a write.
//!
//! ```rust
//! use table_store::mock::MockTable;
//! use table_store::{Record, StoreError};
//! use async_trait::async_trait;
//! use chrono::{DateTime, Utc};
//!
//! #[derive(Clone, Debug)] struct Note { id: u64 }
//! #[derive(Clone, Debug)] struct NoteDraft;
//! #[derive(Debug)] struct NotePatch;
//! #[derive(Debug, thiserror::Error)] #[error("note error")] struct NoteError;
//!
//! #[async_trait]
//! impl Record for Note {
//!     const TABLE: &'static str = "notes";
//!     type Id = u64; type Draft = NoteDraft; type Patch = NotePatch;
//!     type Context = (); type Error = NoteError;
//!     fn id(&self) -> &u64 { &self.id }
//!     fn from_draft(id: u64, _: NoteDraft, _: DateTime<Utc>) -> Result<Self, NoteError> { Ok(Self { id }) }
//!     async fn on_update(&mut self, _: NotePatch, _: &()) -> Result<(), NoteError> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut mock = MockTable::<Note>::new();
//!     mock.expect_delete(3).return_err(StoreError::Unavailable);
//!
//!     let result = mock.client().delete(3).await;
//!     assert!(matches!(result, Err(StoreError::Unavailable)));
//!     mock.verify();
//! }
//! ```

use crate::client::TableClient;
use crate::error::StoreError;
use crate::message::TableRequest;
use crate::record::Record;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

enum Expectation<T: Record> {
    Select(Result<Vec<T>, StoreError>),
    Get(T::Id, Result<Option<T>, StoreError>),
    Insert(Result<T, StoreError>),
    Update(T::Id, Result<T, StoreError>),
    Delete(T::Id, Result<(), StoreError>),
}

type Queue<T> = Arc<Mutex<VecDeque<Expectation<T>>>>;

/// A table stand-in answering from scripted expectations, in order.
///
/// A request that does not match the next expectation (wrong operation or wrong
/// id) panics the mock task; the caller then sees [`StoreError::Dropped`].
pub struct MockTable<T: Record> {
    client: TableClient<T>,
    expectations: Queue<T>,
    _handle: tokio::task::JoinHandle<()>,
}

impl<T: Record> MockTable<T>
where
    T::Id: PartialEq,
{
    /// Creates a mock with no expectations. Must be called inside a Tokio runtime.
    pub fn new() -> Self {
        let (sender, mut receiver) = mpsc::channel::<TableRequest<T>>(100);
        let expectations: Queue<T> = Arc::new(Mutex::new(VecDeque::new()));
        let queue = expectations.clone();

        let handle = tokio::spawn(async move {
            while let Some(request) = receiver.recv().await {
                let next = queue.lock().unwrap().pop_front();
                match (request, next) {
                    (TableRequest::Select { respond_to, .. }, Some(Expectation::Select(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Get { id, respond_to }, Some(Expectation::Get(expected, response))) => {
                        assert!(id == expected, "get for unexpected id {id}");
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Insert { respond_to, .. }, Some(Expectation::Insert(response))) => {
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Update { id, respond_to, .. }, Some(Expectation::Update(expected, response))) => {
                        assert!(id == expected, "update for unexpected id {id}");
                        let _ = respond_to.send(response);
                    }
                    (TableRequest::Delete { id, respond_to }, Some(Expectation::Delete(expected, response))) => {
                        assert!(id == expected, "delete for unexpected id {id}");
                        let _ = respond_to.send(response);
                    }
                    _ => panic!("Unexpected request or expectation mismatch on {}", T::TABLE),
                }
            }
        });

        Self {
            client: TableClient::new(sender),
            expectations,
            _handle: handle,
        }
    }

    pub fn client(&self) -> TableClient<T> {
        self.client.clone()
    }

    pub fn expect_select(&mut self) -> ExpectationBuilder<T, Vec<T>> {
        self.builder(Expectation::Select)
    }

    pub fn expect_get(&mut self, id: T::Id) -> ExpectationBuilder<T, Option<T>> {
        self.builder(move |response| Expectation::Get(id, response))
    }

    pub fn expect_insert(&mut self) -> ExpectationBuilder<T, T> {
        self.builder(Expectation::Insert)
    }

    pub fn expect_update(&mut self, id: T::Id) -> ExpectationBuilder<T, T> {
        self.builder(move |response| Expectation::Update(id, response))
    }

    pub fn expect_delete(&mut self, id: T::Id) -> ExpectationBuilder<T, ()> {
        self.builder(move |response| Expectation::Delete(id, response))
    }

    fn builder<R>(
        &mut self,
        wrap: impl FnOnce(Result<R, StoreError>) -> Expectation<T> + 'static,
    ) -> ExpectationBuilder<T, R> {
        ExpectationBuilder {
            wrap: Box::new(wrap),
            expectations: self.expectations.clone(),
        }
    }

    /// Panics unless every expectation was consumed.
    pub fn verify(&self) {
        let remaining = self.expectations.lock().unwrap().len();
        if remaining > 0 {
            panic!("Not all expectations were met. {remaining} remaining");
        }
    }
}

impl<T: Record> Default for MockTable<T>
where
    T::Id: PartialEq,
{
    fn default() -> Self {
        Self::new()
    }
}

/// Sets the response of one expected request.
pub struct ExpectationBuilder<T: Record, R> {
    wrap: Box<dyn FnOnce(Result<R, StoreError>) -> Expectation<T>>,
    expectations: Queue<T>,
}

impl<T: Record, R> ExpectationBuilder<T, R> {
    pub fn return_ok(self, value: R) {
        self.push(Ok(value));
    }

    pub fn return_err(self, error: StoreError) {
        self.push(Err(error));
    }

    fn push(self, response: Result<R, StoreError>) {
        let expectation = (self.wrap)(response);
        self.expectations.lock().unwrap().push_back(expectation);
    }
}

/// Creates a client and the receiving end of its mailbox, for tests that want to
/// inspect requests by hand.
pub fn create_mock_client<T: Record>(buffer_size: usize) -> (TableClient<T>, mpsc::Receiver<TableRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    (TableClient::new(sender), receiver)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Select;
    use async_trait::async_trait;
    use chrono::{DateTime, Utc};

    #[derive(Clone, Debug, PartialEq)]
    struct Tag {
        id: u64,
        label: String,
    }

    #[derive(Clone, Debug)]
    struct TagDraft {
        label: String,
    }

    #[derive(Debug)]
    struct TagPatch;

    #[derive(Debug, thiserror::Error)]
    #[error("tag error")]
    struct TagError;

    #[async_trait]
    impl Record for Tag {
        const TABLE: &'static str = "tags";
        type Id = u64;
        type Draft = TagDraft;
        type Patch = TagPatch;
        type Context = ();
        type Error = TagError;

        fn id(&self) -> &u64 {
            &self.id
        }

        fn from_draft(id: u64, draft: TagDraft, _: DateTime<Utc>) -> Result<Self, TagError> {
            Ok(Self { id, label: draft.label })
        }

        async fn on_update(&mut self, _: TagPatch, _: &()) -> Result<(), TagError> {
            Ok(())
        }
    }

    #[tokio::test]
    async fn test_raw_mock_client() {
        let (client, mut receiver) = create_mock_client::<Tag>(4);

        let insert = tokio::spawn(async move { client.insert(TagDraft { label: "rock".into() }).await });

        match receiver.recv().await {
            Some(TableRequest::Insert { draft, respond_to }) => {
                assert_eq!(draft.label, "rock");
                respond_to
                    .send(Ok(Tag { id: 1, label: draft.label }))
                    .unwrap();
            }
            _ => panic!("Expected Insert request"),
        }

        let tag = insert.await.unwrap().unwrap();
        assert_eq!(tag.id, 1);
    }

    #[tokio::test]
    async fn test_expectations_answer_in_order() {
        let mut mock = MockTable::<Tag>::new();
        mock.expect_select().return_ok(vec![Tag { id: 1, label: "jazz".into() }]);
        mock.expect_update(1).return_err(StoreError::Unavailable);

        let client = mock.client();
        let rows = client.select(Select::all()).await.unwrap();
        assert_eq!(rows.len(), 1);

        let result = client.update(1, TagPatch).await;
        assert!(matches!(result, Err(StoreError::Unavailable)));

        mock.verify();
    }
}
