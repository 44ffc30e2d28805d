//! # Record Trait
//!
//! The `Record` trait is the contract every table row type (activity, promotion,
//! partner, ...) implements so a generic [`TableActor`](crate::TableActor) can store it.
//! It names the table, the id type, the insert and update payloads, the runtime
//! context injected into hooks, and the error type the store raises when it rejects
//! a write.
//!
//! # Provided Methods (Hooks)
//! - [`Record::on_insert`] runs after the row is built and before it is stored.
//! - [`Record::on_delete`] runs before the row is removed.
//! - [`Record::unique_key`] lets the store enforce a uniqueness constraint.
//!
//! The defaults accept everything.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any row type must implement to be managed by a `TableActor`.
///
/// # Async & Context
/// Hooks are `async` so they can consult other tables (for example checking that a
/// referenced partner exists). The `Context` is handed to `run()`, not `new()`,
/// which lets tables be created first and wired together afterwards.
#[async_trait]
pub trait Record: Clone + Send + Sync + 'static {
    /// Table name, used in logs and error messages.
    const TABLE: &'static str;

    /// Primary key (e.g. `u64`, `Uuid`).
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug;

    /// Payload for an insert.
    type Draft: Clone + Send + Sync + Debug;

    /// Payload for an update. Fields left empty are not touched.
    type Patch: Send + Sync + Debug;

    /// Runtime dependencies injected into the hooks. Use `()` when there are none.
    type Context: Send + Sync;

    /// Error raised when the store rejects a write.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Primary key of this row.
    fn id(&self) -> &Self::Id;

    /// Build the stored row from a generated id, the insert payload and the
    /// insertion timestamp.
    fn from_draft(id: Self::Id, draft: Self::Draft, created_at: DateTime<Utc>) -> Result<Self, Self::Error>;

    /// Called after the row is built, before it is stored.
    async fn on_insert(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Apply an update. The store runs this against a copy of the row and only
    /// keeps the copy when the hook succeeds.
    async fn on_update(&mut self, patch: Self::Patch, ctx: &Self::Context) -> Result<(), Self::Error>;

    /// Called before the row is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Value that must be unique across the table, if any.
    fn unique_key(&self) -> Option<String> {
        None
    }
}
