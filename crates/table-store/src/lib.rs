//! # Table Store
//!
//! An in-process stand-in for a hosted relational data store. Each table is a
//! **resource actor**: a Tokio task that owns its rows and answers typed requests
//! (select, get, insert, update, delete) one at a time. A storage bucket served the
//! same way holds uploaded files and hands back public URLs.
//!
//! ## Architecture Overview
//!
//! 1. **Row Layer** ([`Record`]) - the row type, its payloads and its write hooks
//! 2. **Runtime Layer** ([`TableActor`]) - message processing, id generation,
//!    uniqueness checks
//! 3. **Interface Layer** ([`TableClient`]) - typed async calls returning
//!    [`StoreError`] on failure
//!
//! Reads are described with [`Select`], which carries an optional row predicate,
//! ordering and limit.
//!
//! ## Context Injection
//!
//! Tables are created first and wired afterwards: the `Context` of a record type is
//! passed to [`TableActor::run`], so a table whose rows reference partners can be
//! handed the partner table's client and check the reference on every write.
//!
//! ## Failure
//!
//! A client whose table task has stopped gets [`StoreError::Unavailable`] for every
//! call. The [`mock`] module scripts failures without stopping anything.

pub mod actor;
pub mod bucket;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod query;
pub mod record;

pub use actor::{sequential_ids, TableActor};
pub use bucket::{BucketActor, BucketClient};
pub use client::TableClient;
pub use error::StoreError;
pub use message::{Response, TableRequest};
pub use query::{Comparator, Filter, Select};
pub use record::Record;
