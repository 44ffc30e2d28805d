#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Back-office
//!
//! > **Resource managers for a leisure and tourism site.**
//!
//! Every screen of the back-office (activities, bons plans, car rentals, concerts,
//! leisure, newsletter, nightlife, partners, promotions, travel offers, mediums) is
//! the same composition:
//!
//! - a **query layer** reading one table,
//! - a **mutation layer** writing it and patching the cached list,
//! - a **form** editing a draft,
//! - a **table view** rendering rows with badges and thumbnails.
//!
//! ## 🏗️ Design
//!
//! ### One generic screen
//! [`ResourcePage<T>`](ui::ResourcePage) is written once and works for any entity that
//! implements [`Record`](table_store::Record), [`Resource`](resource::Resource),
//! [`FormModel`](ui::FormModel) and [`Presentable`](ui::Presentable).
//!
//! ### Patch, don't refetch
//! After a confirmed mutation the page's [`ListStore`](resource::ListStore) is patched
//! by the pure [`reduce`](resource::reduce) function. A failed mutation leaves it
//! untouched and queues an error notification.
//!
//! ### The data store is an actor
//! Each table is served by a `table_store::TableActor` in its own Tokio task. The
//! store enforces what a relational database would: required columns, partner
//! references, unique emails and promotion codes.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: the eleven entities, their drafts, patches and store-side checks
//! - [`resource`]: query, mutation, reducer, list store, access scope, validation
//! - [`ui`]: page, form, delete confirmation, display rows, notifications
//! - [`gallery`]: image lists whose first element is the primary image
//! - [`lifecycle`]: [`BackOffice`](lifecycle::BackOffice) start/shutdown and tracing
//! - [`config`]: environment configuration
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! BACKOFFICE_LOG=info cargo run
//! cargo test
//! ```

pub mod config;
pub mod gallery;
pub mod lifecycle;
pub mod model;
pub mod resource;
pub mod ui;
pub mod upload;
