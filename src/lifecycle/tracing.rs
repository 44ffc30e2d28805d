//! # Observability & Tracing
//!
//! [`setup_tracing`] installs structured logging for the whole back-office.
//!
//! ## Configuration
//!
//! `RUST_LOG` wins when set; otherwise the filter comes from
//! [`Config::log_filter`](crate::config::Config::log_filter) (`BACKOFFICE_LOG`).
//! The format is compact and hides the module prefix (`with_target(false)`): every
//! table event carries a `table` field instead.
//!
//! ## What Gets Traced
//!
//! - **Table Lifecycle**: start, shutdown, row count
//! - **Row Operations**: select, get, insert, update, delete with the row id
//! - **View Operations**: spans around fetches, mutations and uploads
//! - **Notifications**: every success or error shown to the user
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! BACKOFFICE_LOG=info cargo run
//!
//! # Show full drafts and patches
//! RUST_LOG=debug cargo run
//!
//! # Only the data store
//! RUST_LOG=table_store=debug cargo run
//! ```
//!
//! With `RUST_LOG=debug` a promotion toggle reads:
//!
//! ```text
//! DEBUG update{table="promotions" id=7}: update called patch=PromotionPatch { .., is_active: Some(false), .. }
//! DEBUG Update table="promotions" id=7 patch=PromotionPatch { .. }
//!  INFO Updated table="promotions" id=7
//!  INFO update{table="promotions" id=7}: Notify title="Succès" message="Promotion mis(e) à jour"
//! ```

use crate::config::Config;
use tracing_subscriber::EnvFilter;

pub fn setup_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false) // tables are named by the `table` field
        .compact()
        .init();
}
