//! The resource-manager layers shared by every entity screen.
//!
//! - [`query`]: read every row of a table into the view's [`ListStore`]
//! - [`mutation`]: create, update and delete, patching the store on success
//! - [`reducer`]: the pure cache patch applied after a confirmed mutation
//! - [`store`]: the per-view list cache
//! - [`access`]: partner-ownership filters
//! - [`validate`]: shallow required-field checks

pub mod access;
pub mod mutation;
pub mod query;
pub mod reducer;
pub mod store;
pub mod validate;

pub use access::*;
pub use mutation::*;
pub use query::*;
pub use reducer::*;
pub use store::*;
pub use validate::*;

use std::cmp::Ordering;
use table_store::Record;

/// A table the back-office manages.
///
/// Extends [`Record`] with what the client side needs to know about it: its display
/// name, the order its list is shown in, and the shallow checks run before a draft
/// or patch is sent.
pub trait Resource: Record {
    /// Singular name shown in notifications.
    const LABEL: &'static str;

    /// Display order of the list. Must be total (tie-break on id).
    fn list_order(a: &Self, b: &Self) -> Ordering;

    fn validate_draft(draft: &Self::Draft) -> Result<(), ValidationErrors>;

    fn validate_patch(patch: &Self::Patch) -> Result<(), ValidationErrors>;
}
