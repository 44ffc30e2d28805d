//! Starting, wiring and stopping the back-office.

pub mod back_office;
pub mod tracing;

pub use back_office::{BackOffice, HasTable, Seed};
pub use self::tracing::setup_tracing;
