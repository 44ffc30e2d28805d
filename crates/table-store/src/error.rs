//! # Store Errors
//!
//! Errors shared by every table and by the storage bucket.

/// Errors returned by the data store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The table task is gone (shut down, or never started). This is what an
    /// offline client sees.
    #[error("Data store unavailable")]
    Unavailable,
    #[error("Data store dropped the response")]
    Dropped,
    #[error("Row not found: {0}")]
    NotFound(String),
    #[error("Duplicate value in {table}: {key}")]
    Conflict { table: &'static str, key: String },
    #[error("Write rejected: {0}")]
    Rejected(Box<dyn std::error::Error + Send + Sync>),
    #[error("Invalid object: {0}")]
    InvalidObject(String),
}

impl StoreError {
    /// Wrap an entity hook error.
    pub fn rejected(e: impl std::error::Error + Send + Sync + 'static) -> Self {
        StoreError::Rejected(Box::new(e))
    }
}
