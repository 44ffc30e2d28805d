//! Errors raised by the data store when it rejects a row.

use super::PartnerId;
use thiserror::Error;

/// Store-side rejection of an insert or update.
///
/// These mirror the constraints a relational store would hold (not-null columns,
/// check constraints, foreign keys). The back-office only ever shows them as a
/// generic failure.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum RecordError {
    /// A required column was empty.
    #[error("{0} is required")]
    Missing(&'static str),

    /// A numeric column was negative (or not a number).
    #[error("{0} must not be negative")]
    Negative(&'static str),

    /// A numeric column is outside its allowed range.
    #[error("{field} out of range: {value}")]
    OutOfRange { field: &'static str, value: f64 },

    /// A text column does not have the expected shape (e.g. an email without `@`).
    #[error("{0} is malformed")]
    Malformed(&'static str),

    /// An end date precedes its start date.
    #[error("{0} ends before it starts")]
    DateRange(&'static str),

    /// The referenced partner does not exist.
    #[error("Unknown partner: {0}")]
    UnknownPartner(PartnerId),

    /// The partner table could not be consulted.
    #[error("Partner lookup failed: {0}")]
    PartnerLookup(String),
}

pub(crate) fn require(field: &'static str, value: &str) -> Result<(), RecordError> {
    if value.trim().is_empty() {
        Err(RecordError::Missing(field))
    } else {
        Ok(())
    }
}

pub(crate) fn non_negative(field: &'static str, value: f64) -> Result<(), RecordError> {
    if value >= 0.0 {
        Ok(())
    } else {
        Err(RecordError::Negative(field))
    }
}

pub(crate) fn within(field: &'static str, value: f64, min: f64, max: f64) -> Result<(), RecordError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(RecordError::OutOfRange { field, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_checks() {
        assert_eq!(require("title", "  "), Err(RecordError::Missing("title")));
        assert!(require("title", "Jazz").is_ok());
        assert_eq!(non_negative("price", -1.0), Err(RecordError::Negative("price")));
        assert_eq!(non_negative("price", f64::NAN), Err(RecordError::Negative("price")));
        assert!(non_negative("price", 0.0).is_ok());
        assert!(within("rating", 4.5, 0.0, 5.0).is_ok());
        assert!(within("rating", 5.5, 0.0, 5.0).is_err());
    }
}
