//! Shallow client-side validation: required text and non-negative numbers.
//!
//! Anything deeper (uniqueness, references) is left to the data store.

use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Problem {
    Required,
    Negative,
}

impl fmt::Display for Problem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Problem::Required => f.write_str("is required"),
            Problem::Negative => f.write_str("must not be negative"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field} {problem}")]
pub struct FieldError {
    pub field: &'static str,
    pub problem: Problem,
}

/// Every field that failed validation, in the order checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.0.iter().map(|e| e.field)
    }

    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

/// Collects field errors.
///
/// ```rust
/// use backoffice::resource::Validator;
///
/// let result = Validator::new()
///     .required("title", "")
///     .non_negative("price", 12.0)
///     .finish();
/// assert_eq!(result.unwrap_err().to_string(), "title is required");
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, field: &'static str, problem: Problem) {
        self.errors.push(FieldError { field, problem });
    }

    pub fn required(mut self, field: &'static str, value: &str) -> Self {
        if value.trim().is_empty() {
            self.push(field, Problem::Required);
        }
        self
    }

    /// Checks a patched text field, only when it is being set.
    pub fn required_opt(self, field: &'static str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.required(field, value),
            None => self,
        }
    }

    pub fn non_negative(mut self, field: &'static str, value: f64) -> Self {
        if !(value >= 0.0) {
            self.push(field, Problem::Negative);
        }
        self
    }

    pub fn non_negative_opt(self, field: &'static str, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.non_negative(field, value),
            None => self,
        }
    }

    pub fn finish(self) -> Result<(), ValidationErrors> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationErrors(self.errors))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_collects_every_failure() {
        let errors = Validator::new()
            .required("title", " ")
            .required("description", "ok")
            .non_negative("price", -3.0)
            .required_opt("location", None)
            .non_negative_opt("rating", Some(-0.5))
            .finish()
            .unwrap_err();

        let fields: Vec<_> = errors.fields().collect();
        assert_eq!(fields, vec!["title", "price", "rating"]);
        assert_eq!(
            errors.to_string(),
            "title is required, price must not be negative, rating must not be negative"
        );
    }

    #[test]
    fn test_patch_checks_skip_unset_fields() {
        assert!(Validator::new()
            .required_opt("title", None)
            .non_negative_opt("price", None)
            .finish()
            .is_ok());
        assert!(Validator::new()
            .required_opt("title", Some(""))
            .finish()
            .unwrap_err()
            .contains("title"));
    }
}
