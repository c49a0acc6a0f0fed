//! Field-level validation results.
//!
//! Input constructors such as [`crate::domain::UserDraft::try_from_parts`]
//! check every field and report all violations at once as
//! [`ValidationErrors`], which converts into a
//! [`crate::domain::ErrorCode::ValidationFailed`] error.

use std::fmt;

use serde::Serialize;
use serde_json::json;

use crate::domain::Error;

/// Machine-readable code attached to a field violation.
pub trait ViolationCode {
    /// Stable snake_case code, e.g. `too_short`.
    fn code(&self) -> &'static str;
}

/// One violated rule on one input field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    field: &'static str,
    code: &'static str,
    message: String,
}

impl FieldError {
    /// Build a field error from its parts.
    pub fn new(field: &'static str, code: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            code,
            message: message.into(),
        }
    }

    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        self.field
    }

    /// Stable violation code.
    pub fn code(&self) -> &'static str {
        self.code
    }

    /// Human-readable explanation.
    pub fn message(&self) -> &str {
        &self.message
    }
}

/// Ordered collection of field violations.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    /// Start an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the outcome of validating `field`.
    ///
    /// Returns the validated value on success; on failure the violation is
    /// recorded and `None` is returned.
    pub fn check<T, E>(&mut self, field: &'static str, result: Result<T, E>) -> Option<T>
    where
        E: ViolationCode + fmt::Display,
    {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                self.0.push(FieldError::new(field, err.code(), err.to_string()));
                None
            }
        }
    }

    /// True when no violations were recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Recorded violations in field order.
    pub fn errors(&self) -> &[FieldError] {
        &self.0
    }

    /// Whether `field` has at least one violation.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|error| error.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for error in &self.0 {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", error.field, error.message)?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

impl From<ValidationErrors> for Error {
    fn from(value: ValidationErrors) -> Self {
        Error::validation_failed("request validation failed")
            .with_details(json!({ "errors": value.0 }))
    }
}
