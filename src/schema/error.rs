//! Validation failure reasons.

use thiserror::Error;

/// Why a front-matter block or field was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationReason {
    #[error("missing required field")]
    MissingField,

    #[error("expected {expected}, found {found}")]
    TypeMismatch {
        expected: &'static str,
        found: &'static str,
    },

    #[error("invalid date `{0}`")]
    InvalidDate(String),

    #[error("malformed front-matter: {0}")]
    MalformedFrontmatter(String),
}

/// A field that failed validation.
///
/// For array elements `field` carries the index, e.g. `tags[2]`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field `{field}`: {reason}")]
pub struct FieldError {
    pub field: String,
    pub reason: ValidationReason,
}

impl FieldError {
    pub fn new(field: impl Into<String>, reason: ValidationReason) -> Self {
        Self {
            field: field.into(),
            reason,
        }
    }
}
