//! Collection loading errors.

use crate::frontmatter::FrontmatterError;
use crate::schema::{FieldError, ValidationReason};
use std::path::PathBuf;
use thiserror::Error;

/// A content file that failed validation.
///
/// `field` is `None` when the whole front-matter block was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{}: {}{}", .file.display(), field_prefix(.field.as_deref()), .reason)]
pub struct ValidationError {
    pub file: PathBuf,
    pub field: Option<String>,
    pub reason: ValidationReason,
}

impl ValidationError {
    /// Wrap a field failure with the file it came from.
    pub fn field(file: impl Into<PathBuf>, err: FieldError) -> Self {
        Self {
            file: file.into(),
            field: Some(err.field),
            reason: err.reason,
        }
    }

    /// Front-matter block that could not be parsed at all.
    pub fn malformed(file: impl Into<PathBuf>, err: &FrontmatterError) -> Self {
        Self {
            file: file.into(),
            field: None,
            reason: ValidationReason::MalformedFrontmatter(err.to_string()),
        }
    }
}

fn field_prefix(field: Option<&str>) -> String {
    field
        .map(|field| format!("field `{field}`: "))
        .unwrap_or_default()
}

/// Errors raised while defining or loading collections.
#[derive(Debug, Error)]
pub enum CollectionError {
    #[error("collection `{0}` is already defined")]
    DuplicateName(String),

    #[error("invalid glob pattern `{pattern}`")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: glob::PatternError,
    },

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("IO error when reading `{}`", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(
        "collection `{collection}`: id `{id}` is used by both `{}` and `{}`",
        .first.display(),
        .second.display()
    )]
    DuplicateId {
        collection: String,
        id: String,
        first: PathBuf,
        second: PathBuf,
    },
}
