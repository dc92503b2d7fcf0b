//! Collection definitions and loaded content entries.
//!
//! A [`CollectionDefinition`] pairs a file-selection rule with a [`Schema`]:
//!
//! ```text
//! base/                       pattern = "*.mdx", exclude = ["README*", "_*"]
//! ├── chuyen-di-hue.mdx   ──► included
//! ├── da-lat.mdx          ──► included
//! ├── README.mdx          ──► excluded (README*)
//! ├── _draft.mdx          ──► excluded (_*)
//! ├── notes.md            ──► not matched
//! └── 2024/old.mdx        ──► not matched (`*` does not cross `/`)
//! ```
//!
//! Loading a definition yields one [`ContentEntry`] per selected file, or the
//! first error encountered. See [`load`].

mod error;
mod loader;

pub use error::{CollectionError, ValidationError};
pub use loader::load;

use crate::schema::{FieldValue, Fields, Schema};
use glob::{MatchOptions, Pattern};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Patterns excluded from every collection unless overridden.
pub const DEFAULT_EXCLUDE: &[&str] = &["README*", "_*"];

/// `*` and `?` never cross a directory boundary; use `**/` to recurse.
const MATCH_OPTIONS: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: true,
};

/// A named collection: where its files live, which ones to take, and the
/// schema their front-matter must satisfy.
#[derive(Debug, Clone)]
pub struct CollectionDefinition {
    name: String,
    base: PathBuf,
    pattern: Pattern,
    exclude: Vec<Pattern>,
    schema: Schema,
}

impl CollectionDefinition {
    /// Create a definition with the default exclude list.
    pub fn new(
        name: impl Into<String>,
        pattern: &str,
        base: impl Into<PathBuf>,
        schema: Schema,
    ) -> Result<Self, CollectionError> {
        Ok(Self {
            name: name.into(),
            base: base.into(),
            pattern: compile(pattern)?,
            exclude: DEFAULT_EXCLUDE
                .iter()
                .map(|p| compile(p))
                .collect::<Result<_, _>>()?,
            schema,
        })
    }

    /// Replace the exclude list.
    pub fn with_exclude<I, S>(mut self, patterns: I) -> Result<Self, CollectionError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.exclude = patterns
            .into_iter()
            .map(|p| compile(p.as_ref()))
            .collect::<Result<_, _>>()?;
        Ok(self)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn pattern(&self) -> &str {
        self.pattern.as_str()
    }

    pub fn exclude(&self) -> impl Iterator<Item = &str> {
        self.exclude.iter().map(Pattern::as_str)
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Whether the pattern can only match files directly inside `base`.
    pub fn is_flat(&self) -> bool {
        let pattern = self.pattern.as_str();
        !pattern.contains('/') && !pattern.contains("**")
    }

    /// Whether a path relative to `base` is selected by this definition.
    pub fn matches(&self, relative: &Path) -> bool {
        let path = relative.to_string_lossy().replace('\\', "/");
        let file_name = relative
            .file_name()
            .map(|name| name.to_string_lossy())
            .unwrap_or_default();

        self.pattern.matches_with(&path, MATCH_OPTIONS)
            && !self.exclude.iter().any(|exclude| {
                exclude.matches_with(&path, MATCH_OPTIONS)
                    || exclude.matches_with(&file_name, MATCH_OPTIONS)
            })
    }

    /// Load every matching file. Shorthand for [`load`].
    pub fn load(&self) -> Result<Vec<ContentEntry>, CollectionError> {
        load(self)
    }
}

fn compile(pattern: &str) -> Result<Pattern, CollectionError> {
    Pattern::new(pattern).map_err(|source| CollectionError::InvalidPattern {
        pattern: pattern.to_owned(),
        source,
    })
}

/// One validated content file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentEntry {
    /// `slug` from the front-matter, or the slugified relative path.
    pub id: String,
    /// Name of the owning collection.
    pub collection: String,
    /// Path relative to the collection base.
    pub file: PathBuf,
    /// BLAKE3 hex digest of the raw file.
    pub digest: String,
    /// Validated front-matter.
    pub data: Fields,
}

impl ContentEntry {
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.data.get(field)
    }
}
