//! Declarative front-matter schemas.
//!
//! A [`Schema`] is plain data: an ordered list of [`FieldSpec`]s interpreted by
//! the generic [`validate`] function. Adding a field to a collection means
//! adding one entry to its schema, never a new validation branch.
//!
//! # Field Kinds
//!
//! | Kind           | Accepted front-matter                         | Value                      |
//! |----------------|-----------------------------------------------|----------------------------|
//! | `string`       | YAML string                                   | [`FieldValue::String`]     |
//! | `date`         | date/time string, or epoch milliseconds       | [`FieldValue::Date`] (UTC) |
//! | `boolean`      | YAML boolean                                  | [`FieldValue::Bool`]       |
//! | `string-array` | YAML sequence of strings (may be empty)       | [`FieldValue::StringArray`]|
//!
//! # Example
//!
//! ```
//! use collecta::schema::{FieldSpec, Schema};
//!
//! let schema = Schema::new(vec![
//!     FieldSpec::string("title").required(),
//!     FieldSpec::date("pubDate").required(),
//!     FieldSpec::string_array("tags"),
//! ]);
//! assert_eq!(schema.len(), 3);
//! ```

mod error;
mod validate;
mod value;

pub use error::{FieldError, ValidationReason};
pub use validate::validate;
pub(crate) use validate::yaml_kind;
pub use value::{FieldValue, Fields};

use serde::{Deserialize, Serialize};

/// The type a front-matter field is coerced to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FieldKind {
    String,
    Date,
    Boolean,
    StringArray,
}

impl FieldKind {
    /// Name used in error messages and config files.
    pub const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Date => "date",
            Self::Boolean => "boolean",
            Self::StringArray => "string-array",
        }
    }
}

/// Specification of a single front-matter field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Inserted when the field is absent. Satisfies `required`.
    pub default: Option<FieldValue>,
}

impl FieldSpec {
    /// Optional field of the given kind.
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            required: false,
            default: None,
        }
    }

    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::String)
    }

    pub fn date(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Date)
    }

    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::Boolean)
    }

    pub fn string_array(name: impl Into<String>) -> Self {
        Self::new(name, FieldKind::StringArray)
    }

    /// Mark the field as required.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Value used when the field is absent from the source file.
    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default = Some(value);
        self
    }
}

/// Ordered set of field specs for one collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Schema {
    fields: Vec<FieldSpec>,
}

impl Schema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    /// Look up a field spec by name.
    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|spec| spec.name == name)
    }

    /// Append a field, returning the extended schema.
    pub fn with(mut self, field: FieldSpec) -> Self {
        self.fields.push(field);
        self
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl FromIterator<FieldSpec> for Schema {
    fn from_iter<I: IntoIterator<Item = FieldSpec>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
