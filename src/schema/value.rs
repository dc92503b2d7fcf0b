//! Validated field values.

use super::FieldKind;
use crate::utils::date;
use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;

/// Validated front-matter of one entry, keyed by field name.
pub type Fields = BTreeMap<String, FieldValue>;

/// A front-matter value after coercion to its declared kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    String(String),
    Date(DateTime<Utc>),
    Bool(bool),
    StringArray(Vec<String>),
}

impl FieldValue {
    pub const fn kind(&self) -> FieldKind {
        match self {
            Self::String(_) => FieldKind::String,
            Self::Date(_) => FieldKind::Date,
            Self::Bool(_) => FieldKind::Boolean,
            Self::StringArray(_) => FieldKind::StringArray,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    pub const fn as_date(&self) -> Option<&DateTime<Utc>> {
        match self {
            Self::Date(dt) => Some(dt),
            _ => None,
        }
    }

    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_strings(&self) -> Option<&[String]> {
        match self {
            Self::StringArray(items) => Some(items),
            _ => None,
        }
    }
}

/// Dates serialize in canonical form (`2024-01-15T00:00:00.000Z`),
/// everything else as its natural JSON type.
impl Serialize for FieldValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::String(s) => serializer.serialize_str(s),
            Self::Date(dt) => serializer.serialize_str(&date::to_iso(dt)),
            Self::Bool(b) => serializer.serialize_bool(*b),
            Self::StringArray(items) => serializer.collect_seq(items),
        }
    }
}
