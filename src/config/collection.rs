//! `[[collection]]` tables.
//!
//! Each table declares one collection. Field defaults are written as plain
//! TOML values and converted to the declared kind when the definition is
//! built, so a bad default is reported at startup rather than on first load.

use super::{ConfigError, defaults};
use crate::collection::CollectionDefinition;
use crate::schema::{FieldKind, FieldSpec, FieldValue, Schema};
use crate::utils::date;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// One `[[collection]]` table in collecta.toml.
///
/// # Example
/// ```toml
/// [[collection]]
/// name = "tin-tuc"
/// base = "src/content/tin-tuc"
/// pattern = "*.mdx"
/// exclude = ["README*", "_*"]
/// fields = [
///   { name = "title", type = "string", required = true },
///   { name = "featured", type = "boolean", default = false },
/// ]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectionConfig {
    pub name: String,

    /// Content directory, relative to the project root.
    pub base: PathBuf,

    #[serde(default = "defaults::collection::pattern")]
    pub pattern: String,

    #[serde(default = "defaults::collection::exclude")]
    pub exclude: Vec<String>,

    #[serde(default)]
    pub fields: Vec<FieldConfig>,
}

/// One entry of a collection's `fields` array.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldConfig {
    pub name: String,

    #[serde(rename = "type")]
    pub kind: FieldKind,

    #[serde(default)]
    pub required: bool,

    #[serde(default)]
    pub default: Option<toml::Value>,
}

impl CollectionConfig {
    /// Build the definition, resolving `base` against `root`.
    pub fn to_definition(&self, root: &Path) -> Result<CollectionDefinition, ConfigError> {
        let schema = self
            .fields
            .iter()
            .map(|field| field.to_spec(&self.name))
            .collect::<Result<Schema, _>>()?;

        let definition = CollectionDefinition::new(
            self.name.as_str(),
            &self.pattern,
            root.join(&self.base),
            schema,
        )?
        .with_exclude(&self.exclude)?;

        Ok(definition)
    }
}

impl FieldConfig {
    pub fn to_spec(&self, collection: &str) -> Result<FieldSpec, ConfigError> {
        let mut spec = FieldSpec::new(self.name.as_str(), self.kind);
        spec.required = self.required;

        if let Some(value) = &self.default {
            let value = convert_default(self.kind, value).ok_or_else(|| {
                ConfigError::Validation(format!(
                    "[[collection]] `{collection}`: default of field `{}` is not a valid {}",
                    self.name,
                    self.kind.name()
                ))
            })?;
            spec = spec.with_default(value);
        }

        Ok(spec)
    }
}

fn convert_default(kind: FieldKind, value: &toml::Value) -> Option<FieldValue> {
    match (kind, value) {
        (FieldKind::String, toml::Value::String(s)) => Some(FieldValue::String(s.clone())),
        (FieldKind::Boolean, toml::Value::Boolean(b)) => Some(FieldValue::Bool(*b)),
        (FieldKind::Date, toml::Value::String(s)) => date::parse(s).map(FieldValue::Date),
        (FieldKind::Date, toml::Value::Datetime(dt)) => {
            date::parse(&dt.to_string()).map(FieldValue::Date)
        }
        (FieldKind::Date, toml::Value::Integer(ms)) => date::from_millis(*ms).map(FieldValue::Date),
        (FieldKind::StringArray, toml::Value::Array(items)) => items
            .iter()
            .map(|item| item.as_str().map(str::to_owned))
            .collect::<Option<Vec<_>>>()
            .map(FieldValue::StringArray),
        _ => None,
    }
}
