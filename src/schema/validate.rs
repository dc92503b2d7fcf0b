//! Generic front-matter validator.
//!
//! Walks the schema in declaration order. For each field:
//! 1. absent: insert the default if any, else fail when required
//! 2. present: coerce to the declared kind or fail with a type mismatch
//!
//! Keys not named by the schema are ignored.

use super::{FieldError, FieldKind, FieldSpec, FieldValue, Fields, Schema, ValidationReason};
use crate::utils::date;
use serde_yaml::{Mapping, Value};

/// Validate a parsed front-matter mapping against a schema.
///
/// Returns the first failing field; later fields are not inspected.
pub fn validate(schema: &Schema, data: &Mapping) -> Result<Fields, FieldError> {
    let mut fields = Fields::new();

    for spec in schema.fields() {
        match data.get(spec.name.as_str()) {
            Some(raw) => {
                fields.insert(spec.name.clone(), coerce(spec, raw)?);
            }
            None => match (&spec.default, spec.required) {
                (Some(default), _) => {
                    fields.insert(spec.name.clone(), default.clone());
                }
                (None, true) => {
                    return Err(FieldError::new(&spec.name, ValidationReason::MissingField));
                }
                (None, false) => {}
            },
        }
    }

    Ok(fields)
}

/// Coerce one raw YAML value to the kind declared by `spec`.
fn coerce(spec: &FieldSpec, raw: &Value) -> Result<FieldValue, FieldError> {
    match (spec.kind, raw) {
        (FieldKind::String, Value::String(s)) => Ok(FieldValue::String(s.clone())),
        (FieldKind::Boolean, Value::Bool(b)) => Ok(FieldValue::Bool(*b)),
        (FieldKind::Date, Value::String(s)) => date::parse(s)
            .map(FieldValue::Date)
            .ok_or_else(|| FieldError::new(&spec.name, ValidationReason::InvalidDate(s.clone()))),
        (FieldKind::Date, Value::Number(n)) => n
            .as_i64()
            .and_then(date::from_millis)
            .map(FieldValue::Date)
            .ok_or_else(|| {
                FieldError::new(&spec.name, ValidationReason::InvalidDate(n.to_string()))
            }),
        (FieldKind::StringArray, Value::Sequence(items)) => items
            .iter()
            .enumerate()
            .map(|(index, item)| match item {
                Value::String(s) => Ok(s.clone()),
                other => Err(FieldError::new(
                    format!("{}[{index}]", spec.name),
                    mismatch(FieldKind::String, other),
                )),
            })
            .collect::<Result<Vec<_>, _>>()
            .map(FieldValue::StringArray),
        (kind, other) => Err(FieldError::new(&spec.name, mismatch(kind, other))),
    }
}

fn mismatch(expected: FieldKind, found: &Value) -> ValidationReason {
    ValidationReason::TypeMismatch {
        expected: expected.name(),
        found: yaml_kind(found),
    }
}

/// Human-readable name of a YAML value's type.
pub(crate) const fn yaml_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Sequence(_) => "array",
        Value::Mapping(_) => "mapping",
        Value::Tagged(_) => "tagged value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mapping(yaml: &str) -> Mapping {
        serde_yaml::from_str(yaml).unwrap()
    }

    fn post_schema() -> Schema {
        Schema::new(vec![
            FieldSpec::string("title").required(),
            FieldSpec::string("description").required(),
            FieldSpec::date("pubDate").required(),
            FieldSpec::string("author"),
            FieldSpec::string_array("tags"),
            FieldSpec::boolean("featured"),
        ])
    }

    #[test]
    fn test_valid_front_matter() {
        let data = mapping(
            r#"
title: Hello
description: First post
pubDate: 2024-01-15
author: Lan
tags: [travel, hue]
featured: true
"#,
        );
        let fields = validate(&post_schema(), &data).unwrap();

        assert_eq!(fields["title"].as_str(), Some("Hello"));
        assert_eq!(
            fields["pubDate"].as_date().map(date::to_iso).as_deref(),
            Some("2024-01-15T00:00:00.000Z")
        );
        assert_eq!(
            fields["tags"].as_strings(),
            Some(&["travel".to_string(), "hue".to_string()][..])
        );
        assert_eq!(fields["featured"].as_bool(), Some(true));
    }

    #[test]
    fn test_missing_required_field() {
        let data = mapping("description: d\npubDate: 2024-01-15\n");
        let err = validate(&post_schema(), &data).unwrap_err();

        assert_eq!(err.field, "title");
        assert_eq!(err.reason, ValidationReason::MissingField);
    }

    #[test]
    fn test_optional_absent_is_omitted() {
        let data = mapping("title: t\ndescription: d\npubDate: 2024-01-15\n");
        let fields = validate(&post_schema(), &data).unwrap();

        assert!(!fields.contains_key("author"));
        assert!(!fields.contains_key("tags"));
        assert!(!fields.contains_key("featured"));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn test_empty_array_is_kept() {
        let data = mapping("title: t\ndescription: d\npubDate: 2024-01-15\ntags: []\n");
        let fields = validate(&post_schema(), &data).unwrap();

        assert_eq!(fields["tags"], FieldValue::StringArray(vec![]));
    }

    #[test]
    fn test_array_element_mismatch_names_index() {
        let data = mapping("title: t\ndescription: d\npubDate: 2024-01-15\ntags: [a, 2]\n");
        let err = validate(&post_schema(), &data).unwrap_err();

        assert_eq!(err.field, "tags[1]");
        assert_eq!(
            err.reason,
            ValidationReason::TypeMismatch {
                expected: "string",
                found: "number"
            }
        );
    }

    #[test]
    fn test_type_mismatch() {
        let data = mapping("title: [not, a, string]\ndescription: d\npubDate: 2024-01-15\n");
        let err = validate(&post_schema(), &data).unwrap_err();

        assert_eq!(err.field, "title");
        assert_eq!(
            err.reason,
            ValidationReason::TypeMismatch {
                expected: "string",
                found: "array"
            }
        );
    }

    #[test]
    fn test_boolean_does_not_accept_strings() {
        let data = mapping("title: t\ndescription: d\npubDate: 2024-01-15\nfeatured: \"yes\"\n");
        let err = validate(&post_schema(), &data).unwrap_err();
        assert_eq!(err.field, "featured");
    }

    #[test]
    fn test_null_is_a_mismatch() {
        let data = mapping("title: t\ndescription: d\npubDate: 2024-01-15\nauthor:\n");
        let err = validate(&post_schema(), &data).unwrap_err();

        assert_eq!(err.field, "author");
        assert_eq!(
            err.reason,
            ValidationReason::TypeMismatch {
                expected: "string",
                found: "null"
            }
        );
    }

    #[test]
    fn test_invalid_date() {
        let data = mapping("title: t\ndescription: d\npubDate: someday\n");
        let err = validate(&post_schema(), &data).unwrap_err();

        assert_eq!(err.field, "pubDate");
        assert_eq!(err.reason, ValidationReason::InvalidDate("someday".into()));
    }

    #[test]
    fn test_date_from_epoch_millis() {
        let data = mapping("title: t\ndescription: d\npubDate: 1705276800000\n");
        let fields = validate(&post_schema(), &data).unwrap();

        let pub_date = fields["pubDate"].as_date().unwrap();
        assert_eq!(date::to_iso(pub_date), "2024-01-15T00:00:00.000Z");
    }

    #[test]
    fn test_date_rejects_boolean() {
        let data = mapping("title: t\ndescription: d\npubDate: true\n");
        let err = validate(&post_schema(), &data).unwrap_err();
        assert!(matches!(err.reason, ValidationReason::TypeMismatch { expected: "date", .. }));
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let data = mapping("title: t\ndescription: d\npubDate: 2024-01-15\nextra: x\n");
        let fields = validate(&post_schema(), &data).unwrap();
        assert!(!fields.contains_key("extra"));
    }

    #[test]
    fn test_default_inserted_only_when_absent() {
        let schema = Schema::new(vec![
            FieldSpec::boolean("featured").with_default(FieldValue::Bool(false)),
        ]);

        let fields = validate(&schema, &Mapping::new()).unwrap();
        assert_eq!(fields["featured"], FieldValue::Bool(false));

        let fields = validate(&schema, &mapping("featured: true\n")).unwrap();
        assert_eq!(fields["featured"], FieldValue::Bool(true));
    }

    #[test]
    fn test_default_satisfies_required() {
        let schema = Schema::new(vec![
            FieldSpec::string("author")
                .required()
                .with_default(FieldValue::String("staff".into())),
        ]);
        let fields = validate(&schema, &Mapping::new()).unwrap();
        assert_eq!(fields["author"].as_str(), Some("staff"));
    }

    #[test]
    fn test_yaml_kind_names() {
        assert_eq!(yaml_kind(&Value::Null), "null");
        assert_eq!(yaml_kind(&Value::Bool(true)), "boolean");
        assert_eq!(yaml_kind(&Value::String(String::new())), "string");
        assert_eq!(yaml_kind(&Value::Sequence(vec![])), "array");
        assert_eq!(yaml_kind(&Value::Mapping(Mapping::new())), "mapping");
    }
}
