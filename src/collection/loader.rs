//! Glob loader: enumerate, parse, validate.
//!
//! # Pipeline
//!
//! ```text
//! discover()                  load_entry() (rayon, per file)
//!   walk base dir   ──►  read ──► split front-matter ──► validate ──► ContentEntry
//!   filter pattern                                                      │
//!   sort by path                                                        ▼
//!                                                         check_unique_ids()
//! ```
//!
//! Loading is fail-fast: the first invalid file fails the whole collection,
//! so a partially loaded collection is never returned.

use super::{CollectionDefinition, CollectionError, ContentEntry, ValidationError};
use crate::{frontmatter, log, schema, utils::slug::slugify_id};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use serde_yaml::Value;
use std::{
    fs,
    path::{Path, PathBuf},
};
use walkdir::WalkDir;

/// Load every file selected by `definition`, in relative path order.
///
/// A missing base directory yields an empty collection.
pub fn load(definition: &CollectionDefinition) -> Result<Vec<ContentEntry>, CollectionError> {
    let files = discover(definition)?;

    let entries = files
        .par_iter()
        .map(|relative| load_entry(definition, relative))
        .collect::<Result<Vec<_>, _>>()?;

    check_unique_ids(definition.name(), &entries)?;
    Ok(entries)
}

/// Relative paths of all files under the base directory selected by the definition.
fn discover(definition: &CollectionDefinition) -> Result<Vec<PathBuf>, CollectionError> {
    let base = definition.base();
    if !base.is_dir() {
        log!("warn"; "{}: base directory `{}` not found", definition.name(), base.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    let mut walker = WalkDir::new(base).min_depth(1);
    if definition.is_flat() {
        walker = walker.max_depth(1);
    }

    for entry in walker {
        let entry = entry.map_err(|err| CollectionError::Io {
            path: err.path().unwrap_or(base).to_path_buf(),
            source: err.into(),
        })?;

        // `is_file` follows symlinks, unlike `entry.file_type()`
        if !entry.path().is_file() {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(base) else {
            continue;
        };
        if definition.matches(relative) {
            files.push(relative.to_path_buf());
        }
    }

    files.sort();
    Ok(files)
}

/// Read and validate a single file.
fn load_entry(
    definition: &CollectionDefinition,
    relative: &Path,
) -> Result<ContentEntry, CollectionError> {
    let path = definition.base().join(relative);
    let bytes = fs::read(&path).map_err(|source| CollectionError::Io {
        path: path.clone(),
        source,
    })?;
    let content = std::str::from_utf8(&bytes)
        .map_err(|err| ValidationError::malformed(&path, &err.into()))?;

    let frontmatter =
        frontmatter::parse(content).map_err(|err| ValidationError::malformed(&path, &err))?;
    let data = schema::validate(definition.schema(), &frontmatter.data)
        .map_err(|err| ValidationError::field(&path, err))?;

    let id = match frontmatter.data.get("slug").and_then(Value::as_str) {
        Some(slug) if !slug.trim().is_empty() => slug.trim().to_owned(),
        _ => slugify_id(relative),
    };

    Ok(ContentEntry {
        id,
        collection: definition.name().to_owned(),
        file: relative.to_path_buf(),
        digest: blake3::hash(&bytes).to_hex().to_string(),
        data,
    })
}

/// Reject two entries resolving to the same id.
fn check_unique_ids(collection: &str, entries: &[ContentEntry]) -> Result<(), CollectionError> {
    let mut seen: FxHashMap<&str, &Path> = FxHashMap::default();

    for entry in entries {
        if let Some(first) = seen.insert(&entry.id, &entry.file) {
            return Err(CollectionError::DuplicateId {
                collection: collection.to_owned(),
                id: entry.id.clone(),
                first: first.to_path_buf(),
                second: entry.file.clone(),
            });
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::{FieldSpec, FieldValue, Schema, ValidationReason};
    use std::fs;
    use tempfile::TempDir;

    const VALID: &str = "---\ntitle: Hello\ndescription: First\npubDate: 2024-01-15\n---\nBody\n";

    fn schema() -> Schema {
        Schema::new(vec![
            FieldSpec::string("title").required(),
            FieldSpec::string("description").required(),
            FieldSpec::date("pubDate").required(),
            FieldSpec::string("slug"),
            FieldSpec::string_array("tags"),
        ])
    }

    fn definition(dir: &TempDir) -> CollectionDefinition {
        CollectionDefinition::new("posts", "*.mdx", dir.path(), schema()).unwrap()
    }

    fn validation_error(err: CollectionError) -> ValidationError {
        match err {
            CollectionError::Validation(err) => err,
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    fn write(dir: &TempDir, name: &str, content: &str) {
        let path = dir.path().join(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_load_one_entry_per_file() {
        let dir = TempDir::new().unwrap();
        write(&dir, "b.mdx", VALID);
        write(&dir, "a.mdx", VALID);
        write(&dir, "c.mdx", VALID);

        let entries = load(&definition(&dir)).unwrap();
        let ids: Vec<_> = entries.iter().map(|e| e.id.as_str()).collect();

        assert_eq!(ids, ["a", "b", "c"]);
        assert!(entries.iter().all(|e| e.collection == "posts"));
        assert_eq!(entries[0].file, PathBuf::from("a.mdx"));
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        assert!(load(&definition(&dir)).unwrap().is_empty());
    }

    #[test]
    fn test_load_missing_base_directory() {
        let dir = TempDir::new().unwrap();
        let def = CollectionDefinition::new("posts", "*.mdx", dir.path().join("nope"), schema())
            .unwrap();
        assert!(load(&def).unwrap().is_empty());
    }

    #[test]
    fn test_readme_never_loaded() {
        let dir = TempDir::new().unwrap();
        write(&dir, "post.mdx", VALID);
        write(&dir, "README.md", "# Readme without front-matter\n");
        write(&dir, "README.mdx", "not even valid\n");

        let entries = load(&definition(&dir)).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].id, "post");
    }

    #[test]
    fn test_nested_files_ignored_by_flat_pattern() {
        let dir = TempDir::new().unwrap();
        write(&dir, "top.mdx", VALID);
        write(&dir, "nested/deep.mdx", VALID);

        let entries = load(&definition(&dir)).unwrap();
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn test_flat_pattern_does_not_descend() {
        let dir = TempDir::new().unwrap();
        write(&dir, "top.mdx", VALID);
        write(&dir, "nested/deep.mdx", VALID);

        let def = definition(&dir);
        assert!(def.is_flat());
        assert_eq!(discover(&def).unwrap(), vec![PathBuf::from("top.mdx")]);
    }

    #[test]
    fn test_recursive_pattern_ids_keep_directories() {
        let dir = TempDir::new().unwrap();
        write(&dir, "2024/Chuyến đi Huế.mdx", VALID);

        let def = CollectionDefinition::new("posts", "**/*.mdx", dir.path(), schema()).unwrap();
        let entries = load(&def).unwrap();
        assert_eq!(entries[0].id, "2024/chuyen-di-hue");
    }

    #[test]
    fn test_missing_required_field_fails_collection() {
        let dir = TempDir::new().unwrap();
        write(&dir, "good.mdx", VALID);
        write(&dir, "bad.mdx", "---\ndescription: d\npubDate: 2024-01-15\n---\n");

        let err = validation_error(load(&definition(&dir)).unwrap_err());
        assert_eq!(err.field.as_deref(), Some("title"));
        assert_eq!(err.reason, ValidationReason::MissingField);
        assert_eq!(err.file, dir.path().join("bad.mdx"));
    }

    #[test]
    fn test_malformed_front_matter_is_distinct() {
        let dir = TempDir::new().unwrap();
        write(&dir, "broken.mdx", "---\ntitle: [oops\n---\n");

        let err = validation_error(load(&definition(&dir)).unwrap_err());
        assert_eq!(err.field, None);
        assert!(matches!(err.reason, ValidationReason::MalformedFrontmatter(_)));
    }

    #[test]
    fn test_invalid_utf8_is_a_validation_error() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join("latin1.mdx"),
            b"---\ntitle: Caf\xe9\ndescription: d\npubDate: 2024-01-15\n---\n",
        )
        .unwrap();

        let err = validation_error(load(&definition(&dir)).unwrap_err());
        assert_eq!(err.file, dir.path().join("latin1.mdx"));
        assert_eq!(err.field, None);
        assert!(matches!(
            err.reason,
            ValidationReason::MalformedFrontmatter(ref msg) if msg.contains("UTF-8")
        ));
    }

    #[test]
    fn test_file_without_front_matter_reports_missing_field() {
        let dir = TempDir::new().unwrap();
        write(&dir, "plain.mdx", "# Only a body\n");

        let err = validation_error(load(&definition(&dir)).unwrap_err());
        assert_eq!(err.reason, ValidationReason::MissingField);
    }

    #[test]
    fn test_slug_overrides_id() {
        let dir = TempDir::new().unwrap();
        write(
            &dir,
            "Some File.mdx",
            "---\ntitle: t\ndescription: d\npubDate: 2024-01-15\nslug: custom/path\n---\n",
        );

        let entries = load(&definition(&dir)).unwrap();
        assert_eq!(entries[0].id, "custom/path");
        assert_eq!(
            entries[0].get("slug"),
            Some(&FieldValue::String("custom/path".into()))
        );
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.mdx", VALID);
        write(
            &dir,
            "b.mdx",
            "---\ntitle: t\ndescription: d\npubDate: 2024-01-15\nslug: a\n---\n",
        );

        let err = load(&definition(&dir)).unwrap_err();
        assert!(matches!(
            err,
            CollectionError::DuplicateId { ref id, .. } if id == "a"
        ));
    }

    #[test]
    fn test_digest_tracks_content() {
        let dir = TempDir::new().unwrap();
        write(&dir, "a.mdx", VALID);
        let before = load(&definition(&dir)).unwrap()[0].digest.clone();

        write(&dir, "a.mdx", &format!("{VALID}more body\n"));
        let after = load(&definition(&dir)).unwrap()[0].digest.clone();

        assert_eq!(before.len(), 64);
        assert_ne!(before, after);
    }

    #[test]
    fn test_same_file_name_in_two_bases() {
        let journey = TempDir::new().unwrap();
        let news = TempDir::new().unwrap();
        write(&journey, "hello.mdx", VALID);
        write(&news, "hello.mdx", VALID);

        let a = CollectionDefinition::new("journey", "*.mdx", journey.path(), schema()).unwrap();
        let b = CollectionDefinition::new("news", "*.mdx", news.path(), schema()).unwrap();

        let a = load(&a).unwrap();
        let b = load(&b).unwrap();
        assert_eq!(a[0].id, b[0].id);
        assert_eq!(a[0].collection, "journey");
        assert_eq!(b[0].collection, "news");
    }
}
