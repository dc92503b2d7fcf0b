//! The site's built-in collections.
//!
//! | Key          | Content  | Base directory            | Extra fields           |
//! |--------------|----------|---------------------------|------------------------|
//! | `hanh-trinh` | journey  | `src/content/hanh-trinh`  |                        |
//! | `tin-tuc`    | news     | `src/content/tin-tuc`     | `category`, `featured` |
//!
//! Both select `*.mdx` files only, so a `README.md` next to the posts is never
//! picked up.

use crate::collection::CollectionError;
use crate::registry::CollectionRegistry;
use crate::schema::{FieldSpec, Schema};
use std::path::Path;

/// Journey ("hành trình") collection key.
pub const JOURNEY: &str = "hanh-trinh";
/// News ("tin tức") collection key.
pub const NEWS: &str = "tin-tuc";

pub const JOURNEY_BASE: &str = "src/content/hanh-trinh";
pub const NEWS_BASE: &str = "src/content/tin-tuc";

pub const CONTENT_PATTERN: &str = "*.mdx";

/// Schema for journey posts.
pub fn journey_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::string("title").required(),
        FieldSpec::string("description").required(),
        FieldSpec::date("pubDate").required(),
        FieldSpec::string("author"),
        FieldSpec::string("image"),
        FieldSpec::string("slug"),
        FieldSpec::string_array("tags"),
        FieldSpec::string_array("previewImages"),
    ])
}

/// Schema for news posts: the journey fields plus `category` and `featured`.
pub fn news_schema() -> Schema {
    Schema::new(vec![
        FieldSpec::string("title").required(),
        FieldSpec::string("description").required(),
        FieldSpec::date("pubDate").required(),
        FieldSpec::string("author"),
        FieldSpec::string("image"),
        FieldSpec::string("slug"),
        FieldSpec::string_array("tags"),
        FieldSpec::string("category"),
        FieldSpec::string_array("previewImages"),
        FieldSpec::boolean("featured"),
    ])
}

/// Registry with both site collections, base directories resolved against `root`.
pub fn site_registry(root: &Path) -> Result<CollectionRegistry, CollectionError> {
    let mut registry = CollectionRegistry::new();
    registry.define(
        JOURNEY,
        CONTENT_PATTERN,
        root.join(JOURNEY_BASE),
        journey_schema(),
    )?;
    registry.define(NEWS, CONTENT_PATTERN, root.join(NEWS_BASE), news_schema())?;
    Ok(registry)
}
