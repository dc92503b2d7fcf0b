//! Entry id slugification.
//!
//! Converts content file paths into URL-safe entry ids.

use std::path::{Component, Path};

/// Convert a single path segment (or any text) to a lowercase ASCII slug.
///
/// Non-ASCII text is transliterated first, so `Hành trình` becomes
/// `hanh-trinh`. Runs of separators collapse into a single `-`.
pub fn slugify(text: &str) -> String {
    let ascii = deunicode::deunicode(text);
    let mut slug = String::with_capacity(ascii.len());
    let mut pending_dash = false;

    for c in ascii.chars() {
        if c.is_ascii_alphanumeric() || c == '_' {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Derive an entry id from a path relative to the collection base.
///
/// The extension is dropped and each directory level is slugified separately.
///
/// | Relative path              | Id                    |
/// |----------------------------|-----------------------|
/// | `hello-world.mdx`          | `hello-world`         |
/// | `2024/Chuyến đi Huế.mdx`   | `2024/chuyen-di-hue`  |
/// | `notes.v2.mdx`             | `notes-v2`            |
pub fn slugify_id(relative: &Path) -> String {
    relative
        .with_extension("")
        .components()
        .filter_map(|c| match c {
            Component::Normal(segment) => Some(slugify(&segment.to_string_lossy())),
            _ => None,
        })
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_ascii() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("already-a-slug"), "already-a-slug");
        assert_eq!(slugify("snake_case_name"), "snake_case_name");
    }

    #[test]
    fn test_slugify_collapses_separators() {
        assert_eq!(slugify("a  --  b"), "a-b");
        assert_eq!(slugify("--leading and trailing--"), "leading-and-trailing");
        assert_eq!(slugify("What? Why!"), "what-why");
    }

    #[test]
    fn test_slugify_vietnamese() {
        assert_eq!(slugify("Hành trình"), "hanh-trinh");
        assert_eq!(slugify("Tin tức"), "tin-tuc");
    }

    #[test]
    fn test_slugify_empty() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn test_slugify_id_drops_extension() {
        assert_eq!(slugify_id(Path::new("hello-world.mdx")), "hello-world");
        assert_eq!(slugify_id(Path::new("notes.v2.mdx")), "notes-v2");
    }

    #[test]
    fn test_slugify_id_nested() {
        assert_eq!(
            slugify_id(Path::new("2024/Chuyến đi Huế.mdx")),
            "2024/chuyen-di-hue"
        );
    }
}
