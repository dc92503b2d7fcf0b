//! YAML front-matter splitting.
//!
//! A content file may start with a metadata block delimited by `---` lines:
//!
//! ```markdown
//! ---
//! title: Chuyến đi Huế
//! pubDate: 2024-01-15
//! ---
//! Body content (MDX), not interpreted here.
//! ```
//!
//! Files without a leading `---` line have no front-matter and yield an
//! empty mapping.

use crate::schema::yaml_kind;
use serde_yaml::{Mapping, Value};
use thiserror::Error;

const DELIMITER: &str = "---";
const BOM: char = '\u{feff}';

/// Front-matter that could not be turned into a mapping.
#[derive(Debug, Error)]
pub enum FrontmatterError {
    #[error("no closing `---` line")]
    Unterminated,

    #[error("{0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("expected a mapping, found {0}")]
    NotMapping(&'static str),

    #[error("file is not valid UTF-8 ({0})")]
    Encoding(#[from] std::str::Utf8Error),
}

/// A source file split into metadata and body.
#[derive(Debug, Clone, PartialEq)]
pub struct Frontmatter<'a> {
    pub data: Mapping,
    pub body: &'a str,
}

/// Split `content` into its front-matter mapping and body.
pub fn parse(content: &str) -> Result<Frontmatter<'_>, FrontmatterError> {
    let content = content.strip_prefix(BOM).unwrap_or(content);

    let mut lines = content.split_inclusive('\n');
    match lines.next() {
        Some(first) if is_delimiter(first) => {}
        _ => {
            return Ok(Frontmatter {
                data: Mapping::new(),
                body: content,
            });
        }
    }

    let yaml_start = content
        .find('\n')
        .map_or(content.len(), |pos| pos + 1);
    let mut offset = yaml_start;

    for line in lines {
        if is_delimiter(line) {
            let yaml = &content[yaml_start..offset];
            let body = &content[offset + line.len()..];
            return Ok(Frontmatter {
                data: parse_mapping(yaml)?,
                body,
            });
        }
        offset += line.len();
    }

    Err(FrontmatterError::Unterminated)
}

/// A line consisting of exactly `---` (trailing whitespace allowed).
fn is_delimiter(line: &str) -> bool {
    line.trim_end() == DELIMITER
}

fn parse_mapping(yaml: &str) -> Result<Mapping, FrontmatterError> {
    let blank = yaml.lines().all(|line| {
        let line = line.trim();
        line.is_empty() || line.starts_with('#')
    });
    if blank {
        return Ok(Mapping::new());
    }

    match serde_yaml::from_str::<Value>(yaml)? {
        Value::Mapping(mapping) => Ok(mapping),
        Value::Null => Ok(Mapping::new()),
        other => Err(FrontmatterError::NotMapping(yaml_kind(&other))),
    }
}
