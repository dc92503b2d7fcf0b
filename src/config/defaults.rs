//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn output() -> PathBuf {
        "dist".into()
    }

    pub fn data() -> PathBuf {
        "_data".into()
    }
}

// ============================================================================
// [watch] Section Defaults
// ============================================================================

pub mod watch {
    pub fn debounce_ms() -> u64 {
        300
    }
}

// ============================================================================
// [[collection]] Defaults
// ============================================================================

pub mod collection {
    use crate::collection::DEFAULT_EXCLUDE;

    pub fn pattern() -> String {
        "*.mdx".into()
    }

    pub fn exclude() -> Vec<String> {
        DEFAULT_EXCLUDE.iter().map(|p| (*p).to_owned()).collect()
    }
}
