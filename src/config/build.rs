//! `[build]` section configuration.
//!
//! Controls where the JSON export of the registry is written.

use super::defaults;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// `[build]` section in collecta.toml - export settings.
///
/// # Example
/// ```toml
/// [build]
/// output = "dist"    # export root, relative to the project root
/// data = "_data"     # directory under `output` holding the JSON files
/// clean = false      # remove the data directory before writing
/// ```
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    /// Project root. Set from `--root`, not usually written in the file.
    #[serde(default = "defaults::build::root")]
    #[educe(Default = defaults::build::root())]
    pub root: Option<PathBuf>,

    /// Export root directory.
    #[serde(default = "defaults::build::output")]
    #[educe(Default = defaults::build::output())]
    pub output: PathBuf,

    /// Export subdirectory under `output`.
    #[serde(default = "defaults::build::data")]
    #[educe(Default = defaults::build::data())]
    pub data: PathBuf,

    /// Remove the export directory before writing.
    #[serde(default)]
    pub clean: bool,
}
