//! Project configuration management for `collecta.toml`.
//!
//! # Sections
//!
//! | Section          | Purpose                                    |
//! |------------------|--------------------------------------------|
//! | `[build]`        | Export paths (output, data dir, clean)     |
//! | `[watch]`        | File watcher settings (debounce)           |
//! | `[[collection]]` | Collection definitions and field schemas   |
//!
//! Without any `[[collection]]` table the built-in site collections
//! (`hanh-trinh` and `tin-tuc`) are used.
//!
//! # Example
//!
//! ```toml
//! [build]
//! output = "dist"
//!
//! [watch]
//! debounce_ms = 300
//!
//! [[collection]]
//! name = "hanh-trinh"
//! base = "src/content/hanh-trinh"
//! fields = [
//!   { name = "title", type = "string", required = true },
//!   { name = "pubDate", type = "date", required = true },
//! ]
//! ```

mod build;
mod collection;
pub mod defaults;
mod error;
mod watch;

pub use build::BuildConfig;
pub use collection::{CollectionConfig, FieldConfig};
pub use error::ConfigError;
pub use watch::WatchConfig;

use crate::cli::{Cli, Commands};
use crate::registry::CollectionRegistry;
use crate::site;
use educe::Educe;
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

// ============================================================================
// Root Configuration
// ============================================================================

/// Root configuration structure representing collecta.toml
#[derive(Debug, Clone, Educe, Serialize, Deserialize)]
#[educe(Default)]
#[serde(deny_unknown_fields)]
pub struct CollectaConfig {
    /// Export settings
    #[serde(default)]
    pub build: BuildConfig,

    /// File watcher settings
    #[serde(default)]
    pub watch: WatchConfig,

    /// Collection definitions
    #[serde(default, rename = "collection")]
    pub collections: Vec<CollectionConfig>,
}

impl CollectaConfig {
    /// Parse configuration from TOML string
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let config: CollectaConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load configuration from file path
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;
        Self::from_str(&content)
    }

    /// Load the config named by the CLI, falling back to defaults when the
    /// file does not exist, then apply CLI overrides.
    pub fn load(cli: &Cli) -> Result<Self, ConfigError> {
        let root = cli.root.as_deref().unwrap_or(Path::new("./"));
        let config_path = root.join(&cli.config);

        let mut config = if config_path.exists() {
            Self::from_path(&config_path)?
        } else {
            Self::default()
        };
        config.update_with_cli(cli);
        config.validate()?;

        Ok(config)
    }

    /// Get the root directory path
    pub fn get_root(&self) -> &Path {
        self.build.root.as_deref().unwrap_or(Path::new("./"))
    }

    /// Set the root directory path
    pub fn set_root(&mut self, path: &Path) {
        self.build.root = Some(path.to_path_buf())
    }

    /// Directory the JSON export is written to.
    pub fn data_dir(&self) -> PathBuf {
        self.build.output.join(&self.build.data)
    }

    /// Update configuration with CLI arguments
    pub fn update_with_cli(&mut self, cli: &Cli) {
        let root = cli
            .root
            .as_ref()
            .cloned()
            .unwrap_or_else(|| self.get_root().to_owned());
        let root = Self::normalize_path(&expand_tilde(&root));
        self.set_root(&root);

        Self::update_option(&mut self.build.output, cli.output.as_ref());
        Self::update_option(&mut self.build.clean, cli.clean().as_ref());
        self.build.output = Self::normalize_path(&root.join(expand_tilde(&self.build.output)));

        if let Commands::Watch { debounce, .. } = &cli.command {
            Self::update_option(&mut self.watch.debounce_ms, debounce.as_ref());
        }
    }

    /// Update config option if CLI value is provided
    fn update_option<T: Clone>(config_option: &mut T, cli_option: Option<&T>) {
        if let Some(option) = cli_option {
            *config_option = option.clone();
        }
    }

    /// Normalize a path to absolute, using canonicalize if the path exists
    fn normalize_path(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            // For non-existent paths, manually make them absolute
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|cwd| cwd.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Validate configuration values that serde cannot check on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.build.data.is_absolute() {
            return Err(ConfigError::Validation(
                "[build.data] must be relative to [build.output]".into(),
            ));
        }

        if self.watch.debounce_ms == 0 {
            return Err(ConfigError::Validation(
                "[watch.debounce_ms] must be greater than 0".into(),
            ));
        }

        for collection in &self.collections {
            if collection.name.trim().is_empty() {
                return Err(ConfigError::Validation(
                    "[[collection]] name must not be empty".into(),
                ));
            }
            if collection.pattern.trim().is_empty() {
                return Err(ConfigError::Validation(format!(
                    "[[collection]] `{}`: pattern must not be empty",
                    collection.name
                )));
            }
        }

        Ok(())
    }

    /// Build the collection registry described by this config.
    ///
    /// Names are checked for uniqueness before any file is read.
    pub fn registry(&self) -> Result<CollectionRegistry, ConfigError> {
        let root = self.get_root();

        if self.collections.is_empty() {
            return Ok(site::site_registry(root)?);
        }

        let mut registry = CollectionRegistry::new();
        for collection in &self.collections {
            let base = expand_tilde(&collection.base);
            let definition = CollectionConfig {
                base,
                ..collection.clone()
            }
            .to_definition(root)?;
            registry.register(definition)?;
        }
        Ok(registry)
    }
}

/// Expand a leading `~` to the home directory.
fn expand_tilde(path: &Path) -> PathBuf {
    let path_str = path.to_string_lossy();
    PathBuf::from(shellexpand::tilde(&path_str).into_owned())
}

// ============================================================================
// Tests
// ============================================================================
