//! Collecta - schema-validated content collections for static sites.
//!
//! A collection is a base directory, a glob pattern and a front-matter
//! [`Schema`]. Loading it yields one [`ContentEntry`] per selected file, with
//! every declared field validated and coerced to its kind.
//!
//! ```no_run
//! use collecta::{CollectionRegistry, schema::{FieldSpec, Schema}};
//!
//! let mut registry = CollectionRegistry::new();
//! registry.define(
//!     "tin-tuc",
//!     "*.mdx",
//!     "src/content/tin-tuc",
//!     Schema::new(vec![FieldSpec::string("title").required()]),
//! )?;
//!
//! let collections = registry.get_collections()?;
//! for entry in collections.get("tin-tuc").unwrap_or_default() {
//!     println!("{}", entry.id);
//! }
//! # Ok::<(), collecta::CollectionError>(())
//! ```

pub mod build;
pub mod cli;
pub mod collection;
pub mod config;
pub mod frontmatter;
pub mod logger;
pub mod registry;
pub mod schema;
pub mod site;
pub mod store;
pub mod utils;
pub mod watch;

pub use collection::{CollectionDefinition, CollectionError, ContentEntry, ValidationError};
pub use config::{CollectaConfig, ConfigError};
pub use registry::{CollectionRegistry, Collections};
pub use schema::{FieldKind, FieldSpec, FieldValue, Schema, ValidationReason};
