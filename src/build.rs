//! Registry loading and JSON export.
//!
//! # Architecture
//!
//! ```text
//! build_collections()
//!     │
//!     ├── load_collections() ──► CollectionRegistry::get_collections()
//!     │                          (parallel, fail-fast)
//!     │
//!     └── write_export()     ──► <output>/<data>/collections.json
//!                                <output>/<data>/<name>.json (one per collection)
//! ```

use crate::{
    config::CollectaConfig,
    log,
    registry::{CollectionRegistry, Collections},
};
use anyhow::{Context, Result};
use std::{fs, path::Path};

/// File holding the whole registry, keyed by collection name.
pub const REGISTRY_FILE: &str = "collections.json";

/// Load every collection and log its entry count.
pub fn load_collections(registry: &CollectionRegistry) -> Result<Collections> {
    let collections = registry.get_collections()?;

    for (name, entries) in collections.iter() {
        log!("load"; "{}: {} entries", name, entries.len());
    }

    Ok(collections)
}

/// Load every collection and write the JSON export.
///
/// If `config.build.clean` is true, the data directory is removed first.
pub fn build_collections(
    config: &CollectaConfig,
    registry: &CollectionRegistry,
) -> Result<Collections> {
    let collections = load_collections(registry)?;
    write_export(&collections, &config.data_dir(), config.build.clean)?;

    log!(
        "build";
        "done: {} collections, {} entries",
        collections.len(),
        collections.entry_count()
    );

    Ok(collections)
}

/// Write `collections.json` and one `<name>.json` per collection to `data_dir`.
pub fn write_export(collections: &Collections, data_dir: &Path, clean: bool) -> Result<()> {
    if clean && data_dir.exists() {
        fs::remove_dir_all(data_dir).with_context(|| {
            format!("Failed to clear data directory: {}", data_dir.display())
        })?;
    }
    fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;

    let registry_path = data_dir.join(REGISTRY_FILE);
    fs::write(&registry_path, collections.to_json()?)
        .with_context(|| format!("Failed to write {}", registry_path.display()))?;

    for (name, entries) in collections.iter() {
        let path = data_dir.join(format!("{name}.json"));
        let json = serde_json::to_string_pretty(entries)?;
        fs::write(&path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    }

    Ok(())
}
