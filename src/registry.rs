//! Collection registry.
//!
//! Holds the collection definitions for a site and loads them into an
//! immutable [`Collections`] snapshot.
//!
//! ```text
//! define("hanh-trinh", ..) ─┐
//! define("tin-tuc", ..)    ─┼──► CollectionRegistry ──► get_collections()
//! define("tin-tuc", ..) ✗  ─┘    (unique names)             │
//!   DuplicateName                                         ▼
//!                                     Collections { "hanh-trinh": [..], "tin-tuc": [..] }
//! ```

use crate::collection::{CollectionDefinition, CollectionError, ContentEntry};
use crate::schema::Schema;
use rayon::prelude::*;
use serde::Serialize;
use std::{collections::BTreeMap, path::PathBuf};

/// Name-unique set of collection definitions, in registration order.
#[derive(Debug, Clone, Default)]
pub struct CollectionRegistry {
    definitions: Vec<CollectionDefinition>,
}

impl CollectionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a named collection using the default exclude list.
    ///
    /// Fails with [`CollectionError::DuplicateName`] if `name` is taken.
    pub fn define(
        &mut self,
        name: &str,
        pattern: &str,
        base: impl Into<PathBuf>,
        schema: Schema,
    ) -> Result<CollectionDefinition, CollectionError> {
        self.ensure_unique(name)?;
        let definition = CollectionDefinition::new(name, pattern, base, schema)?;
        self.definitions.push(definition.clone());
        Ok(definition)
    }

    /// Register a prebuilt definition.
    pub fn register(&mut self, definition: CollectionDefinition) -> Result<(), CollectionError> {
        self.ensure_unique(definition.name())?;
        self.definitions.push(definition);
        Ok(())
    }

    fn ensure_unique(&self, name: &str) -> Result<(), CollectionError> {
        if self.contains(name) {
            return Err(CollectionError::DuplicateName(name.to_owned()));
        }
        Ok(())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn get(&self, name: &str) -> Option<&CollectionDefinition> {
        self.definitions.iter().find(|def| def.name() == name)
    }

    pub fn definitions(&self) -> &[CollectionDefinition] {
        &self.definitions
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }

    /// Load every registered collection.
    ///
    /// Collections load in parallel; any failure fails the whole registry.
    pub fn get_collections(&self) -> Result<Collections, CollectionError> {
        let loaded = self
            .definitions
            .par_iter()
            .map(|def| def.load().map(|entries| (def.name().to_owned(), entries)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(loaded.into_iter().collect())
    }
}

/// Loaded registry: collection name to its entries.
///
/// Serializes as a JSON object keyed by collection name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Collections {
    collections: BTreeMap<String, Vec<ContentEntry>>,
}

impl Collections {
    /// Entries of one collection.
    pub fn get(&self, name: &str) -> Option<&[ContentEntry]> {
        self.collections.get(name).map(Vec::as_slice)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.collections.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[ContentEntry])> {
        self.collections
            .iter()
            .map(|(name, entries)| (name.as_str(), entries.as_slice()))
    }

    /// Number of collections.
    pub fn len(&self) -> usize {
        self.collections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }

    /// Total number of entries across all collections.
    pub fn entry_count(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl FromIterator<(String, Vec<ContentEntry>)> for Collections {
    fn from_iter<I: IntoIterator<Item = (String, Vec<ContentEntry>)>>(iter: I) -> Self {
        Self {
            collections: iter.into_iter().collect(),
        }
    }
}
