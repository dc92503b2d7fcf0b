//! Published registry snapshot with atomic replacement.
//!
//! Each load pass produces a complete [`Collections`] value. It is published
//! here as a whole, so readers see either the previous pass or the new one,
//! never a mix.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                 COLLECTIONS (ArcSwap)                       │
//! │                                                             │
//! │  ┌─────────────┐     ┌─────────────┐     ┌─────────────┐    │
//! │  │   Writer    │     │   Reader    │     │   Writer    │    │
//! │  │  (build)    │     │(watch diff) │     │  (reload)   │    │
//! │  └──────┬──────┘     └──────┬──────┘     └──────┬──────┘    │
//! │         ▼                   ▼                   ▼           │
//! │     publish()           current()           publish()       │
//! │ (atomic replace)       (lock-free)      (atomic replace)    │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use crate::registry::Collections;
use arc_swap::ArcSwap;
use std::sync::{Arc, LazyLock};

/// Global snapshot storage, empty until the first successful load.
pub static COLLECTIONS: LazyLock<ArcSwap<Collections>> =
    LazyLock::new(|| ArcSwap::from_pointee(Collections::default()));

/// Current snapshot. Wait-free; the `Arc` keeps it alive across a publish.
#[inline]
pub fn current() -> Arc<Collections> {
    COLLECTIONS.load_full()
}

/// Replace the snapshot.
///
/// Returns `false` (and keeps the old snapshot) when nothing changed.
pub fn publish(collections: Collections) -> bool {
    if *COLLECTIONS.load_full() == collections {
        return false;
    }
    COLLECTIONS.store(Arc::new(collections));
    true
}
