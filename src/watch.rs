//! File system watcher for live reload.
//!
//! Monitors every collection base directory and reloads the registry
//! wholesale when a selected file changes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                      Event Loop                              │
//! │                                                              │
//! │  ┌──────────┐    ┌──────────┐    ┌────────────────────────┐  │
//! │  │ notify   │───▶│ Debouncer│───▶│    handle_changes()    │  │
//! │  │ events   │    │ (300ms)  │    │                        │  │
//! │  └──────────┘    └──────────┘    │  affected collections? │  │
//! │                                  │     │ no      │ yes    │  │
//! │                                  │     ▼         ▼        │  │
//! │                                  │ unchanged   reload()   │  │
//! │                                  │             vs store   │  │
//! │                                  │             + publish  │  │
//! │                                  └────────────────────────┘  │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! Definitions are fixed for the lifetime of the process; editing the config
//! file requires a restart.

use crate::{
    build::write_export,
    config::CollectaConfig,
    log,
    logger::WatchStatus,
    registry::{CollectionRegistry, Collections},
    store,
};
use anyhow::{Context, Result, bail};
use notify::{Event, EventKind, RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    sync::mpsc::RecvTimeoutError,
    time::{Duration, Instant},
};

// =============================================================================
// Path Utilities
// =============================================================================

/// Check if path is a temp/backup file (editor artifacts).
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Format path as relative to root for log display.
fn rel_path(path: &Path, root: &Path) -> String {
    path.strip_prefix(root).unwrap_or(path).display().to_string()
}

/// Names of the collections that select at least one of `paths`.
fn affected_collections<'a>(paths: &[PathBuf], registry: &'a CollectionRegistry) -> Vec<&'a str> {
    registry
        .definitions()
        .iter()
        .filter(|def| {
            paths.iter().any(|path| {
                path.strip_prefix(def.base())
                    .is_ok_and(|relative| def.matches(relative))
            })
        })
        .map(|def| def.name())
        .collect()
}

// =============================================================================
// Debounce State
// =============================================================================

/// Batches rapid file events until the debounce window passes quietly.
struct Debouncer {
    pending: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    window: Duration,
}

impl Debouncer {
    fn new(window: Duration) -> Self {
        Self {
            pending: FxHashSet::default(),
            last_event: None,
            window,
        }
    }

    fn add(&mut self, event: Event) {
        for path in event.paths {
            if !is_temp_file(&path) {
                self.pending.insert(path);
            }
        }
        self.last_event = Some(Instant::now());
    }

    fn ready(&self) -> bool {
        !self.pending.is_empty() && self.last_event.is_some_and(|t| t.elapsed() >= self.window)
    }

    fn take(&mut self) -> Vec<PathBuf> {
        self.last_event = None;
        let mut paths: Vec<_> = self.pending.drain().collect();
        paths.sort();
        paths
    }

    fn timeout(&self) -> Duration {
        if self.pending.is_empty() {
            Duration::from_secs(60)
        } else {
            self.window
        }
    }
}

// =============================================================================
// Event Handler
// =============================================================================

/// Names of the collections whose entries differ between two snapshots.
fn changed_collections<'a>(previous: &Collections, next: &'a Collections) -> Vec<&'a str> {
    next.iter()
        .filter(|(name, entries)| previous.get(name) != Some(*entries))
        .map(|(name, _)| name)
        .collect()
}

/// Load every collection and, if anything differs from `previous`, rewrite
/// the export. Returns `None` when the content is unchanged.
fn reload(
    registry: &CollectionRegistry,
    data_dir: &Path,
    previous: &Collections,
) -> Result<Option<Collections>> {
    let collections = registry.get_collections()?;
    if changed_collections(previous, &collections).is_empty() {
        return Ok(None);
    }
    write_export(&collections, data_dir, false)?;
    Ok(Some(collections))
}

/// Process a batch of changed paths.
///
/// The published snapshot is the baseline: only a reload that differs from
/// it is exported and published.
fn handle_changes(
    paths: &[PathBuf],
    config: &CollectaConfig,
    registry: &CollectionRegistry,
    status: &mut WatchStatus,
) {
    let root = config.get_root();

    if affected_collections(paths, registry).is_empty() {
        let names: Vec<_> = paths.iter().map(|p| rel_path(p, root)).collect();
        status.unchanged(&names.join(", "));
        return;
    }

    let previous = store::current();
    match reload(registry, &config.data_dir(), &previous) {
        Ok(Some(collections)) => {
            let changed = changed_collections(&previous, &collections).join(", ");
            let summary = format!(
                "reloaded {changed}: {} collections, {} entries",
                collections.len(),
                collections.entry_count()
            );
            store::publish(collections);
            status.success(&summary);
        }
        Ok(None) => {
            let names: Vec<_> = paths.iter().map(|p| rel_path(p, root)).collect();
            status.unchanged(&names.join(", "));
        }
        Err(e) => status.error("reload failed", &format!("{e:#}")),
    }
}

// =============================================================================
// Watcher Setup
// =============================================================================

fn setup_watchers(
    watcher: &mut impl Watcher,
    config: &CollectaConfig,
    registry: &CollectionRegistry,
) -> Result<()> {
    let root = config.get_root();
    let mut watched = Vec::new();

    for def in registry.definitions() {
        let base = def.base();
        if !base.is_dir() {
            log!("warn"; "{}: `{}` does not exist, not watching", def.name(), rel_path(base, root));
            continue;
        }

        watcher
            .watch(base, RecursiveMode::Recursive)
            .with_context(|| format!("Failed to watch {}: {}", def.name(), base.display()))?;
        watched.push(format!("{}/", rel_path(base, root)));
    }

    if watched.is_empty() {
        bail!("no collection directory to watch");
    }

    log!("watch"; "watching: {}", watched.join(", "));
    eprintln!(); // Blank line to separate init logs from change events
    Ok(())
}

const fn is_relevant(event: &Event) -> bool {
    matches!(
        event.kind,
        EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
    )
}

// =============================================================================
// Public API
// =============================================================================

/// Start blocking file watcher with debouncing and live reload.
pub fn watch_for_changes_blocking(
    config: &CollectaConfig,
    registry: &CollectionRegistry,
) -> Result<()> {
    let (tx, rx) = std::sync::mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).context("Failed to create file watcher")?;
    setup_watchers(&mut watcher, config, registry)?;

    let mut debouncer = Debouncer::new(config.watch.debounce());
    let mut status = WatchStatus::new();

    loop {
        match rx.recv_timeout(debouncer.timeout()) {
            Ok(Ok(event)) if is_relevant(&event) => debouncer.add(event),
            Ok(Err(e)) => log!("watch"; "error: {e}"),
            Err(RecvTimeoutError::Timeout) if debouncer.ready() => {
                handle_changes(&debouncer.take(), config, registry, &mut status);
            }
            Err(RecvTimeoutError::Disconnected) => break,
            // Other cases: irrelevant events, timeout without ready, etc.
            _ => {}
        }
    }

    Ok(())
}
