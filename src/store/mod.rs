//! Document store — the public API over the codex and manuscript trees.
//!
//! Composed from the path resolver, the id locator, and the serde codec on
//! the model types. All roots come from an explicit [`StoreConfig`]; the
//! store owns all on-disk state under them.
//!
//! Error surface, by operation class:
//! - point lookups (`get_*`): missing *or malformed* metadata is `Ok(None)`
//!   — fail closed, never crash on a hand-edited file;
//! - bulk scans (`list_*`, tree assembly): corrupt or vanished items are
//!   skipped and reported through `tracing`, never abort the response;
//! - creates: duplicate ids are a [`StoreError::Conflict`], never an
//!   overwrite;
//! - a missing paired body file is always just an empty body.

mod codex;
mod manuscript;

use std::fs;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::warn;
use uuid::Uuid;

use crate::config::StoreConfig;
use crate::locks::KeyLocks;

pub struct DocumentStore {
    codex_root: PathBuf,
    manuscript_root: PathBuf,
    locks: KeyLocks,
}

impl DocumentStore {
    /// Build a store over the configured data directory. Nothing is
    /// created up front; partitions appear on first save.
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            codex_root: config.codex_root(),
            manuscript_root: config.manuscript_root(),
            locks: KeyLocks::new(),
        }
    }

    pub fn codex_root(&self) -> &Path {
        &self.codex_root
    }

    pub fn manuscript_root(&self) -> &Path {
        &self.manuscript_root
    }

    /// 8-hex-char generated id for callers that don't supply one.
    pub(crate) fn short_id() -> String {
        Uuid::new_v4().simple().to_string()[..8].to_string()
    }
}

/// Outcome of parsing one scanned metadata file. Scans aggregate the
/// parsed set for the caller; skips carry their reason to the logs.
pub(crate) enum ScanItem<T> {
    Parsed(T),
    Skipped { path: PathBuf, reason: String },
}

/// Read and decode one metadata file. A file that vanished mid-scan or
/// fails to parse becomes a `Skipped` item, not an error.
pub(crate) fn parse_meta_file<T: DeserializeOwned>(path: &Path) -> ScanItem<T> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) => {
            return ScanItem::Skipped { path: path.to_path_buf(), reason: format!("unreadable: {e}") };
        }
    };
    match serde_json::from_str(&raw) {
        Ok(value) => ScanItem::Parsed(value),
        Err(e) => {
            ScanItem::Skipped { path: path.to_path_buf(), reason: format!("malformed metadata: {e}") }
        }
    }
}

pub(crate) fn log_skip(path: &Path, reason: &str) {
    warn!(path = %path.display(), reason, "skipped metadata file");
}
