//! Configuration loading with env-var overrides.
//!
//! Reads `config/default.toml` relative to the current working directory,
//! then applies the `SCRIPTORIUM_DATA_DIR` env override. The resolved
//! [`StoreConfig`] is passed explicitly to the store constructor — there is
//! no process-wide path state.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;

use crate::error::StoreError;

const CODEX_SUBDIR: &str = "codex";
const MANUSCRIPT_SUBDIR: &str = "manuscript";

/// Fully-resolved store configuration.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Root directory for all persistent data (already expanded, no `~`).
    pub data_dir: PathBuf,
}

impl StoreConfig {
    /// Build a config rooted at an explicit data directory.
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    /// Root of the codex collection: `{data_dir}/codex`.
    pub fn codex_root(&self) -> PathBuf {
        self.data_dir.join(CODEX_SUBDIR)
    }

    /// Root of the manuscript tree: `{data_dir}/manuscript`.
    pub fn manuscript_root(&self) -> PathBuf {
        self.data_dir.join(MANUSCRIPT_SUBDIR)
    }
}

/// Raw TOML shape — `serde` target before resolution.
#[derive(Deserialize)]
struct RawConfig {
    store: RawStore,
}

#[derive(Deserialize)]
struct RawStore {
    data_dir: String,
}

/// Load config from `config/default.toml`, then apply env-var overrides.
pub fn load() -> Result<StoreConfig, StoreError> {
    let data_dir_override = env::var("SCRIPTORIUM_DATA_DIR").ok();
    load_from(Path::new("config/default.toml"), data_dir_override.as_deref())
}

/// Internal loader — accepts an explicit path and optional override.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(path: &Path, data_dir_override: Option<&str>) -> Result<StoreConfig, StoreError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| StoreError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| StoreError::Config(format!("parse error in {}: {e}", path.display())))?;

    let data_dir_str = data_dir_override.unwrap_or(&parsed.store.data_dir);
    Ok(StoreConfig { data_dir: expand_home(data_dir_str) })
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
