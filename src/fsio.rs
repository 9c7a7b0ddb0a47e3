//! Low-level file I/O helpers shared by the store.
//!
//! Every write goes through a temp file in the destination directory
//! followed by an atomic rename, so a concurrent reader never observes a
//! half-written metadata or body file.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use tempfile::NamedTempFile;

use crate::error::StoreError;

/// Write `data` to `path` atomically (temp file + rename).
/// Creates the parent directory if absent.
pub fn write_atomic(path: &Path, data: &str) -> Result<(), StoreError> {
    let dir = path.parent().ok_or_else(|| {
        StoreError::Io(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("no parent directory for {}", path.display()),
        ))
    })?;
    fs::create_dir_all(dir)?;

    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(data.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| StoreError::Io(e.error))?;
    Ok(())
}

/// Read a file to a string, mapping "does not exist" to `None`.
pub fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match fs::read_to_string(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Read a paired body file; a missing file degrades to an empty body.
pub fn read_body(path: &Path) -> Result<String, StoreError> {
    Ok(read_optional(path)?.unwrap_or_default())
}

/// Remove a file if it exists. Returns whether it existed.
pub fn remove_if_exists(path: &Path) -> Result<bool, StoreError> {
    match fs::remove_file(path) {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e.into()),
    }
}
