//! Codex CRUD and search.

use chrono::Utc;
use tracing::{debug, info};
use walkdir::WalkDir;

use crate::error::StoreError;
use crate::fsio;
use crate::locate::find_by_id;
use crate::locks::hold;
use crate::model::{CodexDraft, CodexEntry, CodexEntryWithBody, CodexType};
use crate::paths::{self, META_EXT};

use super::{log_skip, parse_meta_file, DocumentStore, ScanItem};

impl DocumentStore {
    /// List codex entries, optionally restricted to one type partition.
    /// Metadata only — bodies are not read. Corrupt files are skipped.
    pub fn list_codex_entries(
        &self,
        type_filter: Option<CodexType>,
    ) -> Result<Vec<CodexEntry>, StoreError> {
        let root = match type_filter {
            Some(entry_type) => self.codex_root.join(entry_type.as_str()),
            None => self.codex_root.clone(),
        };
        if !root.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = Vec::new();
        for item in WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_map(Result::ok)
            .filter(|e| {
                e.file_type().is_file() && e.path().extension().is_some_and(|ext| ext == META_EXT)
            })
        {
            match parse_meta_file::<CodexEntry>(item.path()) {
                ScanItem::Parsed(entry) => entries.push(entry),
                ScanItem::Skipped { path, reason } => log_skip(&path, &reason),
            }
        }
        debug!(count = entries.len(), root = %root.display(), "listed codex entries");
        Ok(entries)
    }

    /// Fetch one entry by bare id, wherever it lives in the tree, together
    /// with its body. Missing or malformed metadata is `Ok(None)`.
    pub fn get_codex_entry(&self, id: &str) -> Result<Option<CodexEntryWithBody>, StoreError> {
        let Some(meta_path) = find_by_id(&self.codex_root, id) else {
            return Ok(None);
        };
        let entry = match parse_meta_file::<CodexEntry>(&meta_path) {
            ScanItem::Parsed(entry) => entry,
            ScanItem::Skipped { path, reason } => {
                log_skip(&path, &reason);
                return Ok(None);
            }
        };
        let body = fsio::read_body(&paths::body_for(&meta_path))?;
        Ok(Some(CodexEntryWithBody { entry, body }))
    }

    /// Upsert an entry: the partition is recomputed from the current
    /// type/region, `modified` is set to now, and metadata then body are
    /// written. If the entry previously lived in a different partition the
    /// stale pair is removed, so a save is a single logical move.
    pub fn save_codex_entry(
        &self,
        mut entry: CodexEntry,
        body: &str,
    ) -> Result<CodexEntry, StoreError> {
        let lock = self.locks.get(&format!("codex:{}", entry.id));
        let _guard = hold(&lock);

        entry.modified = Utc::now();
        self.write_codex_pair(&entry, body)?;
        Ok(entry)
    }

    /// Create a new entry, generating an id when the draft has none.
    /// Fails with [`StoreError::Conflict`] if the id already exists
    /// anywhere in the codex tree — ids are globally unique regardless of
    /// partition, because lookup-by-id does not disambiguate by type.
    pub fn create_codex_entry(
        &self,
        draft: CodexDraft,
        body: &str,
    ) -> Result<CodexEntryWithBody, StoreError> {
        let id = draft.id.clone().unwrap_or_else(Self::short_id);
        let lock = self.locks.get(&format!("codex:{id}"));
        let _guard = hold(&lock);

        if find_by_id(&self.codex_root, &id).is_some() {
            return Err(StoreError::Conflict(format!("codex entry '{id}' already exists")));
        }

        let now = Utc::now();
        let entry = CodexEntry {
            id,
            entry_type: draft.entry_type,
            name: draft.name,
            aliases: draft.aliases,
            tags: draft.tags,
            global_entry: draft.global_entry,
            region: draft.region,
            relations: draft.relations,
            created: now,
            modified: now,
        };
        self.write_codex_pair(&entry, body)?;
        Ok(CodexEntryWithBody { entry, body: body.to_string() })
    }

    /// Delete an entry by id. The paired body file is removed too when
    /// present. Returns whether the metadata existed.
    pub fn delete_codex_entry(&self, id: &str) -> Result<bool, StoreError> {
        let lock = self.locks.get(&format!("codex:{id}"));
        let _guard = hold(&lock);

        let Some(meta_path) = find_by_id(&self.codex_root, id) else {
            return Ok(false);
        };
        fsio::remove_if_exists(&meta_path)?;
        fsio::remove_if_exists(&paths::body_for(&meta_path))?;
        info!(id, "codex entry deleted");
        Ok(true)
    }

    /// Case-insensitive substring search over name, aliases, tags, and
    /// body text. A linear scan over the listing — no index.
    pub fn search_codex(&self, query: &str) -> Result<Vec<CodexEntry>, StoreError> {
        let needle = query.to_lowercase();
        let mut results = Vec::new();

        for entry in self.list_codex_entries(None)? {
            let in_meta = entry.name.to_lowercase().contains(&needle)
                || entry.aliases.iter().any(|a| a.to_lowercase().contains(&needle))
                || entry.tags.iter().any(|t| t.to_lowercase().contains(&needle));
            if in_meta {
                results.push(entry);
                continue;
            }
            // Fall back to the body, which requires the full fetch.
            if let Some(full) = self.get_codex_entry(&entry.id)? {
                if full.body.to_lowercase().contains(&needle) {
                    results.push(entry);
                }
            }
        }
        Ok(results)
    }

    /// Write the metadata + body pair into the entry's current partition,
    /// then clean up the pair at any previous location. Caller holds the
    /// entry's lock.
    fn write_codex_pair(&self, entry: &CodexEntry, body: &str) -> Result<(), StoreError> {
        let previous = find_by_id(&self.codex_root, &entry.id);
        let target =
            paths::codex_entry(&self.codex_root, entry.entry_type, entry.region.as_deref(), &entry.id);

        let meta_json = serde_json::to_string_pretty(entry)?;
        fsio::write_atomic(&target.meta, &meta_json)?;
        fsio::write_atomic(&target.body, body)?;

        if let Some(old_meta) = previous {
            if old_meta != target.meta {
                fsio::remove_if_exists(&old_meta)?;
                fsio::remove_if_exists(&paths::body_for(&old_meta))?;
                info!(
                    id = %entry.id,
                    from = %old_meta.display(),
                    to = %target.meta.display(),
                    "codex entry moved partitions"
                );
            }
        }
        info!(id = %entry.id, "codex entry saved");
        Ok(())
    }
}
