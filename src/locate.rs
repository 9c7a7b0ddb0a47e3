//! Id-based lookup across an unindexed directory tree.
//!
//! Callers hold a bare id with no knowledge of the type/region partition
//! it lives in; the locator walks the subtree for a metadata file whose
//! stem equals the id. Traversal is sorted by file name so the first match
//! is deterministic — although duplicate ids cannot arise through the
//! store's own create path, which checks the whole tree first.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::paths::META_EXT;

/// Find the metadata file for `id` under `root`.
///
/// Returns `None` when the subtree does not exist or holds no match;
/// unreadable directory entries are skipped, not errors.
pub fn find_by_id(root: &Path, id: &str) -> Option<PathBuf> {
    if !root.is_dir() {
        return None;
    }
    WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_map(Result::ok)
        .find(|entry| {
            entry.file_type().is_file()
                && entry.path().extension().is_some_and(|ext| ext == META_EXT)
                && entry.path().file_stem().is_some_and(|stem| stem == id)
        })
        .map(|entry| entry.into_path())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn touch(path: &Path) {
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, "{}").unwrap();
    }

    #[test]
    fn missing_root_is_none() {
        assert_eq!(find_by_id(Path::new("/nonexistent/codex"), "x"), None);
    }

    #[test]
    fn finds_nested_file() {
        let tmp = TempDir::new().unwrap();
        let target = tmp.path().join("character/north/mara.json");
        touch(&target);
        touch(&tmp.path().join("lore/origin.json"));

        assert_eq!(find_by_id(tmp.path(), "mara"), Some(target));
        assert_eq!(find_by_id(tmp.path(), "absent"), None);
    }

    #[test]
    fn matches_metadata_extension_only() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("lore/origin.md"));
        assert_eq!(find_by_id(tmp.path(), "origin"), None);

        let meta = tmp.path().join("lore/origin.json");
        touch(&meta);
        assert_eq!(find_by_id(tmp.path(), "origin"), Some(meta));
    }

    #[test]
    fn duplicate_ids_resolve_in_sorted_order() {
        let tmp = TempDir::new().unwrap();
        touch(&tmp.path().join("other/dup.json"));
        let first = tmp.path().join("lore/dup.json");
        touch(&first);

        // "lore" sorts before "other".
        assert_eq!(find_by_id(tmp.path(), "dup"), Some(first));
    }
}
