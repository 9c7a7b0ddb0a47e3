//! Pure mapping from logical coordinates to filesystem paths.
//!
//! Nothing here touches the filesystem: resolution is deterministic given
//! the coordinates and never fails — a resolved path may simply not exist
//! yet.
//!
//! ```text
//! {codex_root}/{type}/[{region}/]{id}.json    codex metadata
//! {codex_root}/{type}/[{region}/]{id}.md      codex body
//! {manuscript_root}/{book}/{act}/{chapter}/meta.json       chapter metadata
//! {manuscript_root}/{book}/{act}/{chapter}/{scene}.json    scene metadata
//! {manuscript_root}/{book}/{act}/{chapter}/{scene}.md      scene body
//! ```

use std::path::{Path, PathBuf};

use crate::model::CodexType;

/// Reserved chapter-metadata filename. Scene enumeration excludes it by
/// name, so no scene id may be `meta`.
pub const CHAPTER_META: &str = "meta.json";

pub const META_EXT: &str = "json";
pub const BODY_EXT: &str = "md";

/// Paired file locations of one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocPaths {
    pub meta: PathBuf,
    pub body: PathBuf,
}

/// Partition directory for a codex entry: `{root}/{type}` with an optional
/// `{region}` level for types that partition by region.
pub fn codex_partition(codex_root: &Path, entry_type: CodexType, region: Option<&str>) -> PathBuf {
    let mut dir = codex_root.join(entry_type.as_str());
    if entry_type.has_regions() {
        if let Some(region) = region {
            dir.push(region);
        }
    }
    dir
}

/// Metadata + body paths of a codex entry inside its partition.
pub fn codex_entry(
    codex_root: &Path,
    entry_type: CodexType,
    region: Option<&str>,
    id: &str,
) -> DocPaths {
    let dir = codex_partition(codex_root, entry_type, region);
    DocPaths {
        meta: dir.join(format!("{id}.{META_EXT}")),
        body: dir.join(format!("{id}.{BODY_EXT}")),
    }
}

/// Chapter directory: `{root}/{book}/{act}/{chapter}`.
pub fn chapter_dir(manuscript_root: &Path, book: &str, act: &str, chapter: &str) -> PathBuf {
    manuscript_root.join(book).join(act).join(chapter)
}

/// Chapter metadata path: `{chapter_dir}/meta.json`.
pub fn chapter_meta(manuscript_root: &Path, book: &str, act: &str, chapter: &str) -> PathBuf {
    chapter_dir(manuscript_root, book, act, chapter).join(CHAPTER_META)
}

/// Metadata + body paths of a scene inside its chapter directory.
pub fn scene(manuscript_root: &Path, book: &str, act: &str, chapter: &str, scene: &str) -> DocPaths {
    let dir = chapter_dir(manuscript_root, book, act, chapter);
    DocPaths {
        meta: dir.join(format!("{scene}.{META_EXT}")),
        body: dir.join(format!("{scene}.{BODY_EXT}")),
    }
}

/// Body path paired with a located metadata path (same stem, `.md`).
pub fn body_for(meta_path: &Path) -> PathBuf {
    meta_path.with_extension(BODY_EXT)
}

/// Fallback display title for a directory node: hyphens become spaces and
/// each word is capitalized (`"the-weight"` → `"The Weight"`).
pub fn display_title(dir_name: &str) -> String {
    dir_name
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => {
                    first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase()
                }
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codex_partition_with_region() {
        let root = Path::new("/data/codex");
        let dir = codex_partition(root, CodexType::Character, Some("north"));
        assert_eq!(dir, PathBuf::from("/data/codex/character/north"));
    }

    #[test]
    fn codex_partition_region_ignored_for_lore() {
        let root = Path::new("/data/codex");
        let dir = codex_partition(root, CodexType::Lore, Some("north"));
        assert_eq!(dir, PathBuf::from("/data/codex/lore"));
    }

    #[test]
    fn codex_entry_pair() {
        let root = Path::new("/data/codex");
        let paths = codex_entry(root, CodexType::Location, None, "the-pass");
        assert_eq!(paths.meta, PathBuf::from("/data/codex/location/the-pass.json"));
        assert_eq!(paths.body, PathBuf::from("/data/codex/location/the-pass.md"));
    }

    #[test]
    fn scene_pair_and_chapter_meta() {
        let root = Path::new("/data/manuscript");
        let paths = scene(root, "book-1", "act-1", "ch-1", "s1");
        assert_eq!(paths.meta, PathBuf::from("/data/manuscript/book-1/act-1/ch-1/s1.json"));
        assert_eq!(paths.body, PathBuf::from("/data/manuscript/book-1/act-1/ch-1/s1.md"));
        assert_eq!(
            chapter_meta(root, "book-1", "act-1", "ch-1"),
            PathBuf::from("/data/manuscript/book-1/act-1/ch-1/meta.json")
        );
    }

    #[test]
    fn body_for_swaps_extension() {
        assert_eq!(
            body_for(Path::new("/data/codex/lore/origin.json")),
            PathBuf::from("/data/codex/lore/origin.md")
        );
    }

    #[test]
    fn display_title_capitalizes_words() {
        assert_eq!(display_title("the-weight-of-ashes"), "The Weight Of Ashes");
        assert_eq!(display_title("act-1"), "Act 1");
        assert_eq!(display_title("single"), "Single");
    }
}
