//! Manuscript operations — scenes, chapters, and tree assembly.
//!
//! The chapter's scene-id membership list is denormalized: scene create
//! and delete rewrite the parent chapter's `meta.json` under the chapter
//! lock. Lock order is always scene first, chapter second.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::StoreError;
use crate::fsio;
use crate::locks::hold;
use crate::model::{
    ActNode, BookNode, Chapter, ChapterNode, ManuscriptTree, Scene, SceneDraft, SceneSummary,
    SceneWithBody,
};
use crate::paths::{self, CHAPTER_META, META_EXT};
use crate::wordcount::count_words;

use super::{log_skip, parse_meta_file, DocumentStore, ScanItem};

/// Loose probe for tree assembly: id/title if present, never a hard parse
/// failure over missing fields.
#[derive(Deserialize)]
struct NodeProbe {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    title: Option<String>,
}

impl DocumentStore {
    // ── tree assembly ────────────────────────────────────────────────────

    /// Assemble the full Book → Act → Chapter → Scene listing.
    ///
    /// Every directory is a node, ordered lexicographically by name. A
    /// chapter with missing or corrupt `meta.json` still appears, titled
    /// from its directory name. Corrupt scene files are skipped. Only id +
    /// title summaries are produced — no bodies, no full records.
    pub fn manuscript_tree(&self) -> Result<ManuscriptTree, StoreError> {
        let mut books = Vec::new();
        for (book_id, book_path) in sorted_dirs(&self.manuscript_root) {
            let mut acts = Vec::new();
            for (act_id, act_path) in sorted_dirs(&book_path) {
                let mut chapters = Vec::new();
                for (chapter_name, chapter_path) in sorted_dirs(&act_path) {
                    chapters.push(assemble_chapter(&chapter_name, &chapter_path));
                }
                acts.push(ActNode {
                    id: act_id.clone(),
                    title: paths::display_title(&act_id),
                    chapters,
                });
            }
            books.push(BookNode {
                id: book_id.clone(),
                title: paths::display_title(&book_id),
                acts,
            });
        }
        Ok(ManuscriptTree { books })
    }

    // ── chapters ─────────────────────────────────────────────────────────

    /// Chapter metadata from `meta.json`. Missing or malformed is `Ok(None)`.
    pub fn get_chapter(
        &self,
        book: &str,
        act: &str,
        chapter: &str,
    ) -> Result<Option<Chapter>, StoreError> {
        let meta_path = paths::chapter_meta(&self.manuscript_root, book, act, chapter);
        if !meta_path.is_file() {
            return Ok(None);
        }
        match parse_meta_file::<Chapter>(&meta_path) {
            ScanItem::Parsed(chapter) => Ok(Some(chapter)),
            ScanItem::Skipped { path, reason } => {
                log_skip(&path, &reason);
                Ok(None)
            }
        }
    }

    /// Write chapter metadata to `meta.json`, creating the chapter
    /// directory if absent. The directory is named by `chapter.id`.
    pub fn save_chapter(&self, book: &str, act: &str, chapter: &Chapter) -> Result<(), StoreError> {
        let meta_path = paths::chapter_meta(&self.manuscript_root, book, act, &chapter.id);
        let lock = self.locks.get(&meta_path.to_string_lossy());
        let _guard = hold(&lock);

        self.write_chapter_locked(&meta_path, chapter)
    }

    // ── scenes ───────────────────────────────────────────────────────────

    /// Scene metadata + body. Missing or malformed metadata is `Ok(None)`;
    /// a missing body file degrades to an empty string.
    pub fn get_scene(
        &self,
        book: &str,
        act: &str,
        chapter: &str,
        scene_id: &str,
    ) -> Result<Option<SceneWithBody>, StoreError> {
        let target = paths::scene(&self.manuscript_root, book, act, chapter, scene_id);
        if !target.meta.is_file() {
            return Ok(None);
        }
        let scene = match parse_meta_file::<Scene>(&target.meta) {
            ScanItem::Parsed(scene) => scene,
            ScanItem::Skipped { path, reason } => {
                log_skip(&path, &reason);
                return Ok(None);
            }
        };
        let body = fsio::read_body(&target.body)?;
        Ok(Some(SceneWithBody { scene, body }))
    }

    /// Upsert a scene. `word_count` is recomputed from `body`, overriding
    /// whatever the caller supplied, and `modified` is set to now.
    pub fn save_scene(
        &self,
        book: &str,
        act: &str,
        chapter: &str,
        mut scene: Scene,
        body: &str,
    ) -> Result<Scene, StoreError> {
        let target = paths::scene(&self.manuscript_root, book, act, chapter, &scene.id);
        let lock = self.locks.get(&target.meta.to_string_lossy());
        let _guard = hold(&lock);

        scene.word_count = count_words(body);
        scene.modified = Utc::now();
        self.write_scene_pair(&target, &scene, body)?;
        Ok(scene)
    }

    /// Create a scene in an existing chapter, generating a `scene-` id
    /// when the draft has none, and append it to the chapter's membership
    /// list exactly once. Fails with [`StoreError::NotFound`] when the
    /// chapter has no metadata, and [`StoreError::Conflict`] when a scene
    /// file with that id already exists.
    pub fn create_scene(
        &self,
        book: &str,
        act: &str,
        chapter: &str,
        draft: SceneDraft,
        body: &str,
    ) -> Result<SceneWithBody, StoreError> {
        if self.get_chapter(book, act, chapter)?.is_none() {
            return Err(StoreError::NotFound(format!("chapter '{chapter}' not found")));
        }

        let id = draft.id.clone().unwrap_or_else(|| format!("scene-{}", Self::short_id()));
        let target = paths::scene(&self.manuscript_root, book, act, chapter, &id);
        let lock = self.locks.get(&target.meta.to_string_lossy());
        let _guard = hold(&lock);

        if target.meta.exists() {
            return Err(StoreError::Conflict(format!("scene '{id}' already exists")));
        }

        let now = Utc::now();
        let scene = Scene {
            id: id.clone(),
            title: draft.title,
            summary: draft.summary,
            pov: draft.pov,
            word_count: count_words(body),
            status: draft.status,
            labels: draft.labels,
            attached_codex: draft.attached_codex,
            created: now,
            modified: now,
        };
        self.write_scene_pair(&target, &scene, body)?;

        // Membership upkeep, guarded by the chapter lock and re-read under
        // it so a concurrent create cannot drop the other's id.
        let meta_path = paths::chapter_meta(&self.manuscript_root, book, act, chapter);
        let chapter_lock = self.locks.get(&meta_path.to_string_lossy());
        let _chapter_guard = hold(&chapter_lock);
        if let Some(mut record) = self.get_chapter(book, act, chapter)? {
            if !record.scenes.contains(&id) {
                record.scenes.push(id);
                self.write_chapter_locked(&meta_path, &record)?;
            }
        }

        Ok(SceneWithBody { scene, body: body.to_string() })
    }

    /// Delete a scene's metadata and body and remove its id from the
    /// parent chapter's membership list. Returns whether the scene existed.
    pub fn delete_scene(
        &self,
        book: &str,
        act: &str,
        chapter: &str,
        scene_id: &str,
    ) -> Result<bool, StoreError> {
        let target = paths::scene(&self.manuscript_root, book, act, chapter, scene_id);
        {
            let lock = self.locks.get(&target.meta.to_string_lossy());
            let _guard = hold(&lock);

            if !fsio::remove_if_exists(&target.meta)? {
                return Ok(false);
            }
            fsio::remove_if_exists(&target.body)?;
        }

        let meta_path = paths::chapter_meta(&self.manuscript_root, book, act, chapter);
        let chapter_lock = self.locks.get(&meta_path.to_string_lossy());
        let _chapter_guard = hold(&chapter_lock);
        if let Some(mut record) = self.get_chapter(book, act, chapter)? {
            if record.scenes.iter().any(|s| s == scene_id) {
                record.scenes.retain(|s| s != scene_id);
                self.write_chapter_locked(&meta_path, &record)?;
            }
        }

        info!(scene_id, chapter, "scene deleted");
        Ok(true)
    }

    // ── shared writes ────────────────────────────────────────────────────

    fn write_chapter_locked(&self, meta_path: &Path, chapter: &Chapter) -> Result<(), StoreError> {
        let meta_json = serde_json::to_string_pretty(chapter)?;
        fsio::write_atomic(meta_path, &meta_json)?;
        info!(id = %chapter.id, "chapter saved");
        Ok(())
    }

    fn write_scene_pair(
        &self,
        target: &paths::DocPaths,
        scene: &Scene,
        body: &str,
    ) -> Result<(), StoreError> {
        let meta_json = serde_json::to_string_pretty(scene)?;
        fsio::write_atomic(&target.meta, &meta_json)?;
        fsio::write_atomic(&target.body, body)?;
        info!(id = %scene.id, word_count = scene.word_count, "scene saved");
        Ok(())
    }
}

// ── tree helpers ─────────────────────────────────────────────────────────────

/// One chapter node: metadata if readable, directory-derived fallbacks
/// otherwise, plus id + title summaries of its scene files.
fn assemble_chapter(dir_name: &str, chapter_path: &Path) -> ChapterNode {
    let meta_path = chapter_path.join(CHAPTER_META);
    let (id, title) = if meta_path.is_file() {
        match parse_meta_file::<NodeProbe>(&meta_path) {
            ScanItem::Parsed(probe) => (
                probe.id.unwrap_or_else(|| dir_name.to_string()),
                probe.title.unwrap_or_else(|| dir_name.to_string()),
            ),
            ScanItem::Skipped { path, reason } => {
                log_skip(&path, &reason);
                (dir_name.to_string(), paths::display_title(dir_name))
            }
        }
    } else {
        (dir_name.to_string(), paths::display_title(dir_name))
    };

    let mut scenes = Vec::new();
    for (file_name, path) in sorted_meta_files(chapter_path) {
        if file_name == CHAPTER_META {
            continue;
        }
        let stem = file_name.trim_end_matches(".json").to_string();
        match parse_meta_file::<NodeProbe>(&path) {
            ScanItem::Parsed(probe) => scenes.push(SceneSummary {
                id: probe.id.unwrap_or_else(|| stem.clone()),
                title: probe.title.unwrap_or(stem),
            }),
            ScanItem::Skipped { path, reason } => log_skip(&path, &reason),
        }
    }

    ChapterNode { id, title, scenes }
}

/// Immediate subdirectories of `dir`, sorted by name. A missing or
/// unreadable directory yields the empty set — listing degrades, it does
/// not fail.
fn sorted_dirs(dir: &Path) -> Vec<(String, PathBuf)> {
    let reader = match fs::read_dir(dir) {
        Ok(reader) => reader,
        Err(e) => {
            if dir.exists() {
                warn!(dir = %dir.display(), error = %e, "unreadable directory in tree scan");
            }
            return Vec::new();
        }
    };
    let mut dirs: Vec<(String, PathBuf)> = reader
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_dir())
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    dirs.sort();
    dirs
}

/// Immediate `.json` files of `dir`, sorted by name.
fn sorted_meta_files(dir: &Path) -> Vec<(String, PathBuf)> {
    let reader = match fs::read_dir(dir) {
        Ok(reader) => reader,
        Err(_) => return Vec::new(),
    };
    let mut files: Vec<(String, PathBuf)> = reader
        .filter_map(Result::ok)
        .filter(|entry| {
            entry.path().is_file() && entry.path().extension().is_some_and(|ext| ext == META_EXT)
        })
        .map(|entry| (entry.file_name().to_string_lossy().into_owned(), entry.path()))
        .collect();
    files.sort();
    files
}
