//! Manuscript records — scenes, chapters, and the listing tree.
//!
//! Books and acts are directory nodes only; they carry no metadata file.
//! A chapter's `meta.json` holds its record plus the denormalized list of
//! child scene ids, which every scene create/delete must keep in sync.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Writing status shared by scenes and chapters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneStatus {
    #[default]
    Draft,
    Revised,
    Final,
}

/// Metadata for a scene, stored as `{id}.json` beside its `{id}.md` body.
///
/// `word_count` is derived: the store recomputes it from the body on every
/// save and never trusts a caller-supplied value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scene {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub pov: Option<String>,
    #[serde(rename = "wordCount", alias = "word_count", default)]
    pub word_count: usize,
    #[serde(default)]
    pub status: SceneStatus,
    #[serde(default)]
    pub labels: Vec<String>,
    #[serde(rename = "attachedCodex", alias = "attached_codex", default)]
    pub attached_codex: Vec<String>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// A scene together with its Markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneWithBody {
    pub scene: Scene,
    pub body: String,
}

/// Caller-supplied fields for creating a new scene. `id` is generated when
/// absent; `word_count` and timestamps are set by the store.
#[derive(Debug, Clone)]
pub struct SceneDraft {
    pub id: Option<String>,
    pub title: String,
    pub summary: String,
    pub pov: Option<String>,
    pub status: SceneStatus,
    pub labels: Vec<String>,
    pub attached_codex: Vec<String>,
}

impl SceneDraft {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            id: None,
            title: title.into(),
            summary: String::new(),
            pov: None,
            status: SceneStatus::default(),
            labels: Vec::new(),
            attached_codex: Vec::new(),
        }
    }
}

/// Chapter metadata, stored as `meta.json` inside the chapter directory.
///
/// `scenes` is a membership list, not an enforced relation. `word_count`
/// is stored as-is and never aggregated from child scenes by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chapter {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub scenes: Vec<String>,
    #[serde(rename = "wordCount", alias = "word_count", default)]
    pub word_count: usize,
    #[serde(default)]
    pub status: SceneStatus,
}

impl Chapter {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            summary: String::new(),
            scenes: Vec::new(),
            word_count: 0,
            status: SceneStatus::default(),
        }
    }
}

// ── listing tree ─────────────────────────────────────────────────────────────

/// Full manuscript listing: id + title summaries only, no bodies.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ManuscriptTree {
    pub books: Vec<BookNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BookNode {
    pub id: String,
    pub title: String,
    pub acts: Vec<ActNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActNode {
    pub id: String,
    pub title: String,
    pub chapters: Vec<ChapterNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChapterNode {
    pub id: String,
    pub title: String,
    pub scenes: Vec<SceneSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneSummary {
    pub id: String,
    pub title: String,
}
