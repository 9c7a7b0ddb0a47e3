//! Canonical in-memory records and their on-disk JSON shapes.
//!
//! Field-name normalization between the stored JSON and the internal
//! structs lives entirely in serde attributes here: the boolean stored as
//! literal `"global"` (reserved word, held internally as `global_entry`),
//! and the camelCase compound fields `wordCount` / `attachedCodex` mapped
//! to snake_case. Both spellings are accepted on read; a field found under
//! neither spelling stays at its default.

pub mod codex;
pub mod manuscript;

pub use codex::{CodexDraft, CodexEntry, CodexEntryWithBody, CodexType, Relation};
pub use manuscript::{
    ActNode, BookNode, Chapter, ChapterNode, ManuscriptTree, Scene, SceneDraft, SceneStatus,
    SceneSummary, SceneWithBody,
};
