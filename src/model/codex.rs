//! Codex entry records — worldbuilding metadata partitioned by type.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Codex entry types. The type doubles as the partition directory name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CodexType {
    Character,
    Location,
    Lore,
    Object,
    Subplot,
    Other,
}

impl CodexType {
    /// Directory name of this type's partition.
    pub fn as_str(self) -> &'static str {
        match self {
            CodexType::Character => "character",
            CodexType::Location => "location",
            CodexType::Lore => "lore",
            CodexType::Object => "object",
            CodexType::Subplot => "subplot",
            CodexType::Other => "other",
        }
    }

    /// Only characters and locations partition further by region.
    pub fn has_regions(self) -> bool {
        matches!(self, CodexType::Character | CodexType::Location)
    }
}

/// A directed relationship to another codex entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Relation {
    /// Id of the related entry.
    pub target: String,
    /// Relation kind, stored under `"type"` on disk.
    #[serde(rename = "type")]
    pub kind: String,
}

/// Metadata for a codex entry, stored as `{id}.json`.
///
/// The `global_entry` field is written as literal `"global"` in JSON —
/// the canonical name collides with a reserved word in the original
/// storage format, so it round-trips under the alias.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CodexEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub entry_type: CodexType,
    pub name: String,
    #[serde(default)]
    pub aliases: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(rename = "global", alias = "global_entry", default)]
    pub global_entry: bool,
    #[serde(default)]
    pub region: Option<String>,
    #[serde(default)]
    pub relations: Vec<Relation>,
    pub created: DateTime<Utc>,
    pub modified: DateTime<Utc>,
}

/// A codex entry together with its Markdown body (`{id}.md`).
#[derive(Debug, Clone, PartialEq)]
pub struct CodexEntryWithBody {
    pub entry: CodexEntry,
    pub body: String,
}

/// Caller-supplied fields for creating a new entry. `id` is generated
/// when absent; timestamps are set by the store.
#[derive(Debug, Clone)]
pub struct CodexDraft {
    pub id: Option<String>,
    pub entry_type: CodexType,
    pub name: String,
    pub aliases: Vec<String>,
    pub tags: Vec<String>,
    pub global_entry: bool,
    pub region: Option<String>,
    pub relations: Vec<Relation>,
}

impl CodexDraft {
    pub fn new(entry_type: CodexType, name: impl Into<String>) -> Self {
        Self {
            id: None,
            entry_type,
            name: name.into(),
            aliases: Vec::new(),
            tags: Vec::new(),
            global_entry: false,
            region: None,
            relations: Vec::new(),
        }
    }
}
