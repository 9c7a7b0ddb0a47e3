//! Scriptorium — filesystem persistence for a writing project.
//!
//! Two document collections live under one data directory: a flat,
//! type-partitioned codex of worldbuilding entries, and a four-level
//! manuscript tree. Each logical document splits into a structured
//! metadata record (JSON) and a free-form Markdown body:
//!
//! ```text
//! {data_dir}/
//! ├── codex/
//! │   └── {type}/[{region}/]
//! │       ├── {id}.json
//! │       └── {id}.md
//! └── manuscript/
//!     └── {book}/{act}/{chapter}/
//!         ├── meta.json
//!         ├── {scene}.json
//!         └── {scene}.md
//! ```
//!
//! [`DocumentStore`] is the public surface: codex CRUD and search, scene
//! and chapter CRUD with denormalized chapter→scene membership upkeep,
//! and read-only tree assembly for the manuscript listing. The layout is
//! designed to stay hand-editable — corrupt files degrade to skipped
//! items or absent documents rather than failures.

pub mod config;
pub mod error;
pub mod fsio;
pub mod locate;
pub mod locks;
pub mod model;
pub mod paths;
pub mod store;
pub mod wordcount;

pub use config::StoreConfig;
pub use error::StoreError;
pub use model::{
    Chapter, CodexDraft, CodexEntry, CodexEntryWithBody, CodexType, ManuscriptTree, Relation,
    Scene, SceneDraft, SceneStatus, SceneWithBody,
};
pub use store::DocumentStore;
pub use wordcount::{count_words, strip_markdown};
