//! Contextual vocabulary extraction for speech-driven coding.
//!
//! When a code editor is focused, this crate walks the editor's
//! accessibility tree to collect the file names on open tabs, the entries
//! in the project explorer, and the identifiers visible in the code area,
//! then distills them into keyword lists that bias a speech recognizer
//! toward the terms the user is likely to dictate.
//!
//! The platform accessibility layer is abstracted behind [`tree::UiTree`];
//! everything above it (path caching, traversal, symbol extraction,
//! ranking, persistence) is platform independent. [`engine::VocabularyEngine`]
//! is the entry point.

pub mod cache;
pub mod config;
pub mod engine;
pub mod extract;
pub mod focus;
pub mod keywords;
pub mod lexicon;
pub mod project;
pub mod tree;
pub mod validate;

pub use cache::{CacheStatus, ContentCache, PathCache};
pub use config::EngineConfig;
pub use engine::{EngineStats, VocabularyEngine};
pub use keywords::PromptContext;
pub use tree::{
    IndexPath, NodeId, NodeRole, NodeState, TreeError, TreeResult, UiTree, WindowId, WindowInfo,
};
