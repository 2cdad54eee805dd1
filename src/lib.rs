//! # Lexindex - Multi-source vocabulary aggregation
//!
//! Loads vocabulary data for Ancient Greek, Hebrew and Latin learning
//! material from any number of named sources and folds it into one
//! grouped, queryable index.
//!
//! Lexindex provides:
//! - Source catalog discovery per language
//! - Raw record loading from filesystem, HTTP or in-memory document stores
//! - Record validation and normalization into a uniform word shape
//! - Deterministic grouping by semantic category
//! - A JSON HTTP API and CLI over the same operations

pub mod language;
pub mod word_id;
pub mod diagnostics;
pub mod store;
pub mod catalog;
pub mod loader;
pub mod normalize;
pub mod index;
pub mod lexicon;
pub mod server;
pub mod output;
pub mod config;
pub mod ui;


// Re-exports for convenient access
pub use language::Language;
pub use word_id::WordId;
pub use diagnostics::{Diagnostic, DiagnosticSink, MemorySink, TracingSink};
pub use store::{DocumentStore, FsStore, HttpStore, MemoryStore};
pub use catalog::SourceDescriptor;
pub use loader::{GroupedRecord, RawWordRecord};
pub use normalize::{normalize, NormalizeContext, Normalized, NormalizedWord, Rejection};
pub use index::{WordGroups, IndexStats, UNGROUPED};
pub use lexicon::Lexicon;

/// Result type alias for Lexindex operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for Lexindex operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Unknown language: {0}")]
    UnknownLanguage(String),

    #[error("Document not found: {0}")]
    NotFound(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid word id: {0}")]
    InvalidWordId(String),
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Transport(err.to_string())
    }
}
