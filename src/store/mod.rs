//! Document Store - transport for catalog and source documents
//!
//! Documents are addressed relative to a per-language directory:
//! - `<language>/catalog.json`: source key → display label
//! - `<language>/<source>.json`: group key → records
//!
//! Backends: local directory, HTTP base URL, in-memory map.

pub mod fs;
pub mod http;
pub mod memory;

pub use fs::FsStore;
pub use http::HttpStore;
pub use memory::MemoryStore;

use crate::language::Language;
use crate::{Error, Result};
use async_trait::async_trait;

/// File name of the per-language catalog document
pub const CATALOG_FILE: &str = "catalog.json";

/// Address of one document
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DocumentAddress {
    Catalog(Language),
    Source(Language, String),
}

impl DocumentAddress {
    /// Path relative to the store root
    ///
    /// Source keys that could escape the language directory are treated as
    /// unknown sources.
    pub fn relative_path(&self) -> Result<String> {
        match self {
            DocumentAddress::Catalog(language) => {
                Ok(format!("{}/{}", language.slug(), CATALOG_FILE))
            }
            DocumentAddress::Source(language, key) => {
                if !is_valid_source_key(key) {
                    return Err(Error::NotFound(format!("invalid source key: {:?}", key)));
                }
                Ok(format!("{}/{}.json", language.slug(), key))
            }
        }
    }
}

impl std::fmt::Display for DocumentAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DocumentAddress::Catalog(language) => write!(f, "{} catalog", language),
            DocumentAddress::Source(language, key) => write!(f, "{} source '{}'", language, key),
        }
    }
}

fn is_valid_source_key(key: &str) -> bool {
    let key = key.trim();
    !key.is_empty() && !key.contains('/') && !key.contains('\\') && !key.contains("..")
}

/// Trait for document transports
///
/// A store only moves text; parsing and validation happen in the loaders.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Backend name (for logging)
    fn name(&self) -> &str;

    /// Fetch the raw text of a document
    async fn fetch(&self, address: &DocumentAddress) -> Result<String>;
}
