use super::{DocumentAddress, DocumentStore};
use crate::language::Language;
use crate::{Error, Result};
use async_trait::async_trait;
use std::collections::{HashMap, HashSet};

/// Serves documents from memory
///
/// Addresses marked as failing answer with a transport error, which lets
/// callers exercise outage paths without a network.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    documents: HashMap<DocumentAddress, String>,
    failing: HashSet<DocumentAddress>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_catalog(mut self, language: Language, text: impl Into<String>) -> Self {
        self.insert(DocumentAddress::Catalog(language), text);
        self
    }

    pub fn with_source(mut self, language: Language, key: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(DocumentAddress::Source(language, key.into()), text);
        self
    }

    /// Make every fetch of this source fail with a transport error
    pub fn with_failing_source(mut self, language: Language, key: impl Into<String>) -> Self {
        self.failing.insert(DocumentAddress::Source(language, key.into()));
        self
    }

    pub fn insert(&mut self, address: DocumentAddress, text: impl Into<String>) {
        self.documents.insert(address, text.into());
    }
}

#[async_trait]
impl DocumentStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn fetch(&self, address: &DocumentAddress) -> Result<String> {
        let path = address.relative_path()?;
        if self.failing.contains(address) {
            return Err(Error::Transport(format!("connection reset while fetching {}", path)));
        }
        self.documents
            .get(address)
            .cloned()
            .ok_or(Error::NotFound(path))
    }
}
