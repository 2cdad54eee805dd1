use super::{DocumentAddress, DocumentStore};
use crate::{Error, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Reads documents from a local data directory
#[derive(Debug, Clone)]
pub struct FsStore {
    root: PathBuf,
}

impl FsStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

#[async_trait]
impl DocumentStore for FsStore {
    fn name(&self) -> &str {
        "filesystem"
    }

    async fn fetch(&self, address: &DocumentAddress) -> Result<String> {
        let path = self.root.join(address.relative_path()?);
        tracing::debug!("Reading {}", path.display());

        match tokio::fs::read_to_string(&path).await {
            Ok(text) => Ok(text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(Error::NotFound(path.display().to_string()))
            }
            Err(e) => Err(Error::Io(e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Language;

    #[tokio::test]
    async fn test_reads_language_directory() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("latin")).unwrap();
        std::fs::write(dir.path().join("latin/catalog.json"), r#"{"core":"Core"}"#).unwrap();

        let store = FsStore::new(dir.path());
        let text = store.fetch(&DocumentAddress::Catalog(Language::Latin)).await.unwrap();
        assert_eq!(text, r#"{"core":"Core"}"#);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsStore::new(dir.path());
        let err = store
            .fetch(&DocumentAddress::Source(Language::Hebrew, "core".to_string()))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }
}
