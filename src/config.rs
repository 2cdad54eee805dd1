use crate::lexicon::default_max_concurrent_fetches;
use crate::store::{DocumentStore, FsStore, HttpStore};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_DATA_DIR: &str = "data";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct LexindexConfig {
    /// Local directory holding `<language>/catalog.json` and source files
    pub data_dir: Option<String>,
    /// Base URL of a remote data host; takes precedence over `data_dir`
    pub base_url: Option<String>,
    pub max_concurrent_fetches: Option<usize>,
    pub request_timeout_secs: Option<u64>,
    /// Listen address for `serve`
    pub bind: Option<String>,
}

impl LexindexConfig {
    pub fn max_concurrent_fetches(&self) -> usize {
        self.max_concurrent_fetches
            .filter(|n| *n > 0)
            .unwrap_or_else(default_max_concurrent_fetches)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.unwrap_or(DEFAULT_REQUEST_TIMEOUT_SECS))
    }

    pub fn bind(&self) -> &str {
        self.bind.as_deref().unwrap_or(DEFAULT_BIND)
    }

    /// Layer `other` on top of `self`; set fields in `other` win
    pub fn merged_with(self, other: LexindexConfig) -> Self {
        Self {
            data_dir: other.data_dir.or(self.data_dir),
            base_url: other.base_url.or(self.base_url),
            max_concurrent_fetches: other.max_concurrent_fetches.or(self.max_concurrent_fetches),
            request_timeout_secs: other.request_timeout_secs.or(self.request_timeout_secs),
            bind: other.bind.or(self.bind),
        }
    }

    /// Build the document store this config points at
    pub fn open_store(&self) -> anyhow::Result<Arc<dyn DocumentStore>> {
        if let Some(base_url) = &self.base_url {
            return Ok(Arc::new(HttpStore::new(base_url.as_str(), self.request_timeout())?));
        }
        let data_dir = self.data_dir.as_deref().unwrap_or(DEFAULT_DATA_DIR);
        Ok(Arc::new(FsStore::new(data_dir)))
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("lexindex.toml")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<LexindexConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: LexindexConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &LexindexConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_config_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(load_config(Some(&dir.path().join("lexindex.toml"))).unwrap().is_none());
    }

    #[test]
    fn test_write_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("lexindex.toml");
        let config = LexindexConfig {
            data_dir: Some("vocab".to_string()),
            max_concurrent_fetches: Some(3),
            ..Default::default()
        };

        write_config(&path, &config, false).unwrap();
        assert_eq!(load_config(Some(&path)).unwrap(), Some(config.clone()));

        assert!(write_config(&path, &config, false).is_err());
        write_config(&path, &config, true).unwrap();
    }

    #[test]
    fn test_merge_prefers_overrides() {
        let file = LexindexConfig {
            data_dir: Some("vocab".to_string()),
            bind: Some("0.0.0.0:9000".to_string()),
            ..Default::default()
        };
        let flags = LexindexConfig {
            data_dir: Some("other".to_string()),
            ..Default::default()
        };

        let merged = file.merged_with(flags);
        assert_eq!(merged.data_dir.as_deref(), Some("other"));
        assert_eq!(merged.bind(), "0.0.0.0:9000");
        assert_eq!(merged.request_timeout(), Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS));
    }

    #[test]
    fn test_zero_concurrency_falls_back_to_default() {
        let config = LexindexConfig {
            max_concurrent_fetches: Some(0),
            ..Default::default()
        };
        assert!(config.max_concurrent_fetches() >= 2);
    }
}
