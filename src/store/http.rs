use super::{DocumentAddress, DocumentStore};
use crate::{Error, Result};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// Fetches documents over HTTP from a static data host
#[derive(Debug, Clone)]
pub struct HttpStore {
    client: Client,
    base_url: String,
}

impl HttpStore {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn url_for(&self, address: &DocumentAddress) -> Result<String> {
        Ok(format!("{}/{}", self.base_url, address.relative_path()?))
    }
}

#[async_trait]
impl DocumentStore for HttpStore {
    fn name(&self) -> &str {
        "http"
    }

    async fn fetch(&self, address: &DocumentAddress) -> Result<String> {
        let url = self.url_for(address)?;
        tracing::debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Err(Error::NotFound(url)),
            status if !status.is_success() => {
                Err(Error::Transport(format!("{} returned {}", url, status)))
            }
            _ => Ok(response.text().await?),
        }
    }
}
