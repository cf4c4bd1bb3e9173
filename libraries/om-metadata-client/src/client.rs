//! HTTP metadata source.

use crate::error::{MetadataClientError, Result};
use async_trait::async_trait;
use om_playback::{LoadResult, MetadataSource};
use reqwest::header::CACHE_CONTROL;
use reqwest::Client;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Fetches the metadata document over HTTP.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    http: Client,
    url: Url,
}

impl MetadataClient {
    /// Create a client for `document_path` resolved against `base_url`.
    ///
    /// `document_path` may itself be absolute, in which case `base_url` is
    /// ignored.
    pub fn new(base_url: &str, document_path: &str) -> Result<Self> {
        if base_url.is_empty() {
            return Err(MetadataClientError::InvalidUrl(
                "base URL cannot be empty".into(),
            ));
        }
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(MetadataClientError::InvalidUrl(
                "base URL must start with http:// or https://".into(),
            ));
        }

        // Without a trailing slash the last segment would be replaced by join()
        let base = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let url = Url::parse(&base)
            .and_then(|base| base.join(document_path))
            .map_err(|e| MetadataClientError::InvalidUrl(e.to_string()))?;

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("OmPlayer/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { http, url })
    }

    /// Resolved document URL.
    pub fn url(&self) -> &str {
        self.url.as_str()
    }

    /// Fetch the raw document body.
    pub async fn fetch_document(&self) -> Result<String> {
        debug!(url = %self.url, "Fetching metadata document");

        let response = self
            .http
            .get(self.url.clone())
            .header(CACHE_CONTROL, "no-store")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(MetadataClientError::Status {
                status: status.as_u16(),
                url: self.url.to_string(),
            });
        }

        let body = response.text().await?;
        debug!(bytes = body.len(), "Fetched metadata document");
        Ok(body)
    }
}

#[async_trait]
impl MetadataSource for MetadataClient {
    async fn fetch(&self) -> LoadResult<String> {
        self.fetch_document().await.map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_relative_document_path() {
        let client = MetadataClient::new("https://example.com/player", "service/music.json").unwrap();
        assert_eq!(client.url(), "https://example.com/player/service/music.json");
    }

    #[test]
    fn absolute_document_path_wins() {
        let client =
            MetadataClient::new("https://example.com/", "https://cdn.example.com/music.json")
                .unwrap();
        assert_eq!(client.url(), "https://cdn.example.com/music.json");
    }

    #[test]
    fn rejects_non_http_base() {
        let result = MetadataClient::new("ftp://example.com", "music.json");
        assert!(matches!(result, Err(MetadataClientError::InvalidUrl(_))));

        let result = MetadataClient::new("", "music.json");
        assert!(matches!(result, Err(MetadataClientError::InvalidUrl(_))));
    }
}
