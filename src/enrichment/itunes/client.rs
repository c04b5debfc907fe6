//! iTunes Search API client
//!
//! No API key required. Apple throttles at roughly 20 requests per minute
//! per IP, which is plenty for one lookup per selected track.

use super::{adapter, dto};
use crate::enrichment::domain::{SourceError, SourceMetadata};
use crate::enrichment::http::{HttpSettings, check_status};

/// iTunes Search API client
#[derive(Clone)]
pub struct ItunesClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ItunesClient {
    /// Create a new client
    pub fn new(settings: &HttpSettings) -> Self {
        Self {
            http_client: settings.build_client(),
            base_url: "https://itunes.apple.com".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpSettings::default().build_client(),
            base_url: base_url.into(),
        }
    }

    /// Album, year, genre and track number for the best hit.
    pub async fn lookup(&self, artist: &str, title: &str) -> Result<SourceMetadata, SourceError> {
        let hit = self.search(artist, title).await?;
        Ok(adapter::to_source_metadata(&hit))
    }

    /// 600x600 artwork URL for the best hit.
    pub async fn artwork_url(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        let hit = self.search(artist, title).await?;
        adapter::artwork_url(&hit).ok_or(SourceError::NoData)
    }

    /// Raw image download, for the artwork stream.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>, SourceError> {
        crate::enrichment::http::fetch_bytes(&self.http_client, url).await
    }

    async fn search(&self, artist: &str, title: &str) -> Result<dto::SearchResult, SourceError> {
        let term = format!("{artist} {title}");
        let url = format!(
            "{}/search?term={}&media=music&limit=1",
            self.base_url,
            urlencoding::encode(term.trim())
        );

        let response = self.http_client.get(&url).send().await?;
        let response = check_status(response)?;

        let search = response
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        search.results.into_iter().next().ok_or(SourceError::NoData)
    }
}
