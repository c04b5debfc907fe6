//! Cover Art Archive HTTP client
//!
//! Fetches album artwork from the Cover Art Archive.
//! No API key required, but please respect their rate limits.
//!
//! API: https://coverartarchive.org

use futures::stream::BoxStream;
use futures::StreamExt;

use super::dto;
use crate::enrichment::domain::SourceError;
use crate::enrichment::http::{HttpSettings, check_status, fetch_bytes};
use crate::model::ArtworkCandidate;

/// Cover Art Archive client
#[derive(Clone)]
pub struct CoverArtClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl CoverArtClient {
    /// Create a new client
    pub fn new(settings: &HttpSettings) -> Self {
        Self {
            http_client: settings.build_client(),
            base_url: "https://coverartarchive.org".to_string(),
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

    /// Get the front cover for a MusicBrainz release
    pub async fn front_cover(&self, release_id: &str) -> Result<Vec<u8>, SourceError> {
        // Redirects to the actual image
        let url = format!("{}/release/{}/front", self.base_url, release_id);
        fetch_bytes(&self.http_client, &url).await
    }

    /// List all cover art for a release
    pub async fn list_cover_art(
        &self,
        release_id: &str,
    ) -> Result<dto::CoverArtResponse, SourceError> {
        let url = format!("{}/release/{}", self.base_url, release_id);

        let response = self
            .http_client
            .get(&url)
            .header("Accept", "application/json")
            .send()
            .await?;

        check_status(response)?
            .json::<dto::CoverArtResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    /// Every image for a release: the front cover first, then the rest of
    /// the listing, each yielded as soon as it downloads.
    ///
    /// Failed or undecodable images are skipped.
    pub fn release_artwork(&self, release_id: String) -> BoxStream<'static, ArtworkCandidate> {
        let client = self.clone();

        async_stream::stream! {
            match client.front_cover(&release_id).await {
                Ok(bytes) => {
                    if let Some(candidate) = ArtworkCandidate::decode(super::LABEL, bytes) {
                        yield candidate;
                    }
                }
                Err(e) => tracing::debug!("No front cover for {}: {}", release_id, e),
            }

            let listing = match client.list_cover_art(&release_id).await {
                Ok(listing) => listing,
                Err(e) => {
                    tracing::debug!("No cover art listing for {}: {}", release_id, e);
                    return;
                }
            };

            for image in listing.images.iter().filter(|i| !i.front) {
                let Some(ref url) = image.image else { continue };
                match fetch_bytes(&client.http_client, url).await {
                    Ok(bytes) => {
                        if let Some(candidate) = ArtworkCandidate::decode(image.label(super::LABEL), bytes) {
                            yield candidate;
                        }
                    }
                    Err(e) => tracing::debug!("Skipping cover art image {}: {}", url, e),
                }
            }
        }
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = CoverArtClient::new(&HttpSettings::default());
        assert_eq!(client.base_url, "https://coverartarchive.org");
    }

    #[tokio::test]
    async fn test_unreachable_archive_yields_nothing() {
        let client = CoverArtClient::with_base_url("http://127.0.0.1:9");
        let candidates: Vec<_> = client.release_artwork("rel-1".to_string()).collect().await;
        assert!(candidates.is_empty());
    }
}
