//! MusicBrainz HTTP client
//!
//! Handles communication with the MusicBrainz web service.
//! See: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! IMPORTANT: MusicBrainz requires a User-Agent header and rate limits to 1 req/sec.

use std::time::Duration;

use super::{adapter, dto};
use crate::enrichment::domain::{SourceError, SourceMetadata};
use crate::enrichment::http::{HttpSettings, check_status};

/// Pause between consecutive requests to stay under the rate limit
const REQUEST_SPACING: Duration = Duration::from_millis(1100);

/// MusicBrainz API client
#[derive(Clone)]
pub struct MusicBrainzClient {
    http_client: reqwest::Client,
    base_url: String,
    request_spacing: Duration,
}

impl MusicBrainzClient {
    /// Create a new client
    pub fn new(settings: &HttpSettings) -> Self {
        Self {
            http_client: settings.build_client(),
            base_url: "https://musicbrainz.org/ws/2".to_string(),
            request_spacing: REQUEST_SPACING,
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpSettings::default().build_client(),
            base_url: base_url.into(),
            request_spacing: Duration::ZERO,
        }
    }

    /// Search for a recording and, if it has a release, look up its track position.
    ///
    /// A failed release lookup is not fatal: album, year and genre from the
    /// search are still returned.
    pub async fn lookup(&self, artist: &str, title: &str) -> Result<SourceMetadata, SourceError> {
        let recording = self.search_recording(artist, title).await?;
        let mut metadata = adapter::to_source_metadata(&recording);

        if let Some(ref release_id) = metadata.release_id {
            tokio::time::sleep(self.request_spacing).await;

            match self.lookup_release(release_id).await {
                Ok(release) => {
                    metadata.fields.track_number = adapter::track_number(&release, &recording.id);
                }
                Err(e) => {
                    tracing::debug!("MusicBrainz release lookup failed: {}", e);
                }
            }
        }

        Ok(metadata)
    }

    /// Best recording hit for `artist`/`title`
    pub async fn search_recording(
        &self,
        artist: &str,
        title: &str,
    ) -> Result<dto::Recording, SourceError> {
        let url = format!(
            "{}/recording/?query={}&fmt=json&limit=1",
            self.base_url,
            urlencoding::encode(&recording_query(artist, title))
        );

        let response = self.send(&url).await?;
        let search = response
            .json::<dto::RecordingSearchResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        search.recordings.into_iter().next().ok_or(SourceError::NoData)
    }

    /// Release with its media and track listing
    pub async fn lookup_release(&self, release_id: &str) -> Result<dto::ReleaseResponse, SourceError> {
        let url = format!(
            "{}/release/{}?inc=recordings&fmt=json",
            self.base_url, release_id
        );

        self.send(&url)
            .await?
            .json::<dto::ReleaseResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))
    }

    async fn send(&self, url: &str) -> Result<reqwest::Response, SourceError> {
        let response = self
            .http_client
            .get(url)
            .header("Accept", "application/json")
            .send()
            .await?;

        // MusicBrainz answers 503 when throttling
        if response.status() == reqwest::StatusCode::SERVICE_UNAVAILABLE {
            return Err(SourceError::RateLimited);
        }

        check_status(response)
    }
}

/// Lucene query for a recording by artist and title.
fn recording_query(artist: &str, title: &str) -> String {
    format!(
        "artist:\"{}\" AND recording:\"{}\"",
        escape_phrase(artist),
        escape_phrase(title)
    )
}

fn escape_phrase(value: &str) -> String {
    value.replace('\\', "").replace('"', "")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = MusicBrainzClient::new(&HttpSettings::default());
        assert_eq!(client.base_url, "https://musicbrainz.org/ws/2");
        assert_eq!(client.request_spacing, REQUEST_SPACING);
    }

    #[test]
    fn test_client_with_custom_url() {
        let client = MusicBrainzClient::with_base_url("http://localhost:8080");
        assert_eq!(client.base_url, "http://localhost:8080");
        assert_eq!(client.request_spacing, Duration::ZERO);
    }

    #[test]
    fn test_recording_query() {
        assert_eq!(
            recording_query("Imagine Dragons", "Believer"),
            r#"artist:"Imagine Dragons" AND recording:"Believer""#
        );
        // Embedded quotes would end the phrase early
        assert_eq!(
            recording_query("The \"Band\"", "Song"),
            r#"artist:"The Band" AND recording:"Song""#
        );
    }

    #[tokio::test]
    async fn test_unreachable_host_is_unavailable() {
        let client = MusicBrainzClient::with_base_url("http://127.0.0.1:9");
        let result = client.lookup("Artist", "Song").await;
        assert!(matches!(result, Err(SourceError::Unavailable(_))));
    }
}
