//! Trait definitions for external sources.
//!
//! These traits enable dependency injection and mocking for tests.
//! Production code uses the real client implementations, while tests
//! can substitute mock implementations.
//!
//! # Example
//!
//! ```ignore
//! use library_extender::enrichment::traits::LyricsApi;
//!
//! // In production code:
//! async fn lookup(source: &dyn LyricsApi) {
//!     let text = source.fetch("Artist", "Title").await?;
//! }
//!
//! // In tests:
//! struct MockLyrics { ... }
//! impl LyricsApi for MockLyrics { ... }
//! ```

use async_trait::async_trait;
use futures::stream::{self, BoxStream, StreamExt};

use super::artwork::ArtworkRequest;
use super::coverart::CoverArtClient;
use super::domain::{SourceError, SourceMetadata};
use super::itunes::ItunesClient;
use super::lyrics::{GeniusClient, LyricsOvhClient, MusixmatchClient};
use super::musicbrainz::MusicBrainzClient;
use crate::model::ArtworkCandidate;

/// A source of album-level metadata (album, year, genre, track number).
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Short name for logs and attribution
    fn label(&self) -> &'static str;

    /// Look up a track by artist and title.
    async fn lookup(&self, artist: &str, title: &str) -> Result<SourceMetadata, SourceError>;
}

/// A source of song lyrics.
#[async_trait]
pub trait LyricsApi: Send + Sync {
    fn label(&self) -> &'static str;

    /// Raw lyrics text; [`SourceError::NoData`] when the source has none.
    async fn fetch(&self, artist: &str, title: &str) -> Result<String, SourceError>;
}

/// A source of cover art candidates.
///
/// Returns a stream so a source with several images can hand each one over
/// as soon as it has downloaded. Failures end the stream early instead of
/// surfacing as errors.
pub trait ArtworkSource: Send + Sync {
    fn label(&self) -> &'static str;

    fn artwork(&self, request: &ArtworkRequest) -> BoxStream<'static, ArtworkCandidate>;
}

// Implement traits for real clients

#[async_trait]
impl MetadataApi for MusicBrainzClient {
    fn label(&self) -> &'static str {
        super::musicbrainz::LABEL
    }

    async fn lookup(&self, artist: &str, title: &str) -> Result<SourceMetadata, SourceError> {
        self.lookup(artist, title).await
    }
}

#[async_trait]
impl MetadataApi for ItunesClient {
    fn label(&self) -> &'static str {
        super::itunes::LABEL
    }

    async fn lookup(&self, artist: &str, title: &str) -> Result<SourceMetadata, SourceError> {
        self.lookup(artist, title).await
    }
}

#[async_trait]
impl LyricsApi for GeniusClient {
    fn label(&self) -> &'static str {
        super::lyrics::genius::LABEL
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        self.fetch(artist, title).await
    }
}

#[async_trait]
impl LyricsApi for MusixmatchClient {
    fn label(&self) -> &'static str {
        super::lyrics::musixmatch::LABEL
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        self.fetch(artist, title).await
    }
}

#[async_trait]
impl LyricsApi for LyricsOvhClient {
    fn label(&self) -> &'static str {
        super::lyrics::lyricsovh::LABEL
    }

    async fn fetch(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        self.fetch(artist, title).await
    }
}

impl ArtworkSource for CoverArtClient {
    fn label(&self) -> &'static str {
        super::coverart::LABEL
    }

    fn artwork(&self, request: &ArtworkRequest) -> BoxStream<'static, ArtworkCandidate> {
        match request.release_id {
            Some(ref release_id) => self.release_artwork(release_id.clone()),
            None => stream::empty().boxed(),
        }
    }
}

impl ArtworkSource for ItunesClient {
    fn label(&self) -> &'static str {
        super::itunes::LABEL
    }

    fn artwork(&self, request: &ArtworkRequest) -> BoxStream<'static, ArtworkCandidate> {
        let (Some(artist), Some(title)) = (request.artist.clone(), request.title.clone()) else {
            return stream::empty().boxed();
        };
        let client = self.clone();

        stream::once(async move {
            let url = client.artwork_url(&artist, &title).await?;
            client.fetch_image(&url).await
        })
        .filter_map(|result| async move {
            match result {
                Ok(bytes) => ArtworkCandidate::decode(super::itunes::LABEL, bytes),
                Err(e) => {
                    tracing::debug!("No iTunes artwork: {}", e);
                    None
                }
            }
        })
        .boxed()
    }
}

/// Mock sources for testing.
///
/// Each mock can be delayed so tests can force a particular completion
/// order under a paused tokio clock.
#[cfg(test)]
pub mod mocks {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    use super::*;
    use crate::enrichment::domain::MetadataFields;

    /// Mock metadata source that returns predefined fields.
    pub struct MockMetadata {
        pub label: &'static str,
        /// Result to return from lookup
        pub result: Option<SourceMetadata>,
        /// Error to return (takes precedence over result)
        pub error: Option<SourceError>,
        /// Simulated latency
        pub delay: Duration,
        /// Number of lookups made
        pub calls: Arc<AtomicUsize>,
    }

    impl MockMetadata {
        /// Create a mock that returns the given fields.
        pub fn with_fields(label: &'static str, fields: MetadataFields) -> Self {
            Self {
                label,
                result: Some(SourceMetadata {
                    fields,
                    release_id: None,
                }),
                error: None,
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Create a mock that has nothing.
        pub fn no_data(label: &'static str) -> Self {
            Self::with_error(label, SourceError::NoData)
        }

        /// Create a mock that returns an error.
        pub fn with_error(label: &'static str, error: SourceError) -> Self {
            Self {
                label,
                result: None,
                error: Some(error),
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn with_release_id(mut self, release_id: &str) -> Self {
            if let Some(ref mut result) = self.result {
                result.release_id = Some(release_id.to_string());
            }
            self
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl MetadataApi for MockMetadata {
        fn label(&self) -> &'static str {
            self.label
        }

        async fn lookup(&self, _artist: &str, _title: &str) -> Result<SourceMetadata, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            if let Some(ref err) = self.error {
                return Err(err.clone());
            }
            self.result.clone().ok_or(SourceError::NoData)
        }
    }

    /// Mock lyrics source.
    pub struct MockLyrics {
        pub label: &'static str,
        /// Text to return; `None` means NoData
        pub text: Option<String>,
        pub delay: Duration,
        pub calls: Arc<AtomicUsize>,
    }

    impl MockLyrics {
        pub fn with_text(label: &'static str, text: &str) -> Self {
            Self {
                label,
                text: Some(text.to_string()),
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn empty(label: &'static str) -> Self {
            Self {
                label,
                text: None,
                delay: Duration::ZERO,
                calls: Arc::new(AtomicUsize::new(0)),
            }
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }
    }

    #[async_trait]
    impl LyricsApi for MockLyrics {
        fn label(&self) -> &'static str {
            self.label
        }

        async fn fetch(&self, _artist: &str, _title: &str) -> Result<String, SourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            tokio::time::sleep(self.delay).await;
            self.text.clone().ok_or(SourceError::NoData)
        }
    }

    /// Mock artwork source yielding fixed images after a delay.
    pub struct MockArtwork {
        pub label: &'static str,
        pub images: Vec<Vec<u8>>,
        pub delay: Duration,
        /// Only yield when the request carries a release ID
        pub needs_release: bool,
        /// Only yield when the request carries artist and title
        pub needs_track: bool,
    }

    impl MockArtwork {
        pub fn with_images(label: &'static str, images: Vec<Vec<u8>>) -> Self {
            Self {
                label,
                images,
                delay: Duration::ZERO,
                needs_release: false,
                needs_track: false,
            }
        }

        pub fn delayed(mut self, delay: Duration) -> Self {
            self.delay = delay;
            self
        }

        pub fn requiring_release(mut self) -> Self {
            self.needs_release = true;
            self
        }

        pub fn requiring_track(mut self) -> Self {
            self.needs_track = true;
            self
        }
    }

    impl ArtworkSource for MockArtwork {
        fn label(&self) -> &'static str {
            self.label
        }

        fn artwork(&self, request: &ArtworkRequest) -> BoxStream<'static, ArtworkCandidate> {
            if self.needs_release && request.release_id.is_none() {
                return stream::empty().boxed();
            }
            if self.needs_track && (request.artist.is_none() || request.title.is_none()) {
                return stream::empty().boxed();
            }
            let label = self.label;
            let images = self.images.clone();
            let delay = self.delay;
            async_stream::stream! {
                for bytes in images {
                    tokio::time::sleep(delay).await;
                    if let Some(candidate) = ArtworkCandidate::decode(label, bytes) {
                        yield candidate;
                    }
                }
            }
            .boxed()
        }
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use crate::test_utils::png_bytes;

        #[tokio::test]
        async fn test_mock_metadata_with_fields() {
            let mock = MockMetadata::with_fields(
                "A",
                MetadataFields {
                    album: Some("Album".to_string()),
                    ..Default::default()
                },
            )
            .with_release_id("rel-1");
            let result = mock.lookup("x", "y").await.unwrap();
            assert_eq!(result.fields.album.as_deref(), Some("Album"));
            assert_eq!(result.release_id.as_deref(), Some("rel-1"));
            assert_eq!(mock.calls.load(Ordering::SeqCst), 1);
        }

        #[tokio::test]
        async fn test_mock_metadata_error() {
            let mock = MockMetadata::with_error("A", SourceError::Unavailable("timeout".to_string()));
            let result = mock.lookup("x", "y").await;
            assert!(matches!(result, Err(SourceError::Unavailable(_))));
        }

        #[tokio::test]
        async fn test_mock_lyrics_empty() {
            let mock = MockLyrics::empty("A");
            assert!(matches!(mock.fetch("x", "y").await, Err(SourceError::NoData)));
        }

        #[tokio::test]
        async fn test_mock_artwork_requires_release() {
            let mock = MockArtwork::with_images("CAA", vec![png_bytes(2, 2)]).requiring_release();

            let none: Vec<_> = mock.artwork(&ArtworkRequest::default()).collect().await;
            assert!(none.is_empty());

            let request = ArtworkRequest {
                release_id: Some("rel".to_string()),
                ..Default::default()
            };
            let some: Vec<_> = mock.artwork(&request).collect().await;
            assert_eq!(some.len(), 1);
        }
    }
}
