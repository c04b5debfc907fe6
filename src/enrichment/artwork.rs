//! Artwork collection across sources.
//!
//! Every source produces a stream of candidates; the collector merges them
//! so candidates come out in the order they finished downloading.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};

use super::coverart::CoverArtClient;
use super::http::{HttpSettings, fetch_bytes};
use super::itunes::ItunesClient;
use super::traits::ArtworkSource;
use crate::model::ArtworkCandidate;

/// What the artwork sources may key on. Each source uses what it needs and
/// yields nothing when its key is missing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArtworkRequest {
    pub artist: Option<String>,
    pub title: Option<String>,
    /// MusicBrainz release ID (Cover Art Archive)
    pub release_id: Option<String>,
    /// Video thumbnail URL
    pub thumbnail_url: Option<String>,
}

impl ArtworkRequest {
    /// Keys available as soon as a candidate is selected.
    pub fn by_track(artist: &str, title: &str, thumbnail_url: Option<String>) -> Self {
        Self {
            artist: Some(artist.to_string()),
            title: Some(title.to_string()),
            release_id: None,
            thumbnail_url,
        }
    }

    /// Keys available once the primary metadata source found a release.
    pub fn by_release(release_id: &str) -> Self {
        Self {
            release_id: Some(release_id.to_string()),
            ..Default::default()
        }
    }
}

/// The video's own thumbnail, offered as a last-resort cover.
#[derive(Clone)]
pub struct ThumbnailSource {
    http_client: reqwest::Client,
}

pub const THUMBNAIL_LABEL: &str = "Video Thumbnail";

impl ThumbnailSource {
    pub fn new(settings: &HttpSettings) -> Self {
        Self {
            http_client: settings.build_client(),
        }
    }
}

impl ArtworkSource for ThumbnailSource {
    fn label(&self) -> &'static str {
        THUMBNAIL_LABEL
    }

    fn artwork(&self, request: &ArtworkRequest) -> BoxStream<'static, ArtworkCandidate> {
        let Some(url) = request.thumbnail_url.clone() else {
            return stream::empty().boxed();
        };
        let client = self.http_client.clone();

        stream::once(async move { fetch_bytes(&client, &url).await })
            .filter_map(|result| async move {
                match result {
                    Ok(bytes) => ArtworkCandidate::decode(THUMBNAIL_LABEL, bytes),
                    Err(e) => {
                        tracing::debug!("Thumbnail unavailable: {}", e);
                        None
                    }
                }
            })
            .boxed()
    }
}

/// Merges artwork sources into one arrival-ordered stream.
#[derive(Clone)]
pub struct ArtworkCollector {
    sources: Vec<Arc<dyn ArtworkSource>>,
}

impl ArtworkCollector {
    pub fn new(sources: Vec<Arc<dyn ArtworkSource>>) -> Self {
        Self { sources }
    }

    /// Cover Art Archive, iTunes and the video thumbnail.
    pub fn standard(settings: &HttpSettings) -> Self {
        Self::new(vec![
            Arc::new(CoverArtClient::new(settings)),
            Arc::new(ItunesClient::new(settings)),
            Arc::new(ThumbnailSource::new(settings)),
        ])
    }

    /// All candidates the sources can find for `request`, in arrival order.
    pub fn collect(&self, request: &ArtworkRequest) -> BoxStream<'static, ArtworkCandidate> {
        let streams: Vec<_> = self
            .sources
            .iter()
            .map(|source| {
                tracing::debug!(source = source.label(), "Starting artwork lookup");
                source.artwork(request)
            })
            .collect();

        if streams.is_empty() {
            return stream::empty().boxed();
        }

        stream::select_all(streams).boxed()
    }
}
