//! Enrichment service - orchestrates every lookup for a selected track
//!
//! For one selection the service runs three branches at once:
//! 1. Metadata (MusicBrainz + iTunes, merged), then Cover Art Archive
//!    artwork once MusicBrainz has named a release
//! 2. Lyrics (Genius, Musixmatch, lyrics.ovh in order)
//! 3. Track-keyed artwork (iTunes, video thumbnail)
//!
//! Everything comes back as one stream of [`SessionEvent`]s carrying the
//! selection token, ready for [`Session::apply`](crate::session::Session::apply).

use futures::stream::{self, BoxStream, StreamExt};

use super::artwork::{ArtworkCollector, ArtworkRequest};
use super::lyrics::LyricsResolver;
use super::resolver::MetadataResolver;
use crate::config::Config;
use crate::session::{SelectionToken, SessionEvent, SessionUpdate};

/// What to look up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupRequest {
    pub artist: String,
    pub title: String,
    pub thumbnail_url: Option<String>,
}

/// Service for enriching a selected track from external sources
#[derive(Clone)]
pub struct EnrichmentService {
    metadata: MetadataResolver,
    lyrics: LyricsResolver,
    artwork: ArtworkCollector,
}

impl EnrichmentService {
    pub fn new(metadata: MetadataResolver, lyrics: LyricsResolver, artwork: ArtworkCollector) -> Self {
        Self {
            metadata,
            lyrics,
            artwork,
        }
    }

    /// Service wired to the real sources, configured from `config`
    pub fn from_config(config: &Config) -> Self {
        let settings = config.http_settings();
        Self::new(
            MetadataResolver::standard(&settings),
            LyricsResolver::standard(&settings, config.credentials.musixmatch_api_key.clone()),
            ArtworkCollector::standard(&settings),
        )
    }

    pub fn metadata(&self) -> &MetadataResolver {
        &self.metadata
    }

    pub fn lyrics(&self) -> &LyricsResolver {
        &self.lyrics
    }

    /// Run all lookups for `request` and stream their results.
    ///
    /// The stream ends once every branch has finished.
    pub fn enrich(&self, token: SelectionToken, request: LookupRequest) -> BoxStream<'static, SessionEvent> {
        tracing::info!(
            "Looking up metadata for {} - {} ({})",
            request.artist,
            request.title,
            token
        );

        let metadata_branch = {
            let resolver = self.metadata.clone();
            let collector = self.artwork.clone();
            let (artist, title) = (request.artist.clone(), request.title.clone());

            async_stream::stream! {
                let resolved = resolver.resolve(&artist, &title).await;
                let release_id = resolved.release_id.clone();
                yield SessionUpdate::Metadata(resolved);

                if let Some(release_id) = release_id {
                    let mut covers = collector.collect(&ArtworkRequest::by_release(&release_id));
                    while let Some(candidate) = covers.next().await {
                        yield SessionUpdate::Artwork(candidate);
                    }
                }
            }
            .boxed()
        };

        let lyrics_branch = {
            let resolver = self.lyrics.clone();
            let (artist, title) = (request.artist.clone(), request.title.clone());

            stream::once(async move { SessionUpdate::Lyrics(resolver.resolve(&artist, &title).await) })
                .boxed()
        };

        let artwork_branch = self
            .artwork
            .collect(&ArtworkRequest::by_track(
                &request.artist,
                &request.title,
                request.thumbnail_url.clone(),
            ))
            .map(SessionUpdate::Artwork)
            .boxed();

        stream::select_all([metadata_branch, lyrics_branch, artwork_branch])
            .map(move |update| SessionEvent { token, update })
            .boxed()
    }
}
