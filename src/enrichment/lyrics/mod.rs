//! Lyrics lookup with ordered fallback.
//!
//! Sources are tried one at a time in a fixed order (Genius, Musixmatch,
//! lyrics.ovh). The first non-empty answer wins; lyrics from different
//! sources are never merged.

pub mod cleanup;
pub mod genius;
pub mod lyricsovh;
pub mod musixmatch;

use std::sync::Arc;

use futures::FutureExt;

pub use cleanup::clean_lyrics;
pub use genius::GeniusClient;
pub use lyricsovh::LyricsOvhClient;
pub use musixmatch::MusixmatchClient;

use super::attempt::{Attempt, first_success};
use super::domain::{LyricsHit, SourceError};
use super::http::HttpSettings;
use super::traits::LyricsApi;

/// Ordered first-non-empty lyrics lookup.
#[derive(Clone)]
pub struct LyricsResolver {
    sources: Vec<Arc<dyn LyricsApi>>,
}

impl LyricsResolver {
    /// Resolver over the given sources, tried in order.
    pub fn new(sources: Vec<Arc<dyn LyricsApi>>) -> Self {
        Self { sources }
    }

    /// The standard chain: Genius, then Musixmatch, then lyrics.ovh.
    pub fn standard(settings: &HttpSettings, musixmatch_api_key: Option<String>) -> Self {
        Self::new(vec![
            Arc::new(GeniusClient::new(settings)),
            Arc::new(MusixmatchClient::new(settings, musixmatch_api_key)),
            Arc::new(LyricsOvhClient::new(settings)),
        ])
    }

    /// Cleaned lyrics from the first source that has any.
    pub async fn resolve(&self, artist: &str, title: &str) -> Option<LyricsHit> {
        let attempts = self.sources.iter().map(|source| -> Attempt<'static, String> {
            let source = source.clone();
            let (artist, title) = (artist.to_string(), title.to_string());
            (
                source.label(),
                async move {
                    let text = source.fetch(&artist, &title).await?;
                    let cleaned = clean_lyrics(&text);
                    if cleaned.is_empty() {
                        Err(SourceError::NoData)
                    } else {
                        Ok(cleaned)
                    }
                }
                .boxed(),
            )
        });
        let attempts: Vec<Attempt<'static, String>> = attempts.collect();

        let (source, text) = first_success(attempts).await?;
        tracing::info!("Lyrics found from {}", source);
        Some(LyricsHit { text, source })
    }
}
