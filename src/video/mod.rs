//! Video platform access: search and audio retrieval.
//!
//! Both are done by the `yt-dlp` command-line tool. The traits here are the
//! seam the download pipeline and the CLI depend on, so tests can swap in
//! [`mocks`] without a network or an installed binary.

pub mod dto;
pub mod ytdlp;

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::download::DownloadError;
use crate::model::TrackCandidate;

pub use ytdlp::YtDlp;

pub const UNKNOWN_TITLE: &str = "Unknown Title";
pub const UNKNOWN_UPLOADER: &str = "Unknown Uploader";

/// Searches the platform for videos.
#[async_trait]
pub trait VideoSearch: Send + Sync {
    /// Up to `limit` candidates for `query`, in platform ranking order.
    async fn search(&self, query: &str, limit: usize) -> Result<Vec<TrackCandidate>, VideoError>;

    /// Resolve a single URL or video ID.
    async fn fetch_info(&self, locator: &str) -> Result<TrackCandidate, VideoError>;
}

/// Fetches a video's audio track as MP3.
#[async_trait]
pub trait AudioRetriever: Send + Sync {
    /// Download and transcode `locator` into `dir`, returning the MP3 path.
    ///
    /// Progress percentages (0-100) go to `progress` when given.
    async fn retrieve(
        &self,
        locator: &str,
        dir: &Path,
        bitrate_kbps: u32,
        progress: Option<mpsc::UnboundedSender<f32>>,
    ) -> Result<PathBuf, DownloadError>;
}

/// Search errors
#[derive(Debug, thiserror::Error)]
pub enum VideoError {
    #[error("{0} not found. Install yt-dlp: https://github.com/yt-dlp/yt-dlp")]
    ToolMissing(String),

    #[error("yt-dlp failed: {0}")]
    Failed(String),

    #[error("Unexpected yt-dlp output: {0}")]
    Parse(String),

    #[error("No video found for {0}")]
    NotFound(String),
}

/// Watch URL for a bare video ID.
pub fn watch_url(id: &str) -> String {
    format!("https://www.youtube.com/watch?v={}", id)
}

/// A locator the user typed: a URL is kept, anything else is taken as an ID.
pub fn normalize_locator(input: &str) -> String {
    let input = input.trim();
    if input.starts_with("http://") || input.starts_with("https://") {
        input.to_string()
    } else {
        watch_url(input)
    }
}

/// Convert a yt-dlp dump into a candidate.
pub fn to_candidate(info: dto::VideoInfo) -> TrackCandidate {
    let locator = info
        .webpage_url
        .or(info.url.filter(|u| u.starts_with("http")))
        .unwrap_or_else(|| watch_url(&info.id));

    let thumbnail_url = info.thumbnail.or_else(|| {
        info.thumbnails
            .into_iter()
            .max_by_key(|t| t.width.unwrap_or(0))
            .map(|t| t.url)
    });

    TrackCandidate {
        title: info
            .title
            .filter(|t| !t.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_TITLE.to_string()),
        channel: info
            .uploader
            .or(info.channel)
            .filter(|c| !c.trim().is_empty())
            .unwrap_or_else(|| UNKNOWN_UPLOADER.to_string()),
        duration_seconds: info.duration.filter(|d| *d > 0.0).map(|d| d.round() as u64),
        thumbnail_url,
        locator,
        id: info.id,
    }
}

/// Mock collaborators for testing.
#[cfg(test)]
pub mod mocks {
    use std::sync::Mutex;

    use super::*;
    use crate::test_utils::synthetic_mp3;

    /// Returns fixed candidates for any query.
    pub struct MockSearch {
        pub results: Vec<TrackCandidate>,
        pub queries: Mutex<Vec<String>>,
    }

    impl MockSearch {
        pub fn with_results(results: Vec<TrackCandidate>) -> Self {
            Self {
                results,
                queries: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl VideoSearch for MockSearch {
        async fn search(&self, query: &str, limit: usize) -> Result<Vec<TrackCandidate>, VideoError> {
            if let Ok(mut queries) = self.queries.lock() {
                queries.push(query.to_string());
            }
            Ok(self.results.iter().take(limit).cloned().collect())
        }

        async fn fetch_info(&self, locator: &str) -> Result<TrackCandidate, VideoError> {
            self.results
                .iter()
                .find(|c| c.locator == locator || c.id == locator)
                .cloned()
                .ok_or_else(|| VideoError::NotFound(locator.to_string()))
        }
    }

    /// Writes a synthetic MP3 instead of downloading.
    pub struct MockRetriever {
        pub fail_with: Option<fn() -> DownloadError>,
    }

    impl MockRetriever {
        pub fn working() -> Self {
            Self { fail_with: None }
        }

        pub fn failing(error: fn() -> DownloadError) -> Self {
            Self {
                fail_with: Some(error),
            }
        }
    }

    #[async_trait]
    impl AudioRetriever for MockRetriever {
        async fn retrieve(
            &self,
            _locator: &str,
            dir: &Path,
            _bitrate_kbps: u32,
            progress: Option<mpsc::UnboundedSender<f32>>,
        ) -> Result<PathBuf, DownloadError> {
            if let Some(error) = self.fail_with {
                return Err(error());
            }
            if let Some(tx) = progress {
                for pct in [0.0, 50.0, 100.0] {
                    let _ = tx.send(pct);
                }
            }
            Ok(synthetic_mp3(dir, "audio.mp3"))
        }
    }
}
