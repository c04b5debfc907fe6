//! Download pipeline: fetch audio, place it in the library, tag it.
//!
//! Steps, none of them retried:
//! 1. The [`AudioRetriever`] downloads and transcodes to MP3 inside a
//!    scratch directory that is removed afterwards.
//! 2. The MP3 is copied to `<library>/<artist> - <title>.mp3`.
//! 3. The [`TagWriter`] replaces all tags with the session's metadata.
//! 4. The tags are read back and checked.
//!
//! If tagging fails the copied file stays in the library untagged.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::sync::mpsc;

use crate::metadata::{LoftyTagWriter, TagError, TagWriter, WrittenTags};
use crate::model::{ArtworkCandidate, TrackMetadata};
use crate::video::{AudioRetriever, YtDlp};

/// Default MP3 bitrate in kbps
pub const DEFAULT_BITRATE_KBPS: u32 = 192;

/// A file that made it into the library with verified tags.
#[derive(Debug, Clone)]
pub struct TaggedFile {
    pub path: PathBuf,
    pub tags: WrittenTags,
}

/// Everything the pipeline needs for one download.
#[derive(Debug, Clone)]
pub struct DownloadJob {
    pub locator: String,
    pub library: PathBuf,
    /// Frozen copy; later session edits don't affect this download
    pub metadata: TrackMetadata,
    pub artwork: Option<ArtworkCandidate>,
}

#[derive(Clone)]
pub struct DownloadPipeline {
    retriever: Arc<dyn AudioRetriever>,
    tagger: Arc<dyn TagWriter>,
    bitrate_kbps: u32,
}

impl DownloadPipeline {
    pub fn new(retriever: Arc<dyn AudioRetriever>, tagger: Arc<dyn TagWriter>, bitrate_kbps: u32) -> Self {
        Self {
            retriever,
            tagger,
            bitrate_kbps,
        }
    }

    /// yt-dlp and lofty, configured from the `[download]` section.
    pub fn from_config(config: &crate::config::DownloadConfig) -> Self {
        Self::new(
            Arc::new(YtDlp::new(config.ytdlp_path.clone())),
            Arc::new(LoftyTagWriter),
            config.bitrate_kbps,
        )
    }

    /// Run the whole pipeline. Progress percentages from the retrieval step
    /// go to `progress` when given.
    pub async fn run(
        &self,
        job: DownloadJob,
        progress: Option<mpsc::UnboundedSender<f32>>,
    ) -> Result<TaggedFile, DownloadError> {
        let scratch = tempfile::tempdir().map_err(|e| DownloadError::file_system(std::env::temp_dir(), e))?;

        tracing::info!("Downloading {} at {} kbps", job.locator, self.bitrate_kbps);
        let audio = self
            .retriever
            .retrieve(&job.locator, scratch.path(), self.bitrate_kbps, progress)
            .await?;

        let destination = job
            .library
            .join(file_name_for(&job.metadata.artist, &job.metadata.title));
        place_in_library(&audio, &destination).await?;

        let tagger = Arc::clone(&self.tagger);
        let path = destination.clone();
        let tags = tokio::task::spawn_blocking(move || {
            tagger
                .write(&path, &job.metadata, job.artwork.as_ref())
                .map_err(DownloadError::TagWrite)?;
            tagger.verify(&path).map_err(DownloadError::TagVerification)
        })
        .await
        .map_err(|e| DownloadError::TagWrite(TagError::TaskJoin(e.to_string())))??;

        tracing::info!("Saved {:?}", destination);
        Ok(TaggedFile {
            path: destination,
            tags,
        })
    }
}

async fn place_in_library(audio: &Path, destination: &Path) -> Result<(), DownloadError> {
    if let Some(dir) = destination.parent() {
        tokio::fs::create_dir_all(dir)
            .await
            .map_err(|e| DownloadError::file_system(dir, e))?;
    }
    tokio::fs::copy(audio, destination)
        .await
        .map_err(|e| DownloadError::file_system(destination, e))?;
    Ok(())
}

/// `"<artist> - <title>"` with path separators and `:` replaced by `-`.
pub fn sanitize_file_stem(artist: &str, title: &str) -> String {
    format!("{} - {}", artist, title).replace(['/', '\\', ':'], "-")
}

/// Library file name for a track.
pub fn file_name_for(artist: &str, title: &str) -> String {
    format!("{}.mp3", sanitize_file_stem(artist, title))
}

/// Download pipeline errors
#[derive(Debug, thiserror::Error)]
pub enum DownloadError {
    #[error("Could not get the audio stream: {0}")]
    StreamResolution(String),

    #[error("Transcoding to MP3 failed: {0}")]
    Transcode(String),

    #[error("File error at {path}: {source}")]
    FileSystem {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Writing tags failed: {0}")]
    TagWrite(#[source] TagError),

    #[error("Tags unreadable after writing: {0}")]
    TagVerification(#[source] TagError),
}

impl DownloadError {
    fn file_system(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileSystem {
            path: path.into(),
            source,
        }
    }
}
