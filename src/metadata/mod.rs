//! Audio file tag writing and verification.
//!
//! Uses the lofty crate for format-independent tag access. Downloads are
//! always MP3, so in practice this writes ID3v2:
//! TIT2/TPE1/TALB/TDRC/TCON/TRCK(+TPOS)/USLT/APIC.
//!
//! Writing is destructive: every existing tag is stripped first so leftovers
//! from the upload (comments, encoder tags, stale covers) never survive.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use lofty::config::WriteOptions;
use lofty::file::TaggedFileExt;
use lofty::picture::{MimeType, Picture, PictureType};
use lofty::probe::Probe;
use lofty::tag::{Accessor, ItemKey, ItemValue, Tag, TagExt, TagItem, TagType};

use crate::model::{ArtworkCandidate, TrackMetadata};

/// Language code written with lyrics
pub const LYRICS_LANGUAGE: [u8; 3] = *b"eng";

/// Tag-writing collaborator.
///
/// Implementations are blocking; async callers should go through
/// `spawn_blocking`.
pub trait TagWriter: Send + Sync {
    /// Replace all tags in `path` with `metadata` and optional cover art.
    fn write(
        &self,
        path: &Path,
        metadata: &TrackMetadata,
        artwork: Option<&ArtworkCandidate>,
    ) -> Result<(), TagError>;

    /// Read the tags back. Fails unless title and artist are present.
    fn verify(&self, path: &Path) -> Result<WrittenTags, TagError>;
}

/// Tags as read back from a file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WrittenTags {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    pub track: Option<u32>,
    pub disc: Option<u32>,
    pub lyrics: Option<String>,
    pub has_cover: bool,
}

/// [`TagWriter`] backed by lofty.
#[derive(Debug, Clone, Copy, Default)]
pub struct LoftyTagWriter;

impl TagWriter for LoftyTagWriter {
    fn write(
        &self,
        path: &Path,
        metadata: &TrackMetadata,
        artwork: Option<&ArtworkCandidate>,
    ) -> Result<(), TagError> {
        clear_tags(path)?;

        let tagged_file = Probe::open(path)
            .and_then(|p| p.read())
            .map_err(|e| TagError::read(path, e))?;
        let tag_type = tagged_file.primary_tag_type();

        let mut tag = Tag::new(tag_type);
        apply_metadata(&mut tag, metadata);

        if let Some(candidate) = artwork {
            tag.push_picture(cover_picture(candidate)?);
        }

        tag.save_to_path(path, WriteOptions::default())
            .map_err(|e| TagError::write(path, e))?;

        tracing::info!("Wrote {:?} tags to {:?}", tag_type, path);
        Ok(())
    }

    fn verify(&self, path: &Path) -> Result<WrittenTags, TagError> {
        let written = read(path)?;
        if written.title.trim().is_empty() || written.artist.trim().is_empty() {
            return Err(TagError::Verification {
                path: path.to_path_buf(),
                reason: "title or artist missing after write".to_string(),
            });
        }
        Ok(written)
    }
}

/// Read the primary tag of `path`.
pub fn read(path: &Path) -> Result<WrittenTags, TagError> {
    let tagged_file = Probe::open(path)
        .and_then(|p| p.read())
        .map_err(|e| TagError::read(path, e))?;

    let Some(tag) = tagged_file.primary_tag().or_else(|| tagged_file.first_tag()) else {
        return Ok(WrittenTags::default());
    };

    Ok(WrittenTags {
        title: tag.title().map(|s| s.to_string()).unwrap_or_default(),
        artist: tag.artist().map(|s| s.to_string()).unwrap_or_default(),
        album: tag.album().map(|s| s.to_string()),
        year: tag.get_string(&ItemKey::RecordingDate).map(str::to_string),
        genre: tag.genre().map(|s| s.to_string()),
        track: tag.track(),
        disc: tag.disk(),
        lyrics: tag.get_string(&ItemKey::Lyrics).map(str::to_string),
        has_cover: !tag.pictures().is_empty(),
    })
}

fn clear_tags(path: &Path) -> Result<(), TagError> {
    let tagged_file = Probe::open(path)
        .and_then(|p| p.read())
        .map_err(|e| TagError::read(path, e))?;

    let present: Vec<TagType> = tagged_file.tags().iter().map(|t| t.tag_type()).collect();
    for tag_type in present {
        tracing::debug!("Removing existing {:?} tag from {:?}", tag_type, path);
        tag_type
            .remove_from_path(path)
            .map_err(|e| TagError::write(path, e))?;
    }
    Ok(())
}

fn apply_metadata(tag: &mut Tag, metadata: &TrackMetadata) {
    tag.set_title(metadata.title.clone());
    tag.set_artist(metadata.artist.clone());

    if let Some(album) = non_blank(&metadata.album) {
        tag.set_album(album.to_string());
    }
    if let Some(year) = non_blank(&metadata.year) {
        tag.insert_text(ItemKey::RecordingDate, year.to_string());
    }
    if let Some(genre) = non_blank(&metadata.genre) {
        tag.set_genre(genre.to_string());
    }
    if let Some((disc, track)) = non_blank(&metadata.track_number).and_then(parse_track_number) {
        tag.set_track(track);
        if let Some(disc) = disc {
            tag.set_disk(disc);
        }
    }
    if let Some(lyrics) = metadata.real_lyrics() {
        let mut item = TagItem::new(ItemKey::Lyrics, ItemValue::Text(lyrics.to_string()));
        item.set_lang(LYRICS_LANGUAGE);
        tag.insert(item);
    }
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Parse `"track"` or `"disc/track"`.
pub fn parse_track_number(value: &str) -> Option<(Option<u32>, u32)> {
    match value.split_once('/') {
        Some((disc, track)) => {
            let track = track.trim().parse().ok()?;
            Some((disc.trim().parse().ok(), track))
        }
        None => Some((None, value.trim().parse().ok()?)),
    }
}

/// Front-cover picture. JPEG and PNG are embedded as-is, anything else
/// (WebP thumbnails) is re-encoded to JPEG.
fn cover_picture(candidate: &ArtworkCandidate) -> Result<Picture, TagError> {
    let bytes = &candidate.image_bytes;
    let (mime, data) = match image::guess_format(bytes) {
        Ok(image::ImageFormat::Jpeg) => (MimeType::Jpeg, bytes.clone()),
        Ok(image::ImageFormat::Png) => (MimeType::Png, bytes.clone()),
        _ => (MimeType::Jpeg, to_jpeg(bytes)?),
    };

    Ok(Picture::new_unchecked(
        PictureType::CoverFront,
        Some(mime),
        Some("Cover".to_string()),
        data,
    ))
}

fn to_jpeg(bytes: &[u8]) -> Result<Vec<u8>, TagError> {
    let decoded = image::load_from_memory(bytes).map_err(|e| TagError::Artwork(e.to_string()))?;
    let mut out = Cursor::new(Vec::new());
    decoded
        .to_rgb8()
        .write_to(&mut out, image::ImageFormat::Jpeg)
        .map_err(|e| TagError::Artwork(e.to_string()))?;
    Ok(out.into_inner())
}

/// Tag errors
#[derive(Debug, thiserror::Error)]
pub enum TagError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("Failed to write tags to {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: lofty::error::LoftyError,
    },

    #[error("Tag verification failed for {path}: {reason}")]
    Verification { path: PathBuf, reason: String },

    #[error("Unusable artwork: {0}")]
    Artwork(String),

    #[error("Tag task failed: {0}")]
    TaskJoin(String),
}

impl TagError {
    fn read(path: &Path, source: lofty::error::LoftyError) -> Self {
        Self::Read {
            path: path.to_path_buf(),
            source,
        }
    }

    fn write(path: &Path, source: lofty::error::LoftyError) -> Self {
        Self::Write {
            path: path.to_path_buf(),
            source,
        }
    }
}
