//! Core data models for a search-and-tag session.
//!
//! Defines the primary entities: [`TrackCandidate`] (one search result),
//! [`TrackMetadata`] (the tag set being built for the selected candidate)
//! and the artwork candidates in [`artwork`].
//!
//! All of these are per-session: they are discarded and rebuilt whenever a
//! new search runs or a different candidate is selected.

pub mod artwork;
pub mod inference;

use serde::{Deserialize, Serialize};

use crate::enrichment::domain::{LyricsHit, MetadataFields};

pub use artwork::{ArtworkCandidate, ArtworkSet, Selection};
pub use inference::{clean_title, infer_title_artist};

/// Text shown in place of lyrics when no source had any.
///
/// Never treated as real lyrics: it is not written to tags and does not
/// count as "already set" when lyrics are looked up again.
pub const NO_LYRICS_PLACEHOLDER: &str = "No lyrics found. You can add them manually.";

/// A single search result representing one remote video.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCandidate {
    /// Platform video ID
    pub id: String,
    /// Raw video title (artist/title are inferred from this)
    pub title: String,
    /// Uploader / channel name, used as the fallback artist
    pub channel: String,
    /// Duration in whole seconds, if the platform reported one
    pub duration_seconds: Option<u64>,
    /// Thumbnail image URL
    pub thumbnail_url: Option<String>,
    /// URL handed to the audio retrieval tool
    pub locator: String,
}

impl TrackCandidate {
    /// Duration formatted as `MM:SS`, or "Unknown".
    pub fn duration_label(&self) -> String {
        match self.duration_seconds {
            Some(secs) if secs > 0 => format!("{:02}:{:02}", secs / 60, secs % 60),
            _ => "Unknown".to_string(),
        }
    }
}

/// The tag set for the selected candidate.
///
/// `title` and `artist` are fixed when the candidate is selected. Everything
/// else is filled by the resolvers, and only while still empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackMetadata {
    pub title: String,
    pub artist: String,
    pub album: Option<String>,
    pub year: Option<String>,
    pub genre: Option<String>,
    /// `"<track>"` or `"<disc>/<track>"` for multi-disc releases
    pub track_number: Option<String>,
    pub lyrics: Option<String>,
    /// Label of the service the lyrics came from
    pub lyrics_source: Option<String>,
}

impl TrackMetadata {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            artist: artist.into(),
            ..Default::default()
        }
    }

    /// Derive title and artist from a candidate's raw title.
    pub fn from_candidate(candidate: &TrackCandidate) -> Self {
        let (title, artist) = infer_title_artist(&candidate.title, &candidate.channel);
        Self::new(title, artist)
    }

    /// Fill empty fields from resolved metadata. Returns how many were filled.
    ///
    /// Fields that already hold a value (from a user edit or an earlier
    /// fill) are left alone, as are title and artist.
    pub fn fill_from(&mut self, fields: &MetadataFields) -> usize {
        let mut filled = 0;
        filled += fill(&mut self.album, &fields.album) as usize;
        filled += fill(&mut self.year, &fields.year) as usize;
        filled += fill(&mut self.genre, &fields.genre) as usize;
        filled += fill(&mut self.track_number, &fields.track_number) as usize;
        filled
    }

    /// Store lyrics unless real lyrics are already present.
    pub fn fill_lyrics(&mut self, hit: &LyricsHit) -> bool {
        if self.real_lyrics().is_some() {
            return false;
        }
        self.lyrics = Some(hit.text.clone());
        self.lyrics_source = Some(hit.source.to_string());
        true
    }

    /// Lyrics text, unless blank or the "no lyrics" placeholder.
    pub fn real_lyrics(&self) -> Option<&str> {
        self.lyrics
            .as_deref()
            .map(str::trim)
            .filter(|l| !l.is_empty() && *l != NO_LYRICS_PLACEHOLDER)
    }

    /// Title and artist are both present.
    pub fn is_resolved(&self) -> bool {
        !self.title.trim().is_empty() && !self.artist.trim().is_empty()
    }
}

fn fill(slot: &mut Option<String>, value: &Option<String>) -> bool {
    let empty = slot.as_deref().is_none_or(|s| s.trim().is_empty());
    match value {
        Some(v) if empty && !v.trim().is_empty() => {
            *slot = Some(v.clone());
            true
        }
        _ => false,
    }
}
