//! Internal domain models for metadata enrichment.
//!
//! These types are OUR types - they don't change when external APIs change.
//! All external API responses get converted into these types via adapters.

/// Album-level fields a metadata source can supply for a track.
///
/// Title and artist are deliberately absent: those only ever come from the
/// selected candidate or the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MetadataFields {
    pub album: Option<String>,
    /// Four-digit release year
    pub year: Option<String>,
    /// Comma-separated genre list
    pub genre: Option<String>,
    /// `"<track>"` or `"<disc>/<track>"`
    pub track_number: Option<String>,
}

impl MetadataFields {
    /// Fill fields that are still empty from `other`.
    ///
    /// Values already present always win, which makes the merge independent
    /// of the order the sources answered in.
    pub fn merge(&mut self, other: &MetadataFields) {
        if self.album.is_none() { self.album = other.album.clone(); }
        if self.year.is_none() { self.year = other.year.clone(); }
        if self.genre.is_none() { self.genre = other.genre.clone(); }
        if self.track_number.is_none() { self.track_number = other.track_number.clone(); }
    }

    pub fn is_empty(&self) -> bool {
        self.album.is_none()
            && self.year.is_none()
            && self.genre.is_none()
            && self.track_number.is_none()
    }
}

/// What one metadata source returned.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceMetadata {
    pub fields: MetadataFields,
    /// MusicBrainz release ID, used to find cover art
    pub release_id: Option<String>,
}

/// Merged result of all metadata sources.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedMetadata {
    pub fields: MetadataFields,
    pub release_id: Option<String>,
    /// Labels of the sources that contributed at least one field
    pub sources: Vec<&'static str>,
}

/// Lyrics text and the label of the service that had it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LyricsHit {
    pub text: String,
    pub source: &'static str,
}

/// Format a track position, prefixing the disc when the release has several.
pub fn format_track_number(track: u32, disc: Option<u32>, disc_count: u32) -> String {
    match disc {
        Some(disc) if disc_count > 1 => format!("{disc}/{track}"),
        _ => track.to_string(),
    }
}

/// Take the year from a date string such as `2017-02-01` or `2017-02-01T08:00:00Z`.
pub fn year_from_date(date: &str) -> Option<String> {
    let year: String = date.trim().chars().take(4).collect();
    (year.len() == 4 && year.chars().all(|c| c.is_ascii_digit())).then_some(year)
}

/// Errors a single source can report.
///
/// These never escape the resolvers: each is logged and treated as "no data".
#[derive(Debug, Clone, thiserror::Error)]
pub enum SourceError {
    #[error("Source unavailable: {0}")]
    Unavailable(String),

    #[error("Rate limited - try again later")]
    RateLimited,

    #[error("No data found")]
    NoData,

    #[error("Failed to parse response: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(e: reqwest::Error) -> Self {
        SourceError::Unavailable(e.to_string())
    }
}
