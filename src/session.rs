//! Per-selection state: the chosen candidate, the metadata being built for
//! it and the artwork set.
//!
//! Background lookups never touch the session directly. They send
//! [`SessionEvent`]s tagged with the [`SelectionToken`] they were started
//! under, and a single consumer calls [`Session::apply`]. Selecting another
//! candidate issues a new token, so answers that arrive late for the old
//! selection are dropped instead of leaking into the new one.
//!
//! Fields the user types go through [`Session::edit`] and are remembered,
//! so [`Session::relookup`] can throw away what the previous lookup filled
//! while keeping the user's own values.

use std::collections::HashSet;
use std::fmt;

use crate::enrichment::domain::{LyricsHit, ResolvedMetadata};
use crate::model::{ArtworkCandidate, ArtworkSet, NO_LYRICS_PLACEHOLDER, TrackCandidate, TrackMetadata};

/// Identifies one selection. Strictly increasing within a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SelectionToken(u64);

impl fmt::Display for SelectionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A lookup result bound to the selection that requested it.
#[derive(Debug, Clone)]
pub struct SessionEvent {
    pub token: SelectionToken,
    pub update: SessionUpdate,
}

#[derive(Debug, Clone)]
pub enum SessionUpdate {
    /// Merged album-level metadata
    Metadata(ResolvedMetadata),
    /// Lyrics lookup finished; `None` when no source had any
    Lyrics(Option<LyricsHit>),
    /// One more artwork candidate
    Artwork(ArtworkCandidate),
}

/// What applying an event did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Applied {
    /// Event belonged to an earlier selection and was dropped
    Stale,
    /// Metadata merged; number of fields filled
    Metadata { filled: usize },
    /// Lyrics stored from the given source
    Lyrics { source: &'static str },
    /// No source had lyrics, or lyrics were already present
    NoLyrics,
    /// Artwork appended at this index
    Artwork { index: usize },
}

/// Tag fields the lookups fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LookupField {
    Album,
    Year,
    Genre,
    TrackNumber,
    Lyrics,
}

impl LookupField {
    pub const ALL: [LookupField; 5] = [
        LookupField::Album,
        LookupField::Year,
        LookupField::Genre,
        LookupField::TrackNumber,
        LookupField::Lyrics,
    ];
}

#[derive(Debug, Default)]
pub struct Session {
    token: SelectionToken,
    candidate: Option<TrackCandidate>,
    metadata: TrackMetadata,
    artwork: ArtworkSet,
    /// Fields currently holding a value the user typed
    user_fields: HashSet<LookupField>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new selection. Title and artist are inferred from the
    /// candidate; everything else starts empty.
    pub fn select(&mut self, candidate: TrackCandidate) -> SelectionToken {
        self.metadata = TrackMetadata::from_candidate(&candidate);
        self.candidate = Some(candidate);
        self.artwork = ArtworkSet::new();
        self.user_fields.clear();
        self.advance()
    }

    /// Start over with the current title/artist, e.g. after the user
    /// corrected them. Everything the previous lookup filled is cleared so
    /// the new results can land; fields the user typed are kept.
    pub fn relookup(&mut self) -> SelectionToken {
        for field in LookupField::ALL {
            if !self.user_fields.contains(&field) {
                self.set_field(field, None);
            }
        }
        self.artwork = ArtworkSet::new();
        self.advance()
    }

    /// User input for a lookup-filled field. A value sticks across
    /// relookups; blank input empties the field and hands it back to the
    /// lookups.
    pub fn edit(&mut self, field: LookupField, value: Option<String>) {
        let value = value.filter(|v| !v.trim().is_empty());
        if value.is_some() {
            self.user_fields.insert(field);
        } else {
            self.user_fields.remove(&field);
        }
        self.set_field(field, value);
    }

    /// Whether `field` holds a value the user typed.
    pub fn is_user_set(&self, field: LookupField) -> bool {
        self.user_fields.contains(&field)
    }

    fn set_field(&mut self, field: LookupField, value: Option<String>) {
        let metadata = &mut self.metadata;
        match field {
            LookupField::Album => metadata.album = value,
            LookupField::Year => metadata.year = value,
            LookupField::Genre => metadata.genre = value,
            LookupField::TrackNumber => metadata.track_number = value,
            LookupField::Lyrics => {
                metadata.lyrics = value;
                metadata.lyrics_source = None;
            }
        }
    }

    /// Forget the selection (a new search started).
    pub fn clear(&mut self) -> SelectionToken {
        self.candidate = None;
        self.metadata = TrackMetadata::default();
        self.artwork = ArtworkSet::new();
        self.user_fields.clear();
        self.advance()
    }

    fn advance(&mut self) -> SelectionToken {
        self.token = SelectionToken(self.token.0 + 1);
        self.token
    }

    /// Apply an event from a background lookup.
    ///
    /// Events from an earlier selection are dropped. Fields that already
    /// hold a value are never overwritten.
    pub fn apply(&mut self, event: SessionEvent) -> Applied {
        if event.token != self.token {
            tracing::debug!(
                "Dropping stale event for {} (current {})",
                event.token,
                self.token
            );
            return Applied::Stale;
        }

        match event.update {
            SessionUpdate::Metadata(resolved) => {
                let filled = self.metadata.fill_from(&resolved.fields);
                tracing::info!(
                    "Metadata from [{}]: {} field(s) filled",
                    resolved.sources.join(", "),
                    filled
                );
                Applied::Metadata { filled }
            }
            SessionUpdate::Lyrics(Some(hit)) => {
                let source = hit.source;
                if self.metadata.fill_lyrics(&hit) {
                    Applied::Lyrics { source }
                } else {
                    Applied::NoLyrics
                }
            }
            SessionUpdate::Lyrics(None) => {
                if self.metadata.real_lyrics().is_none() {
                    self.metadata.lyrics = Some(NO_LYRICS_PLACEHOLDER.to_string());
                    self.metadata.lyrics_source = None;
                }
                Applied::NoLyrics
            }
            SessionUpdate::Artwork(candidate) => {
                let index = self.artwork.push(candidate);
                Applied::Artwork { index }
            }
        }
    }

    pub fn token(&self) -> SelectionToken {
        self.token
    }

    pub fn candidate(&self) -> Option<&TrackCandidate> {
        self.candidate.as_ref()
    }

    pub fn metadata(&self) -> &TrackMetadata {
        &self.metadata
    }

    /// Direct access for title and artist edits. Lookup-filled fields go
    /// through [`Session::edit`].
    pub fn metadata_mut(&mut self) -> &mut TrackMetadata {
        &mut self.metadata
    }

    pub fn artwork(&self) -> &ArtworkSet {
        &self.artwork
    }

    pub fn artwork_mut(&mut self) -> &mut ArtworkSet {
        &mut self.artwork
    }

    /// Frozen copies of the metadata and selected artwork for tagging.
    pub fn snapshot(&self) -> (TrackMetadata, Option<ArtworkCandidate>) {
        (self.metadata.clone(), self.artwork.selected().cloned())
    }
}
