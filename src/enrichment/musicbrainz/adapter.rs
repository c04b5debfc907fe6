//! Adapter layer: Convert MusicBrainz DTOs to domain models
//!
//! This is the ONLY place where DTO types are converted to domain types.
//! This isolates API changes - if MusicBrainz changes their response format,
//! only this file and dto.rs need to change.

use super::dto;
use crate::enrichment::domain::{MetadataFields, SourceMetadata, format_track_number, year_from_date};

/// Tags accepted as genres. MusicBrainz tags are free-form, so anything
/// outside this list (moods, decades, "seen live") is ignored.
const GENRE_WHITELIST: [&str; 18] = [
    "rock", "pop", "jazz", "classical", "electronic", "hip-hop", "rap", "metal", "country",
    "folk", "blues", "r&b", "reggae", "indie", "dance", "ambient", "punk", "latin",
];

/// Genres kept from the tag list
const MAX_GENRES: usize = 2;

/// Convert the best recording search hit into source metadata.
///
/// Album and year come from the first listed release. Track number needs a
/// separate release lookup, see [`track_number`].
pub fn to_source_metadata(recording: &dto::Recording) -> SourceMetadata {
    let release = recording.releases.first();

    let fields = MetadataFields {
        album: release
            .map(|r| r.title.trim().to_string())
            .filter(|t| !t.is_empty()),
        year: release.and_then(|r| r.date.as_deref()).and_then(year_from_date),
        genre: extract_genres(&recording.tags),
        track_number: None,
    };

    SourceMetadata {
        fields,
        release_id: release.map(|r| r.id.clone()),
    }
}

/// Find where a recording sits on a release.
///
/// Returns `"<disc>/<track>"` for multi-disc releases, otherwise `"<track>"`.
pub fn track_number(release: &dto::ReleaseResponse, recording_id: &str) -> Option<String> {
    let disc_count = release.media.len() as u32;

    release.media.iter().find_map(|medium| {
        medium
            .tracks
            .iter()
            .find(|t| t.recording.as_ref().is_some_and(|r| r.id == recording_id))
            .and_then(|t| t.position)
            .map(|position| format_track_number(position, medium.position, disc_count))
    })
}

/// Whitelisted tags with positive votes, in listed order, joined by ", ".
fn extract_genres(tags: &[dto::Tag]) -> Option<String> {
    let genres: Vec<&str> = tags
        .iter()
        .filter(|t| t.count > 0)
        .filter(|t| GENRE_WHITELIST.contains(&t.name.to_lowercase().as_str()))
        .map(|t| t.name.as_str())
        .take(MAX_GENRES)
        .collect();

    (!genres.is_empty()).then(|| genres.join(", "))
}
