//! MusicBrainz API Data Transfer Objects
//!
//! These types match EXACTLY what the MusicBrainz API returns.
//! DO NOT add fields that aren't in the API response.
//! DO NOT use these types outside the musicbrainz module - convert to domain types.
//!
//! API Reference: https://musicbrainz.org/doc/MusicBrainz_API
//!
//! Two endpoints are used: the /recording search (album, year, tags) and the
//! /release lookup with `inc=recordings` (track and disc positions).

use serde::{Deserialize, Serialize};

/// Recording search response
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordingSearchResponse {
    /// Total hits for the query
    pub count: Option<u32>,
    /// Matching recordings, best first
    #[serde(default)]
    pub recordings: Vec<Recording>,
}

/// A recording as returned by search
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Recording {
    /// MusicBrainz recording ID
    pub id: String,
    /// Search relevance (0-100)
    pub score: Option<u32>,
    /// Track title
    pub title: String,
    /// Duration in milliseconds
    pub length: Option<u64>,
    /// Releases this recording appears on
    #[serde(default)]
    pub releases: Vec<ReleaseSummary>,
    /// Folksonomy tags (genres live here)
    #[serde(default)]
    pub tags: Vec<Tag>,
}

/// Release as embedded in a recording search hit
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct ReleaseSummary {
    /// MusicBrainz release ID
    pub id: String,
    /// Release title
    pub title: String,
    /// Release status (Official, Bootleg, etc.)
    pub status: Option<String>,
    /// Release date (YYYY, YYYY-MM, or YYYY-MM-DD)
    pub date: Option<String>,
    /// Country code
    pub country: Option<String>,
    /// Total tracks across all media
    pub track_count: Option<u32>,
}

/// User-submitted tag with vote count
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Tag {
    pub name: String,
    /// Net votes; may be zero or negative
    #[serde(default)]
    pub count: i64,
}

/// Release lookup response (`/release/{id}?inc=recordings`)
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReleaseResponse {
    /// MusicBrainz release ID
    pub id: String,
    /// Release title
    pub title: String,
    /// Release date
    pub date: Option<String>,
    /// Media (discs) in this release
    #[serde(default)]
    pub media: Vec<Medium>,
}

/// Medium (disc) within a release
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct Medium {
    /// Position in release (disc number)
    pub position: Option<u32>,
    /// Format (CD, Vinyl, Digital, etc.)
    pub format: Option<String>,
    /// Number of tracks
    pub track_count: Option<u32>,
    /// Tracks on this medium
    #[serde(default)]
    pub tracks: Vec<Track>,
}

/// Track on a medium
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Track {
    /// Track position on medium
    pub position: Option<u32>,
    /// Track number as printed (may include disc prefix like "1-5" or "A1")
    pub number: Option<String>,
    /// Track title (may differ from recording title)
    pub title: Option<String>,
    /// The recording this track plays
    pub recording: Option<RecordingRef>,
}

/// Minimal recording reference inside a release lookup
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RecordingRef {
    pub id: String,
    pub title: Option<String>,
}

/// Error response from MusicBrainz API
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiError {
    pub error: String,
    pub help: Option<String>,
}

// ============================================================================
// CONTRACT TESTS
// These verify our DTOs match what the real API returns.
// If these fail, the API has changed and we need to update our DTOs.
// ============================================================================

#[cfg(test)]
mod contract_tests {
    use super::*;

    /// Test parsing an empty search result
    #[test]
    fn test_parse_empty_search() {
        let json = r#"{
            "created": "2024-01-01T00:00:00.000Z",
            "count": 0,
            "offset": 0,
            "recordings": []
        }"#;

        let response: RecordingSearchResponse =
            serde_json::from_str(json).expect("Should parse empty search");

        assert_eq!(response.count, Some(0));
        assert!(response.recordings.is_empty());
    }

    /// Test parsing a search hit with releases and tags
    #[test]
    fn test_parse_search_hit() {
        let json = r#"{
            "count": 1,
            "recordings": [{
                "id": "rec-123",
                "score": 100,
                "title": "Believer",
                "length": 204000,
                "artist-credit": [{"name": "Imagine Dragons", "artist": {"id": "a", "name": "Imagine Dragons"}}],
                "releases": [{
                    "id": "rel-123",
                    "status-id": "4e304316",
                    "title": "Evolve",
                    "status": "Official",
                    "date": "2017-06-23",
                    "country": "XW",
                    "track-count": 11,
                    "media": [{"position": 1, "format": "Digital Media", "track": [{"id": "t", "number": "3", "title": "Believer", "length": 204000}], "track-count": 11, "track-offset": 2}]
                }],
                "tags": [
                    {"count": 2, "name": "pop rock"},
                    {"count": 1, "name": "rock"}
                ]
            }]
        }"#;

        let response: RecordingSearchResponse =
            serde_json::from_str(json).expect("Should parse search hit");

        let recording = &response.recordings[0];
        assert_eq!(recording.title, "Believer");
        assert_eq!(recording.score, Some(100));
        assert_eq!(recording.releases[0].title, "Evolve");
        assert_eq!(recording.releases[0].date.as_deref(), Some("2017-06-23"));
        assert_eq!(recording.releases[0].track_count, Some(11));
        assert_eq!(recording.tags.len(), 2);
        assert_eq!(recording.tags[1].name, "rock");
        assert_eq!(recording.tags[1].count, 1);
    }

    /// Test parsing a hit with no releases or tags at all
    #[test]
    fn test_parse_bare_recording() {
        let json = r#"{"recordings": [{"id": "rec-1", "title": "Demo"}]}"#;

        let response: RecordingSearchResponse =
            serde_json::from_str(json).expect("Should parse bare recording");

        assert!(response.recordings[0].releases.is_empty());
        assert!(response.recordings[0].tags.is_empty());
    }

    /// Test parsing a multi-disc release lookup
    #[test]
    fn test_parse_release_lookup() {
        let json = r#"{
            "id": "rel-123",
            "title": "Greatest Hits",
            "date": "1981-10-26",
            "media": [
                {
                    "position": 1,
                    "format": "CD",
                    "track-count": 2,
                    "tracks": [
                        {"position": 1, "number": "1", "title": "One", "recording": {"id": "rec-a", "title": "One"}},
                        {"position": 2, "number": "2", "title": "Two", "recording": {"id": "rec-b", "title": "Two"}}
                    ]
                },
                {
                    "position": 2,
                    "format": "CD",
                    "track-count": 1,
                    "tracks": [
                        {"position": 1, "number": "1", "title": "Three", "recording": {"id": "rec-c", "title": "Three"}}
                    ]
                }
            ]
        }"#;

        let release: ReleaseResponse =
            serde_json::from_str(json).expect("Should parse release lookup");

        assert_eq!(release.media.len(), 2);
        assert_eq!(release.media[1].position, Some(2));
        assert_eq!(release.media[0].track_count, Some(2));
        let track = &release.media[1].tracks[0];
        assert_eq!(track.recording.as_ref().unwrap().id, "rec-c");
    }

    /// Test parsing error response
    #[test]
    fn test_parse_error_response() {
        let json = r#"{
            "error": "Not Found",
            "help": "For usage, please see: https://musicbrainz.org/doc/MusicBrainz_API"
        }"#;

        let error: ApiError = serde_json::from_str(json).expect("Should parse error");
        assert_eq!(error.error, "Not Found");
        assert!(error.help.is_some());
    }
}
