//! Adapter layer: Convert iTunes DTOs to domain models
//!
//! This is the ONLY place where iTunes DTO types are converted to domain types.

use super::dto;
use crate::enrichment::domain::{MetadataFields, SourceMetadata, format_track_number, year_from_date};

/// Convert a search hit into source metadata.
pub fn to_source_metadata(result: &dto::SearchResult) -> SourceMetadata {
    let fields = MetadataFields {
        album: non_empty(result.collection_name.as_deref()),
        year: result.release_date.as_deref().and_then(year_from_date),
        genre: non_empty(result.primary_genre_name.as_deref()),
        track_number: result
            .track_number
            .filter(|n| *n > 0)
            .map(|n| format_track_number(n, result.disc_number, result.disc_count.unwrap_or(1))),
    };

    SourceMetadata {
        fields,
        release_id: None,
    }
}

/// Full-size (600x600) artwork URL for a hit.
pub fn artwork_url(result: &dto::SearchResult) -> Option<String> {
    result
        .artwork_url100
        .as_deref()
        .filter(|u| !u.is_empty())
        .map(|u| u.replace("100x100", "600x600"))
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(String::from)
}
