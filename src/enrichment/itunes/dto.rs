//! iTunes Search API Data Transfer Objects
//!
//! These types match what https://itunes.apple.com/search returns for
//! `media=music`. DO NOT use these outside the itunes module.
//!
//! API Reference: https://performance-partners.apple.com/search-api

use serde::{Deserialize, Serialize};

/// Search response envelope
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    pub result_count: u32,
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

/// One search hit (a track, for `media=music`)
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    /// "track", "collection", ...
    pub wrapper_type: Option<String>,
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    /// Album title
    pub collection_name: Option<String>,
    /// ISO 8601 timestamp, e.g. "2017-02-01T12:00:00Z"
    pub release_date: Option<String>,
    pub primary_genre_name: Option<String>,
    /// 100x100 artwork; other sizes by rewriting the dimensions in the URL
    pub artwork_url100: Option<String>,
    pub track_number: Option<u32>,
    pub track_count: Option<u32>,
    pub disc_number: Option<u32>,
    pub disc_count: Option<u32>,
}

// ============================================================================
// CONTRACT TESTS
// ============================================================================
