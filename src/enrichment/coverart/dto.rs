//! Cover Art Archive API Data Transfer Objects
//!
//! The Cover Art Archive (https://coverartarchive.org) provides album artwork
//! for MusicBrainz releases. It's a free service with no API key required.
//!
//! API Reference: https://wiki.musicbrainz.org/Cover_Art_Archive/API

use serde::{Deserialize, Serialize};

/// Cover art listing for a release
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CoverArtResponse {
    /// Array of images for this release
    #[serde(default)]
    pub images: Vec<Image>,
    /// URL of the release on MusicBrainz
    pub release: Option<String>,
}

/// A single cover art image
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Image {
    /// Whether this is the front cover
    #[serde(default)]
    pub front: bool,
    /// Whether this is the back cover
    #[serde(default)]
    pub back: bool,
    /// Image types (Front, Back, Booklet, etc.)
    #[serde(default)]
    pub types: Vec<String>,
    /// URL to full-size image
    pub image: Option<String>,
    /// Thumbnail URLs
    pub thumbnails: Option<Thumbnails>,
    /// Whether this is approved
    #[serde(default)]
    pub approved: bool,
    /// Comment about the image
    pub comment: Option<String>,
}

/// Available thumbnail sizes
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Thumbnails {
    /// 250px thumbnail
    #[serde(rename = "250")]
    pub small: Option<String>,
    /// 500px thumbnail
    #[serde(rename = "500")]
    pub large: Option<String>,
    /// 1200px thumbnail (if available)
    #[serde(rename = "1200")]
    pub xlarge: Option<String>,
}

impl Image {
    /// Candidate label: the first image type, e.g. "MusicBrainz (Back)".
    pub fn label(&self, source: &str) -> String {
        let kind = self
            .types
            .first()
            .map(String::as_str)
            .unwrap_or("Additional");
        format!("{source} ({kind})")
    }
}

#[cfg(test)]
mod contract_tests {
    use super::*;

    #[test]
    fn test_parse_cover_art_response() {
        let json = r#"{
            "images": [{
                "front": true,
                "back": false,
                "types": ["Front"],
                "image": "http://coverartarchive.org/release/abc/123.jpg",
                "thumbnails": {
                    "250": "http://coverartarchive.org/release/abc/123-250.jpg",
                    "500": "http://coverartarchive.org/release/abc/123-500.jpg"
                },
                "approved": true,
                "edit": 17,
                "id": 123,
                "comment": ""
            }],
            "release": "https://musicbrainz.org/release/abc"
        }"#;

        let response: CoverArtResponse =
            serde_json::from_str(json).expect("Should parse cover art response");

        assert_eq!(response.images.len(), 1);
        assert!(response.images[0].front);
        assert!(!response.images[0].back);
        assert_eq!(response.images[0].types, vec!["Front"]);
    }

    #[test]
    fn test_parse_minimal_response() {
        let json = r#"{
            "images": [],
            "release": "https://musicbrainz.org/release/xyz"
        }"#;

        let response: CoverArtResponse =
            serde_json::from_str(json).expect("Should parse empty response");

        assert!(response.images.is_empty());
    }

    #[test]
    fn test_image_labels() {
        let json = r#"{
            "images": [
                {"front": false, "back": true, "types": ["Back", "Spine"], "image": "http://example.com/back.jpg"},
                {"front": false, "types": [], "image": "http://example.com/misc.jpg"}
            ]
        }"#;

        let response: CoverArtResponse =
            serde_json::from_str(json).expect("Should parse images without thumbnails");

        assert_eq!(response.images[0].label("MusicBrainz"), "MusicBrainz (Back)");
        assert_eq!(response.images[1].label("MusicBrainz"), "MusicBrainz (Additional)");
        assert!(response.images[1].thumbnails.is_none());
    }
}
