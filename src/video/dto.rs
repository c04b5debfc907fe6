//! yt-dlp `--dump-json` output shapes.
//!
//! Only the fields we read. Flat-playlist search entries are sparse (no
//! `webpage_url`, thumbnails as a list), single-video dumps are rich, so
//! nearly everything is optional.

use serde::Deserialize;

/// One JSON line from `yt-dlp --dump-json`.
#[derive(Debug, Clone, Deserialize)]
pub struct VideoInfo {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub uploader: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    /// Seconds; yt-dlp reports a float
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default)]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub thumbnails: Vec<Thumbnail>,
    #[serde(default)]
    pub webpage_url: Option<String>,
    /// Flat entries carry the watch URL here instead of `webpage_url`
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: Option<u32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flat_search_entry() {
        let json = r#"{
            "_type": "url",
            "ie_key": "Youtube",
            "id": "7wtfhZwyrcc",
            "url": "https://www.youtube.com/watch?v=7wtfhZwyrcc",
            "title": "Imagine Dragons - Believer (Official Music Video)",
            "duration": 217.0,
            "channel": "ImagineDragonsVEVO",
            "thumbnails": [
                {"url": "https://i.ytimg.com/vi/7wtfhZwyrcc/hqdefault.jpg", "height": 270, "width": 480}
            ],
            "view_count": 2500000000
        }"#;

        let info: VideoInfo = serde_json::from_str(json).unwrap();
        assert_eq!(info.id, "7wtfhZwyrcc");
        assert_eq!(info.duration, Some(217.0));
        assert!(info.uploader.is_none());
        assert_eq!(info.channel.as_deref(), Some("ImagineDragonsVEVO"));
        assert_eq!(info.thumbnails[0].width, Some(480));
        assert!(info.webpage_url.is_none());
    }

    #[test]
    fn test_parse_minimal_entry() {
        let info: VideoInfo = serde_json::from_str(r#"{"id": "abc"}"#).unwrap();
        assert!(info.title.is_none());
        assert!(info.thumbnails.is_empty());
    }

    #[test]
    fn test_missing_id_is_error() {
        assert!(serde_json::from_str::<VideoInfo>(r#"{"title": "x"}"#).is_err());
    }
}
