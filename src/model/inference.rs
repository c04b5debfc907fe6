//! Title/artist inference from raw video titles.
//!
//! Video titles follow loose conventions ("Artist - Song (Official Video)",
//! "Song by Artist"). These heuristics split them into a title and artist;
//! the channel name is the artist of last resort.

use std::sync::LazyLock;

use regex::Regex;

/// Parenthesized/bracketed text and the literal noise tokens.
///
/// The tokens are matched case-sensitively, so "Lyrics" inside a real song
/// title is removed too.
static TITLE_NOISE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(.*?\)|\[.*?\]|Official Video|Lyrics").unwrap());

static BY_SEPARATOR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)\s+by\s+").unwrap());

/// Split a raw video title into `(title, artist)`.
///
/// `"Artist - Song"` splits on the first `" - "`; everything after it stays in
/// the title. Without a dash, `"Song by Artist"` is tried; failing that the
/// fallback artist is used as-is.
pub fn infer_title_artist(raw_title: &str, fallback_artist: &str) -> (String, String) {
    let segments: Vec<&str> = raw_title.split(" - ").collect();

    if segments.len() >= 2 {
        let artist = segments[0].trim().to_string();
        let title = clean_title(&segments[1..].join(" - "));
        return (title, artist);
    }

    let title = clean_title(raw_title);
    let parts: Vec<&str> = BY_SEPARATOR.split(&title).collect();
    if parts.len() >= 2 {
        return (parts[0].trim().to_string(), parts[1].trim().to_string());
    }

    (title, fallback_artist.trim().to_string())
}

/// Strip bracketed text and noise tokens from a title.
pub fn clean_title(title: &str) -> String {
    TITLE_NOISE.replace_all(title, "").trim().to_string()
}
