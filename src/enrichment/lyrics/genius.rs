//! Genius lyrics: public search API plus a scrape of the song page.
//!
//! Genius has no lyrics endpoint, so the song URL from search is fetched and
//! the `data-lyrics-container` blocks are pulled out of the HTML.

use std::sync::LazyLock;

use regex::Regex;

use crate::enrichment::domain::SourceError;
use crate::enrichment::http::{BROWSER_USER_AGENT, HttpSettings, check_status};

pub const LABEL: &str = "Genius";

static LYRICS_CONTAINER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<div data-lyrics-container="true"[^>]*>"#).unwrap());

/// Opening or closing `div` tag; group 1 is `/` for a closing tag.
static DIV_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<(/?)div\b[^>]*>").unwrap());

static BR_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

static ANY_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

mod dto {
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    pub struct SearchResponse {
        pub response: Option<SearchBody>,
    }

    #[derive(Debug, Deserialize)]
    pub struct SearchBody {
        #[serde(default)]
        pub sections: Vec<Section>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Section {
        #[serde(rename = "type")]
        pub section_type: String,
        #[serde(default)]
        pub hits: Vec<Hit>,
    }

    #[derive(Debug, Deserialize)]
    pub struct Hit {
        pub result: HitResult,
    }

    #[derive(Debug, Deserialize)]
    pub struct HitResult {
        pub url: Option<String>,
    }
}

/// Genius client
#[derive(Clone)]
pub struct GeniusClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl GeniusClient {
    /// Create a new client. Always uses a browser user agent.
    pub fn new(settings: &HttpSettings) -> Self {
        Self {
            http_client: settings.with_user_agent(BROWSER_USER_AGENT).build_client(),
            base_url: "https://genius.com".to_string(),
        }
    }

    /// Create a client for testing with custom base URL
    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpSettings::default().build_client(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        let song_url = self.search_song_url(artist, title).await?;

        let response = self.http_client.get(&song_url).send().await?;
        let html = check_status(response)?.text().await?;

        extract_lyrics(&html).ok_or(SourceError::NoData)
    }

    /// URL of the top song hit
    async fn search_song_url(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        let query = format!("{artist} {title}");
        let url = format!(
            "{}/api/search/multi?q={}",
            self.base_url,
            urlencoding::encode(&query)
        );

        let response = self.http_client.get(&url).send().await?;
        let search = check_status(response)?
            .json::<dto::SearchResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        song_url(search).ok_or(SourceError::NoData)
    }
}

fn song_url(search: dto::SearchResponse) -> Option<String> {
    search
        .response?
        .sections
        .into_iter()
        .find(|s| s.section_type == "song")?
        .hits
        .into_iter()
        .next()?
        .result
        .url
}

/// Pull lyrics text out of a Genius song page.
fn extract_lyrics(html: &str) -> Option<String> {
    let blocks = container_blocks(html);

    if blocks.is_empty() {
        return None;
    }

    let combined = blocks.join("\n");
    let text = BR_TAG.replace_all(&combined, "\n");
    let text = ANY_TAG.replace_all(&text, "");
    let text = text.trim();

    (!text.is_empty()).then(|| text.to_string())
}

/// Inner HTML of every lyrics container, up to its matching `</div>`.
///
/// Containers hold nested `div`s (annotations, ads), so the closing tag is
/// found by depth rather than by the first `</div>`. An unterminated
/// container runs to the end of the page.
fn container_blocks(html: &str) -> Vec<&str> {
    let mut blocks = Vec::new();
    let mut pos = 0;

    while let Some(open) = LYRICS_CONTAINER.find_at(html, pos) {
        let start = open.end();
        let mut depth = 1;
        let mut end = html.len();

        for tag in DIV_TAG.captures_iter(&html[start..]) {
            let whole = tag.get(0).map_or(0..0, |m| m.range());
            if &tag[1] == "/" {
                depth -= 1;
                if depth == 0 {
                    end = start + whole.start;
                    break;
                }
            } else {
                depth += 1;
            }
        }

        blocks.push(&html[start..end]);
        pos = end;
    }
    blocks
}
