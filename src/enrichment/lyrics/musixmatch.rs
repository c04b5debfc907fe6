//! Musixmatch `matcher.lyrics.get`.
//!
//! Needs an API key; without one this source always reports no data. Free
//! keys return only the first part of the lyrics.

use serde::Deserialize;

use crate::enrichment::domain::SourceError;
use crate::enrichment::http::{HttpSettings, check_status};

pub const LABEL: &str = "MusixMatch";

#[derive(Debug, Deserialize)]
struct Envelope {
    message: Message,
}

#[derive(Debug, Deserialize)]
struct Message {
    header: Header,
    /// An object on success, an empty array otherwise
    #[serde(default)]
    body: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct Header {
    status_code: u16,
}

#[derive(Debug, Deserialize)]
struct Body {
    lyrics: Option<Lyrics>,
}

#[derive(Debug, Deserialize)]
struct Lyrics {
    #[serde(default)]
    lyrics_body: String,
}

/// Musixmatch client
#[derive(Clone)]
pub struct MusixmatchClient {
    http_client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl MusixmatchClient {
    pub fn new(settings: &HttpSettings, api_key: Option<String>) -> Self {
        Self {
            http_client: settings.build_client(),
            base_url: "https://api.musixmatch.com/ws/1.1".to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    pub async fn fetch(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        let Some(ref api_key) = self.api_key else {
            return Err(SourceError::NoData);
        };

        let url = format!(
            "{}/matcher.lyrics.get?format=json&q_track={}&q_artist={}&apikey={}",
            self.base_url,
            urlencoding::encode(title),
            urlencoding::encode(artist),
            urlencoding::encode(api_key)
        );

        let response = self.http_client.get(&url).send().await?;
        let envelope = check_status(response)?
            .json::<Envelope>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        parse_envelope(envelope)
    }
}

fn parse_envelope(envelope: Envelope) -> Result<String, SourceError> {
    match envelope.message.header.status_code {
        200 => {}
        401 | 402 => return Err(SourceError::Unavailable("API key rejected".to_string())),
        429 => return Err(SourceError::RateLimited),
        _ => return Err(SourceError::NoData),
    }

    let body: Body = serde_json::from_value(envelope.message.body)
        .map_err(|e| SourceError::Parse(e.to_string()))?;

    let text = body.lyrics.map(|l| l.lyrics_body).unwrap_or_default();
    let text = strip_truncation_notice(&text);

    if text.trim().is_empty() {
        Err(SourceError::NoData)
    } else {
        Ok(text)
    }
}

/// Cut a preview-truncated body at its ellipsis.
fn strip_truncation_notice(text: &str) -> String {
    if text.contains("...") && text.contains("Paroles") {
        let head = text.split("...").next().unwrap_or_default();
        format!("{}...", head.trim())
    } else {
        text.to_string()
    }
}
