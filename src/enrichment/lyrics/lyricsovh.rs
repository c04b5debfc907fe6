//! lyrics.ovh, a free keyless lyrics API.

use serde::Deserialize;

use crate::enrichment::domain::SourceError;
use crate::enrichment::http::{HttpSettings, check_status};

pub const LABEL: &str = "Lyrics.ovh";

#[derive(Debug, Deserialize)]
struct LyricsResponse {
    lyrics: Option<String>,
}

#[derive(Clone)]
pub struct LyricsOvhClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl LyricsOvhClient {
    pub fn new(settings: &HttpSettings) -> Self {
        Self {
            http_client: settings.build_client(),
            base_url: "https://api.lyrics.ovh/v1".to_string(),
        }
    }

    #[cfg(test)]
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Self {
            http_client: HttpSettings::default().build_client(),
            base_url: base_url.into(),
        }
    }

    pub async fn fetch(&self, artist: &str, title: &str) -> Result<String, SourceError> {
        let response = self.http_client.get(self.url(artist, title)).send().await?;
        let body = check_status(response)?
            .json::<LyricsResponse>()
            .await
            .map_err(|e| SourceError::Parse(e.to_string()))?;

        body.lyrics
            .filter(|l| !l.trim().is_empty())
            .ok_or(SourceError::NoData)
    }

    fn url(&self, artist: &str, title: &str) -> String {
        format!(
            "{}/{}/{}",
            self.base_url,
            urlencoding::encode(artist),
            urlencoding::encode(title)
        )
    }
}
