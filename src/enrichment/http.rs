//! Shared HTTP plumbing for the source clients.
//!
//! Every client gets its own `reqwest::Client` built from [`HttpSettings`],
//! so each one carries a per-request timeout and a user agent.

use std::time::Duration;

use crate::config::NetworkConfig;
use crate::enrichment::domain::SourceError;

/// Default user agent. MusicBrainz rejects requests without a descriptive one.
pub const DEFAULT_USER_AGENT: &str = concat!(
    "LibraryExtender/",
    env!("CARGO_PKG_VERSION"),
    " (https://github.com/library-extender)"
);

/// Desktop browser user agent; Genius serves an empty shell to unknown agents.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
    AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Timeout and identity used when building clients.
#[derive(Debug, Clone)]
pub struct HttpSettings {
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for HttpSettings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(10),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl From<&NetworkConfig> for HttpSettings {
    fn from(config: &NetworkConfig) -> Self {
        let user_agent = config
            .user_agent
            .clone()
            .filter(|ua| !ua.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_USER_AGENT.to_string());
        Self {
            timeout: Duration::from_secs(config.timeout_secs.max(1)),
            user_agent,
        }
    }
}

impl HttpSettings {
    /// Same timeout, different user agent.
    pub fn with_user_agent(&self, user_agent: &str) -> Self {
        Self {
            timeout: self.timeout,
            user_agent: user_agent.to_string(),
        }
    }

    /// Build a client with these settings.
    ///
    /// Falls back to a default client if the TLS backend fails to initialize,
    /// which keeps client constructors infallible.
    pub fn build_client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .user_agent(&self.user_agent)
            .timeout(self.timeout)
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to build HTTP client, using defaults: {}", e);
                reqwest::Client::new()
            })
    }
}

/// Map a non-success status to the source error taxonomy.
pub fn check_status(response: reqwest::Response) -> Result<reqwest::Response, SourceError> {
    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(SourceError::NoData);
    }

    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(SourceError::RateLimited);
    }

    if !status.is_success() {
        return Err(SourceError::Unavailable(format!(
            "HTTP {}: {}",
            status,
            status.canonical_reason().unwrap_or("Unknown")
        )));
    }

    Ok(response)
}

/// Download raw bytes from a URL (images, mostly).
pub async fn fetch_bytes(client: &reqwest::Client, url: &str) -> Result<Vec<u8>, SourceError> {
    let response = client.get(url).send().await?;
    let response = check_status(response)?;
    let bytes = response.bytes().await?;

    if bytes.is_empty() {
        return Err(SourceError::NoData);
    }

    Ok(bytes.to_vec())
}
