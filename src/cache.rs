//! Last search results, persisted so `download <index>` can refer to them.
//!
//! Stored as `last_search.json` next to the config file. Only the most
//! recent search is kept.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result, ResultExt};
use crate::model::TrackCandidate;

pub const CACHE_FILE: &str = "last_search.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchCache {
    pub query: String,
    pub searched_at: DateTime<Utc>,
    pub results: Vec<TrackCandidate>,
}

impl SearchCache {
    pub fn new(query: impl Into<String>, results: Vec<TrackCandidate>) -> Self {
        Self {
            query: query.into(),
            searched_at: Utc::now(),
            results,
        }
    }

    /// Result by 1-based index, as printed by `search`.
    pub fn get(&self, index: usize) -> Option<&TrackCandidate> {
        index.checked_sub(1).and_then(|i| self.results.get(i))
    }
}

/// Default cache location
pub fn cache_path() -> Option<PathBuf> {
    crate::config::config_dir().map(|d| d.join(CACHE_FILE))
}

pub fn save(cache: &SearchCache, path: &Path) -> Result<()> {
    if let Some(dir) = path.parent() {
        std::fs::create_dir_all(dir).with_context(format!("creating {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(cache).with_context("serializing search results")?;
    std::fs::write(path, json).with_context(format!("writing {}", path.display()))?;
    tracing::debug!("Cached {} result(s) to {:?}", cache.results.len(), path);
    Ok(())
}

pub fn load(path: &Path) -> Result<SearchCache> {
    if !path.exists() {
        return Err(Error::not_found(path));
    }
    let json = std::fs::read_to_string(path).with_context(format!("reading {}", path.display()))?;
    serde_json::from_str(&json).with_context(format!("parsing {}", path.display()))
}
