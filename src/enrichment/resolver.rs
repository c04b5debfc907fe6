//! Metadata resolution across the primary and secondary sources.

use std::sync::Arc;

use super::domain::{ResolvedMetadata, SourceError, SourceMetadata};
use super::http::HttpSettings;
use super::itunes::ItunesClient;
use super::musicbrainz::MusicBrainzClient;
use super::traits::MetadataApi;

/// Queries both sources concurrently and merges field by field.
///
/// The primary source wins every field it has; the secondary only fills the
/// gaps. Precedence is applied after both finish, so the answer does not
/// depend on which one responded first.
#[derive(Clone)]
pub struct MetadataResolver {
    primary: Arc<dyn MetadataApi>,
    secondary: Arc<dyn MetadataApi>,
}

impl MetadataResolver {
    pub fn new(primary: Arc<dyn MetadataApi>, secondary: Arc<dyn MetadataApi>) -> Self {
        Self { primary, secondary }
    }

    /// MusicBrainz as primary, iTunes as secondary.
    pub fn standard(settings: &HttpSettings) -> Self {
        Self::new(
            Arc::new(MusicBrainzClient::new(settings)),
            Arc::new(ItunesClient::new(settings)),
        )
    }

    pub async fn resolve(&self, artist: &str, title: &str) -> ResolvedMetadata {
        let (primary, secondary) = tokio::join!(
            self.primary.lookup(artist, title),
            self.secondary.lookup(artist, title)
        );

        let primary = log_outcome(self.primary.label(), primary);
        let secondary = log_outcome(self.secondary.label(), secondary);

        merge(
            (self.primary.label(), primary),
            (self.secondary.label(), secondary),
        )
    }
}

/// Field-level merge with primary precedence.
pub fn merge(
    primary: (&'static str, Option<SourceMetadata>),
    secondary: (&'static str, Option<SourceMetadata>),
) -> ResolvedMetadata {
    let mut resolved = ResolvedMetadata::default();

    for (label, metadata) in [primary, secondary] {
        let Some(metadata) = metadata else { continue };

        let before = resolved.fields.clone();
        resolved.fields.merge(&metadata.fields);
        if resolved.fields != before {
            resolved.sources.push(label);
        }

        if resolved.release_id.is_none() {
            resolved.release_id = metadata.release_id;
        }
    }

    resolved
}

fn log_outcome(
    label: &'static str,
    result: Result<SourceMetadata, SourceError>,
) -> Option<SourceMetadata> {
    match result {
        Ok(metadata) => {
            tracing::debug!(source = label, ?metadata.fields, "Metadata found");
            Some(metadata)
        }
        Err(SourceError::NoData) => {
            tracing::debug!(source = label, "No metadata");
            None
        }
        Err(e) => {
            tracing::warn!(source = label, "Metadata lookup failed: {}", e);
            None
        }
    }
}
