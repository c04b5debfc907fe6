//! Async streams for background work (lookups, downloads).

use futures::StreamExt;
use tokio::sync::mpsc;

use super::messages::Message;
use crate::download::{DownloadJob, DownloadPipeline};
use crate::enrichment::{EnrichmentService, LookupRequest};
use crate::session::SelectionToken;

/// Every lookup result for `token`, then `LookupFinished`.
pub fn lookup_stream(
    service: EnrichmentService,
    token: SelectionToken,
    request: LookupRequest,
) -> impl futures::Stream<Item = Message> {
    service
        .enrich(token, request)
        .map(Message::Session)
        .chain(futures::stream::once(async move { Message::LookupFinished(token) }))
}

/// Run one download, reporting progress as it goes.
pub fn download_stream(pipeline: DownloadPipeline, job: DownloadJob) -> impl futures::Stream<Item = Message> {
    async_stream::stream! {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let handle = tokio::spawn(async move { pipeline.run(job, Some(tx)).await });

        // The sender is dropped when the pipeline finishes
        while let Some(pct) = rx.recv().await {
            yield Message::DownloadProgress(pct);
        }

        let result = match handle.await {
            Ok(Ok(tagged)) => Ok(tagged.path),
            Ok(Err(e)) => Err(e.to_string()),
            Err(e) => Err(format!("Download task failed: {}", e)),
        };
        yield Message::DownloadFinished(result);
    }
}
