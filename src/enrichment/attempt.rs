//! Ordered fallback over fallible source lookups.

use futures::future::BoxFuture;

use super::domain::SourceError;

/// A labelled, not-yet-started lookup.
///
/// Futures are lazy, so building the whole chain up front costs nothing;
/// only the attempts that actually get awaited hit the network.
pub type Attempt<'a, T> = (&'static str, BoxFuture<'a, Result<T, SourceError>>);

/// Run attempts in order and return the first success with its label.
///
/// Failures are logged and skipped. Returns `None` when every attempt failed.
pub async fn first_success<'a, T>(
    attempts: impl IntoIterator<Item = Attempt<'a, T>>,
) -> Option<(&'static str, T)> {
    for (label, attempt) in attempts {
        match attempt.await {
            Ok(value) => {
                tracing::debug!(source = label, "Lookup succeeded");
                return Some((label, value));
            }
            Err(SourceError::NoData) => {
                tracing::debug!(source = label, "No data");
            }
            Err(e) => {
                tracing::warn!(source = label, "Lookup failed: {}", e);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use futures::FutureExt;

    use super::*;

    #[tokio::test]
    async fn test_first_success_wins() {
        let attempts: Vec<Attempt<'_, u32>> = vec![
            ("A", async { Err(SourceError::NoData) }.boxed()),
            ("B", async { Ok(2) }.boxed()),
            ("C", async { Ok(3) }.boxed()),
        ];
        assert_eq!(first_success(attempts).await, Some(("B", 2)));
    }

    #[tokio::test]
    async fn test_all_failures_gives_none() {
        let attempts: Vec<Attempt<'_, u32>> = vec![
            ("A", async { Err(SourceError::RateLimited) }.boxed()),
            ("B", async { Err(SourceError::Unavailable("down".into())) }.boxed()),
        ];
        assert_eq!(first_success(attempts).await, None);
    }

    #[tokio::test]
    async fn test_later_attempts_are_not_started() {
        let started = Arc::new(AtomicUsize::new(0));
        let counter = started.clone();
        let attempts: Vec<Attempt<'_, u32>> = vec![
            ("A", async { Ok(1) }.boxed()),
            (
                "B",
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                    Ok(2)
                }
                .boxed(),
            ),
        ];
        assert_eq!(first_success(attempts).await, Some(("A", 1)));
        assert_eq!(started.load(Ordering::SeqCst), 0);
    }
}
