//! Video search command.

use tokio::runtime::Runtime;

use crate::cache::{self, SearchCache};
use crate::config::Config;
use crate::video::{VideoSearch, YtDlp};

/// Search and cache the results for `download <index>`.
pub fn cmd_search(rt: &Runtime, config: &Config, query: &str, limit: usize, json: bool) -> anyhow::Result<()> {
    let ytdlp = YtDlp::new(config.download.ytdlp_path.clone());

    let results = match rt.block_on(ytdlp.search(query, limit)) {
        Ok(results) => results,
        Err(e) => {
            eprintln!("✗ Search failed: {}", e);
            return Ok(());
        }
    };

    let cached = SearchCache::new(query, results);
    if let Some(path) = cache::cache_path()
        && let Err(e) = cache::save(&cached, &path)
    {
        tracing::warn!("Could not cache search results: {}", e);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&cached.results)?);
        return Ok(());
    }

    if cached.results.is_empty() {
        println!("No results for \"{}\".", query);
        return Ok(());
    }

    for (i, candidate) in cached.results.iter().enumerate() {
        println!(
            "{:>3}. {} [{}]",
            i + 1,
            candidate.title,
            candidate.duration_label()
        );
        println!("     {} | {}", candidate.channel, candidate.locator);
    }
    println!();
    println!("Download one with: library-extender download <number>");
    Ok(())
}
