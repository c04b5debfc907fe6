//! Download command: select, resolve metadata, download and tag.

use std::io::Write;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use super::{drain_events, library_dir, print_metadata};
use crate::cache;
use crate::config::Config;
use crate::download::{DownloadJob, DownloadPipeline};
use crate::enrichment::{EnrichmentService, LookupRequest};
use crate::model::TrackCandidate;
use crate::session::{LookupField, Session};
use crate::video::{VideoSearch, YtDlp, normalize_locator};

#[derive(Args, Debug, Clone)]
pub struct DownloadArgs {
    /// Video URL, video ID, or a result number from the last search
    pub target: String,
    /// Save here instead of the library folder
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,
    /// Override the artist
    #[arg(long)]
    pub artist: Option<String>,
    /// Override the title
    #[arg(long)]
    pub title: Option<String>,
    #[arg(long)]
    pub album: Option<String>,
    #[arg(long)]
    pub year: Option<String>,
    #[arg(long)]
    pub genre: Option<String>,
    /// Track number, `N` or `disc/N`
    #[arg(long)]
    pub track: Option<String>,
    /// Don't look anything up; tag with what was given and inferred
    #[arg(long)]
    pub skip_metadata: bool,
}

/// What `download` was pointed at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DownloadTarget {
    /// 1-based index into the last search
    Index(usize),
    Locator(String),
}

impl DownloadTarget {
    pub fn parse(input: &str) -> Self {
        match input.trim().parse::<usize>() {
            Ok(index) => Self::Index(index),
            Err(_) => Self::Locator(normalize_locator(input)),
        }
    }
}

pub fn cmd_download(rt: &Runtime, config: &Config, args: &DownloadArgs) -> anyhow::Result<()> {
    rt.block_on(async {
        let ytdlp = YtDlp::new(config.download.ytdlp_path.clone());

        let candidate = match resolve_target(&ytdlp, &args.target).await {
            Ok(candidate) => candidate,
            Err(e) => {
                eprintln!("✗ {:#}", e);
                return Ok(());
            }
        };
        println!("Selected: {} ({}, {})", candidate.title, candidate.channel, candidate.duration_label());

        let mut session = Session::new();
        session.select(candidate.clone());
        apply_overrides(&mut session, args);
        let token = session.relookup();

        if !args.skip_metadata {
            let service = EnrichmentService::from_config(config);
            let request = LookupRequest {
                artist: session.metadata().artist.clone(),
                title: session.metadata().title.clone(),
                thumbnail_url: candidate.thumbnail_url.clone(),
            };
            println!("Looking up {} - {}...", request.artist, request.title);
            drain_events(&mut session, service.enrich(token, request)).await;
        }

        println!();
        print_metadata(session.metadata());
        if let Some(art) = session.artwork().selected() {
            println!("  Cover:  {} ({})", art.source_label, art.dimensions_label());
        }
        println!();

        let (metadata, artwork) = session.snapshot();
        let job = DownloadJob {
            locator: candidate.locator.clone(),
            library: library_dir(config, args.output_dir.as_ref()),
            metadata,
            artwork,
        };

        let (tx, rx) = mpsc::unbounded_channel();
        let progress = tokio::spawn(print_progress(rx));
        let result = DownloadPipeline::from_config(&config.download).run(job, Some(tx)).await;
        let _ = progress.await;

        match result {
            Ok(tagged) => println!("✓ Saved {}", tagged.path.display()),
            Err(e) => eprintln!("✗ {}", e),
        }
        Ok(())
    })
}

async fn resolve_target(search: &dyn VideoSearch, target: &str) -> anyhow::Result<TrackCandidate> {
    match DownloadTarget::parse(target) {
        DownloadTarget::Index(index) => {
            let path = cache::cache_path().context("No config directory for the search cache")?;
            let cached = cache::load(&path).context("No previous search; run `search` first")?;
            cached.get(index).cloned().with_context(|| {
                format!(
                    "No result #{} in the last search for \"{}\" ({} result(s))",
                    index,
                    cached.query,
                    cached.results.len()
                )
            })
        }
        DownloadTarget::Locator(locator) => Ok(search.fetch_info(&locator).await?),
    }
}

/// User input wins over inference and is never overwritten by lookups.
fn apply_overrides(session: &mut Session, args: &DownloadArgs) {
    if let Some(ref artist) = args.artist {
        session.metadata_mut().artist = artist.clone();
    }
    if let Some(ref title) = args.title {
        session.metadata_mut().title = title.clone();
    }
    for (field, value) in [
        (LookupField::Album, &args.album),
        (LookupField::Year, &args.year),
        (LookupField::Genre, &args.genre),
        (LookupField::TrackNumber, &args.track),
    ] {
        if value.is_some() {
            session.edit(field, value.clone());
        }
    }
}

async fn print_progress(mut rx: mpsc::UnboundedReceiver<f32>) {
    let mut shown = false;
    while let Some(pct) = rx.recv().await {
        print!("\r  Downloading: {:5.1}%", pct);
        let _ = std::io::stdout().flush();
        shown = true;
    }
    if shown {
        println!();
    }
}
