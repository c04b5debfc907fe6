//! CLI command definitions and dispatch.
//!
//! Each subcommand is implemented in its own submodule:
//! - `search`: video search, cached for `download <index>`
//! - `download`: resolve, download and tag one track
//! - `metadata`: look up metadata without downloading
//! - `library`: show or change the library folder

mod download;
mod library;
mod metadata;
mod search;

use clap::{CommandFactory, Parser, Subcommand};
use futures::StreamExt;
use futures::stream::BoxStream;
use std::path::PathBuf;
use tokio::runtime::Runtime;
use tokio::sync::mpsc;

use crate::config::{self, Config};
use crate::model::TrackMetadata;
use crate::session::{Applied, Session, SessionEvent};

pub use download::{DownloadArgs, DownloadTarget, cmd_download};
pub use library::cmd_library;
pub use metadata::cmd_metadata;
pub use search::cmd_search;

/// Library Extender: search, download and tag songs
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Run in command-line mode instead of opening the window
    #[arg(long)]
    pub cli: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search for songs
    Search {
        /// Search terms
        query: String,
        /// Number of results
        #[arg(short, long)]
        limit: Option<usize>,
        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },
    /// Download and tag a song
    Download(DownloadArgs),
    /// Look up metadata for a song without downloading it
    Metadata {
        /// Artist name
        artist: String,
        /// Song title
        title: String,
    },
    /// Show or set the library folder
    Library {
        /// New library folder; prints the current one when omitted
        path: Option<PathBuf>,
    },
}

/// Run the specified CLI command.
///
/// Returns `Ok(true)` if a command was run, `Ok(false)` if no command was
/// specified and `--cli` was not given (meaning the GUI should launch).
pub fn run_command(cli: &Cli) -> anyhow::Result<bool> {
    let Some(command) = &cli.command else {
        if cli.cli {
            eprintln!("Error: a command is required in CLI mode.\n");
            let _ = Cli::command().print_help();
            std::process::exit(1);
        }
        return Ok(false);
    };

    let mut config = config::load();
    let rt = Runtime::new()?;

    match command {
        Commands::Search { query, limit, json } => {
            let limit = limit.unwrap_or(config.download.search_limit);
            cmd_search(&rt, &config, query, limit, *json)?;
        }
        Commands::Download(args) => cmd_download(&rt, &config, args)?,
        Commands::Metadata { artist, title } => cmd_metadata(&rt, &config, artist, title)?,
        Commands::Library { path } => cmd_library(&mut config, path.as_deref())?,
    }
    Ok(true)
}

// ============================================================================
// Shared helper functions
// ============================================================================

/// Forward `events` through a channel and apply them to `session` as they
/// arrive, printing each step.
pub(crate) async fn drain_events(session: &mut Session, events: BoxStream<'static, SessionEvent>) {
    let (tx, mut rx) = mpsc::unbounded_channel();
    tokio::spawn(async move {
        let mut events = events;
        while let Some(event) = events.next().await {
            if tx.send(event).is_err() {
                break;
            }
        }
    });

    while let Some(event) = rx.recv().await {
        match session.apply(event) {
            Applied::Metadata { filled } => println!("  ✓ Metadata ({} field(s))", filled),
            Applied::Lyrics { source } => println!("  ✓ Lyrics from {}", source),
            Applied::NoLyrics => println!("  ✗ No lyrics found"),
            Applied::Artwork { index } => {
                if let Some(art) = session.artwork().candidates().get(index) {
                    println!("  ✓ Artwork from {} ({})", art.source_label, art.dimensions_label());
                }
            }
            Applied::Stale => {}
        }
    }
}

/// Print the resolved tag set.
pub(crate) fn print_metadata(metadata: &TrackMetadata) {
    let unknown = "-";
    println!("  Title:  {}", metadata.title);
    println!("  Artist: {}", metadata.artist);
    println!("  Album:  {}", metadata.album.as_deref().unwrap_or(unknown));
    println!("  Year:   {}", metadata.year.as_deref().unwrap_or(unknown));
    println!("  Genre:  {}", metadata.genre.as_deref().unwrap_or(unknown));
    println!("  Track:  {}", metadata.track_number.as_deref().unwrap_or(unknown));
    match (metadata.real_lyrics(), metadata.lyrics_source.as_deref()) {
        (Some(lyrics), Some(source)) => {
            println!("  Lyrics: {} line(s) from {}", lyrics.lines().count(), source)
        }
        (Some(lyrics), None) => println!("  Lyrics: {} line(s)", lyrics.lines().count()),
        (None, _) => println!("  Lyrics: {}", unknown),
    }
}

/// The library folder, unless overridden.
pub(crate) fn library_dir(config: &Config, output_dir: Option<&PathBuf>) -> PathBuf {
    output_dir
        .cloned()
        .unwrap_or_else(|| config.library.location.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_args_launches_gui() {
        let cli = Cli::try_parse_from(["library-extender"]).unwrap();
        assert!(!cli.cli);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_parse_search() {
        let cli =
            Cli::try_parse_from(["library-extender", "--cli", "search", "queen", "--limit", "5", "--json"])
                .unwrap();
        assert!(cli.cli);
        match cli.command {
            Some(Commands::Search { query, limit, json }) => {
                assert_eq!(query, "queen");
                assert_eq!(limit, Some(5));
                assert!(json);
            }
            _ => panic!("expected search"),
        }
    }

    #[test]
    fn test_subcommand_without_cli_flag() {
        let cli = Cli::try_parse_from(["library-extender", "metadata", "Queen", "Innuendo"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Metadata { .. })));
    }

    #[test]
    fn test_parse_download_overrides() {
        let cli = Cli::try_parse_from([
            "library-extender",
            "download",
            "3",
            "--artist",
            "Queen",
            "--year",
            "1991",
            "--skip-metadata",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Download(args)) => {
                assert_eq!(args.target, "3");
                assert_eq!(args.artist.as_deref(), Some("Queen"));
                assert_eq!(args.year.as_deref(), Some("1991"));
                assert!(args.skip_metadata);
                assert!(args.output_dir.is_none());
            }
            _ => panic!("expected download"),
        }
    }

    #[test]
    fn test_invalid_command_is_error() {
        assert!(Cli::try_parse_from(["library-extender", "frobnicate"]).is_err());
        assert!(Cli::try_parse_from(["library-extender", "metadata", "OnlyArtist"]).is_err());
    }

    #[test]
    fn test_library_dir_override() {
        let config = Config::default();
        let custom = PathBuf::from("/tmp/elsewhere");
        assert_eq!(library_dir(&config, Some(&custom)), custom);
        assert_eq!(library_dir(&config, None), config.library.location);
    }
}
