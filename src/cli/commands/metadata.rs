//! Metadata lookup command.

use tokio::runtime::Runtime;

use super::{drain_events, print_metadata};
use crate::config::Config;
use crate::enrichment::{EnrichmentService, LookupRequest};
use crate::model::Selection;
use crate::session::Session;

/// Run every lookup for `artist`/`title` and print what was found.
pub fn cmd_metadata(rt: &Runtime, config: &Config, artist: &str, title: &str) -> anyhow::Result<()> {
    let service = EnrichmentService::from_config(config);

    let mut session = Session::new();
    session.metadata_mut().artist = artist.to_string();
    session.metadata_mut().title = title.to_string();
    let token = session.relookup();

    println!("Looking up {} - {}...", artist, title);
    rt.block_on(drain_events(
        &mut session,
        service.enrich(
            token,
            LookupRequest {
                artist: artist.to_string(),
                title: title.to_string(),
                thumbnail_url: None,
            },
        ),
    ));

    println!();
    print_metadata(session.metadata());

    let artwork = session.artwork();
    if artwork.is_empty() {
        println!("  Cover:  -");
    } else {
        for (i, art) in artwork.candidates().iter().enumerate() {
            let marker = if artwork.selection() == Selection::Selected(i) { "*" } else { " " };
            println!("  Cover: {}{} {} ({})", marker, i + 1, art.source_label, art.dimensions_label());
        }
    }
    Ok(())
}
