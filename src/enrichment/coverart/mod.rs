//! Cover Art Archive integration
//!
//! Fetches album artwork from coverartarchive.org using MusicBrainz release IDs.
//! No API key required.

pub mod dto;
mod client;

pub use client::CoverArtClient;

/// Label for front covers; other images get "MusicBrainz (<type>)"
pub const LABEL: &str = "MusicBrainz";
