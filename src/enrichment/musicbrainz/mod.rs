//! MusicBrainz API integration
//!
//! The primary metadata source: album, year and genre come from a recording
//! search, track position from a follow-up release lookup. The release ID
//! also keys the Cover Art Archive.
//!
//! API docs: https://musicbrainz.org/doc/MusicBrainz_API

pub mod dto;
mod adapter;
mod client;

pub use client::MusicBrainzClient;

/// Label used for logging and source attribution
pub const LABEL: &str = "MusicBrainz";
