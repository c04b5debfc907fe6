//! iTunes Search API integration
//!
//! The secondary metadata source: fills whatever MusicBrainz left empty, and
//! offers its own 600x600 artwork.

pub mod dto;
mod adapter;
mod client;

pub use client::ItunesClient;

/// Label used for logging, attribution and artwork candidates
pub const LABEL: &str = "iTunes";
