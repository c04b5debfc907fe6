//! Metadata enrichment - looks up album details, lyrics and cover art for a
//! track from external services.
//!
//! # Architecture
//!
//! This module follows a clean separation between:
//! - **Domain models** (`domain.rs`) - Internal types that represent our business logic
//! - **API DTOs** (`musicbrainz/dto.rs`, `itunes/dto.rs`, ...) - Exact API response shapes
//! - **Adapters** - Convert DTOs to domain models
//! - **Clients** - HTTP clients for external APIs
//! - **Resolvers** - Precedence and fallback policy across clients
//! - **Service** - Runs every resolver for one selection as a single event stream
//!
//! This decoupling means:
//! 1. API changes don't ripple through our codebase
//! 2. We can test API contracts independently
//! 3. We can swap providers without changing business logic
//!
//! # Usage
//!
//! ```ignore
//! use enrichment::{EnrichmentService, LookupRequest};
//!
//! let service = EnrichmentService::from_config(&config);
//! let mut events = service.enrich(token, LookupRequest {
//!     artist: "Queen".into(),
//!     title: "Bohemian Rhapsody".into(),
//!     thumbnail_url: None,
//! });
//! while let Some(event) = events.next().await {
//!     session.apply(event);
//! }
//! ```

pub mod artwork;
pub mod attempt;
pub mod coverart;
pub mod domain;
pub mod http;
pub mod itunes;
pub mod lyrics;
pub mod musicbrainz;
pub mod resolver;
pub mod service;
pub mod traits;

pub use artwork::{ArtworkCollector, ArtworkRequest};
pub use domain::{LyricsHit, MetadataFields, ResolvedMetadata, SourceError, SourceMetadata};
pub use lyrics::LyricsResolver;
pub use resolver::MetadataResolver;
pub use service::{EnrichmentService, LookupRequest};
