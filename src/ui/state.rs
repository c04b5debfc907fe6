//! Application state for the Library Extender UI.

use std::sync::Arc;

use iced::widget::{image, text_editor};

use crate::config::Config;
use crate::download::{DownloadJob, DownloadPipeline};
use crate::enrichment::{EnrichmentService, LookupRequest};
use crate::model::{NO_LYRICS_PLACEHOLDER, TrackCandidate};
use crate::session::{LookupField, Session, SelectionToken};
use crate::video::{VideoSearch, YtDlp};

pub struct AppState {
    pub config: Config,

    // Collaborators
    pub search: Arc<dyn VideoSearch>,
    pub service: EnrichmentService,
    pub pipeline: DownloadPipeline,

    // Search
    pub query: String,
    pub results: Vec<TrackCandidate>,
    pub searching: bool,
    /// Index into `results` of the selected row
    pub selected: Option<usize>,

    // Selection
    pub session: Session,
    /// Token of the lookup still streaming, if any
    pub lookup: Option<(SelectionToken, LookupRequest)>,
    pub lyrics_editor: text_editor::Content,
    /// Decoded handles, parallel to the session's artwork candidates
    pub artwork_handles: Vec<image::Handle>,

    pub download: Option<ActiveDownload>,
    /// Incremented per download so each gets its own subscription
    pub download_counter: u64,

    pub status: String,
}

/// A download in progress.
pub struct ActiveDownload {
    pub id: u64,
    pub job: DownloadJob,
    pub progress: f32,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let search: Arc<dyn VideoSearch> = Arc::new(YtDlp::new(config.download.ytdlp_path.clone()));
        let service = EnrichmentService::from_config(&config);
        let pipeline = DownloadPipeline::from_config(&config.download);
        Self::with_collaborators(config, search, service, pipeline)
    }

    pub fn with_collaborators(
        config: Config,
        search: Arc<dyn VideoSearch>,
        service: EnrichmentService,
        pipeline: DownloadPipeline,
    ) -> Self {
        Self {
            config,
            search,
            service,
            pipeline,
            query: String::new(),
            results: Vec::new(),
            searching: false,
            selected: None,
            session: Session::new(),
            lookup: None,
            lyrics_editor: text_editor::Content::new(),
            artwork_handles: Vec::new(),
            download: None,
            download_counter: 0,
            status: "Search for a song to get started.".to_string(),
        }
    }

    /// A candidate is selected, title and artist are set and nothing is
    /// downloading.
    pub fn can_download(&self) -> bool {
        self.session.candidate().is_some()
            && self.session.metadata().is_resolved()
            && self.download.is_none()
    }

    /// Start lookups for the session's current title/artist under `token`.
    pub fn start_lookup(&mut self, token: SelectionToken) {
        let metadata = self.session.metadata();
        let request = LookupRequest {
            artist: metadata.artist.clone(),
            title: metadata.title.clone(),
            thumbnail_url: self.session.candidate().and_then(|c| c.thumbnail_url.clone()),
        };
        self.artwork_handles.clear();
        self.lookup = Some((token, request));
    }

    /// Show the session's lyrics (or the placeholder) in the editor.
    pub fn sync_lyrics_editor(&mut self) {
        let text = self.session.metadata().lyrics.as_deref().unwrap_or_default();
        self.lyrics_editor = text_editor::Content::with_text(text);
    }

    /// Copy the editor text back into the session. The placeholder and
    /// blank text mean "no lyrics".
    pub fn store_edited_lyrics(&mut self) {
        let text = self.lyrics_editor.text();
        let trimmed = text.trim();
        let lyrics = (trimmed != NO_LYRICS_PLACEHOLDER).then(|| trimmed.to_string());
        self.session.edit(LookupField::Lyrics, lyrics);
    }
}
