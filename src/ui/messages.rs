//! Message types for the Library Extender UI.

use std::path::PathBuf;

use iced::widget::text_editor;
use iced::window;

use crate::model::TrackCandidate;
use crate::session::{SelectionToken, SessionEvent};

/// Editable single-line metadata fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Title,
    Artist,
    Album,
    Year,
    Genre,
    Track,
}

/// All possible messages that can be sent in the application
#[derive(Debug, Clone)]
pub enum Message {
    // Search
    /// yt-dlp version, `None` when it could not be run
    ToolChecked(Option<String>),
    QueryChanged(String),
    SearchPressed,
    SearchFinished(Result<Vec<TrackCandidate>, String>),

    // Selection and lookups
    ResultSelected(usize),
    Session(SessionEvent),
    LookupFinished(SelectionToken),
    RelookupPressed,

    // Editing
    FieldEdited(Field, String),
    LyricsAction(text_editor::Action),
    ArtworkPrevious,
    ArtworkNext,

    // Library folder
    PickLibrary,
    LibraryPicked(Option<PathBuf>),
    ConfigSaved(Result<(), String>),

    // Download
    DownloadPressed,
    DownloadProgress(f32),
    DownloadFinished(Result<PathBuf, String>),

    // Window
    CloseRequested(window::Id),
}
