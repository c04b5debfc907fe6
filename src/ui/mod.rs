//! UI module for Library Extender.
//!
//! One window: search on the left, the selected song's metadata, artwork
//! and lyrics on the right, download controls at the bottom.

mod messages;
mod state;
mod streams;
pub mod theme;
mod update;
mod views;

use iced::{Element, Subscription, Task, window};

use crate::config;
use crate::video::YtDlp;
pub use messages::Message;
use state::AppState;

pub struct LibraryExtender {
    state: AppState,
}

impl LibraryExtender {
    pub fn new() -> (Self, Task<Message>) {
        let config = config::load();
        tracing::debug!("Library folder: {:?}", config.library.location);

        let ytdlp = YtDlp::new(config.download.ytdlp_path.clone());
        let check_tool = Task::perform(async move { ytdlp.version().await }, Message::ToolChecked);

        (
            Self {
                state: AppState::new(config),
            },
            check_tool,
        )
    }

    pub fn subscription(&self) -> Subscription<Message> {
        let s = &self.state;
        let mut subscriptions = vec![window::close_requests().map(Message::CloseRequested)];

        // Keyed by token: a new selection replaces the running lookup
        if let Some((token, request)) = &s.lookup {
            subscriptions.push(Subscription::run_with_id(
                ("lookup", *token),
                streams::lookup_stream(s.service.clone(), *token, request.clone()),
            ));
        }

        if let Some(download) = &s.download {
            subscriptions.push(Subscription::run_with_id(
                ("download", download.id),
                streams::download_stream(s.pipeline.clone(), download.job.clone()),
            ));
        }

        Subscription::batch(subscriptions)
    }

    pub fn view(&self) -> Element<'_, Message> {
        views::main_view(&self.state)
    }

    pub fn update(&mut self, message: Message) -> Task<Message> {
        if !matches!(message, Message::DownloadProgress(_) | Message::LyricsAction(_)) {
            tracing::trace!(target: "ui::update", message = ?message, "Update received");
        }

        let s = &mut self.state;
        match message {
            Message::ToolChecked(_)
            | Message::QueryChanged(_)
            | Message::SearchPressed
            | Message::SearchFinished(_) => update::handle_search(s, message),

            Message::ResultSelected(_)
            | Message::Session(_)
            | Message::LookupFinished(_)
            | Message::RelookupPressed
            | Message::FieldEdited(_, _)
            | Message::LyricsAction(_)
            | Message::ArtworkPrevious
            | Message::ArtworkNext => update::handle_session(s, message),

            Message::PickLibrary
            | Message::LibraryPicked(_)
            | Message::ConfigSaved(_)
            | Message::DownloadPressed
            | Message::DownloadProgress(_)
            | Message::DownloadFinished(_) => update::handle_download(s, message),

            // Settings are written once more on the way out
            Message::CloseRequested(id) => {
                Task::future(config::save_async(s.config.clone())).then(move |result| {
                    if let Err(e) = result {
                        tracing::error!("Failed to save config on exit: {}", e);
                    }
                    window::close(id)
                })
            }
        }
    }
}
