//! Update handlers for application messages.
//!
//! - `search`: running a search and showing its results
//! - `session`: selection, lookups and user edits
//! - `download`: the library folder and the download pipeline

mod download;
mod search;
mod session;

use iced::Task;
use std::path::PathBuf;

use super::messages::Message;

pub use download::handle_download;
pub use search::handle_search;
pub use session::handle_session;

/// Helper to pick a folder
pub(crate) fn pick_folder_task(on_pick: fn(Option<PathBuf>) -> Message) -> Task<Message> {
    Task::perform(
        async {
            rfd::AsyncFileDialog::new()
                .set_title("Choose library folder")
                .pick_folder()
                .await
                .map(|h| h.path().to_path_buf())
        },
        on_pick,
    )
}

/// Helper to persist the config in the background
pub(crate) fn save_config_task(config: crate::config::Config) -> Task<Message> {
    Task::perform(
        async move { crate::config::save_async(config).await.map_err(|e| e.to_string()) },
        Message::ConfigSaved,
    )
}
