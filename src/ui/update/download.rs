//! Library folder and download handlers.

use iced::Task;

use super::{pick_folder_task, save_config_task};
use crate::download::DownloadJob;
use crate::ui::messages::Message;
use crate::ui::state::{ActiveDownload, AppState};

pub fn handle_download(s: &mut AppState, message: Message) -> Task<Message> {
    match message {
        Message::PickLibrary => return pick_folder_task(Message::LibraryPicked),
        Message::LibraryPicked(Some(path)) => {
            tracing::info!("Library folder set to {:?}", path);
            s.status = format!("Library folder: {}", path.display());
            s.config.library.location = path;
            return save_config_task(s.config.clone());
        }
        Message::LibraryPicked(None) => {}
        Message::ConfigSaved(Ok(())) => {}
        Message::ConfigSaved(Err(e)) => {
            tracing::error!("Failed to save config: {}", e);
            s.status = format!("Could not save settings: {}", e);
        }
        Message::DownloadPressed => {
            if !s.can_download() {
                return Task::none();
            }
            let Some(candidate) = s.session.candidate() else {
                return Task::none();
            };
            let locator = candidate.locator.clone();
            let (metadata, artwork) = s.session.snapshot();
            s.status = format!("Downloading {} - {}...", metadata.artist, metadata.title);

            s.download_counter += 1;
            s.download = Some(ActiveDownload {
                id: s.download_counter,
                job: DownloadJob {
                    locator,
                    library: s.config.library.location.clone(),
                    metadata,
                    artwork,
                },
                progress: 0.0,
            });
        }
        Message::DownloadProgress(pct) => {
            if let Some(download) = &mut s.download {
                download.progress = pct.clamp(0.0, 100.0);
            }
        }
        Message::DownloadFinished(result) => {
            s.download = None;
            s.status = match result {
                Ok(path) => format!("Saved {}", path.display()),
                Err(e) => {
                    tracing::error!("Download failed: {}", e);
                    format!("Download failed: {}", e)
                }
            };
        }
        _ => {}
    }
    Task::none()
}
