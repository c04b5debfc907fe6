//! Search handlers.

use iced::Task;

use crate::ui::messages::Message;
use crate::ui::state::AppState;

pub fn handle_search(s: &mut AppState, message: Message) -> Task<Message> {
    match message {
        Message::ToolChecked(Some(version)) => {
            tracing::info!("Using yt-dlp {}", version);
        }
        Message::ToolChecked(None) => {
            tracing::warn!("yt-dlp not found at {:?}", s.config.download.ytdlp_path);
            s.status = format!(
                "yt-dlp was not found ({}). Install it or set download.ytdlp_path in the config file.",
                s.config.download.ytdlp_path
            );
        }
        Message::QueryChanged(query) => {
            s.query = query;
        }
        Message::SearchPressed => {
            let query = s.query.trim().to_string();
            if query.is_empty() {
                s.status = "Type something to search for.".to_string();
                return Task::none();
            }
            if s.searching {
                return Task::none();
            }

            // A new search discards the previous selection
            s.session.clear();
            s.results.clear();
            s.selected = None;
            s.lookup = None;
            s.artwork_handles.clear();
            s.sync_lyrics_editor();

            s.searching = true;
            s.status = format!("Searching for \"{}\"...", query);
            tracing::info!("Searching for {:?}", query);

            let search = s.search.clone();
            let limit = s.config.download.search_limit;
            return Task::perform(
                async move { search.search(&query, limit).await.map_err(|e| e.to_string()) },
                Message::SearchFinished,
            );
        }
        Message::SearchFinished(Ok(results)) => {
            s.searching = false;
            s.status = match results.len() {
                0 => "No results.".to_string(),
                n => format!("{} result(s). Pick one to look it up.", n),
            };
            s.results = results;
        }
        Message::SearchFinished(Err(e)) => {
            s.searching = false;
            tracing::warn!("Search failed: {}", e);
            s.status = format!("Search failed: {}", e);
        }
        _ => {}
    }
    Task::none()
}
