//! Selection, lookup and edit handlers.

use iced::Task;
use iced::widget::image;

use crate::session::{Applied, LookupField};
use crate::ui::messages::{Field, Message};
use crate::ui::state::AppState;

pub fn handle_session(s: &mut AppState, message: Message) -> Task<Message> {
    match message {
        Message::ResultSelected(index) => {
            let Some(candidate) = s.results.get(index).cloned() else {
                return Task::none();
            };
            tracing::info!("Selected {:?}", candidate.title);
            let token = s.session.select(candidate);
            s.selected = Some(index);
            s.sync_lyrics_editor();
            s.start_lookup(token);
            s.status = format!(
                "Looking up {} - {}...",
                s.session.metadata().artist,
                s.session.metadata().title
            );
        }
        Message::RelookupPressed => {
            if s.session.candidate().is_none() || !s.session.metadata().is_resolved() {
                s.status = "Title and artist are needed for a lookup.".to_string();
                return Task::none();
            }
            let token = s.session.relookup();
            s.sync_lyrics_editor();
            s.start_lookup(token);
            s.status = "Looking up again...".to_string();
        }
        Message::Session(event) => match s.session.apply(event) {
            Applied::Stale => {}
            Applied::Metadata { filled } => {
                s.status = format!("Metadata found ({} field(s) filled).", filled);
            }
            Applied::Lyrics { source } => {
                s.sync_lyrics_editor();
                s.status = format!("Lyrics from {}.", source);
            }
            Applied::NoLyrics => {
                s.sync_lyrics_editor();
            }
            Applied::Artwork { index } => {
                if let Some(candidate) = s.session.artwork().candidates().get(index) {
                    s.artwork_handles
                        .push(image::Handle::from_bytes(candidate.image_bytes.clone()));
                }
            }
        },
        Message::LookupFinished(token) => {
            if s.lookup.as_ref().is_some_and(|(current, _)| *current == token) {
                s.lookup = None;
                s.status = match s.session.artwork().len() {
                    0 => "Lookup finished. No artwork found.".to_string(),
                    n => format!("Lookup finished. {} artwork option(s).", n),
                };
            }
        }
        Message::FieldEdited(field, value) => {
            edit_field(s, field, value);
        }
        Message::LyricsAction(action) => {
            let is_edit = action.is_edit();
            s.lyrics_editor.perform(action);
            if is_edit {
                s.store_edited_lyrics();
            }
        }
        Message::ArtworkPrevious => s.session.artwork_mut().cycle(-1),
        Message::ArtworkNext => s.session.artwork_mut().cycle(1),
        _ => {}
    }
    Task::none()
}

fn edit_field(s: &mut AppState, field: Field, value: String) {
    let lookup_field = match field {
        Field::Title => {
            s.session.metadata_mut().title = value;
            return;
        }
        Field::Artist => {
            s.session.metadata_mut().artist = value;
            return;
        }
        Field::Album => LookupField::Album,
        Field::Year => LookupField::Year,
        Field::Genre => LookupField::Genre,
        Field::Track => LookupField::TrackNumber,
    };
    s.session.edit(lookup_field, Some(value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enrichment::domain::{LyricsHit, MetadataFields, ResolvedMetadata};
    use crate::model::{ArtworkCandidate, Selection};
    use crate::session::{SessionEvent, SessionUpdate};
    use crate::test_utils::{jpeg_bytes, mock_candidate};
    use crate::ui::state::tests::test_state;

    fn selected_state() -> AppState {
        let mut s = test_state(vec![]);
        s.results = vec![
            mock_candidate("Queen - Innuendo"),
            mock_candidate("Queen - Bohemian Rhapsody"),
        ];
        let _ = handle_session(&mut s, Message::ResultSelected(1));
        s
    }

    fn event(s: &AppState, update: SessionUpdate) -> Message {
        Message::Session(SessionEvent {
            token: s.session.token(),
            update,
        })
    }

    #[test]
    fn test_select_starts_lookup() {
        let s = selected_state();
        assert_eq!(s.selected, Some(1));
        let (token, request) = s.lookup.clone().unwrap();
        assert_eq!(token, s.session.token());
        assert_eq!(request.artist, "Queen");
        assert_eq!(request.title, "Bohemian Rhapsody");
    }

    #[test]
    fn test_out_of_range_selection_ignored() {
        let mut s = test_state(vec![]);
        let _ = handle_session(&mut s, Message::ResultSelected(3));
        assert!(s.selected.is_none());
        assert!(s.lookup.is_none());
    }

    #[test]
    fn test_events_update_editor_and_artwork() {
        let mut s = selected_state();

        let lyrics = event(
            &s,
            SessionUpdate::Lyrics(Some(LyricsHit {
                text: "Is this the real life?".to_string(),
                source: "Genius",
            })),
        );
        let _ = handle_session(&mut s, lyrics);
        assert_eq!(s.lyrics_editor.text().trim(), "Is this the real life?");

        let art = ArtworkCandidate::decode("iTunes", jpeg_bytes(4, 4)).unwrap();
        let art = event(&s, SessionUpdate::Artwork(art));
        let _ = handle_session(&mut s, art);
        assert_eq!(s.artwork_handles.len(), 1);
        assert_eq!(s.session.artwork().selection(), Selection::Selected(0));
    }

    #[test]
    fn test_stale_events_dropped_after_reselect() {
        let mut s = selected_state();
        let old = event(
            &s,
            SessionUpdate::Metadata(ResolvedMetadata {
                fields: MetadataFields {
                    album: Some("A Night at the Opera".to_string()),
                    ..Default::default()
                },
                sources: vec!["MusicBrainz"],
                release_id: None,
            }),
        );

        let _ = handle_session(&mut s, Message::ResultSelected(0));
        let _ = handle_session(&mut s, old);

        assert!(s.session.metadata().album.is_none());
        assert_eq!(s.session.metadata().title, "Innuendo");
    }

    #[test]
    fn test_lookup_finished_only_for_current_token() {
        let mut s = selected_state();
        let first = s.session.token();
        let _ = handle_session(&mut s, Message::ResultSelected(0));

        let _ = handle_session(&mut s, Message::LookupFinished(first));
        assert!(s.lookup.is_some());

        let current = s.session.token();
        let _ = handle_session(&mut s, Message::LookupFinished(current));
        assert!(s.lookup.is_none());
    }

    #[test]
    fn test_field_edits() {
        let mut s = selected_state();
        let _ = handle_session(&mut s, Message::FieldEdited(Field::Album, "Innuendo".to_string()));
        let _ = handle_session(&mut s, Message::FieldEdited(Field::Year, "  ".to_string()));
        let _ = handle_session(&mut s, Message::FieldEdited(Field::Artist, String::new()));

        let metadata = s.session.metadata();
        assert_eq!(metadata.album.as_deref(), Some("Innuendo"));
        assert!(metadata.year.is_none());
        assert!(!metadata.is_resolved());
        assert!(!s.can_download());
    }

    #[test]
    fn test_relookup_needs_title_and_artist() {
        let mut s = selected_state();
        let before = s.session.token();
        let _ = handle_session(&mut s, Message::FieldEdited(Field::Title, String::new()));
        let _ = handle_session(&mut s, Message::RelookupPressed);
        assert_eq!(s.session.token(), before);

        let _ = handle_session(&mut s, Message::FieldEdited(Field::Title, "Innuendo".to_string()));
        let _ = handle_session(&mut s, Message::RelookupPressed);
        assert!(s.session.token() > before);
        assert_eq!(s.lookup.as_ref().unwrap().1.title, "Innuendo");
    }

    #[test]
    fn test_relookup_replaces_previous_lookup() {
        let mut s = selected_state();
        let lyrics = event(
            &s,
            SessionUpdate::Lyrics(Some(LyricsHit {
                text: "wrong song words".to_string(),
                source: "Genius",
            })),
        );
        let _ = handle_session(&mut s, lyrics);
        let _ = handle_session(&mut s, Message::FieldEdited(Field::Genre, "Rock".to_string()));

        let _ = handle_session(&mut s, Message::FieldEdited(Field::Title, "Innuendo".to_string()));
        let _ = handle_session(&mut s, Message::RelookupPressed);
        assert!(s.lyrics_editor.text().trim().is_empty());
        assert_eq!(s.session.metadata().genre.as_deref(), Some("Rock"));

        let lyrics = event(
            &s,
            SessionUpdate::Lyrics(Some(LyricsHit {
                text: "While the sun hangs in the sky".to_string(),
                source: "lyrics.ovh",
            })),
        );
        let _ = handle_session(&mut s, lyrics);
        assert_eq!(s.lyrics_editor.text().trim(), "While the sun hangs in the sky");
    }
}
