//! Tag fields and lyrics.

use iced::widget::{button, column, container, row, text, text_editor, text_input};
use iced::{Element, Length};

use crate::ui::messages::{Field, Message};
use crate::ui::state::AppState;
use crate::ui::theme::{self, color, spacing, typography};

pub fn metadata_panel(s: &AppState) -> Element<'_, Message> {
    if s.session.candidate().is_none() {
        return container(
            text("Select a search result to see its metadata.")
                .size(typography::BODY)
                .color(color::TEXT_DIM),
        )
        .width(Length::Fill)
        .into();
    }

    let metadata = s.session.metadata();
    let heading = row![
        text("Metadata").size(typography::HEADING),
        iced::widget::horizontal_space(),
        text(if s.lookup.is_some() { "Looking up..." } else { "" })
            .size(typography::SMALL)
            .color(color::TEXT_DIM),
    ];

    let relookup = button(text("Look up again").size(typography::SMALL))
        .on_press_maybe((s.lookup.is_none() && metadata.is_resolved()).then_some(Message::RelookupPressed))
        .padding([spacing::XS, spacing::SM])
        .style(theme::button_primary);

    column![
        heading,
        field_row("Title", &metadata.title, Field::Title),
        field_row("Artist", &metadata.artist, Field::Artist),
        field_row("Album", metadata.album.as_deref().unwrap_or_default(), Field::Album),
        row![
            field_row("Year", metadata.year.as_deref().unwrap_or_default(), Field::Year),
            field_row("Track", metadata.track_number.as_deref().unwrap_or_default(), Field::Track),
        ]
        .spacing(spacing::SM),
        field_row("Genre", metadata.genre.as_deref().unwrap_or_default(), Field::Genre),
        relookup,
    ]
    .spacing(spacing::SM)
    .width(Length::Fill)
    .into()
}

fn field_row<'a>(label: &'a str, value: &'a str, field: Field) -> Element<'a, Message> {
    row![
        text(label)
            .size(typography::SMALL)
            .color(color::TEXT_DIM)
            .width(Length::Fixed(48.0)),
        text_input(label, value)
            .on_input(move |v| Message::FieldEdited(field, v))
            .size(typography::BODY)
            .padding(spacing::XS),
    ]
    .spacing(spacing::SM)
    .align_y(iced::Alignment::Center)
    .into()
}

pub fn lyrics_panel(s: &AppState) -> Element<'_, Message> {
    if s.session.candidate().is_none() {
        return column![].into();
    }

    let source = match s.session.metadata().lyrics_source.as_deref() {
        Some(source) => format!("from {}", source),
        None => String::new(),
    };

    column![
        row![
            text("Lyrics").size(typography::HEADING),
            text(source).size(typography::SMALL).color(color::TEXT_DIM),
        ]
        .spacing(spacing::SM)
        .align_y(iced::Alignment::End),
        text_editor(&s.lyrics_editor)
            .on_action(Message::LyricsAction)
            .size(typography::BODY)
            .height(Length::Fill),
    ]
    .spacing(spacing::SM)
    .height(Length::Fill)
    .into()
}
