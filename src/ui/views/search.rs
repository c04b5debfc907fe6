//! Search box and results.

use iced::widget::{Column, button, column, row, scrollable, text, text_input};
use iced::{Element, Length};

use crate::model::TrackCandidate;
use crate::ui::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::{self, color, spacing, typography};

pub fn search_panel(s: &AppState) -> Element<'_, Message> {
    let input = text_input("Artist, song, or both...", &s.query)
        .on_input(Message::QueryChanged)
        .on_submit(Message::SearchPressed)
        .size(typography::BODY)
        .padding(spacing::SM);

    let label = if s.searching { "Searching..." } else { "Search" };
    let search_button = button(text(label).size(typography::BODY))
        .on_press_maybe((!s.searching).then_some(Message::SearchPressed))
        .padding([spacing::SM, spacing::MD])
        .style(theme::button_primary);

    let results: Element<Message> = if s.results.is_empty() {
        text(if s.searching { "" } else { "No results yet." })
            .size(typography::SMALL)
            .color(color::TEXT_DIM)
            .into()
    } else {
        let rows = s
            .results
            .iter()
            .enumerate()
            .map(|(i, candidate)| result_row(i, candidate, s.selected == Some(i)));
        scrollable(Column::with_children(rows).spacing(spacing::XS))
            .height(Length::Fill)
            .into()
    };

    column![
        row![input, search_button].spacing(spacing::SM),
        results,
    ]
    .spacing(spacing::MD)
    .into()
}

fn result_row(index: usize, candidate: &TrackCandidate, selected: bool) -> Element<'_, Message> {
    let details = format!("{} · {}", candidate.channel, candidate.duration_label());
    button(
        column![
            text(candidate.title.as_str()).size(typography::BODY),
            text(details).size(typography::SMALL).color(color::TEXT_DIM),
        ]
        .spacing(2),
    )
    .on_press(Message::ResultSelected(index))
    .width(Length::Fill)
    .padding(spacing::SM)
    .style(theme::result_row(selected))
    .into()
}
