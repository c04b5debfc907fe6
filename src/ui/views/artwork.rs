//! Cover art preview with previous/next.

use iced::widget::{button, column, container, image, row, text};
use iced::{Alignment, Element, Length};

use crate::model::Selection;
use crate::ui::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::{self, color, spacing, typography};

const PREVIEW_SIZE: f32 = 200.0;

pub fn artwork_panel(s: &AppState) -> Element<'_, Message> {
    if s.session.candidate().is_none() {
        return column![].into();
    }

    let artwork = s.session.artwork();
    let Selection::Selected(index) = artwork.selection() else {
        let placeholder = if s.lookup.is_some() { "Looking for artwork..." } else { "No artwork" };
        return container(text(placeholder).size(typography::SMALL).color(color::TEXT_DIM))
            .center(Length::Fixed(PREVIEW_SIZE))
            .style(theme::panel)
            .into();
    };

    let preview: Element<Message> = match s.artwork_handles.get(index) {
        Some(handle) => image(handle.clone())
            .width(Length::Fixed(PREVIEW_SIZE))
            .height(Length::Fixed(PREVIEW_SIZE))
            .into(),
        None => text("Loading...").size(typography::SMALL).into(),
    };

    let caption = artwork
        .selected()
        .map(|c| format!("{} · {}", c.source_label, c.dimensions_label()))
        .unwrap_or_default();

    let can_cycle = artwork.len() > 1;
    let nav = row![
        button(text("<").size(typography::BODY))
            .on_press_maybe(can_cycle.then_some(Message::ArtworkPrevious))
            .style(theme::button_primary),
        text(format!("{}/{}", index + 1, artwork.len())).size(typography::SMALL),
        button(text(">").size(typography::BODY))
            .on_press_maybe(can_cycle.then_some(Message::ArtworkNext))
            .style(theme::button_primary),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    column![
        preview,
        text(caption).size(typography::SMALL).color(color::TEXT_DIM),
        nav,
    ]
    .spacing(spacing::XS)
    .align_x(Alignment::Center)
    .width(Length::Fixed(PREVIEW_SIZE))
    .into()
}
