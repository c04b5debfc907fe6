//! Window layout.

use iced::widget::{column, container, row};
use iced::{Element, Length};

use super::artwork::artwork_panel;
use super::download::download_bar;
use super::metadata::metadata_panel;
use super::search::search_panel;
use crate::ui::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::{self, spacing};

pub fn main_view(s: &AppState) -> Element<'_, Message> {
    let left = container(search_panel(s))
        .width(Length::FillPortion(2))
        .height(Length::Fill)
        .padding(spacing::MD)
        .style(theme::panel);

    let right = container(
        column![
            row![metadata_panel(s), artwork_panel(s)].spacing(spacing::LG),
            super::metadata::lyrics_panel(s),
        ]
        .spacing(spacing::MD),
    )
    .width(Length::FillPortion(3))
    .height(Length::Fill)
    .padding(spacing::MD)
    .style(theme::panel);

    container(
        column![
            row![left, right].spacing(spacing::MD).height(Length::Fill),
            download_bar(s),
        ]
        .spacing(spacing::MD),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .padding(spacing::LG)
    .style(theme::window)
    .into()
}
