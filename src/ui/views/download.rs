//! Library folder, download button and status line.

use iced::widget::{button, column, container, progress_bar, row, text};
use iced::{Alignment, Element, Length};

use crate::ui::messages::Message;
use crate::ui::state::AppState;
use crate::ui::theme::{self, color, spacing, typography};

pub fn download_bar(s: &AppState) -> Element<'_, Message> {
    let library = row![
        text("Library:").size(typography::SMALL).color(color::TEXT_DIM),
        text(s.config.library.location.display().to_string()).size(typography::SMALL),
        button(text("Browse...").size(typography::SMALL))
            .on_press(Message::PickLibrary)
            .padding([spacing::XS, spacing::SM])
            .style(theme::button_primary),
    ]
    .spacing(spacing::SM)
    .align_y(Alignment::Center);

    let label = if s.download.is_some() { "Downloading..." } else { "Download" };
    let download_button = button(text(label).size(typography::BODY))
        .on_press_maybe(s.can_download().then_some(Message::DownloadPressed))
        .padding([spacing::SM, spacing::LG])
        .style(theme::button_primary);

    let progress: Element<Message> = match &s.download {
        Some(download) => progress_bar(0.0..=100.0, download.progress)
            .height(Length::Fixed(8.0))
            .style(theme::progress)
            .into(),
        None => column![].into(),
    };

    let status_color = if s.status.contains("failed") || s.status.starts_with("Could not") {
        color::ERROR
    } else if s.status.starts_with("Saved") {
        color::SUCCESS
    } else {
        color::TEXT_DIM
    };

    container(
        column![
            row![library, iced::widget::horizontal_space(), download_button]
                .spacing(spacing::MD)
                .align_y(Alignment::Center),
            progress,
            text(s.status.as_str()).size(typography::SMALL).color(status_color),
        ]
        .spacing(spacing::SM),
    )
    .padding(spacing::MD)
    .width(Length::Fill)
    .style(theme::panel)
    .into()
}
