//! Colours, spacing and widget styles.
//!
//! Dark palette with a teal accent. Views take everything from here so the
//! look can change in one place.

use iced::widget::{button, container, progress_bar};
use iced::{Border, Color, Theme};

pub mod color {
    use iced::Color;

    /// Window background
    pub const BASE: Color = Color::from_rgb(0.07, 0.08, 0.09);
    /// Panels
    pub const PANEL: Color = Color::from_rgb(0.11, 0.12, 0.14);
    /// Hovered rows, pressed buttons
    pub const HOVER: Color = Color::from_rgb(0.16, 0.18, 0.20);
    pub const BORDER: Color = Color::from_rgb(0.22, 0.24, 0.27);

    pub const TEXT: Color = Color::from_rgb(0.93, 0.94, 0.95);
    pub const TEXT_DIM: Color = Color::from_rgb(0.60, 0.63, 0.67);

    pub const ACCENT: Color = Color::from_rgb(0.16, 0.63, 0.60);
    pub const ACCENT_HOVER: Color = Color::from_rgb(0.22, 0.72, 0.68);

    pub const SUCCESS: Color = Color::from_rgb(0.30, 0.75, 0.40);
    pub const ERROR: Color = Color::from_rgb(0.90, 0.35, 0.35);
}

pub mod spacing {
    pub const XS: u16 = 4;
    pub const SM: u16 = 8;
    pub const MD: u16 = 12;
    pub const LG: u16 = 20;
}

pub mod typography {
    pub const SMALL: u16 = 12;
    pub const BODY: u16 = 14;
    pub const HEADING: u16 = 18;
}

/// Panel background with a thin border
pub fn panel(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::PANEL)),
        border: Border {
            color: color::BORDER,
            width: 1.0,
            radius: 6.0.into(),
        },
        ..Default::default()
    }
}

pub fn window(_theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(color::BASE)),
        text_color: Some(color::TEXT),
        ..Default::default()
    }
}

/// Filled accent button
pub fn button_primary(_theme: &Theme, status: button::Status) -> button::Style {
    let bg = match status {
        button::Status::Active => color::ACCENT,
        button::Status::Hovered | button::Status::Pressed => color::ACCENT_HOVER,
        button::Status::Disabled => color::HOVER,
    };
    let text = match status {
        button::Status::Disabled => color::TEXT_DIM,
        _ => color::TEXT,
    };

    button::Style {
        background: Some(iced::Background::Color(bg)),
        text_color: text,
        border: Border {
            radius: 4.0.into(),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// A row in the results list; `selected` keeps the highlight.
pub fn result_row(selected: bool) -> impl Fn(&Theme, button::Status) -> button::Style {
    move |_theme, status| {
        let bg = match (selected, status) {
            (true, _) => color::HOVER,
            (false, button::Status::Hovered) => color::HOVER,
            _ => Color::TRANSPARENT,
        };
        button::Style {
            background: Some(iced::Background::Color(bg)),
            text_color: color::TEXT,
            border: Border {
                color: if selected { color::ACCENT } else { Color::TRANSPARENT },
                width: 1.0,
                radius: 4.0.into(),
            },
            ..Default::default()
        }
    }
}

pub fn progress(_theme: &Theme) -> progress_bar::Style {
    progress_bar::Style {
        background: iced::Background::Color(color::HOVER),
        bar: iced::Background::Color(color::ACCENT),
        border: Border {
            radius: 2.0.into(),
            ..Default::default()
        },
    }
}
