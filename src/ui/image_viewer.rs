// SPDX-License-Identifier: MPL-2.0
//! Full-size image viewer modal.
//!
//! Shows one gallery image at a time, scaled down to fit inside a bounded
//! frame, with a footer offering the original URL in the system browser.
//! Which image is shown is owned by the app shell; this module only renders.

use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use iced::widget::image::Handle;
use iced::widget::{button, container, image, text, Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

#[derive(Debug, Clone)]
pub enum Message {
    /// Dismiss the viewer.
    Close,
    /// Open the image URL in the system browser.
    OpenOriginal,
}

/// Renders the viewer for `image_url`.
///
/// `handle` is the fetched image data; while it is still in flight a loading
/// placeholder takes its place.
pub fn view<'a>(image_url: &'a str, handle: Option<&'a Handle>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match handle {
        Some(handle) => image(handle.clone())
            .content_fit(iced::ContentFit::ScaleDown)
            .into(),
        None => Text::new("Carregando imagem...")
            .size(typography::BODY)
            .into(),
    };

    let frame = Container::new(picture)
        .max_width(sizing::VIEWER_MAX_WIDTH)
        .max_height(sizing::VIEWER_MAX_HEIGHT)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .padding(spacing::MD);

    let open_original = button(
        Text::new("Abrir original")
            .size(typography::BODY)
            .style(|_theme: &Theme| text::Style {
                color: Some(palette::PRIMARY_400),
            }),
    )
    .on_press(Message::OpenOriginal)
    .padding(spacing::XS)
    .style(link_button_style);

    let footer_body = Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(open_original)
        .push(
            Text::new(image_url)
                .size(typography::CAPTION)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::GRAY_200),
                }),
        );

    let footer = Container::new(footer_body)
        .width(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .padding(spacing::SM)
        .style(|_theme: &Theme| container::Style {
            background: Some(iced::Background::Color(palette::GRAY_900)),
            ..container::Style::default()
        });

    let content = Column::new().push(frame).push(footer);

    Container::new(content)
        .style(|theme: &Theme| container::Style {
            background: Some(iced::Background::Color(
                theme.extended_palette().background.base.color,
            )),
            border: iced::Border {
                radius: radius::MD.into(),
                ..Default::default()
            },
            ..container::Style::default()
        })
        .into()
}

fn link_button_style(_theme: &Theme, status: button::Status) -> button::Style {
    let color = match status {
        button::Status::Hovered | button::Status::Pressed => palette::PRIMARY_500,
        button::Status::Active | button::Status::Disabled => palette::PRIMARY_400,
    };

    button::Style {
        background: None,
        text_color: color,
        border: iced::Border::default(),
        shadow: crate::ui::design_tokens::shadow::NONE,
        snap: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn view_renders_loading_and_loaded_states() {
        let _loading = view("https://cdn.example.com/a.png", None);

        let handle = Handle::from_rgba(1, 1, vec![0, 0, 0, 255]);
        let _loaded = view("https://cdn.example.com/a.png", Some(&handle));
    }
}
