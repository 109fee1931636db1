// SPDX-License-Identifier: MPL-2.0
//! Gallery screen: the grid of registered images.
//!
//! Renders the cached images collection in one of four states (loading,
//! failed, empty, populated) and emits messages for opening an image, adding
//! a new one, or retrying a failed fetch.

use crate::api::ImageRecord;
use crate::ui::design_tokens::{palette, radius, sizing, spacing, typography};
use iced::widget::image::Handle;
use iced::widget::{button, container, mouse_area, scrollable, text, Column, Container, Row, Text};
use iced::{alignment, Element, Length, Theme};
use std::collections::HashMap;

#[derive(Debug, Clone)]
pub enum Message {
    /// Open the full-size viewer for the image at this URL.
    OpenImage(String),
    /// Open the upload form modal.
    AddImage,
    /// Refetch the images collection after a failure.
    Refresh,
}

/// What the shell knows about the images collection right now.
pub struct ViewContext<'a> {
    pub images: Option<&'a [ImageRecord]>,
    pub is_loading: bool,
    pub load_failed: bool,
    /// Thumbnails already fetched, keyed by image URL.
    pub thumbnails: &'a HashMap<String, Handle>,
}

/// Renders the gallery screen.
pub fn view(ctx: ViewContext<'_>) -> Element<'_, Message> {
    let body: Element<'_, Message> = if ctx.load_failed {
        failed_body()
    } else if let Some(images) = ctx.images {
        if images.is_empty() {
            centered_caption("Nenhuma imagem cadastrada.")
        } else {
            grid(images, ctx.thumbnails)
        }
    } else if ctx.is_loading {
        centered_caption("Carregando imagens...")
    } else {
        centered_caption("Nenhuma imagem cadastrada.")
    };

    Column::new()
        .spacing(spacing::LG)
        .padding(spacing::LG)
        .push(header())
        .push(body)
        .into()
}

fn header<'a>() -> Element<'a, Message> {
    let add_button = button(Text::new("Adicionar imagem").size(typography::BODY))
        .on_press(Message::AddImage)
        .padding(spacing::SM);

    Row::new()
        .align_y(alignment::Vertical::Center)
        .push(
            Container::new(Text::new("Galeria").size(typography::TITLE_LG)).width(Length::Fill),
        )
        .push(add_button)
        .into()
}

fn failed_body<'a>() -> Element<'a, Message> {
    let retry = button(Text::new("Tentar novamente").size(typography::BODY))
        .on_press(Message::Refresh)
        .padding(spacing::SM);

    let column = Column::new()
        .spacing(spacing::SM)
        .align_x(alignment::Horizontal::Center)
        .push(
            Text::new("Não foi possível carregar as imagens.")
                .size(typography::BODY)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::ERROR_500),
                }),
        )
        .push(retry);

    Container::new(column)
        .width(Length::Fill)
        .height(Length::Fill)
        .align_x(alignment::Horizontal::Center)
        .align_y(alignment::Vertical::Center)
        .into()
}

fn centered_caption<'a>(caption: &'a str) -> Element<'a, Message> {
    Container::new(
        Text::new(caption)
            .size(typography::BODY)
            .style(|_theme: &Theme| text::Style {
                color: Some(palette::GRAY_200),
            }),
    )
    .width(Length::Fill)
    .height(Length::Fill)
    .align_x(alignment::Horizontal::Center)
    .align_y(alignment::Vertical::Center)
    .into()
}

/// Lays the cards out in fixed-width rows inside a scrollable.
fn grid<'a>(
    images: &'a [ImageRecord],
    thumbnails: &'a HashMap<String, Handle>,
) -> Element<'a, Message> {
    const COLUMNS: usize = 4;

    let mut rows = Column::new().spacing(spacing::MD);
    for chunk in images.chunks(COLUMNS) {
        let mut row = Row::new().spacing(spacing::MD);
        for record in chunk {
            row = row.push(card(record, thumbnails.get(&record.url)));
        }
        rows = rows.push(row);
    }

    scrollable(rows)
        .width(Length::Fill)
        .height(Length::Fill)
        .into()
}

fn card<'a>(record: &'a ImageRecord, thumbnail: Option<&'a Handle>) -> Element<'a, Message> {
    let picture: Element<'a, Message> = match thumbnail {
        Some(handle) => iced::widget::image(handle.clone())
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .content_fit(iced::ContentFit::Cover)
            .into(),
        None => Container::new(Text::new("...").size(typography::CAPTION))
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .into(),
    };

    let caption = Column::new()
        .spacing(spacing::XXS)
        .padding(spacing::SM)
        .push(Text::new(&record.title).size(typography::TITLE_SM))
        .push(
            Text::new(&record.description)
                .size(typography::CAPTION)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::GRAY_200),
                }),
        );

    let body = Column::new().push(picture).push(caption);

    mouse_area(
        Container::new(body)
            .width(Length::Fixed(sizing::CARD_WIDTH))
            .style(card_style),
    )
    .on_press(Message::OpenImage(record.url.clone()))
    .into()
}

fn card_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(
            theme.extended_palette().background.weak.color,
        )),
        border: iced::Border {
            color: palette::GRAY_700,
            width: crate::ui::design_tokens::border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..container::Style::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(title: &str, url: &str) -> ImageRecord {
        ImageRecord {
            id: String::new(),
            title: title.to_string(),
            description: "descrição".to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn view_renders_every_collection_state() {
        let thumbnails = HashMap::new();

        let _loading = view(ViewContext {
            images: None,
            is_loading: true,
            load_failed: false,
            thumbnails: &thumbnails,
        });

        let _failed = view(ViewContext {
            images: None,
            is_loading: false,
            load_failed: true,
            thumbnails: &thumbnails,
        });

        let _empty = view(ViewContext {
            images: Some(&[]),
            is_loading: false,
            load_failed: false,
            thumbnails: &thumbnails,
        });

        let images = vec![
            record("Paisagem", "https://cdn.example.com/a.png"),
            record("Retrato", "https://cdn.example.com/b.png"),
        ];
        let _populated = view(ViewContext {
            images: Some(&images),
            is_loading: false,
            load_failed: false,
            thumbnails: &thumbnails,
        });
    }
}
