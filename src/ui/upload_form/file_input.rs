// SPDX-License-Identifier: MPL-2.0
//! Clickable drop-zone style file input with preview.
//!
//! Renders the current selection (or an empty-state prompt) inside a bordered
//! area; clicking anywhere in it opens the picker. The async picker itself
//! lives here too so the form module stays free of dialog plumbing.

use super::validation::FileMeta;
use super::Message;
use crate::ui::design_tokens::{border, palette, radius, sizing, spacing, typography};
use iced::widget::image::Handle;
use iced::widget::{container, image, mouse_area, text, Column, Container, Text};
use iced::{alignment, Element, Length, Theme};

/// Renders the file input area.
pub fn view<'a>(
    selected: Option<&'a FileMeta>,
    preview: &'a str,
    is_uploading: bool,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let body: Element<'a, Message> = match selected {
        Some(meta) if !preview.is_empty() => preview_body(meta, preview, is_uploading),
        _ => empty_body(),
    };

    let area = mouse_area(
        Container::new(body)
            .width(Length::Fill)
            .height(Length::Fixed(sizing::PREVIEW_HEIGHT))
            .align_x(alignment::Horizontal::Center)
            .align_y(alignment::Vertical::Center)
            .style(drop_zone_style),
    )
    .on_press(Message::PickImage);

    let mut column = Column::new().spacing(spacing::XXS).push(area);
    if let Some(message) = error {
        column = column.push(
            Text::new(message)
                .size(typography::CAPTION)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::ERROR_500),
                }),
        );
    }
    column.into()
}

fn empty_body<'a>() -> Element<'a, Message> {
    Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(Text::new("Adicione sua imagem").size(typography::BODY))
        .push(
            Text::new("PNG, JPEG ou GIF de até 10MB")
                .size(typography::CAPTION)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::GRAY_200),
                }),
        )
        .into()
}

fn preview_body<'a>(meta: &'a FileMeta, preview: &'a str, is_uploading: bool) -> Element<'a, Message> {
    let thumbnail = image(Handle::from_path(preview))
        .height(Length::Fixed(sizing::PREVIEW_HEIGHT - spacing::XL))
        .content_fit(iced::ContentFit::ScaleDown);

    let caption = if is_uploading {
        "Enviando imagem...".to_string()
    } else {
        file_caption(meta)
    };

    Column::new()
        .spacing(spacing::XXS)
        .align_x(alignment::Horizontal::Center)
        .push(thumbnail)
        .push(
            Text::new(caption)
                .size(typography::CAPTION)
                .style(|_theme: &Theme| text::Style {
                    color: Some(palette::GRAY_200),
                }),
        )
        .into()
}

/// `name.png · 800×600 · 42KB`, omitting the dimensions when unknown.
fn file_caption(meta: &FileMeta) -> String {
    let name = meta
        .path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let size_kb = meta.size / 1024;

    match meta.dimensions {
        Some((w, h)) => format!("{name} \u{00b7} {w}\u{00d7}{h} \u{00b7} {size_kb}KB"),
        None => format!("{name} \u{00b7} {size_kb}KB"),
    }
}

fn drop_zone_style(theme: &Theme) -> container::Style {
    container::Style {
        background: Some(iced::Background::Color(
            theme.extended_palette().background.weak.color,
        )),
        border: iced::Border {
            color: palette::GRAY_400,
            width: border::WIDTH_SM,
            radius: radius::MD.into(),
        },
        ..container::Style::default()
    }
}

/// Opens the async file dialog and captures metadata for the chosen file.
///
/// Resolves to `None` when the dialog is cancelled or the file cannot be
/// stat'ed; validation of size and format happens in the form afterwards.
pub async fn pick_file() -> Option<FileMeta> {
    let handle = rfd::AsyncFileDialog::new()
        .set_title("Selecione uma imagem")
        .add_filter("Imagens", &["png", "jpg", "jpeg", "gif"])
        .add_filter("Todos os arquivos", &["*"])
        .pick_file()
        .await?;

    FileMeta::from_path(handle.path()).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn meta(name: &str, size: u64, dimensions: Option<(u32, u32)>) -> FileMeta {
        FileMeta {
            path: PathBuf::from(name),
            size,
            mime: "image/png".to_string(),
            dimensions,
        }
    }

    #[test]
    fn caption_includes_dimensions_when_probed() {
        let caption = file_caption(&meta("foto.png", 43 * 1024, Some((800, 600))));
        assert_eq!(caption, "foto.png \u{00b7} 800\u{00d7}600 \u{00b7} 43KB");
    }

    #[test]
    fn caption_omits_dimensions_when_unknown() {
        let caption = file_caption(&meta("foto.png", 2048, None));
        assert_eq!(caption, "foto.png \u{00b7} 2KB");
    }

    #[test]
    fn view_renders_every_state() {
        let selected = meta("foto.png", 1024, Some((10, 10)));
        let _empty = view(None, "", false, None);
        let _with_error = view(None, "", false, Some("Arquivo obrigatório"));
        let _uploading = view(Some(&selected), "foto.png", true, None);
        let _idle = view(Some(&selected), "foto.png", false, None);
    }
}
