// SPDX-License-Identifier: MPL-2.0
//! UI components: the gallery screen, the upload form, the full-size image
//! viewer and the toast notification system.

pub mod design_tokens;
pub mod gallery;
pub mod image_viewer;
pub mod notifications;
pub mod upload_form;

use design_tokens::{opacity, palette};
use iced::widget::{center, container, mouse_area, opaque, stack};
use iced::{Color, Element};

/// Stacks `content` as a centered modal over `base`.
///
/// Clicking the dimmed backdrop emits `on_blur`; the modal never flips the
/// caller's open flag itself.
pub fn modal<'a, Message: Clone + 'a>(
    base: Element<'a, Message>,
    content: Element<'a, Message>,
    on_blur: Message,
) -> Element<'a, Message> {
    let backdrop = mouse_area(
        center(opaque(content)).style(|_theme| container::Style {
            background: Some(iced::Background::Color(Color {
                a: opacity::OVERLAY_STRONG,
                ..palette::BLACK
            })),
            ..container::Style::default()
        }),
    )
    .on_press(on_blur);

    stack![base, opaque(backdrop)].into()
}
