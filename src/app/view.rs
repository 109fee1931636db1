// SPDX-License-Identifier: MPL-2.0
//! View rendering for the application.
//!
//! Composes the gallery screen with the optional modal layers (upload form,
//! full-size viewer) and the toast overlay on top.

use super::{App, Message};
use crate::api::IMAGES_QUERY_KEY;
use crate::ui::notifications::Toast;
use crate::ui::{self, gallery, image_viewer};
use iced::widget::stack;
use iced::Element;

pub(super) fn view(app: &App) -> Element<'_, Message> {
    let gallery_view = gallery::view(gallery::ViewContext {
        images: app.images.get(IMAGES_QUERY_KEY).map(Vec::as_slice),
        is_loading: app.images_loading,
        load_failed: app.images_error,
        thumbnails: &app.image_data,
    })
    .map(Message::Gallery);

    let mut content = gallery_view;

    if let Some(form) = &app.upload_form {
        content = ui::modal(
            content,
            form.view().map(Message::UploadForm),
            Message::UploadForm(crate::ui::upload_form::Message::Cancel),
        );
    }

    if let Some(viewer) = &app.viewer {
        content = ui::modal(
            content,
            image_viewer::view(&viewer.url, viewer.handle.as_ref()).map(Message::Viewer),
            Message::Viewer(image_viewer::Message::Close),
        );
    }

    let toasts = Toast::view_overlay(&app.notifications).map(Message::Notification);

    stack![content, toasts].into()
}
