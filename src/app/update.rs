// SPDX-License-Identifier: MPL-2.0
//! Update logic and message handlers for the application.
//!
//! The component modules return descriptions of the work they need (the
//! upload form's `Effect`, the gallery's messages); this module turns those
//! into `Task`s and mutations of the root state.

use super::{App, Message, ViewerState};
use crate::api::{self, host, IMAGES_QUERY_KEY};
use crate::error::Error;
use crate::ui::upload_form::{
    self, register_failed_notification, registered_notification,
};
use crate::ui::{gallery, image_viewer, notifications::Notification};
use iced::widget::image::Handle;
use iced::Task;

pub(super) fn handle_message(app: &mut App, message: Message) -> Task<Message> {
    match message {
        Message::Gallery(message) => handle_gallery_message(app, message),
        Message::UploadForm(message) => handle_form_message(app, message),
        Message::Viewer(message) => handle_viewer_message(app, message),
        Message::Notification(message) => {
            app.notifications.handle_message(&message);
            Task::none()
        }
        Message::ImagesLoaded(result) => handle_images_loaded(app, result),
        Message::ImageFetched { url, result } => handle_image_fetched(app, url, result),
        Message::EscapePressed => handle_escape(app),
        Message::Tick(_) => {
            app.notifications.tick();
            Task::none()
        }
    }
}

fn handle_gallery_message(app: &mut App, message: gallery::Message) -> Task<Message> {
    match message {
        gallery::Message::OpenImage(url) => {
            let handle = app.image_data.get(&url).cloned();
            let fetch = if handle.is_some() {
                Task::none()
            } else {
                fetch_image_task(app, url.clone())
            };
            app.viewer = Some(ViewerState { url, handle });
            fetch
        }
        gallery::Message::AddImage => {
            app.upload_form = Some(upload_form::State::new());
            Task::none()
        }
        gallery::Message::Refresh => refetch_images(app),
    }
}

fn handle_form_message(app: &mut App, message: upload_form::Message) -> Task<Message> {
    let Some(form) = app.upload_form.as_mut() else {
        // The modal closed before this message resolved; drop it.
        return Task::none();
    };

    let effect = form.update(message);
    perform_form_effect(app, effect)
}

fn perform_form_effect(app: &mut App, effect: upload_form::Effect) -> Task<Message> {
    match effect {
        upload_form::Effect::None => Task::none(),
        upload_form::Effect::PickImage => Task::perform(
            upload_form::file_input::pick_file(),
            |meta| Message::UploadForm(upload_form::Message::ImagePicked(meta)),
        ),
        upload_form::Effect::Upload(path) => {
            let upload_url = app.config.host.upload_url.clone();
            let api_key = app.config.host.api_key.clone();
            Task::perform(
                async move { host::upload(&upload_url, api_key.as_deref(), &path).await },
                |result| Message::UploadForm(upload_form::Message::UploadFinished(result)),
            )
        }
        upload_form::Effect::Register(image) => {
            let client = app.api.clone();
            Task::perform(
                async move { client.create_image(&image).await },
                |result| Message::UploadForm(upload_form::Message::RegisterFinished(result)),
            )
        }
        upload_form::Effect::Notify(notification) => {
            app.notifications.push(notification);
            Task::none()
        }
        upload_form::Effect::Completed(result) => {
            app.upload_form = None;
            match result {
                Ok(()) => {
                    app.images.invalidate(IMAGES_QUERY_KEY);
                    app.notifications.push(registered_notification());
                    refetch_images(app)
                }
                Err(_) => {
                    app.notifications.push(register_failed_notification());
                    Task::none()
                }
            }
        }
        upload_form::Effect::CloseModal => {
            app.upload_form = None;
            Task::none()
        }
    }
}

fn handle_viewer_message(app: &mut App, message: image_viewer::Message) -> Task<Message> {
    match message {
        image_viewer::Message::Close => {
            app.viewer = None;
            Task::none()
        }
        image_viewer::Message::OpenOriginal => {
            if let Some(viewer) = &app.viewer {
                if let Err(error) = open::that_detached(&viewer.url) {
                    app.notifications.push(Notification::error(
                        "Falha ao abrir o navegador",
                        error.to_string(),
                    ));
                }
            }
            Task::none()
        }
    }
}

fn handle_images_loaded(
    app: &mut App,
    result: Result<Vec<api::ImageRecord>, Error>,
) -> Task<Message> {
    app.images_loading = false;

    match result {
        Ok(images) => {
            app.images_error = false;

            let missing: Vec<String> = images
                .iter()
                .map(|record| record.url.clone())
                .filter(|url| !app.image_data.contains_key(url))
                .collect();
            app.images.store(IMAGES_QUERY_KEY, images);

            Task::batch(missing.into_iter().map(|url| fetch_image_task(app, url)))
        }
        Err(_) => {
            app.images_error = true;
            Task::none()
        }
    }
}

fn handle_image_fetched(
    app: &mut App,
    url: String,
    result: Result<Vec<u8>, Error>,
) -> Task<Message> {
    match result {
        Ok(bytes) => {
            let handle = Handle::from_bytes(bytes);
            if let Some(viewer) = app.viewer.as_mut() {
                if viewer.url == url {
                    viewer.handle = Some(handle.clone());
                }
            }
            app.image_data.insert(url, handle);
        }
        Err(_) => {
            // Cards fall back to their placeholder; only tell the user when
            // the full-size viewer is waiting on this image.
            if app.viewer.as_ref().is_some_and(|viewer| viewer.url == url) {
                app.notifications.push(Notification::error(
                    "Falha ao carregar a imagem",
                    "Não foi possível baixar a imagem selecionada.",
                ));
            }
        }
    }
    Task::none()
}

/// Escape dismisses the topmost layer: viewer first, then the upload form.
fn handle_escape(app: &mut App) -> Task<Message> {
    if app.viewer.take().is_none() {
        app.upload_form = None;
    }
    Task::none()
}

pub(super) fn refetch_images(app: &mut App) -> Task<Message> {
    app.images_loading = true;
    app.images_error = false;

    let client = app.api.clone();
    Task::perform(
        async move { client.list_images().await },
        Message::ImagesLoaded,
    )
}

fn fetch_image_task(app: &App, url: String) -> Task<Message> {
    let client = app.api.clone();
    Task::perform(
        async move {
            let result = client.fetch_image(&url).await;
            (url, result)
        },
        |(url, result)| Message::ImageFetched { url, result },
    )
}
