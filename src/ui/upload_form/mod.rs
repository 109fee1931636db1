// SPDX-License-Identifier: MPL-2.0
//! The image-upload form.
//!
//! Owns the field state, runs the validation rules, and drives the
//! submission protocol: the selected file is uploaded to the external image
//! host by the file-input collaborator, and only once that upload yields a
//! public URL can the record be registered with the gallery API.
//!
//! `update` is pure with respect to side effects: it returns an [`Effect`]
//! describing the network call, notification, or modal close the shell must
//! perform, which keeps the whole protocol testable without UI or network.

pub mod file_input;
pub mod validation;

use crate::api::host::Uploaded;
use crate::api::NewImage;
use crate::error::Error;
use crate::ui::design_tokens::{palette, sizing, spacing, typography};
use crate::ui::notifications::Notification;
use iced::widget::{button, text, text_input, Column, Container, Text};
use iced::{Element, Length, Theme};
use std::path::PathBuf;
use validation::{Field, FieldErrors, FileMeta};

#[derive(Debug, Clone)]
pub enum Message {
    TitleChanged(String),
    DescriptionChanged(String),
    /// Open the file picker.
    PickImage,
    /// File picker resolved (`None` = cancelled).
    ImagePicked(Option<FileMeta>),
    /// The opaque host upload resolved.
    UploadFinished(Result<Uploaded, Error>),
    Submit,
    /// The registration request resolved.
    RegisterFinished(Result<(), Error>),
    /// The user dismissed the modal without submitting.
    Cancel,
}

/// Side effect requested by [`State::update`], performed by the app shell.
#[derive(Debug, Clone)]
pub enum Effect {
    None,
    /// Open the async file dialog.
    PickImage,
    /// Upload the picked file to the image host.
    Upload(PathBuf),
    /// Register the image with the gallery API.
    Register(NewImage),
    /// Show a transient notification; the form stays open.
    Notify(Notification),
    /// Terminal outcome of a registration attempt: the shell must show the
    /// outcome notification, invalidate the images collection on success,
    /// and close the modal exactly once.
    Completed(Result<(), Error>),
    /// Close the modal without a registration attempt.
    CloseModal,
}

/// Form state, created fresh each time the containing modal opens.
#[derive(Debug, Default)]
pub struct State {
    selected_file: Option<FileMeta>,
    /// Public URL returned by the image host; empty until an upload
    /// succeeds. Gates submission.
    remote_image_url: String,
    /// Local path used for the preview; display only.
    local_preview_url: String,
    title: String,
    description: String,
    field_errors: FieldErrors,
    is_submitting: bool,
    is_uploading: bool,
}

impl State {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn update(&mut self, message: Message) -> Effect {
        match message {
            Message::TitleChanged(value) => {
                self.title = value;
                Effect::None
            }
            Message::DescriptionChanged(value) => {
                self.description = value;
                Effect::None
            }
            Message::PickImage => {
                if self.is_uploading || self.is_submitting {
                    Effect::None
                } else {
                    Effect::PickImage
                }
            }
            Message::ImagePicked(None) => Effect::None,
            Message::ImagePicked(Some(meta)) => self.handle_image_picked(meta),
            Message::UploadFinished(result) => self.handle_upload_finished(result),
            Message::Submit => self.handle_submit(),
            Message::RegisterFinished(result) => {
                self.is_submitting = false;
                self.reset();
                Effect::Completed(result)
            }
            Message::Cancel => Effect::CloseModal,
        }
    }

    /// The file-input collaborator re-validates the image field on every
    /// pick and only starts the host upload for an accepted file.
    fn handle_image_picked(&mut self, meta: FileMeta) -> Effect {
        let error = validation::validate_image(Some(&meta));
        self.field_errors.set(Field::Image, error);
        self.remote_image_url.clear();

        if error.is_some() {
            self.selected_file = Some(meta);
            self.local_preview_url.clear();
            self.is_uploading = false;
            return Effect::None;
        }

        self.local_preview_url = meta.path.to_string_lossy().into_owned();
        let path = meta.path.clone();
        self.selected_file = Some(meta);
        self.is_uploading = true;
        Effect::Upload(path)
    }

    fn handle_upload_finished(&mut self, result: Result<Uploaded, Error>) -> Effect {
        if !self.is_uploading {
            // Late resolution from a superseded upload; not observed.
            return Effect::None;
        }
        self.is_uploading = false;

        match result {
            Ok(uploaded) => {
                self.remote_image_url = uploaded.url;
                Effect::None
            }
            Err(_) => {
                self.selected_file = None;
                self.local_preview_url.clear();
                self.remote_image_url.clear();
                Effect::Notify(upload_failed_notification())
            }
        }
    }

    fn handle_submit(&mut self) -> Effect {
        if self.is_submitting {
            return Effect::None;
        }

        let errors = validation::validate_all(
            self.selected_file.as_ref(),
            &self.title,
            &self.description,
        );
        if !errors.is_empty() {
            self.field_errors = errors;
            return Effect::None;
        }
        self.field_errors = errors;

        // Submission is gated on a completed upload. This branch returns
        // early without resetting the form: the user keeps their input and
        // waits for the upload instead of retyping everything.
        if self.remote_image_url.is_empty() {
            return Effect::Notify(missing_upload_notification());
        }

        self.is_submitting = true;
        Effect::Register(NewImage {
            title: self.title.clone(),
            description: self.description.clone(),
            url: self.remote_image_url.clone(),
        })
    }

    /// Clears the file selection, URLs, fields and errors.
    fn reset(&mut self) {
        let is_submitting = self.is_submitting;
        *self = Self::default();
        self.is_submitting = is_submitting;
    }

    #[must_use]
    pub fn remote_image_url(&self) -> &str {
        &self.remote_image_url
    }

    #[must_use]
    pub fn local_preview_url(&self) -> &str {
        &self.local_preview_url
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn selected_file(&self) -> Option<&FileMeta> {
        self.selected_file.as_ref()
    }

    #[must_use]
    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    #[must_use]
    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    #[must_use]
    pub fn is_uploading(&self) -> bool {
        self.is_uploading
    }

    pub fn view(&self) -> Element<'_, Message> {
        let file = file_input::view(
            self.selected_file.as_ref(),
            &self.local_preview_url,
            self.is_uploading,
            self.field_errors.get(Field::Image),
        );

        let title_input = text_input("Título da imagem...", &self.title)
            .on_input(Message::TitleChanged)
            .padding(spacing::SM)
            .size(typography::BODY);

        let description_input = text_input("Descrição da imagem...", &self.description)
            .on_input(Message::DescriptionChanged)
            .padding(spacing::SM)
            .size(typography::BODY);

        let submit_label = if self.is_submitting {
            "Enviando..."
        } else {
            "Enviar"
        };
        let mut submit = button(
            Text::new(submit_label)
                .size(typography::BODY)
                .width(Length::Fill)
                .center(),
        )
        .width(Length::Fill)
        .padding(spacing::SM);
        if !self.is_submitting {
            submit = submit.on_press(Message::Submit);
        }

        let form = Column::new()
            .spacing(spacing::MD)
            .push(file)
            .push(labeled_field(title_input.into(), self.field_errors.get(Field::Title)))
            .push(labeled_field(
                description_input.into(),
                self.field_errors.get(Field::Description),
            ))
            .push(submit);

        Container::new(form)
            .width(Length::Fixed(sizing::FORM_WIDTH))
            .padding(spacing::LG)
            .style(|theme: &Theme| iced::widget::container::Style {
                background: Some(iced::Background::Color(
                    theme.extended_palette().background.base.color,
                )),
                border: iced::Border {
                    radius: crate::ui::design_tokens::radius::MD.into(),
                    ..Default::default()
                },
                ..Default::default()
            })
            .into()
    }
}

/// Stacks a field above its inline validation error, when one is set.
fn labeled_field<'a>(
    field: Element<'a, Message>,
    error: Option<&'a str>,
) -> Element<'a, Message> {
    let mut column = Column::new().spacing(spacing::XXS).push(field);
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

/// Shown when submission is attempted before the host upload finished.
pub fn missing_upload_notification() -> Notification {
    Notification::error(
        "Imagem não adicionada",
        "É preciso adicionar e aguardar o upload de uma imagem antes de realizar o cadastro.",
    )
}

/// Shown after a successful registration.
pub fn registered_notification() -> Notification {
    Notification::success("Imagem cadastrada", "Sua imagem foi cadastrada com sucesso.")
}

/// Shown when the registration request fails.
pub fn register_failed_notification() -> Notification {
    Notification::error(
        "Falha no cadastro",
        "Ocorreu um erro ao tentar cadastrar a sua imagem.",
    )
}

/// Shown when the host upload fails.
pub fn upload_failed_notification() -> Notification {
    Notification::error(
        "Falha no upload",
        "Ocorreu um erro ao realizar o upload da sua imagem.",
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::notifications::Severity;
    use validation::{
        MSG_IMAGE_FORMAT, MSG_TITLE_REQUIRED, MAX_FILE_SIZE,
    };

    fn assert_notify(effect: &Effect, expected: &Notification) {
        match effect {
            Effect::Notify(n) => {
                assert_eq!(n.severity(), expected.severity());
                assert_eq!(n.title(), expected.title());
                assert_eq!(n.message(), expected.message());
            }
            other => panic!("expected Notify effect, got {other:?}"),
        }
    }

    fn picked(size: u64, name: &str) -> FileMeta {
        FileMeta {
            path: PathBuf::from(name),
            size,
            mime: validation::mime_from_extension(std::path::Path::new(name)),
            dimensions: Some((800, 600)),
        }
    }

    fn filled_state() -> State {
        let mut state = State::new();
        let _ = state.update(Message::TitleChanged("Paisagem".to_string()));
        let _ = state.update(Message::DescriptionChanged("Montanhas".to_string()));
        state
    }

    fn uploaded_state() -> State {
        let mut state = filled_state();
        let effect = state.update(Message::ImagePicked(Some(picked(1024, "foto.png"))));
        assert!(matches!(effect, Effect::Upload(_)));
        let _ = state.update(Message::UploadFinished(Ok(Uploaded {
            url: "https://cdn.example.com/foto.png".to_string(),
        })));
        state
    }

    #[test]
    fn picking_a_valid_file_starts_the_upload() {
        let mut state = State::new();
        let effect = state.update(Message::ImagePicked(Some(picked(1024, "foto.png"))));

        assert!(matches!(effect, Effect::Upload(path) if path == PathBuf::from("foto.png")));
        assert!(state.is_uploading());
        assert!(state.local_preview_url().contains("foto.png"));
        assert!(state.remote_image_url().is_empty());
        assert!(state.field_errors().get(Field::Image).is_none());
    }

    #[test]
    fn picking_an_invalid_file_sets_the_error_and_skips_the_upload() {
        let mut state = State::new();
        let effect = state.update(Message::ImagePicked(Some(picked(1024, "doc.pdf"))));

        assert!(matches!(effect, Effect::None));
        assert!(!state.is_uploading());
        assert_eq!(state.field_errors().get(Field::Image), Some(MSG_IMAGE_FORMAT));
        assert!(state.local_preview_url().is_empty());
    }

    #[test]
    fn picking_an_oversized_file_is_rejected() {
        let mut state = State::new();
        let effect = state.update(Message::ImagePicked(Some(picked(MAX_FILE_SIZE, "foto.png"))));

        assert!(matches!(effect, Effect::None));
        assert_eq!(
            state.field_errors().get(Field::Image),
            Some(validation::MSG_IMAGE_TOO_LARGE)
        );
    }

    #[test]
    fn upload_success_sets_the_remote_url() {
        let state = uploaded_state();
        assert_eq!(state.remote_image_url(), "https://cdn.example.com/foto.png");
        assert!(!state.is_uploading());
    }

    #[test]
    fn upload_failure_clears_the_selection_and_notifies() {
        let mut state = State::new();
        let _ = state.update(Message::ImagePicked(Some(picked(1024, "foto.png"))));

        let effect = state.update(Message::UploadFinished(Err(Error::Host("boom".into()))));

        assert_notify(&effect, &upload_failed_notification());
        assert!(state.selected_file().is_none());
        assert!(state.local_preview_url().is_empty());
        assert!(state.remote_image_url().is_empty());
        assert!(!state.is_uploading());
    }

    #[test]
    fn stale_upload_resolution_is_ignored() {
        let mut state = State::new();
        let effect = state.update(Message::UploadFinished(Ok(Uploaded {
            url: "https://cdn.example.com/late.png".to_string(),
        })));

        assert!(matches!(effect, Effect::None));
        assert!(state.remote_image_url().is_empty());
    }

    #[test]
    fn submit_with_invalid_fields_sets_errors_without_effects() {
        let mut state = State::new();
        let effect = state.update(Message::Submit);

        assert!(matches!(effect, Effect::None));
        assert_eq!(
            state.field_errors().get(Field::Title),
            Some(MSG_TITLE_REQUIRED)
        );
        assert!(!state.is_submitting());
    }

    #[test]
    fn submit_before_upload_completes_notifies_without_reset() {
        let mut state = filled_state();
        let _ = state.update(Message::ImagePicked(Some(picked(1024, "foto.png"))));
        assert!(state.is_uploading());

        let effect = state.update(Message::Submit);

        assert_notify(&effect, &missing_upload_notification());
        // The early return must not reset the form.
        assert_eq!(state.title(), "Paisagem");
        assert_eq!(state.description(), "Montanhas");
        assert!(state.selected_file().is_some());
        assert!(!state.is_submitting());
    }

    #[test]
    fn submit_with_upload_done_registers_the_three_fields() {
        let mut state = uploaded_state();
        let effect = state.update(Message::Submit);

        match effect {
            Effect::Register(image) => {
                assert_eq!(
                    image,
                    NewImage {
                        title: "Paisagem".to_string(),
                        description: "Montanhas".to_string(),
                        url: "https://cdn.example.com/foto.png".to_string(),
                    }
                );
            }
            other => panic!("expected Register effect, got {other:?}"),
        }
        assert!(state.is_submitting());
    }

    #[test]
    fn submit_while_submitting_is_ignored() {
        let mut state = uploaded_state();
        let first = state.update(Message::Submit);
        assert!(matches!(first, Effect::Register(_)));

        let second = state.update(Message::Submit);
        assert!(matches!(second, Effect::None));
    }

    #[test]
    fn registration_success_resets_and_completes() {
        let mut state = uploaded_state();
        let _ = state.update(Message::Submit);

        let effect = state.update(Message::RegisterFinished(Ok(())));

        assert!(matches!(effect, Effect::Completed(Ok(()))));
        assert!(state.selected_file().is_none());
        assert!(state.remote_image_url().is_empty());
        assert!(state.local_preview_url().is_empty());
        assert!(state.title().is_empty());
        assert!(state.description().is_empty());
        assert!(state.field_errors().is_empty());
        assert!(!state.is_submitting());
    }

    #[test]
    fn registration_failure_also_resets_and_completes() {
        let mut state = uploaded_state();
        let _ = state.update(Message::Submit);

        let effect = state.update(Message::RegisterFinished(Err(Error::Api("500".into()))));

        assert!(matches!(effect, Effect::Completed(Err(Error::Api(_)))));
        assert!(state.selected_file().is_none());
        assert!(state.remote_image_url().is_empty());
        assert!(!state.is_submitting());
    }

    #[test]
    fn pick_is_ignored_while_uploading_or_submitting() {
        let mut state = State::new();
        let _ = state.update(Message::ImagePicked(Some(picked(1024, "foto.png"))));
        assert!(matches!(state.update(Message::PickImage), Effect::None));

        let mut state = uploaded_state();
        let _ = state.update(Message::Submit);
        assert!(matches!(state.update(Message::PickImage), Effect::None));
    }

    #[test]
    fn cancel_requests_modal_close() {
        let mut state = filled_state();
        assert!(matches!(state.update(Message::Cancel), Effect::CloseModal));
    }

    #[test]
    fn outcome_notifications_use_the_fixed_triples() {
        let missing = missing_upload_notification();
        assert_eq!(missing.severity(), Severity::Error);
        assert_eq!(missing.title(), "Imagem não adicionada");
        assert_eq!(
            missing.message(),
            "É preciso adicionar e aguardar o upload de uma imagem antes de realizar o cadastro."
        );

        let registered = registered_notification();
        assert_eq!(registered.severity(), Severity::Success);
        assert_eq!(registered.title(), "Imagem cadastrada");
        assert_eq!(registered.message(), "Sua imagem foi cadastrada com sucesso.");

        let failed = register_failed_notification();
        assert_eq!(failed.severity(), Severity::Error);
        assert_eq!(failed.title(), "Falha no cadastro");
        assert_eq!(
            failed.message(),
            "Ocorreu um erro ao tentar cadastrar a sua imagem."
        );
    }
}
