// SPDX-License-Identifier: MPL-2.0
//! Top-level messages and runtime flags for the application.

use crate::api::ImageRecord;
use crate::error::Error;
use crate::ui::{gallery, image_viewer, notifications, upload_form};
use std::time::Instant;

/// Top-level messages consumed by `App::update`. The variants forward
/// lower-level component messages while keeping a single update entrypoint.
#[derive(Debug, Clone)]
pub enum Message {
    Gallery(gallery::Message),
    UploadForm(upload_form::Message),
    Viewer(image_viewer::Message),
    Notification(notifications::NotificationMessage),
    /// The registered-images fetch resolved.
    ImagesLoaded(Result<Vec<ImageRecord>, Error>),
    /// Raw bytes for one gallery image arrived (or failed).
    ImageFetched {
        url: String,
        result: Result<Vec<u8>, Error>,
    },
    /// Escape closes the topmost modal.
    EscapePressed,
    /// Periodic tick for notification auto-dismiss.
    Tick(Instant),
}

/// Runtime flags parsed from the command line by `main.rs`.
#[derive(Debug, Clone, Default)]
pub struct Flags {
    /// Overrides the configured gallery API base URL.
    pub api_url: Option<String>,
}
