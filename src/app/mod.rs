// SPDX-License-Identifier: MPL-2.0
//! Application root state and orchestration between the gallery, the upload
//! form and the image viewer.
//!
//! The `App` struct owns the cached images collection and the modal layers,
//! and translates component messages into side effects like API calls or
//! host uploads. Policy decisions (what invalidates the collection, which
//! modal Escape closes) live close to the main update loop so user-facing
//! behavior is easy to audit.

mod message;
mod subscription;
mod update;
mod view;

pub use message::{Flags, Message};

use crate::api::{self, cache::QueryCache, ImageRecord};
use crate::config;
use crate::ui::notifications::{self, Notification};
use crate::ui::upload_form;
use iced::widget::image::Handle;
use iced::{window, Element, Subscription, Task, Theme};
use std::collections::HashMap;
use std::fmt;

pub const WINDOW_DEFAULT_WIDTH: u32 = 1024;
pub const WINDOW_DEFAULT_HEIGHT: u32 = 720;
pub const MIN_WINDOW_WIDTH: u32 = 480;
pub const MIN_WINDOW_HEIGHT: u32 = 480;

/// The image currently shown in the full-size viewer modal.
#[derive(Debug)]
struct ViewerState {
    url: String,
    /// Fetched image data; `None` while the download is in flight.
    handle: Option<Handle>,
}

/// Root Iced application state.
pub struct App {
    config: config::Config,
    api: api::Client,
    /// Cached images collection, invalidated after a successful registration.
    images: QueryCache<Vec<ImageRecord>>,
    images_loading: bool,
    images_error: bool,
    /// Downloaded image bytes keyed by URL, shared by cards and the viewer.
    image_data: HashMap<String, Handle>,
    /// Upload form modal; `Some` only while it is open.
    upload_form: Option<upload_form::State>,
    /// Full-size viewer modal; `Some` only while it is open.
    viewer: Option<ViewerState>,
    /// Toast notification manager for user feedback.
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("form_open", &self.upload_form.is_some())
            .field("viewer_open", &self.viewer.is_some())
            .finish()
    }
}

impl Default for App {
    fn default() -> Self {
        Self {
            config: config::Config::default(),
            api: api::Client::new(config::DEFAULT_API_BASE_URL),
            images: QueryCache::new(),
            images_loading: false,
            images_error: false,
            image_data: HashMap::new(),
            upload_form: None,
            viewer: None,
            notifications: notifications::Manager::new(),
        }
    }
}

/// Builds the window settings.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: iced::Size::new(WINDOW_DEFAULT_WIDTH as f32, WINDOW_DEFAULT_HEIGHT as f32),
        min_size: Some(iced::Size::new(
            MIN_WINDOW_WIDTH as f32,
            MIN_WINDOW_HEIGHT as f32,
        )),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    use std::cell::RefCell;

    // Wrap flags in RefCell<Option<_>> to satisfy Fn trait requirement
    // while only consuming flags once (iced 0.14 requires Fn, not FnOnce)
    let boot_state = RefCell::new(Some(flags));
    let boot = move || {
        let flags = boot_state
            .borrow_mut()
            .take()
            .expect("Boot function called more than once");
        App::new(flags)
    };

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Initializes application state and kicks off the initial collection
    /// fetch.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load();

        let base_url = flags
            .api_url
            .unwrap_or_else(|| config.server.api_base_url.clone());

        let mut app = App {
            api: api::Client::new(base_url),
            config,
            ..Self::default()
        };

        if let Some(warning) = config_warning {
            app.notifications
                .push(Notification::warning("Configurações", warning));
        }

        let fetch = update::refetch_images(&mut app);
        (app, fetch)
    }

    fn title(&self) -> String {
        "Galeria".to_string()
    }

    fn theme(&self) -> Theme {
        Theme::Dark
    }

    fn subscription(&self) -> Subscription<Message> {
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(self.notifications.has_notifications()),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        update::handle_message(self, message)
    }

    fn view(&self) -> Element<'_, Message> {
        view::view(self)
    }
}
