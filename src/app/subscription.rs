// SPDX-License-Identifier: MPL-2.0
//! Event subscriptions for the application.
//!
//! Keyboard events are routed here so modals can be dismissed with Escape,
//! and a periodic tick drives notification auto-dismiss.

use super::Message;
use iced::keyboard::key;
use iced::{event, time, Subscription};
use std::time::Duration;

/// Emits [`Message::EscapePressed`] for Escape presses no widget captured.
pub fn create_event_subscription() -> Subscription<Message> {
    event::listen_with(|event, status, _window_id| {
        if status == event::Status::Captured {
            return None;
        }

        match event {
            event::Event::Keyboard(iced::keyboard::Event::KeyPressed {
                key: iced::keyboard::Key::Named(key::Named::Escape),
                ..
            }) => Some(Message::EscapePressed),
            _ => None,
        }
    })
}

/// Creates a periodic tick subscription for notification auto-dismiss.
///
/// Only active while notifications are showing so the app stays idle
/// otherwise.
pub fn create_tick_subscription(has_notifications: bool) -> Subscription<Message> {
    if has_notifications {
        time::every(Duration::from_millis(100)).map(Message::Tick)
    } else {
        Subscription::none()
    }
}
