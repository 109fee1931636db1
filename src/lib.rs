// SPDX-License-Identifier: MPL-2.0
//! `galeria` is a desktop image-gallery client built with the Iced GUI framework.
//!
//! It lets the user upload images to an external image host, register them in
//! a gallery API with a validated title and description, and browse the
//! registered collection with a full-size modal viewer.

pub mod api;
pub mod app;
pub mod config;
pub mod error;
pub mod ui;
