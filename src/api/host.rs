// SPDX-License-Identifier: MPL-2.0
//! Image-host upload.
//!
//! The host is an external service that stores the uploaded binary and
//! returns a public URL. From the form's point of view this is an opaque
//! async operation yielding a URL or an error: no retries, no cancellation,
//! no progress reporting.

use crate::error::{Error, Result};
use std::path::Path;

const USER_AGENT: &str = concat!("Galeria/", env!("CARGO_PKG_VERSION"));

/// Result of a successful host upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uploaded {
    /// Public URL of the stored image.
    pub url: String,
}

/// Uploads the file at `path` to the image host via multipart POST.
///
/// `api_key`, when present, is sent as the `key` query parameter (the shape
/// used by common image hosts).
pub async fn upload(upload_url: &str, api_key: Option<&str>, path: &Path) -> Result<Uploaded> {
    let bytes = std::fs::read(path).map_err(|e| Error::Host(e.to_string()))?;
    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("image")
        .to_string();

    let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name);
    let form = reqwest::multipart::Form::new().part("image", part);

    let client = reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .build()
        .map_err(|e| Error::Host(e.to_string()))?;

    let mut request = client.post(upload_url);
    if let Some(key) = api_key {
        request = request.query(&[("key", key)]);
    }

    let response = request
        .multipart(form)
        .send()
        .await
        .map_err(|e| Error::Host(e.to_string()))?;

    if !response.status().is_success() {
        return Err(Error::Host(format!("HTTP status: {}", response.status())));
    }

    let body = response
        .text()
        .await
        .map_err(|e| Error::Host(e.to_string()))?;
    parse_upload_response(&body)
}

/// Extracts the public URL from the host's JSON response.
///
/// Accepts both a flat `{"url": ...}` body and the `{"data": {"url": ...}}`
/// envelope some hosts wrap their payload in.
pub fn parse_upload_response(body: &str) -> Result<Uploaded> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| Error::Host(e.to_string()))?;

    let url = value
        .get("url")
        .and_then(serde_json::Value::as_str)
        .or_else(|| {
            value
                .get("data")
                .and_then(|data| data.get("url"))
                .and_then(serde_json::Value::as_str)
        })
        .ok_or_else(|| Error::Host("upload response did not contain a URL".to_string()))?;

    Ok(Uploaded {
        url: url.to_string(),
    })
}
