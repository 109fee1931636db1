// SPDX-License-Identifier: MPL-2.0
//! Gallery API client.
//!
//! The backend exposes a single resource: registered images. The client
//! registers new records with `POST api/images` and reads the collection with
//! `GET api/images`. Registration success is any 2xx status; the response
//! body is not inspected.

pub mod cache;
pub mod host;

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// Cache key for the registered-images collection.
pub const IMAGES_QUERY_KEY: &str = "images";

const USER_AGENT: &str = concat!("Galeria/", env!("CARGO_PKG_VERSION"));

/// Payload for registering an image after its upload completed.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct NewImage {
    pub title: String,
    pub description: String,
    pub url: String,
}

/// A registered image as returned by the gallery API.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ImageRecord {
    #[serde(default)]
    pub id: String,
    pub title: String,
    pub description: String,
    pub url: String,
}

/// Thin client over the gallery API.
///
/// Holds only the base URL; the reqwest client is built per request so
/// construction is infallible and the value stays cheap to clone into tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    base_url: String,
}

impl Client {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    fn http(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::Api(e.to_string()))
    }

    /// Registers an image record. Success is any non-error HTTP response.
    pub async fn create_image(&self, image: &NewImage) -> Result<()> {
        let response = self
            .http()?
            .post(self.endpoint("api/images"))
            .json(image)
            .send()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Error::Api(format!("HTTP status: {}", response.status())))
        }
    }

    /// Fetches the registered-images collection.
    pub async fn list_images(&self) -> Result<Vec<ImageRecord>> {
        let response = self
            .http()?
            .get(self.endpoint("api/images"))
            .send()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!("HTTP status: {}", response.status())));
        }

        response
            .json::<Vec<ImageRecord>>()
            .await
            .map_err(|e| Error::Api(e.to_string()))
    }

    /// Downloads raw image bytes, used by the viewer modal.
    pub async fn fetch_image(&self, url: &str) -> Result<Vec<u8>> {
        let response = self
            .http()?
            .get(url)
            .send()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;

        if !response.status().is_success() {
            return Err(Error::Api(format!("HTTP status: {}", response.status())));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Api(e.to_string()))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_duplicate_slashes() {
        let client = Client::new("http://localhost:3000/");
        assert_eq!(
            client.endpoint("/api/images"),
            "http://localhost:3000/api/images"
        );
        assert_eq!(
            client.endpoint("api/images"),
            "http://localhost:3000/api/images"
        );
    }

    #[test]
    fn new_image_serializes_to_the_wire_shape() {
        let image = NewImage {
            title: "Paisagem".to_string(),
            description: "Montanhas ao amanhecer".to_string(),
            url: "https://cdn.example.com/a.png".to_string(),
        };

        let value = serde_json::to_value(&image).expect("serialize");
        assert_eq!(
            value,
            serde_json::json!({
                "title": "Paisagem",
                "description": "Montanhas ao amanhecer",
                "url": "https://cdn.example.com/a.png",
            })
        );
    }

    #[test]
    fn image_record_deserializes_with_and_without_id() {
        let with_id: ImageRecord = serde_json::from_str(
            r#"{"id":"abc","title":"t","description":"d","url":"https://x/y.png"}"#,
        )
        .expect("deserialize");
        assert_eq!(with_id.id, "abc");

        let without_id: ImageRecord =
            serde_json::from_str(r#"{"title":"t","description":"d","url":"https://x/y.png"}"#)
                .expect("deserialize");
        assert_eq!(without_id.id, "");
        assert_eq!(without_id.url, "https://x/y.png");
    }
}
