// SPDX-License-Identifier: MPL-2.0
//! Declarative validation rules for the upload form.
//!
//! Each field carries an ordered list of rules; the first failing rule wins
//! and maps to a fixed, human-readable message. The functions here are pure
//! so the rules can be tested without a rendered form.

use std::path::{Path, PathBuf};

/// Files must be strictly smaller than 10MB.
pub const MAX_FILE_SIZE: u64 = 1024 * 1024 * 10;

/// Accepted MIME types, matched case-insensitively against the end of the
/// type string (`image/png`, `image/jpeg`, `image/gif`).
pub const ACCEPTED_MIME_SUFFIXES: [&str; 3] = ["png", "jpeg", "gif"];

pub const TITLE_MIN_CHARS: usize = 2;
pub const TITLE_MAX_CHARS: usize = 20;
pub const DESCRIPTION_MAX_CHARS: usize = 65;

pub const MSG_IMAGE_REQUIRED: &str = "Arquivo obrigatório";
pub const MSG_IMAGE_TOO_LARGE: &str = "O arquivo deve ser menor que 10MB";
pub const MSG_IMAGE_FORMAT: &str = "Somente são aceitos arquivos PNG, JPEG e GIF";
pub const MSG_TITLE_REQUIRED: &str = "Título obrigatório";
pub const MSG_TITLE_TOO_SHORT: &str = "Mínimo de 2 caracteres";
pub const MSG_TITLE_TOO_LONG: &str = "Máximo de 20 caracteres";
pub const MSG_DESCRIPTION_REQUIRED: &str = "Descrição obrigatória";
pub const MSG_DESCRIPTION_TOO_LONG: &str = "Máximo de 65 caracteres";

/// The three fields of the upload form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Image,
    Title,
    Description,
}

/// Per-field error messages set by the last failed validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldErrors {
    image: Option<&'static str>,
    title: Option<&'static str>,
    description: Option<&'static str>,
}

impl FieldErrors {
    #[must_use]
    pub fn get(&self, field: Field) -> Option<&'static str> {
        match field {
            Field::Image => self.image,
            Field::Title => self.title,
            Field::Description => self.description,
        }
    }

    pub fn set(&mut self, field: Field, message: Option<&'static str>) {
        match field {
            Field::Image => self.image = message,
            Field::Title => self.title = message,
            Field::Description => self.description = message,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.image.is_none() && self.title.is_none() && self.description.is_none()
    }
}

/// Metadata of the file selected in the form, captured at pick time.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileMeta {
    pub path: PathBuf,
    /// Size in bytes from filesystem metadata.
    pub size: u64,
    /// MIME type derived from the file extension, the desktop analogue of
    /// the browser's `File.type`.
    pub mime: String,
    /// Pixel dimensions, when the file could be probed as an image.
    pub dimensions: Option<(u32, u32)>,
}

impl FileMeta {
    /// Captures metadata for a picked path.
    ///
    /// Fails only when the file cannot be stat'ed; an unprobeable image
    /// simply has no dimensions and is left for validation to reject.
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let size = std::fs::metadata(path)?.len();
        Ok(Self {
            path: path.to_path_buf(),
            size,
            mime: mime_from_extension(path),
            dimensions: image_rs::image_dimensions(path).ok(),
        })
    }
}

/// Derives a MIME type from the file extension.
pub fn mime_from_extension(path: &Path) -> String {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match ext.as_deref() {
        Some("png") => "image/png".to_string(),
        Some("jpg") | Some("jpeg") => "image/jpeg".to_string(),
        Some("gif") => "image/gif".to_string(),
        Some("webp") => "image/webp".to_string(),
        Some("bmp") => "image/bmp".to_string(),
        Some("svg") => "image/svg+xml".to_string(),
        _ => "application/octet-stream".to_string(),
    }
}

fn has_accepted_mime(mime: &str) -> bool {
    let mime = mime.to_ascii_lowercase();
    ACCEPTED_MIME_SUFFIXES
        .iter()
        .any(|suffix| mime.ends_with(suffix))
}

/// image: required; size strictly below the limit; accepted format.
#[must_use]
pub fn validate_image(file: Option<&FileMeta>) -> Option<&'static str> {
    let Some(file) = file else {
        return Some(MSG_IMAGE_REQUIRED);
    };
    if file.size >= MAX_FILE_SIZE {
        return Some(MSG_IMAGE_TOO_LARGE);
    }
    if !has_accepted_mime(&file.mime) {
        return Some(MSG_IMAGE_FORMAT);
    }
    None
}

/// title: required; trimmed length within [2, 20] characters.
#[must_use]
pub fn validate_title(title: &str) -> Option<&'static str> {
    let trimmed = title.trim();
    if trimmed.is_empty() {
        return Some(MSG_TITLE_REQUIRED);
    }
    let chars = trimmed.chars().count();
    if chars < TITLE_MIN_CHARS {
        return Some(MSG_TITLE_TOO_SHORT);
    }
    if chars > TITLE_MAX_CHARS {
        return Some(MSG_TITLE_TOO_LONG);
    }
    None
}

/// description: required; trimmed length at most 65 characters.
#[must_use]
pub fn validate_description(description: &str) -> Option<&'static str> {
    let trimmed = description.trim();
    if trimmed.is_empty() {
        return Some(MSG_DESCRIPTION_REQUIRED);
    }
    if trimmed.chars().count() > DESCRIPTION_MAX_CHARS {
        return Some(MSG_DESCRIPTION_TOO_LONG);
    }
    None
}

/// Runs every field's rules, mapping the form state to field errors.
#[must_use]
pub fn validate_all(file: Option<&FileMeta>, title: &str, description: &str) -> FieldErrors {
    let mut errors = FieldErrors::default();
    errors.set(Field::Image, validate_image(file));
    errors.set(Field::Title, validate_title(title));
    errors.set(Field::Description, validate_description(description));
    errors
}
