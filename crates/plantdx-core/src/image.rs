//! Image input handling

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{Error, Result};

/// An image ready to be sent to a vision model
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageInput {
    /// Display label, usually the file name
    pub label: String,
    pub mime_type: String,
    /// `data:` URL carrying the base64 encoded image
    pub data_url: String,
}

impl ImageInput {
    /// Read an image from disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mime_type = mime_type_for(path).ok_or_else(|| {
            Error::InvalidInput(format!("{} is not a supported image file", path.display()))
        })?;

        let bytes = std::fs::read(path)?;
        let label = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());

        Self::from_bytes(label, &bytes, mime_type)
    }

    /// Wrap in-memory image bytes
    pub fn from_bytes(label: impl Into<String>, bytes: &[u8], mime_type: &str) -> Result<Self> {
        if !mime_type.starts_with("image/") {
            return Err(Error::InvalidInput(format!("{} is not an image type", mime_type)));
        }
        if bytes.is_empty() {
            return Err(Error::InvalidInput("image is empty".to_string()));
        }

        Ok(Self {
            label: label.into(),
            mime_type: mime_type.to_string(),
            data_url: format!("data:{};base64,{}", mime_type, STANDARD.encode(bytes)),
        })
    }
}

/// MIME type inferred from the file extension
pub fn mime_type_for(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_lowercase();
    let mime = match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "webp" => "image/webp",
        "gif" => "image/gif",
        "bmp" => "image/bmp",
        "heic" => "image/heic",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_data_url_encoding() {
        let image = ImageInput::from_bytes("leaf.png", b"abc", "image/png").unwrap();
        assert_eq!(image.data_url, "data:image/png;base64,YWJj");
        assert_eq!(image.label, "leaf.png");
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(matches!(
            ImageInput::from_bytes("notes.txt", b"abc", "text/plain"),
            Err(Error::InvalidInput(_))
        ));
        assert!(matches!(
            ImageInput::from_bytes("empty.png", b"", "image/png"),
            Err(Error::InvalidInput(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::Builder::new().suffix(".JPG").tempfile().unwrap();
        file.write_all(&[0xff, 0xd8, 0xff]).unwrap();

        let image = ImageInput::from_path(file.path()).unwrap();
        assert_eq!(image.mime_type, "image/jpeg");
        assert!(image.data_url.starts_with("data:image/jpeg;base64,"));

        let text = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
        assert!(ImageInput::from_path(text.path()).is_err());
    }
}
