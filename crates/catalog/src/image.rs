//! Image input boundary: raw upload bytes to an inline `data:` URI.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;

use printshop_core::{DomainError, DomainResult};

/// Advertised upload limit. Advisory only: larger files are still accepted.
pub const UPLOAD_SIZE_GUIDANCE_BYTES: usize = 10 * 1024 * 1024;

/// An image file picked or dropped by the visitor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageUpload {
    pub mime: String,
    pub bytes: Vec<u8>,
}

impl ImageUpload {
    pub fn new(mime: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            mime: mime.into(),
            bytes,
        }
    }

    pub fn is_image(&self) -> bool {
        is_image_mime(&self.mime)
    }

    /// Encode as `data:<mime>;base64,<payload>`.
    pub fn into_data_uri(self) -> DomainResult<String> {
        if !self.is_image() {
            return Err(DomainError::validation(format!(
                "'{}' is not an image type",
                self.mime
            )));
        }
        if self.bytes.len() > UPLOAD_SIZE_GUIDANCE_BYTES {
            tracing::warn!(
                bytes = self.bytes.len(),
                guidance = UPLOAD_SIZE_GUIDANCE_BYTES,
                "image upload exceeds size guidance"
            );
        }
        let mime = self.mime.trim().to_ascii_lowercase();
        Ok(format!("data:{mime};base64,{}", STANDARD.encode(&self.bytes)))
    }
}

/// True for `image/*` MIME types.
pub fn is_image_mime(mime: &str) -> bool {
    mime.trim()
        .to_ascii_lowercase()
        .strip_prefix("image/")
        .is_some_and(|subtype| !subtype.is_empty())
}

/// True when an image reference carries its bytes inline.
pub fn is_inline_image(image: &str) -> bool {
    image.starts_with("data:image/")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encodes_png_bytes() {
        let upload = ImageUpload::new("image/png", vec![0x89, b'P', b'N', b'G']);
        let uri = upload.into_data_uri().unwrap();
        assert_eq!(uri, "data:image/png;base64,iVBORw==");
        assert!(is_inline_image(&uri));
    }

    #[test]
    fn rejects_non_image_types() {
        let upload = ImageUpload::new("application/pdf", vec![1, 2, 3]);
        assert!(matches!(upload.into_data_uri(), Err(DomainError::Validation(_))));
        assert!(!is_image_mime("image/"));
        assert!(is_image_mime("IMAGE/JPEG"));
    }

    #[test]
    fn oversized_upload_is_still_encoded() {
        let upload = ImageUpload::new("image/gif", vec![0; UPLOAD_SIZE_GUIDANCE_BYTES + 1]);
        assert!(upload.into_data_uri().is_ok());
    }

    #[test]
    fn remote_urls_are_not_inline() {
        assert!(!is_inline_image("/images/prints/1.jpg"));
    }
}
