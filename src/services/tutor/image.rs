//! Image Preprocessing
//!
//! Normalizes an uploaded image (any format the `image` crate decodes) into a
//! base64 JPEG the multimodal model accepts: decode → force RGB → JPEG → base64.

use std::io::Cursor;

use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use image::{DynamicImage, ImageFormat};

use super::error::TutorError;

/// MIME type of every preprocessed image
pub const JPEG_MEDIA_TYPE: &str = "image/jpeg";

/// A model-ready image payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub media_type: &'static str,
    /// Base64 (standard alphabet, padded) JPEG bytes
    pub data: String,
}

/// Synchronous preprocessing. CPU-bound; call through `preprocess_image` from async code.
pub fn encode_for_model(bytes: &[u8]) -> Result<EncodedImage, TutorError> {
    let decoded = image::load_from_memory(bytes)
        .map_err(|e| TutorError::ImageProcessing(e.to_string()))?;

    let rgb = match decoded {
        DynamicImage::ImageRgb8(buffer) => buffer,
        other => other.to_rgb8(),
    };

    let mut jpeg = Cursor::new(Vec::new());
    DynamicImage::ImageRgb8(rgb)
        .write_to(&mut jpeg, ImageFormat::Jpeg)
        .map_err(|e| TutorError::ImageProcessing(e.to_string()))?;

    Ok(EncodedImage {
        media_type: JPEG_MEDIA_TYPE,
        data: BASE64.encode(jpeg.into_inner()),
    })
}

/// Preprocess on the blocking pool.
pub async fn preprocess_image(bytes: Vec<u8>) -> Result<EncodedImage, TutorError> {
    tokio::task::spawn_blocking(move || encode_for_model(&bytes))
        .await
        .map_err(|e| TutorError::ImageProcessing(format!("preprocessing task failed: {}", e)))?
}
