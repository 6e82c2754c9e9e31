// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label image loading and validation
//!
//! Images are decoded once before upload so corrupted payloads are rejected
//! locally instead of costing a vision API call.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use image::ImageFormat;
use thiserror::Error;

/// Default maximum decoded image size (10MB)
pub const MAX_IMAGE_SIZE: usize = 10 * 1024 * 1024;

/// Custom error types for image processing
#[derive(Debug, Error)]
pub enum ImageError {
    #[error("Image data is too large: {0} bytes (max: {1} bytes)")]
    TooLarge(usize, usize),

    #[error("Invalid base64 encoding: {0}")]
    InvalidBase64(#[from] base64::DecodeError),

    #[error("Unsupported image format (expected PNG, JPEG, WebP or GIF)")]
    UnsupportedFormat,

    #[error("Failed to decode image: {0}")]
    DecodeFailed(String),

    #[error("Image data is empty")]
    EmptyData,
}

/// Image information extracted during loading
#[derive(Debug, Clone)]
pub struct ImageInfo {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Detected format
    pub format: ImageFormat,
    /// Size in bytes
    pub size_bytes: usize,
}

/// A validated label photo ready to send to the vision model
#[derive(Debug, Clone)]
pub struct LabelImage {
    bytes: Vec<u8>,
    info: ImageInfo,
}

impl LabelImage {
    /// Decode a base64 payload, with or without a `data:image/...;base64,` prefix
    pub fn from_base64(input: &str, max_bytes: usize) -> Result<Self, ImageError> {
        let payload = strip_data_url_prefix(input.trim());
        if payload.is_empty() {
            return Err(ImageError::EmptyData);
        }

        let bytes = if payload.chars().any(char::is_whitespace) {
            let compact: String = payload.chars().filter(|c| !c.is_whitespace()).collect();
            STANDARD.decode(compact)?
        } else {
            STANDARD.decode(payload)?
        };

        Self::from_bytes(bytes, max_bytes)
    }

    /// Validate raw image bytes (multipart uploads, local files)
    pub fn from_bytes(bytes: Vec<u8>, max_bytes: usize) -> Result<Self, ImageError> {
        if bytes.is_empty() {
            return Err(ImageError::EmptyData);
        }

        if bytes.len() > max_bytes {
            return Err(ImageError::TooLarge(bytes.len(), max_bytes));
        }

        // Detect format from magic bytes
        let format = detect_format(&bytes)?;

        let img = image::load_from_memory_with_format(&bytes, format)
            .map_err(|e| ImageError::DecodeFailed(e.to_string()))?;

        let info = ImageInfo {
            width: img.width(),
            height: img.height(),
            format,
            size_bytes: bytes.len(),
        };

        Ok(Self { bytes, info })
    }

    pub fn info(&self) -> &ImageInfo {
        &self.info
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn mime_type(&self) -> &'static str {
        format_to_mime(self.info.format)
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    /// `data:` URL for OpenAI-style `image_url` content parts
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.to_base64())
    }
}

/// Strip a `data:<mime>;base64,` prefix if present
pub fn strip_data_url_prefix(input: &str) -> &str {
    if input.starts_with("data:") {
        if let Some((_, payload)) = input.split_once(";base64,") {
            return payload;
        }
    }
    input
}

/// Detect image format from magic bytes
///
/// Only formats the hosted vision models accept are recognised.
pub fn detect_format(bytes: &[u8]) -> Result<ImageFormat, ImageError> {
    if bytes.len() < 4 {
        return Err(ImageError::UnsupportedFormat);
    }

    match bytes {
        // PNG: 89 50 4E 47 (0x89 P N G)
        [0x89, 0x50, 0x4E, 0x47, ..] => Ok(ImageFormat::Png),

        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Ok(ImageFormat::Jpeg),

        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Ok(ImageFormat::WebP),

        // GIF: GIF87a or GIF89a
        [0x47, 0x49, 0x46, 0x38, x, ..] if *x == 0x37 || *x == 0x39 => Ok(ImageFormat::Gif),

        _ => Err(ImageError::UnsupportedFormat),
    }
}

/// MIME type for a supported format
pub fn format_to_mime(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "image/png",
        ImageFormat::WebP => "image/webp",
        ImageFormat::Gif => "image/gif",
        _ => "image/jpeg",
    }
}
