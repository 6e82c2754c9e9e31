// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Vision extraction for hardware labels
//!
//! This module provides:
//! - Label image validation (PNG, JPEG, WebP, GIF)
//! - The fixed extraction prompt and model output parsing
//! - A client for hosted OpenAI-compatible multimodal endpoints

pub mod errors;
pub mod extraction;
pub mod image_utils;
pub mod vlm_client;

pub use errors::VisionError;
pub use extraction::{EXTRACTED_FIELDS, EXTRACTION_PROMPT};
pub use image_utils::{detect_format, ImageError, ImageInfo, LabelImage, MAX_IMAGE_SIZE};
pub use vlm_client::{Extraction, HardwareExtractor, VisionClient};
