// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use thiserror::Error;

use super::image_utils::ImageError;

/// Failures of the label extraction pipeline
#[derive(Debug, Error)]
pub enum VisionError {
    #[error("GROQ_API_KEY not configured")]
    MissingApiKey,

    #[error("Invalid image: {0}")]
    Image(#[from] ImageError),

    #[error("Vision request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Vision API returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Vision API returned no content")]
    EmptyResponse,

    #[error("Malformed vision response: {0}")]
    MalformedResponse(String),
}
