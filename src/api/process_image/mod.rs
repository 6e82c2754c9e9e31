// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label scanning endpoints
//!
//! Provides POST /api/process-image (base64 JSON) and POST /api/upload-image
//! (multipart form).

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{process_image_handler, upload_image_handler};
pub use request::ProcessImageRequest;
pub use response::ProcessResponse;
