// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process image request types and validation

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::session::validate_session_id;

/// Body of POST /api/process-image
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessImageRequest {
    pub session_id: String,
    /// Base64 image data, with or without a `data:image/...;base64,` prefix
    pub image_base64: String,
}

impl ProcessImageRequest {
    /// Only the session id is checked here; image problems are reported as
    /// unsuccessful scans
    pub fn validate(&self) -> Result<(), ApiError> {
        validate_session_id(&self.session_id)?;
        Ok(())
    }
}
