// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session request types

use serde::{Deserialize, Serialize};

use crate::api::errors::ApiError;
use crate::session::validate_session_id;

/// Optional body of POST /api/start-session
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StartSessionRequest {
    /// Client-chosen identifier; generated from the clock when absent
    #[serde(default)]
    pub session_id: Option<String>,
}

impl StartSessionRequest {
    /// Parse a possibly empty JSON body
    pub fn from_body(body: &[u8]) -> Result<Self, ApiError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }
        serde_json::from_slice(body)
            .map_err(|e| ApiError::InvalidRequest(format!("invalid JSON body: {}", e)))
    }

    pub fn validate(&self) -> Result<(), ApiError> {
        if let Some(ref id) = self.session_id {
            validate_session_id(id)?;
        }
        Ok(())
    }
}
