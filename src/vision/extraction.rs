// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hardware label extraction prompt and model output parsing

use serde_json::{Map, Value};

use super::errors::VisionError;
use crate::session::{HardwareInfo, UNKNOWN};

/// Fixed prompt sent with every label photo
pub const EXTRACTION_PROMPT: &str = "Extract the following information from this hardware label in JSON format:
- form_factor (Laptop or Desktop)
- capacity (e.g., 8GB, 16GB, 256GB)
- generation (DDR3, DDR4, DDR5)
- brand
- speed (bus speed in MHz, e.g., 2133, 2400, 2666, 3200)
If any field is missing, set it to \"N/A\". Return ONLY the JSON object.";

/// Fields read from the model's JSON object
pub const EXTRACTED_FIELDS: &[&str] = &["brand", "capacity", "generation", "speed", "form_factor"];

impl HardwareInfo {
    /// Parse the message content returned by the vision model.
    ///
    /// Returns the normalised attributes and the raw JSON object.
    pub fn from_model_output(content: &str) -> Result<(Self, Value), VisionError> {
        let body = strip_code_fence(content);
        if body.is_empty() {
            return Err(VisionError::EmptyResponse);
        }

        let value: Value = serde_json::from_str(body)
            .map_err(|e| VisionError::MalformedResponse(format!("invalid JSON: {}", e)))?;

        let object = value.as_object().ok_or_else(|| {
            VisionError::MalformedResponse("expected a JSON object".to_string())
        })?;

        let info = Self {
            brand: field(object, "brand"),
            capacity: field(object, "capacity"),
            generation: field(object, "generation"),
            speed: field(object, "speed"),
            form_factor: field(object, "form_factor"),
        };

        Ok((info, value))
    }
}

/// Read one attribute, falling back to the sentinel
fn field(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(s)) if !s.trim().is_empty() => s.trim().to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => UNKNOWN.to_string(),
    }
}

/// Remove a surrounding Markdown code fence (```json ... ```)
fn strip_code_fence(content: &str) -> &str {
    let trimmed = content.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.trim_start_matches(|c: char| c.is_ascii_alphanumeric());
    rest.strip_suffix("```").unwrap_or(rest).trim()
}
