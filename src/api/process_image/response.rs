// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Process image response types

use serde::{Deserialize, Serialize};

use crate::session::ScanRecord;

/// Outcome of one scan. Extraction failures are reported here with
/// `success: false` rather than as HTTP errors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub success: bool,
    pub data: Option<ScanRecord>,
    pub error: Option<String>,
    pub scan_count: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub processing_time_ms: Option<u64>,
}

impl ProcessResponse {
    pub fn success(
        record: ScanRecord,
        scan_count: usize,
        model: &str,
        processing_time_ms: u64,
    ) -> Self {
        Self {
            success: true,
            data: Some(record),
            error: None,
            scan_count,
            model: Some(model.to_string()),
            processing_time_ms: Some(processing_time_ms),
        }
    }

    pub fn failure(error: impl Into<String>, scan_count: usize) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
            scan_count,
            model: None,
            processing_time_ms: None,
        }
    }
}
