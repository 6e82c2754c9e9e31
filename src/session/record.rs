// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Scan record and session types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Sentinel for any attribute the model did not report
pub const UNKNOWN: &str = "N/A";

/// Timestamp format used on scan records
pub const SCAN_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

fn unknown() -> String {
    UNKNOWN.to_string()
}

/// Attributes read off a hardware label
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HardwareInfo {
    #[serde(default = "unknown")]
    pub brand: String,
    #[serde(default = "unknown")]
    pub capacity: String,
    #[serde(default = "unknown")]
    pub generation: String,
    #[serde(default = "unknown")]
    pub speed: String,
    #[serde(default = "unknown")]
    pub form_factor: String,
}

impl Default for HardwareInfo {
    fn default() -> Self {
        Self {
            brand: unknown(),
            capacity: unknown(),
            generation: unknown(),
            speed: unknown(),
            form_factor: unknown(),
        }
    }
}

/// One extraction result stored in a session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanRecord {
    #[serde(flatten)]
    pub info: HardwareInfo,
    pub timestamp: String,
}

impl ScanRecord {
    pub fn new(info: HardwareInfo, scanned_at: DateTime<Local>) -> Self {
        Self {
            info,
            timestamp: scanned_at.format(SCAN_TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Record stamped with the current local time
    pub fn now(info: HardwareInfo) -> Self {
        Self::new(info, Local::now())
    }
}

/// Session held in memory
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: String,
    pub started_at: DateTime<Local>,
    pub items: Vec<ScanRecord>,
}

impl Session {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            started_at: Local::now(),
            items: Vec::new(),
        }
    }

    pub fn scan_count(&self) -> usize {
        self.items.len()
    }
}
