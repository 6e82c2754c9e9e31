// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the Hardware Inventory Scanner

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Service name reported by the health endpoint
pub const SERVICE_NAME: &str = "Hardware Inventory Scanner API";

/// Supported features in this version
pub const FEATURES: &[&str] = &[
    "vision-extraction",
    "in-memory-sessions",
    "idempotent-session-start",
    "multipart-upload",
    "xlsx-export",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Hardware Inventory Scanner {}", VERSION_NUMBER)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "version": VERSION_NUMBER,
        "service": SERVICE_NAME,
        "features": FEATURES,
    })
}
