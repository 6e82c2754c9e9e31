// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! In-memory scanning sessions
//!
//! Sessions live only in process memory and are lost on restart.

pub mod record;
pub mod store;

pub use record::{HardwareInfo, ScanRecord, Session, SCAN_TIMESTAMP_FORMAT, UNKNOWN};
pub use store::{
    generate_session_id, validate_session_id, SessionError, SessionStore, SessionStoreConfig,
    StoreMetrics,
};
