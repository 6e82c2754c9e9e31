// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session response types

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::session::{ScanRecord, Session};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartSessionResponse {
    pub session_id: String,
    pub message: String,
    pub started_at: DateTime<Local>,
    /// False when the session already existed
    pub created: bool,
}

impl StartSessionResponse {
    pub fn new(session: &Session, created: bool) -> Self {
        Self {
            session_id: session.session_id.clone(),
            message: "Session started".to_string(),
            started_at: session.started_at,
            created,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub session_id: String,
    pub items: Vec<ScanRecord>,
    pub scan_count: usize,
    pub started_at: DateTime<Local>,
}

impl From<Session> for SessionResponse {
    fn from(session: Session) -> Self {
        Self {
            scan_count: session.scan_count(),
            session_id: session.session_id,
            items: session.items,
            started_at: session.started_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndSessionResponse {
    pub message: String,
    pub session_id: String,
}

impl EndSessionResponse {
    pub fn new(session_id: impl Into<String>) -> Self {
        Self {
            message: "Session ended".to_string(),
            session_id: session_id.into(),
        }
    }
}
