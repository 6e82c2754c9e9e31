// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;
use tokio::sync::RwLock;
use tracing::{debug, info};

use super::record::{ScanRecord, Session};

/// Longest accepted session identifier
pub const MAX_SESSION_ID_LEN: usize = 128;

/// Format of generated session identifiers
pub const SESSION_ID_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("Session not found: {0}")]
    NotFound(String),

    #[error("Maximum number of sessions reached ({0})")]
    CapacityReached(usize),

    #[error("Invalid session id: {0}")]
    InvalidId(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionStoreConfig {
    pub max_sessions: usize,
}

impl Default for SessionStoreConfig {
    fn default() -> Self {
        Self { max_sessions: 1000 }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreMetrics {
    pub total_sessions: usize,
    pub total_scans: usize,
}

/// Generate a session id from the current local time
pub fn generate_session_id() -> String {
    Local::now().format(SESSION_ID_FORMAT).to_string()
}

pub fn validate_session_id(session_id: &str) -> Result<(), SessionError> {
    if session_id.trim().is_empty() {
        return Err(SessionError::InvalidId("session_id is required".to_string()));
    }
    if session_id.chars().count() > MAX_SESSION_ID_LEN {
        return Err(SessionError::InvalidId(format!(
            "session_id exceeds {} characters",
            MAX_SESSION_ID_LEN
        )));
    }
    Ok(())
}

/// In-memory session map
pub struct SessionStore {
    config: SessionStoreConfig,
    sessions: RwLock<HashMap<String, Session>>,
}

impl SessionStore {
    pub fn new(config: SessionStoreConfig) -> Self {
        Self {
            config,
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Create a session, or return the existing one unchanged.
    ///
    /// Returns the session snapshot and whether it was newly created.
    pub async fn create_session(
        &self,
        session_id: Option<String>,
    ) -> Result<(Session, bool), SessionError> {
        let session_id = session_id.unwrap_or_else(generate_session_id);
        validate_session_id(&session_id)?;

        let mut sessions = self.sessions.write().await;
        if let Some(existing) = sessions.get(&session_id) {
            debug!("Session {} already exists, reusing", session_id);
            return Ok((existing.clone(), false));
        }

        if sessions.len() >= self.config.max_sessions {
            return Err(SessionError::CapacityReached(self.config.max_sessions));
        }

        let session = Session::new(session_id.clone());
        sessions.insert(session_id.clone(), session.clone());
        info!("Session started: {}", session_id);

        Ok((session, true))
    }

    pub async fn get_session(&self, session_id: &str) -> Option<Session> {
        let sessions = self.sessions.read().await;
        sessions.get(session_id).cloned()
    }

    pub async fn session_exists(&self, session_id: &str) -> bool {
        let sessions = self.sessions.read().await;
        sessions.contains_key(session_id)
    }

    /// Append a record, creating the session first if needed.
    ///
    /// Returns the session's scan count after the append.
    pub async fn append_record(
        &self,
        session_id: &str,
        record: ScanRecord,
    ) -> Result<usize, SessionError> {
        validate_session_id(session_id)?;

        let mut sessions = self.sessions.write().await;
        if !sessions.contains_key(session_id) {
            if sessions.len() >= self.config.max_sessions {
                return Err(SessionError::CapacityReached(self.config.max_sessions));
            }
            info!("Session {} not found, creating on first scan", session_id);
            sessions.insert(session_id.to_string(), Session::new(session_id));
        }

        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        session.items.push(record);

        Ok(session.scan_count())
    }

    /// Append a record only if the session is still live.
    ///
    /// Used after a scan that opened the session up front, so a session ended
    /// mid-scan stays ended.
    pub async fn append_existing(
        &self,
        session_id: &str,
        record: ScanRecord,
    ) -> Result<usize, SessionError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.to_string()))?;
        session.items.push(record);

        Ok(session.scan_count())
    }

    /// Remove a session. Returns whether it existed.
    pub async fn end_session(&self, session_id: &str) -> bool {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(session_id).is_some();
        if removed {
            info!("Session ended: {}", session_id);
        }
        removed
    }

    pub async fn session_count(&self) -> usize {
        let sessions = self.sessions.read().await;
        sessions.len()
    }

    pub async fn get_store_metrics(&self) -> StoreMetrics {
        let sessions = self.sessions.read().await;
        StoreMetrics {
            total_sessions: sessions.len(),
            total_scans: sessions.values().map(|s| s.scan_count()).sum(),
        }
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionStoreConfig::default())
    }
}
