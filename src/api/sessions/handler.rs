// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session lifecycle handlers

use axum::{
    body::Bytes,
    extract::{Path, State},
    Json,
};
use tracing::debug;

use super::request::StartSessionRequest;
use super::response::{EndSessionResponse, SessionResponse, StartSessionResponse};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;

/// POST /api/start-session - Start (or resume) a scanning session
///
/// The body is optional. Starting a session whose id already exists returns
/// the existing session untouched with `created: false`.
pub async fn start_session_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<StartSessionResponse>, ApiError> {
    let request = StartSessionRequest::from_body(&body)?;
    request.validate()?;

    let (session, created) = state
        .session_store
        .create_session(request.session_id)
        .await?;

    Ok(Json(StartSessionResponse::new(&session, created)))
}

/// GET /api/session/:session_id - Accumulated scans for a session
pub async fn get_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<SessionResponse>, ApiError> {
    let session = state
        .session_store
        .get_session(&session_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    Ok(Json(SessionResponse::from(session)))
}

/// DELETE /api/session/:session_id - End a session
///
/// Succeeds whether or not the session existed.
pub async fn end_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<EndSessionResponse> {
    if !state.session_store.end_session(&session_id).await {
        debug!("End requested for unknown session {}", session_id);
    }
    Json(EndSessionResponse::new(session_id))
}
