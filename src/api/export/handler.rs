// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session export handler

use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;

use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::export::{export_filename, render_workbook, XLSX_CONTENT_TYPE};

/// GET /api/export/:session_id - Download a session as an .xlsx workbook
///
/// # Errors
/// - 404 Not Found: Unknown session
/// - 400 Bad Request: Session has no scans
pub async fn export_session_handler(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Response, ApiError> {
    let session = state
        .session_store
        .get_session(&session_id)
        .await
        .ok_or_else(|| ApiError::NotFound("Session not found".to_string()))?;

    let row_count = session.scan_count();
    let rendered = tokio::task::spawn_blocking(move || render_workbook(&session.items))
        .await
        .map_err(|e| ApiError::InternalError(format!("export task failed: {}", e)))?;
    let bytes = rendered?;

    info!(
        "Exported session {} ({} rows, {} bytes)",
        session_id,
        row_count,
        bytes.len()
    );

    let disposition = format!("attachment; filename={}", export_filename(&session_id));

    Ok((
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}
