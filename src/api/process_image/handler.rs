// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Label scanning handlers

use axum::{extract::State, Json};
use axum_extra::extract::Multipart;
use tracing::{debug, info, warn};

use super::request::ProcessImageRequest;
use super::response::ProcessResponse;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::session::{validate_session_id, ScanRecord, SessionError};
use crate::vision::{ImageError, LabelImage, VisionError};

/// POST /api/process-image - Extract hardware attributes from a label photo
///
/// # Request
/// - `session_id`: Session to append to (created if unknown)
/// - `image_base64`: Base64-encoded JPEG, PNG, WebP or GIF
///
/// # Response
/// - `success`: Whether the scan produced a record
/// - `data`: The stored scan record (brand, capacity, generation, speed, form_factor, timestamp)
/// - `error`: Failure message when `success` is false
/// - `scan_count`: Number of scans in the session
///
/// # Errors
/// - 400 Bad Request: Missing or oversized session id
/// - 503 Service Unavailable: Session capacity reached
pub async fn process_image_handler(
    State(state): State<AppState>,
    Json(request): Json<ProcessImageRequest>,
) -> Result<Json<ProcessResponse>, ApiError> {
    request.validate()?;

    let image = LabelImage::from_base64(&request.image_base64, state.config.max_image_bytes);
    let response = process_label(&state, &request.session_id, image).await?;

    Ok(Json(response))
}

/// POST /api/upload-image - Multipart variant of process-image
///
/// Expects a `session_id` text field and an `image` file field.
pub async fn upload_image_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut session_id: Option<String> = None;
    let mut image_bytes: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::InvalidRequest(format!("invalid multipart body: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "session_id" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| ApiError::InvalidRequest(format!("unreadable session_id: {}", e)))?;
                session_id = Some(text);
            }
            "image" => {
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| ApiError::InvalidRequest(format!("unreadable image: {}", e)))?;
                image_bytes = Some(bytes.to_vec());
            }
            other => debug!("Ignoring multipart field '{}'", other),
        }
    }

    let session_id = session_id.ok_or_else(|| ApiError::ValidationError {
        field: "session_id".to_string(),
        message: "session_id is required".to_string(),
    })?;
    validate_session_id(&session_id)?;

    let image_bytes = image_bytes.ok_or_else(|| ApiError::ValidationError {
        field: "image".to_string(),
        message: "image file is required".to_string(),
    })?;

    let image = LabelImage::from_bytes(image_bytes, state.config.max_image_bytes);
    let response = process_label(&state, &session_id, image).await?;

    Ok(Json(response))
}

/// Run one scan against a session.
///
/// The session is opened before extraction, so a failed scan still leaves it
/// in place. The vision call runs without holding the session lock, and the
/// record is only stored if the session is still live afterwards.
async fn process_label(
    state: &AppState,
    session_id: &str,
    image: Result<LabelImage, ImageError>,
) -> Result<ProcessResponse, ApiError> {
    let (session, _) = state
        .session_store
        .create_session(Some(session_id.to_string()))
        .await?;
    let current_count = session.scan_count();

    let image = match image {
        Ok(image) => image,
        Err(e) => {
            warn!("Rejected image for session {}: {}", session_id, e);
            return Ok(ProcessResponse::failure(
                VisionError::from(e).to_string(),
                current_count,
            ));
        }
    };

    let Some(extractor) = state.get_extractor().await else {
        warn!("Vision extractor not configured");
        return Ok(ProcessResponse::failure(
            VisionError::MissingApiKey.to_string(),
            current_count,
        ));
    };

    match extractor.extract(&image).await {
        Ok(extraction) => {
            let record = ScanRecord::now(extraction.info);
            let scan_count = match state
                .session_store
                .append_existing(session_id, record.clone())
                .await
            {
                Ok(count) => count,
                Err(SessionError::NotFound(_)) => {
                    warn!("Session {} ended during extraction, scan dropped", session_id);
                    return Ok(ProcessResponse::failure(
                        "Session ended before the scan completed",
                        0,
                    ));
                }
                Err(e) => return Err(e.into()),
            };

            info!(
                "Session {}: scan #{} stored ({}ms)",
                session_id, scan_count, extraction.processing_time_ms
            );

            Ok(ProcessResponse::success(
                record,
                scan_count,
                &extraction.model,
                extraction.processing_time_ms,
            ))
        }
        Err(e) => {
            warn!("Extraction failed for session {}: {}", session_id, e);
            Ok(ProcessResponse::failure(e.to_string(), current_count))
        }
    }
}
