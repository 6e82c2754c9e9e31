// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use super::export::export_session_handler;
use super::process_image::{process_image_handler, upload_image_handler};
use super::sessions::{end_session_handler, get_session_handler, start_session_handler};
use crate::config::ScannerConfig;
use crate::session::{SessionStore, SessionStoreConfig};
use crate::version::{get_version_info, SERVICE_NAME, VERSION_NUMBER};
use crate::vision::HardwareExtractor;

/// Shared state for every handler
#[derive(Clone)]
pub struct AppState {
    pub session_store: Arc<SessionStore>,
    pub extractor: Arc<RwLock<Option<Arc<dyn HardwareExtractor>>>>,
    pub config: Arc<ScannerConfig>,
}

impl AppState {
    pub fn new(config: ScannerConfig) -> Self {
        let session_store = SessionStore::new(SessionStoreConfig {
            max_sessions: config.max_sessions,
        });

        Self {
            session_store: Arc::new(session_store),
            extractor: Arc::new(RwLock::new(None)),
            config: Arc::new(config),
        }
    }

    pub fn new_for_test() -> Self {
        Self::new(ScannerConfig::default())
    }

    pub async fn set_extractor(&self, extractor: Arc<dyn HardwareExtractor>) {
        *self.extractor.write().await = Some(extractor);
    }

    pub async fn get_extractor(&self) -> Option<Arc<dyn HardwareExtractor>> {
        self.extractor.read().await.clone()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub vision_configured: bool,
    pub active_sessions: usize,
    pub total_scans: usize,
}

/// Build the service router
pub fn create_app(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes;

    Router::new()
        .route("/", get(health_handler))
        .route("/health", get(health_handler))
        .route("/version", get(version_handler))
        .route("/api/start-session", post(start_session_handler))
        .route("/api/process-image", post(process_image_handler))
        .route("/api/upload-image", post(upload_image_handler))
        .route(
            "/api/session/:session_id",
            get(get_session_handler).delete(end_session_handler),
        )
        .route("/api/export/:session_id", get(export_session_handler))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until Ctrl+C
pub async fn start_server(state: AppState) -> Result<()> {
    let addr: SocketAddr = state.config.listen_addr.parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    let app = create_app(state);

    info!("API server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Shutdown signal received");
        })
        .await?;

    Ok(())
}

/// GET / - Liveness check
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let metrics = state.session_store.get_store_metrics().await;

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: SERVICE_NAME.to_string(),
        version: VERSION_NUMBER.to_string(),
        vision_configured: state.get_extractor().await.is_some(),
        active_sessions: metrics.total_sessions,
        total_scans: metrics.total_scans,
    })
}

/// GET /version
pub async fn version_handler() -> Json<serde_json::Value> {
    Json(get_version_info())
}
