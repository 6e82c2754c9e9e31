// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod errors;
pub mod export;
pub mod http_server;
pub mod process_image;
pub mod sessions;

pub use errors::{ApiError, ErrorResponse};
pub use export::export_session_handler;
pub use http_server::{create_app, health_handler, start_server, AppState, HealthResponse};
pub use process_image::{
    process_image_handler, upload_image_handler, ProcessImageRequest, ProcessResponse,
};
pub use sessions::{
    end_session_handler, get_session_handler, start_session_handler, EndSessionResponse,
    SessionResponse, StartSessionRequest, StartSessionResponse,
};
