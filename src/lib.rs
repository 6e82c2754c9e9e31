// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod config;
pub mod export;
pub mod session;
pub mod version;
pub mod vision;

pub use api::{create_app, start_server, ApiError, AppState};
pub use config::{ScannerConfig, VisionConfig};
pub use session::{HardwareInfo, ScanRecord, Session, SessionStore};
pub use vision::{HardwareExtractor, LabelImage, VisionClient, VisionError};
