// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Session lifecycle endpoints
//!
//! Provides POST /api/start-session, GET /api/session/:id and
//! DELETE /api/session/:id.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::{end_session_handler, get_session_handler, start_session_handler};
pub use request::StartSessionRequest;
pub use response::{EndSessionResponse, SessionResponse, StartSessionResponse};
