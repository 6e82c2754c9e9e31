// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod scanner;

pub use scanner::{ScannerConfig, VisionConfig, DEFAULT_VISION_ENDPOINT, DEFAULT_VISION_MODEL};
