// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default OpenAI-compatible endpoint (Groq)
pub const DEFAULT_VISION_ENDPOINT: &str = "https://api.groq.com/openai";

/// Default multimodal model
pub const DEFAULT_VISION_MODEL: &str = "meta-llama/llama-4-scout-17b-16e-instruct";

/// Vision provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct VisionConfig {
    pub endpoint: String,
    pub model: String,
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
    pub request_timeout_secs: u64,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_VISION_ENDPOINT.to_string(),
            model: DEFAULT_VISION_MODEL.to_string(),
            api_key: None,
            request_timeout_secs: 60,
            max_tokens: 512,
            temperature: 0.1,
        }
    }
}

impl VisionConfig {
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

/// Scanner service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ScannerConfig {
    pub listen_addr: String,
    /// Upper bound on HTTP request bodies
    pub max_upload_bytes: usize,
    /// Upper bound on a decoded image
    pub max_image_bytes: usize,
    pub max_sessions: usize,
    pub vision: VisionConfig,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            max_upload_bytes: 16 * 1024 * 1024,
            max_image_bytes: 10 * 1024 * 1024,
            max_sessions: 1000,
            vision: VisionConfig::default(),
        }
    }
}

impl ScannerConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ScannerConfig = toml::from_str(content)?;
        Ok(config)
    }

    /// Load an optional file, then layer environment variables on top
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Apply overrides from a key lookup (environment variables in production)
    pub fn apply_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(addr) = lookup("LISTEN_ADDR") {
            self.listen_addr = addr;
        } else if let Some(port) = lookup("API_PORT").and_then(|p| p.parse::<u16>().ok()) {
            let host = self
                .listen_addr
                .rsplit_once(':')
                .map(|(host, _)| host.to_string())
                .unwrap_or_else(|| "0.0.0.0".to_string());
            self.listen_addr = format!("{}:{}", host, port);
        }

        if let Some(num) = lookup("MAX_SESSIONS").and_then(|v| v.parse().ok()) {
            self.max_sessions = num;
        }

        if let Some(num) = lookup("MAX_UPLOAD_BYTES").and_then(|v| v.parse().ok()) {
            self.max_upload_bytes = num;
        }

        if let Some(num) = lookup("MAX_IMAGE_BYTES").and_then(|v| v.parse().ok()) {
            self.max_image_bytes = num;
        }

        if let Some(key) = lookup("GROQ_API_KEY").filter(|k| !k.trim().is_empty()) {
            self.vision.api_key = Some(key);
        }

        if let Some(endpoint) = lookup("VISION_API_ENDPOINT") {
            self.vision.endpoint = endpoint;
        }

        if let Some(model) = lookup("VISION_MODEL") {
            self.vision.model = model;
        }

        if let Some(secs) = lookup("VISION_TIMEOUT_SECS").and_then(|v| v.parse().ok()) {
            self.vision.request_timeout_secs = secs;
        }
    }
}
