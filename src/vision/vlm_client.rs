// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Hosted vision-model client via OpenAI-compatible API

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::errors::VisionError;
use super::extraction::EXTRACTION_PROMPT;
use super::image_utils::LabelImage;
use crate::config::VisionConfig;
use crate::session::HardwareInfo;

/// Longest provider error body kept in a `VisionError::Status`
const MAX_ERROR_BODY: usize = 500;

// --- OpenAI-compatible serde structs ---

#[derive(serde::Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(serde::Serialize)]
struct ChatMessage {
    role: String,
    content: serde_json::Value,
}

#[derive(serde::Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: String,
}

#[derive(serde::Deserialize)]
struct ChatUsage {
    total_tokens: u32,
}

#[derive(serde::Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

#[derive(serde::Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(serde::Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

// --- Result types ---

/// Result of one label extraction
#[derive(Debug, Clone)]
pub struct Extraction {
    pub info: HardwareInfo,
    /// JSON object exactly as the model returned it
    pub raw: Value,
    pub model: String,
    pub processing_time_ms: u64,
    pub tokens_used: u32,
}

/// Anything that can turn a label photo into hardware attributes
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait HardwareExtractor: Send + Sync {
    async fn extract(&self, image: &LabelImage) -> Result<Extraction, VisionError>;

    fn model_name(&self) -> &str;
}

/// Client for a hosted multimodal chat-completions endpoint
pub struct VisionClient {
    client: Client,
    endpoint: String,
    model_name: String,
    api_key: String,
    max_tokens: u32,
    temperature: f32,
}

impl VisionClient {
    /// Create a new client; fails when no API key is configured
    pub fn new(config: &VisionConfig) -> Result<Self, VisionError> {
        let api_key = config
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .ok_or(VisionError::MissingApiKey)?
            .to_string();

        let client = Client::builder().timeout(config.request_timeout()).build()?;

        let endpoint = config.endpoint.trim_end_matches('/').to_string();
        info!(
            "Vision client configured: endpoint={}, model={}",
            endpoint, config.model
        );

        Ok(Self {
            client,
            endpoint,
            model_name: config.model.clone(),
            api_key,
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Check that the provider is reachable and accepts the key
    pub async fn health_check(&self) -> bool {
        match self
            .client
            .get(format!("{}/v1/models", self.endpoint))
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                debug!("Vision health check failed: {}", e);
                false
            }
        }
    }

    fn build_request(&self, image: &LabelImage) -> ChatRequest {
        ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage {
                role: "user".to_string(),
                content: serde_json::json!([
                    {"type": "text", "text": EXTRACTION_PROMPT},
                    {"type": "image_url", "image_url": {"url": image.data_url()}}
                ]),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            response_format: ResponseFormat {
                kind: "json_object".to_string(),
            },
        }
    }
}

#[async_trait]
impl HardwareExtractor for VisionClient {
    async fn extract(&self, image: &LabelImage) -> Result<Extraction, VisionError> {
        let start = Instant::now();
        let request = self.build_request(image);

        debug!(
            "Sending {}x{} {} label ({} bytes) to {}",
            image.info().width,
            image.info().height,
            image.mime_type(),
            image.info().size_bytes,
            self.model_name
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            warn!("Vision API returned {}", status);
            return Err(VisionError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let chat_response: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| VisionError::MalformedResponse(e.to_string()))?;
        let tokens_used = chat_response.usage.map(|u| u.total_tokens).unwrap_or(0);
        let content = chat_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(VisionError::EmptyResponse)?;

        let (info, raw) = HardwareInfo::from_model_output(&content)?;
        let processing_time_ms = start.elapsed().as_millis() as u64;

        info!(
            "Label extracted in {}ms ({} tokens): brand={}, capacity={}, generation={}",
            processing_time_ms, tokens_used, info.brand, info.capacity, info.generation
        );

        Ok(Extraction {
            info,
            raw,
            model: self.model_name.clone(),
            processing_time_ms,
            tokens_used,
        })
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}
