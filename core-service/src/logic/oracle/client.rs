//! Oracle HTTP Client
//!
//! Talks to an Ollama-compatible `/api/generate` endpoint.
//! One request per call, no retry.

use async_trait::async_trait;

use super::types::{GenerateRequest, GenerateResponse, OracleError};
use super::Oracle;
use crate::logic::config::OracleConfig;

/// HTTP oracle client
pub struct OllamaClient {
    config: OracleConfig,
    http_client: reqwest::Client,
}

impl OllamaClient {
    /// Create new oracle client
    pub fn new(config: OracleConfig) -> Result<Self, OracleError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| OracleError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self { config, http_client })
    }

    pub fn url(&self) -> &str {
        &self.config.url
    }

    pub fn default_model(&self) -> &str {
        &self.config.default_model
    }
}

#[async_trait]
impl Oracle for OllamaClient {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, OracleError> {
        let request = GenerateRequest {
            model,
            prompt,
            stream: false,
        };

        log::debug!("Oracle request: model={}, prompt_chars={}", model, prompt.len());

        let response = self.http_client
            .post(&self.config.url)
            .json(&request)
            .send()
            .await
            .map_err(map_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            log::warn!("Oracle call failed ({}): {}", status.as_u16(), body);
            return Err(OracleError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let reply: GenerateResponse = response.json().await.map_err(|e| {
            if e.is_timeout() {
                OracleError::Timeout
            } else {
                OracleError::Decode(e.to_string())
            }
        })?;

        Ok(reply.response)
    }
}

fn map_transport_error(e: reqwest::Error) -> OracleError {
    if e.is_timeout() {
        OracleError::Timeout
    } else {
        OracleError::Transport(e.to_string())
    }
}
