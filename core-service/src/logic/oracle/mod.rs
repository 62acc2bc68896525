//! Oracle Module
//!
//! The external text-generation service: one prompt in, one reply out.
//!
//! ## Structure
//! - `types`: wire types and `OracleError`
//! - `client`: HTTP client for Ollama-compatible endpoints

pub mod types;
pub mod client;

#[cfg(test)]
pub mod mock;

use async_trait::async_trait;

pub use types::OracleError;
pub use client::OllamaClient;

/// Prompt string -> reply string
#[async_trait]
pub trait Oracle: Send + Sync {
    async fn generate(&self, prompt: &str, model: &str) -> Result<String, OracleError>;
}
