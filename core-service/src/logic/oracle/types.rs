//! Oracle Types

use serde::{Deserialize, Serialize};

/// Generate request body (Ollama wire format)
#[derive(Debug, Serialize)]
pub struct GenerateRequest<'a> {
    pub model: &'a str,
    pub prompt: &'a str,
    pub stream: bool,
}

/// Generate response body; only the text is used
#[derive(Debug, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// Oracle call failures
///
/// Terminal for the call that produced them; callers substitute a default.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum OracleError {
    #[error("oracle transport error: {0}")]
    Transport(String),

    #[error("oracle returned status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("oracle call timed out")]
    Timeout,

    #[error("oracle reply could not be decoded: {0}")]
    Decode(String),
}

impl OracleError {
    /// HTTP status, when the oracle answered at all
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Status { status, .. } => Some(*status),
            _ => None,
        }
    }
}
