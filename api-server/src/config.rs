//! Configuration module

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use fitlens_core::EvaluatorConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,

    /// CSV file candidates are read from on every request
    pub candidates_csv: PathBuf,

    /// Upper bound on one whole batch request
    pub request_deadline_secs: u64,

    /// Environment (development, production)
    pub environment: String,

    /// "json" for structured log lines
    pub log_format: String,

    /// Oracle and explainer settings
    pub evaluator: EvaluatorConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8000),

            candidates_csv: env::var("CANDIDATES_CSV")
                .unwrap_or_else(|_| "candidates_small.csv".to_string())
                .into(),

            request_deadline_secs: env::var("REQUEST_DEADLINE_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(1800),

            environment: env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),

            log_format: env::var("LOG_FORMAT")
                .unwrap_or_else(|_| "text".to_string()),

            evaluator: EvaluatorConfig::from_env(),
        }
    }

    pub fn request_deadline(&self) -> Duration {
        Duration::from_secs(self.request_deadline_secs)
    }

    /// Check if running in production
    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn json_logs(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
