//! Evaluator configuration
//!
//! Runtime knobs for the oracle client and the local surrogate explainer.
//! Defaults live in `crate::constants`.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::constants;

/// Oracle client configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OracleConfig {
    /// Full URL of the generate endpoint
    pub url: String,

    /// Model used when a request does not name one
    pub default_model: String,

    /// Per-call HTTP timeout
    pub timeout_secs: u64,
}

impl Default for OracleConfig {
    fn default() -> Self {
        Self {
            url: constants::DEFAULT_ORACLE_URL.to_string(),
            default_model: constants::DEFAULT_MODEL.to_string(),
            timeout_secs: constants::DEFAULT_ORACLE_TIMEOUT_SECS,
        }
    }
}

impl OracleConfig {
    pub fn from_env() -> Self {
        Self {
            url: constants::get_oracle_url(),
            default_model: constants::get_default_model(),
            timeout_secs: constants::get_oracle_timeout_secs(),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Local surrogate explainer configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExplainConfig {
    /// Run the surrogate in advanced evaluations
    pub enabled: bool,

    /// Top-K features reported
    pub num_features: usize,

    /// Perturbation rows, the unperturbed instance included
    pub num_samples: usize,

    /// Locality kernel width (applied to cosine distance x100)
    pub kernel_width: f64,

    /// Ridge penalty of the final surrogate fit
    pub ridge_alpha: f64,

    /// Probability substituted for unreadable or failed score replies
    pub neutral_probability: f64,

    /// Fixed seed for reproducible perturbations
    pub seed: Option<u64>,

    /// Concurrent scoring queries (1 = sequential)
    pub max_concurrency: usize,

    /// Upper bound on the whole explanation stage
    pub deadline_secs: Option<u64>,
}

impl Default for ExplainConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            num_features: constants::DEFAULT_LIME_NUM_FEATURES,
            num_samples: constants::DEFAULT_LIME_NUM_SAMPLES,
            kernel_width: 25.0,
            ridge_alpha: 1.0,
            neutral_probability: constants::DEFAULT_NEUTRAL_PROBABILITY,
            seed: None,
            max_concurrency: constants::DEFAULT_LIME_MAX_CONCURRENCY,
            deadline_secs: None,
        }
    }
}

impl ExplainConfig {
    pub fn from_env() -> Self {
        Self {
            enabled: constants::is_lime_enabled(),
            num_features: constants::get_lime_num_features(),
            num_samples: constants::get_lime_num_samples(),
            neutral_probability: constants::get_neutral_probability(),
            seed: constants::get_lime_seed(),
            max_concurrency: constants::get_lime_max_concurrency(),
            deadline_secs: constants::get_lime_deadline_secs(),
            ..Default::default()
        }
    }

    /// Deterministic configuration for tests and replays
    pub fn seeded(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Default::default()
        }
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_secs.map(Duration::from_secs)
    }
}

/// Full evaluator configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EvaluatorConfig {
    pub oracle: OracleConfig,
    pub explain: ExplainConfig,
}

impl EvaluatorConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self {
            oracle: OracleConfig::from_env(),
            explain: ExplainConfig::from_env(),
        }
    }
}
