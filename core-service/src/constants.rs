//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.
//! Every default can be overridden through the environment.

/// Default oracle endpoint (local Ollama generate API)
pub const DEFAULT_ORACLE_URL: &str = "http://localhost:11434/api/generate";

/// Default model identifier sent to the oracle
pub const DEFAULT_MODEL: &str = "llama3.2";

/// Default oracle HTTP timeout (seconds)
pub const DEFAULT_ORACLE_TIMEOUT_SECS: u64 = 120;

/// Number of features reported by the local surrogate
pub const DEFAULT_LIME_NUM_FEATURES: usize = 4;

/// Number of perturbation samples (including the unperturbed instance)
pub const DEFAULT_LIME_NUM_SAMPLES: usize = 10;

/// Probability used when an oracle score reply cannot be read
pub const DEFAULT_NEUTRAL_PROBABILITY: f64 = 0.5;

/// Concurrent oracle queries while scoring perturbations (1 = sequential)
pub const DEFAULT_LIME_MAX_CONCURRENCY: usize = 1;

/// Characters of the job description kept in scoring prompts
pub const SCORING_JOB_DESCRIPTION_CHARS: usize = 200;

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "FitLens";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get oracle URL from environment or use default
pub fn get_oracle_url() -> String {
    std::env::var("OLLAMA_API_URL")
        .unwrap_or_else(|_| DEFAULT_ORACLE_URL.to_string())
}

/// Get default model from environment or use default
pub fn get_default_model() -> String {
    std::env::var("DEFAULT_MODEL")
        .unwrap_or_else(|_| DEFAULT_MODEL.to_string())
}

/// Get oracle timeout from environment or use default
pub fn get_oracle_timeout_secs() -> u64 {
    env_parse("ORACLE_TIMEOUT_SECS").unwrap_or(DEFAULT_ORACLE_TIMEOUT_SECS)
}

/// Get surrogate feature budget from environment or use default
pub fn get_lime_num_features() -> usize {
    env_parse("LIME_NUM_FEATURES").unwrap_or(DEFAULT_LIME_NUM_FEATURES)
}

/// Get surrogate sample budget from environment or use default
pub fn get_lime_num_samples() -> usize {
    env_parse("LIME_NUM_SAMPLES").unwrap_or(DEFAULT_LIME_NUM_SAMPLES)
}

/// Get neutral probability from environment or use default
pub fn get_neutral_probability() -> f64 {
    env_parse::<f64>("LIME_NEUTRAL_PROBABILITY")
        .filter(|p| (0.0..=1.0).contains(p))
        .unwrap_or(DEFAULT_NEUTRAL_PROBABILITY)
}

/// Get perturbation seed (unset = fresh entropy per explanation)
pub fn get_lime_seed() -> Option<u64> {
    env_parse("LIME_SEED")
}

/// Get scoring concurrency from environment or use default
pub fn get_lime_max_concurrency() -> usize {
    env_parse::<usize>("LIME_MAX_CONCURRENCY")
        .map(|n| n.max(1))
        .unwrap_or(DEFAULT_LIME_MAX_CONCURRENCY)
}

/// Get surrogate deadline (unset = no deadline)
pub fn get_lime_deadline_secs() -> Option<u64> {
    env_parse("LIME_DEADLINE_SECS")
}

/// Check if the surrogate explainer is enabled
pub fn is_lime_enabled() -> bool {
    std::env::var("LIME_ENABLED")
        .map(|s| s.to_lowercase() != "false" && s != "0")
        .unwrap_or(true)
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
}
