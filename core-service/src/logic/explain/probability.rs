//! Black-box probability functions
//!
//! The surrogate only sees `texts -> [[p_negative, p_positive]]`. The oracle
//! adapter scores each text with a scoring prompt.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};

use super::types::ExplainError;
use crate::logic::oracle::Oracle;
use crate::logic::parser::extract_probability;
use crate::logic::prompt::scoring_prompt;

/// Class probabilities for a batch of texts, one row per text
#[async_trait]
pub trait ProbabilityModel: Send + Sync {
    async fn predict_proba(&self, texts: &[String]) -> Result<Vec<[f64; 2]>, ExplainError>;
}

/// Synchronous closure as a probability model
pub struct FnProbability<F>(pub F);

#[async_trait]
impl<F> ProbabilityModel for FnProbability<F>
where
    F: Fn(&[String]) -> Result<Vec<[f64; 2]>, ExplainError> + Send + Sync,
{
    async fn predict_proba(&self, texts: &[String]) -> Result<Vec<[f64; 2]>, ExplainError> {
        (self.0)(texts)
    }
}

/// Scores texts by asking the oracle for a number in [0, 1]
///
/// Oracle failures and unreadable replies both become the neutral value.
pub struct OracleProbability<'a> {
    oracle: &'a dyn Oracle,
    model: &'a str,
    job_description: &'a str,
    neutral: f64,
    max_concurrency: usize,
}

impl<'a> OracleProbability<'a> {
    pub fn new(oracle: &'a dyn Oracle, model: &'a str, job_description: &'a str, neutral: f64) -> Self {
        Self {
            oracle,
            model,
            job_description,
            neutral,
            max_concurrency: 1,
        }
    }

    /// Allow up to `n` scoring calls in flight (min 1)
    pub fn with_max_concurrency(mut self, n: usize) -> Self {
        self.max_concurrency = n.max(1);
        self
    }

    async fn score(&self, text: &str) -> f64 {
        let prompt = scoring_prompt(self.job_description, text);
        match self.oracle.generate(&prompt, self.model).await {
            Ok(reply) => extract_probability(&reply, self.neutral),
            Err(e) => {
                log::warn!("Scoring call failed, using neutral {}: {}", self.neutral, e);
                self.neutral
            }
        }
    }
}

#[async_trait]
impl ProbabilityModel for OracleProbability<'_> {
    async fn predict_proba(&self, texts: &[String]) -> Result<Vec<[f64; 2]>, ExplainError> {
        let pending: Vec<_> = texts.iter().map(|text| self.score(text)).collect();
        let scores: Vec<f64> = stream::iter(pending)
            .buffered(self.max_concurrency)
            .collect()
            .await;

        Ok(scores.into_iter().map(|p| [1.0 - p, p]).collect())
    }
}
