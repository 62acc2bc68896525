use serde::{Deserialize, Serialize};

use crate::logic::candidate::CandidateRecord;
use crate::logic::explain::{ExplainerFailure, FeatureImportance, SurrogateDiagnostics};
use crate::logic::highlight::AnnotatedExplanation;
use crate::logic::parser::Decision;

/// Which prompt and post-processing a batch gets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// Free-form reply, highlighted as a whole
    Basic,
    /// Structured reply, highlighted explanation, surrogate ranking
    Advanced,
}

/// One batch request
#[derive(Debug, Clone)]
pub struct EvaluationRequest {
    pub job_description: String,
    /// Falls back to the configured default model
    pub model: Option<String>,
    pub mode: EvaluationMode,
}

impl EvaluationRequest {
    pub fn new(job_description: impl Into<String>, mode: EvaluationMode) -> Self {
        Self {
            job_description: job_description.into(),
            model: None,
            mode,
        }
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Share of the explanation's words that point back at the profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RelevanceMetrics {
    pub matches_count: usize,
    pub total_words: usize,
    /// `matches_count / max(total_words, 1)`, 4 decimals
    pub relevance_ratio: f64,
}

impl RelevanceMetrics {
    pub fn compute(matches_count: usize, explanation: &str) -> Self {
        let total_words = explanation.split_whitespace().count();
        let ratio = matches_count as f64 / total_words.max(1) as f64;
        Self {
            matches_count,
            total_words,
            relevance_ratio: (ratio * 10_000.0).round() / 10_000.0,
        }
    }
}

/// Parsed advanced-mode evaluation
#[derive(Debug, Clone, Serialize)]
pub struct StructuredEvaluation {
    pub decision: Decision,
    pub confidence: u8,
    pub explanation: String,
    pub phrase_matches: AnnotatedExplanation,
    pub relevance_metrics: RelevanceMetrics,
}

/// What is left when the oracle call failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawFallback {
    pub raw_response: String,
    pub error: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Evaluation {
    Structured(StructuredEvaluation),
    Failed(RawFallback),
    /// Basic mode: the reply as-is
    Text(String),
}

/// Surrogate ranking or the reason there is none
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum LimeOutcome {
    Ranking(Vec<FeatureImportance>),
    Failed(Vec<ExplainerFailure>),
}

/// Per-candidate output record
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    pub candidate: CandidateRecord,
    pub evaluation: Evaluation,
    /// Basic mode only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phrase_matches: Option<AnnotatedExplanation>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lime_explanation: Option<LimeOutcome>,
    /// Present only alongside a ranking
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lime_diagnostics: Option<SurrogateDiagnostics>,
}

impl EvaluationResult {
    pub fn is_failed(&self) -> bool {
        matches!(self.evaluation, Evaluation::Failed(_))
    }
}

/// Problem with the batch input itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum InputProblem {
    #[error("Job description is required")]
    MissingJobDescription,

    #[error("No candidates found in CSV file")]
    NoCandidates,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EvaluateError {
    #[error("{0}")]
    InputInvalid(InputProblem),
}
