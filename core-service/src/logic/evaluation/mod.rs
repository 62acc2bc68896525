//! Evaluation Module
//!
//! Runs a batch of candidates through the oracle and assembles one result
//! record per candidate: parsed decision, highlighted explanation,
//! relevance metrics and the surrogate ranking.

pub mod types;
pub mod orchestrator;


pub use types::{
    EvaluateError, Evaluation, EvaluationMode, EvaluationRequest, EvaluationResult, InputProblem,
    LimeOutcome, RawFallback, RelevanceMetrics, StructuredEvaluation,
};
pub use orchestrator::Evaluator;
