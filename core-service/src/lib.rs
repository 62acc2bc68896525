//! FitLens Core
//!
//! Candidate-fit evaluation through an external text-generation oracle,
//! made auditable by phrase highlighting and local surrogate explanations.

pub mod constants;
pub mod logic;

pub use logic::candidate::{load_candidates, CandidateError, CandidateRecord};
pub use logic::config::{EvaluatorConfig, ExplainConfig, OracleConfig};
pub use logic::evaluation::{
    EvaluateError, EvaluationMode, EvaluationRequest, EvaluationResult, Evaluator, InputProblem,
};
pub use logic::oracle::{OllamaClient, Oracle, OracleError};
