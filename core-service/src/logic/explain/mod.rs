//! Explain Module - Local Surrogate Explanations
//!
//! Answers "which parts of this candidate's profile drove the score" by
//! perturbing the profile, scoring each copy through a black-box probability
//! function, and fitting a locality-weighted linear model on the masks.
//!
//! ## Structure
//! - `perturb`: field segmentation and random masking
//! - `fit`: kernel, weighted ridge, feature selection
//! - `probability`: `ProbabilityModel` and the oracle adapter
//! - `engine`: the end-to-end `explain` pipeline

pub mod types;
pub mod perturb;
pub mod fit;
pub mod probability;
pub mod engine;

pub use types::{
    ExplainError, ExplainerFailure, FeatureImportance, SurrogateDiagnostics, SurrogateExplanation,
};
pub use probability::{FnProbability, OracleProbability, ProbabilityModel};
pub use engine::{explain, explain_segments, fit_explanation};
