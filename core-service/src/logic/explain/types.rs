use serde::{Deserialize, Serialize};

/// Signed influence of one candidate feature on the "suitable" probability
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureImportance {
    pub feature: String,
    /// Surrogate coefficient, rounded to 3 decimals
    #[serde(rename = "importance")]
    pub weight: f64,
    #[serde(rename = "supports_hiring")]
    pub supports_positive_class: bool,
}

/// Output of one local surrogate fit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurrogateExplanation {
    /// Sorted by |weight| descending, at most `num_features` entries
    pub importances: Vec<FeatureImportance>,
    pub intercept: f64,
    /// Weighted R² of the surrogate on the perturbation sample
    pub score: f64,
    /// Surrogate prediction for the unperturbed instance
    pub local_prediction: f64,
    pub sample_count: usize,
}

impl SurrogateExplanation {
    pub fn diagnostics(&self) -> SurrogateDiagnostics {
        SurrogateDiagnostics {
            intercept: self.intercept,
            score: self.score,
            local_prediction: self.local_prediction,
            sample_count: self.sample_count,
        }
    }
}

/// Fit quality of a surrogate, reported next to its ranking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SurrogateDiagnostics {
    pub intercept: f64,
    /// Weighted R²
    pub score: f64,
    pub local_prediction: f64,
    pub sample_count: usize,
}

/// Error entry reported in place of a ranking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExplainerFailure {
    pub error: String,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ExplainError {
    #[error("candidate text has no features to perturb")]
    NoFeatures,

    #[error("probability function failed: {0}")]
    ProbabilityFailed(String),

    #[error("probability function returned {got} rows for {expected} samples")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("probability row {index} is not a valid probability pair: {value:?}")]
    InvalidProbability { index: usize, value: [f64; 2] },

    #[error("surrogate fit failed: {0}")]
    FitFailed(String),

    #[error("explanation exceeded its {0}s deadline")]
    DeadlineExceeded(u64),
}

impl From<&ExplainError> for ExplainerFailure {
    fn from(err: &ExplainError) -> Self {
        Self { error: err.to_string() }
    }
}
