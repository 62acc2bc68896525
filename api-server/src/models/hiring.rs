//! Hiring request/response models

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use fitlens_core::EvaluationResult;

pub const JOB_DESCRIPTION_REQUIRED: &str = "Job description is required";

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct HiringRequest {
    #[serde(default)]
    #[validate(custom(function = "not_blank"))]
    pub job_description: String,

    /// Oracle model; the configured default when absent
    #[serde(default)]
    pub model: Option<String>,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message(JOB_DESCRIPTION_REQUIRED.into()));
    }
    Ok(())
}

#[derive(Debug, Serialize)]
pub struct HiringResponse {
    pub results: Vec<EvaluationResult>,
}
