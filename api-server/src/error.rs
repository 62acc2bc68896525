//! Error handling

use axum::{
    response::{IntoResponse, Response},
    http::StatusCode,
    Json,
};
use serde_json::json;

use fitlens_core::{CandidateError, EvaluateError, InputProblem};

pub type AppResult<T> = Result<T, AppError>;

#[derive(Debug)]
pub enum AppError {
    // Request errors
    ValidationError(String),
    NotFound(String),

    // Candidate CSV could not be read
    CandidateSource(String),

    // Batch ran past the request deadline
    DeadlineExceeded(u64),

    // Generic errors
    InternalError(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::ValidationError(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            AppError::CandidateSource(msg) => {
                tracing::error!("Candidate source error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Candidate source could not be read".to_string())
            }
            AppError::DeadlineExceeded(secs) => {
                tracing::warn!("Request exceeded its {}s deadline", secs);
                (StatusCode::GATEWAY_TIMEOUT, format!("Evaluation did not finish within {}s", secs))
            }
            AppError::InternalError(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16()
        }));

        (status, body).into_response()
    }
}

impl From<EvaluateError> for AppError {
    fn from(err: EvaluateError) -> Self {
        match err {
            EvaluateError::InputInvalid(problem @ InputProblem::MissingJobDescription) => {
                AppError::ValidationError(problem.to_string())
            }
            EvaluateError::InputInvalid(problem @ InputProblem::NoCandidates) => {
                AppError::NotFound(problem.to_string())
            }
        }
    }
}

impl From<CandidateError> for AppError {
    fn from(err: CandidateError) -> Self {
        AppError::CandidateSource(err.to_string())
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::InternalError(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_problems_map_to_status() {
        let missing: AppError = EvaluateError::InputInvalid(InputProblem::MissingJobDescription).into();
        assert_eq!(missing.into_response().status(), StatusCode::BAD_REQUEST);

        let empty: AppError = EvaluateError::InputInvalid(InputProblem::NoCandidates).into();
        assert_eq!(empty.into_response().status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_deadline_is_gateway_timeout() {
        let response = AppError::DeadlineExceeded(5).into_response();
        assert_eq!(response.status(), StatusCode::GATEWAY_TIMEOUT);
    }
}
