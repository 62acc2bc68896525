//! Candidate evaluation handlers

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use tracing::Instrument;
use uuid::Uuid;
use validator::Validate;

use fitlens_core::{load_candidates, EvaluationMode, EvaluationRequest};

use crate::models::{HiringRequest, HiringResponse, JOB_DESCRIPTION_REQUIRED};
use crate::{AppError, AppResult, AppState};

/// Free-form evaluation of every candidate
pub async fn basic(
    State(state): State<AppState>,
    payload: Result<Json<HiringRequest>, JsonRejection>,
) -> AppResult<Json<HiringResponse>> {
    evaluate(state, payload, EvaluationMode::Basic).await
}

/// Structured, bias-aware evaluation with surrogate explanations
pub async fn advanced(
    State(state): State<AppState>,
    payload: Result<Json<HiringRequest>, JsonRejection>,
) -> AppResult<Json<HiringResponse>> {
    evaluate(state, payload, EvaluationMode::Advanced).await
}

async fn evaluate(
    state: AppState,
    payload: Result<Json<HiringRequest>, JsonRejection>,
    mode: EvaluationMode,
) -> AppResult<Json<HiringResponse>> {
    // A missing or unreadable body is reported like a missing field
    let Json(req) = payload.map_err(|e| {
        tracing::debug!("Rejected hiring body: {}", e);
        AppError::ValidationError(JOB_DESCRIPTION_REQUIRED.to_string())
    })?;
    req.validate()
        .map_err(|_| AppError::ValidationError(JOB_DESCRIPTION_REQUIRED.to_string()))?;

    let request_id = Uuid::new_v4();
    let span = tracing::info_span!("hiring", %request_id, ?mode);

    async move {
        let path = state.config.candidates_csv.clone();
        let candidates = tokio::task::spawn_blocking(move || load_candidates(&path)).await??;

        let mut request = EvaluationRequest::new(req.job_description, mode);
        request.model = req.model;

        let deadline_secs = state.config.request_deadline_secs;
        let results = tokio::time::timeout(
            state.config.request_deadline(),
            state.evaluator.evaluate_batch(&request, &candidates),
        )
        .await
        .map_err(|_| AppError::DeadlineExceeded(deadline_secs))??;

        tracing::info!("Evaluated {} candidates", results.len());
        Ok(Json(HiringResponse { results }))
    }
    .instrument(span)
    .await
}
