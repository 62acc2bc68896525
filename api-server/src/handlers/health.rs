//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use fitlens_core::constants::{APP_NAME, APP_VERSION};

use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    service: &'static str,
    version: &'static str,
    core_version: &'static str,
    default_model: String,
    surrogate_enabled: bool,
    timestamp: i64,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let evaluator = state.evaluator.config();
    Json(HealthResponse {
        status: "healthy",
        service: APP_NAME,
        version: env!("CARGO_PKG_VERSION"),
        core_version: APP_VERSION,
        default_model: evaluator.oracle.default_model.clone(),
        surrogate_enabled: evaluator.explain.enabled,
        timestamp: chrono::Utc::now().timestamp(),
    })
}
