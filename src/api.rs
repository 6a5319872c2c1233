use std::sync::Arc;

use axum::{
    extract::{Query, State},
    routing::{get, post},
    Json, Router,
};
use tower_http::cors::CorsLayer;

use crate::analyze::ScoringPolicy;
use crate::engine::VerificationEngine;
use crate::history::{History, HistoryEntry};
use crate::verdict::VerificationResult;

#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<VerificationEngine>,
    pub history: Arc<History>,
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(|| async { "ok" }))
        .route("/verify", post(verify))
        .route("/debug/history", get(debug_history))
        .route("/debug/policy", get(debug_policy))
        .layer(CorsLayer::very_permissive())
        .with_state(state)
}

#[derive(serde::Deserialize)]
struct VerifyReq {
    /// Base64-encoded product photo.
    image: String,
}

async fn verify(
    State(state): State<AppState>,
    Json(body): Json<VerifyReq>,
) -> Json<VerificationResult> {
    let result = state.engine.verify(&body.image).await;
    if let Some(report) = &result.report {
        state.history.push(report);
    }
    Json(result)
}

#[derive(serde::Deserialize)]
struct HistoryQuery {
    #[serde(default = "default_history_n")]
    n: usize,
}

fn default_history_n() -> usize {
    20
}

async fn debug_history(
    State(state): State<AppState>,
    Query(q): Query<HistoryQuery>,
) -> Json<Vec<HistoryEntry>> {
    Json(state.history.snapshot_last_n(q.n))
}

async fn debug_policy(State(state): State<AppState>) -> Json<ScoringPolicy> {
    Json(state.engine.policy())
}
