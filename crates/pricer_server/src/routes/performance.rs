//! Range calculation performance endpoints

use axum::{extract::State, response::Json, routing::get, Router};

use super::AppState;
use crate::service::PerformanceSnapshot;

/// Build the performance routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/performance/range-calculations", get(range_calculations))
        .route("/performance/range-calculations/reset", get(reset))
}

/// GET /performance/range-calculations
async fn range_calculations(State(state): State<AppState>) -> Json<PerformanceSnapshot> {
    Json(state.service.tracker().snapshot())
}

/// GET /performance/range-calculations/reset
async fn reset(State(state): State<AppState>) -> &'static str {
    state.service.tracker().reset();
    "Performance metrics reset successfully"
}
