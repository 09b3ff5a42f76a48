//! Option pricing endpoints
//!
//! - GET  /pricing/heartbeat
//! - POST /pricing/calculate
//! - POST /pricing/range
//! - POST /pricing/range/simple?rangeKey=..&startValue=..&endValue=..&increment=..
//! - GET  /pricing/model-details
//!
//! Valuations are CPU-bound and run on the blocking pool.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    response::Json,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use pricer_core::types::{ResultSet, ValuationResult};

use super::AppState;
use crate::error::ApiError;
use crate::service::{PricingRequest, RangeParams, RangeRequest};

/// Heartbeat reply
pub const HEARTBEAT: &str =
    "I am an Option Pricing Service and I am actively listening for pricing requests right now!";

/// Model details response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModelDetailsResponse {
    /// Summary of the available models
    pub model_details: String,
}

/// Build the pricing routes
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/pricing/heartbeat", get(heartbeat))
        .route("/pricing/calculate", post(calculate))
        .route("/pricing/range", post(calculate_range))
        .route("/pricing/range/simple", post(calculate_range_simple))
        .route("/pricing/model-details", get(model_details))
}

/// GET /pricing/heartbeat
async fn heartbeat() -> &'static str {
    HEARTBEAT
}

/// POST /pricing/calculate - Value one option
async fn calculate(
    State(state): State<AppState>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> Result<Json<ValuationResult>, ApiError> {
    let Json(request) = payload?;
    let span = tracing::info_span!(
        "calculate",
        request_id = %Uuid::new_v4(),
        model = request.model_type().unwrap_or_default()
    );

    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        service.calculate(&request)
    })
    .await??;

    Ok(Json(result))
}

/// POST /pricing/range - Sweep one input field
async fn calculate_range(
    State(state): State<AppState>,
    payload: Result<Json<RangeRequest>, JsonRejection>,
) -> Result<Json<ResultSet>, ApiError> {
    let Json(request) = payload?;
    let span = tracing::info_span!(
        "calculate_range",
        request_id = %Uuid::new_v4(),
        range_key = request.range.range_key.as_deref().unwrap_or_default()
    );

    let service = Arc::clone(&state.service);
    let results = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        service.calculate_range(&request)
    })
    .await??;

    Ok(Json(results))
}

/// POST /pricing/range/simple - Sweep with the range in the query string
async fn calculate_range_simple(
    State(state): State<AppState>,
    query: Result<Query<RangeParams>, QueryRejection>,
    payload: Result<Json<PricingRequest>, JsonRejection>,
) -> Result<Json<ResultSet>, ApiError> {
    let Query(range) = query?;
    let Json(base) = payload?;
    let span = tracing::info_span!(
        "calculate_range",
        request_id = %Uuid::new_v4(),
        range_key = range.range_key.as_deref().unwrap_or_default()
    );

    let service = Arc::clone(&state.service);
    let results = tokio::task::spawn_blocking(move || {
        let _entered = span.enter();
        service.calculate_range_for(&base, &range)
    })
    .await??;

    Ok(Json(results))
}

/// GET /pricing/model-details
async fn model_details(State(state): State<AppState>) -> Json<ModelDetailsResponse> {
    Json(ModelDetailsResponse {
        model_details: state.service.model_details(),
    })
}
