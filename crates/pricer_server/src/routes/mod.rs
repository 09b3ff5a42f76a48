//! Route modules for the pricer server
//!
//! This module contains endpoint group-specific routers:
//! - pricing: Valuation, range calculation and model detail endpoints
//! - performance: Range calculation timing endpoints
//! - health: Health check and monitoring endpoints

pub mod health;
pub mod performance;
pub mod pricing;

use axum::Router;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::ServerConfig;
use crate::service::PricingService;
use pricer_risk::range::RangeError;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<ServerConfig>,
    /// Models, range engine and performance tracker
    pub service: Arc<PricingService>,
    /// Server start time for uptime calculation
    pub start_time: std::time::Instant,
}

impl AppState {
    /// Create a new AppState, building the pricing service from `config`
    pub fn new(config: Arc<ServerConfig>) -> Result<Self, RangeError> {
        let service = PricingService::from_config(&config)?;
        Ok(Self::with_service(config, Arc::new(service)))
    }

    /// Create a new AppState around an existing service
    pub fn with_service(config: Arc<ServerConfig>, service: Arc<PricingService>) -> Self {
        Self {
            config,
            service,
            start_time: std::time::Instant::now(),
        }
    }
}

/// Build the main application router by merging all route modules
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(health::routes())
        .merge(pricing::routes())
        .merge(performance::routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
pub(crate) fn test_state() -> AppState {
    let config = ServerConfig {
        worker_threads: 2,
        binomial_steps: 200,
        monte_carlo_paths: 2_000,
        monte_carlo_seed: Some(7),
        max_grid_points: 100,
        ..Default::default()
    };
    AppState::new(Arc::new(config)).unwrap()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_build_router_creates_valid_router() {
        let router = build_router(test_state());

        let response = router
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_router_merges_all_route_groups() {
        let router = build_router(test_state());

        for uri in [
            "/health",
            "/ready",
            "/pricing/heartbeat",
            "/pricing/model-details",
            "/performance/range-calculations",
        ] {
            let response = router
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }

        let response = router
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/pricing/calculate")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_cors_is_permissive() {
        let router = build_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/pricing/heartbeat")
                    .header("origin", "http://localhost:4200")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "*"
        );
    }

    #[tokio::test]
    async fn test_unknown_route_returns_404() {
        let router = build_router(test_state());

        let response = router
            .oneshot(
                Request::builder()
                    .uri("/unknown/path")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_app_state_uptime() {
        let state = test_state();

        std::thread::sleep(std::time::Duration::from_millis(10));

        let elapsed = state.start_time.elapsed();
        assert!(elapsed.as_millis() >= 10);
    }

    #[test]
    fn test_app_state_builds_configured_pool() {
        let state = test_state();
        assert_eq!(state.service.engine().threads(), 2);
        assert_eq!(state.service.engine().max_grid_points(), 100);
        assert_eq!(state.config.binomial_steps, 200);
    }
}
