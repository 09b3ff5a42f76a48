//! Model selection, valuation and range sweeps for the API.

use std::time::Instant;

use pricer_core::traits::PricingModel;
use pricer_core::types::{InputField, ResultSet, ValuationResult};
use pricer_models::registry::{ModelRegistry, OptionModel};
use pricer_risk::range::{RangeCalculation, RangeCalculationEngine, RangeError};

use super::performance::PerformanceTracker;
use super::request::{PricingRequest, RangeParams, RangeRequest, Valuation};
use crate::config::ServerConfig;
use crate::error::ApiError;

/// Prices requests against the configured models.
///
/// Every method is synchronous and CPU-bound; async callers run them on the
/// blocking pool.
#[derive(Debug)]
pub struct PricingService {
    registry: ModelRegistry,
    engine: RangeCalculationEngine,
    tracker: PerformanceTracker,
}

impl PricingService {
    pub fn new(registry: ModelRegistry, engine: RangeCalculationEngine) -> Self {
        Self {
            registry,
            engine,
            tracker: PerformanceTracker::new(),
        }
    }

    /// Build the registry and range worker pool from `config`.
    ///
    /// # Errors
    /// `RangeError::ThreadPool` if the worker pool cannot be built.
    pub fn from_config(config: &ServerConfig) -> Result<Self, RangeError> {
        let registry = ModelRegistry::new(config.model_settings());
        let engine = RangeCalculationEngine::with_threads(config.worker_threads)?
            .with_max_grid_points(config.max_grid_points)
            .with_grid_point_logging(config.log_range_calculations);

        tracing::info!(
            worker_threads = engine.threads(),
            max_grid_points = engine.max_grid_points(),
            binomial_steps = config.binomial_steps,
            monte_carlo_paths = config.monte_carlo_paths,
            "Pricing service initialised"
        );
        Ok(Self::new(registry, engine))
    }

    pub fn registry(&self) -> &ModelRegistry {
        &self.registry
    }

    pub fn engine(&self) -> &RangeCalculationEngine {
        &self.engine
    }

    pub fn tracker(&self) -> &PerformanceTracker {
        &self.tracker
    }

    /// Summary text of the available models.
    pub fn model_details(&self) -> String {
        self.registry.model_details()
    }

    fn resolve(&self, identifier: Option<&str>) -> &OptionModel {
        let resolution = self.registry.resolve(identifier);
        if resolution.fell_back {
            tracing::warn!(
                requested = identifier.unwrap_or_default(),
                using = resolution.model.model_id(),
                "Unknown model type, falling back to default"
            );
        }
        resolution.model
    }

    /// Value one option.
    ///
    /// # Errors
    /// - `ApiError::InvalidInput` for a malformed request or zero days to expiry
    /// - `ApiError::Calculation` when the model fails
    pub fn calculate(&self, request: &PricingRequest) -> Result<ValuationResult, ApiError> {
        let valuation = request.validate()?;
        require_live(&valuation)?;

        let model = self.resolve(request.model_type());
        let start = Instant::now();
        let outcome = model.calculate(valuation.config, &valuation.inputs);
        let elapsed = start.elapsed();

        let status = if outcome.is_ok() { "ok" } else { "error" };
        metrics::counter!(
            "pricing_requests_total",
            "model" => model.model_id(),
            "kind" => "single",
            "status" => status
        )
        .increment(1);
        metrics::histogram!("pricing_calculation_seconds", "model" => model.model_id())
            .record(elapsed.as_secs_f64());

        let result = outcome?;
        tracing::info!(
            model = model.model_id(),
            option = %valuation.config,
            price = result.price,
            elapsed_ms = elapsed.as_secs_f64() * 1000.0,
            "Valuation completed"
        );
        Ok(result)
    }

    /// Run the sweep described by `request`.
    ///
    /// # Errors
    /// As [`calculate_range_for`](Self::calculate_range_for), plus
    /// `ApiError::InvalidInput` when the base request is missing.
    pub fn calculate_range(&self, request: &RangeRequest) -> Result<ResultSet, ApiError> {
        let base = request.base_request.as_ref().ok_or_else(|| {
            ApiError::InvalidInput("Base pricing request is required".to_string())
        })?;
        self.calculate_range_for(base, &request.range)
    }

    /// Sweep `range` over `base`, returning results in grid order.
    ///
    /// Successful sweeps are recorded in the performance tracker under the
    /// resolved model identifier.
    ///
    /// # Errors
    /// - `ApiError::InvalidInput` for a malformed request or range, or a grid
    ///   larger than the configured limit
    /// - `ApiError::Calculation` for the first grid point that fails
    pub fn calculate_range_for(
        &self,
        base: &PricingRequest,
        range: &RangeParams,
    ) -> Result<ResultSet, ApiError> {
        let valuation = base.validate()?;
        let spec = range.to_spec(&valuation)?;
        if spec.field != InputField::TimeToExpiry {
            require_live(&valuation)?;
        }

        let model = self.resolve(base.model_type());
        let mut results = ResultSet::new();
        let outcome = model.calculate_range(
            &self.engine,
            &mut results,
            valuation.config,
            &valuation.inputs,
            &spec,
        );

        let status = if outcome.is_ok() { "ok" } else { "error" };
        metrics::counter!(
            "range_calculations_total",
            "model" => model.model_id(),
            "status" => status
        )
        .increment(1);

        let stats = outcome?;
        metrics::histogram!("pricing_calculation_seconds", "model" => model.model_id())
            .record(stats.total_time_ns as f64 / 1e9);
        self.tracker.record(model.model_id(), stats.total_time_ms());

        tracing::debug!(
            model = model.model_id(),
            grid_points = stats.grid_points,
            avg_point_ms = stats.avg_time_per_point_ms(),
            threads = stats.threads,
            "Range request served"
        );
        Ok(results)
    }
}

fn require_live(valuation: &Valuation) -> Result<(), ApiError> {
    if valuation.time_to_expiry() > 0.0 {
        Ok(())
    } else {
        Err(ApiError::InvalidInput(
            "Days to expiry must be greater than 0 to value an option".to_string(),
        ))
    }
}
