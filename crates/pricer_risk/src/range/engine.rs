//! Parallel range sweep over an injected worker pool.
//!
//! Each grid point copies the base input set, overwrites the swept field and
//! runs as an independent valuation on the pool. Results are collected through
//! an indexed parallel iterator, so their order is the grid order whatever the
//! completion order. The first failing point aborts the sweep and nothing is
//! merged into the caller's result set.

use std::sync::Arc;
use std::time::Instant;

use pricer_core::traits::PricingModel;
use pricer_core::types::{MarketInputSet, OptionConfig, ResultSet, ValuationResult};
use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuilder};

use super::error::RangeError;
use super::spec::RangeSpec;

/// Default cap on grid points per sweep.
pub const DEFAULT_MAX_GRID_POINTS: usize = 10_000;

/// Statistics for one sweep.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RangeSweepStats {
    /// Number of grid points valued.
    pub grid_points: usize,
    /// Wall-clock time of the sweep in nanoseconds.
    pub total_time_ns: u64,
    /// Worker threads available to the sweep.
    pub threads: usize,
}

impl RangeSweepStats {
    /// Returns the sweep time in milliseconds.
    #[inline]
    pub fn total_time_ms(&self) -> f64 {
        self.total_time_ns as f64 / 1_000_000.0
    }

    /// Returns the average time per grid point in milliseconds.
    #[inline]
    pub fn avg_time_per_point_ms(&self) -> f64 {
        if self.grid_points == 0 {
            0.0
        } else {
            self.total_time_ms() / self.grid_points as f64
        }
    }
}

/// Runs range sweeps on a shared, bounded worker pool.
///
/// The engine holds no per-sweep state and may be shared by `Arc` and used
/// from many threads at once.
///
/// # Examples
/// ```
/// use pricer_core::types::{InputField, MarketInputSet, OptionConfig, ResultSet};
/// use pricer_models::analytical::EuropeanBlackScholes;
/// use pricer_risk::range::{RangeCalculationEngine, RangeSpec};
///
/// let engine = RangeCalculationEngine::with_threads(2).unwrap();
/// let base = MarketInputSet::new()
///     .with(InputField::Strike, 100.0)
///     .with(InputField::UnderlyingPrice, 100.0)
///     .with(InputField::Volatility, 0.2)
///     .with(InputField::TimeToExpiry, 1.0)
///     .with(InputField::InterestRate, 0.05);
///
/// let mut results = ResultSet::new();
/// let spec = RangeSpec::new(InputField::UnderlyingPrice, 90.0, 110.0, 5.0);
/// engine
///     .calculate_range(&EuropeanBlackScholes, OptionConfig::european_call(), &base, &spec, &mut results)
///     .unwrap();
/// assert_eq!(results.range_variables(), vec![90.0, 95.0, 100.0, 105.0, 110.0]);
/// ```
#[derive(Debug, Clone)]
pub struct RangeCalculationEngine {
    pool: Arc<ThreadPool>,
    max_grid_points: usize,
    log_grid_points: bool,
}

impl RangeCalculationEngine {
    /// Create an engine on an existing pool.
    pub fn new(pool: Arc<ThreadPool>) -> Self {
        Self {
            pool,
            max_grid_points: DEFAULT_MAX_GRID_POINTS,
            log_grid_points: false,
        }
    }

    /// Create an engine on a new pool of `threads` workers.
    ///
    /// `threads == 0` sizes the pool to the host's available parallelism.
    ///
    /// # Errors
    /// `RangeError::ThreadPool` if the pool cannot be built.
    pub fn with_threads(threads: usize) -> Result<Self, RangeError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .thread_name(|index| format!("range-worker-{}", index))
            .build()?;
        Ok(Self::new(Arc::new(pool)))
    }

    /// Limit the number of grid points per sweep.
    pub fn with_max_grid_points(mut self, max_grid_points: usize) -> Self {
        self.max_grid_points = max_grid_points;
        self
    }

    /// Log every grid-point valuation at debug level.
    pub fn with_grid_point_logging(mut self, enabled: bool) -> Self {
        self.log_grid_points = enabled;
        self
    }

    /// Number of worker threads.
    pub fn threads(&self) -> usize {
        self.pool.current_num_threads()
    }

    /// Configured grid point limit.
    pub fn max_grid_points(&self) -> usize {
        self.max_grid_points
    }

    /// Value `model` at every point of `spec` and append the results to
    /// `results` in grid order.
    ///
    /// Each result's `range_variable` is the grid value in request units.
    ///
    /// # Errors
    /// - `RangeError::InvalidRange` / `TooManyPoints` before any valuation
    /// - `RangeError::Pricing` for the first failing grid point; `results`
    ///   is left untouched
    pub fn calculate_range<M>(
        &self,
        model: &M,
        config: OptionConfig,
        base: &MarketInputSet,
        spec: &RangeSpec,
        results: &mut ResultSet,
    ) -> Result<RangeSweepStats, RangeError>
    where
        M: PricingModel + ?Sized,
    {
        let points = spec.point_count()?;
        if points > self.max_grid_points {
            return Err(RangeError::TooManyPoints {
                points,
                max: self.max_grid_points,
            });
        }
        let grid = spec.grid()?;

        let start = Instant::now();
        let valued: Vec<ValuationResult> = self.pool.install(|| {
            grid.par_iter()
                .enumerate()
                .map(|(index, &value)| self.value_point(model, config, base, spec, index, value))
                .collect::<Result<Vec<_>, _>>()
        })?;

        let stats = RangeSweepStats {
            grid_points: valued.len(),
            total_time_ns: start.elapsed().as_nanos() as u64,
            threads: self.threads(),
        };

        tracing::info!(
            model = model.model_id(),
            field = %spec.field,
            start = spec.start,
            end = spec.end,
            increment = spec.increment,
            grid_points = stats.grid_points,
            elapsed_ms = stats.total_time_ms(),
            "Range calculation completed"
        );

        results.extend(valued);
        Ok(stats)
    }

    fn value_point<M>(
        &self,
        model: &M,
        config: OptionConfig,
        base: &MarketInputSet,
        spec: &RangeSpec,
        index: usize,
        value: f64,
    ) -> Result<ValuationResult, RangeError>
    where
        M: PricingModel + ?Sized,
    {
        let mut inputs = *base;
        inputs.set(spec.field, value * spec.unit_scale);

        match model.calculate(config, &inputs) {
            Ok(result) => {
                if self.log_grid_points {
                    tracing::debug!(
                        model = model.model_id(),
                        field = %spec.field,
                        index,
                        value,
                        price = result.price,
                        "Grid point valued"
                    );
                }
                Ok(result.with_range_variable(value))
            }
            Err(source) => {
                tracing::error!(
                    model = model.model_id(),
                    field = %spec.field,
                    index,
                    value,
                    error = %source,
                    "Grid point valuation failed"
                );
                Err(RangeError::Pricing {
                    index,
                    value,
                    source,
                })
            }
        }
    }
}

/// Range calculation as a capability of every pricing model.
pub trait RangeCalculation: PricingModel {
    /// Sweep `spec` on `engine`, appending results to `results` in grid order.
    ///
    /// # Errors
    /// As [`RangeCalculationEngine::calculate_range`].
    fn calculate_range(
        &self,
        engine: &RangeCalculationEngine,
        results: &mut ResultSet,
        config: OptionConfig,
        inputs: &MarketInputSet,
        spec: &RangeSpec,
    ) -> Result<RangeSweepStats, RangeError> {
        engine.calculate_range(self, config, inputs, spec, results)
    }
}

impl<M: PricingModel + ?Sized> RangeCalculation for M {}
