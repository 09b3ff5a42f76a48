//! REST API server for the option pricing engine
//!
//! This crate exposes single valuations, parallel range calculations, model
//! details and range calculation timings over HTTP.
//!
//! ## Endpoints
//!
//! | Method | Path                                     | Purpose                      |
//! |--------|------------------------------------------|------------------------------|
//! | GET    | `/pricing/heartbeat`                     | Liveness text                |
//! | POST   | `/pricing/calculate`                     | Price and Greeks             |
//! | POST   | `/pricing/range`                         | Sweep one input field        |
//! | POST   | `/pricing/range/simple`                  | Sweep with range in query    |
//! | GET    | `/pricing/model-details`                 | Available models             |
//! | GET    | `/performance/range-calculations`        | Range timing statistics      |
//! | GET    | `/performance/range-calculations/reset`  | Clear range timings          |
//! | GET    | `/health`, `/ready`                      | Monitoring probes            |
//!
//! Volatility and interest rate are sent in percent; expiry in days.

pub mod config;
pub mod error;
pub mod routes;
pub mod server;
pub mod service;

// Re-export pricer dependencies for integration
pub use pricer_core;
pub use pricer_models;
pub use pricer_risk;

/// Server version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
