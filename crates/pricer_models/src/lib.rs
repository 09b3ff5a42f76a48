//! # Pricer Models (L2: Pricing Methods)
//!
//! The four interchangeable option pricing models and their shared plumbing.
//!
//! ## Architecture
//!
//! ```text
//!                 ┌──────────────────────────┐
//!                 │  registry::ModelRegistry │  identifier → model
//!                 └────────────┬─────────────┘
//!                              │ OptionModel (enum dispatch)
//!       ┌───────────────┬──────┴────────┬────────────────┐
//!       ▼               ▼               ▼                ▼
//!  European BS     American BAW    Binomial CRR     Monte Carlo
//!  (closed form)   (closed form +  (lattice)        (GBM terminal)
//!                   S* search)
//!                       └───────────────┴────────────────┘
//!                                       │
//!                              greeks::FiniteDifference
//! ```
//!
//! Every model implements [`pricer_core::traits::PricingModel`] and takes its
//! [`OptionConfig`](pricer_core::types::OptionConfig) per call, so a single
//! instance can serve concurrent valuations.
//!
//! ## Greeks conventions
//!
//! All models report vega and rho per 1% move, theta per day (divided by the
//! day-count convention) and delta/gamma per unit of underlying.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod greeks;
pub mod lattice;
pub mod monte_carlo;
pub mod registry;

pub use registry::{ModelKind, ModelRegistry, ModelSettings, OptionModel};
