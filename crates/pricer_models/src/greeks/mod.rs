//! Greeks by bump-and-reprice.
//!
//! Models without closed-form sensitivities (American puts, the binomial
//! lattice, Monte Carlo) compute all five Greeks with central finite
//! differences on their own pricing function.

mod finite_difference;

pub use finite_difference::{FiniteDifference, DEFAULT_RELATIVE_BUMP, ZERO_VALUE_BUMP};
