//! Lattice pricing methods.
//!
//! - [`BinomialTree`]: Cox-Ross-Rubinstein binomial lattice with European or
//!   American exercise

mod binomial;

pub use binomial::{BinomialTree, DEFAULT_STEPS};
