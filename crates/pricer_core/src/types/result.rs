//! Valuation results and ordered result sets.

use super::error::PricingError;

/// First- and second-order sensitivities.
///
/// Scaling conventions shared by every model:
/// - `delta`, `gamma`: per unit of underlying price
/// - `vega`: per 1 percentage point of volatility
/// - `theta`: per day (calendar time decay divided by the day-count convention)
/// - `rho`: per 1 percentage point of interest rate
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Greeks {
    /// ∂V/∂S
    pub delta: f64,
    /// ∂²V/∂S²
    pub gamma: f64,
    /// ∂V/∂σ × 0.01
    pub vega: f64,
    /// −∂V/∂T / day count
    pub theta: f64,
    /// ∂V/∂r × 0.01
    pub rho: f64,
}

/// Price and Greeks of one valuation.
///
/// `range_variable` is the swept value that produced this result, or 0 for a
/// single calculation.
///
/// # Examples
/// ```
/// use pricer_core::types::{Greeks, ValuationResult};
///
/// let result = ValuationResult::new(10.45, Greeks { delta: 0.64, ..Greeks::default() })
///     .with_range_variable(100.0);
/// assert_eq!(result.delta, 0.64);
/// assert_eq!(result.range_variable, 100.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct ValuationResult {
    /// Option price
    pub price: f64,
    /// Delta
    pub delta: f64,
    /// Gamma
    pub gamma: f64,
    /// Vega
    pub vega: f64,
    /// Theta
    pub theta: f64,
    /// Rho
    pub rho: f64,
    /// Swept value that produced this result
    pub range_variable: f64,
}

impl ValuationResult {
    /// Build a result with `range_variable = 0`.
    pub fn new(price: f64, greeks: Greeks) -> Self {
        Self {
            price,
            delta: greeks.delta,
            gamma: greeks.gamma,
            vega: greeks.vega,
            theta: greeks.theta,
            rho: greeks.rho,
            range_variable: 0.0,
        }
    }

    /// Tag the result with the grid value that produced it.
    pub fn with_range_variable(mut self, value: f64) -> Self {
        self.range_variable = value;
        self
    }

    /// The sensitivities of this result.
    pub fn greeks(&self) -> Greeks {
        Greeks {
            delta: self.delta,
            gamma: self.gamma,
            vega: self.vega,
            theta: self.theta,
            rho: self.rho,
        }
    }

    /// Reject results containing NaN or infinite values.
    ///
    /// # Errors
    /// `PricingError::Calculation` attributed to `model`, naming the first
    /// non-finite quantity.
    pub fn ensure_finite(self, model: &str) -> Result<Self, PricingError> {
        let quantities = [
            ("price", self.price),
            ("delta", self.delta),
            ("gamma", self.gamma),
            ("vega", self.vega),
            ("theta", self.theta),
            ("rho", self.rho),
        ];
        match quantities.iter().find(|(_, value)| !value.is_finite()) {
            Some((name, value)) => Err(PricingError::calculation(
                model,
                format!("{} is not finite ({})", name, value),
            )),
            None => Ok(self),
        }
    }
}

/// Ordered collection of valuation results.
///
/// Insertion order is significant and preserved: for a range sweep it is the
/// grid order. Results are never sorted or deduplicated.
///
/// Serialises as `{"results": [...], "totalCount": n}`. The count is always
/// derived from `results`; an incoming `totalCount` is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(from = "ResultSetWire", into = "ResultSetWire")
)]
pub struct ResultSet {
    results: Vec<ValuationResult>,
}

#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResultSetWire {
    results: Vec<ValuationResult>,
    #[serde(default)]
    total_count: usize,
}

#[cfg(feature = "serde")]
impl From<ResultSetWire> for ResultSet {
    fn from(wire: ResultSetWire) -> Self {
        Self {
            results: wire.results,
        }
    }
}

#[cfg(feature = "serde")]
impl From<ResultSet> for ResultSetWire {
    fn from(set: ResultSet) -> Self {
        Self {
            total_count: set.results.len(),
            results: set.results,
        }
    }
}

impl ResultSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty set with room for `capacity` results.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            results: Vec::with_capacity(capacity),
        }
    }

    /// Append one result.
    pub fn push(&mut self, result: ValuationResult) {
        self.results.push(result);
    }

    /// Append all results of `other`, keeping their order after the existing ones.
    pub fn merge(&mut self, other: ResultSet) {
        self.extend(other.results);
    }

    /// Number of results.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// Returns `true` if the set holds no results.
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Results in insertion order.
    pub fn results(&self) -> &[ValuationResult] {
        &self.results
    }

    /// Iterate over results in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, ValuationResult> {
        self.results.iter()
    }

    /// The `range_variable` of each result, in order.
    pub fn range_variables(&self) -> Vec<f64> {
        self.results.iter().map(|r| r.range_variable).collect()
    }
}

impl Extend<ValuationResult> for ResultSet {
    fn extend<I: IntoIterator<Item = ValuationResult>>(&mut self, iter: I) {
        self.results.extend(iter);
    }
}

impl FromIterator<ValuationResult> for ResultSet {
    fn from_iter<I: IntoIterator<Item = ValuationResult>>(iter: I) -> Self {
        let mut set = ResultSet::new();
        set.extend(iter);
        set
    }
}

impl IntoIterator for ResultSet {
    type Item = ValuationResult;
    type IntoIter = std::vec::IntoIter<ValuationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.into_iter()
    }
}

impl<'a> IntoIterator for &'a ResultSet {
    type Item = &'a ValuationResult;
    type IntoIter = std::slice::Iter<'a, ValuationResult>;

    fn into_iter(self) -> Self::IntoIter {
        self.results.iter()
    }
}
