//! Swept-field definition and grid construction.

use pricer_core::types::{InputField, PricingError};

use super::error::RangeError;

/// A field to sweep from `start` to `end` in steps of `increment`.
///
/// Grid values are in the caller's units. Each value is multiplied by
/// `unit_scale` before it reaches the model, so a volatility swept in percent
/// uses a scale of 0.01 while the results still report the percent value.
///
/// # Examples
/// ```
/// use pricer_core::types::InputField;
/// use pricer_risk::range::RangeSpec;
///
/// let spec = RangeSpec::new(InputField::UnderlyingPrice, 0.0, 10.0, 3.0);
/// assert_eq!(spec.grid().unwrap(), vec![0.0, 3.0, 6.0, 9.0]);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeSpec {
    /// Swept field
    pub field: InputField,
    /// First grid value
    pub start: f64,
    /// Upper bound (inclusive)
    pub end: f64,
    /// Step between grid values
    pub increment: f64,
    /// Factor applied to grid values before valuation
    pub unit_scale: f64,
}

impl RangeSpec {
    /// Create a range with a unit scale of 1.
    pub fn new(field: InputField, start: f64, end: f64, increment: f64) -> Self {
        Self {
            field,
            start,
            end,
            increment,
            unit_scale: 1.0,
        }
    }

    /// Parse the field from a range key such as `underlyingPrice`.
    ///
    /// # Errors
    /// `PricingError::InvalidInput` for an unknown key.
    pub fn parse(key: &str, start: f64, end: f64, increment: f64) -> Result<Self, PricingError> {
        Ok(Self::new(key.parse()?, start, end, increment))
    }

    /// Set the factor applied to grid values before valuation.
    pub fn with_unit_scale(mut self, unit_scale: f64) -> Self {
        self.unit_scale = unit_scale;
        self
    }

    /// Check the bounds and step.
    ///
    /// # Errors
    /// `RangeError::InvalidRange` unless all values are finite,
    /// `start < end`, `increment > 0` and `unit_scale > 0`.
    pub fn validate(&self) -> Result<(), RangeError> {
        let values = [
            ("startValue", self.start),
            ("endValue", self.end),
            ("increment", self.increment),
            ("unit scale", self.unit_scale),
        ];
        if let Some((name, value)) = values.iter().find(|(_, v)| !v.is_finite()) {
            return Err(RangeError::InvalidRange(format!(
                "{} must be finite, got {}",
                name, value
            )));
        }
        if self.start >= self.end {
            return Err(RangeError::InvalidRange(format!(
                "startValue ({}) must be less than endValue ({})",
                self.start, self.end
            )));
        }
        if self.increment <= 0.0 {
            return Err(RangeError::InvalidRange(format!(
                "increment must be positive, got {}",
                self.increment
            )));
        }
        if self.unit_scale <= 0.0 {
            return Err(RangeError::InvalidRange(format!(
                "unit scale must be positive, got {}",
                self.unit_scale
            )));
        }
        Ok(())
    }

    /// Upper bound on the number of grid points: `ceil((end - start) / increment) + 1`.
    ///
    /// # Errors
    /// As [`validate`](Self::validate).
    pub fn capacity(&self) -> Result<usize, RangeError> {
        self.validate()?;
        let steps = ((self.end - self.start) / self.increment).ceil();
        if steps >= usize::MAX as f64 {
            return Err(RangeError::InvalidRange(format!(
                "increment {} is too small for the range",
                self.increment
            )));
        }
        Ok(steps as usize + 1)
    }

    /// Exact number of grid points: `floor((end - start) / increment + 1e-9) + 1`.
    ///
    /// Uses the same tolerance as [`grid`](Self::grid), so it always equals
    /// `grid()?.len()`.
    ///
    /// # Errors
    /// As [`validate`](Self::validate).
    pub fn point_count(&self) -> Result<usize, RangeError> {
        let capacity = self.capacity()?;
        let steps = ((self.end - self.start) / self.increment + 1e-9).floor() as usize;
        Ok((steps + 1).min(capacity))
    }

    /// Grid values in ascending order.
    ///
    /// Points beyond `end` are dropped. A point that overshoots `end` by less
    /// than `1e-9·increment` is floating-point noise and is clamped to `end`.
    ///
    /// # Errors
    /// As [`validate`](Self::validate).
    pub fn grid(&self) -> Result<Vec<f64>, RangeError> {
        let capacity = self.capacity()?;
        let tolerance = 1e-9 * self.increment;

        Ok((0..capacity)
            .map(|i| self.start + i as f64 * self.increment)
            .take_while(|value| *value <= self.end + tolerance)
            .map(|value| value.min(self.end))
            .collect())
    }
}
