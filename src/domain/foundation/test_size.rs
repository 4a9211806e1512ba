//! Test split fraction value object.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Fraction of dataset rows the analysis service reserves for the test split.
///
/// Always within `[0.1, 0.5]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct TestSizeFraction(f64);

impl TestSizeFraction {
    /// Smallest accepted fraction.
    pub const MIN: f64 = 0.1;

    /// Largest accepted fraction.
    pub const MAX: f64 = 0.5;

    /// Creates a fraction, returning error if out of range or not finite.
    pub fn try_new(value: f64) -> Result<Self, ValidationError> {
        if !value.is_finite() || !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::out_of_range(
                "test_size",
                Self::MIN,
                Self::MAX,
                value,
            ));
        }
        Ok(Self(value))
    }

    /// Returns the raw fraction.
    pub fn value(&self) -> f64 {
        self.0
    }

    /// Renders the fraction as the decimal string sent in the `test_size` form field.
    pub fn to_form_value(&self) -> String {
        self.0.to_string()
    }

    /// Whole-number percentage, as shown next to the split slider.
    pub fn as_percent(&self) -> u8 {
        (self.0 * 100.0).round() as u8
    }
}

impl Default for TestSizeFraction {
    fn default() -> Self {
        Self(0.3)
    }
}

impl TryFrom<f64> for TestSizeFraction {
    type Error = ValidationError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::try_new(value)
    }
}

impl From<TestSizeFraction> for f64 {
    fn from(fraction: TestSizeFraction) -> Self {
        fraction.0
    }
}

impl fmt::Display for TestSizeFraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.as_percent())
    }
}
