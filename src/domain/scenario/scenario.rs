//! Scenario value types.

use serde::Serialize;

use crate::domain::analysis::UNAVAILABLE;
use crate::domain::foundation::{format2, round2};

/// One synthetic projection of every analyzed column.
///
/// A snapshot: it copies names and values out of the statistics it was
/// generated from and never refers back to the analysis result.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Scenario {
    entries: Vec<ScenarioEntry>,
}

impl Scenario {
    pub fn new(entries: Vec<ScenarioEntry>) -> Self {
        Self { entries }
    }

    /// Entries in statistics order.
    pub fn entries(&self) -> &[ScenarioEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entry(&self, variable_name: &str) -> Option<&ScenarioEntry> {
        self.entries
            .iter()
            .find(|entry| entry.variable_name == variable_name)
    }

    /// Looks up the projection for a column; `None` if the column is absent
    /// or its projection is unavailable.
    pub fn value_of(&self, variable_name: &str) -> Option<f64> {
        self.entry(variable_name)
            .and_then(|entry| entry.projected_value)
    }
}

/// Projected value for one column, rounded to 2 decimals.
///
/// `projected_value` is `None` when the column's mean was unavailable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioEntry {
    pub variable_name: String,
    pub projected_value: Option<f64>,
}

impl ScenarioEntry {
    /// Creates an entry, rounding the value to 2 decimals.
    pub fn new(variable_name: impl Into<String>, projected_value: f64) -> Self {
        Self {
            variable_name: variable_name.into(),
            projected_value: Some(round2(projected_value)),
        }
    }

    /// Entry for a column that could not be projected.
    pub fn unavailable(variable_name: impl Into<String>) -> Self {
        Self {
            variable_name: variable_name.into(),
            projected_value: None,
        }
    }

    pub fn is_available(&self) -> bool {
        self.projected_value.is_some()
    }

    /// Fixed 2-decimal rendering used by the scenario cards and the CSV
    /// export, `N/A` when unavailable.
    pub fn display_value(&self) -> String {
        self.projected_value
            .map(format2)
            .unwrap_or_else(|| UNAVAILABLE.to_string())
    }
}
