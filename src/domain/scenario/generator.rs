//! Scenario Generator - Stochastic perturbation of column means.
//!
//! Each column is projected to `mean + u * std` with `u` drawn uniformly
//! from `(-1, 1)`, so every projection lands strictly within one standard
//! deviation of the mean (before rounding).

use indexmap::IndexMap;

use super::scenario::{Scenario, ScenarioEntry};
use crate::domain::analysis::ColumnStatistic;
use crate::ports::RandomSource;

/// Produces scenarios from column statistics using an injected random source.
pub struct ScenarioGenerator {
    source: Box<dyn RandomSource>,
}

impl ScenarioGenerator {
    pub fn new(source: Box<dyn RandomSource>) -> Self {
        Self { source }
    }

    /// Generates one scenario, one entry per column in statistics order.
    ///
    /// # Edge Cases
    /// - Empty statistics: empty scenario
    /// - Unavailable standard deviation: zero spread (projection equals the mean)
    /// - Unavailable mean: unavailable entry, no draw consumed
    pub fn generate(&mut self, statistics: &IndexMap<String, ColumnStatistic>) -> Scenario {
        let entries = statistics
            .iter()
            .map(|(name, statistic)| {
                let Some(mean) = statistic.mean() else {
                    tracing::warn!(column = %name, "mean unavailable, projection marked unavailable");
                    return ScenarioEntry::unavailable(name.clone());
                };
                let spread = statistic.standard_deviation().unwrap_or(0.0);
                let offset = self.source.next_offset();
                ScenarioEntry::new(name.clone(), project(mean, spread, offset))
            })
            .collect();

        Scenario::new(entries)
    }
}

/// Unrounded projection of one column.
pub fn project(mean: f64, standard_deviation: f64, offset: f64) -> f64 {
    mean + offset * standard_deviation
}
