//! Result Adapter - Chart-ready views over an analysis result.
//!
//! Every function here is pure: same result in, same views out. Missing or
//! malformed pieces of the payload degrade to explicit placeholders or empty
//! views instead of failing the whole display.

use serde::Serialize;

use super::result::{AnalysisResult, ColumnStatistic};
use crate::domain::foundation::{format1, format2};

/// Legend label for the training split slice.
pub const TRAIN_LABEL: &str = "Entrenamiento";

/// Legend label for the test split slice.
pub const TEST_LABEL: &str = "Prueba (Test)";

/// Placeholder rendered in place of a mean or standard deviation the service
/// did not provide.
pub const UNAVAILABLE: &str = "N/A";

/// Two-slice breakdown of the train/test split, raw counts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitView {
    pub train_label: &'static str,
    pub train_value: u64,
    pub test_label: &'static str,
    pub test_value: u64,
}

impl SplitView {
    /// Share of rows in the test split, `0.0` when both splits are empty.
    pub fn test_share(&self) -> f64 {
        let total = self.train_value + self.test_value;
        if total == 0 {
            return 0.0;
        }
        self.test_value as f64 / total as f64
    }
}

/// One row of the base statistics table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatisticsRow {
    pub name: String,
    pub mean_display: String,
    pub std_display: String,
}

/// One bar of the distribution chart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistogramBar {
    pub label: String,
    pub frequency: u64,
}

/// Size and shape of the uploaded dataset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DatasetOverview {
    pub total_rows: u64,
    pub columns: Vec<String>,
}

impl DatasetOverview {
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }
}

/// Dataset health badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HealthView {
    pub status: String,
    pub color: String,
    pub null_count: u64,
    pub critical_columns: Vec<String>,
}

impl HealthView {
    /// True when the service found no null values at all.
    pub fn is_clean(&self) -> bool {
        self.null_count == 0
    }
}

/// Stateless transformations from [`AnalysisResult`] to presentation views.
pub struct ResultAdapter;

impl ResultAdapter {
    /// Split-ratio pie data. Counts pass through unnormalized.
    pub fn to_split_view(result: &AnalysisResult) -> SplitView {
        SplitView {
            train_label: TRAIN_LABEL,
            train_value: result.train_row_count(),
            test_label: TEST_LABEL,
            test_value: result.test_row_count(),
        }
    }

    /// One row per statistics column, in service order.
    pub fn to_statistics_table(result: &AnalysisResult) -> Vec<StatisticsRow> {
        result
            .statistics()
            .iter()
            .map(|(name, statistic)| Self::statistics_row(name, statistic))
            .collect()
    }

    /// Bars for the histogram selected by [`ResultAdapter::first_histogram_column`].
    ///
    /// # Edge Cases
    /// - No histograms: empty
    /// - Selected column has zero counts: empty
    /// - Selected column has fewer bins than counts: empty (logged)
    pub fn to_histogram_view(result: &AnalysisResult) -> Vec<HistogramBar> {
        let Some(column) = Self::first_histogram_column(result) else {
            return Vec::new();
        };
        let histogram = &result.histograms()[column];

        match histogram.pairs() {
            Some(pairs) => pairs
                .map(|(bin, count)| HistogramBar {
                    label: format1(bin),
                    frequency: count,
                })
                .collect(),
            None => {
                tracing::warn!(
                    column = %column,
                    bins = histogram.bins().len(),
                    counts = histogram.counts().len(),
                    "histogram has fewer bins than counts, not rendering"
                );
                Vec::new()
            }
        }
    }

    /// The column whose histogram is displayed: the first key in service order.
    ///
    /// Only one histogram is shown at a time and the choice is not user-selectable.
    pub fn first_histogram_column(result: &AnalysisResult) -> Option<&str> {
        result.histograms().keys().next().map(String::as_str)
    }

    /// Row total and column names.
    ///
    /// The total falls back to train + test rows when the service omits it.
    /// Columns fall back to the statistics keys when none are listed.
    pub fn to_dataset_overview(result: &AnalysisResult) -> DatasetOverview {
        let total_rows = result
            .total_rows()
            .unwrap_or(result.train_row_count() + result.test_row_count());
        let columns = if result.columns().is_empty() {
            result.statistics().keys().cloned().collect()
        } else {
            result.columns().to_vec()
        };
        DatasetOverview {
            total_rows,
            columns,
        }
    }

    /// Health badge, when the service reported one.
    pub fn to_health_view(result: &AnalysisResult) -> Option<HealthView> {
        result.health().map(|health| HealthView {
            status: health.status.clone(),
            color: health.color.clone(),
            null_count: health.null_count,
            critical_columns: health.critical_columns.clone(),
        })
    }

    fn statistics_row(name: &str, statistic: &ColumnStatistic) -> StatisticsRow {
        StatisticsRow {
            name: name.to_string(),
            mean_display: display_or_unavailable(statistic.mean()),
            std_display: display_or_unavailable(statistic.standard_deviation()),
        }
    }
}

fn display_or_unavailable(value: Option<f64>) -> String {
    value.map(format2).unwrap_or_else(|| UNAVAILABLE.to_string())
}
