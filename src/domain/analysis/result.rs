//! Analysis result aggregate as returned by the external analysis service.
//!
//! Field names on the wire are the service's (`filas_entrenamiento`, `stats`,
//! `histogramas`, ...). Maps are order-preserving: the service's JSON field
//! order is the column order everywhere downstream.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Statistics, histograms and split counts for one analyzed dataset.
///
/// # Invariants
///
/// - Never mutated after it is received; a new submission replaces it wholesale
/// - `statistics` and `histograms` iterate in service order
/// - Every available `standard_deviation` is `>= 0` (see [`AnalysisResult::normalized`])
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    #[serde(rename = "filas_entrenamiento")]
    train_row_count: u64,

    #[serde(rename = "filas_test")]
    test_row_count: u64,

    #[serde(rename = "stats")]
    statistics: IndexMap<String, ColumnStatistic>,

    #[serde(rename = "histogramas")]
    histograms: IndexMap<String, Histogram>,

    #[serde(rename = "total_filas", default, skip_serializing_if = "Option::is_none")]
    total_rows: Option<u64>,

    #[serde(rename = "columnas", default, skip_serializing_if = "Vec::is_empty")]
    columns: Vec<String>,

    #[serde(rename = "salud", default, skip_serializing_if = "Option::is_none")]
    health: Option<DatasetHealth>,
}

impl AnalysisResult {
    /// Creates a result with split counts and no columns.
    pub fn new(train_row_count: u64, test_row_count: u64) -> Self {
        Self {
            train_row_count,
            test_row_count,
            statistics: IndexMap::new(),
            histograms: IndexMap::new(),
            total_rows: None,
            columns: Vec::new(),
            health: None,
        }
    }

    /// Appends a column statistic (order of calls is iteration order).
    pub fn with_statistic(mut self, column: impl Into<String>, statistic: ColumnStatistic) -> Self {
        self.statistics.insert(column.into(), statistic);
        self
    }

    /// Appends a column histogram.
    pub fn with_histogram(mut self, column: impl Into<String>, histogram: Histogram) -> Self {
        self.histograms.insert(column.into(), histogram);
        self
    }

    /// Sets the reported dataset size and column names.
    pub fn with_dataset_shape(mut self, total_rows: u64, columns: Vec<String>) -> Self {
        self.total_rows = Some(total_rows);
        self.columns = columns;
        self
    }

    /// Sets the dataset health block.
    pub fn with_health(mut self, health: DatasetHealth) -> Self {
        self.health = Some(health);
        self
    }

    /// Degrades contract violations the consumers can live with.
    ///
    /// A negative standard deviation becomes unavailable rather than
    /// failing the whole result.
    pub fn normalized(mut self) -> Self {
        for (column, statistic) in self.statistics.iter_mut() {
            if statistic.standard_deviation.is_some_and(|std| std < 0.0) {
                tracing::warn!(column = %column, "negative standard deviation treated as unavailable");
                statistic.standard_deviation = None;
            }
        }
        self
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Rows assigned to the training split.
    pub fn train_row_count(&self) -> u64 {
        self.train_row_count
    }

    /// Rows assigned to the test split.
    pub fn test_row_count(&self) -> u64 {
        self.test_row_count
    }

    /// Per-column statistics in service order.
    pub fn statistics(&self) -> &IndexMap<String, ColumnStatistic> {
        &self.statistics
    }

    /// Per-column histograms in service order.
    pub fn histograms(&self) -> &IndexMap<String, Histogram> {
        &self.histograms
    }

    /// Total rows in the uploaded dataset, if the service reported it.
    pub fn total_rows(&self) -> Option<u64> {
        self.total_rows
    }

    /// All dataset column names, if the service reported them.
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Dataset health block, if the service reported it.
    pub fn health(&self) -> Option<&DatasetHealth> {
        self.health.as_ref()
    }
}

/// Descriptive statistics for one column.
///
/// Only `mean` and `standard_deviation` drive the dashboard; the remaining
/// fields are carried when the service sends them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ColumnStatistic {
    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    mean: Option<f64>,

    #[serde(
        rename = "std",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    standard_deviation: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    count: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    min: Option<f64>,

    #[serde(default, deserialize_with = "lenient_number", skip_serializing_if = "Option::is_none")]
    max: Option<f64>,

    #[serde(
        rename = "25%",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    lower_quartile: Option<f64>,

    #[serde(
        rename = "50%",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    median: Option<f64>,

    #[serde(
        rename = "75%",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    upper_quartile: Option<f64>,
}

impl ColumnStatistic {
    /// Creates a statistic with both driving values available.
    pub fn new(mean: f64, standard_deviation: f64) -> Self {
        Self {
            mean: Some(mean),
            standard_deviation: Some(standard_deviation),
            ..Self::default()
        }
    }

    /// Creates a statistic whose values may be unavailable.
    pub fn partial(mean: Option<f64>, standard_deviation: Option<f64>) -> Self {
        Self {
            mean,
            standard_deviation,
            ..Self::default()
        }
    }

    pub fn mean(&self) -> Option<f64> {
        self.mean
    }

    pub fn standard_deviation(&self) -> Option<f64> {
        self.standard_deviation
    }

    pub fn count(&self) -> Option<f64> {
        self.count
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    /// 25th, 50th and 75th percentiles.
    pub fn quartiles(&self) -> (Option<f64>, Option<f64>, Option<f64>) {
        (self.lower_quartile, self.median, self.upper_quartile)
    }
}

/// Binned value distribution for one column.
///
/// The service sends `n + 1` bin edges for `n` counts; each count pairs
/// with its left edge. Fewer bins than counts is a contract violation.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    bins: Vec<f64>,
    counts: Vec<u64>,
}

impl Histogram {
    pub fn new(bins: Vec<f64>, counts: Vec<u64>) -> Self {
        Self { bins, counts }
    }

    pub fn bins(&self) -> &[f64] {
        &self.bins
    }

    pub fn counts(&self) -> &[u64] {
        &self.counts
    }

    /// True when every count has a bin to pair with.
    pub fn is_well_formed(&self) -> bool {
        self.bins.len() >= self.counts.len()
    }

    /// `(bin, count)` pairs, or `None` when the histogram is malformed.
    pub fn pairs(&self) -> Option<impl Iterator<Item = (f64, u64)> + '_> {
        self.is_well_formed()
            .then(|| self.bins.iter().copied().zip(self.counts.iter().copied()))
    }
}

/// Null-value health summary computed by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetHealth {
    #[serde(rename = "nulos")]
    pub null_count: u64,

    #[serde(rename = "estado")]
    pub status: String,

    pub color: String,

    #[serde(rename = "columnas_criticas", default)]
    pub critical_columns: Vec<String>,
}

/// Accepts any JSON value; only finite numbers survive, everything else
/// (absent, `null`, strings) is unavailable.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(value.as_f64().filter(|n| n.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(value: serde_json::Value) -> Result<AnalysisResult, serde_json::Error> {
        serde_json::from_value(value)
    }

    #[test]
    fn parses_required_shape() {
        let result = parse(json!({
            "filas_entrenamiento": 80,
            "filas_test": 20,
            "stats": { "x": { "mean": 10.0, "std": 2.0 } },
            "histogramas": { "x": { "bins": [0.0, 1.0], "counts": [3] } }
        }))
        .unwrap();

        assert_eq!(result.train_row_count(), 80);
        assert_eq!(result.test_row_count(), 20);
        assert_eq!(result.statistics()["x"].mean(), Some(10.0));
        assert_eq!(result.statistics()["x"].standard_deviation(), Some(2.0));
        assert_eq!(result.histograms()["x"].counts(), &[3]);
        assert!(result.health().is_none());
    }

    #[test]
    fn preserves_service_column_order() {
        let body = r#"{
            "filas_entrenamiento": 1, "filas_test": 1,
            "stats": {
                "zeta": {"mean": 1, "std": 0},
                "alpha": {"mean": 2, "std": 0},
                "mid": {"mean": 3, "std": 0}
            },
            "histogramas": {}
        }"#;
        let result: AnalysisResult = serde_json::from_str(body).unwrap();
        let keys: Vec<&str> = result.statistics().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["zeta", "alpha", "mid"]);
    }

    #[test]
    fn missing_required_field_is_rejected() {
        let result = parse(json!({
            "filas_entrenamiento": 80,
            "stats": {},
            "histogramas": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn type_mismatch_is_rejected() {
        let result = parse(json!({
            "filas_entrenamiento": "eighty",
            "filas_test": 20,
            "stats": {},
            "histogramas": {}
        }));
        assert!(result.is_err());
    }

    #[test]
    fn non_numeric_statistics_are_unavailable() {
        let result = parse(json!({
            "filas_entrenamiento": 1,
            "filas_test": 1,
            "stats": {
                "a": { "mean": null, "std": "n/a" },
                "b": { "count": 4 }
            },
            "histogramas": {}
        }))
        .unwrap();

        assert_eq!(result.statistics()["a"].mean(), None);
        assert_eq!(result.statistics()["a"].standard_deviation(), None);
        assert_eq!(result.statistics()["b"].mean(), None);
        assert_eq!(result.statistics()["b"].count(), Some(4.0));
    }

    #[test]
    fn descriptive_fields_are_carried() {
        let result = parse(json!({
            "filas_entrenamiento": 1,
            "filas_test": 1,
            "stats": {
                "a": { "mean": 5, "std": 1, "min": 1, "max": 9, "25%": 3, "50%": 5, "75%": 7 }
            },
            "histogramas": {}
        }))
        .unwrap();

        let stat = &result.statistics()["a"];
        assert_eq!(stat.min(), Some(1.0));
        assert_eq!(stat.max(), Some(9.0));
        assert_eq!(stat.quartiles(), (Some(3.0), Some(5.0), Some(7.0)));
    }

    #[test]
    fn optional_service_blocks_are_parsed() {
        let result = parse(json!({
            "total_filas": 100,
            "filas_entrenamiento": 70,
            "filas_test": 30,
            "columnas": ["a", "b"],
            "stats": {},
            "histogramas": {},
            "salud": {
                "nulos": 3,
                "estado": "Advertencia",
                "color": "#FFBB28",
                "columnas_criticas": ["b"]
            }
        }))
        .unwrap();

        assert_eq!(result.total_rows(), Some(100));
        assert_eq!(result.columns(), &["a".to_string(), "b".to_string()]);
        let health = result.health().unwrap();
        assert_eq!(health.null_count, 3);
        assert_eq!(health.status, "Advertencia");
        assert_eq!(health.critical_columns, vec!["b".to_string()]);
    }

    #[test]
    fn normalized_drops_negative_standard_deviation() {
        let result = AnalysisResult::new(1, 1)
            .with_statistic("a", ColumnStatistic::new(1.0, -0.5))
            .with_statistic("b", ColumnStatistic::new(1.0, 0.5))
            .normalized();

        assert_eq!(result.statistics()["a"].standard_deviation(), None);
        assert_eq!(result.statistics()["a"].mean(), Some(1.0));
        assert_eq!(result.statistics()["b"].standard_deviation(), Some(0.5));
    }

    #[test]
    fn histogram_pairs_counts_with_left_edges() {
        let histogram = Histogram::new(vec![0.0, 1.0, 2.0], vec![4, 6]);
        let pairs: Vec<_> = histogram.pairs().unwrap().collect();
        assert_eq!(pairs, vec![(0.0, 4), (1.0, 6)]);
    }

    #[test]
    fn histogram_with_fewer_bins_than_counts_is_malformed() {
        let histogram = Histogram::new(vec![0.0], vec![4, 6]);
        assert!(!histogram.is_well_formed());
        assert!(histogram.pairs().is_none());
    }
}
