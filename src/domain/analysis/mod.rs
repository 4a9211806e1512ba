//! Analysis Module - The analysis service's result and its presentation views.
//!
//! # Components
//!
//! - `AnalysisResult` - Immutable payload of one successful submission
//! - `ResultAdapter` - Pure transformations into split, overview, statistics,
//!   histogram and health views
//!
//! No ports or adapters are needed here: everything is a pure function of
//! the received result.

mod adapter;
mod result;

pub use adapter::{
    DatasetOverview, HealthView, HistogramBar, ResultAdapter, SplitView, StatisticsRow,
    TEST_LABEL, TRAIN_LABEL, UNAVAILABLE,
};
pub use result::{AnalysisResult, ColumnStatistic, DatasetHealth, Histogram};
