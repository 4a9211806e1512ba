//! Scenario Module - Synthetic projections and their CSV export.
//!
//! # Components
//!
//! - `Scenario` / `ScenarioEntry` - One projected value per column
//! - `ScenarioGenerator` - Perturbs means by `u * std`, `u` from a `RandomSource`
//! - `CsvExporter` - Fixed two-line CSV layout and the named export artifact

mod csv_exporter;
mod generator;
mod scenario;

pub use csv_exporter::{
    CsvExporter, ExportError, ExportedArtifact, EXPORT_CONTENT_TYPE, EXPORT_FILE_NAME,
};
pub use generator::{project, ScenarioGenerator};
pub use scenario::{Scenario, ScenarioEntry};
