//! CSV Exporter - Two-line CSV rendering of a scenario.
//!
//! Layout (unavailable projections render as `N/A`):
//!
//! ```text
//! edad,altura,peso
//! 35.12,1.71,70.04
//! ```
//!
//! Variable names are written as-is. No quoting or escaping is applied, so a
//! column name containing `,` or a line break produces a corrupt file.

use std::io;
use std::path::{Path, PathBuf};

use csv::{QuoteStyle, Terminator, WriterBuilder};
use thiserror::Error;

use super::scenario::Scenario;
use crate::domain::foundation::ErrorCode;

/// Fixed download name of the exported scenario.
pub const EXPORT_FILE_NAME: &str = "simulacion_proyectada.csv";

/// MIME type of the exported scenario.
pub const EXPORT_CONTENT_TYPE: &str = "text/csv; charset=utf-8";

/// Export failures.
#[derive(Debug, Error)]
pub enum ExportError {
    /// The scenario has no entries; there is nothing useful to export.
    #[error("scenario has no entries to export")]
    EmptyScenario,

    /// The CSV writer failed.
    #[error("failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    /// Writing the artifact to disk failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ExportError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ExportError::EmptyScenario => ErrorCode::EmptyExport,
            ExportError::Csv(_) | ExportError::Io { .. } => ErrorCode::ExportFailed,
        }
    }
}

/// A named, downloadable export. Triggering the download is the caller's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportedArtifact {
    pub file_name: String,
    pub content_type: String,
    pub content: String,
}

impl ExportedArtifact {
    /// Writes the artifact under its file name inside `dir`.
    pub fn write_to_dir(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let path = dir.join(&self.file_name);
        std::fs::write(&path, self.content.as_bytes()).map_err(|source| ExportError::Io {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }
}

/// Serializes scenarios to the fixed CSV layout.
pub struct CsvExporter;

impl CsvExporter {
    /// Renders the scenario: names on line 1, 2-decimal values on line 2,
    /// newline after each line.
    ///
    /// Pure: the same scenario always renders to the same bytes.
    pub fn to_csv(scenario: &Scenario) -> Result<String, ExportError> {
        if scenario.is_empty() {
            return Err(ExportError::EmptyScenario);
        }

        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Never)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(Vec::new());

        writer.write_record(scenario.entries().iter().map(|e| e.variable_name.as_str()))?;
        writer.write_record(scenario.entries().iter().map(|e| e.display_value()))?;

        let bytes = writer
            .into_inner()
            .map_err(|e| ExportError::Csv(csv::Error::from(e.into_error())))?;
        String::from_utf8(bytes).map_err(|e| {
            ExportError::Csv(csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
        })
    }

    /// Renders the scenario and wraps it in the fixed-name artifact.
    pub fn export(scenario: &Scenario) -> Result<ExportedArtifact, ExportError> {
        Ok(ExportedArtifact {
            file_name: EXPORT_FILE_NAME.to_string(),
            content_type: EXPORT_CONTENT_TYPE.to_string(),
            content: Self::to_csv(scenario)?,
        })
    }
}
