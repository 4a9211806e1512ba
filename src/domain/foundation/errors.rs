//! Error types for the domain layer.

use std::fmt;
use thiserror::Error;

/// Errors that occur during value object construction.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("Field '{field}' cannot be empty")]
    EmptyField { field: String },

    #[error("Field '{field}' must be between {min} and {max}, got {actual}")]
    OutOfRange {
        field: String,
        min: f64,
        max: f64,
        actual: f64,
    },

    #[error("Field '{field}' has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

impl ValidationError {
    /// Creates an empty field validation error.
    pub fn empty_field(field: impl Into<String>) -> Self {
        ValidationError::EmptyField { field: field.into() }
    }

    /// Creates an out of range validation error.
    pub fn out_of_range(field: impl Into<String>, min: f64, max: f64, actual: f64) -> Self {
        ValidationError::OutOfRange {
            field: field.into(),
            min,
            max,
            actual,
        }
    }

    /// Creates an invalid format validation error.
    pub fn invalid_format(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ValidationError::InvalidFormat {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Classification for the presentation layer.
    pub fn code(&self) -> ErrorCode {
        match self {
            ValidationError::OutOfRange { .. } => ErrorCode::OutOfRange,
            ValidationError::EmptyField { .. } | ValidationError::InvalidFormat { .. } => {
                ErrorCode::ValidationFailed
            }
        }
    }
}

/// Error codes organized by category.
///
/// Every error surfaced to the presentation layer maps onto one of these,
/// so the caller can pick a notification style without matching on
/// concrete error types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Precondition violations
    ValidationFailed,
    MissingFile,
    OutOfRange,
    SubmissionInFlight,
    NoAnalysisResult,
    NoScenario,
    InvalidStateTransition,

    // External analysis failures
    TransportFailure,
    ContractViolation,

    // Export failures
    EmptyExport,
    ExportFailed,
}

impl ErrorCode {
    /// Returns true for caller mistakes (operation invoked in the wrong state
    /// or with bad arguments), as opposed to failures of the outside world.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            ErrorCode::ValidationFailed
                | ErrorCode::MissingFile
                | ErrorCode::OutOfRange
                | ErrorCode::SubmissionInFlight
                | ErrorCode::NoAnalysisResult
                | ErrorCode::NoScenario
                | ErrorCode::InvalidStateTransition
        )
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::MissingFile => "MISSING_FILE",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::SubmissionInFlight => "SUBMISSION_IN_FLIGHT",
            ErrorCode::NoAnalysisResult => "NO_ANALYSIS_RESULT",
            ErrorCode::NoScenario => "NO_SCENARIO",
            ErrorCode::InvalidStateTransition => "INVALID_STATE_TRANSITION",
            ErrorCode::TransportFailure => "TRANSPORT_FAILURE",
            ErrorCode::ContractViolation => "CONTRACT_VIOLATION",
            ErrorCode::EmptyExport => "EMPTY_EXPORT",
            ErrorCode::ExportFailed => "EXPORT_FAILED",
        };
        write!(f, "{}", s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_empty_field_displays_correctly() {
        let err = ValidationError::empty_field("file_name");
        assert_eq!(format!("{}", err), "Field 'file_name' cannot be empty");
    }

    #[test]
    fn validation_error_out_of_range_displays_correctly() {
        let err = ValidationError::out_of_range("test_size", 0.1, 0.5, 0.6);
        assert_eq!(
            format!("{}", err),
            "Field 'test_size' must be between 0.1 and 0.5, got 0.6"
        );
    }

    #[test]
    fn validation_error_invalid_format_displays_correctly() {
        let err = ValidationError::invalid_format("state_transition", "Idle to Simulated");
        assert_eq!(
            format!("{}", err),
            "Field 'state_transition' has invalid format: Idle to Simulated"
        );
    }

    #[test]
    fn validation_errors_map_onto_codes() {
        assert_eq!(
            ValidationError::empty_field("file_name").code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            ValidationError::invalid_format("status", "bad").code(),
            ErrorCode::ValidationFailed
        );
        assert_eq!(
            ValidationError::out_of_range("test_size", 0.1, 0.5, 0.9).code(),
            ErrorCode::OutOfRange
        );
        assert!(ValidationError::empty_field("file_name").code().is_precondition());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::TransportFailure), "TRANSPORT_FAILURE");
        assert_eq!(format!("{}", ErrorCode::EmptyExport), "EMPTY_EXPORT");
        assert_eq!(format!("{}", ErrorCode::ValidationFailed), "VALIDATION_FAILED");
    }

    #[test]
    fn precondition_codes_are_classified() {
        assert!(ErrorCode::MissingFile.is_precondition());
        assert!(ErrorCode::NoScenario.is_precondition());
        assert!(!ErrorCode::TransportFailure.is_precondition());
        assert!(!ErrorCode::ContractViolation.is_precondition());
        assert!(!ErrorCode::EmptyExport.is_precondition());
    }
}
