//! Session-specific error types.

use thiserror::Error;

use super::status::SessionStatus;
use crate::domain::foundation::{ErrorCode, ValidationError};
use crate::domain::scenario::ExportError;
use crate::ports::AnalysisError;

/// Errors reported by session operations.
///
/// Precondition variants mean the caller invoked an operation it should not
/// have; they never change session state.
#[derive(Debug, Error)]
pub enum SessionError {
    /// No dataset file was provided.
    #[error("no dataset file selected")]
    MissingFile,

    /// Split fraction out of range.
    #[error("invalid test size: {0}")]
    InvalidTestSize(#[source] ValidationError),

    /// A submission is already in flight.
    #[error("an analysis request is already in flight")]
    SubmissionInFlight,

    /// Operation needs an analysis result and there is none.
    #[error("no analysis result available")]
    NoAnalysisResult,

    /// Operation needs a scenario and there is none.
    #[error("no scenario generated")]
    NoScenario,

    /// Transition not allowed from the current status.
    #[error("cannot {action} while {status}")]
    InvalidTransition {
        status: SessionStatus,
        action: &'static str,
    },

    /// The analysis call failed.
    #[error("analysis failed: {0}")]
    Analysis(#[from] AnalysisError),

    /// Exporting the scenario failed.
    #[error("export failed: {0}")]
    Export(#[from] ExportError),
}

impl SessionError {
    pub fn invalid_transition(status: SessionStatus, action: &'static str) -> Self {
        SessionError::InvalidTransition { status, action }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::MissingFile => ErrorCode::MissingFile,
            SessionError::InvalidTestSize(err) => err.code(),
            SessionError::SubmissionInFlight => ErrorCode::SubmissionInFlight,
            SessionError::NoAnalysisResult => ErrorCode::NoAnalysisResult,
            SessionError::NoScenario => ErrorCode::NoScenario,
            SessionError::InvalidTransition { .. } => ErrorCode::InvalidStateTransition,
            SessionError::Analysis(err) => err.code(),
            SessionError::Export(err) => err.code(),
        }
    }

    /// True for caller mistakes, as opposed to failures of the service or export.
    pub fn is_precondition_violation(&self) -> bool {
        self.code().is_precondition()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn precondition_errors_are_classified() {
        assert!(SessionError::MissingFile.is_precondition_violation());
        assert!(SessionError::NoScenario.is_precondition_violation());
        assert!(SessionError::SubmissionInFlight.is_precondition_violation());
        assert!(!SessionError::Analysis(AnalysisError::network("down")).is_precondition_violation());
        assert!(!SessionError::Export(ExportError::EmptyScenario).is_precondition_violation());
    }

    #[test]
    fn wrapped_errors_keep_their_codes() {
        let err = SessionError::from(AnalysisError::contract_violation("no stats"));
        assert_eq!(err.code(), ErrorCode::ContractViolation);

        let err = SessionError::from(ExportError::EmptyScenario);
        assert_eq!(err.code(), ErrorCode::EmptyExport);
    }

    #[test]
    fn invalid_test_size_takes_the_validation_code() {
        let err = SessionError::InvalidTestSize(ValidationError::out_of_range(
            "test_size", 0.1, 0.5, 0.7,
        ));
        assert_eq!(err.code(), ErrorCode::OutOfRange);
        assert!(err.is_precondition_violation());
    }

    #[test]
    fn invalid_transition_names_status_and_action() {
        let err = SessionError::invalid_transition(SessionStatus::Idle, "abandon submission");
        assert_eq!(err.to_string(), "cannot abandon submission while Idle");
    }
}
