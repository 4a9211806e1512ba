//! Session state and its reducer.
//!
//! Every change to the session goes through [`SessionState::apply`], a pure
//! function of `(state, event)`. The application layer performs I/O and
//! feeds outcomes back in as events.

use std::fmt;
use std::sync::Arc;

use super::errors::SessionError;
use super::status::SessionStatus;
use crate::domain::analysis::AnalysisResult;
use crate::domain::foundation::StateMachine;
use crate::domain::scenario::Scenario;
use crate::ports::AnalysisError;

/// Monotonic tag identifying one submission.
///
/// Bumped whenever a submission starts or is abandoned. A response tagged
/// with anything but the current generation is stale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct SubmissionGeneration(u64);

impl SubmissionGeneration {
    pub fn value(&self) -> u64 {
        self.0
    }

    fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for SubmissionGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Inputs to the reducer.
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// A new submission is about to be sent.
    SubmissionStarted,
    /// The in-flight submission was superseded; its response will be stale.
    SubmissionAbandoned,
    /// The service answered successfully.
    SubmissionSucceeded {
        generation: SubmissionGeneration,
        result: AnalysisResult,
    },
    /// The call failed in transport or returned a malformed body.
    SubmissionFailed {
        generation: SubmissionGeneration,
        error: AnalysisError,
    },
    /// A fresh scenario replaces any previous one.
    ScenarioGenerated(Scenario),
    /// The user acknowledged the failure notification.
    ErrorDismissed,
}

/// Snapshot of the whole session.
///
/// # Invariants
///
/// - `result` is present iff status is `Analyzed` or `Simulated`
/// - `scenario` is present iff status is `Simulated`
/// - `failure` is present iff status is `Error`
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    status: SessionStatus,
    generation: SubmissionGeneration,
    result: Option<Arc<AnalysisResult>>,
    scenario: Option<Scenario>,
    failure: Option<AnalysisError>,
}

impl SessionState {
    /// A fresh, idle session.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn generation(&self) -> SubmissionGeneration {
        self.generation
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.result.as_deref()
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.scenario.as_ref()
    }

    /// Cause of the last failed submission, until dismissed or superseded.
    pub fn failure(&self) -> Option<&AnalysisError> {
        self.failure.as_ref()
    }

    /// True if a response tagged `generation` may still be applied.
    pub fn is_current(&self, generation: SubmissionGeneration) -> bool {
        self.generation == generation
    }

    /// Computes the state that follows `event`.
    ///
    /// A response for a stale generation yields an unchanged state.
    ///
    /// # Errors
    ///
    /// - `SubmissionInFlight` when starting while `Submitting`
    /// - `NoAnalysisResult` when generating without a result
    /// - `InvalidTransition` for any other disallowed event
    pub fn apply(&self, event: SessionEvent) -> Result<SessionState, SessionError> {
        match event {
            SessionEvent::SubmissionStarted => {
                if self.status.is_busy() {
                    return Err(SessionError::SubmissionInFlight);
                }
                let status = self.transition(SessionStatus::Submitting, "start submission")?;
                Ok(SessionState {
                    status,
                    generation: self.generation.next(),
                    result: None,
                    scenario: None,
                    failure: None,
                })
            }
            SessionEvent::SubmissionAbandoned => {
                if !self.status.is_busy() {
                    return Err(SessionError::invalid_transition(self.status, "abandon submission"));
                }
                let status = self.transition(SessionStatus::Idle, "abandon submission")?;
                Ok(SessionState {
                    status,
                    generation: self.generation.next(),
                    ..SessionState::default()
                })
            }
            SessionEvent::SubmissionSucceeded { generation, result } => {
                if !self.is_current(generation) {
                    return Ok(self.clone());
                }
                let status = self.transition(SessionStatus::Analyzed, "apply analysis result")?;
                Ok(SessionState {
                    status,
                    generation: self.generation,
                    result: Some(Arc::new(result)),
                    scenario: None,
                    failure: None,
                })
            }
            SessionEvent::SubmissionFailed { generation, error } => {
                if !self.is_current(generation) {
                    return Ok(self.clone());
                }
                let status = self.transition(SessionStatus::Error, "record analysis failure")?;
                Ok(SessionState {
                    status,
                    generation: self.generation,
                    result: None,
                    scenario: None,
                    failure: Some(error),
                })
            }
            SessionEvent::ScenarioGenerated(scenario) => {
                if !self.status.has_result() {
                    return Err(SessionError::NoAnalysisResult);
                }
                let status = self.transition(SessionStatus::Simulated, "store scenario")?;
                Ok(SessionState {
                    status,
                    generation: self.generation,
                    result: self.result.clone(),
                    scenario: Some(scenario),
                    failure: None,
                })
            }
            SessionEvent::ErrorDismissed => {
                if self.status != SessionStatus::Error {
                    return Err(SessionError::invalid_transition(self.status, "dismiss error"));
                }
                let status = self.transition(SessionStatus::Idle, "dismiss error")?;
                Ok(SessionState {
                    status,
                    generation: self.generation,
                    ..SessionState::default()
                })
            }
        }
    }

    fn transition(
        &self,
        target: SessionStatus,
        action: &'static str,
    ) -> Result<SessionStatus, SessionError> {
        self.status
            .transition_to(target)
            .map_err(|_| SessionError::invalid_transition(self.status, action))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::analysis::ColumnStatistic;
    use crate::domain::scenario::ScenarioEntry;

    fn result(train: u64) -> AnalysisResult {
        AnalysisResult::new(train, 10).with_statistic("x", ColumnStatistic::new(1.0, 1.0))
    }

    fn scenario() -> Scenario {
        Scenario::new(vec![ScenarioEntry::new("x", 1.5)])
    }

    fn analyzed() -> SessionState {
        let submitting = SessionState::new().apply(SessionEvent::SubmissionStarted).unwrap();
        let generation = submitting.generation();
        submitting
            .apply(SessionEvent::SubmissionSucceeded {
                generation,
                result: result(90),
            })
            .unwrap()
    }

    #[test]
    fn new_state_is_idle_and_empty() {
        let state = SessionState::new();
        assert_eq!(state.status(), SessionStatus::Idle);
        assert_eq!(state.generation().value(), 0);
        assert!(state.result().is_none());
        assert!(state.scenario().is_none());
        assert!(state.failure().is_none());
    }

    #[test]
    fn start_bumps_generation() {
        let state = SessionState::new().apply(SessionEvent::SubmissionStarted).unwrap();
        assert_eq!(state.status(), SessionStatus::Submitting);
        assert_eq!(state.generation().value(), 1);
    }

    #[test]
    fn start_while_submitting_is_rejected() {
        let state = SessionState::new().apply(SessionEvent::SubmissionStarted).unwrap();
        let err = state.apply(SessionEvent::SubmissionStarted).unwrap_err();
        assert!(matches!(err, SessionError::SubmissionInFlight));
    }

    #[test]
    fn success_stores_result() {
        let state = analyzed();
        assert_eq!(state.status(), SessionStatus::Analyzed);
        assert_eq!(state.result().unwrap().train_row_count(), 90);
    }

    #[test]
    fn failure_records_cause_without_result() {
        let submitting = SessionState::new().apply(SessionEvent::SubmissionStarted).unwrap();
        let state = submitting
            .apply(SessionEvent::SubmissionFailed {
                generation: submitting.generation(),
                error: AnalysisError::network("refused"),
            })
            .unwrap();

        assert_eq!(state.status(), SessionStatus::Error);
        assert!(state.result().is_none());
        assert_eq!(state.failure(), Some(&AnalysisError::network("refused")));
    }

    #[test]
    fn new_submission_clears_result_and_scenario() {
        let simulated = analyzed()
            .apply(SessionEvent::ScenarioGenerated(scenario()))
            .unwrap();

        let state = simulated.apply(SessionEvent::SubmissionStarted).unwrap();

        assert_eq!(state.status(), SessionStatus::Submitting);
        assert!(state.result().is_none());
        assert!(state.scenario().is_none());
    }

    #[test]
    fn stale_success_is_ignored() {
        let first = SessionState::new().apply(SessionEvent::SubmissionStarted).unwrap();
        let stale = first.generation();
        let idle = first.apply(SessionEvent::SubmissionAbandoned).unwrap();
        let second = idle.apply(SessionEvent::SubmissionStarted).unwrap();

        let state = second
            .apply(SessionEvent::SubmissionSucceeded {
                generation: stale,
                result: result(1),
            })
            .unwrap();

        assert_eq!(state.status(), SessionStatus::Submitting);
        assert!(state.result().is_none());
        assert!(!state.is_current(stale));
    }

    #[test]
    fn stale_failure_is_ignored() {
        let first = analyzed();
        let stale = first.generation();
        let second = first.apply(SessionEvent::SubmissionStarted).unwrap();

        let state = second
            .apply(SessionEvent::SubmissionFailed {
                generation: stale,
                error: AnalysisError::network("late"),
            })
            .unwrap();

        assert_eq!(state.status(), SessionStatus::Submitting);
        assert!(state.failure().is_none());
    }

    #[test]
    fn duplicate_resolution_is_rejected() {
        let state = analyzed();
        let err = state
            .apply(SessionEvent::SubmissionSucceeded {
                generation: state.generation(),
                result: result(5),
            })
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
    }

    #[test]
    fn abandon_returns_to_idle_and_invalidates_generation() {
        let submitting = SessionState::new().apply(SessionEvent::SubmissionStarted).unwrap();
        let state = submitting.apply(SessionEvent::SubmissionAbandoned).unwrap();

        assert_eq!(state.status(), SessionStatus::Idle);
        assert!(!state.is_current(submitting.generation()));
    }

    #[test]
    fn abandon_requires_submission_in_flight() {
        let err = SessionState::new()
            .apply(SessionEvent::SubmissionAbandoned)
            .unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
    }

    #[test]
    fn scenario_requires_result() {
        let err = SessionState::new()
            .apply(SessionEvent::ScenarioGenerated(scenario()))
            .unwrap_err();
        assert!(matches!(err, SessionError::NoAnalysisResult));
    }

    #[test]
    fn scenario_regeneration_replaces_previous() {
        let first = analyzed()
            .apply(SessionEvent::ScenarioGenerated(scenario()))
            .unwrap();
        let replacement = Scenario::new(vec![ScenarioEntry::new("x", 0.25)]);

        let state = first
            .apply(SessionEvent::ScenarioGenerated(replacement.clone()))
            .unwrap();

        assert_eq!(state.status(), SessionStatus::Simulated);
        assert_eq!(state.scenario(), Some(&replacement));
        assert_eq!(state.result().unwrap().train_row_count(), 90);
    }

    #[test]
    fn dismiss_clears_failure() {
        let submitting = SessionState::new().apply(SessionEvent::SubmissionStarted).unwrap();
        let failed = submitting
            .apply(SessionEvent::SubmissionFailed {
                generation: submitting.generation(),
                error: AnalysisError::Timeout { timeout_secs: 1 },
            })
            .unwrap();

        let state = failed.apply(SessionEvent::ErrorDismissed).unwrap();

        assert_eq!(state.status(), SessionStatus::Idle);
        assert!(state.failure().is_none());
        assert_eq!(state.generation(), failed.generation());
    }

    #[test]
    fn dismiss_outside_error_is_rejected() {
        let err = analyzed().apply(SessionEvent::ErrorDismissed).unwrap_err();
        assert!(matches!(err, SessionError::InvalidTransition { .. }));
    }
}
