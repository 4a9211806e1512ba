//! SessionStatus enum for tracking the analysis session lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::StateMachine;

/// Lifecycle status of an analysis session.
///
/// Valid transitions:
/// - Idle -> Submitting
/// - Submitting -> Analyzed | Error | Idle (abandoned)
/// - Analyzed -> Submitting | Simulated
/// - Simulated -> Submitting | Simulated (regenerated)
/// - Error -> Submitting | Idle (dismissed)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    #[default]
    Idle,
    Submitting,
    Analyzed,
    Simulated,
    Error,
}

impl SessionStatus {
    /// Returns true while a request is in flight.
    pub fn is_busy(&self) -> bool {
        matches!(self, SessionStatus::Submitting)
    }

    /// Returns true if an analysis result is available.
    pub fn has_result(&self) -> bool {
        matches!(self, SessionStatus::Analyzed | SessionStatus::Simulated)
    }
}

impl StateMachine for SessionStatus {
    fn can_transition_to(&self, target: &Self) -> bool {
        use SessionStatus::*;
        matches!(
            (self, target),
            (Idle, Submitting)
                | (Submitting, Analyzed)
                | (Submitting, Error)
                | (Submitting, Idle)
                | (Analyzed, Submitting)
                | (Analyzed, Simulated)
                | (Simulated, Submitting)
                | (Simulated, Simulated)
                | (Error, Submitting)
                | (Error, Idle)
        )
    }

    fn valid_transitions(&self) -> Vec<Self> {
        use SessionStatus::*;
        match self {
            Idle => vec![Submitting],
            Submitting => vec![Analyzed, Error, Idle],
            Analyzed => vec![Submitting, Simulated],
            Simulated => vec![Submitting, Simulated],
            Error => vec![Submitting, Idle],
        }
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SessionStatus::Idle => "Idle",
            SessionStatus::Submitting => "Submitting",
            SessionStatus::Analyzed => "Analyzed",
            SessionStatus::Simulated => "Simulated",
            SessionStatus::Error => "Error",
        };
        write!(f, "{}", s)
    }
}
