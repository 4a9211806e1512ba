//! Session Module - Lifecycle of one dashboard analysis session.
//!
//! The state is a plain value; [`SessionState::apply`] is the only way to
//! move between statuses. Stale responses are filtered by
//! [`SubmissionGeneration`].

mod errors;
mod state;
mod status;

pub use errors::SessionError;
pub use state::{SessionEvent, SessionState, SubmissionGeneration};
pub use status::SessionStatus;
