//! Foundation module - Shared domain primitives.
//!
//! Contains value objects, numeric helpers, the state machine trait and the
//! error vocabulary shared by the analysis, scenario and session modules.

mod errors;
mod rounding;
mod state_machine;
mod test_size;

pub use errors::{ErrorCode, ValidationError};
pub use rounding::{format1, format2, round2};
pub use state_machine::StateMachine;
pub use test_size::TestSizeFraction;
