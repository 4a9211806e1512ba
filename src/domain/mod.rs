//! Domain layer containing the dashboard's business logic and types.
//!
//! # Module Organization
//!
//! - `foundation` - Shared primitives (value objects, rounding, errors, state machine)
//! - `analysis` - Analysis result and its chart-ready views
//! - `scenario` - Stochastic scenario generation and CSV export
//! - `session` - Session state, status machine and reducer

pub mod analysis;
pub mod foundation;
pub mod scenario;
pub mod session;
