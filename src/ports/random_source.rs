//! Random Source Port - Uniform draws for scenario perturbation.
//!
//! Scenario generation never reaches for a global generator; it draws from
//! whatever source the session was wired with, so tests can script the draws.

/// Source of independent uniform draws on the open interval `(-1, 1)`.
pub trait RandomSource: Send {
    /// Returns the next draw. Implementations must never return `-1.0` or `1.0`.
    fn next_offset(&mut self) -> f64;
}
