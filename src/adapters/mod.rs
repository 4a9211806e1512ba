//! Adapters - Implementations of port interfaces.
//!
//! - `analysis` - HTTP and mock implementations of `AnalysisService`
//! - `random` - OS-seeded and scripted implementations of `RandomSource`

pub mod analysis;
pub mod random;

pub use analysis::{HttpAnalysisConfig, HttpAnalysisService, MockAnalysisService};
pub use random::{FixedRandomSource, UniformRandomSource};
