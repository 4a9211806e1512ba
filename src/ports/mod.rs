//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `AnalysisService` - The external dataset analysis call
//! - `RandomSource` - Uniform draws used by scenario generation

mod analysis_service;
mod random_source;

pub use analysis_service::{AnalysisError, AnalysisRequest, AnalysisService, DatasetFile};
pub use random_source::RandomSource;
