//! Analysis Service Adapters.
//!
//! - `HttpAnalysisService` - Multipart upload to the real service over reqwest
//! - `MockAnalysisService` - Scripted responses for tests

mod http_analysis_service;
mod mock_analysis_service;

pub use http_analysis_service::{HttpAnalysisConfig, HttpAnalysisService};
pub use mock_analysis_service::{MockAnalysisResponse, MockAnalysisService};
