//! Analysis service configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;
use crate::adapters::HttpAnalysisConfig;

/// Longest accepted request timeout.
const MAX_TIMEOUT_SECS: u64 = 600;

/// Where and how to reach the analysis service
#[derive(Debug, Clone, Deserialize)]
pub struct AnalysisServiceConfig {
    /// Base URL, e.g. `http://localhost:8000`
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl AnalysisServiceConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Settings for the HTTP adapter.
    pub fn to_http_config(&self) -> HttpAnalysisConfig {
        HttpAnalysisConfig::new(self.base_url.clone()).with_timeout(self.timeout())
    }

    /// Validate analysis service configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.base_url.trim().is_empty() {
            return Err(ValidationError::MissingRequired("analysis.base_url"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl);
        }
        if self.timeout_secs == 0 || self.timeout_secs > MAX_TIMEOUT_SECS {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_timeout() -> u64 {
    60
}
