//! Analysis Service Port - Interface to the external dataset analysis service.
//!
//! The service computes means, standard deviations, histograms and the
//! train/test row split for an uploaded dataset. This port hides the
//! transport so the session can be driven by an HTTP client in production
//! and by a scripted mock in tests.
//!
//! # Example
//!
//! ```ignore
//! let request = AnalysisRequest::new(DatasetFile::new("iris.csv", bytes)?, fraction);
//! let result = service.analyze(request).await?;
//! ```

use async_trait::async_trait;

use crate::domain::analysis::AnalysisResult;
use crate::domain::foundation::{ErrorCode, TestSizeFraction, ValidationError};

/// Port for the external analysis call.
///
/// Implementations issue exactly one request per `analyze` call and never
/// retry on their own.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Uploads the dataset and returns the parsed, normalized result.
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}

/// A dataset selected for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFile {
    file_name: String,
    bytes: Vec<u8>,
}

impl DatasetFile {
    /// Wraps raw dataset bytes. Content is not inspected.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the file name is blank
    pub fn new(file_name: impl Into<String>, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        let file_name = file_name.into();
        if file_name.trim().is_empty() {
            return Err(ValidationError::empty_field("file_name"));
        }
        Ok(Self { file_name, bytes })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Size of the upload in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// One analysis request: the dataset plus the split fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRequest {
    pub file: DatasetFile,
    pub test_size: TestSizeFraction,
}

impl AnalysisRequest {
    pub fn new(file: DatasetFile, test_size: TestSizeFraction) -> Self {
        Self { file, test_size }
    }
}

/// Analysis call failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AnalysisError {
    /// Connection could not be established or broke mid-request.
    #[error("network error: {0}")]
    Network(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout {
        /// Configured timeout.
        timeout_secs: u64,
    },

    /// Service answered with a non-2xx status.
    #[error("analysis service returned {status}: {message}")]
    HttpStatus {
        /// HTTP status code.
        status: u16,
        /// Error message from the body, or the raw body.
        message: String,
    },

    /// Response body does not match the documented JSON shape.
    #[error("contract violation: {0}")]
    ContractViolation(String),
}

impl AnalysisError {
    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a non-2xx status error.
    pub fn http_status(status: u16, message: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            message: message.into(),
        }
    }

    /// Creates a contract violation error.
    pub fn contract_violation(message: impl Into<String>) -> Self {
        Self::ContractViolation(message.into())
    }

    /// Returns true if the response arrived but had the wrong shape.
    pub fn is_contract_violation(&self) -> bool {
        matches!(self, AnalysisError::ContractViolation(_))
    }

    pub fn code(&self) -> ErrorCode {
        if self.is_contract_violation() {
            ErrorCode::ContractViolation
        } else {
            ErrorCode::TransportFailure
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataset_file_requires_name() {
        let err = DatasetFile::new("  ", vec![1, 2]).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ValidationFailed);
        let file = DatasetFile::new("data.csv", b"a,b\n1,2\n".to_vec()).unwrap();
        assert_eq!(file.file_name(), "data.csv");
        assert_eq!(file.len(), 8);
        assert!(!file.is_empty());
    }

    #[test]
    fn dataset_file_content_is_not_validated() {
        let file = DatasetFile::new("empty.csv", Vec::new()).unwrap();
        assert!(file.is_empty());
    }

    #[test]
    fn error_codes_split_transport_from_contract() {
        assert_eq!(AnalysisError::network("refused").code(), ErrorCode::TransportFailure);
        assert_eq!(
            AnalysisError::Timeout { timeout_secs: 5 }.code(),
            ErrorCode::TransportFailure
        );
        assert_eq!(
            AnalysisError::http_status(400, "bad file").code(),
            ErrorCode::TransportFailure
        );
        assert_eq!(
            AnalysisError::contract_violation("missing stats").code(),
            ErrorCode::ContractViolation
        );
    }

    #[test]
    fn errors_display_correctly() {
        assert_eq!(
            AnalysisError::http_status(400, "No columns to parse").to_string(),
            "analysis service returned 400: No columns to parse"
        );
        assert_eq!(
            AnalysisError::Timeout { timeout_secs: 30 }.to_string(),
            "request timed out after 30s"
        );
    }
}
