//! HTTP Analysis Service - reqwest implementation of the AnalysisService port.
//!
//! # Configuration
//!
//! ```ignore
//! let config = HttpAnalysisConfig::new("http://localhost:8000")
//!     .with_timeout(Duration::from_secs(30));
//!
//! let service = HttpAnalysisService::new(config)?;
//! ```
//!
//! # Wire format
//!
//! `POST {base_url}/analizar/` with a multipart body carrying `file` (the raw
//! dataset, with its file name) and `test_size` (decimal string). A 2xx body
//! must match the documented JSON shape; anything else is a contract
//! violation. Non-2xx bodies of the form `{"error": "..."}` have their message
//! surfaced.

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use std::time::{Duration, Instant};

use crate::domain::analysis::AnalysisResult;
use crate::ports::{AnalysisError, AnalysisRequest, AnalysisService};

/// Path of the analysis endpoint, relative to the base URL.
const ANALYZE_PATH: &str = "/analizar/";

/// Configuration for the HTTP analysis service.
#[derive(Debug, Clone)]
pub struct HttpAnalysisConfig {
    /// Base URL of the service (e.g. `http://localhost:8000`).
    pub base_url: String,
    /// Request timeout.
    pub timeout: Duration,
}

impl HttpAnalysisConfig {
    /// Creates a configuration with the default 60s timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(60),
        }
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the analysis endpoint.
    pub fn endpoint_url(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), ANALYZE_PATH)
    }
}

/// Analysis service reached over HTTP.
pub struct HttpAnalysisService {
    config: HttpAnalysisConfig,
    client: Client,
}

impl HttpAnalysisService {
    /// Creates the service and its HTTP client.
    pub fn new(config: HttpAnalysisConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AnalysisError::network(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { config, client })
    }

    fn build_form(request: AnalysisRequest) -> Form {
        let test_size = request.test_size.to_form_value();
        let file_name = request.file.file_name().to_string();
        let part = Part::bytes(request.file.bytes().to_vec()).file_name(file_name);

        Form::new().part("file", part).text("test_size", test_size)
    }

    async fn send_request(&self, request: AnalysisRequest) -> Result<Response, AnalysisError> {
        self.client
            .post(self.config.endpoint_url())
            .multipart(Self::build_form(request))
            .send()
            .await
            .map_err(|e| self.transport_error(e))
    }

    fn transport_error(&self, e: reqwest::Error) -> AnalysisError {
        if e.is_timeout() {
            AnalysisError::Timeout {
                timeout_secs: self.config.timeout.as_secs(),
            }
        } else if e.is_connect() {
            AnalysisError::network(format!("Connection failed: {}", e))
        } else {
            AnalysisError::network(e.to_string())
        }
    }

    /// Turns non-2xx responses into errors.
    async fn handle_response_status(&self, response: Response) -> Result<Response, AnalysisError> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        let error_body = response.text().await.unwrap_or_default();
        Err(AnalysisError::http_status(
            status.as_u16(),
            Self::parse_error_message(&error_body),
        ))
    }

    /// Extracts `error` from `{"error": "..."}`, falling back to the raw body.
    fn parse_error_message(error_body: &str) -> String {
        serde_json::from_str::<serde_json::Value>(error_body)
            .ok()
            .and_then(|parsed| parsed.get("error").and_then(|e| e.as_str()).map(str::to_string))
            .unwrap_or_else(|| error_body.to_string())
    }

    async fn parse_response(&self, response: Response) -> Result<AnalysisResult, AnalysisError> {
        let response = self.handle_response_status(response).await?;

        let body = response
            .bytes()
            .await
            .map_err(|e| self.transport_error(e))?;

        let result: AnalysisResult = serde_json::from_slice(&body).map_err(|e| {
            AnalysisError::contract_violation(format!("Failed to parse response: {}", e))
        })?;

        Ok(result.normalized())
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisService {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let started = Instant::now();
        tracing::debug!(
            url = %self.config.endpoint_url(),
            file = %request.file.file_name(),
            bytes = request.file.len(),
            test_size = request.test_size.value(),
            "sending analysis request"
        );

        let response = self.send_request(request).await?;
        let result = self.parse_response(response).await;

        tracing::debug!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            ok = result.is_ok(),
            "analysis request finished"
        );
        result
    }
}
