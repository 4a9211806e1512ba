//! Mock Analysis Service for testing.
//!
//! Scripted responses, simulated latency and call recording, so session
//! behavior can be exercised without a running analysis service.
//!
//! # Example
//!
//! ```ignore
//! let service = MockAnalysisService::new()
//!     .with_result(AnalysisResult::new(80, 20))
//!     .with_error(AnalysisError::network("connection refused"))
//!     .with_delay(Duration::from_millis(50));
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::sleep;

use crate::domain::analysis::AnalysisResult;
use crate::ports::{AnalysisError, AnalysisRequest, AnalysisService};

/// A configured mock response.
#[derive(Debug, Clone)]
pub enum MockAnalysisResponse {
    Success(AnalysisResult),
    Error(AnalysisError),
}

/// Mock analysis service. Responses are consumed in order; once the queue
/// is empty every call returns an empty `80/20` result.
#[derive(Debug, Clone, Default)]
pub struct MockAnalysisService {
    responses: Arc<Mutex<VecDeque<MockAnalysisResponse>>>,
    delay: Duration,
    calls: Arc<Mutex<Vec<AnalysisRequest>>>,
}

impl MockAnalysisService {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response.
    pub fn with_result(self, result: AnalysisResult) -> Self {
        lock(&self.responses).push_back(MockAnalysisResponse::Success(result));
        self
    }

    /// Queues a failure.
    pub fn with_error(self, error: AnalysisError) -> Self {
        lock(&self.responses).push_back(MockAnalysisResponse::Error(error));
        self
    }

    /// Sets simulated latency per request.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of requests received.
    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// All recorded requests.
    pub fn get_calls(&self) -> Vec<AnalysisRequest> {
        lock(&self.calls).clone()
    }

    fn next_response(&self) -> MockAnalysisResponse {
        lock(&self.responses)
            .pop_front()
            .unwrap_or_else(|| MockAnalysisResponse::Success(AnalysisResult::new(80, 20)))
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

#[async_trait]
impl AnalysisService for MockAnalysisService {
    async fn analyze(&self, request: AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        lock(&self.calls).push(request);

        if !self.delay.is_zero() {
            sleep(self.delay).await;
        }

        match self.next_response() {
            MockAnalysisResponse::Success(result) => Ok(result.normalized()),
            MockAnalysisResponse::Error(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TestSizeFraction;
    use crate::ports::DatasetFile;

    fn request() -> AnalysisRequest {
        AnalysisRequest::new(
            DatasetFile::new("data.csv", b"a\n1\n".to_vec()).unwrap(),
            TestSizeFraction::default(),
        )
    }

    #[tokio::test]
    async fn returns_queued_responses_in_order() {
        let service = MockAnalysisService::new()
            .with_result(AnalysisResult::new(1, 2))
            .with_error(AnalysisError::network("down"));

        assert_eq!(service.analyze(request()).await.unwrap().train_row_count(), 1);
        assert_eq!(
            service.analyze(request()).await.unwrap_err(),
            AnalysisError::network("down")
        );
    }

    #[tokio::test]
    async fn falls_back_to_default_result() {
        let result = MockAnalysisService::new().analyze(request()).await.unwrap();
        assert_eq!(result.train_row_count(), 80);
        assert_eq!(result.test_row_count(), 20);
    }

    #[tokio::test]
    async fn records_calls() {
        let service = MockAnalysisService::new();
        service.analyze(request()).await.unwrap();
        service.analyze(request()).await.unwrap();

        assert_eq!(service.call_count(), 2);
        assert_eq!(service.get_calls()[0].file.file_name(), "data.csv");
    }

    #[tokio::test]
    async fn clones_share_queue_and_history() {
        let service = MockAnalysisService::new().with_result(AnalysisResult::new(7, 3));
        let clone = service.clone();

        assert_eq!(clone.analyze(request()).await.unwrap().train_row_count(), 7);
        assert_eq!(service.call_count(), 1);
    }
}
