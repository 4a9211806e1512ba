//! AnalysisSession - Orchestrates one dashboard session.
//!
//! Owns the session state and drives it through the reducer in
//! `domain::session`, calling out to the analysis service, the result
//! adapter, the scenario generator and the CSV exporter.
//!
//! # Example
//!
//! ```ignore
//! let mut session = AnalysisSession::new(service, Box::new(UniformRandomSource::new()));
//! session.submit_dataset(Some(file), 0.3).await?;
//! let table = session.statistics_table();
//! session.generate_scenario()?;
//! let artifact = session.export_scenario()?;
//! ```

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::analysis::{
    AnalysisResult, DatasetOverview, HealthView, HistogramBar, ResultAdapter, SplitView,
    StatisticsRow,
};
use crate::domain::foundation::TestSizeFraction;
use crate::domain::scenario::{CsvExporter, ExportedArtifact, Scenario, ScenarioGenerator};
use crate::domain::session::{
    SessionError, SessionEvent, SessionState, SessionStatus, SubmissionGeneration,
};
use crate::ports::{AnalysisError, AnalysisRequest, AnalysisService, DatasetFile, RandomSource};

/// A submission that has been started but not yet resolved.
///
/// Returned by [`AnalysisSession::begin_submission`] for callers that issue
/// the request themselves.
#[derive(Debug, Clone)]
pub struct PendingSubmission {
    pub generation: SubmissionGeneration,
    pub request: AnalysisRequest,
}

/// What happened to a resolved submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmissionResolution {
    /// The result was stored; the session is `Analyzed`.
    Applied,
    /// The failure was recorded; the session is `Error`.
    Failed,
    /// The response belonged to a superseded submission and was dropped.
    Discarded,
}

/// One user's analysis session.
pub struct AnalysisSession {
    service: Arc<dyn AnalysisService>,
    generator: ScenarioGenerator,
    state: SessionState,
}

impl AnalysisSession {
    pub fn new(service: Arc<dyn AnalysisService>, random: Box<dyn RandomSource>) -> Self {
        Self {
            service,
            generator: ScenarioGenerator::new(random),
            state: SessionState::new(),
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn status(&self) -> SessionStatus {
        self.state.status()
    }

    pub fn result(&self) -> Option<&AnalysisResult> {
        self.state.result()
    }

    pub fn scenario(&self) -> Option<&Scenario> {
        self.state.scenario()
    }

    pub fn failure(&self) -> Option<&AnalysisError> {
        self.state.failure()
    }

    /// Uploads `file` for analysis with the given split fraction.
    ///
    /// On success the session is `Analyzed` with the new result. On a
    /// service failure the session is `Error` and the cause is returned.
    ///
    /// # Errors
    ///
    /// - `MissingFile` / `InvalidTestSize` / `SubmissionInFlight` before any request is made
    /// - `Analysis` when the service call fails
    pub async fn submit_dataset(
        &mut self,
        file: Option<DatasetFile>,
        test_size: f64,
    ) -> Result<(), SessionError> {
        let PendingSubmission {
            generation,
            request,
        } = self.begin_submission(file, test_size)?;

        let outcome = self.service.analyze(request).await;

        match self.resolve_submission(generation, outcome)? {
            SubmissionResolution::Failed => match self.state.failure() {
                Some(error) => Err(SessionError::Analysis(error.clone())),
                None => Ok(()),
            },
            SubmissionResolution::Applied | SubmissionResolution::Discarded => Ok(()),
        }
    }

    /// Validates inputs and moves to `Submitting`.
    ///
    /// Nothing changes when validation fails.
    pub fn begin_submission(
        &mut self,
        file: Option<DatasetFile>,
        test_size: f64,
    ) -> Result<PendingSubmission, SessionError> {
        let file = file.ok_or(SessionError::MissingFile)?;
        let test_size = TestSizeFraction::try_new(test_size).map_err(SessionError::InvalidTestSize)?;

        self.state = self.state.apply(SessionEvent::SubmissionStarted)?;
        let generation = self.state.generation();

        info!(
            generation = %generation,
            file = %file.file_name(),
            bytes = file.len(),
            test_size = %test_size,
            "submitting dataset for analysis"
        );

        Ok(PendingSubmission {
            generation,
            request: AnalysisRequest::new(file, test_size),
        })
    }

    /// Applies the outcome of the submission tagged `generation`.
    ///
    /// Outcomes of superseded submissions are discarded without touching the
    /// session.
    pub fn resolve_submission(
        &mut self,
        generation: SubmissionGeneration,
        outcome: Result<AnalysisResult, AnalysisError>,
    ) -> Result<SubmissionResolution, SessionError> {
        if !self.state.is_current(generation) {
            debug!(
                stale = %generation,
                current = %self.state.generation(),
                "discarding response of superseded submission"
            );
            return Ok(SubmissionResolution::Discarded);
        }

        match outcome {
            Ok(result) => {
                let (train, test) = (result.train_row_count(), result.test_row_count());
                let columns = result.statistics().len();
                self.state = self
                    .state
                    .apply(SessionEvent::SubmissionSucceeded { generation, result })?;
                info!(generation = %generation, train, test, columns, "analysis completed");
                Ok(SubmissionResolution::Applied)
            }
            Err(error) => {
                warn!(generation = %generation, code = %error.code(), error = %error, "analysis failed");
                self.state = self
                    .state
                    .apply(SessionEvent::SubmissionFailed { generation, error })?;
                Ok(SubmissionResolution::Failed)
            }
        }
    }

    /// Gives up on the in-flight submission; its response will be discarded.
    pub fn abandon_submission(&mut self) -> Result<(), SessionError> {
        self.state = self.state.apply(SessionEvent::SubmissionAbandoned)?;
        info!(generation = %self.state.generation(), "submission abandoned");
        Ok(())
    }

    /// Acknowledges the failure notification and returns to `Idle`.
    pub fn dismiss_error(&mut self) -> Result<(), SessionError> {
        self.state = self.state.apply(SessionEvent::ErrorDismissed)?;
        Ok(())
    }

    /// Draws a new scenario from the current statistics, replacing any
    /// previous one.
    pub fn generate_scenario(&mut self) -> Result<&Scenario, SessionError> {
        let statistics = self
            .state
            .result()
            .ok_or(SessionError::NoAnalysisResult)?
            .statistics();
        let scenario = self.generator.generate(statistics);
        let entries = scenario.len();

        self.state = self.state.apply(SessionEvent::ScenarioGenerated(scenario))?;
        info!(entries, "scenario generated");

        self.state.scenario().ok_or(SessionError::NoScenario)
    }

    /// Serializes the current scenario. Does not change the session.
    pub fn export_scenario(&self) -> Result<ExportedArtifact, SessionError> {
        if self.state.status() != SessionStatus::Simulated {
            return Err(SessionError::NoScenario);
        }
        let scenario = self.state.scenario().ok_or(SessionError::NoScenario)?;

        let artifact = CsvExporter::export(scenario)?;
        debug!(file = %artifact.file_name, bytes = artifact.content.len(), "scenario exported");
        Ok(artifact)
    }

    pub fn split_view(&self) -> Option<SplitView> {
        self.state.result().map(ResultAdapter::to_split_view)
    }

    pub fn dataset_overview(&self) -> Option<DatasetOverview> {
        self.state.result().map(ResultAdapter::to_dataset_overview)
    }

    pub fn statistics_table(&self) -> Vec<StatisticsRow> {
        self.state
            .result()
            .map(ResultAdapter::to_statistics_table)
            .unwrap_or_default()
    }

    pub fn histogram_view(&self) -> Vec<HistogramBar> {
        self.state
            .result()
            .map(ResultAdapter::to_histogram_view)
            .unwrap_or_default()
    }

    pub fn health_view(&self) -> Option<HealthView> {
        self.state.result().and_then(ResultAdapter::to_health_view)
    }
}
