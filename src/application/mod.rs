//! Application layer - Use cases over the domain and ports.

mod session;

pub use session::{AnalysisSession, PendingSubmission, SubmissionResolution};
