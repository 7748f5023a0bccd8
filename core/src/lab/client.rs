use async_trait::async_trait;

use crate::error::LabError;

use super::models::{LedgerSnapshot, RunRequest, RunResult};

/// The two sandbox endpoints. Implementations are the only network I/O in the system.
///
/// Any body that decodes to the expected shape is returned as-is regardless of
/// HTTP status; anything else is `LabError::TransportFailure`.
#[async_trait]
pub trait LabClient: Send + Sync {
    fn name(&self) -> &str;

    /// `POST {base}/lab/run`
    async fn submit_run(&self, req: &RunRequest) -> Result<RunResult, LabError>;

    /// `GET {base}/lab/dashboard`
    async fn fetch_dashboard(&self) -> Result<LedgerSnapshot, LabError>;
}
