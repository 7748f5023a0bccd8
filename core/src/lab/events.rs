use super::models::{LedgerSnapshot, RunResult};
use super::session::RunPhase;

/// Frontend-facing events emitted by the session.
///
/// `core` stays UI-agnostic: the CLI drives its spinner and panels from these,
/// but every value here is also readable from `LabSession` accessors.
#[derive(Debug, Clone)]
pub enum LabEvent {
    PhaseChanged(RunPhase),
    RunCompleted(Box<RunResult>),
    RunFailed(String),
    LedgerUpdated(LedgerSnapshot),
    LedgerFailed(String),
}
