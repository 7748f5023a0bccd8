mod client;
mod events;
mod models;
pub mod render;
mod session;

pub use client::LabClient;
pub use events::LabEvent;
pub use models::{
    BaselineDecision, DecisionClass, Economics, ExecutionVerification, GovernedDecision,
    LedgerSnapshot, RunRequest, RunResult,
};
pub use session::{LabSession, RunCycle, RunCycleReport, RunPhase};
