//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `govlab_core::api` instead of reaching into internal modules.

pub use crate::composer::{
    parse_amount_input, Composer, ExecutionPayload, Intent, ScenarioFlags,
};
pub use crate::config::{ApiConfig, ApiEndpoint, AppConfig, LoggingConfig, SessionConfig};
pub use crate::error::{ConfigError, LabError};
pub use crate::lab::render;
pub use crate::lab::{
    DecisionClass, LabClient, LabEvent, LabSession, LedgerSnapshot, RunCycle, RunCycleReport,
    RunPhase, RunRequest, RunResult,
};
