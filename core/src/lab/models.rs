use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::composer::{Intent, ScenarioFlags};

/// Body of `POST /lab/run`.
#[derive(Debug, Clone, Serialize)]
pub struct RunRequest {
    pub intent: Intent,
    pub scenario: ScenarioFlags,
    pub execution: Value,
}

/// Response of `POST /lab/run`. Every section is required; a body missing one
/// is treated as a transport failure rather than defaulted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult {
    pub baseline: BaselineDecision,
    pub governed: GovernedDecision,
    pub execution: ExecutionVerification,
    pub economics: Economics,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BaselineDecision {
    pub decision: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GovernedDecision {
    pub decision: String,
    #[serde(default)]
    pub risk: Value,
    #[serde(default)]
    pub reasons: Option<Vec<String>>,
}

impl GovernedDecision {
    pub fn class(&self) -> DecisionClass {
        DecisionClass::of(&self.decision)
    }

    /// Absent and `null` both read as no reasons.
    pub fn reasons(&self) -> &[String] {
        self.reasons.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionVerification {
    pub expected_exec_hash: String,
    pub actual_exec_hash: String,
}

/// Monetary outcome of one run. Values are kept as the server sent them: a run
/// with a non-finite intent comes back with `null` here and is still a result.
/// Each key must be present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Economics {
    pub attempted_value: Value,
    pub prevented_loss: Value,
    pub friction_cost: Value,
    pub net_security_value: Value,
}

/// Response of `GET /lab/dashboard`. Server aggregate, never accumulated locally
/// and never reinterpreted, so a float count or a `null` total decodes as-is.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerSnapshot {
    pub total_runs: Value,
    pub total_attempted: Value,
    pub total_prevented: Value,
    pub total_friction: Value,
    pub net_security_value: Value,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionClass {
    Deny,
    StepUp,
    Approve,
}

impl DecisionClass {
    pub fn of(decision: &str) -> Self {
        match decision {
            "DENY" => DecisionClass::Deny,
            "STEP_UP" => DecisionClass::StepUp,
            _ => DecisionClass::Approve,
        }
    }
}
