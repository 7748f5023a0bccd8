//! Editable scenario state and the request it composes.
//!
//! The composer never performs I/O. `compose` is the only place the payload
//! buffer is parsed, and the parsed value is never written back.

mod intent;
mod payload;
mod scenario;

pub use intent::{parse_amount_input, Intent};
pub use payload::{ExecutionPayload, DEFAULT_EXECUTION_PAYLOAD};
pub use scenario::{ScenarioFlags, DEFAULT_SCENARIO_FLAGS};

use crate::error::LabError;
use crate::lab::RunRequest;

#[derive(Debug, Clone)]
pub struct Composer {
    intent: Intent,
    scenario: ScenarioFlags,
    payload: ExecutionPayload,
}

impl Default for Composer {
    fn default() -> Self {
        Self {
            intent: Intent::new(250_000.0),
            scenario: ScenarioFlags::with_defaults(),
            payload: ExecutionPayload::default(),
        }
    }
}

impl Composer {
    pub fn new(intent: Intent, scenario: ScenarioFlags, payload: ExecutionPayload) -> Self {
        Self {
            intent,
            scenario,
            payload,
        }
    }

    pub fn intent(&self) -> &Intent {
        &self.intent
    }

    pub fn scenario(&self) -> &ScenarioFlags {
        &self.scenario
    }

    pub fn payload(&self) -> &ExecutionPayload {
        &self.payload
    }

    /// No bounds are enforced; zero, negative and non-finite amounts pass through.
    pub fn set_intent_amount(&mut self, amount_usd: f64) {
        self.intent.amount_usd = amount_usd;
    }

    pub fn toggle_flag(&mut self, name: &str) -> Result<bool, LabError> {
        self.scenario.toggle(name)
    }

    pub fn set_flag(&mut self, name: &str, value: bool) -> Result<(), LabError> {
        self.scenario.set(name, value)
    }

    pub fn edit_payload(&mut self, text: impl Into<String>) {
        self.payload.replace(text);
    }

    /// Builds the `/lab/run` body. Fails with `MalformedPayload` before anything is built
    /// when the payload buffer does not parse.
    pub fn compose(&self) -> Result<RunRequest, LabError> {
        let execution = self.payload.parse()?;
        Ok(RunRequest {
            intent: self.intent.clone(),
            scenario: self.scenario.clone(),
            execution,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn compose_default_matches_wire_shape() {
        let req = Composer::default().compose().unwrap();
        let body = serde_json::to_value(&req).unwrap();
        assert_eq!(
            body,
            json!({
                "intent": { "amountUsd": 250000 },
                "scenario": {
                    "new_recipient": true,
                    "high_velocity": true,
                    "replay_attempt": false,
                    "contract_param_tamper": false
                },
                "execution": {
                    "contract_type": "ESCROW",
                    "method": "release",
                    "params": { "recipient": "0xabc", "amountUsd": 250000 }
                }
            })
        );
    }

    #[test]
    fn malformed_payload_aborts_compose() {
        let mut c = Composer::default();
        c.edit_payload("{ invalid");
        assert!(matches!(c.compose(), Err(LabError::MalformedPayload(_))));
        assert_eq!(c.payload().text(), "{ invalid");
    }

    #[test]
    fn compose_does_not_rewrite_buffer() {
        let mut c = Composer::default();
        let text = "{\"method\":   \"release\" ,\n \"x\": 1}";
        c.edit_payload(text);
        c.compose().unwrap();
        assert_eq!(c.payload().text(), text);
    }

    #[test]
    fn non_finite_amount_is_not_rejected() {
        let mut c = Composer::default();
        c.set_intent_amount(f64::NAN);
        let body = serde_json::to_value(c.compose().unwrap()).unwrap();
        assert_eq!(body["intent"]["amountUsd"], serde_json::Value::Null);

        c.set_intent_amount(-5.0);
        let body = serde_json::to_value(c.compose().unwrap()).unwrap();
        assert_eq!(body["intent"]["amountUsd"], json!(-5.0));
    }
}
