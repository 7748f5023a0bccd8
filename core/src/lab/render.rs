//! Plain-text panels for the composer, run result and ledger.
//!
//! Values are printed as received; nothing here derives or recomputes a number.

use serde_json::Value;

use crate::composer::{Composer, ScenarioFlags};

use super::models::{DecisionClass, LedgerSnapshot, RunResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToggleRow {
    pub name: String,
    pub checked: bool,
}

/// One row per flag held in state, in display order.
pub fn toggle_rows(flags: &ScenarioFlags) -> Vec<ToggleRow> {
    flags
        .iter()
        .map(|(name, checked)| ToggleRow {
            name: name.to_string(),
            checked,
        })
        .collect()
}

pub fn render_composer(composer: &Composer) -> String {
    let mut out = String::new();
    out.push_str("== Attack Surface ==\n");
    out.push_str(&format!(
        "Intent Amount (USD): {}\n",
        composer.intent().amount_usd
    ));
    out.push_str("Scenario Toggles:\n");
    for row in toggle_rows(composer.scenario()) {
        let mark = if row.checked { "x" } else { " " };
        out.push_str(&format!("  [{mark}] {}\n", row.name));
    }
    out.push_str("== Execution Payload ==\n");
    out.push_str(composer.payload().text());
    if !composer.payload().text().ends_with('\n') {
        out.push('\n');
    }
    out
}

pub fn render_result(result: &RunResult) -> String {
    render_result_with(result, |_, decision| decision.to_string())
}

/// `paint` styles the governed decision for its class (e.g. terminal colors).
pub fn render_result_with(
    result: &RunResult,
    paint: impl Fn(DecisionClass, &str) -> String,
) -> String {
    let governed = &result.governed;
    let econ = &result.economics;

    let mut out = String::new();
    out.push_str("== Governance Decision ==\n");
    out.push_str(&format!("Baseline: {}\n", result.baseline.decision));
    out.push_str(&format!(
        "Governed: {}\n",
        paint(governed.class(), &governed.decision)
    ));
    out.push_str(&format!("Risk: {}\n", display_value(&governed.risk)));
    out.push_str(&format!("Reasons: {}\n", governed.reasons().join(", ")));
    out.push_str(&format!(
        "Expected Hash: {}\n",
        result.execution.expected_exec_hash
    ));
    out.push_str(&format!("Actual Hash: {}\n", result.execution.actual_exec_hash));
    out.push('\n');
    out.push_str("== Economic Impact ==\n");
    out.push_str(&format!("Attempted: ${}\n", display_value(&econ.attempted_value)));
    out.push_str(&format!("Prevented: ${}\n", display_value(&econ.prevented_loss)));
    out.push_str(&format!("Friction: ${}\n", display_value(&econ.friction_cost)));
    out.push_str(&format!(
        "Net Security Value: ${}\n",
        display_value(&econ.net_security_value)
    ));
    out
}

pub fn render_ledger(ledger: &LedgerSnapshot) -> String {
    let mut out = String::new();
    out.push_str("== Cumulative Ledger ==\n");
    out.push_str(&format!("Total Runs: {}\n", display_value(&ledger.total_runs)));
    out.push_str(&format!(
        "Total Attempted: ${}\n",
        display_value(&ledger.total_attempted)
    ));
    out.push_str(&format!(
        "Total Prevented: ${}\n",
        display_value(&ledger.total_prevented)
    ));
    out.push_str(&format!(
        "Total Friction: ${}\n",
        display_value(&ledger.total_friction)
    ));
    out.push_str(&format!(
        "Net Security Value: ${}\n",
        display_value(&ledger.net_security_value)
    ));
    out
}

/// Server values as text: `null` is blank, strings unquoted, numbers in the form received.
pub fn display_value(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lab::models::{
        BaselineDecision, Economics, ExecutionVerification, GovernedDecision,
    };
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use std::collections::BTreeSet;

    fn sample_result() -> RunResult {
        RunResult {
            baseline: BaselineDecision {
                decision: "APPROVE".into(),
            },
            governed: GovernedDecision {
                decision: "STEP_UP".into(),
                risk: Value::String("HIGH".into()),
                reasons: Some(vec!["NEW_RECIPIENT".into(), "HIGH_VELOCITY".into()]),
            },
            execution: ExecutionVerification {
                expected_exec_hash: "0x11".into(),
                actual_exec_hash: "0x22".into(),
            },
            economics: Economics {
                attempted_value: json!(250000),
                prevented_loss: json!(0),
                friction_cost: json!(25),
                net_security_value: json!(-25),
            },
        }
    }

    #[test]
    fn toggle_rows_match_state_keys_exactly() {
        let mut flags = ScenarioFlags::from_pairs([
            ("a".to_string(), true),
            ("b".to_string(), false),
            ("c".to_string(), false),
        ]);
        flags.toggle("b").unwrap();
        let rows = toggle_rows(&flags);
        let rendered: BTreeSet<&str> = rows.iter().map(|r| r.name.as_str()).collect();
        let held: BTreeSet<&str> = flags.names().collect();
        assert_eq!(rendered, held);
        assert_eq!(rows.len(), flags.len());
        assert!(rows.iter().all(|r| flags.get(&r.name) == Some(r.checked)));
    }

    #[test]
    fn ledger_values_render_verbatim() {
        let ledger = LedgerSnapshot {
            total_runs: json!(5),
            total_attempted: json!(1000000),
            total_prevented: json!(400000),
            total_friction: json!(5000),
            net_security_value: json!(395000),
        };
        assert_eq!(
            render_ledger(&ledger),
            "== Cumulative Ledger ==\n\
             Total Runs: 5\n\
             Total Attempted: $1000000\n\
             Total Prevented: $400000\n\
             Total Friction: $5000\n\
             Net Security Value: $395000\n"
        );
    }

    #[test]
    fn result_panel_lists_decisions_and_economics() {
        let text = render_result(&sample_result());
        assert!(text.contains("Baseline: APPROVE\n"));
        assert!(text.contains("Governed: STEP_UP\n"));
        assert!(text.contains("Risk: HIGH\n"));
        assert!(text.contains("Reasons: NEW_RECIPIENT, HIGH_VELOCITY\n"));
        assert!(text.contains("Expected Hash: 0x11\nActual Hash: 0x22\n"));
        assert!(text.contains("Friction: $25\n"));
        assert!(text.contains("Net Security Value: $-25\n"));
    }

    #[test]
    fn ledger_number_forms_are_not_reformatted() {
        let ledger: LedgerSnapshot = serde_json::from_str(
            r#"{"total_runs":5.0,"total_attempted":1e21,"total_prevented":null,
                "total_friction":0,"net_security_value":-12.5}"#,
        )
        .unwrap();
        let text = render_ledger(&ledger);
        assert!(text.contains("Total Runs: 5.0\n"));
        assert!(text.contains("Total Attempted: $1e21\n"));
        assert!(text.contains("Total Prevented: $\n"));
        assert!(text.contains("Net Security Value: $-12.5\n"));
    }

    #[test]
    fn null_economics_render_blank_and_keep_the_decision() {
        let mut result = sample_result();
        result.governed.reasons = None;
        result.economics.attempted_value = Value::Null;
        result.economics.net_security_value = Value::Null;
        let text = render_result(&result);
        assert!(text.contains("Governed: STEP_UP\n"));
        assert!(text.contains("Reasons: \n"));
        assert!(text.contains("Attempted: $\n"));
        assert!(text.contains("Friction: $25\n"));
        assert!(text.contains("Net Security Value: $\n"));
    }

    #[test]
    fn painter_sees_decision_class() {
        let text = render_result_with(&sample_result(), |class, d| format!("<{class:?}:{d}>"));
        assert!(text.contains("Governed: <StepUp:STEP_UP>\n"));
    }

    #[test]
    fn composer_panel_lists_every_toggle() {
        let text = render_composer(&Composer::default());
        assert!(text.contains("Intent Amount (USD): 250000\n"));
        assert!(text.contains("  [x] new_recipient\n"));
        assert!(text.contains("  [ ] contract_param_tamper\n"));
        assert!(text.contains("\"contract_type\": \"ESCROW\""));
    }
}
