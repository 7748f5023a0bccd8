use std::io::Write;
use std::time::Duration;

use crossterm::style::Stylize;
use crossterm::tty::IsTty;
use govlab_core::api::{
    render, DecisionClass, LabError, LabEvent, LedgerSnapshot, RunCycleReport, RunPhase, RunResult,
};
use indicatif::{ProgressBar, ProgressStyle};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::error::CliError;

pub fn paint_decision(class: DecisionClass, decision: &str) -> String {
    if !std::io::stdout().is_tty() {
        return decision.to_string();
    }
    match class {
        DecisionClass::Deny => decision.red().to_string(),
        DecisionClass::StepUp => decision.yellow().to_string(),
        DecisionClass::Approve => decision.green().to_string(),
    }
}

pub fn print_result(result: &RunResult) {
    println!("{}", render::render_result_with(result, paint_decision));
}

pub fn print_ledger(ledger: &LedgerSnapshot) {
    println!("{}", render::render_ledger(ledger));
}

/// Failures first, then the latest result and ledger. A failed run shows no result
/// panel, but the mirrored ledger (possibly from before this cycle) is still shown.
pub fn print_cycle(
    report: &RunCycleReport,
    last_result: Option<&RunResult>,
    ledger: Option<&LedgerSnapshot>,
) {
    if let Err(e) = &report.run {
        notice("run failed", e);
    }
    if let Err(e) = &report.ledger {
        notice("ledger refresh failed", e);
    }
    if let (Ok(_), Some(result)) = (&report.run, last_result) {
        print_result(result);
    }
    if let Some(ledger) = ledger {
        print_ledger(ledger);
    }
}

/// Operator-visible notice on stderr. Never swallowed.
pub fn notice(what: &str, err: &LabError) {
    let msg = format!("{what}: {}", err.chain_message());
    let mut stderr = std::io::stderr();
    let line = if stderr.is_tty() {
        msg.red().to_string()
    } else {
        msg
    };
    let _ = writeln!(stderr, "{line}");
}

pub fn print_json(value: &serde_json::Value) -> Result<(), CliError> {
    let s = serde_json::to_string_pretty(value).map_err(CliError::Encode)?;
    println!("{s}");
    Ok(())
}

/// Drives the "Running..." indicator from session events until the sender is dropped.
pub fn spawn_progress(mut rx: mpsc::UnboundedReceiver<LabEvent>) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut bar: Option<ProgressBar> = None;
        while let Some(event) = rx.recv().await {
            match event {
                LabEvent::PhaseChanged(RunPhase::Submitting) => {
                    let pb = ProgressBar::new_spinner();
                    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
                        pb.set_style(style);
                    }
                    pb.set_message("Running...");
                    pb.enable_steady_tick(Duration::from_millis(120));
                    bar = Some(pb);
                }
                LabEvent::PhaseChanged(RunPhase::Succeeded | RunPhase::Failed) => {
                    if let Some(pb) = &bar {
                        pb.set_message("Refreshing ledger...");
                    }
                }
                LabEvent::PhaseChanged(RunPhase::Idle) => {
                    if let Some(pb) = bar.take() {
                        pb.finish_and_clear();
                    }
                }
                other => tracing::trace!(target: "govlab.cli", event = ?other, "session event"),
            }
        }
        if let Some(pb) = bar.take() {
            pb.finish_and_clear();
        }
    })
}
