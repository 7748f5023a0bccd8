use govlab_core::api::{AppConfig, LabError, RunCycle};
use govlab_plugins::factory::build_session;
use serde_json::json;
use tokio::sync::mpsc;

use crate::commands::cli::{OutputFormat, RunArgs};
use crate::compose::build_composer;
use crate::error::CliError;
use crate::output;

/// One run cycle. Exit code 0 when the run itself succeeded, 1 otherwise.
pub async fn handle_run(args: RunArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let composer = build_composer(&cfg.session, &args.compose)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let progress = output::spawn_progress(rx);
    let session = build_session(&cfg.api)?.with_events(tx);

    // Startup mirror, independent of the run.
    match session.refresh_ledger().await {
        Ok(_) | Err(LabError::ConfigurationMissing) => {}
        Err(e) => output::notice("ledger refresh failed", &e),
    }

    let outcome = session.execute_run(&composer).await;
    let last_result = session.last_result();
    let ledger = session.ledger();
    drop(session);
    let _ = progress.await;

    let report = match outcome {
        Ok(RunCycle::Completed(report)) => report,
        Ok(RunCycle::Busy) => {
            tracing::warn!(target: "govlab.cli", "run ignored, session busy");
            return Ok(1);
        }
        Err(e) => {
            output::notice("run refused", &e);
            return Ok(1);
        }
    };

    match args.format {
        OutputFormat::Json => {
            output::print_json(&json!({
                "run_id": &report.run_id,
                "completed_at": report.completed_at,
                "result": last_result,
                "ledger": ledger,
                "run_error": report.run.as_ref().err().map(|e| e.chain_message()),
                "ledger_error": report.ledger.as_ref().err().map(|e| e.chain_message()),
            }))?;
        }
        OutputFormat::Text => {
            output::print_cycle(&report, last_result.as_ref(), ledger.as_ref());
        }
    }

    Ok(if report.run_succeeded() { 0 } else { 1 })
}
