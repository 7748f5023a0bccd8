use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tracing::Instrument;

use crate::composer::Composer;
use crate::error::LabError;

use super::client::LabClient;
use super::events::LabEvent;
use super::models::{LedgerSnapshot, RunResult};

/// Per-run state: `Idle -> Submitting -> {Succeeded, Failed} -> Idle`.
///
/// `Succeeded`/`Failed` hold while the follow-up ledger refresh is in flight;
/// any phase other than `Idle` counts as busy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Debug)]
pub enum RunCycle {
    /// A run was already in flight; this request was dropped, not queued.
    Busy,
    Completed(RunCycleReport),
}

/// Outcome of one completed cycle. The run and ledger results are reported independently.
#[derive(Debug)]
pub struct RunCycleReport {
    pub run_id: String,
    pub run: Result<RunResult, LabError>,
    pub ledger: Result<LedgerSnapshot, LabError>,
    pub completed_at: DateTime<Utc>,
}

impl RunCycleReport {
    pub fn run_succeeded(&self) -> bool {
        self.run.is_ok()
    }
}

#[derive(Debug)]
struct SessionState {
    phase: RunPhase,
    last_result: Option<RunResult>,
    ledger: Option<LedgerSnapshot>,
}

/// Run orchestrator and ledger mirror.
///
/// Holds the latest `RunResult` and `LedgerSnapshot`. Neither is ever cleared by a
/// failure; both are only ever replaced whole by a successful response.
pub struct LabSession {
    client: Option<Arc<dyn LabClient>>,
    state: Mutex<SessionState>,
    events: Option<mpsc::UnboundedSender<LabEvent>>,
}

impl LabSession {
    pub fn new(client: Arc<dyn LabClient>) -> Self {
        Self::with_client(Some(client))
    }

    /// A session with no sandbox target; every network operation yields `ConfigurationMissing`.
    pub fn unconfigured() -> Self {
        Self::with_client(None)
    }

    pub fn with_client(client: Option<Arc<dyn LabClient>>) -> Self {
        Self {
            client,
            state: Mutex::new(SessionState {
                phase: RunPhase::Idle,
                last_result: None,
                ledger: None,
            }),
            events: None,
        }
    }

    pub fn with_events(mut self, tx: mpsc::UnboundedSender<LabEvent>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }

    pub fn phase(&self) -> RunPhase {
        self.lock().phase
    }

    pub fn is_busy(&self) -> bool {
        self.phase() != RunPhase::Idle
    }

    pub fn last_result(&self) -> Option<RunResult> {
        self.lock().last_result.clone()
    }

    pub fn ledger(&self) -> Option<LedgerSnapshot> {
        self.lock().ledger.clone()
    }

    /// Runs one simulation cycle: compose, submit, then refresh the ledger.
    ///
    /// Returns `Err` only for failures that stop the cycle before any network call
    /// (`ConfigurationMissing`, `MalformedPayload`). Transport failures are reported
    /// inside the `RunCycleReport`.
    pub async fn execute_run(&self, composer: &Composer) -> Result<RunCycle, LabError> {
        let client = self.client()?;

        if !self.try_begin() {
            tracing::debug!(
                target: "govlab.session",
                "run requested while another is in flight, ignoring"
            );
            return Ok(RunCycle::Busy);
        }

        let run_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!("lab_run", run_id = %run_id);
        self.run_cycle(client, composer, run_id).instrument(span).await
    }

    /// Fetches the dashboard aggregate and replaces the mirrored snapshot whole.
    pub async fn refresh_ledger(&self) -> Result<LedgerSnapshot, LabError> {
        let client = self.client()?;
        self.refresh_with(client.as_ref()).await
    }

    async fn run_cycle(
        &self,
        client: Arc<dyn LabClient>,
        composer: &Composer,
        run_id: String,
    ) -> Result<RunCycle, LabError> {
        let request = match composer.compose() {
            Ok(req) => req,
            Err(e) => {
                tracing::warn!(target: "govlab.session", error = %e, "run aborted before submission");
                self.set_phase(RunPhase::Failed);
                self.emit(LabEvent::RunFailed(e.chain_message()));
                self.set_phase(RunPhase::Idle);
                return Err(e);
            }
        };

        tracing::info!(
            target: "govlab.session",
            client = client.name(),
            amount_usd = request.intent.amount_usd,
            "submitting run"
        );

        let run = client.submit_run(&request).await;
        match &run {
            Ok(result) => {
                tracing::info!(
                    target: "govlab.session",
                    baseline = %result.baseline.decision,
                    governed = %result.governed.decision,
                    net_security_value = %result.economics.net_security_value,
                    "run completed"
                );
                {
                    let mut st = self.lock();
                    st.last_result = Some(result.clone());
                }
                self.set_phase(RunPhase::Succeeded);
                self.emit(LabEvent::RunCompleted(Box::new(result.clone())));
            }
            Err(e) => {
                tracing::warn!(target: "govlab.session", error = %e.chain_message(), "run failed");
                self.set_phase(RunPhase::Failed);
                self.emit(LabEvent::RunFailed(e.chain_message()));
            }
        }

        // Starts only after the submission above has resolved either way.
        let ledger = self.refresh_with(client.as_ref()).await;

        self.set_phase(RunPhase::Idle);

        Ok(RunCycle::Completed(RunCycleReport {
            run_id,
            run,
            ledger,
            completed_at: Utc::now(),
        }))
    }

    async fn refresh_with(&self, client: &dyn LabClient) -> Result<LedgerSnapshot, LabError> {
        match client.fetch_dashboard().await {
            Ok(snapshot) => {
                tracing::debug!(
                    target: "govlab.session",
                    total_runs = %snapshot.total_runs,
                    "ledger refreshed"
                );
                self.lock().ledger = Some(snapshot.clone());
                self.emit(LabEvent::LedgerUpdated(snapshot.clone()));
                Ok(snapshot)
            }
            Err(e) => {
                tracing::warn!(target: "govlab.session", error = %e.chain_message(), "ledger refresh failed");
                self.emit(LabEvent::LedgerFailed(e.chain_message()));
                Err(e)
            }
        }
    }

    fn client(&self) -> Result<Arc<dyn LabClient>, LabError> {
        self.client.clone().ok_or(LabError::ConfigurationMissing)
    }

    fn try_begin(&self) -> bool {
        {
            let mut st = self.lock();
            if st.phase != RunPhase::Idle {
                return false;
            }
            st.phase = RunPhase::Submitting;
        }
        self.emit(LabEvent::PhaseChanged(RunPhase::Submitting));
        true
    }

    fn set_phase(&self, phase: RunPhase) {
        self.lock().phase = phase;
        self.emit(LabEvent::PhaseChanged(phase));
    }

    fn emit(&self, event: LabEvent) {
        if let Some(tx) = &self.events {
            if tx.send(event).is_err() {
                tracing::debug!(target: "govlab.session", "event receiver closed");
            }
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
