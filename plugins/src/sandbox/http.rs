use std::time::{Duration, Instant};

use anyhow::Context;
use async_trait::async_trait;
use govlab_core::api::{ApiEndpoint, LabClient, LabError, LedgerSnapshot, RunRequest, RunResult};
use serde::de::DeserializeOwned;

const RUN_PATH: &str = "/lab/run";
const DASHBOARD_PATH: &str = "/lab/dashboard";

/// reqwest-backed sandbox client. HTTP status is logged but not interpreted.
pub struct HttpLabClient {
    http: reqwest::Client,
    run_url: String,
    dashboard_url: String,
}

impl HttpLabClient {
    pub fn new(endpoint: &ApiEndpoint) -> anyhow::Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(ms) = endpoint.timeout_ms {
            builder = builder.timeout(Duration::from_millis(ms));
        }
        let http = builder.build().context("failed to build sandbox HTTP client")?;
        Ok(Self {
            http,
            run_url: endpoint.run_url(),
            dashboard_url: endpoint.dashboard_url(),
        })
    }
}

#[async_trait]
impl LabClient for HttpLabClient {
    fn name(&self) -> &str {
        "sandbox_http"
    }

    async fn submit_run(&self, req: &RunRequest) -> Result<RunResult, LabError> {
        let started = Instant::now();
        let resp = self
            .http
            .post(&self.run_url)
            .json(req)
            .send()
            .await
            .map_err(|e| transport(RUN_PATH, e))?;
        tracing::debug!(
            target: "govlab.http",
            url = %self.run_url,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "run response received"
        );
        decode(RUN_PATH, resp).await
    }

    async fn fetch_dashboard(&self) -> Result<LedgerSnapshot, LabError> {
        let started = Instant::now();
        let resp = self
            .http
            .get(&self.dashboard_url)
            .send()
            .await
            .map_err(|e| transport(DASHBOARD_PATH, e))?;
        tracing::debug!(
            target: "govlab.http",
            url = %self.dashboard_url,
            status = resp.status().as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "dashboard response received"
        );
        decode(DASHBOARD_PATH, resp).await
    }
}

async fn decode<T: DeserializeOwned>(
    endpoint: &'static str,
    resp: reqwest::Response,
) -> Result<T, LabError> {
    let status = resp.status();
    let body = resp.bytes().await.map_err(|e| transport(endpoint, e))?;
    serde_json::from_slice::<T>(&body).map_err(|e| {
        let snippet = String::from_utf8_lossy(&body[..body.len().min(200)]).into_owned();
        tracing::warn!(
            target: "govlab.http",
            endpoint,
            status = status.as_u16(),
            body_snippet = %snippet,
            "unexpected response shape"
        );
        LabError::transport(
            endpoint,
            anyhow::Error::new(e).context(format!("unexpected response body (status {status})")),
        )
    })
}

fn transport(endpoint: &'static str, e: reqwest::Error) -> LabError {
    tracing::warn!(target: "govlab.http", endpoint, error = %e, "request failed");
    LabError::transport(endpoint, e)
}
