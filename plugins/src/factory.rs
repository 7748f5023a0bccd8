use std::sync::Arc;

use govlab_core::api::{ApiConfig, LabClient, LabError, LabSession};

use crate::sandbox::HttpLabClient;

/// Builds the sandbox client, or `ConfigurationMissing` when no base URL is set.
pub fn build_client(cfg: &ApiConfig) -> Result<Arc<dyn LabClient>, LabError> {
    let endpoint = cfg.endpoint()?;
    tracing::info!(
        target: "govlab.factory",
        base_url = endpoint.base_url(),
        timeout_ms = ?endpoint.timeout_ms,
        "sandbox client configured"
    );
    let client = HttpLabClient::new(&endpoint).map_err(|e| LabError::transport("client", e))?;
    Ok(Arc::new(client))
}

/// A session bound to the configured sandbox. Missing configuration yields an
/// unconfigured session so the operator is told on first use instead of at startup.
pub fn build_session(cfg: &ApiConfig) -> Result<LabSession, LabError> {
    match build_client(cfg) {
        Ok(client) => Ok(LabSession::new(client)),
        Err(LabError::ConfigurationMissing) => {
            tracing::warn!(
                target: "govlab.factory",
                "sandbox API base URL not configured, runs will be refused"
            );
            Ok(LabSession::unconfigured())
        }
        Err(e) => Err(e),
    }
}
