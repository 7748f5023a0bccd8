// core/src/error/lab_error.rs
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LabError {
    /// No sandbox API base URL was configured; nothing was sent.
    #[error("sandbox API base URL is not configured (set GOVLAB_SANDBOX_API or api.base_url)")]
    ConfigurationMissing,

    /// The execution payload buffer is not valid JSON; nothing was sent.
    #[error("execution payload is not valid JSON")]
    MalformedPayload(#[source] serde_json::Error),

    #[error("transport failure on {endpoint}")]
    TransportFailure {
        endpoint: &'static str,
        #[source]
        source: anyhow::Error,
    },

    #[error("unknown scenario flag: {0}")]
    UnknownScenarioFlag(String),
}

impl LabError {
    pub fn transport(endpoint: &'static str, source: impl Into<anyhow::Error>) -> Self {
        LabError::TransportFailure {
            endpoint,
            source: source.into(),
        }
    }

    /// Full cause chain on one line, for operator-facing notices.
    pub fn chain_message(&self) -> String {
        let mut out = self.to_string();
        let mut cur: Option<&(dyn std::error::Error + 'static)> = std::error::Error::source(self);
        while let Some(err) = cur {
            out.push_str(": ");
            out.push_str(&err.to_string());
            cur = err.source();
        }
        out
    }
}
