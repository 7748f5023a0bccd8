use serde::{Deserialize, Serialize};

use crate::error::LabError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default)]
    pub base_url: Option<String>,

    /// Unset means requests may wait indefinitely.
    #[serde(default)]
    pub timeout_ms: Option<u64>,
}

impl ApiConfig {
    /// Resolves the sandbox endpoint, or `ConfigurationMissing` when no usable base URL is set.
    pub fn endpoint(&self) -> Result<ApiEndpoint, LabError> {
        let base = self
            .base_url
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .ok_or(LabError::ConfigurationMissing)?;
        Ok(ApiEndpoint {
            base_url: base.trim_end_matches('/').to_string(),
            timeout_ms: self.timeout_ms,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiEndpoint {
    base_url: String,
    pub timeout_ms: Option<u64>,
}

impl ApiEndpoint {
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn run_url(&self) -> String {
        format!("{}/lab/run", self.base_url)
    }

    pub fn dashboard_url(&self) -> String {
        format!("{}/lab/dashboard", self.base_url)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_intent_amount_usd")]
    pub intent_amount_usd: f64,

    /// Initial execution payload; the built-in ESCROW release payload is used when unset.
    #[serde(default)]
    pub payload_file: Option<String>,
}

fn default_intent_amount_usd() -> f64 {
    250_000.0
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            intent_amount_usd: default_intent_amount_usd(),
            payload_file: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default)]
    pub directory: Option<String>,
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            directory: None,
        }
    }
}
