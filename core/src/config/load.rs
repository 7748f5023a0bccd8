use std::path::{Path, PathBuf};

use crate::error::ConfigError;

use super::types::AppConfig;

pub const ENV_BASE_URL: &str = "GOVLAB_SANDBOX_API";
pub const ENV_TIMEOUT_MS: &str = "GOVLAB_TIMEOUT_MS";
pub const ENV_LOG: &str = "GOVLAB_LOG";

const LOCAL_CONFIG: &str = "govlab.toml";

/// Loads config from the standard locations and applies process env overrides.
pub fn load_default(explicit: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => default_config_path(),
    };
    load_from(path.as_deref(), |key| std::env::var(key).ok())
}

/// `env` is consulted for overrides; blank values are ignored.
pub fn load_from(
    path: Option<&Path>,
    env: impl Fn(&str) -> Option<String>,
) -> Result<AppConfig, ConfigError> {
    let mut cfg = match path {
        Some(p) => {
            let s = std::fs::read_to_string(p).map_err(|source| ConfigError::Read {
                path: p.to_path_buf(),
                source,
            })?;
            toml::from_str::<AppConfig>(&s).map_err(|source| ConfigError::Parse {
                path: p.to_path_buf(),
                source,
            })?
        }
        None => AppConfig::default(),
    };

    let non_blank = |key: &str| env(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = non_blank(ENV_BASE_URL) {
        cfg.api.base_url = Some(v);
    }
    if let Some(v) = non_blank(ENV_TIMEOUT_MS) {
        let ms = v
            .trim()
            .parse::<u64>()
            .map_err(|e| ConfigError::EnvInvalid {
                key: ENV_TIMEOUT_MS.to_string(),
                source: e.into(),
            })?;
        cfg.api.timeout_ms = Some(ms);
    }
    if let Some(v) = non_blank(ENV_LOG) {
        cfg.logging.level = v;
    }

    Ok(cfg)
}

fn default_config_path() -> Option<PathBuf> {
    let local = PathBuf::from(LOCAL_CONFIG);
    if local.exists() {
        return Some(local);
    }
    let user = dirs::config_dir()?.join("govlab").join("config.toml");
    user.exists().then_some(user)
}
