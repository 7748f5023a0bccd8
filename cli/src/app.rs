use govlab_core::api::{AppConfig, LoggingConfig};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::commands::cli::Args;
use crate::error::CliError;

/// File/env config with `--base-url` applied last.
pub fn load_config(args: &Args) -> Result<AppConfig, CliError> {
    let mut cfg = govlab_core::config::load_default(args.config.as_deref())?;
    if let Some(url) = args.base_url.as_deref() {
        if !url.trim().is_empty() {
            cfg.api.base_url = Some(url.to_string());
        }
    }
    Ok(cfg)
}

/// Logs go to stderr, or to `<directory>/govlab.log` when configured, so stdout stays
/// clean for rendered panels and `--format json`.
pub fn init_logging(cfg: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cfg.level));

    match cfg.directory.as_deref() {
        Some(dir) => {
            let dir = shellexpand::tilde(dir).into_owned();
            let appender = tracing_appender::rolling::never(dir, "govlab.log");
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(writer)
                .with_ansi(false)
                .init();
            Some(guard)
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
            None
        }
    }
}
