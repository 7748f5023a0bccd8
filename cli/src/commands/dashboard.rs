use govlab_core::api::AppConfig;
use govlab_plugins::factory::build_session;

use crate::commands::cli::{DashboardArgs, OutputFormat};
use crate::error::CliError;
use crate::output;

pub async fn handle_dashboard(args: DashboardArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    let session = build_session(&cfg.api)?;
    let ledger = match session.refresh_ledger().await {
        Ok(ledger) => ledger,
        Err(e) => {
            output::notice("ledger refresh failed", &e);
            return Ok(1);
        }
    };

    match args.format {
        OutputFormat::Json => {
            let value = serde_json::to_value(&ledger).map_err(CliError::Encode)?;
            output::print_json(&value)?;
        }
        OutputFormat::Text => output::print_ledger(&ledger),
    }
    Ok(0)
}
