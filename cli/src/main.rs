use clap::Parser;

mod app;
mod commands;
mod compose;
mod error;
mod output;

use commands::cli;

#[tokio::main]
async fn main() -> Result<(), error::CliError> {
    let args = cli::Args::parse();

    let cfg = app::load_config(&args)?;
    let log_guard = app::init_logging(&cfg.logging);

    let exit = dispatch(args, cfg).await?;
    // process::exit skips destructors; flush the log writer first.
    drop(log_guard);
    std::process::exit(exit);
}

async fn dispatch(
    args: cli::Args,
    cfg: govlab_core::api::AppConfig,
) -> Result<i32, error::CliError> {
    match args.command {
        cli::Commands::Run(run_args) => commands::run::handle_run(run_args, &cfg).await,
        cli::Commands::Dashboard(dash_args) => {
            commands::dashboard::handle_dashboard(dash_args, &cfg).await
        }
        cli::Commands::Session(session_args) => {
            commands::session::handle_session(session_args, &cfg).await
        }
    }
}
