use std::path::PathBuf;

use clap::{Args as ClapArgs, Parser, Subcommand};

#[derive(clap::ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "govlab", version, about = "Sandbox client for the execution governance lab")]
pub struct Args {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to ./govlab.toml, then the user config dir).
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Sandbox API base URL; overrides config and GOVLAB_SANDBOX_API.
    #[arg(long, global = true)]
    pub base_url: Option<String>,
}

/// Initial composer state. Applied on top of the `[session]` config section.
#[derive(ClapArgs, Debug, Clone, Default)]
pub struct ComposeArgs {
    /// Intent amount in USD. Not validated; unparseable input is sent as null.
    #[arg(long, allow_hyphen_values = true)]
    pub amount: Option<String>,

    /// Set a scenario flag explicitly (NAME=true|false). Can be specified multiple times.
    #[arg(long = "set", value_name = "NAME=BOOL", action = clap::ArgAction::Append)]
    pub set: Vec<String>,

    /// Flip a scenario flag. Applied after `--set`.
    #[arg(long = "toggle", value_name = "NAME", action = clap::ArgAction::Append)]
    pub toggle: Vec<String>,

    /// Execution payload as inline JSON text.
    #[arg(long, group = "payload_source")]
    pub payload: Option<String>,

    /// Read the execution payload from a file, or `-` for stdin.
    #[arg(long, group = "payload_source")]
    pub payload_file: Option<String>,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct RunArgs {
    #[command(flatten)]
    pub compose: ComposeArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct DashboardArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

#[derive(ClapArgs, Debug, Clone)]
pub struct SessionArgs {
    #[command(flatten)]
    pub compose: ComposeArgs,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Execute one simulation run and print the decision, economics and ledger.
    Run(RunArgs),
    /// Print the cumulative ledger.
    Dashboard(DashboardArgs),
    /// Interactive session: edit the scenario and run repeatedly.
    Session(SessionArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_flags() {
        let args = Args::try_parse_from([
            "govlab",
            "--base-url",
            "http://localhost:8080",
            "run",
            "--amount",
            "-10",
            "--set",
            "replay_attempt=true",
            "--toggle",
            "high_velocity",
            "--format",
            "json",
        ])
        .unwrap();
        assert_eq!(args.base_url.as_deref(), Some("http://localhost:8080"));
        match args.command {
            Commands::Run(run) => {
                assert_eq!(run.compose.amount.as_deref(), Some("-10"));
                assert_eq!(run.compose.set, ["replay_attempt=true"]);
                assert_eq!(run.compose.toggle, ["high_velocity"]);
                assert_eq!(run.format, OutputFormat::Json);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn payload_sources_are_exclusive() {
        let res = Args::try_parse_from([
            "govlab",
            "run",
            "--payload",
            "{}",
            "--payload-file",
            "p.json",
        ]);
        assert!(res.is_err());
    }
}
