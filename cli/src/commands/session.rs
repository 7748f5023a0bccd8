use std::io::Write;

use govlab_core::api::{
    parse_amount_input, render, AppConfig, Composer, LabError, LabSession, RunCycle,
};
use govlab_plugins::factory::build_session;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;

use crate::commands::cli::SessionArgs;
use crate::compose::{build_composer, parse_bool, read_payload_source, STDIN_SOURCE};
use crate::error::CliError;
use crate::output;

const HELP: &str = "\
commands:
  amount <n>          set intent amount (USD)
  toggle <flag>       flip a scenario flag
  set <flag> <bool>   set a scenario flag
  flags               list scenario flags
  payload             edit payload; end input with a line containing only `.`
  load <file>         replace payload with file contents
  show                print composer state
  run                 execute a simulation run
  ledger              refresh and print the cumulative ledger
  help                this text
  quit                leave the session";

const PAYLOAD_END: &str = ".";

#[derive(Debug, Clone, PartialEq)]
pub enum SessionCommand {
    Empty,
    Amount(String),
    Toggle(String),
    Set(String, bool),
    Flags,
    Payload,
    Load(String),
    Show,
    Run,
    Ledger,
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<SessionCommand, String> {
    let line = line.trim();
    let (head, rest) = match line.split_once(char::is_whitespace) {
        Some((h, r)) => (h, r.trim()),
        None => (line, ""),
    };

    let need = |what: &str| -> Result<String, String> {
        if rest.is_empty() {
            Err(format!("`{head}` needs {what}"))
        } else {
            Ok(rest.to_string())
        }
    };

    match head {
        "" => Ok(SessionCommand::Empty),
        "amount" => need("a value").map(SessionCommand::Amount),
        "toggle" => need("a flag name").map(SessionCommand::Toggle),
        "set" => {
            let mut parts = rest.split_whitespace();
            match (parts.next(), parts.next().and_then(parse_bool), parts.next()) {
                (Some(name), Some(value), None) => Ok(SessionCommand::Set(name.to_string(), value)),
                _ => Err("usage: set <flag> <true|false>".to_string()),
            }
        }
        "flags" => Ok(SessionCommand::Flags),
        "payload" => Ok(SessionCommand::Payload),
        "load" if rest == STDIN_SOURCE => {
            Err("stdin carries session commands; `load` needs a file path".to_string())
        }
        "load" => need("a file path").map(SessionCommand::Load),
        "show" => Ok(SessionCommand::Show),
        "run" | "execute" => Ok(SessionCommand::Run),
        "ledger" | "dashboard" => Ok(SessionCommand::Ledger),
        "help" | "?" => Ok(SessionCommand::Help),
        "quit" | "exit" => Ok(SessionCommand::Quit),
        other => Err(format!("unknown command `{other}` (try `help`)")),
    }
}

/// Stdin is the command stream here, so a payload cannot also be read from it.
pub fn ensure_payload_not_from_stdin(args: &SessionArgs, cfg: &AppConfig) -> Result<(), CliError> {
    let source = args
        .compose
        .payload_file
        .as_deref()
        .or(cfg.session.payload_file.as_deref());
    if args.compose.payload.is_none() && source == Some(STDIN_SOURCE) {
        return Err(CliError::InvalidArgument(
            "`session` reads commands from stdin; pass a payload file path instead of `-`"
                .to_string(),
        ));
    }
    Ok(())
}

pub async fn handle_session(args: SessionArgs, cfg: &AppConfig) -> Result<i32, CliError> {
    ensure_payload_not_from_stdin(&args, cfg)?;
    let mut composer = build_composer(&cfg.session, &args.compose)?;

    let (tx, rx) = mpsc::unbounded_channel();
    let progress = output::spawn_progress(rx);
    let session = build_session(&cfg.api)?.with_events(tx);

    match session.refresh_ledger().await {
        Ok(ledger) => output::print_ledger(&ledger),
        Err(e) => output::notice("ledger unavailable", &e),
    }
    println!("{HELP}");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        prompt()?;
        let Some(line) = next_line(&mut lines).await? else {
            break;
        };
        let cmd = match parse_command(&line) {
            Ok(cmd) => cmd,
            Err(msg) => {
                eprintln!("{msg}");
                continue;
            }
        };
        tracing::debug!(target: "govlab.cli", command = ?cmd, "session command");

        match cmd {
            SessionCommand::Empty => {}
            SessionCommand::Amount(raw) => {
                composer.set_intent_amount(parse_amount_input(&raw));
                println!("intent amount: {}", composer.intent().amount_usd);
            }
            SessionCommand::Toggle(name) => match composer.toggle_flag(&name) {
                Ok(value) => println!("{name} = {value}"),
                Err(e) => output::notice("toggle failed", &e),
            },
            SessionCommand::Set(name, value) => match composer.set_flag(&name, value) {
                Ok(()) => println!("{name} = {value}"),
                Err(e) => output::notice("set failed", &e),
            },
            SessionCommand::Flags => {
                for row in render::toggle_rows(composer.scenario()) {
                    println!("{} = {}", row.name, row.checked);
                }
            }
            SessionCommand::Payload => {
                println!("enter payload, end with `{PAYLOAD_END}` on its own line");
                let text = read_payload_lines(&mut lines).await?;
                composer.edit_payload(text);
            }
            SessionCommand::Load(path) => match read_payload_source(&path) {
                Ok(text) => composer.edit_payload(text),
                Err(e) => eprintln!("{e}"),
            },
            SessionCommand::Show => print!("{}", render::render_composer(&composer)),
            SessionCommand::Run => run_once(&session, &composer).await,
            SessionCommand::Ledger => match session.refresh_ledger().await {
                Ok(ledger) => output::print_ledger(&ledger),
                Err(e) => output::notice("ledger refresh failed", &e),
            },
            SessionCommand::Help => println!("{HELP}"),
            SessionCommand::Quit => break,
        }
    }

    drop(session);
    let _ = progress.await;
    Ok(0)
}

async fn run_once(session: &LabSession, composer: &Composer) {
    match session.execute_run(composer).await {
        Ok(RunCycle::Completed(report)) => {
            output::print_cycle(
                &report,
                session.last_result().as_ref(),
                session.ledger().as_ref(),
            );
        }
        Ok(RunCycle::Busy) => eprintln!("a run is already in flight"),
        Err(e @ LabError::ConfigurationMissing) => output::notice("run refused", &e),
        Err(e) => output::notice("run aborted", &e),
    }
}

async fn read_payload_lines(lines: &mut Lines<BufReader<Stdin>>) -> Result<String, CliError> {
    let mut buf: Vec<String> = Vec::new();
    while let Some(line) = next_line(lines).await? {
        if line.trim_end() == PAYLOAD_END {
            break;
        }
        buf.push(line);
    }
    Ok(buf.join("\n"))
}

async fn next_line(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>, CliError> {
    lines
        .next_line()
        .await
        .map_err(|e| CliError::io("failed to read from stdin", e))
}

fn prompt() -> Result<(), CliError> {
    let mut out = std::io::stdout();
    write!(out, "govlab> ").map_err(|e| CliError::io("failed to write prompt", e))?;
    out.flush().map_err(|e| CliError::io("failed to write prompt", e))
}
