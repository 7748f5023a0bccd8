use std::io::Read;

use govlab_core::api::{
    parse_amount_input, Composer, ExecutionPayload, Intent, ScenarioFlags, SessionConfig,
};

use crate::commands::cli::ComposeArgs;
use crate::error::CliError;

/// Config first, then command-line overrides. `--set` is applied before `--toggle`.
pub fn build_composer(cfg: &SessionConfig, args: &ComposeArgs) -> Result<Composer, CliError> {
    let amount = match args.amount.as_deref() {
        Some(raw) => parse_amount_input(raw),
        None => cfg.intent_amount_usd,
    };

    let payload_text = if let Some(text) = args.payload.as_deref() {
        text.to_string()
    } else if let Some(path) = args.payload_file.as_deref() {
        read_payload_source(path)?
    } else if let Some(path) = cfg.payload_file.as_deref() {
        read_payload_source(path)?
    } else {
        ExecutionPayload::default().text().to_string()
    };

    let mut composer = Composer::new(
        Intent::new(amount),
        ScenarioFlags::with_defaults(),
        ExecutionPayload::new(payload_text),
    );

    for assignment in &args.set {
        let (name, value) = parse_flag_assignment(assignment)?;
        composer.set_flag(name, value)?;
    }
    for name in &args.toggle {
        composer.toggle_flag(name)?;
    }

    Ok(composer)
}

/// `NAME=BOOL`
pub fn parse_flag_assignment(raw: &str) -> Result<(&str, bool), CliError> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| CliError::InvalidArgument(format!("expected NAME=BOOL, got `{raw}`")))?;
    let value = parse_bool(value)
        .ok_or_else(|| CliError::InvalidArgument(format!("not a boolean: `{value}`")))?;
    Ok((name.trim(), value))
}

pub fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "on" | "yes" => Some(true),
        "false" | "0" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Payload source name that reads standard input.
pub const STDIN_SOURCE: &str = "-";

/// Reads payload text verbatim from a path (with `~` expansion) or `-` for stdin.
pub fn read_payload_source(path: &str) -> Result<String, CliError> {
    if path == STDIN_SOURCE {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .map_err(|e| CliError::io("failed to read payload from stdin", e))?;
        return Ok(buf);
    }
    let expanded = shellexpand::tilde(path);
    std::fs::read_to_string(expanded.as_ref())
        .map_err(|e| CliError::io(format!("failed to read payload file {expanded}"), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use govlab_core::api::LabError;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    #[test]
    fn defaults_come_from_config() {
        let cfg = SessionConfig {
            intent_amount_usd: 99.0,
            payload_file: None,
        };
        let c = build_composer(&cfg, &ComposeArgs::default()).unwrap();
        assert_eq!(c.intent().amount_usd, 99.0);
        assert_eq!(c.scenario(), &ScenarioFlags::with_defaults());
        assert_eq!(c.payload(), &ExecutionPayload::default());
    }

    #[test]
    fn overrides_apply_set_then_toggle() {
        let args = ComposeArgs {
            amount: Some("abc".into()),
            set: vec!["replay_attempt=true".into(), "new_recipient=off".into()],
            toggle: vec!["replay_attempt".into()],
            payload: Some("{ invalid".into()),
            payload_file: None,
        };
        let c = build_composer(&SessionConfig::default(), &args).unwrap();
        assert!(c.intent().amount_usd.is_nan());
        assert_eq!(c.scenario().get("replay_attempt"), Some(false));
        assert_eq!(c.scenario().get("new_recipient"), Some(false));
        assert_eq!(c.payload().text(), "{ invalid");
    }

    #[test]
    fn unknown_flag_is_reported() {
        let args = ComposeArgs {
            toggle: vec!["nope".into()],
            ..Default::default()
        };
        let err = build_composer(&SessionConfig::default(), &args).unwrap_err();
        assert!(matches!(err, CliError::Lab(LabError::UnknownScenarioFlag(_))));
    }

    #[test]
    fn payload_file_is_read_verbatim() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "{{\"method\": \"release\"}}").unwrap();
        let args = ComposeArgs {
            payload_file: Some(f.path().display().to_string()),
            ..Default::default()
        };
        let c = build_composer(&SessionConfig::default(), &args).unwrap();
        assert_eq!(c.payload().text(), "{\"method\": \"release\"}\n");
    }

    #[test]
    fn flag_assignment_parsing() {
        assert_eq!(parse_flag_assignment("a=true").unwrap(), ("a", true));
        assert_eq!(parse_flag_assignment(" b = 0").unwrap(), ("b", false));
        assert!(parse_flag_assignment("a").is_err());
        assert!(parse_flag_assignment("a=maybe").is_err());
    }
}
