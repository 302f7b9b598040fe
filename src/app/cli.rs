use crate::config::SettingsOverrides;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliVerb {
    Run,
    Preview,
    Help,
    Unknown,
}

pub fn parse_cli_verb(input: &str) -> CliVerb {
    match input {
        "run" => CliVerb::Run,
        "preview" => CliVerb::Preview,
        "help" | "--help" | "-h" => CliVerb::Help,
        _ => CliVerb::Unknown,
    }
}

pub fn cli_help_lines() -> Vec<String> {
    vec![
        "Usage: flowfilter [command] [flags]".to_string(),
        "".to_string(),
        "Commands:".to_string(),
        "  run [flags]                  Build a filter expression and commit it (default)"
            .to_string(),
        "  preview <query.yaml>         Validate a stored term list and print its expression"
            .to_string(),
        "  help                         Show this help".to_string(),
        "".to_string(),
        "Run flags:".to_string(),
        "  --config <path>              Settings file (default ~/.flowfilter/config.yaml)"
            .to_string(),
        "  --catalog <path>             Catalog yaml listing filters and agents".to_string(),
        "  --outbox <dir>               Directory receiving commit messages".to_string(),
        "  --log <path>                 Session log file".to_string(),
        "  --strict-nesting             Reject a closing marker before its opening one"
            .to_string(),
    ]
}

pub fn help_text() -> String {
    cli_help_lines().join("\n")
}

fn absolute_path(raw: &str) -> Result<PathBuf, String> {
    let path = Path::new(raw);
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    std::env::current_dir()
        .map(|cwd| cwd.join(path))
        .map_err(|e| format!("failed to resolve `{raw}` against the working directory: {e}"))
}

pub fn parse_run_flags(args: &[String]) -> Result<SettingsOverrides, String> {
    let mut overrides = SettingsOverrides::default();
    let mut iter = args.iter();
    while let Some(flag) = iter.next() {
        if flag == "--strict-nesting" {
            overrides.strict_nesting = true;
            continue;
        }
        let target = match flag.as_str() {
            "--config" => &mut overrides.config_path,
            "--catalog" => &mut overrides.catalog_path,
            "--outbox" => &mut overrides.outbox_path,
            "--log" => &mut overrides.log_path,
            other => return Err(format!("unknown flag `{other}`")),
        };
        let value = iter
            .next()
            .ok_or_else(|| format!("flag `{flag}` requires a value"))?;
        *target = Some(absolute_path(value)?);
    }
    Ok(overrides)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_flags_require_values() {
        let err = parse_run_flags(&["--catalog".to_string()]).expect_err("missing value");
        assert_eq!(err, "flag `--catalog` requires a value");
    }

    #[test]
    fn relative_flag_paths_become_absolute() {
        let overrides = parse_run_flags(&["--outbox".to_string(), "outbox".to_string()])
            .expect("parse flags");
        let outbox = overrides.outbox_path.expect("outbox set");
        assert!(outbox.is_absolute());
        assert!(outbox.ends_with("outbox"));
    }
}
