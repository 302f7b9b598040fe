use crate::app::cli::{help_text, parse_cli_verb, CliVerb};

pub mod preview;
pub mod run;

/// `run` is the default verb: no arguments, or flags without a verb, start
/// the wizard.
pub fn run_cli(args: Vec<String>) -> Result<String, String> {
    let Some(first) = args.first() else {
        return run::cmd_run(&[]);
    };
    if first.starts_with("--") && parse_cli_verb(first) != CliVerb::Help {
        return run::cmd_run(&args);
    }

    match parse_cli_verb(first) {
        CliVerb::Run => run::cmd_run(&args[1..]),
        CliVerb::Preview => preview::cmd_preview(&args[1..]),
        CliVerb::Help => Ok(help_text()),
        CliVerb::Unknown => Err(format!("unknown command `{first}`")),
    }
}
