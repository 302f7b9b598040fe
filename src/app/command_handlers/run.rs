use crate::app::cli::parse_run_flags;
use crate::catalog::FileCatalog;
use crate::config::load_settings;
use crate::gateway::OutboxGateway;
use crate::shared::logging::WizardLog;
use crate::ui::navigation::SCRIPT_KEYS_ENV;
use crate::ui::{is_interactive_terminal, load_scripted_keys, with_terminal_ui, ScriptedUi};
use crate::wizard::{run_wizard, WizardExit};

pub fn cmd_run(args: &[String]) -> Result<String, String> {
    let overrides = parse_run_flags(args)?;
    let settings = load_settings(&overrides).map_err(|e| e.to_string())?;
    let log = settings
        .resolved_log_path()
        .map(WizardLog::to_file)
        .unwrap_or_default();
    let catalog = FileCatalog::new(&settings.catalog_path);
    let mut gateway = OutboxGateway::new(&settings.outbox_path);
    let rules = settings.validation;

    let result = if let Some(keys) = load_scripted_keys()? {
        let mut ui = ScriptedUi::new(keys);
        run_wizard(&catalog, &mut ui, &mut gateway, rules, &log)
    } else if is_interactive_terminal() {
        with_terminal_ui(|ui| run_wizard(&catalog, ui, &mut gateway, rules, &log))?
    } else {
        return Err(format!(
            "flowfilter run needs an interactive terminal; set {SCRIPT_KEYS_ENV} to drive it headless"
        ));
    };

    result
        .map(|exit| render_exit(&exit))
        .map_err(|err| format!("Adding filter failed: {err}"))
}

pub fn render_exit(exit: &WizardExit) -> String {
    match exit {
        WizardExit::Committed {
            name,
            assigned_agents,
        } if assigned_agents.is_empty() => format!("filter `{name}` updated"),
        WizardExit::Committed {
            name,
            assigned_agents,
        } => format!(
            "filter `{name}` updated and assigned to {} agent(s): {}",
            assigned_agents.len(),
            assigned_agents.join(", ")
        ),
        WizardExit::Cancelled {
            filter_pushed: false,
        } => "filter wizard cancelled".to_string(),
        WizardExit::Cancelled {
            filter_pushed: true,
        } => "filter expression updated; agent assignment cancelled".to_string(),
        WizardExit::Detached { .. } => "User detached".to_string(),
    }
}
