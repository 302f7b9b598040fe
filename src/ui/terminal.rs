use super::form::{decode_build_query, decode_select_agents};
use super::navigation::{
    form_action_from_key, parse_scripted_keys, BuildQueryControl, BuildQueryEditor, EditorEvent,
    SelectAgentsEditor, SCRIPT_KEYS_ENV,
};
use super::screens::{draw_form, project_build_query_view_model, project_select_agents_view_model};
use crate::wizard::{
    BuildQueryResponse, BuildQueryView, SelectAgentsResponse, SelectAgentsView, UiError, WizardUi,
};
use crossterm::cursor::{Hide, Show};
use crossterm::event::{self, Event, KeyEvent};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use std::collections::VecDeque;
use std::io::{self, IsTerminal};

pub fn is_interactive_terminal() -> bool {
    io::stdin().is_terminal() && io::stdout().is_terminal()
}

pub fn load_scripted_keys() -> Result<Option<Vec<KeyEvent>>, String> {
    let Ok(raw) = std::env::var(SCRIPT_KEYS_ENV) else {
        return Ok(None);
    };
    parse_scripted_keys(&raw).map(Some)
}

fn drive_build_query<F>(
    view: &BuildQueryView,
    focus: &mut Option<BuildQueryControl>,
    mut next_key: F,
) -> Result<BuildQueryResponse, UiError>
where
    F: FnMut(&BuildQueryEditor) -> Result<Option<KeyEvent>, UiError>,
{
    let mut editor = BuildQueryEditor::new(view, *focus);
    loop {
        let Some(key) = next_key(&editor)? else {
            continue;
        };
        let Some(action) = form_action_from_key(editor.is_editing_text(), key) else {
            continue;
        };
        match editor.apply(action) {
            EditorEvent::Continue => {}
            EditorEvent::Detach => return Err(UiError::Detached),
            EditorEvent::Submit(form) => {
                *focus = Some(editor.focused());
                return Ok(decode_build_query(&form, view.rows.len()));
            }
        }
    }
}

fn drive_select_agents<F>(
    view: &SelectAgentsView,
    mut next_key: F,
) -> Result<SelectAgentsResponse, UiError>
where
    F: FnMut(&SelectAgentsEditor) -> Result<Option<KeyEvent>, UiError>,
{
    let mut editor = SelectAgentsEditor::new(view);
    loop {
        let Some(key) = next_key(&editor)? else {
            continue;
        };
        let Some(action) = form_action_from_key(false, key) else {
            continue;
        };
        match editor.apply(action) {
            EditorEvent::Continue => {}
            EditorEvent::Detach => return Err(UiError::Detached),
            EditorEvent::Submit(form) => return Ok(decode_select_agents(&form)),
        }
    }
}

pub struct TerminalUi {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    focus: Option<BuildQueryControl>,
}

/// Runs `body` inside the alternate screen and restores the terminal
/// afterwards, whatever `body` returned.
pub fn with_terminal_ui<T>(body: impl FnOnce(&mut TerminalUi) -> T) -> Result<T, String> {
    let mut stdout = io::stdout();
    enable_raw_mode().map_err(|e| format!("failed to enable raw mode: {e}"))?;
    execute!(stdout, EnterAlternateScreen, Hide)
        .map_err(|e| format!("failed to enter wizard screen: {e}"))?;
    let backend = CrosstermBackend::new(stdout);
    let terminal =
        Terminal::new(backend).map_err(|e| format!("failed to create wizard terminal: {e}"))?;
    let mut ui = TerminalUi {
        terminal,
        focus: None,
    };
    let result = body(&mut ui);
    disable_raw_mode().map_err(|e| format!("failed to disable raw mode: {e}"))?;
    execute!(ui.terminal.backend_mut(), Show, LeaveAlternateScreen)
        .map_err(|e| format!("failed to leave wizard screen: {e}"))?;
    Ok(result)
}

fn read_key() -> Result<Option<KeyEvent>, UiError> {
    let ev = event::read().map_err(|e| UiError::Failed(format!("failed to read input: {e}")))?;
    match ev {
        Event::Key(key) => Ok(Some(key)),
        _ => Ok(None),
    }
}

impl WizardUi for TerminalUi {
    fn show_build_query(&mut self, view: &BuildQueryView) -> Result<BuildQueryResponse, UiError> {
        let terminal = &mut self.terminal;
        drive_build_query(view, &mut self.focus, |editor| {
            let view_model = project_build_query_view_model(editor);
            terminal
                .draw(|frame| draw_form(frame, &view_model))
                .map_err(|e| UiError::Failed(format!("failed to render build query form: {e}")))?;
            read_key()
        })
    }

    fn show_select_agents(
        &mut self,
        view: &SelectAgentsView,
    ) -> Result<SelectAgentsResponse, UiError> {
        let terminal = &mut self.terminal;
        drive_select_agents(view, |editor| {
            let view_model = project_select_agents_view_model(editor);
            terminal
                .draw(|frame| draw_form(frame, &view_model))
                .map_err(|e| {
                    UiError::Failed(format!("failed to render agent selection form: {e}"))
                })?;
            read_key()
        })
    }
}

/// Headless driver fed from a fixed key list. Running out of keys counts as
/// the operator walking away.
#[derive(Debug, Clone, Default)]
pub struct ScriptedUi {
    keys: VecDeque<KeyEvent>,
    focus: Option<BuildQueryControl>,
}

impl ScriptedUi {
    pub fn new(keys: Vec<KeyEvent>) -> Self {
        Self {
            keys: keys.into(),
            focus: None,
        }
    }

    pub fn from_script(raw: &str) -> Result<Self, String> {
        parse_scripted_keys(raw).map(Self::new)
    }

    pub fn remaining(&self) -> usize {
        self.keys.len()
    }
}

impl WizardUi for ScriptedUi {
    fn show_build_query(&mut self, view: &BuildQueryView) -> Result<BuildQueryResponse, UiError> {
        let keys = &mut self.keys;
        drive_build_query(view, &mut self.focus, |_| {
            keys.pop_front().map(Some).ok_or(UiError::Detached)
        })
    }

    fn show_select_agents(
        &mut self,
        view: &SelectAgentsView,
    ) -> Result<SelectAgentsResponse, UiError> {
        let keys = &mut self.keys;
        drive_select_agents(view, |_| keys.pop_front().map(Some).ok_or(UiError::Detached))
    }
}
