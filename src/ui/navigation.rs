use super::form::{
    encode_selected_agents, filter_field, leading_condition_field, trailing_condition_field,
    FormResponse, ASSIGN_TO_AGENTS_FIELD, CANCEL_BUTTON, DESCRIPTION_FIELD, NAME_FIELD,
    NEXT_FILTER_FIELD, SELECTED_AGENTS_FIELD, UPDATE_BUTTON,
};
use super::screens::{field_row, FormRow};
use crate::query::{serialize_terms, FilterTerm};
use crate::wizard::{BuildQueryView, SelectAgentsView};
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

pub const SCRIPT_KEYS_ENV: &str = "FLOWFILTER_SCRIPT_KEYS";

pub const BUILD_QUERY_HINT_TEXT: &str =
    "Up/Down move | Left/Right change | Enter edit/toggle/press | Esc cancel";
pub const TEXT_EDIT_HINT_TEXT: &str = "Type to edit | Backspace delete | Enter/Esc done";
pub const SELECT_AGENTS_HINT_TEXT: &str = "Up/Down move | Enter/Space toggle | Esc cancel";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormAction {
    MovePrev,
    MoveNext,
    PrevOption,
    NextOption,
    Activate,
    Cancel,
    Detach,
    Input(char),
    Backspace,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    Continue,
    Submit(FormResponse),
    Detach,
}

pub fn form_action_from_key(editing_text: bool, key: KeyEvent) -> Option<FormAction> {
    if key.kind == KeyEventKind::Release {
        return None;
    }
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return Some(FormAction::Detach);
    }
    if editing_text {
        return match key.code {
            KeyCode::Enter | KeyCode::Esc => Some(FormAction::Activate),
            KeyCode::Backspace => Some(FormAction::Backspace),
            KeyCode::Char(ch) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                Some(FormAction::Input(ch))
            }
            _ => None,
        };
    }
    match key.code {
        KeyCode::Up => Some(FormAction::MovePrev),
        KeyCode::Down => Some(FormAction::MoveNext),
        KeyCode::Left => Some(FormAction::PrevOption),
        KeyCode::Right => Some(FormAction::NextOption),
        KeyCode::Enter | KeyCode::Char('\n') | KeyCode::Char('\r') | KeyCode::Char(' ') => {
            Some(FormAction::Activate)
        }
        KeyCode::Esc => Some(FormAction::Cancel),
        _ => None,
    }
}

/// Parses comma-separated key tokens. `type:<text>` expands to one key per
/// character.
pub fn parse_scripted_keys(raw: &str) -> Result<Vec<KeyEvent>, String> {
    let mut keys = Vec::new();
    for token in raw.split(',') {
        let trimmed = token.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(text) = trimmed.strip_prefix("type:") {
            keys.extend(
                text.chars()
                    .map(|ch| KeyEvent::new(KeyCode::Char(ch), KeyModifiers::NONE)),
            );
            continue;
        }
        let key = match trimmed.to_ascii_lowercase().as_str() {
            "up" => KeyEvent::new(KeyCode::Up, KeyModifiers::NONE),
            "down" => KeyEvent::new(KeyCode::Down, KeyModifiers::NONE),
            "left" => KeyEvent::new(KeyCode::Left, KeyModifiers::NONE),
            "right" => KeyEvent::new(KeyCode::Right, KeyModifiers::NONE),
            "enter" => KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE),
            "space" => KeyEvent::new(KeyCode::Char(' '), KeyModifiers::NONE),
            "esc" => KeyEvent::new(KeyCode::Esc, KeyModifiers::NONE),
            "backspace" => KeyEvent::new(KeyCode::Backspace, KeyModifiers::NONE),
            "ctrl-c" => KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL),
            other => {
                return Err(format!(
                    "invalid {SCRIPT_KEYS_ENV} token `{other}`; valid tokens: up,down,left,right,enter,space,esc,backspace,ctrl-c,type:<text>"
                ));
            }
        };
        keys.push(key);
    }
    Ok(keys)
}

pub fn clamp_selection(selected: usize, len: usize) -> usize {
    if len == 0 {
        return 0;
    }
    selected.min(len - 1)
}

fn move_selection(selected: usize, len: usize, action: FormAction) -> usize {
    match action {
        FormAction::MovePrev => selected.saturating_sub(1),
        FormAction::MoveNext => clamp_selection(selected + 1, len),
        _ => selected,
    }
}

fn cycle_option(options: &[String], current: &str, forward: bool) -> Option<String> {
    if options.is_empty() {
        return None;
    }
    let len = options.len();
    let next = match options.iter().position(|option| option == current) {
        None => 0,
        Some(position) if forward => (position + 1) % len,
        Some(position) => (position + len - 1) % len,
    };
    Some(options[next].clone())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BuildQueryControl {
    Name,
    Description,
    Leading(usize),
    Filter(usize),
    Trailing(usize),
    NextFilter,
    AssignToAgents,
    Update,
    Cancel,
}

fn build_query_controls(view: &BuildQueryView) -> Vec<BuildQueryControl> {
    let mut controls = vec![BuildQueryControl::Name, BuildQueryControl::Description];
    if !view.has_filters() {
        controls.push(BuildQueryControl::Cancel);
        return controls;
    }
    for (index, row) in view.rows.iter().enumerate() {
        controls.push(BuildQueryControl::Leading(index));
        controls.push(BuildQueryControl::Filter(index));
        if !row.trailing_options.is_empty() {
            controls.push(BuildQueryControl::Trailing(index));
        }
    }
    controls.extend([
        BuildQueryControl::NextFilter,
        BuildQueryControl::AssignToAgents,
        BuildQueryControl::Update,
        BuildQueryControl::Cancel,
    ]);
    controls
}

/// Working copy of the BuildQuery form between two round trips. Operator
/// connective changes, a next-filter pick and the buttons submit the form;
/// filter renames, text and the checkbox wait for the next submission.
#[derive(Debug, Clone)]
pub struct BuildQueryEditor {
    view: BuildQueryView,
    name: String,
    description: String,
    assign_to_agents: bool,
    terms: Vec<FilterTerm>,
    next_filter: usize,
    controls: Vec<BuildQueryControl>,
    selected: usize,
    editing_text: bool,
}

impl BuildQueryEditor {
    pub fn new(view: &BuildQueryView, focus: Option<BuildQueryControl>) -> Self {
        let controls = build_query_controls(view);
        let selected = focus
            .and_then(|control| controls.iter().position(|candidate| *candidate == control))
            .unwrap_or(0);
        Self {
            view: view.clone(),
            name: view.name.clone(),
            description: view.description.clone(),
            assign_to_agents: view.assign_to_agents,
            terms: view.rows.iter().map(|row| row.term.clone()).collect(),
            next_filter: 0,
            controls,
            selected,
            editing_text: false,
        }
    }

    pub fn controls(&self) -> &[BuildQueryControl] {
        &self.controls
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn focused(&self) -> BuildQueryControl {
        self.controls[clamp_selection(self.selected, self.controls.len())]
    }

    pub fn is_editing_text(&self) -> bool {
        self.editing_text
    }

    pub fn has_filters(&self) -> bool {
        self.view.has_filters()
    }

    pub fn status_text(&self) -> &str {
        &self.view.error_message
    }

    pub fn hint_text(&self) -> &'static str {
        if self.editing_text {
            TEXT_EDIT_HINT_TEXT
        } else {
            BUILD_QUERY_HINT_TEXT
        }
    }

    pub fn expression_preview(&self) -> String {
        serialize_terms(&self.terms).trim_end().to_string()
    }

    fn next_filter_choice(&self) -> &str {
        self.view
            .next_filter_options
            .get(self.next_filter)
            .map(String::as_str)
            .unwrap_or("")
    }

    pub fn apply(&mut self, action: FormAction) -> EditorEvent {
        if action == FormAction::Detach {
            return EditorEvent::Detach;
        }
        if self.editing_text {
            self.apply_text_edit(action);
            return EditorEvent::Continue;
        }
        match action {
            FormAction::MovePrev | FormAction::MoveNext => {
                self.selected = move_selection(self.selected, self.controls.len(), action);
                EditorEvent::Continue
            }
            FormAction::Cancel => self.submit_pressed(CANCEL_BUTTON),
            FormAction::PrevOption | FormAction::NextOption | FormAction::Activate => {
                self.apply_to_focused(action)
            }
            FormAction::Input(_) | FormAction::Backspace | FormAction::Detach => {
                EditorEvent::Continue
            }
        }
    }

    fn apply_text_edit(&mut self, action: FormAction) {
        let target = match self.focused() {
            BuildQueryControl::Name => &mut self.name,
            BuildQueryControl::Description => &mut self.description,
            _ => {
                self.editing_text = false;
                return;
            }
        };
        match action {
            FormAction::Input(ch) => target.push(ch),
            FormAction::Backspace => {
                target.pop();
            }
            FormAction::Activate | FormAction::Cancel => self.editing_text = false,
            _ => {}
        }
    }

    fn apply_to_focused(&mut self, action: FormAction) -> EditorEvent {
        let forward = action != FormAction::PrevOption;
        match self.focused() {
            BuildQueryControl::Name | BuildQueryControl::Description => {
                if action == FormAction::Activate {
                    self.editing_text = true;
                }
                EditorEvent::Continue
            }
            BuildQueryControl::Leading(index) => {
                let options = &self.view.rows[index].leading_options;
                match cycle_option(options, &self.terms[index].leading_token, forward) {
                    Some(token) => {
                        self.terms[index].leading_token = token;
                        self.submit_changed(&leading_condition_field(index))
                    }
                    None => EditorEvent::Continue,
                }
            }
            BuildQueryControl::Trailing(index) => {
                let options = &self.view.rows[index].trailing_options;
                match cycle_option(options, &self.terms[index].trailing_token, forward) {
                    Some(token) => {
                        self.terms[index].trailing_token = token;
                        self.submit_changed(&trailing_condition_field(index))
                    }
                    None => EditorEvent::Continue,
                }
            }
            BuildQueryControl::Filter(index) => {
                if let Some(name) = cycle_option(
                    &self.view.filter_options,
                    &self.terms[index].filter_name,
                    forward,
                ) {
                    self.terms[index].filter_name = name;
                }
                EditorEvent::Continue
            }
            BuildQueryControl::NextFilter => {
                let len = self.view.next_filter_options.len();
                match action {
                    FormAction::Activate => self.submit_changed(NEXT_FILTER_FIELD),
                    _ if len == 0 => EditorEvent::Continue,
                    FormAction::NextOption => {
                        self.next_filter = (self.next_filter + 1) % len;
                        EditorEvent::Continue
                    }
                    _ => {
                        self.next_filter = (self.next_filter + len - 1) % len;
                        EditorEvent::Continue
                    }
                }
            }
            BuildQueryControl::AssignToAgents => {
                self.assign_to_agents = !self.assign_to_agents;
                EditorEvent::Continue
            }
            BuildQueryControl::Update if action == FormAction::Activate => {
                self.submit_pressed(UPDATE_BUTTON)
            }
            BuildQueryControl::Cancel if action == FormAction::Activate => {
                self.submit_pressed(CANCEL_BUTTON)
            }
            BuildQueryControl::Update | BuildQueryControl::Cancel => EditorEvent::Continue,
        }
    }

    fn submit_changed(&self, field: &str) -> EditorEvent {
        let mut form = self.form();
        form.mark_changed(field);
        EditorEvent::Submit(form)
    }

    fn submit_pressed(&self, button: &str) -> EditorEvent {
        let mut form = self.form();
        form.press(button);
        EditorEvent::Submit(form)
    }

    /// Current field values. Closing controls that were not rendered are
    /// omitted, so they read back as empty.
    pub fn form(&self) -> FormResponse {
        let mut form = FormResponse::new();
        form.set(NAME_FIELD, &self.name)
            .set(DESCRIPTION_FIELD, &self.description)
            .set_checked(ASSIGN_TO_AGENTS_FIELD, self.assign_to_agents)
            .set(NEXT_FILTER_FIELD, self.next_filter_choice());
        for (index, (term, row)) in self.terms.iter().zip(&self.view.rows).enumerate() {
            form.set(&leading_condition_field(index), &term.leading_token)
                .set(&filter_field(index), &term.filter_name);
            if !row.trailing_options.is_empty() {
                form.set(&trailing_condition_field(index), &term.trailing_token);
            }
        }
        form
    }

    pub fn rows(&self) -> Vec<FormRow> {
        self.controls
            .iter()
            .map(|control| match *control {
                BuildQueryControl::Name => field_row("Name", Some(self.text_value(&self.name, 0))),
                BuildQueryControl::Description => {
                    field_row("Description", Some(self.text_value(&self.description, 1)))
                }
                BuildQueryControl::Leading(index) => field_row(
                    &format!("Filter {} operator", index + 1),
                    Some(display_token(&self.terms[index].leading_token)),
                ),
                BuildQueryControl::Filter(index) => field_row(
                    &format!("Filter {}", index + 1),
                    Some(self.terms[index].filter_name.clone()),
                ),
                BuildQueryControl::Trailing(index) => field_row(
                    &format!("Filter {} closing", index + 1),
                    Some(display_token(&self.terms[index].trailing_token)),
                ),
                BuildQueryControl::NextFilter => {
                    field_row("Add filter", Some(format!("< {} >", self.next_filter_choice())))
                }
                BuildQueryControl::AssignToAgents => field_row(
                    "Assign To Agents",
                    Some(if self.assign_to_agents { "[x]" } else { "[ ]" }.to_string()),
                ),
                BuildQueryControl::Update => field_row("[ Update ]", None),
                BuildQueryControl::Cancel => field_row("[ Cancel ]", None),
            })
            .collect()
    }

    fn text_value(&self, value: &str, position: usize) -> String {
        if self.editing_text && self.selected == position {
            format!("{value}_")
        } else {
            value.to_string()
        }
    }
}

fn display_token(token: &str) -> String {
    if token.is_empty() {
        "<none>".to_string()
    } else {
        token.to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectAgentsControl {
    Agent(usize),
    Update,
    Cancel,
}

#[derive(Debug, Clone)]
pub struct SelectAgentsEditor {
    view: SelectAgentsView,
    checked: Vec<bool>,
    controls: Vec<SelectAgentsControl>,
    selected: usize,
}

impl SelectAgentsEditor {
    pub fn new(view: &SelectAgentsView) -> Self {
        let mut controls: Vec<SelectAgentsControl> = (0..view.agents.len())
            .map(SelectAgentsControl::Agent)
            .collect();
        if !view.agents.is_empty() {
            controls.push(SelectAgentsControl::Update);
        }
        controls.push(SelectAgentsControl::Cancel);
        Self {
            checked: view.agents.iter().map(|agent| agent.selected).collect(),
            view: view.clone(),
            controls,
            selected: 0,
        }
    }

    pub fn controls(&self) -> &[SelectAgentsControl] {
        &self.controls
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn has_agents(&self) -> bool {
        !self.view.agents.is_empty()
    }

    pub fn status_text(&self) -> &str {
        &self.view.error_message
    }

    pub fn apply(&mut self, action: FormAction) -> EditorEvent {
        match action {
            FormAction::Detach => EditorEvent::Detach,
            FormAction::MovePrev | FormAction::MoveNext => {
                self.selected = move_selection(self.selected, self.controls.len(), action);
                EditorEvent::Continue
            }
            FormAction::Cancel => self.submit_pressed(CANCEL_BUTTON),
            FormAction::Activate | FormAction::PrevOption | FormAction::NextOption => {
                match self.controls[clamp_selection(self.selected, self.controls.len())] {
                    SelectAgentsControl::Agent(index) => {
                        self.checked[index] = !self.checked[index];
                        EditorEvent::Continue
                    }
                    SelectAgentsControl::Update if action == FormAction::Activate => {
                        self.submit_pressed(UPDATE_BUTTON)
                    }
                    SelectAgentsControl::Cancel if action == FormAction::Activate => {
                        self.submit_pressed(CANCEL_BUTTON)
                    }
                    SelectAgentsControl::Update | SelectAgentsControl::Cancel => {
                        EditorEvent::Continue
                    }
                }
            }
            FormAction::Input(_) | FormAction::Backspace => EditorEvent::Continue,
        }
    }

    fn submit_pressed(&self, button: &str) -> EditorEvent {
        let mut form = self.form();
        form.press(button);
        EditorEvent::Submit(form)
    }

    pub fn form(&self) -> FormResponse {
        let selected = self
            .view
            .agents
            .iter()
            .zip(&self.checked)
            .filter(|(_, checked)| **checked)
            .map(|(agent, _)| agent.id.as_str());
        let mut form = FormResponse::new();
        form.set(SELECTED_AGENTS_FIELD, &encode_selected_agents(selected));
        form
    }

    pub fn rows(&self) -> Vec<FormRow> {
        self.controls
            .iter()
            .map(|control| match *control {
                SelectAgentsControl::Agent(index) => field_row(
                    if self.checked[index] { "[x]" } else { "[ ]" },
                    Some(self.view.agents[index].label.clone()),
                ),
                SelectAgentsControl::Update => field_row("[ Update ]", None),
                SelectAgentsControl::Cancel => field_row("[ Cancel ]", None),
            })
            .collect()
    }
}
