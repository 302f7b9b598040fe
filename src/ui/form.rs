use crate::query::FilterTerm;
use crate::wizard::{BuildQueryResponse, FormButton, QueryEdit, SelectAgentsResponse};
use std::collections::{BTreeMap, BTreeSet};

pub const NAME_FIELD: &str = "name";
pub const DESCRIPTION_FIELD: &str = "description";
pub const NEXT_FILTER_FIELD: &str = "nextFilter";
pub const ASSIGN_TO_AGENTS_FIELD: &str = "assignToAgents";
pub const SELECTED_AGENTS_FIELD: &str = "selectedAgents";
pub const UPDATE_BUTTON: &str = "update";
pub const CANCEL_BUTTON: &str = "cancel";

const SELECTED_AGENTS_SEPARATOR: char = ';';

pub fn leading_condition_field(index: usize) -> String {
    format!("leadingCondition{index}")
}

pub fn filter_field(index: usize) -> String {
    format!("filter{index}")
}

pub fn trailing_condition_field(index: usize) -> String {
    format!("trailingCondition{index}")
}

/// Flat result of one form round trip: values keyed by field id, the field
/// that raised an on-change notification, and the buttons pressed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormResponse {
    values: BTreeMap<String, String>,
    changed_field: Option<String>,
    pressed: BTreeSet<String>,
}

impl FormResponse {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, field: &str, value: &str) -> &mut Self {
        self.values.insert(field.to_string(), value.to_string());
        self
    }

    pub fn set_checked(&mut self, field: &str, checked: bool) -> &mut Self {
        self.set(field, if checked { "True" } else { "False" })
    }

    pub fn mark_changed(&mut self, field: &str) -> &mut Self {
        self.changed_field = Some(field.to_string());
        self
    }

    pub fn press(&mut self, button: &str) -> &mut Self {
        self.pressed.insert(button.to_string());
        self
    }

    /// Missing fields read as empty, like a control that was never rendered.
    pub fn get_string(&self, field: &str) -> &str {
        self.values.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn get_checked(&self, field: &str) -> bool {
        self.get_string(field).eq_ignore_ascii_case("true")
    }

    pub fn was_on_change(&self, field: &str) -> bool {
        self.changed_field.as_deref() == Some(field)
    }

    pub fn was_button_pressed(&self, button: &str) -> bool {
        self.pressed.contains(button)
    }

    fn button(&self) -> Option<FormButton> {
        if self.was_button_pressed(CANCEL_BUTTON) {
            Some(FormButton::Cancel)
        } else if self.was_button_pressed(UPDATE_BUTTON) {
            Some(FormButton::Update)
        } else {
            None
        }
    }
}

/// Maps a BuildQuery form back onto the ordered term list. `term_count` is the
/// number of terms rendered in the round trip.
pub fn decode_build_query(form: &FormResponse, term_count: usize) -> BuildQueryResponse {
    let edit = if form.was_on_change(NEXT_FILTER_FIELD) {
        QueryEdit::NextFilter(form.get_string(NEXT_FILTER_FIELD).to_string())
    } else {
        QueryEdit::Terms(
            (0..term_count)
                .map(|index| {
                    FilterTerm::new(
                        form.get_string(&leading_condition_field(index)),
                        form.get_string(&filter_field(index)),
                        form.get_string(&trailing_condition_field(index)),
                    )
                })
                .collect(),
        )
    };
    BuildQueryResponse {
        name: form.get_string(NAME_FIELD).to_string(),
        description: form.get_string(DESCRIPTION_FIELD).to_string(),
        assign_to_agents: form.get_checked(ASSIGN_TO_AGENTS_FIELD),
        edit,
        button: form.button(),
    }
}

pub fn decode_select_agents(form: &FormResponse) -> SelectAgentsResponse {
    SelectAgentsResponse {
        selected: form
            .get_string(SELECTED_AGENTS_FIELD)
            .split(SELECTED_AGENTS_SEPARATOR)
            .map(str::trim)
            .filter(|id| !id.is_empty())
            .map(str::to_string)
            .collect(),
        button: form.button(),
    }
}

pub fn encode_selected_agents<'a>(agent_ids: impl IntoIterator<Item = &'a str>) -> String {
    agent_ids
        .into_iter()
        .collect::<Vec<_>>()
        .join(&SELECTED_AGENTS_SEPARATOR.to_string())
}
