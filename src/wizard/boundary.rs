use super::session::WizardSession;
use crate::catalog::{CatalogSnapshot, SELECT_FILTER_PLACEHOLDER, SEPARATOR_PLACEHOLDER};
use crate::query::{leading_token_options, trailing_token_options, FilterTerm};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormButton {
    Update,
    Cancel,
}

/// Reconciliation input of one BuildQuery round trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryEdit {
    /// The next-filter selector changed to this value.
    NextFilter(String),
    /// Any other interaction: the full edited term list, in order.
    Terms(Vec<FilterTerm>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildQueryResponse {
    pub name: String,
    pub description: String,
    pub assign_to_agents: bool,
    pub edit: QueryEdit,
    pub button: Option<FormButton>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAgentsResponse {
    pub selected: Vec<String>,
    pub button: Option<FormButton>,
}

#[derive(Debug, thiserror::Error)]
pub enum UiError {
    #[error("operator detached from the session")]
    Detached,
    #[error("{0}")]
    Failed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermRowView {
    pub term: FilterTerm,
    pub leading_options: Vec<String>,
    /// Empty when no group is open at this term.
    pub trailing_options: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildQueryView {
    pub name: String,
    pub description: String,
    pub assign_to_agents: bool,
    pub rows: Vec<TermRowView>,
    pub filter_options: Vec<String>,
    pub next_filter_options: Vec<String>,
    pub error_message: String,
}

impl BuildQueryView {
    pub fn has_filters(&self) -> bool {
        !self.filter_options.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentOptionView {
    pub id: String,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectAgentsView {
    pub agents: Vec<AgentOptionView>,
    pub error_message: String,
}

/// The interactive surface the state machine drives. One call is one
/// render-then-respond round trip.
pub trait WizardUi {
    fn show_build_query(&mut self, view: &BuildQueryView) -> Result<BuildQueryResponse, UiError>;

    fn show_select_agents(
        &mut self,
        view: &SelectAgentsView,
    ) -> Result<SelectAgentsResponse, UiError>;
}

pub fn project_build_query_view(
    session: &WizardSession,
    catalog: &CatalogSnapshot,
) -> BuildQueryView {
    let terms = session.query.terms();
    let rows = terms
        .iter()
        .enumerate()
        .map(|(index, term)| TermRowView {
            term: term.clone(),
            leading_options: leading_token_options(index)
                .iter()
                .map(|token| token.to_string())
                .collect(),
            trailing_options: trailing_token_options(session.query.open_depth_at(index)),
        })
        .collect();

    let filter_options: Vec<String> = catalog.filters().map(str::to_string).collect();
    let mut next_filter_options = Vec::with_capacity(filter_options.len() + 2);
    next_filter_options.push(SELECT_FILTER_PLACEHOLDER.to_string());
    next_filter_options.push(SEPARATOR_PLACEHOLDER.to_string());
    next_filter_options.extend(filter_options.iter().cloned());

    BuildQueryView {
        name: session.query.name.clone(),
        description: session.query.description.clone(),
        assign_to_agents: session.assign_to_agents,
        rows,
        filter_options,
        next_filter_options,
        error_message: session.error_message.clone(),
    }
}

pub fn project_select_agents_view(
    session: &WizardSession,
    catalog: &CatalogSnapshot,
) -> SelectAgentsView {
    SelectAgentsView {
        agents: catalog
            .agents_by_label()
            .into_iter()
            .map(|entry| AgentOptionView {
                selected: session.agents.is_selected(&entry.id),
                id: entry.id,
                label: entry.label,
            })
            .collect(),
        error_message: session.error_message.clone(),
    }
}
