use crate::catalog::CatalogSnapshot;
use crate::query::FilterQuery;
use std::collections::BTreeSet;

use super::error::StepRejection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardStep {
    BuildQuery,
    SelectAgents,
    Update,
    Assign,
    Finished,
}

impl WizardStep {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::BuildQuery => "build_query",
            Self::SelectAgents => "select_agents",
            Self::Update => "update",
            Self::Assign => "assign",
            Self::Finished => "finished",
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgentSelection {
    selected: BTreeSet<String>,
}

impl AgentSelection {
    /// Replaces the selection with the catalog agents among `agent_ids`.
    /// Unknown ids are dropped.
    pub fn replace<I, S>(&mut self, agent_ids: I, catalog: &CatalogSnapshot)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.selected = agent_ids
            .into_iter()
            .map(|id| id.as_ref().trim().to_string())
            .filter(|id| catalog.contains_agent(id))
            .collect();
    }

    pub fn is_selected(&self, agent_id: &str) -> bool {
        self.selected.contains(agent_id)
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.selected.iter().map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardExit {
    Committed {
        name: String,
        assigned_agents: Vec<String>,
    },
    Cancelled {
        filter_pushed: bool,
    },
    Detached {
        filter_pushed: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WizardSession {
    pub query: FilterQuery,
    pub agents: AgentSelection,
    pub assign_to_agents: bool,
    pub step: WizardStep,
    pub error_message: String,
    pub last_rejection: Option<StepRejection>,
    pub filter_pushed: bool,
    pub assigned_agents: Vec<String>,
    pub cancelled: bool,
}

impl Default for WizardSession {
    fn default() -> Self {
        Self::new()
    }
}

impl WizardSession {
    pub fn new() -> Self {
        Self {
            query: FilterQuery::default(),
            agents: AgentSelection::default(),
            assign_to_agents: false,
            step: WizardStep::BuildQuery,
            error_message: String::new(),
            last_rejection: None,
            filter_pushed: false,
            assigned_agents: Vec::new(),
            cancelled: false,
        }
    }

    pub fn reject(&mut self, rejection: StepRejection) {
        self.error_message = rejection.to_string();
        self.last_rejection = Some(rejection);
    }

    pub fn clear_error(&mut self) {
        self.error_message.clear();
        self.last_rejection = None;
    }

    pub fn is_finished(&self) -> bool {
        self.step == WizardStep::Finished
    }

    pub fn exit(&self) -> WizardExit {
        if self.cancelled {
            WizardExit::Cancelled {
                filter_pushed: self.filter_pushed,
            }
        } else {
            WizardExit::Committed {
                name: self.query.name.clone(),
                assigned_agents: self.assigned_agents.clone(),
            }
        }
    }
}
