pub mod file;

pub use file::FileCatalog;

use std::collections::{BTreeMap, BTreeSet};

/// Initial value of the next-filter selector.
pub const SELECT_FILTER_PLACEHOLDER: &str = "Select Filter";
/// Divider rendered between the selector placeholder and the filter names.
pub const SEPARATOR_PLACEHOLDER: &str = "-------------";

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read catalog {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid catalog yaml in {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_yaml::Error,
    },
    #[error("malformed catalog: {0}")]
    Malformed(String),
}

/// Read-only source of the filters and agents a session may use.
pub trait CatalogSource {
    fn list_filters(&self) -> Result<BTreeSet<String>, CatalogError>;

    /// Agent id mapped to its display label.
    fn list_agents(&self) -> Result<BTreeMap<String, String>, CatalogError>;
}

pub fn is_placeholder(value: &str) -> bool {
    value == SELECT_FILTER_PLACEHOLDER || value == SEPARATOR_PLACEHOLDER
}

pub fn agent_display_label(agent_id: &str, agent_name: &str) -> String {
    format!("{agent_id} ({agent_name})")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentEntry {
    pub id: String,
    pub label: String,
}

/// Catalog contents captured once at session start.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogSnapshot {
    filters: BTreeSet<String>,
    agents: BTreeMap<String, String>,
}

impl CatalogSnapshot {
    pub fn new<I, S>(filters: I, agents: BTreeMap<String, String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            filters: filters.into_iter().map(Into::into).collect(),
            agents,
        }
    }

    pub fn load(source: &dyn CatalogSource) -> Result<Self, CatalogError> {
        let filters = source.list_filters()?;
        if let Some(reserved) = filters.iter().find(|name| is_placeholder(name)) {
            return Err(CatalogError::Malformed(format!(
                "filter name `{reserved}` is reserved"
            )));
        }
        let agents = source.list_agents()?;
        Ok(Self { filters, agents })
    }

    /// Filter names in ascending order.
    pub fn filters(&self) -> impl Iterator<Item = &str> {
        self.filters.iter().map(String::as_str)
    }

    pub fn filter_count(&self) -> usize {
        self.filters.len()
    }

    pub fn has_filters(&self) -> bool {
        !self.filters.is_empty()
    }

    pub fn contains_filter(&self, name: &str) -> bool {
        self.filters.contains(name)
    }

    pub fn agent_count(&self) -> usize {
        self.agents.len()
    }

    pub fn has_agents(&self) -> bool {
        !self.agents.is_empty()
    }

    pub fn contains_agent(&self, agent_id: &str) -> bool {
        self.agents.contains_key(agent_id)
    }

    pub fn agent_label(&self, agent_id: &str) -> Option<&str> {
        self.agents.get(agent_id).map(String::as_str)
    }

    /// Agents ordered by display label, the order the selection list uses.
    pub fn agents_by_label(&self) -> Vec<AgentEntry> {
        let mut entries: Vec<AgentEntry> = self
            .agents
            .iter()
            .map(|(id, label)| AgentEntry {
                id: id.clone(),
                label: label.clone(),
            })
            .collect();
        entries.sort_by(|left, right| {
            left.label
                .cmp(&right.label)
                .then_with(|| left.id.cmp(&right.id))
        });
        entries
    }
}
