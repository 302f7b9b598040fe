use super::{agent_display_label, CatalogError, CatalogSource};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    filters: Vec<String>,
    #[serde(default)]
    agents: Vec<AgentRecord>,
}

#[derive(Debug, Deserialize)]
struct AgentRecord {
    id: String,
    #[serde(default)]
    name: String,
}

/// Catalog backed by a YAML file with `filters` and `agents` lists.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> Result<CatalogFile, CatalogError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| CatalogError::Parse {
            path: self.path.display().to_string(),
            source,
        })
    }
}

impl CatalogSource for FileCatalog {
    fn list_filters(&self) -> Result<BTreeSet<String>, CatalogError> {
        let file = self.read()?;
        let mut filters = BTreeSet::new();
        for name in file.filters {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(CatalogError::Malformed(
                    "filter names must be non-empty".to_string(),
                ));
            }
            filters.insert(name);
        }
        Ok(filters)
    }

    fn list_agents(&self) -> Result<BTreeMap<String, String>, CatalogError> {
        let file = self.read()?;
        let mut agents = BTreeMap::new();
        for record in file.agents {
            let id = record.id.trim();
            if id.is_empty() {
                return Err(CatalogError::Malformed(
                    "agent ids must be non-empty".to_string(),
                ));
            }
            let label = agent_display_label(id, record.name.trim());
            if agents.insert(id.to_string(), label).is_some() {
                return Err(CatalogError::Malformed(format!(
                    "agent `{id}` is listed more than once"
                )));
            }
        }
        Ok(agents)
    }
}
