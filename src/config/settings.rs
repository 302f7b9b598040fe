use super::paths::default_log_path;
use super::ConfigError;
use crate::query::ValidationRules;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Settings {
    pub catalog_path: PathBuf,
    pub outbox_path: PathBuf,
    #[serde(default)]
    pub log_path: Option<PathBuf>,
    #[serde(default)]
    pub validation: ValidationRules,
}

impl Settings {
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_yaml::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.catalog_path.is_absolute() {
            return Err(ConfigError::Settings(
                "`catalog_path` must be an absolute path".to_string(),
            ));
        }
        if !self.outbox_path.is_absolute() {
            return Err(ConfigError::Settings(
                "`outbox_path` must be an absolute path".to_string(),
            ));
        }
        if let Some(log_path) = &self.log_path {
            if !log_path.is_absolute() {
                return Err(ConfigError::Settings(
                    "`log_path` must be an absolute path".to_string(),
                ));
            }
        }
        Ok(())
    }

    /// Configured log file, else the default under the state root. `None`
    /// when neither can be resolved; the session then runs without a log.
    pub fn resolved_log_path(&self) -> Option<PathBuf> {
        self.log_path
            .clone()
            .or_else(|| default_log_path().ok())
    }
}

/// Values given on the command line. Each one wins over the config file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub outbox_path: Option<PathBuf>,
    pub log_path: Option<PathBuf>,
    pub strict_nesting: bool,
}

impl SettingsOverrides {
    pub fn apply(&self, settings: &mut Settings) {
        if let Some(path) = &self.catalog_path {
            settings.catalog_path = path.clone();
        }
        if let Some(path) = &self.outbox_path {
            settings.outbox_path = path.clone();
        }
        if let Some(path) = &self.log_path {
            settings.log_path = Some(path.clone());
        }
        if self.strict_nesting {
            settings.validation.strict_nesting = true;
        }
    }

    /// Settings built purely from flags, used when no config file exists.
    pub fn to_settings(&self) -> Result<Settings, ConfigError> {
        Ok(Settings {
            catalog_path: self
                .catalog_path
                .clone()
                .ok_or(ConfigError::MissingSetting("catalog_path"))?,
            outbox_path: self
                .outbox_path
                .clone()
                .ok_or(ConfigError::MissingSetting("outbox_path"))?,
            log_path: self.log_path.clone(),
            validation: ValidationRules {
                strict_nesting: self.strict_nesting,
            },
        })
    }
}
