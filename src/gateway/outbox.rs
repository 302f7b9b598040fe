use super::message::{
    FilterAssignmentMessage, FilterExpressionUpdateMessage, FILTER_ASSIGNMENT_COMMAND,
    FILTER_EXPRESSION_UPDATE_COMMAND,
};
use super::{CommitGateway, GatewayError};
use crate::shared::fs_atomic::atomic_write_file;
use chrono::Utc;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Delivers each commit as one JSON file in a directory the external system
/// drains. File names sort in write order.
#[derive(Debug, Clone)]
pub struct OutboxGateway {
    dir: PathBuf,
    sequence: u64,
    written: Vec<PathBuf>,
}

impl OutboxGateway {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            sequence: 0,
            written: Vec::new(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn next_path(&mut self, command: &str) -> PathBuf {
        self.sequence += 1;
        self.dir.join(format!(
            "{}-{:04}-{command}.json",
            Utc::now().format("%Y%m%dT%H%M%S%3f"),
            self.sequence
        ))
    }

    fn write_message<T: Serialize>(
        &mut self,
        command: &'static str,
        message: &T,
    ) -> Result<(), GatewayError> {
        let body = serde_json::to_vec_pretty(message)
            .map_err(|source| GatewayError::Encode { command, source })?;
        let path = self.next_path(command);
        atomic_write_file(&path, &body).map_err(|source| GatewayError::Write {
            path: path.display().to_string(),
            source,
        })?;
        self.written.push(path);
        Ok(())
    }
}

impl CommitGateway for OutboxGateway {
    fn push_filter_update(
        &mut self,
        name: &str,
        description: &str,
        expression: &str,
    ) -> Result<(), GatewayError> {
        let message = FilterExpressionUpdateMessage::new(name, description, expression);
        self.write_message(FILTER_EXPRESSION_UPDATE_COMMAND, &message)
    }

    fn push_agent_assignment(
        &mut self,
        agent_id: &str,
        filter_name: &str,
    ) -> Result<(), GatewayError> {
        let message = FilterAssignmentMessage::new(agent_id, filter_name);
        self.write_message(FILTER_ASSIGNMENT_COMMAND, &message)
    }
}
