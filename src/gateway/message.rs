use serde::{Deserialize, Serialize};

pub const FILTER_EXPRESSION_UPDATE_COMMAND: &str = "FilterExpressionUpdateMessage";
pub const FILTER_ASSIGNMENT_COMMAND: &str = "FilterAssignmentMessage";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterExpressionUpdateMessage {
    pub command: String,
    pub name: String,
    pub description: String,
    pub query: String,
}

impl FilterExpressionUpdateMessage {
    pub fn new(name: &str, description: &str, query: &str) -> Self {
        Self {
            command: FILTER_EXPRESSION_UPDATE_COMMAND.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            query: query.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FilterAssignmentMessage {
    pub command: String,
    pub agent: String,
    pub filter: String,
}

impl FilterAssignmentMessage {
    pub fn new(agent_id: &str, filter_name: &str) -> Self {
        Self {
            command: FILTER_ASSIGNMENT_COMMAND.to_string(),
            agent: agent_id.to_string(),
            filter: filter_name.to_string(),
        }
    }
}
