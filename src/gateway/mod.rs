pub mod message;
pub mod outbox;

pub use message::{
    FilterAssignmentMessage, FilterExpressionUpdateMessage, FILTER_ASSIGNMENT_COMMAND,
    FILTER_EXPRESSION_UPDATE_COMMAND,
};
pub use outbox::OutboxGateway;

#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    #[error("failed to encode {command}: {source}")]
    Encode {
        command: &'static str,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to write message {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("external system rejected the request: {0}")]
    Rejected(String),
}

/// Sink for committed results. Every call is fire-and-forget; an error ends
/// the session.
pub trait CommitGateway {
    fn push_filter_update(
        &mut self,
        name: &str,
        description: &str,
        expression: &str,
    ) -> Result<(), GatewayError>;

    fn push_agent_assignment(&mut self, agent_id: &str, filter_name: &str)
        -> Result<(), GatewayError>;
}
