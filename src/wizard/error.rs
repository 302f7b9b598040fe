use crate::catalog::CatalogError;
use crate::gateway::GatewayError;
use crate::query::{QueryEditError, ValidationError};

/// Recoverable outcome of a step evaluation. The step is re-rendered with the
/// message as the current error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StepRejection {
    #[error(transparent)]
    Invalid(#[from] ValidationError),
    #[error(transparent)]
    Edit(#[from] QueryEditError),
    #[error("Name and Description can't be empty!")]
    MissingNameOrDescription,
    #[error("No agents selected!")]
    NoAgentsSelected,
}

/// Failures that abort the session.
#[derive(Debug, thiserror::Error)]
pub enum WizardError {
    #[error("catalog unavailable: {0}")]
    CatalogUnavailable(#[source] CatalogError),
    #[error("commit failed: {0}")]
    CommitGatewayFailure(#[source] GatewayError),
    #[error("{0}")]
    Ui(String),
}
