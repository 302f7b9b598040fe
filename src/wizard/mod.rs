pub mod boundary;
pub mod error;
pub mod machine;
pub mod session;

pub use boundary::{
    project_build_query_view, project_select_agents_view, AgentOptionView,
    BuildQueryResponse, BuildQueryView, FormButton, QueryEdit, SelectAgentsResponse,
    SelectAgentsView, TermRowView, UiError, WizardUi,
};
pub use error::{StepRejection, WizardError};
pub use machine::{
    assign_step, build_query_step, run_session, run_wizard, select_agents_step, update_step,
    StepContext,
};
pub use session::{AgentSelection, WizardExit, WizardSession, WizardStep};
