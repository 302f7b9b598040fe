use super::boundary::{
    project_build_query_view, project_select_agents_view, BuildQueryResponse, FormButton,
    QueryEdit, SelectAgentsResponse, UiError, WizardUi,
};
use super::error::{StepRejection, WizardError};
use super::session::{WizardExit, WizardSession, WizardStep};
use crate::catalog::{CatalogSnapshot, CatalogSource};
use crate::gateway::CommitGateway;
use crate::query::{serialize, validate_with, AddOutcome, ValidationRules};
use crate::shared::logging::WizardLog;

/// Collaborators shared by every step of one session.
pub struct StepContext<'a> {
    pub catalog: &'a CatalogSnapshot,
    pub gateway: &'a mut dyn CommitGateway,
    pub rules: ValidationRules,
    pub log: &'a WizardLog,
}

pub fn run_wizard(
    source: &dyn CatalogSource,
    ui: &mut dyn WizardUi,
    gateway: &mut dyn CommitGateway,
    rules: ValidationRules,
    log: &WizardLog,
) -> Result<WizardExit, WizardError> {
    log.info("session.start", "loading catalog");
    let catalog = CatalogSnapshot::load(source).map_err(|err| {
        log.error("session.failed", &err.to_string());
        WizardError::CatalogUnavailable(err)
    })?;
    log.info(
        "catalog.loaded",
        &format!(
            "{} filters, {} agents",
            catalog.filter_count(),
            catalog.agent_count()
        ),
    );

    let mut ctx = StepContext {
        catalog: &catalog,
        gateway,
        rules,
        log,
    };
    let result = run_session(WizardSession::new(), ui, &mut ctx);
    match &result {
        Ok(WizardExit::Committed { name, .. }) => {
            log.info("session.finished", &format!("filter `{name}` committed"))
        }
        Ok(WizardExit::Cancelled { .. }) => log.info("session.cancelled", "cancelled by operator"),
        Ok(WizardExit::Detached { .. }) => log.info("session.detached", "User detached"),
        Err(err) => log.error("session.failed", &err.to_string()),
    }
    result
}

/// Drives `session` until it reaches `Finished` or the operator detaches.
pub fn run_session(
    mut session: WizardSession,
    ui: &mut dyn WizardUi,
    ctx: &mut StepContext<'_>,
) -> Result<WizardExit, WizardError> {
    ctx.log.info("step.enter", session.step.as_str());
    loop {
        let previous = session.step;
        session = match session.step {
            WizardStep::BuildQuery => {
                let view = project_build_query_view(&session, ctx.catalog);
                match ui.show_build_query(&view) {
                    Ok(response) => build_query_step(session, response, ctx)?,
                    Err(err) => return detach_or_fail(&session, err),
                }
            }
            WizardStep::SelectAgents => {
                let view = project_select_agents_view(&session, ctx.catalog);
                match ui.show_select_agents(&view) {
                    Ok(response) => select_agents_step(session, response, ctx)?,
                    Err(err) => return detach_or_fail(&session, err),
                }
            }
            WizardStep::Update => update_step(session, ctx)?,
            WizardStep::Assign => assign_step(session, ctx)?,
            WizardStep::Finished => return Ok(session.exit()),
        };
        if let Some(rejection) = &session.last_rejection {
            ctx.log.warn("step.rejected", &rejection.to_string());
        }
        if session.step != previous {
            ctx.log.info("step.enter", session.step.as_str());
        }
    }
}

fn detach_or_fail(session: &WizardSession, err: UiError) -> Result<WizardExit, WizardError> {
    match err {
        UiError::Detached => Ok(WizardExit::Detached {
            filter_pushed: session.filter_pushed,
        }),
        UiError::Failed(message) => Err(WizardError::Ui(message)),
    }
}

pub fn build_query_step(
    mut session: WizardSession,
    response: BuildQueryResponse,
    ctx: &mut StepContext<'_>,
) -> Result<WizardSession, WizardError> {
    session.clear_error();
    session.query.name = response.name;
    session.query.description = response.description;
    session.assign_to_agents = response.assign_to_agents;

    let reconciled = match &response.edit {
        QueryEdit::NextFilter(value) => session
            .query
            .add_term(value, ctx.catalog)
            .map(|outcome| {
                if let AddOutcome::Added(index) = outcome {
                    ctx.log
                        .info("query.term_added", &format!("{value} at position {index}"));
                }
            }),
        QueryEdit::Terms(terms) => session.query.replace_terms(terms, ctx.catalog),
    };
    if let Err(err) = reconciled {
        session.reject(err.into());
    }

    match response.button {
        Some(FormButton::Cancel) => {
            session.cancelled = true;
            session.step = WizardStep::Finished;
        }
        Some(FormButton::Update) if session.last_rejection.is_none() => {
            if let Err(err) = validate_with(&session.query, ctx.rules) {
                session.reject(err.into());
            } else if !session.query.has_name_and_description() {
                session.reject(StepRejection::MissingNameOrDescription);
            } else if session.assign_to_agents {
                ctx.log.info("filter.pushing", "Updating filter expression...");
                push_filter(&mut session, ctx)?;
                session.step = WizardStep::SelectAgents;
            } else {
                session.step = WizardStep::Update;
            }
        }
        Some(FormButton::Update) | None => {}
    }
    Ok(session)
}

pub fn select_agents_step(
    mut session: WizardSession,
    response: SelectAgentsResponse,
    ctx: &mut StepContext<'_>,
) -> Result<WizardSession, WizardError> {
    session.clear_error();
    session.agents.replace(&response.selected, ctx.catalog);

    match response.button {
        Some(FormButton::Cancel) => {
            session.cancelled = true;
            session.step = WizardStep::Finished;
        }
        Some(FormButton::Update) => {
            if session.agents.is_empty() {
                session.reject(StepRejection::NoAgentsSelected);
            } else {
                session.step = WizardStep::Assign;
            }
        }
        None => {}
    }
    Ok(session)
}

pub fn update_step(
    mut session: WizardSession,
    ctx: &mut StepContext<'_>,
) -> Result<WizardSession, WizardError> {
    push_filter(&mut session, ctx)?;
    session.step = WizardStep::Finished;
    Ok(session)
}

pub fn assign_step(
    mut session: WizardSession,
    ctx: &mut StepContext<'_>,
) -> Result<WizardSession, WizardError> {
    let agent_ids: Vec<String> = session.agents.iter().map(str::to_string).collect();
    for agent_id in agent_ids {
        ctx.gateway
            .push_agent_assignment(&agent_id, &session.query.name)
            .map_err(WizardError::CommitGatewayFailure)?;
        ctx.log.info(
            "agent.assigned",
            &format!("filter `{}` assigned to {agent_id}", session.query.name),
        );
        session.assigned_agents.push(agent_id);
    }
    session.step = WizardStep::Finished;
    Ok(session)
}

fn push_filter(session: &mut WizardSession, ctx: &mut StepContext<'_>) -> Result<(), WizardError> {
    let expression = serialize(&session.query);
    ctx.gateway
        .push_filter_update(
            &session.query.name,
            &session.query.description,
            &expression,
        )
        .map_err(WizardError::CommitGatewayFailure)?;
    session.filter_pushed = true;
    ctx.log.info(
        "filter.pushed",
        &format!("{} = {}", session.query.name, expression.trim_end()),
    );
    Ok(())
}
