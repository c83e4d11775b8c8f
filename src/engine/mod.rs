pub mod error;

pub use error::FlowError;

use crate::config::EngineSettings;
use crate::flow::{
    FlowCatalog, FlowDefinition, FlowResponse, FlowStep, FlowSummary, StepKind, StepView,
};
use crate::session::{
    generate_session_id, ActiveSessionIndex, FlowState, SessionStore, SESSION_NAMESPACE,
};
use crate::shared::{FlowId, SessionId, UserId};
use std::sync::Arc;
use tracing::info;

const SESSION_ID_MAX_GENERATION_ATTEMPTS: u32 = 5;

/// All session state lives in the supplied [`SessionStore`]. The
/// read-modify-write in `submit_step` has no concurrency guard; concurrent
/// submissions for one session id are last-write-wins.
pub struct FlowEngine {
    catalog: FlowCatalog,
    store: Arc<dyn SessionStore>,
    active: ActiveSessionIndex,
    ttl_seconds: u64,
}

impl FlowEngine {
    pub fn new(
        catalog: FlowCatalog,
        store: Arc<dyn SessionStore>,
        settings: EngineSettings,
    ) -> Self {
        Self {
            catalog,
            active: ActiveSessionIndex::new(Arc::clone(&store)),
            store,
            ttl_seconds: settings.session_ttl_seconds,
        }
    }

    pub fn list_flows(&self) -> Vec<FlowSummary> {
        self.catalog.list()
    }

    pub fn start_session(
        &self,
        flow_id: &FlowId,
        user_id: &UserId,
        allow_resume: bool,
    ) -> Result<FlowResponse, FlowError> {
        let definition = self.definition(flow_id)?;

        if allow_resume {
            if let Some(session_id) = self.active.lookup(flow_id, user_id)? {
                if let Some(state) = self.load_state(&session_id)? {
                    let step = current_step(definition, &state);
                    if step.kind != StepKind::Summary {
                        return Ok(self.response_for(definition, &state, step));
                    }
                }
            }
        }

        let now = chrono::Utc::now().timestamp();
        let session_id = self.allocate_session_id(now)?;
        let state = FlowState::new(
            session_id.clone(),
            flow_id.clone(),
            user_id.clone(),
            definition.first_step().id.clone(),
            now,
        );
        self.persist_state(&state)?;
        self.active
            .point(flow_id, user_id, &session_id, self.ttl_seconds)?;
        info!(flow = %flow_id, session = %session_id, "flow session started");
        Ok(self.response_for(definition, &state, definition.first_step()))
    }

    /// `None` when the session expired or never existed.
    pub fn resume_session(
        &self,
        session_id: &SessionId,
    ) -> Result<Option<FlowResponse>, FlowError> {
        let Some(state) = self.load_state(session_id)? else {
            return Ok(None);
        };
        let definition = self.definition(&state.flow_id)?;
        let step = current_step(definition, &state);
        Ok(Some(self.response_for(definition, &state, step)))
    }

    pub fn submit_step(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
        input: &str,
    ) -> Result<FlowResponse, FlowError> {
        let Some(mut state) = self.load_state(session_id)? else {
            return Err(FlowError::SessionNotFound {
                session_id: session_id.to_string(),
            });
        };
        if &state.user_id != user_id {
            return Err(FlowError::SessionOwnershipMismatch {
                session_id: session_id.to_string(),
            });
        }
        let definition = self.definition(&state.flow_id)?;
        let step = current_step(definition, &state);

        // Already on the summary step: this call is the completion
        // acknowledgment. The input is not consumed.
        if step.kind == StepKind::Summary {
            let response = self.response_for(definition, &state, step);
            self.clear_session(&state)?;
            return Ok(response);
        }

        if let Some(validator) = step.validator {
            if let Err(message) = validator(input) {
                // Unchanged current step, re-presented with the corrective
                // message as the prompt.
                let mut response = self.response_for(definition, &state, step);
                response.step.prompt = message;
                return Ok(response);
            }
        }

        let field = step.field_name().to_string();
        let next_id = match &step.next {
            Some(next) => next.clone(),
            None => definition.step_after(&step.id).id.clone(),
        };
        state.collected.insert(field, input.to_string());
        state.step_id = next_id;
        state.updated_at = chrono::Utc::now().timestamp();
        self.persist_state(&state)?;
        self.active
            .point(&state.flow_id, &state.user_id, session_id, self.ttl_seconds)?;

        let next_step = current_step(definition, &state);
        let response = self.response_for(definition, &state, next_step);
        if next_step.kind == StepKind::Summary {
            self.clear_session(&state)?;
            info!(flow = %state.flow_id, session = %session_id, "flow session completed");
        }
        Ok(response)
    }

    /// No-op when the session is already gone.
    pub fn cancel_session(
        &self,
        session_id: &SessionId,
        user_id: &UserId,
    ) -> Result<(), FlowError> {
        let Some(state) = self.load_state(session_id)? else {
            return Ok(());
        };
        if &state.user_id != user_id {
            return Err(FlowError::SessionOwnershipMismatch {
                session_id: session_id.to_string(),
            });
        }
        self.clear_session(&state)?;
        info!(flow = %state.flow_id, session = %session_id, "flow session canceled");
        Ok(())
    }

    pub fn submit_step_for_flow(
        &self,
        flow_id: &FlowId,
        user_id: &UserId,
        input: &str,
    ) -> Result<FlowResponse, FlowError> {
        let session_id = match self.active.lookup(flow_id, user_id)? {
            Some(session_id) => session_id,
            None => self.start_session(flow_id, user_id, true)?.session_id,
        };
        self.submit_step(&session_id, user_id, input)
    }

    pub fn cancel_active_flow(&self, flow_id: &FlowId, user_id: &UserId) -> Result<(), FlowError> {
        if let Some(session_id) = self.active.lookup(flow_id, user_id)? {
            self.cancel_session(&session_id, user_id)?;
        }
        Ok(())
    }

    fn definition(&self, flow_id: &FlowId) -> Result<&FlowDefinition, FlowError> {
        self.catalog
            .get(flow_id)
            .ok_or_else(|| FlowError::UnknownFlow {
                flow_id: flow_id.to_string(),
            })
    }

    fn allocate_session_id(&self, now: i64) -> Result<SessionId, FlowError> {
        for _ in 0..SESSION_ID_MAX_GENERATION_ATTEMPTS {
            let candidate = generate_session_id(now).map_err(FlowError::SessionIdGeneration)?;
            if self
                .store
                .get(SESSION_NAMESPACE, candidate.as_str())?
                .is_none()
            {
                return Ok(candidate);
            }
        }
        Err(FlowError::SessionIdAllocation {
            attempts: SESSION_ID_MAX_GENERATION_ATTEMPTS,
        })
    }

    fn load_state(&self, session_id: &SessionId) -> Result<Option<FlowState>, FlowError> {
        let Some(value) = self.store.get(SESSION_NAMESPACE, session_id.as_str())? else {
            return Ok(None);
        };
        let state = serde_json::from_value(value).map_err(|source| FlowError::StateDecode {
            key: session_id.to_string(),
            source,
        })?;
        Ok(Some(state))
    }

    fn persist_state(&self, state: &FlowState) -> Result<(), FlowError> {
        let value = serde_json::to_value(state).map_err(|source| FlowError::StateEncode {
            key: state.session_id.to_string(),
            source,
        })?;
        self.store.set(
            SESSION_NAMESPACE,
            state.session_id.as_str(),
            value,
            self.ttl_seconds,
        )?;
        Ok(())
    }

    fn clear_session(&self, state: &FlowState) -> Result<(), FlowError> {
        self.store
            .delete(SESSION_NAMESPACE, state.session_id.as_str())?;
        self.active.clear(&state.flow_id, &state.user_id)?;
        Ok(())
    }

    fn response_for(
        &self,
        definition: &FlowDefinition,
        state: &FlowState,
        step: &FlowStep,
    ) -> FlowResponse {
        let complete = step.kind == StepKind::Summary;
        FlowResponse {
            flow_id: state.flow_id.clone(),
            session_id: state.session_id.clone(),
            step: StepView {
                id: step.id.clone(),
                kind: step.kind,
                prompt: step.prompt.clone(),
            },
            collected: state.collected.clone(),
            complete,
            summary: complete.then(|| definition.render_summary(&state.collected)),
            suggestions: step.quick_replies.clone(),
        }
    }
}

// Falls back to the first step when the stored step id no longer exists in
// the definition (content changed under a live session).
fn current_step<'a>(definition: &'a FlowDefinition, state: &FlowState) -> &'a FlowStep {
    definition
        .step(&state.step_id)
        .unwrap_or_else(|| definition.first_step())
}
