use crate::session::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum FlowError {
    #[error("unknown flow `{flow_id}`")]
    UnknownFlow { flow_id: String },
    #[error("flow session `{session_id}` not found")]
    SessionNotFound { session_id: String },
    #[error("flow session `{session_id}` belongs to another user")]
    SessionOwnershipMismatch { session_id: String },
    #[error("session id generation failed: {0}")]
    SessionIdGeneration(String),
    #[error("failed to allocate a unique session id after {attempts} attempts")]
    SessionIdAllocation { attempts: u32 },
    #[error("session state encode failed for `{key}`: {source}")]
    StateEncode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("session state decode failed for `{key}`: {source}")]
    StateDecode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Store(#[from] StoreError),
}
